//! Purpose: Name, run, and time the library probes.
//! Exports: `ProbeKind`, `ProbeReport`, `run_probe`, `run_probe_with`.
//! Role: Shared runner used by the `linkprobe` CLI; standalone probe binaries call the
//! per-library functions directly.
//! Invariants: Probe names are stable (`c-ares`, `zlib`) and match the benchmark directories.
//! Invariants: A report is `ok` iff the probe returned `Ok`; failures keep the library status.
use std::fmt;
use std::time::Instant;

use libc::c_int;
use serde::Serialize;
use tracing::info;

use crate::core::compression::{self, DeflateLibrary, Zlib};
use crate::core::error::{Error, ErrorKind, to_exit_code};
use crate::core::resolver::{self, CAres, ResolverLibrary};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum ProbeKind {
    #[serde(rename = "c-ares")]
    Resolver,
    #[serde(rename = "zlib")]
    Compression,
}

impl ProbeKind {
    pub const ALL: [ProbeKind; 2] = [ProbeKind::Resolver, ProbeKind::Compression];

    pub fn name(self) -> &'static str {
        match self {
            ProbeKind::Resolver => resolver::PROBE_NAME,
            ProbeKind::Compression => compression::PROBE_NAME,
        }
    }

    pub fn parse(name: &str) -> Result<Self, Error> {
        match name.trim().to_ascii_lowercase().as_str() {
            "c-ares" | "cares" | "resolver" => Ok(ProbeKind::Resolver),
            "zlib" | "compression" => Ok(ProbeKind::Compression),
            _ => Err(Error::new(ErrorKind::Usage)
                .with_message(format!("unknown probe `{name}` (expected c-ares or zlib)"))),
        }
    }

    /// Status the library returns on success (`ARES_SUCCESS` / `Z_OK`).
    pub fn success_status(self) -> c_int {
        match self {
            ProbeKind::Resolver => resolver::sys::ARES_SUCCESS,
            ProbeKind::Compression => compression::Z_OK,
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeReport {
    pub probe: ProbeKind,
    pub ok: bool,
    pub status: c_int,
    pub message: Option<String>,
    pub library_version: String,
    pub elapsed_us: u64,
}

impl ProbeReport {
    pub fn exit_code(&self) -> i32 {
        if self.ok {
            0
        } else {
            to_exit_code(ErrorKind::InitFailed)
        }
    }
}

pub fn run_probe(kind: ProbeKind) -> ProbeReport {
    run_probe_with(kind, &CAres, &Zlib)
}

pub fn run_probe_with<R, D>(kind: ProbeKind, resolver_lib: &R, deflate_lib: &D) -> ProbeReport
where
    R: ResolverLibrary + ?Sized,
    D: DeflateLibrary + ?Sized,
{
    let started = Instant::now();
    let (result, library_version) = match kind {
        ProbeKind::Resolver => (
            resolver::probe_resolver(resolver_lib),
            resolver_lib.version(),
        ),
        ProbeKind::Compression => (
            compression::probe_compression(deflate_lib),
            deflate_lib.version(),
        ),
    };
    let elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    let report = match result {
        Ok(()) => ProbeReport {
            probe: kind,
            ok: true,
            status: kind.success_status(),
            message: None,
            library_version,
            elapsed_us,
        },
        Err(err) => ProbeReport {
            probe: kind,
            ok: false,
            status: err.status().unwrap_or(-1),
            message: Some(
                err.message()
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string()),
            ),
            library_version,
            elapsed_us,
        },
    };
    info!(
        probe = kind.name(),
        ok = report.ok,
        status = report.status,
        elapsed_us = report.elapsed_us,
        "probe finished"
    );
    report
}
