//! Purpose: Link-and-initialize probe for the c-ares resolver library.
//! Exports: `ResolverLibrary`, `CAres`, `probe_resolver`, `PROBE_NAME`.
//! Role: Runs the global init -> check -> cleanup sequence against c-ares.
//! Invariants: Init is always requested with `ARES_LIB_INIT_ALL`.
//! Invariants: Cleanup runs exactly once, and only after a successful init.
//! Invariants: All FFI interaction is confined to `CAres` + `sys`.
use std::ffi::CStr;
use std::ptr;

use libc::c_int;
use tracing::debug;

use crate::core::error::{Error, ErrorKind};

pub mod sys;

pub const PROBE_NAME: &str = "c-ares";

/// Global library entry points the probe needs from a resolver library.
pub trait ResolverLibrary {
    fn init(&self, flags: c_int) -> c_int;

    fn strerror(&self, status: c_int) -> String;

    fn cleanup(&self);

    fn version(&self) -> String;
}

/// The linked c-ares library.
#[derive(Clone, Copy, Debug, Default)]
pub struct CAres;

impl ResolverLibrary for CAres {
    fn init(&self, flags: c_int) -> c_int {
        unsafe { sys::ares_library_init(flags) }
    }

    fn strerror(&self, status: c_int) -> String {
        let ptr = unsafe { sys::ares_strerror(status) };
        if ptr.is_null() {
            return format!("unknown status {status}");
        }
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
    }

    fn cleanup(&self) {
        unsafe { sys::ares_library_cleanup() }
    }

    fn version(&self) -> String {
        let ptr = unsafe { sys::ares_version(ptr::null_mut()) };
        if ptr.is_null() {
            return String::new();
        }
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
    }
}

pub fn probe_resolver<L>(lib: &L) -> Result<(), Error>
where
    L: ResolverLibrary + ?Sized,
{
    debug!(flags = sys::ARES_LIB_INIT_ALL, "ares_library_init");
    let status = lib.init(sys::ARES_LIB_INIT_ALL);
    if status != sys::ARES_SUCCESS {
        let message = format!("ares_library_init: {}", lib.strerror(status));
        debug!(status, probe = PROBE_NAME, "{message}");
        return Err(Error::new(ErrorKind::InitFailed)
            .with_message(message)
            .with_probe(PROBE_NAME)
            .with_status(status));
    }

    lib.cleanup();
    debug!("ares_library_cleanup");
    Ok(())
}
