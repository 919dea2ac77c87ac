//! Purpose: Standalone c-ares sanity probe run before resolver benchmarks.
//! Role: Verifies libcares links and its global init/cleanup pair succeeds.
//! Invariants: Prints nothing and exits 0 on success.
//! Invariants: On failure prints `ares_library_init: <reason>` to stdout and exits 1.
use linkprobe::core::error::to_exit_code;
use linkprobe::core::resolver::{CAres, probe_resolver};
use linkprobe::logging::init_tracing;

fn main() {
    init_tracing();
    if let Err(err) = probe_resolver(&CAres) {
        println!("{}", err.message().unwrap_or("ares_library_init failed"));
        std::process::exit(to_exit_code(err.kind()));
    }
}
