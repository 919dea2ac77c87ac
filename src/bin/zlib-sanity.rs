//! Purpose: Standalone zlib sanity probe run before compression benchmarks.
//! Role: Verifies libz links and a level-9 deflate stream can be opened and closed.
//! Invariants: Prints nothing and exits 0 on success.
//! Invariants: On failure prints `deflateInit(...) failed!` to stdout and exits 1.
use linkprobe::core::compression::{DEFLATE_INIT_FAILED, Zlib, probe_compression};
use linkprobe::core::error::to_exit_code;
use linkprobe::logging::init_tracing;

fn main() {
    init_tracing();
    if let Err(err) = probe_compression(&Zlib) {
        println!("{}", err.message().unwrap_or(DEFLATE_INIT_FAILED));
        std::process::exit(to_exit_code(err.kind()));
    }
}
