//! Purpose: Shared probe library used by the `linkprobe` CLI and the standalone sanity binaries.
//! Exports: `core` (resolver and compression probes, probe runner, errors), `logging`.
//! Role: Internal library backing the binaries; not a stable public SDK.
//! Invariants: Each probe is a single init -> check -> cleanup sequence with no retries.
//! Invariants: Library calls go through traits so tests can stand in for the native libraries.
pub mod core;
pub mod logging;
