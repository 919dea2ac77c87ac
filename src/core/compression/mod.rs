//! Purpose: Link-and-initialize probe for the zlib compression library.
//! Exports: `DeflateLibrary`, `Zlib`, `ZStream`, `probe_compression`, `COMPRESSION_LEVEL`.
//! Role: Runs the deflate stream init -> check -> end sequence against zlib.
//! Invariants: The stream starts zeroed and stays at one heap address until `deflateEnd`.
//! Invariants: Init always uses level 9; `deflateEnd` runs only after `Z_OK`.
//! Invariants: All FFI interaction is confined to `Zlib` + `ZStream`.
use std::ffi::CStr;
use std::mem::{self, MaybeUninit};

use libc::c_int;
use libz_sys as zsys;
use tracing::{debug, warn};

use crate::core::error::{Error, ErrorKind};

pub const PROBE_NAME: &str = "zlib";
pub const COMPRESSION_LEVEL: c_int = 9;
pub const DEFLATE_INIT_FAILED: &str = "deflateInit(...) failed!";

pub use zsys::Z_OK;

/// Zero-initialized `z_stream` owned by the probe.
///
/// The Rust side never reads the value; zlib fills it in. A zeroed stream carries null
/// allocator callbacks, which zlib swaps for its defaults during init.
pub struct ZStream {
    inner: Box<MaybeUninit<zsys::z_stream>>,
}

impl ZStream {
    pub fn zeroed() -> Self {
        Self {
            inner: Box::new(MaybeUninit::zeroed()),
        }
    }

    pub fn as_mut_ptr(&mut self) -> *mut zsys::z_stream {
        self.inner.as_mut_ptr()
    }
}

/// Stream entry points the probe needs from a deflate implementation.
pub trait DeflateLibrary {
    fn deflate_init(&self, stream: &mut ZStream, level: c_int) -> c_int;

    fn deflate_end(&self, stream: &mut ZStream) -> c_int;

    fn version(&self) -> String;
}

/// The linked zlib library.
#[derive(Clone, Copy, Debug, Default)]
pub struct Zlib;

impl DeflateLibrary for Zlib {
    fn deflate_init(&self, stream: &mut ZStream, level: c_int) -> c_int {
        // Same expansion as the C `deflateInit` macro.
        unsafe {
            zsys::deflateInit_(
                stream.as_mut_ptr(),
                level,
                zsys::zlibVersion(),
                mem::size_of::<zsys::z_stream>() as c_int,
            )
        }
    }

    fn deflate_end(&self, stream: &mut ZStream) -> c_int {
        unsafe { zsys::deflateEnd(stream.as_mut_ptr()) }
    }

    fn version(&self) -> String {
        let ptr = unsafe { zsys::zlibVersion() };
        if ptr.is_null() {
            return String::new();
        }
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
    }
}

pub fn probe_compression<L>(lib: &L) -> Result<(), Error>
where
    L: DeflateLibrary + ?Sized,
{
    let mut stream = ZStream::zeroed();

    debug!(level = COMPRESSION_LEVEL, "deflateInit");
    let status = lib.deflate_init(&mut stream, COMPRESSION_LEVEL);
    if status != Z_OK {
        debug!(status, probe = PROBE_NAME, "{DEFLATE_INIT_FAILED}");
        return Err(Error::new(ErrorKind::InitFailed)
            .with_message(DEFLATE_INIT_FAILED)
            .with_probe(PROBE_NAME)
            .with_status(status));
    }

    let end_status = lib.deflate_end(&mut stream);
    if end_status == Z_OK {
        debug!("deflateEnd");
    } else {
        warn!(status = end_status, probe = PROBE_NAME, "deflateEnd returned non-ok status");
    }
    Ok(())
}
