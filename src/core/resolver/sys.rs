// Raw FFI bindings to the c-ares global library API.
use std::os::raw::{c_char, c_int};

// Pulls in the libcares link directives.
use c_ares_sys as _;

pub const ARES_SUCCESS: c_int = 0;

pub const ARES_LIB_INIT_NONE: c_int = 0;
pub const ARES_LIB_INIT_WIN32: c_int = 1 << 0;
pub const ARES_LIB_INIT_ALL: c_int = ARES_LIB_INIT_WIN32;

unsafe extern "C" {
    pub fn ares_library_init(flags: c_int) -> c_int;

    pub fn ares_library_cleanup();

    pub fn ares_strerror(code: c_int) -> *const c_char;

    pub fn ares_version(version: *mut c_int) -> *const c_char;
}
