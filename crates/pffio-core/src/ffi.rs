// Raw symbol types for the libpff dynamic module.
//
// Return-code conventions follow libpff.h: initialize/open/free return 1 on
// success, close returns 0 on success, all return -1 on error and populate
// the trailing error out-parameter.

use std::os::raw::c_char;
use std::os::raw::c_int;

/// Opaque `libpff_file_t`.
#[repr(C)]
pub struct PffFileRaw {
    _opaque: [u8; 0],
}

/// Opaque `libpff_error_t`.
#[repr(C)]
pub struct PffErrorRaw {
    _opaque: [u8; 0],
}

pub const ACCESS_FLAG_READ: i32 = 0x01;
pub const ACCESS_FLAG_WRITE: i32 = 0x02;

pub type GetVersionFn = unsafe extern "C" fn() -> *const c_char;

pub type FileInitializeFn =
    unsafe extern "C" fn(file: *mut *mut PffFileRaw, error: *mut *mut PffErrorRaw) -> c_int;

pub type FileFreeFn =
    unsafe extern "C" fn(file: *mut *mut PffFileRaw, error: *mut *mut PffErrorRaw) -> c_int;

pub type FileOpenFn = unsafe extern "C" fn(
    file: *mut PffFileRaw,
    filename: *const c_char,
    access_flags: c_int,
    error: *mut *mut PffErrorRaw,
) -> c_int;

pub type FileCloseFn =
    unsafe extern "C" fn(file: *mut PffFileRaw, error: *mut *mut PffErrorRaw) -> c_int;

pub type ErrorSprintFn =
    unsafe extern "C" fn(error: *mut PffErrorRaw, string: *mut c_char, size: usize) -> c_int;

pub type ErrorFreeFn = unsafe extern "C" fn(error: *mut *mut PffErrorRaw);
