//! Process-wide loading of the libpff native module.
//!
//! The module is resolved through the platform's dynamic-library search path
//! and linked at most once per process; the first outcome, success or
//! failure, is recorded behind a [`OnceLock`] and replayed to every later
//! caller. All `unsafe` FFI interaction lives in this module and [`crate::ffi`].

use std::env;
use std::ffi::CStr;
use std::ffi::OsStr;
use std::fmt;
use std::os::raw::c_char;
use std::ptr;
use std::ptr::NonNull;
use std::sync::OnceLock;

use libloading::Library;

use crate::access::AccessMode;
use crate::error::LoadError;
use crate::error::NativeError;
use crate::ffi;
use crate::handle::ArchiveBackend;

/// Base name of the native module, expanded to the platform filename
/// (`libpff.so`, `libpff.dylib`, `pff.dll`) at load time.
pub const MODULE_NAME: &str = "pff";

#[cfg(target_os = "windows")]
const SEARCH_PATH_VAR: &str = "PATH";
#[cfg(target_os = "macos")]
const SEARCH_PATH_VAR: &str = "DYLD_LIBRARY_PATH";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const SEARCH_PATH_VAR: &str = "LD_LIBRARY_PATH";

const ERROR_BUFFER_SIZE: usize = 1024;

static NATIVE_MODULE: OnceLock<Result<NativeModule, LoadError>> = OnceLock::new();

/// Loads the libpff module into the process.
///
/// Idempotent: the module is linked on the first call and the recorded
/// outcome is returned to all subsequent callers without a second load
/// attempt. Concurrent first callers serialize on the initialization guard.
///
/// # Errors
///
/// Returns [`LoadError`] when the module cannot be located or linked, or
/// when a required symbol is missing. The error carries the underlying
/// platform link error and the search path that was consulted.
pub fn load() -> Result<&'static NativeModule, LoadError> {
    NATIVE_MODULE
        .get_or_init(|| {
            let filename = libloading::library_filename(MODULE_NAME);
            unsafe { NativeModule::open_library(filename.as_os_str()) }
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// The loaded libpff module and its resolved capability surface.
///
/// The library handle is kept alive for the lifetime of the value, which in
/// practice is the process lifetime (the loaded module lives in a static).
#[derive(Debug)]
pub struct NativeModule {
    get_version: ffi::GetVersionFn,
    file_initialize: ffi::FileInitializeFn,
    file_free: ffi::FileFreeFn,
    file_open: ffi::FileOpenFn,
    file_close: ffi::FileCloseFn,
    error_sprint: ffi::ErrorSprintFn,
    error_free: ffi::ErrorFreeFn,
    _library: Library,
}

impl NativeModule {
    /// Links the named library and resolves the required symbol set.
    unsafe fn open_library(filename: &OsStr) -> Result<Self, LoadError> {
        let library =
            unsafe { Library::new(filename) }.map_err(|err| load_failure(filename, &err))?;

        Ok(Self {
            get_version: unsafe { resolve(&library, filename, b"libpff_get_version\0")? },
            file_initialize: unsafe { resolve(&library, filename, b"libpff_file_initialize\0")? },
            file_free: unsafe { resolve(&library, filename, b"libpff_file_free\0")? },
            file_open: unsafe { resolve(&library, filename, b"libpff_file_open\0")? },
            file_close: unsafe { resolve(&library, filename, b"libpff_file_close\0")? },
            error_sprint: unsafe { resolve(&library, filename, b"libpff_error_sprint\0")? },
            error_free: unsafe { resolve(&library, filename, b"libpff_error_free\0")? },
            _library: library,
        })
    }

    /// Returns the version string reported by the native module.
    #[must_use]
    pub fn version(&self) -> String {
        let version = unsafe { (self.get_version)() };
        if version.is_null() {
            return String::from("unknown");
        }
        unsafe { CStr::from_ptr(version) }
            .to_string_lossy()
            .into_owned()
    }

    /// Recovers the message from a native error object and frees it.
    fn native_error(
        &self,
        function: &'static str,
        error: &mut *mut ffi::PffErrorRaw,
    ) -> NativeError {
        let mut message = String::from("no error detail reported");
        if !error.is_null() {
            let mut buffer = [0 as c_char; ERROR_BUFFER_SIZE];
            let written = unsafe { (self.error_sprint)(*error, buffer.as_mut_ptr(), buffer.len()) };
            if written > 0 {
                message = unsafe { CStr::from_ptr(buffer.as_ptr()) }
                    .to_string_lossy()
                    .trim_end()
                    .to_string();
            }
            unsafe { (self.error_free)(error) };
        }
        NativeError { function, message }
    }
}

/// Opaque reference to one open native file object.
///
/// Owned exclusively by the [`crate::ArchiveHandle`] that acquired it: the
/// type is not clonable and release consumes it, so a reference can never be
/// used after it has been passed to a native release call. Holding a raw
/// pointer, it is neither `Send` nor `Sync`.
#[derive(Debug)]
pub struct NativeFileRef {
    raw: NonNull<ffi::PffFileRaw>,
}

impl ArchiveBackend for &'static NativeModule {
    type Resource = NativeFileRef;

    fn open_resource(&self, path: &CStr, mode: AccessMode) -> Result<NativeFileRef, NativeError> {
        let mut file: *mut ffi::PffFileRaw = ptr::null_mut();
        let mut error: *mut ffi::PffErrorRaw = ptr::null_mut();

        if unsafe { (self.file_initialize)(&mut file, &mut error) } != 1 {
            return Err(self.native_error("libpff_file_initialize", &mut error));
        }
        let Some(raw) = NonNull::new(file) else {
            return Err(NativeError {
                function: "libpff_file_initialize",
                message: String::from("reported success but returned no file object"),
            });
        };
        if unsafe { (self.file_open)(raw.as_ptr(), path.as_ptr(), mode.as_flags(), &mut error) }
            != 1
        {
            let open_error = self.native_error("libpff_file_open", &mut error);
            // No partial acquisition: the never-opened file object is freed
            // before the failure is surfaced.
            unsafe { (self.file_free)(&mut file, ptr::null_mut()) };
            return Err(open_error);
        }
        Ok(NativeFileRef { raw })
    }

    fn close_resource(&self, resource: NativeFileRef) -> Result<(), NativeError> {
        let mut file = resource.raw.as_ptr();
        let mut error: *mut ffi::PffErrorRaw = ptr::null_mut();

        let close_result = if unsafe { (self.file_close)(file, &mut error) } == 0 {
            Ok(())
        } else {
            Err(self.native_error("libpff_file_close", &mut error))
        };
        // The file object is freed even when close reports failure, so the
        // reference is never released twice.
        if unsafe { (self.file_free)(&mut file, &mut error) } != 1 {
            let free_error = self.native_error("libpff_file_free", &mut error);
            return close_result.and(Err(free_error));
        }
        close_result
    }
}

fn load_failure(filename: &OsStr, cause: &dyn fmt::Display) -> LoadError {
    LoadError {
        module: filename.to_string_lossy().into_owned(),
        cause: cause.to_string(),
        search_path: search_path(),
    }
}

/// Resolves one symbol, surfacing a missing symbol as a load failure.
unsafe fn resolve<T: Copy>(
    library: &Library,
    filename: &OsStr,
    symbol: &[u8],
) -> Result<T, LoadError> {
    let resolved =
        unsafe { library.get::<T>(symbol) }.map_err(|err| load_failure(filename, &err))?;
    Ok(*resolved)
}

/// The consulted search path, for load-failure diagnostics.
fn search_path() -> String {
    env::var(SEARCH_PATH_VAR).map_or_else(
        |_| format!("{SEARCH_PATH_VAR} is not set"),
        |value| format!("{SEARCH_PATH_VAR}={value}"),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn absent_module_reports_cause_and_search_path() {
        let filename = libloading::library_filename("pffio-absent-module");
        let result = unsafe { NativeModule::open_library(filename.as_os_str()) };
        let err = result.err().expect("loading a nonexistent module must fail");
        assert!(err.module.contains("pffio-absent-module"));
        assert!(err.search_path.contains(SEARCH_PATH_VAR));
        assert!(!err.cause.is_empty());
    }

    #[test]
    fn search_path_names_the_platform_variable() {
        assert!(search_path().contains(SEARCH_PATH_VAR));
    }

    #[test]
    fn load_records_one_outcome_for_the_whole_process() {
        // Works with and without libpff installed: the second call must
        // replay the first outcome, not attempt a second load.
        match (load(), load()) {
            (Ok(first), Ok(second)) => assert!(std::ptr::eq(first, second)),
            (Err(first), Err(second)) => assert_eq!(first, second),
            _ => panic!("repeated load() calls must agree"),
        }
    }
}
