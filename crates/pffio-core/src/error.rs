//! Error types for native module loading and handle lifecycle operations.

use thiserror::Error;

/// Result type alias using [`PffioError`].
pub type Result<T, E = PffioError> = std::result::Result<T, E>;

/// The native module could not be linked into the process.
///
/// Cloneable so the process-wide load guard can replay the recorded outcome
/// to every later caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unable to load native module `{module}`: {cause} ({search_path})")]
pub struct LoadError {
    /// Platform filename of the module that was requested (e.g. `libpff.so`).
    pub module: String,

    /// The underlying platform link error.
    pub cause: String,

    /// The dynamic-library search path that was consulted.
    pub search_path: String,
}

/// A call into the native module reported failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{function} failed: {message}")]
pub struct NativeError {
    /// Name of the native function that failed.
    pub function: &'static str,

    /// Error detail recovered from the native error object.
    pub message: String,
}

/// Errors that can occur when opening an archive file.
#[derive(Error, Debug)]
pub enum OpenError {
    /// The handle already holds an open resource.
    #[error("file is already open")]
    AlreadyOpen,

    /// The path cannot be passed to the native module.
    #[error("invalid path: {reason}")]
    InvalidPath {
        /// Why the path was rejected.
        reason: String,
    },

    /// The access-mode value is not one of the supported modes.
    #[error("invalid access mode: {flags:#x} is not a supported combination")]
    InvalidAccessMode {
        /// The rejected flag value.
        flags: i32,
    },

    /// The native open failed.
    #[error(transparent)]
    Native(#[from] NativeError),
}

/// Errors that can occur when closing an archive file.
#[derive(Error, Debug)]
pub enum CloseError {
    /// The handle holds no open resource.
    #[error("file is not open")]
    NotOpen,

    /// The native close failed. The resource has still been released.
    #[error(transparent)]
    Native(#[from] NativeError),
}

/// Any error produced by this crate.
#[derive(Error, Debug)]
pub enum PffioError {
    /// Native module loading failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Opening the archive failed.
    #[error("unable to open file: {0}")]
    Open(#[from] OpenError),

    /// Closing the archive failed.
    #[error("unable to close file: {0}")]
    Close(#[from] CloseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_reports_cause_and_search_path() {
        let err = LoadError {
            module: "libpff.so".to_string(),
            cause: "cannot open shared object file".to_string(),
            search_path: "LD_LIBRARY_PATH=/opt/libpff/lib".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("libpff.so"));
        assert!(msg.contains("cannot open shared object file"));
        assert!(msg.contains("LD_LIBRARY_PATH"));
    }

    #[test]
    fn native_error_names_the_failing_function() {
        let err = NativeError {
            function: "libpff_file_open",
            message: "unable to read file header".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "libpff_file_open failed: unable to read file header"
        );
    }

    #[test]
    fn open_error_wraps_native_detail() {
        let err = OpenError::from(NativeError {
            function: "libpff_file_open",
            message: "corrupt descriptor index".to_string(),
        });
        assert!(err.to_string().contains("corrupt descriptor index"));
    }

    #[test]
    fn umbrella_error_prefixes_the_failing_operation() {
        let err = PffioError::from(CloseError::NotOpen);
        assert_eq!(err.to_string(), "unable to close file: file is not open");
    }
}
