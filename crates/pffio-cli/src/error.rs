//! Error conversion utilities for CLI.
//!
//! Converts pffio-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use pffio_core::CloseError;
use pffio_core::LoadError;
use pffio_core::OpenError;
use std::path::Path;

/// Converts a module load failure into a user-facing error with guidance.
pub fn convert_load_error(err: LoadError) -> anyhow::Error {
    anyhow!(
        "{err}\n\
         HINT: Install libpff or add the directory containing it to the library search path."
    )
}

/// Converts an open failure into a user-facing error with guidance.
pub fn convert_open_error(err: OpenError, file: &Path) -> anyhow::Error {
    match err {
        OpenError::InvalidPath { reason } => {
            anyhow!(
                "Unable to open '{}': {reason}\n\
                 HINT: Check that the path is spelled correctly.",
                file.display()
            )
        }
        OpenError::Native(native) => {
            anyhow!(
                "Unable to open '{}': {native}\n\
                 HINT: Check that the file exists and is a PFF file (PST/OST/PAB).",
                file.display()
            )
        }
        other => anyhow!("Unable to open '{}': {other}", file.display()),
    }
}

/// Converts a close failure into a user-facing error.
pub fn convert_close_error(err: CloseError, file: &Path) -> anyhow::Error {
    anyhow!("Unable to close '{}': {err}", file.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pffio_core::NativeError;
    use std::path::PathBuf;

    #[test]
    fn load_error_includes_hint_and_search_path() {
        let err = LoadError {
            module: "libpff.so".to_string(),
            cause: "not found".to_string(),
            search_path: "LD_LIBRARY_PATH is not set".to_string(),
        };
        let msg = format!("{:?}", convert_load_error(err));
        assert!(msg.contains("libpff.so"));
        assert!(msg.contains("LD_LIBRARY_PATH"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn native_open_error_names_file_and_cause() {
        let err = OpenError::from(NativeError {
            function: "libpff_file_open",
            message: "no such file".to_string(),
        });
        let msg = format!("{:?}", convert_open_error(err, Path::new("missing.pff")));
        assert!(msg.contains("missing.pff"));
        assert!(msg.contains("libpff_file_open"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn invalid_path_error_carries_reason() {
        let err = OpenError::InvalidPath {
            reason: "path is empty".to_string(),
        };
        let msg = format!("{:?}", convert_open_error(err, &PathBuf::new()));
        assert!(msg.contains("path is empty"));
    }

    #[test]
    fn close_error_names_the_failing_operation() {
        let msg = format!(
            "{:?}",
            convert_close_error(CloseError::NotOpen, Path::new("archive.pff"))
        );
        assert!(msg.contains("Unable to close"));
        assert!(msg.contains("archive.pff"));
    }
}
