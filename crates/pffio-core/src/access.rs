//! Access modes supported when opening an archive file.

use std::fmt;

use crate::error::OpenError;
use crate::ffi;

/// How an archive file is opened.
///
/// Replaces the raw access-flag integer of the native API with a closed
/// enumeration; callers holding a raw flag value go through
/// [`AccessMode::from_flags`], which rejects unsupported combinations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessMode {
    /// Open for reading only.
    #[default]
    ReadOnly,

    /// Open for reading and writing.
    ReadWrite,
}

impl AccessMode {
    /// Validates a raw access-flag value.
    ///
    /// # Errors
    ///
    /// Returns [`OpenError::InvalidAccessMode`] for any value that is not
    /// one of the supported flag combinations.
    pub fn from_flags(flags: i32) -> Result<Self, OpenError> {
        match flags {
            f if f == ffi::ACCESS_FLAG_READ => Ok(Self::ReadOnly),
            f if f == ffi::ACCESS_FLAG_READ | ffi::ACCESS_FLAG_WRITE => Ok(Self::ReadWrite),
            _ => Err(OpenError::InvalidAccessMode { flags }),
        }
    }

    /// The native access-flag representation of this mode.
    pub(crate) fn as_flags(self) -> i32 {
        match self {
            Self::ReadOnly => ffi::ACCESS_FLAG_READ,
            Self::ReadWrite => ffi::ACCESS_FLAG_READ | ffi::ACCESS_FLAG_WRITE,
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly => write!(f, "read-only"),
            Self::ReadWrite => write!(f, "read-write"),
        }
    }
}
