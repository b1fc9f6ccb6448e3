//! Managed open/close handle over the libpff native module.
//!
//! `pffio-core` loads libpff (the Personal Folder File parsing engine) into
//! the process at runtime and wraps one native file object behind a handle
//! that enforces the open/use/close protocol: a resource is acquired at most
//! once per handle, is never touched after release, and is released exactly
//! once on every exit path.
//!
//! # Examples
//!
//! ```no_run
//! use pffio_core::AccessMode;
//! use pffio_core::PffFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut file = PffFile::new()?;
//! file.open("archive.pff", AccessMode::ReadOnly)?;
//! file.close()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod access;
pub mod api;
pub mod error;
mod ffi;
pub mod handle;
pub mod module;
pub mod test_utils;

// Re-export main API types
pub use access::AccessMode;
pub use api::open_close;
pub use error::CloseError;
pub use error::LoadError;
pub use error::NativeError;
pub use error::OpenError;
pub use error::PffioError;
pub use error::Result;
pub use handle::ArchiveBackend;
pub use handle::ArchiveHandle;
pub use handle::PffFile;
pub use module::NativeModule;
