//! The open/use/close lifecycle guard for a single native archive resource.

use std::ffi::CStr;
use std::ffi::CString;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use crate::access::AccessMode;
use crate::error::CloseError;
use crate::error::LoadError;
use crate::error::NativeError;
use crate::error::OpenError;
use crate::module;
use crate::module::NativeModule;

/// Capability surface the handle consumes from the native layer.
///
/// The production implementation lives on `&'static NativeModule`; tests
/// use [`crate::test_utils::RecordingBackend`].
pub trait ArchiveBackend {
    /// Opaque resource produced by a successful open.
    type Resource;

    /// Acquires a resource bound to `path` under `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`NativeError`] when the native layer rejects the open; no
    /// resource is held afterwards.
    fn open_resource(&self, path: &CStr, mode: AccessMode) -> Result<Self::Resource, NativeError>;

    /// Releases a resource.
    ///
    /// Consumes the reference, so a released resource cannot be released
    /// again. The native object is discarded even when release reports an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`NativeError`] when the native release reports failure.
    fn close_resource(&self, resource: Self::Resource) -> Result<(), NativeError>;
}

/// A managed handle over one native archive resource.
///
/// Created closed; `open` transitions it to open, `close` back to closed.
/// A still-open handle releases its resource on drop, so every successful
/// open is paired with exactly one release on all exit paths.
pub struct ArchiveHandle<B: ArchiveBackend> {
    backend: B,
    resource: Option<B::Resource>,
    path: Option<PathBuf>,
    access_mode: Option<AccessMode>,
}

impl<B: ArchiveBackend> ArchiveHandle<B> {
    /// Creates a closed handle over the given backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            resource: None,
            path: None,
            access_mode: None,
        }
    }

    /// Returns `true` while the handle holds an open resource.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.resource.is_some()
    }

    /// The path last used to open this handle.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The access mode last used to open this handle.
    #[must_use]
    pub fn access_mode(&self) -> Option<AccessMode> {
        self.access_mode
    }

    /// Opens the archive file at `path` under `mode`.
    ///
    /// Either the handle ends up open with a valid resource, or it stays
    /// closed with no resource held; no partial acquisition is observable.
    ///
    /// # Errors
    ///
    /// * [`OpenError::AlreadyOpen`]: the handle already holds a resource,
    ///   which is left untouched.
    /// * [`OpenError::InvalidPath`]: the path is empty or cannot cross the
    ///   native boundary; no native call is made.
    /// * [`OpenError::Native`]: the native open failed.
    pub fn open(&mut self, path: impl AsRef<Path>, mode: AccessMode) -> Result<(), OpenError> {
        if self.resource.is_some() {
            return Err(OpenError::AlreadyOpen);
        }
        let path = path.as_ref();
        let native_path = path_to_cstring(path)?;
        let resource = self.backend.open_resource(&native_path, mode)?;
        self.resource = Some(resource);
        self.path = Some(path.to_path_buf());
        self.access_mode = Some(mode);
        Ok(())
    }

    /// Closes the archive file.
    ///
    /// The resource leaves the handle before the native call, so the handle
    /// is closed afterwards even when the native release reports failure; a
    /// failed close can never lead to a second release.
    ///
    /// # Errors
    ///
    /// * [`CloseError::NotOpen`]: the handle holds no resource; no native
    ///   call is made.
    /// * [`CloseError::Native`]: the native release reported failure.
    pub fn close(&mut self) -> Result<(), CloseError> {
        let resource = self.resource.take().ok_or(CloseError::NotOpen)?;
        self.backend.close_resource(resource)?;
        Ok(())
    }
}

impl<B: ArchiveBackend> Drop for ArchiveHandle<B> {
    /// Best-effort release of a still-open resource.
    fn drop(&mut self) {
        if let Some(resource) = self.resource.take() {
            let _ = self.backend.close_resource(resource);
        }
    }
}

impl<B: ArchiveBackend> fmt::Debug for ArchiveHandle<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveHandle")
            .field("state", &if self.is_open() { "open" } else { "closed" })
            .field("path", &self.path)
            .field("access_mode", &self.access_mode)
            .finish_non_exhaustive()
    }
}

/// A handle bound to the process-wide libpff module.
pub type PffFile = ArchiveHandle<&'static NativeModule>;

impl PffFile {
    /// Creates a closed handle, loading the native module on first use.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the native module cannot be linked.
    pub fn new() -> Result<Self, LoadError> {
        Ok(Self::with_backend(module::load()?))
    }
}

fn path_to_cstring(path: &Path) -> Result<CString, OpenError> {
    if path.as_os_str().is_empty() {
        return Err(OpenError::InvalidPath {
            reason: String::from("path is empty"),
        });
    }
    CString::new(path_bytes(path)?).map_err(|_| OpenError::InvalidPath {
        reason: String::from("path contains an interior nul byte"),
    })
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Result<Vec<u8>, OpenError> {
    use std::os::unix::ffi::OsStrExt;

    Ok(path.as_os_str().as_bytes().to_vec())
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Result<Vec<u8>, OpenError> {
    path.to_str()
        .map(|path| path.as_bytes().to_vec())
        .ok_or_else(|| OpenError::InvalidPath {
            reason: String::from("path is not valid UTF-8"),
        })
}
