//! Top-level convenience API.

use std::path::Path;

use crate::access::AccessMode;
use crate::error::PffioError;
use crate::handle::PffFile;

/// Opens and immediately closes the archive file at `path`.
///
/// Loads the native module on first use. Useful to verify that a file is an
/// archive the native module accepts without keeping a handle around.
///
/// # Examples
///
/// ```no_run
/// use pffio_core::AccessMode;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// pffio_core::open_close("archive.pff", AccessMode::ReadOnly)?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`PffioError`] when the module cannot be loaded or either the
/// open or the close fails.
pub fn open_close(path: impl AsRef<Path>, mode: AccessMode) -> Result<(), PffioError> {
    let mut file = PffFile::new()?;
    file.open(path, mode)?;
    file.close()?;
    Ok(())
}
