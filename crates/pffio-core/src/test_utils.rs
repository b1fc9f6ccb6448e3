//! Test utilities for exercising the handle lifecycle without libpff.
//!
//! [`RecordingBackend`] stands in for the native module: it hands out
//! numbered resources, counts acquisitions and releases, and panics on a
//! double release, which turns the central resource-safety contract into a
//! checkable test property.
//!
//! # Panics
//!
//! Functions in this module may panic on contract violations since they are
//! designed for test use only.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::cell::Cell;
use std::cell::RefCell;
use std::ffi::CStr;

use crate::access::AccessMode;
use crate::error::NativeError;
use crate::handle::ArchiveBackend;

/// Fake [`ArchiveBackend`] that records every acquisition and release.
///
/// Implemented on `&RecordingBackend` so a test keeps access to the counters
/// while a handle borrows the backend:
///
/// ```
/// use pffio_core::AccessMode;
/// use pffio_core::ArchiveHandle;
/// use pffio_core::test_utils::RecordingBackend;
///
/// let backend = RecordingBackend::default();
/// let mut handle = ArchiveHandle::with_backend(&backend);
/// handle.open("archive.pff", AccessMode::ReadOnly).unwrap();
/// handle.close().unwrap();
/// assert_eq!(backend.opened(), backend.closed());
/// ```
#[derive(Debug, Default)]
pub struct RecordingBackend {
    /// When set, the next `open_resource` call fails.
    pub fail_open: Cell<bool>,

    /// When set, `close_resource` reports failure after discarding the
    /// resource, mirroring the native close-then-free behavior.
    pub fail_close: Cell<bool>,

    opened: Cell<usize>,
    closed: Cell<usize>,
    next_token: Cell<u32>,
    live: RefCell<Vec<u32>>,
}

impl RecordingBackend {
    /// Number of successful acquisitions.
    #[must_use]
    pub fn opened(&self) -> usize {
        self.opened.get()
    }

    /// Number of releases, successful or failed.
    #[must_use]
    pub fn closed(&self) -> usize {
        self.closed.get()
    }

    /// Number of resources currently held open.
    #[must_use]
    pub fn live(&self) -> usize {
        self.live.borrow().len()
    }
}

impl ArchiveBackend for &RecordingBackend {
    type Resource = u32;

    fn open_resource(&self, _path: &CStr, _mode: AccessMode) -> Result<u32, NativeError> {
        if self.fail_open.get() {
            return Err(NativeError {
                function: "libpff_file_open",
                message: String::from("simulated open failure"),
            });
        }
        let token = self.next_token.get();
        self.next_token.set(token + 1);
        self.live.borrow_mut().push(token);
        self.opened.set(self.opened.get() + 1);
        Ok(token)
    }

    fn close_resource(&self, resource: u32) -> Result<(), NativeError> {
        let mut live = self.live.borrow_mut();
        let position = live
            .iter()
            .position(|token| *token == resource)
            .expect("release of a resource that is not open (double release)");
        live.remove(position);
        self.closed.set(self.closed.get() + 1);
        if self.fail_close.get() {
            return Err(NativeError {
                function: "libpff_file_close",
                message: String::from("simulated close failure"),
            });
        }
        Ok(())
    }
}
