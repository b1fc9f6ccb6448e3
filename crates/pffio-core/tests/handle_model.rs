//! Property-based tests for the handle lifecycle contract.
//!
//! Arbitrary open/close sequences are replayed against a two-state model;
//! the recording backend panics on any double release, and every resource
//! acquired during a sequence must be released by the time the handle is
//! dropped.

#![allow(clippy::expect_used)]

use pffio_core::AccessMode;
use pffio_core::ArchiveHandle;
use pffio_core::CloseError;
use pffio_core::OpenError;
use pffio_core::test_utils::RecordingBackend;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Open,
    Close,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Open), Just(Op::Close)]
}

proptest! {
    /// Any sequence of open/close calls keeps the handle state consistent
    /// with a two-state model and never releases a resource twice.
    #[test]
    fn open_close_sequences_follow_the_lifecycle_model(
        ops in prop::collection::vec(op_strategy(), 0..32)
    ) {
        let backend = RecordingBackend::default();
        {
            let mut handle = ArchiveHandle::with_backend(&backend);
            let mut model_open = false;

            for op in &ops {
                match op {
                    Op::Open => {
                        let result = handle.open("archive.pff", AccessMode::ReadOnly);
                        if model_open {
                            prop_assert!(matches!(result, Err(OpenError::AlreadyOpen)));
                        } else {
                            prop_assert!(result.is_ok());
                            model_open = true;
                        }
                    }
                    Op::Close => {
                        let result = handle.close();
                        if model_open {
                            prop_assert!(result.is_ok());
                            model_open = false;
                        } else {
                            prop_assert!(matches!(result, Err(CloseError::NotOpen)));
                        }
                    }
                }
                prop_assert_eq!(handle.is_open(), model_open);
            }
        }
        // After drop, every acquisition has exactly one release.
        prop_assert_eq!(backend.opened(), backend.closed());
        prop_assert_eq!(backend.live(), 0);
    }

    /// Open failures never acquire anything, regardless of where in the
    /// sequence they happen.
    #[test]
    fn failed_opens_acquire_nothing(
        fail_at in 0usize..8,
        attempts in 1usize..8
    ) {
        let backend = RecordingBackend::default();
        {
            let mut handle = ArchiveHandle::with_backend(&backend);
            for attempt in 0..attempts {
                backend.fail_open.set(attempt == fail_at);
                let result = handle.open("archive.pff", AccessMode::ReadOnly);
                if result.is_ok() {
                    handle.close().expect("close after successful open");
                }
                prop_assert!(!handle.is_open());
            }
        }
        prop_assert_eq!(backend.opened(), backend.closed());
        prop_assert_eq!(backend.live(), 0);
    }
}
