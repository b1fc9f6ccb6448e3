//! Output formatting module.

mod human;
mod json;

use anyhow::Result;
use pffio_core::AccessMode;
use std::path::PathBuf;

use human::HumanFormatter;
use json::JsonFormatter;

/// Result of a successful open/close round trip.
pub struct OpenCloseReport {
    /// The archive file that was opened and closed.
    pub path: PathBuf,

    /// The access mode the file was opened under.
    pub access_mode: AccessMode,

    /// Version string reported by the native module.
    pub library_version: String,
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format a successful open/close result
    fn format_open_close(&self, report: &OpenCloseReport) -> Result<()>;
}

/// Creates an output formatter based on CLI flags
pub fn create_formatter(json: bool, quiet: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter::new(quiet))
    }
}
