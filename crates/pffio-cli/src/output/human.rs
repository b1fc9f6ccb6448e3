//! Human-readable output formatter.

use super::OpenCloseReport;
use super::OutputFormatter;
use anyhow::Result;
use console::style;

pub struct HumanFormatter {
    quiet: bool,
}

impl HumanFormatter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_open_close(&self, report: &OpenCloseReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        println!(
            "{} Opened and closed '{}' ({}, libpff {})",
            style("✓").green(),
            report.path.display(),
            report.access_mode,
            report.library_version
        );
        Ok(())
    }
}
