//! JSON output formatter for machine-readable results.

use super::OpenCloseReport;
use super::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    operation: &'static str,
    status: &'static str,
    data: OpenCloseData<'a>,
}

#[derive(Serialize)]
struct OpenCloseData<'a> {
    path: String,
    access_mode: String,
    libpff_version: &'a str,
}

fn render(report: &OpenCloseReport) -> Result<String> {
    let output = JsonOutput {
        operation: "open-close",
        status: "success",
        data: OpenCloseData {
            path: report.path.display().to_string(),
            access_mode: report.access_mode.to_string(),
            libpff_version: &report.library_version,
        },
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

impl OutputFormatter for JsonFormatter {
    fn format_open_close(&self, report: &OpenCloseReport) -> Result<()> {
        writeln!(io::stdout(), "{}", render(report)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use pffio_core::AccessMode;
    use std::path::PathBuf;

    #[test]
    fn render_emits_the_result_envelope() {
        let report = OpenCloseReport {
            path: PathBuf::from("archive.pff"),
            access_mode: AccessMode::ReadOnly,
            library_version: "20231008".to_string(),
        };
        let rendered = render(&report).expect("render");
        let json: serde_json::Value = serde_json::from_str(&rendered).expect("valid JSON");

        assert_eq!(json["operation"], "open-close");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["path"], "archive.pff");
        assert_eq!(json["data"]["access_mode"], "read-only");
        assert_eq!(json["data"]["libpff_version"], "20231008");
    }
}
