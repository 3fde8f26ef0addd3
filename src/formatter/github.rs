//! GitHub Actions output formatter.
//!
//! Produces output in GitHub Actions workflow command format:
//! ::error file={name},line={line},title={code}::{message}

use crate::analyzer::Severity;
use crate::formatter::FileReport;

/// Format reports for GitHub Actions.
pub fn format(reports: &[FileReport]) -> String {
    let mut output = String::new();

    for report in reports {
        for issue in &report.result.issues {
            let level = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Info => "notice",
            };

            let location = match issue.line {
                Some(line) => format!("file={},line={}", report.path, line),
                None => format!("file={}", report.path),
            };

            output.push_str(&format!(
                "::{} {},title={}::{}\n",
                level,
                location,
                issue.code,
                escape_github(&issue.message)
            ));
        }
    }

    output
}

/// Escape special characters for GitHub Actions.
fn escape_github(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
