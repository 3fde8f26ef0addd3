//! Stylish (colored terminal) output formatter.

use colored::Colorize;

use crate::analyzer::Severity;
use crate::formatter::FileReport;

/// Format reports in stylish format (colored terminal output).
pub fn format(reports: &[FileReport]) -> String {
    let mut output = String::new();
    let mut total_errors = 0;
    let mut total_warnings = 0;

    for report in reports {
        if report.result.issues.is_empty() {
            continue;
        }

        output.push_str(&format!("\n{}\n", report.path.underline()));

        for issue in &report.result.issues {
            let severity_str = match issue.severity {
                Severity::Error => "error".red().to_string(),
                Severity::Warning => "warning".yellow().to_string(),
                Severity::Info => "info".cyan().to_string(),
            };
            let line_str = issue
                .line
                .map_or_else(|| "-".to_string(), |l| l.to_string());

            output.push_str(&format!(
                "  {}  {}  {}  {}\n",
                line_str,
                severity_str,
                issue.message,
                issue.code.dimmed()
            ));
        }

        total_errors += report.result.error_count;
        total_warnings += report.result.warning_count;
    }

    if total_errors > 0 || total_warnings > 0 {
        output.push('\n');

        let mut parts = Vec::new();
        if total_errors > 0 {
            parts.push(format!(
                "{} {}",
                total_errors,
                if total_errors == 1 { "error" } else { "errors" }
            ));
        }
        if total_warnings > 0 {
            parts.push(format!(
                "{} {}",
                total_warnings,
                if total_warnings == 1 {
                    "warning"
                } else {
                    "warnings"
                }
            ));
        }

        output.push_str(&format!(
            "  {} problem{}\n",
            parts.join(" and "),
            if total_errors + total_warnings == 1 {
                ""
            } else {
                "s"
            }
        ));
    }

    output
}
