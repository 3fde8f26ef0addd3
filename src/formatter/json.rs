//! JSON output formatter.

use serde_json::json;

use crate::analyzer::Severity;
use crate::formatter::FileReport;

/// Format reports as JSON.
pub fn format(reports: &[FileReport]) -> String {
    let output: Vec<serde_json::Value> = reports
        .iter()
        .map(|report| {
            let issues: Vec<serde_json::Value> = report
                .result
                .issues
                .iter()
                .map(|issue| {
                    json!({
                        "code": issue.code,
                        "severity": match issue.severity {
                            Severity::Error => 2,
                            Severity::Warning => 1,
                            Severity::Info => 0,
                        },
                        "severityName": issue.severity.as_str(),
                        "message": issue.message,
                        "line": issue.line,
                        "column": issue.column,
                        "endLine": issue.end_line,
                        "endColumn": issue.end_column,
                    })
                })
                .collect();

            json!({
                "filePath": report.path,
                "isValid": report.result.is_valid,
                "errorCount": report.result.error_count,
                "warningCount": report.result.warning_count,
                "infoCount": report.result.info_count,
                "issues": issues,
            })
        })
        .collect();

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "[]".to_string())
}
