//! Compose document validation.
//!
//! Four independent passes append to one issue list; a final stable sort
//! orders the report by severity priority, then by line. Issues without a
//! line sort last within their severity band.

mod best_practice;
mod issue;
mod structure;
mod syntax;
mod volumes;

pub use issue::{IssueCode, Severity, ValidationIssue, ValidationResult};

use crate::analyzer::split_lines;

/// Validate a Compose document. Total: any input yields a result.
pub fn validate(text: &str) -> ValidationResult {
    let lines = split_lines(text);
    let mut issues = Vec::new();

    syntax::run(&lines, &mut issues);
    structure::run(text, &lines, &mut issues);
    best_practice::run(text, &lines, &mut issues);
    volumes::run(&lines, &mut issues);

    issues.sort_by_key(|issue| (issue.severity.priority(), issue.line.unwrap_or(u32::MAX)));

    log::debug!(
        "validated {} lines: {} issues",
        lines.len(),
        issues.len()
    );
    ValidationResult::from_issues(issues)
}
