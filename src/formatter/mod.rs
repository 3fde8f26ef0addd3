//! Output formatters for validation reports.
//!
//! - Stylish: colored terminal output (default)
//! - JSON: machine-readable output
//! - GitHub: GitHub Actions annotations

pub mod github;
pub mod json;
pub mod stylish;

use crate::analyzer::ValidationResult;

/// One validated file with its report.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: String,
    pub result: ValidationResult,
}

impl FileReport {
    pub fn new(path: impl Into<String>, result: ValidationResult) -> Self {
        Self {
            path: path.into(),
            result,
        }
    }
}

/// Output format for validation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Stylish colored terminal output (default)
    #[default]
    Stylish,
    /// JSON format for machine processing
    Json,
    /// GitHub Actions annotations
    GitHub,
}

impl OutputFormat {
    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stylish" => Some(Self::Stylish),
            "json" => Some(Self::Json),
            "github" | "github-actions" => Some(Self::GitHub),
            _ => None,
        }
    }
}

/// Format reports according to the specified format.
pub fn format_reports(reports: &[FileReport], format: OutputFormat) -> String {
    match format {
        OutputFormat::Stylish => stylish::format(reports),
        OutputFormat::Json => json::format(reports),
        OutputFormat::GitHub => github::format(reports),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("stylish"), Some(OutputFormat::Stylish));
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("github"), Some(OutputFormat::GitHub));
        assert_eq!(
            OutputFormat::parse("github-actions"),
            Some(OutputFormat::GitHub)
        );
        assert_eq!(OutputFormat::parse("junit"), None);
    }
}
