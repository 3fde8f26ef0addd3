//! Line-oriented Docker Compose analysis.
//!
//! Three stateless entry points over raw document text: [`analyze_overview`]
//! for quick counts, [`analyze_structure`] for the full parsed model, and
//! [`validate`] for diagnostics. None of them fail; malformed input degrades
//! to partial results or issue reports.

pub mod line;
pub mod model;
pub mod overview;
pub mod parser;
pub mod section;
pub mod validator;

pub use model::{
    CommandValue, ComposeOverview, EnvVar, NetworkAttachment, NetworkConfig, ParsedComposeData,
    PortMapping, ServiceConfig, Sysctl, VolumeMapping,
};
pub use validator::{IssueCode, Severity, ValidationIssue, ValidationResult};

/// Split on `'\n'` without dropping a trailing empty line, so diagnostics
/// that anchor to the last line see the same line count an editor shows.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Count services, networks, and top-level volumes.
pub fn analyze_overview(text: &str) -> ComposeOverview {
    overview::count(text)
}

/// Parse the document into its structural model.
pub fn analyze_structure(text: &str) -> ParsedComposeData {
    parser::parse(text)
}

/// Validate the document and return a sorted issue report.
pub fn validate(text: &str) -> ValidationResult {
    validator::validate(text)
}
