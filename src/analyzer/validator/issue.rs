//! Diagnostic types for the validator.
//!
//! Every check is a variant of the closed [`IssueCode`] enum, which carries
//! the data its message needs. Severity, the stable machine-readable code
//! string, and the human message all derive from the variant, so adding a
//! check is a compile-time-exhaustive change.

use std::fmt;

/// Severity of a diagnostic, ordered by priority:
/// `Error (0) < Warning (1) < Info (2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Structurally invalid or violates a hard Compose requirement.
    Error,
    /// Works but is risky or non-idiomatic.
    Warning,
    /// Stylistic or best-practice suggestion.
    Info,
}

impl Severity {
    /// Sort priority; lower sorts first.
    pub fn priority(self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warning => 1,
            Self::Info => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every check the validator can report, with its message data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueCode {
    // Syntax pass
    NoTabs,
    MixedIndent,
    Indentation,
    UnbalancedQuotes,
    ColonSpacing { key: String },
    MissingColon,
    MergedSections,
    ListItemSyntax,
    DuplicateKey { key: String },

    // Structure pass
    MissingServices,
    EmptyServices,
    MisplacedSection { section: &'static str },
    MisplacedVolumes,
    MissingImageBuild { service: String },
    EmptyImage { service: String },
    InvalidImageFormat { service: String },
    DoubleColonImage { service: String },
    MissingRestart { service: String },
    MissingVolumes { service: String },
    VolumeCommaSyntax { service: String, entry: String },
    VolumeLeadingColon { service: String, entry: String },
    VolumeTrailingColon { service: String, entry: String },
    VolumeTooManyColons { service: String, entry: String },
    VolumeEmptySegment { service: String, entry: String },
    VolumeRelativeContainerPath { service: String, container: String },
    VolumeRelativePath { service: String, entry: String },
    ExposedNoPorts { service: String },
    ManyEnvVars { service: String },
    PrivilegedMode { service: String },
    HostNetwork { service: String },
    DuplicatePort { service: String, port: u32 },
    CommonPort { service: String, port: u32, known_as: &'static str },

    // Best-practice pass
    MissingNetworksSection,
    MissingVolumesSection,
    HardcodedEnv,
    LatestTag,
    MissingHealthcheck,

    // Volume cross-reference pass
    UnusedVolume { volume: String },
    UndefinedVolume { volume: String },
    EmptyServiceVolumes { service: String },
}

impl IssueCode {
    /// Stable machine-readable identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoTabs => "yaml-no-tabs",
            Self::MixedIndent => "yaml-mixed-indent",
            Self::Indentation => "yaml-indentation",
            Self::UnbalancedQuotes => "yaml-unbalanced-quotes",
            Self::ColonSpacing { .. } => "yaml-colon-spacing",
            Self::MissingColon => "yaml-missing-colon",
            Self::MergedSections => "yaml-merged-sections",
            Self::ListItemSyntax => "yaml-list-item-syntax",
            Self::DuplicateKey { .. } => "yaml-duplicate-key",
            Self::MissingServices => "compose-missing-services",
            Self::EmptyServices => "compose-empty-services",
            Self::MisplacedSection { .. } => "compose-misplaced-section",
            Self::MisplacedVolumes => "compose-misplaced-volumes",
            Self::MissingImageBuild { .. } => "service-missing-image-build",
            Self::EmptyImage { .. } => "service-empty-image",
            Self::InvalidImageFormat { .. } => "service-invalid-image-format",
            Self::DoubleColonImage { .. } => "service-double-colon-image",
            Self::MissingRestart { .. } => "service-missing-restart",
            Self::MissingVolumes { .. } => "service-missing-volumes",
            Self::VolumeCommaSyntax { .. } => "volume-comma-syntax",
            Self::VolumeLeadingColon { .. } => "volume-leading-colon",
            Self::VolumeTrailingColon { .. } => "volume-trailing-colon",
            Self::VolumeTooManyColons { .. } => "volume-too-many-colons",
            Self::VolumeEmptySegment { .. } => "volume-empty-segment",
            Self::VolumeRelativeContainerPath { .. } => "volume-relative-container-path",
            Self::VolumeRelativePath { .. } => "volume-relative-path",
            Self::ExposedNoPorts { .. } => "service-exposed-no-ports",
            Self::ManyEnvVars { .. } => "service-many-env-vars",
            Self::PrivilegedMode { .. } => "service-privileged-mode",
            Self::HostNetwork { .. } => "service-host-network",
            Self::DuplicatePort { .. } => "service-duplicate-port",
            Self::CommonPort { .. } => "service-common-port",
            Self::MissingNetworksSection => "compose-missing-networks",
            Self::MissingVolumesSection => "compose-missing-volumes",
            Self::HardcodedEnv => "compose-hardcoded-env",
            Self::LatestTag => "compose-latest-tag",
            Self::MissingHealthcheck => "compose-missing-healthcheck",
            Self::UnusedVolume { .. } => "compose-unused-volume",
            Self::UndefinedVolume { .. } => "compose-undefined-volume",
            Self::EmptyServiceVolumes { .. } => "service-empty-volumes",
        }
    }

    /// Default severity of the check.
    pub fn severity(&self) -> Severity {
        match self {
            Self::NoTabs
            | Self::MixedIndent
            | Self::UnbalancedQuotes
            | Self::ColonSpacing { .. }
            | Self::MissingColon
            | Self::MergedSections
            | Self::ListItemSyntax
            | Self::DuplicateKey { .. }
            | Self::MissingServices
            | Self::EmptyServices
            | Self::MisplacedSection { .. }
            | Self::MisplacedVolumes
            | Self::MissingImageBuild { .. }
            | Self::EmptyImage { .. }
            | Self::InvalidImageFormat { .. }
            | Self::DoubleColonImage { .. }
            | Self::VolumeCommaSyntax { .. }
            | Self::VolumeLeadingColon { .. }
            | Self::VolumeTrailingColon { .. }
            | Self::VolumeTooManyColons { .. }
            | Self::VolumeEmptySegment { .. }
            | Self::VolumeRelativePath { .. }
            | Self::DuplicatePort { .. }
            | Self::UndefinedVolume { .. } => Severity::Error,

            Self::Indentation
            | Self::VolumeRelativeContainerPath { .. }
            | Self::ExposedNoPorts { .. }
            | Self::PrivilegedMode { .. }
            | Self::HostNetwork { .. }
            | Self::LatestTag
            | Self::UnusedVolume { .. }
            | Self::EmptyServiceVolumes { .. } => Severity::Warning,

            Self::MissingRestart { .. }
            | Self::MissingVolumes { .. }
            | Self::ManyEnvVars { .. }
            | Self::CommonPort { .. }
            | Self::MissingNetworksSection
            | Self::MissingVolumesSection
            | Self::HardcodedEnv
            | Self::MissingHealthcheck => Severity::Info,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        match self {
            Self::NoTabs => {
                "YAML does not allow tabs for indentation. Use spaces instead.".to_string()
            }
            Self::MixedIndent => {
                "Mixed spaces and tabs in indentation. Use spaces only.".to_string()
            }
            Self::Indentation => {
                "Inconsistent indentation. Docker Compose typically uses 2-space indentation."
                    .to_string()
            }
            Self::UnbalancedQuotes => "Unbalanced quotes on this line".to_string(),
            Self::ColonSpacing { key } => {
                format!("Missing space after colon for key \"{key}\"")
            }
            Self::MissingColon => "Missing colon after key".to_string(),
            Self::MergedSections => {
                "Multiple top-level sections on one line. Each section must start on its own line."
                    .to_string()
            }
            Self::ListItemSyntax => "List item dash must be followed by a space".to_string(),
            Self::DuplicateKey { key } => format!("Duplicate key \"{key}\" found"),
            Self::MissingServices => "Missing required 'services:' section".to_string(),
            Self::EmptyServices => {
                "Services section is empty. At least one service is required.".to_string()
            }
            Self::MisplacedSection { section } => {
                format!("'{section}:' section must be at the top level, not indented")
            }
            Self::MisplacedVolumes => {
                "Volume definitions must live in the top-level 'volumes:' section".to_string()
            }
            Self::MissingImageBuild { service } => {
                format!("Service \"{service}\" must have either \"image\" or \"build\" specified")
            }
            Self::EmptyImage { service } => format!("Service \"{service}\" has empty image name"),
            Self::InvalidImageFormat { service } => {
                format!("Service \"{service}\" has invalid image format: trailing colon without tag")
            }
            Self::DoubleColonImage { service } => {
                format!("Service \"{service}\" has invalid image format: double colon")
            }
            Self::MissingRestart { service } => format!(
                "Service \"{service}\" has no restart policy. Consider adding \"restart: unless-stopped\" for production"
            ),
            Self::MissingVolumes { service } => format!(
                "Service \"{service}\" has no volume mappings. Did you forget to add persistent storage?"
            ),
            Self::VolumeCommaSyntax { service, entry } => format!(
                "Service \"{service}\" has malformed volume mapping \"{entry}\": commas are not valid here"
            ),
            Self::VolumeLeadingColon { service, entry } => format!(
                "Service \"{service}\" has malformed volume mapping \"{entry}\": leading colon"
            ),
            Self::VolumeTrailingColon { service, entry } => format!(
                "Service \"{service}\" has malformed volume mapping \"{entry}\": dangling colon"
            ),
            Self::VolumeTooManyColons { service, entry } => format!(
                "Service \"{service}\" has malformed volume mapping \"{entry}\": too many colon-separated parts"
            ),
            Self::VolumeEmptySegment { service, entry } => format!(
                "Service \"{service}\" has malformed volume mapping \"{entry}\": empty host or container path"
            ),
            Self::VolumeRelativeContainerPath { service, container } => format!(
                "Service \"{service}\" mounts to relative container path \"{container}\". Container paths should be absolute"
            ),
            Self::VolumeRelativePath { service, entry } => format!(
                "Service \"{service}\" has volume entry \"{entry}\": a bare relative path needs a container mapping"
            ),
            Self::ExposedNoPorts { service } => format!(
                "Service \"{service}\" exposes ports but has no port mappings. Ports won't be accessible from host"
            ),
            Self::ManyEnvVars { service } => format!(
                "Service \"{service}\" has many environment variables. Consider using env_file for better organization"
            ),
            Self::PrivilegedMode { service } => format!(
                "Service \"{service}\" runs in privileged mode. This may be a security risk"
            ),
            Self::HostNetwork { service } => format!(
                "Service \"{service}\" uses host networking. This bypasses Docker's network isolation"
            ),
            Self::DuplicatePort { service, port } => {
                format!("Service \"{service}\" has duplicate host port {port}")
            }
            Self::CommonPort {
                service,
                port,
                known_as,
            } => format!(
                "Service \"{service}\" uses port {port} ({known_as}). Ensure this doesn't conflict with existing services"
            ),
            Self::MissingNetworksSection => {
                "No custom networks defined. Consider using custom networks for better service isolation"
                    .to_string()
            }
            Self::MissingVolumesSection => {
                "No named volumes defined. Consider using named volumes for persistent data"
                    .to_string()
            }
            Self::HardcodedEnv => {
                "Consider using .env files for environment variables instead of hardcoding them"
                    .to_string()
            }
            Self::LatestTag => {
                "Using 'latest' tag is not recommended for production. Use specific version tags"
                    .to_string()
            }
            Self::MissingHealthcheck => {
                "No health checks defined. Consider adding health checks for better reliability"
                    .to_string()
            }
            Self::UnusedVolume { volume } => {
                format!("Volume \"{volume}\" is defined but never used by any service")
            }
            Self::UndefinedVolume { volume } => {
                format!("Volume \"{volume}\" is referenced but not defined in the top-level 'volumes:' section")
            }
            Self::EmptyServiceVolumes { service } => {
                format!("Service \"{service}\" has an empty volumes block")
            }
        }
    }
}

/// One validator finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Severity classification.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// 1-based source line, when the check can determine one.
    pub line: Option<u32>,
    /// Stable machine-readable identifier.
    pub code: &'static str,
    /// Reserved for range-based reporting.
    pub end_line: Option<u32>,
    /// Reserved for range-based reporting.
    pub column: Option<u32>,
    /// Reserved for range-based reporting.
    pub end_column: Option<u32>,
}

impl ValidationIssue {
    /// Materialize an issue from its check variant.
    pub fn new(code: IssueCode, line: Option<u32>) -> Self {
        Self {
            severity: code.severity(),
            message: code.message(),
            line,
            code: code.as_str(),
            end_line: None,
            column: None,
            end_column: None,
        }
    }

    /// Issue pinned to a 1-based line.
    pub fn at_line(code: IssueCode, line: u32) -> Self {
        Self::new(code, Some(line))
    }
}

/// Result of validating one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// True iff no issue has error severity.
    pub is_valid: bool,
    pub has_errors: bool,
    pub has_warnings: bool,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    /// Sorted by `(priority, line)`; issues without a line sort last within
    /// their priority band.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Assemble a result from an already-sorted issue list.
    pub(crate) fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let error_count = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count();
        let warning_count = issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count();
        let info_count = issues
            .iter()
            .filter(|i| i.severity == Severity::Info)
            .count();

        Self {
            is_valid: error_count == 0,
            has_errors: error_count > 0,
            has_warnings: warning_count > 0,
            error_count,
            warning_count,
            info_count,
            issues,
        }
    }

    /// Iterator over the stable code strings, in report order.
    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.issues.iter().map(|i| i.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_priority_order() {
        assert!(Severity::Error.priority() < Severity::Warning.priority());
        assert!(Severity::Warning.priority() < Severity::Info.priority());
    }

    #[test]
    fn test_issue_derives_from_code() {
        let issue = ValidationIssue::at_line(
            IssueCode::DuplicateKey { key: "web".into() },
            7,
        );
        assert_eq!(issue.code, "yaml-duplicate-key");
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.line, Some(7));
        assert!(issue.message.contains("web"));
    }

    #[test]
    fn test_result_counts_and_validity() {
        let issues = vec![
            ValidationIssue::at_line(IssueCode::MissingServices, 1),
            ValidationIssue::at_line(IssueCode::LatestTag, 3),
            ValidationIssue::at_line(IssueCode::MissingHealthcheck, 1),
        ];
        let result = ValidationResult::from_issues(issues);
        assert!(!result.is_valid);
        assert!(result.has_errors);
        assert!(result.has_warnings);
        assert_eq!(result.error_count, 1);
        assert_eq!(result.warning_count, 1);
        assert_eq!(result.info_count, 1);
    }

    #[test]
    fn test_valid_when_only_advisory() {
        let issues = vec![ValidationIssue::at_line(IssueCode::MissingHealthcheck, 1)];
        let result = ValidationResult::from_issues(issues);
        assert!(result.is_valid);
        assert!(!result.has_errors);
    }
}
