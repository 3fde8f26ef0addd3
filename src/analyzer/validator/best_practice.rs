//! Best-practice pass: advisory checks over the whole document.

use crate::analyzer::section;
use crate::analyzer::validator::issue::{IssueCode, ValidationIssue};

pub(super) fn run(text: &str, lines: &[&str], issues: &mut Vec<ValidationIssue>) {
    let last_ln = lines.len() as u32;

    if !text.contains("networks:") {
        issues.push(ValidationIssue::at_line(
            IssueCode::MissingNetworksSection,
            last_ln,
        ));
    }

    if !text.contains("volumes:") {
        issues.push(ValidationIssue::at_line(
            IssueCode::MissingVolumesSection,
            last_ln,
        ));
    }

    if text.contains("environment:") && !text.contains("env_file:") {
        let ln = lines
            .iter()
            .position(|raw| raw.trim() == "environment:")
            .map_or(last_ln, |i| (i + 1) as u32);
        issues.push(ValidationIssue::at_line(IssueCode::HardcodedEnv, ln));
    }

    for (i, raw) in lines.iter().enumerate() {
        let trimmed = raw.trim();
        if trimmed.starts_with("image:") && trimmed.contains(":latest") {
            issues.push(ValidationIssue::at_line(
                IssueCode::LatestTag,
                (i + 1) as u32,
            ));
        }
    }

    if let Some(services) = section::find_section(lines, "services") {
        if !text.contains("healthcheck:") {
            issues.push(ValidationIssue::at_line(
                IssueCode::MissingHealthcheck,
                (services + 1) as u32,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_on(text: &str) -> Vec<ValidationIssue> {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut issues = Vec::new();
        run(text, &lines, &mut issues);
        issues
    }

    fn codes(issues: &[ValidationIssue]) -> Vec<&'static str> {
        issues.iter().map(|i| i.code).collect()
    }

    #[test]
    fn test_missing_sections_anchor_to_last_line() {
        let issues = run_on("services:\n  web:\n    image: nginx:1.25\n");
        let missing: Vec<_> = issues
            .iter()
            .filter(|i| i.code == "compose-missing-networks" || i.code == "compose-missing-volumes")
            .collect();
        assert_eq!(missing.len(), 2);
        // The trailing newline yields a final empty line 4.
        assert!(missing.iter().all(|i| i.line == Some(4)));
    }

    #[test]
    fn test_per_service_networks_counts_as_usage() {
        let yaml = "services:\n  web:\n    image: nginx:1.25\n    networks:\n      - front\n";
        let issues = run_on(yaml);
        assert!(!codes(&issues).contains(&"compose-missing-networks"));
    }

    #[test]
    fn test_latest_tag_per_occurrence() {
        let yaml = "services:\n  a:\n    image: nginx:latest\n  b:\n    image: redis:latest\n";
        let issues = run_on(yaml);
        let tags: Vec<_> = issues
            .iter()
            .filter(|i| i.code == "compose-latest-tag")
            .collect();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].line, Some(3));
        assert_eq!(tags[1].line, Some(5));
    }

    #[test]
    fn test_pinned_tag_not_flagged() {
        let issues = run_on("services:\n  a:\n    image: nginx:1.25\n");
        assert!(!codes(&issues).contains(&"compose-latest-tag"));
    }

    #[test]
    fn test_hardcoded_env_suppressed_by_env_file() {
        let with = run_on("services:\n  a:\n    image: x:1\n    environment:\n      - K=v\n");
        assert!(codes(&with).contains(&"compose-hardcoded-env"));

        let without = run_on(
            "services:\n  a:\n    image: x:1\n    env_file: .env\n    environment:\n      - K=v\n",
        );
        assert!(!codes(&without).contains(&"compose-hardcoded-env"));
    }

    #[test]
    fn test_missing_healthcheck_at_services_line() {
        let issues = run_on("services:\n  a:\n    image: x:1\n");
        let hc: Vec<_> = issues
            .iter()
            .filter(|i| i.code == "compose-missing-healthcheck")
            .collect();
        assert_eq!(hc.len(), 1);
        assert_eq!(hc[0].line, Some(1));
    }

    #[test]
    fn test_healthcheck_present() {
        let yaml = "services:\n  a:\n    image: x:1\n    healthcheck:\n      test: [\"CMD\", \"true\"]\n";
        let issues = run_on(yaml);
        assert!(!codes(&issues).contains(&"compose-missing-healthcheck"));
    }
}
