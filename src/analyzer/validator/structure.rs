//! Structure pass: Compose-level requirements for the services section.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyzer::line::{self, LineRole};
use crate::analyzer::parser::{LIST_ITEM, service_body_end};
use crate::analyzer::section::{self, SERVICE_HEADER};
use crate::analyzer::validator::issue::{IssueCode, ValidationIssue};

/// A `- "8080:80"` style port mapping item.
static PORT_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*-\s*["']?(\d+):(\d+)"#).expect("valid regex"));

/// A `- KEY=value` environment item.
static ENV_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*-\s+\w+=").expect("valid regex"));

/// Keys that mark an indented `volumes:` block as a definition block
/// rather than a per-service mount list.
const VOLUME_DEFINITION_KEYS: [&str; 4] = ["driver:", "external:", "driver_opts:", "labels:"];

/// Well-known host ports worth calling out.
const COMMON_PORTS: [(u32, &str); 7] = [
    (22, "SSH"),
    (80, "HTTP"),
    (443, "HTTPS"),
    (3306, "MySQL"),
    (5432, "PostgreSQL"),
    (6379, "Redis"),
    (27017, "MongoDB"),
];

pub(super) fn run(text: &str, lines: &[&str], issues: &mut Vec<ValidationIssue>) {
    if !text.contains("services:") {
        issues.push(ValidationIssue::at_line(IssueCode::MissingServices, 1));
        return;
    }

    check_misplaced_sections(lines, issues);

    let Some(start) = section::find_section(lines, "services") else {
        // `services:` only appears indented or inside other text; the
        // misplaced-section check has already reported it.
        return;
    };

    let mut service_count = 0;
    for i in start + 1..lines.len() {
        if section::is_top_level(lines[i]) {
            break;
        }
        if SERVICE_HEADER.is_match(lines[i]) {
            service_count += 1;
            let name = lines[i].trim().trim_end_matches(':');
            validate_service(name, i, lines, issues);
        }
    }

    if service_count == 0 {
        issues.push(ValidationIssue::at_line(
            IssueCode::EmptyServices,
            (start + 1) as u32,
        ));
    }
}

/// An indented `services:` is always wrong. An indented `networks:` is only
/// wrong outside the services section (inside a service it is an attachment
/// list). An indented `volumes:` is only wrong when its children look like
/// volume definitions rather than mounts.
fn check_misplaced_sections(lines: &[&str], issues: &mut Vec<ValidationIssue>) {
    let services_range = section::find_section(lines, "services")
        .map(|start| (start, section::section_end(lines, start)));

    for (i, raw) in lines.iter().enumerate() {
        let info = line::classify(raw);
        if info.indent == 0 {
            continue;
        }
        let ln = (i + 1) as u32;

        match info.trimmed {
            "services:" => issues.push(ValidationIssue::at_line(
                IssueCode::MisplacedSection {
                    section: "services",
                },
                ln,
            )),
            "networks:" => {
                let inside_services =
                    services_range.is_some_and(|(start, end)| i > start && i < end);
                if !inside_services {
                    issues.push(ValidationIssue::at_line(
                        IssueCode::MisplacedSection {
                            section: "networks",
                        },
                        ln,
                    ));
                }
            }
            "volumes:" => {
                if block_defines_volumes(lines, i, info.indent) {
                    issues.push(ValidationIssue::at_line(IssueCode::MisplacedVolumes, ln));
                }
            }
            _ => {}
        }
    }
}

fn block_defines_volumes(lines: &[&str], header: usize, header_indent: usize) -> bool {
    for raw in &lines[header + 1..] {
        let info = line::classify(raw);
        if info.role != LineRole::Blank && info.indent <= header_indent {
            return false;
        }
        if VOLUME_DEFINITION_KEYS
            .iter()
            .any(|key| info.trimmed.starts_with(key))
        {
            return true;
        }
    }
    false
}

fn validate_service(
    name: &str,
    header_idx: usize,
    lines: &[&str],
    issues: &mut Vec<ValidationIssue>,
) {
    let end = service_body_end(lines, header_idx);
    let body = &lines[header_idx..end];
    let header_ln = (header_idx + 1) as u32;

    let contains = |needle: &str| body.iter().any(|raw| raw.contains(needle));

    // One of image/build is mandatory.
    let has_image = contains("image:");
    if !has_image && !contains("build:") {
        issues.push(ValidationIssue::at_line(
            IssueCode::MissingImageBuild {
                service: name.to_string(),
            },
            header_ln,
        ));
    }

    if has_image {
        check_image_format(name, header_idx, body, issues);
    }

    if !contains("restart:") {
        issues.push(ValidationIssue::at_line(
            IssueCode::MissingRestart {
                service: name.to_string(),
            },
            header_ln,
        ));
    }

    if contains("volumes:") {
        check_volume_mounts(name, header_idx, body, issues);
    } else {
        issues.push(ValidationIssue::at_line(
            IssueCode::MissingVolumes {
                service: name.to_string(),
            },
            header_ln,
        ));
    }

    if contains("expose:") && !contains("ports:") {
        issues.push(ValidationIssue::at_line(
            IssueCode::ExposedNoPorts {
                service: name.to_string(),
            },
            header_ln,
        ));
    }

    let env_count = body.iter().filter(|raw| ENV_ITEM.is_match(raw)).count();
    if env_count > 5 && !contains("env_file:") {
        let ln = find_in_body(body, |t| t == "environment:")
            .map_or(header_ln, |p| (header_idx + p + 1) as u32);
        issues.push(ValidationIssue::at_line(
            IssueCode::ManyEnvVars {
                service: name.to_string(),
            },
            ln,
        ));
    }

    if contains("privileged: true") {
        let ln = find_in_body(body, |t| t.starts_with("privileged:"))
            .map_or(header_ln, |p| (header_idx + p + 1) as u32);
        issues.push(ValidationIssue::at_line(
            IssueCode::PrivilegedMode {
                service: name.to_string(),
            },
            ln,
        ));
    }

    if contains("network_mode: host") {
        let ln = find_in_body(body, |t| t.starts_with("network_mode:"))
            .map_or(header_ln, |p| (header_idx + p + 1) as u32);
        issues.push(ValidationIssue::at_line(
            IssueCode::HostNetwork {
                service: name.to_string(),
            },
            ln,
        ));
    }

    check_ports(name, header_idx, body, issues);
}

fn find_in_body(body: &[&str], pred: impl Fn(&str) -> bool) -> Option<usize> {
    body.iter().position(|raw| pred(raw.trim()))
}

fn check_image_format(
    name: &str,
    header_idx: usize,
    body: &[&str],
    issues: &mut Vec<ValidationIssue>,
) {
    let Some(pos) = find_in_body(body, |t| t.starts_with("image:")) else {
        return;
    };
    let ln = (header_idx + pos + 1) as u32;
    let value = body[pos].trim()["image:".len()..].trim();

    if value.ends_with(':') && value.len() > 1 {
        issues.push(ValidationIssue::at_line(
            IssueCode::InvalidImageFormat {
                service: name.to_string(),
            },
            ln,
        ));
    } else if value.is_empty() {
        issues.push(ValidationIssue::at_line(
            IssueCode::EmptyImage {
                service: name.to_string(),
            },
            ln,
        ));
    } else if value.contains("::") {
        issues.push(ValidationIssue::at_line(
            IssueCode::DoubleColonImage {
                service: name.to_string(),
            },
            ln,
        ));
    }
}

/// Line-by-line mapping-syntax validation of a per-service `volumes:` list.
/// Checks run most-specific-first so one entry yields one diagnostic.
fn check_volume_mounts(
    name: &str,
    header_idx: usize,
    body: &[&str],
    issues: &mut Vec<ValidationIssue>,
) {
    let Some(start) = find_in_body(body, |t| t.starts_with("volumes:")) else {
        return;
    };

    for (k, raw) in body.iter().enumerate().skip(start + 1) {
        let info = line::classify(raw);
        if info.role == LineRole::MappingKey {
            break;
        }
        if !LIST_ITEM.is_match(raw) {
            continue;
        }

        let entry = crate::analyzer::parser::clean_volume_entry(info.trimmed);
        let ln = (header_idx + k + 1) as u32;
        let service = name.to_string();

        if entry.contains(',') {
            issues.push(ValidationIssue::at_line(
                IssueCode::VolumeCommaSyntax { service, entry },
                ln,
            ));
            continue;
        }
        if entry.starts_with(':') {
            issues.push(ValidationIssue::at_line(
                IssueCode::VolumeLeadingColon { service, entry },
                ln,
            ));
            continue;
        }
        if entry.ends_with(':') {
            issues.push(ValidationIssue::at_line(
                IssueCode::VolumeTrailingColon { service, entry },
                ln,
            ));
            continue;
        }

        let parts: Vec<&str> = entry.split(':').collect();
        if parts.len() > 3 {
            issues.push(ValidationIssue::at_line(
                IssueCode::VolumeTooManyColons { service, entry },
                ln,
            ));
            continue;
        }
        if parts.len() >= 2 && (parts[0].is_empty() || parts[1].is_empty()) {
            issues.push(ValidationIssue::at_line(
                IssueCode::VolumeEmptySegment { service, entry },
                ln,
            ));
            continue;
        }
        if parts.len() >= 2 && !parts[1].starts_with('/') {
            issues.push(ValidationIssue::at_line(
                IssueCode::VolumeRelativeContainerPath {
                    service,
                    container: parts[1].to_string(),
                },
                ln,
            ));
            continue;
        }
        if parts.len() == 1 && !entry.is_empty() && !entry.starts_with('/') {
            issues.push(ValidationIssue::at_line(
                IssueCode::VolumeRelativePath { service, entry },
                ln,
            ));
        }
    }
}

fn check_ports(name: &str, header_idx: usize, body: &[&str], issues: &mut Vec<ValidationIssue>) {
    let ports_ln = find_in_body(body, |t| t == "ports:")
        .map_or((header_idx + 1) as u32, |p| (header_idx + p + 1) as u32);

    let mut seen = Vec::new();
    for raw in body {
        let Some(caps) = PORT_ITEM.captures(raw) else {
            continue;
        };
        let Ok(host_port) = caps[1].parse::<u32>() else {
            continue;
        };

        if seen.contains(&host_port) {
            issues.push(ValidationIssue::at_line(
                IssueCode::DuplicatePort {
                    service: name.to_string(),
                    port: host_port,
                },
                ports_ln,
            ));
        }
        seen.push(host_port);

        if let Some((_, known_as)) = COMMON_PORTS.iter().find(|(p, _)| *p == host_port) {
            issues.push(ValidationIssue::at_line(
                IssueCode::CommonPort {
                    service: name.to_string(),
                    port: host_port,
                    known_as,
                },
                ports_ln,
            ));
        }
    }
}
