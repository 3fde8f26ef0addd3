//! Volume cross-reference pass: declared named volumes vs mount sources.

use std::collections::HashSet;

use crate::analyzer::line::{self, LineRole};
use crate::analyzer::parser::{self, LIST_ITEM, service_body_end};
use crate::analyzer::section::{self, SERVICE_HEADER, VOLUME_NAME};
use crate::analyzer::validator::issue::{IssueCode, ValidationIssue};

pub(super) fn run(lines: &[&str], issues: &mut Vec<ValidationIssue>) {
    let declared = declared_volumes(lines);
    let declared_names: HashSet<&str> = declared.iter().map(|(name, _)| name.as_str()).collect();

    let mut referenced: HashSet<String> = HashSet::new();

    if let Some(start) = section::find_section(lines, "services") {
        for i in start + 1..lines.len() {
            if section::is_top_level(lines[i]) {
                break;
            }
            if SERVICE_HEADER.is_match(lines[i]) {
                let name = lines[i].trim().trim_end_matches(':');
                check_service_mounts(name, i, lines, &declared_names, &mut referenced, issues);
            }
        }
    }

    for (name, decl_idx) in &declared {
        if !referenced.contains(name.as_str()) {
            issues.push(ValidationIssue::at_line(
                IssueCode::UnusedVolume {
                    volume: name.clone(),
                },
                (decl_idx + 1) as u32,
            ));
        }
    }
}

/// Top-level volume names with their declaration line indices.
fn declared_volumes(lines: &[&str]) -> Vec<(String, usize)> {
    let Some(start) = section::find_section(lines, "volumes") else {
        return Vec::new();
    };
    let end = section::section_end(lines, start);

    (start + 1..end)
        .filter(|&i| VOLUME_NAME.is_match(lines[i]))
        .map(|i| (lines[i].trim().trim_end_matches(':').to_string(), i))
        .collect()
}

fn check_service_mounts(
    service: &str,
    header_idx: usize,
    lines: &[&str],
    declared: &HashSet<&str>,
    referenced: &mut HashSet<String>,
    issues: &mut Vec<ValidationIssue>,
) {
    let end = service_body_end(lines, header_idx);
    let body = &lines[header_idx..end];

    let Some(vol_idx) = body
        .iter()
        .position(|raw| raw.trim().starts_with("volumes:"))
    else {
        return;
    };
    let header_indent = line::classify(body[vol_idx]).indent;

    let mut mount_lines = 0;
    for (k, raw) in body.iter().enumerate().skip(vol_idx + 1) {
        let info = line::classify(raw);
        if info.role != LineRole::Blank && info.indent <= header_indent {
            break;
        }
        if !LIST_ITEM.is_match(raw) {
            continue;
        }
        mount_lines += 1;

        let entry = parser::clean_volume_entry(info.trimmed);
        // Check the whole entry so drive-letter sources survive the split.
        if is_path_source(&entry) {
            continue;
        }
        let parts: Vec<&str> = entry.split(':').collect();
        if parts.len() < 2 || parts[0].is_empty() {
            continue;
        }
        let source = parts[0];
        // Variable sources cannot be resolved statically.
        if source.contains('$') {
            continue;
        }

        referenced.insert(source.to_string());
        if !declared.contains(source) {
            issues.push(ValidationIssue::at_line(
                IssueCode::UndefinedVolume {
                    volume: source.to_string(),
                },
                (header_idx + k + 1) as u32,
            ));
        }
    }

    if mount_lines == 0 {
        issues.push(ValidationIssue::at_line(
            IssueCode::EmptyServiceVolumes {
                service: service.to_string(),
            },
            (header_idx + vol_idx + 1) as u32,
        ));
    }
}

/// A mount source is a filesystem path when it starts with `/`, `./`, `../`,
/// `~`, or a drive letter; anything else names a volume.
fn is_path_source(source: &str) -> bool {
    if source.starts_with('/')
        || source.starts_with("./")
        || source.starts_with("../")
        || source.starts_with('~')
    {
        return true;
    }
    let bytes = source.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'/' || bytes[2] == b'\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_on(text: &str) -> Vec<ValidationIssue> {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut issues = Vec::new();
        run(&lines, &mut issues);
        issues
    }

    fn codes(issues: &[ValidationIssue]) -> Vec<&'static str> {
        issues.iter().map(|i| i.code).collect()
    }

    #[test]
    fn test_unused_and_undefined() {
        let yaml = "services:\n  db:\n    image: postgres:16\n    volumes:\n      - data:/var/lib/postgresql/data\nvolumes:\n  cache:\n";
        let issues = run_on(yaml);

        let unused: Vec<_> = issues
            .iter()
            .filter(|i| i.code == "compose-unused-volume")
            .collect();
        assert_eq!(unused.len(), 1);
        assert!(unused[0].message.contains("cache"));
        assert_eq!(unused[0].line, Some(7));

        let undefined: Vec<_> = issues
            .iter()
            .filter(|i| i.code == "compose-undefined-volume")
            .collect();
        assert_eq!(undefined.len(), 1);
        assert!(undefined[0].message.contains("data"));
        assert_eq!(undefined[0].line, Some(5));
    }

    #[test]
    fn test_declared_and_used_is_clean() {
        let yaml = "services:\n  db:\n    image: postgres:16\n    volumes:\n      - data:/var/lib/postgresql/data\nvolumes:\n  data:\n";
        let issues = run_on(yaml);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_bind_mounts_are_not_references() {
        let yaml = "services:\n  web:\n    image: nginx:1\n    volumes:\n      - ./conf:/etc/nginx\n      - /var/log:/log\n      - ~/data:/data\n      - C:/host:/win\n";
        let issues = run_on(yaml);
        assert!(!codes(&issues).contains(&"compose-undefined-volume"));
    }

    #[test]
    fn test_variable_source_is_skipped() {
        let yaml = "services:\n  web:\n    image: nginx:1\n    volumes:\n      - ${DATA_DIR}:/data\n";
        let issues = run_on(yaml);
        assert!(!codes(&issues).contains(&"compose-undefined-volume"));
    }

    #[test]
    fn test_empty_service_volumes_block() {
        let yaml = "services:\n  web:\n    image: nginx:1\n    volumes:\n    restart: always\n";
        let issues = run_on(yaml);
        let empty: Vec<_> = issues
            .iter()
            .filter(|i| i.code == "service-empty-volumes")
            .collect();
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].line, Some(4));
    }

    #[test]
    fn test_dotted_volume_name_matches_reference() {
        let yaml = "services:\n  app:\n    image: x:1\n    volumes:\n      - app.data:/srv\nvolumes:\n  app.data:\n";
        let issues = run_on(yaml);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_no_volumes_anywhere_is_silent() {
        let issues = run_on("services:\n  web:\n    image: nginx:1\n");
        assert!(issues.is_empty());
    }
}
