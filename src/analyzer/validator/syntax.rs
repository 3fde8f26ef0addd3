//! Syntax pass: per-line lexical checks.
//!
//! Every check consumes the shared line classification from
//! [`crate::analyzer::line`]; no check re-parses the raw line with its own
//! ad-hoc patterns.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyzer::line::{self, LineRole};
use crate::analyzer::validator::issue::{IssueCode, ValidationIssue};

/// A bare identifier-looking token with no structure characters.
static BARE_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.-]*$").expect("valid regex"));

/// Top-level section keywords that must each start their own line.
const SECTION_KEYWORDS: [&str; 5] = ["version:", "services:", "networks:", "volumes:", "name:"];

pub(super) fn run(lines: &[&str], issues: &mut Vec<ValidationIssue>) {
    for (idx, raw) in lines.iter().enumerate() {
        let ln = (idx + 1) as u32;
        let info = line::classify(raw);

        check_indent_chars(raw, ln, issues);

        if info.role == LineRole::Blank || info.role == LineRole::Comment {
            continue;
        }

        check_indent_width(&info, ln, issues);
        check_quotes(&info, ln, issues);
        check_colon_spacing(&info, ln, issues);
        check_missing_colon(&info, ln, issues);
        check_merged_sections(&info, ln, issues);
        check_list_item_dash(&info, ln, issues);
        check_duplicate_key(lines, idx, &info, issues);
    }
}

fn check_indent_chars(raw: &str, ln: u32, issues: &mut Vec<ValidationIssue>) {
    if line::has_tab_indent(raw) {
        issues.push(ValidationIssue::at_line(IssueCode::NoTabs, ln));
    }
    if line::has_mixed_indent(raw) {
        issues.push(ValidationIssue::at_line(IssueCode::MixedIndent, ln));
    }
}

fn check_indent_width(info: &line::LineInfo, ln: u32, issues: &mut Vec<ValidationIssue>) {
    if info.indent > 0 && info.indent % 2 != 0 {
        issues.push(ValidationIssue::at_line(IssueCode::Indentation, ln));
    }
}

fn check_quotes(info: &line::LineInfo, ln: u32, issues: &mut Vec<ValidationIssue>) {
    let double = info.raw.matches('"').count();
    let single = info.raw.matches('\'').count();
    if double % 2 != 0 || single % 2 != 0 {
        issues.push(ValidationIssue::at_line(IssueCode::UnbalancedQuotes, ln));
    }
}

/// A mapping key's colon must be followed by a space (or end the line).
/// URL schemes (`key: http://...` keys the classifier sees as `http`),
/// digit:digit port pairs, and list items are excluded.
fn check_colon_spacing(info: &line::LineInfo, ln: u32, issues: &mut Vec<ValidationIssue>) {
    if info.role != LineRole::MappingKey {
        return;
    }
    let Some((key, rest)) = info.trimmed.split_once(':') else {
        return;
    };
    let Some(next) = rest.chars().next() else {
        return; // bare `key:`
    };
    if next == ' ' {
        return;
    }
    if rest.starts_with("//") {
        return; // URL scheme colon
    }
    let port_pair = key.chars().last().is_some_and(|c| c.is_ascii_digit()) && next.is_ascii_digit();
    if port_pair {
        return;
    }
    issues.push(ValidationIssue::at_line(
        IssueCode::ColonSpacing {
            key: key.to_string(),
        },
        ln,
    ));
}

fn check_missing_colon(info: &line::LineInfo, ln: u32, issues: &mut Vec<ValidationIssue>) {
    if info.role != LineRole::Unknown {
        return;
    }
    if info.trimmed.contains(':') || info.trimmed.contains('=') {
        return;
    }
    if BARE_IDENTIFIER.is_match(info.trimmed) {
        issues.push(ValidationIssue::at_line(IssueCode::MissingColon, ln));
    }
}

fn check_merged_sections(info: &line::LineInfo, ln: u32, issues: &mut Vec<ValidationIssue>) {
    let hits: usize = SECTION_KEYWORDS
        .iter()
        .map(|kw| info.raw.matches(kw).count())
        .sum();
    if hits >= 2 {
        issues.push(ValidationIssue::at_line(IssueCode::MergedSections, ln));
    }
}

fn check_list_item_dash(info: &line::LineInfo, ln: u32, issues: &mut Vec<ValidationIssue>) {
    if info.role != LineRole::ListItem {
        return;
    }
    let after_dash = &info.trimmed[1..];
    if !after_dash.is_empty() && !after_dash.starts_with(' ') {
        issues.push(ValidationIssue::at_line(IssueCode::ListItemSyntax, ln));
    }
}

/// Duplicate keys at the same indentation level within a contiguous block.
/// Scans forward from each key until indentation decreases; a blank line
/// counts as indent zero and therefore ends any nested block. Reported at
/// the later occurrence.
fn check_duplicate_key(
    lines: &[&str],
    idx: usize,
    info: &line::LineInfo,
    issues: &mut Vec<ValidationIssue>,
) {
    if info.role != LineRole::MappingKey {
        return;
    }
    let Some(key) = info.key() else {
        return;
    };

    for (j, raw) in lines.iter().enumerate().skip(idx + 1) {
        let next = line::classify(raw);
        if next.indent < info.indent {
            break;
        }
        if next.indent == info.indent && next.role == LineRole::MappingKey && next.key() == Some(key)
        {
            issues.push(ValidationIssue::at_line(
                IssueCode::DuplicateKey {
                    key: key.to_string(),
                },
                (j + 1) as u32,
            ));
        }
    }
}
