//! Per-line classification for Compose documents.
//!
//! Every other component (section locator, structural parser, validator
//! passes) consumes the same classification instead of re-testing the raw
//! line with its own patterns.

use once_cell::sync::Lazy;
use regex::Regex;

/// `key:` or `key: value` at the start of a trimmed line.
static MAPPING_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.-]*:").expect("valid regex"));

/// Structural role of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    /// Only whitespace.
    Blank,
    /// Trimmed content starts with `#`.
    Comment,
    /// Trimmed content starts with `-`.
    ListItem,
    /// Trimmed content looks like `key:` or `key: value`.
    MappingKey,
    /// Anything else (scalar continuation, malformed input).
    Unknown,
}

/// Classification of one raw source line.
///
/// Classification is lenient by design: a list item whose dash has no
/// following space still classifies as [`LineRole::ListItem`]; strictness
/// lives in the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo<'a> {
    /// The raw line as it appears in the document.
    pub raw: &'a str,
    /// Count of leading space characters. Tabs are never counted as indent;
    /// they are a flaggable condition of their own.
    pub indent: usize,
    /// The line with surrounding whitespace removed.
    pub trimmed: &'a str,
    /// Structural role.
    pub role: LineRole,
}

impl<'a> LineInfo<'a> {
    /// The key portion of a mapping line (text before the first colon).
    pub fn key(&self) -> Option<&'a str> {
        if self.role == LineRole::MappingKey {
            self.trimmed.split(':').next()
        } else {
            None
        }
    }

    /// The value portion of a mapping line (text after the first colon,
    /// trimmed). `None` for non-mapping lines, `Some("")` for a bare key.
    pub fn value(&self) -> Option<&'a str> {
        if self.role == LineRole::MappingKey {
            self.trimmed.split_once(':').map(|(_, v)| v.trim())
        } else {
            None
        }
    }
}

/// Classify one raw line. Pure; no side effects.
pub fn classify(raw: &str) -> LineInfo<'_> {
    let indent = raw.chars().take_while(|c| *c == ' ').count();
    let trimmed = raw.trim();
    let role = if trimmed.is_empty() {
        LineRole::Blank
    } else if trimmed.starts_with('#') {
        LineRole::Comment
    } else if trimmed.starts_with('-') {
        LineRole::ListItem
    } else if MAPPING_KEY.is_match(trimmed) {
        LineRole::MappingKey
    } else {
        LineRole::Unknown
    };

    LineInfo {
        raw,
        indent,
        trimmed,
        role,
    }
}

/// The leading whitespace run of a raw line (spaces and tabs).
pub fn leading_whitespace(raw: &str) -> &str {
    let end = raw
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(raw.len());
    &raw[..end]
}

/// True when the leading whitespace contains a tab.
pub fn has_tab_indent(raw: &str) -> bool {
    leading_whitespace(raw).contains('\t')
}

/// True when the leading whitespace mixes spaces and tabs.
pub fn has_mixed_indent(raw: &str) -> bool {
    let ws = leading_whitespace(raw);
    ws.contains('\t') && ws.contains(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_roles() {
        assert_eq!(classify("").role, LineRole::Blank);
        assert_eq!(classify("   ").role, LineRole::Blank);
        assert_eq!(classify("# a comment").role, LineRole::Comment);
        assert_eq!(classify("  - item").role, LineRole::ListItem);
        assert_eq!(classify("services:").role, LineRole::MappingKey);
        assert_eq!(classify("  image: nginx").role, LineRole::MappingKey);
        assert_eq!(classify("some bare text").role, LineRole::Unknown);
    }

    #[test]
    fn test_indent_counts_spaces_only() {
        assert_eq!(classify("    image: nginx").indent, 4);
        assert_eq!(classify("\timage: nginx").indent, 0);
        assert_eq!(classify("").indent, 0);
    }

    #[test]
    fn test_dash_without_space_is_still_list_item() {
        // Lenient classification; the validator flags the missing space.
        assert_eq!(classify("  -item").role, LineRole::ListItem);
    }

    #[test]
    fn test_key_and_value() {
        let info = classify("  image: nginx:latest");
        assert_eq!(info.key(), Some("image"));
        assert_eq!(info.value(), Some("nginx:latest"));

        let bare = classify("services:");
        assert_eq!(bare.key(), Some("services"));
        assert_eq!(bare.value(), Some(""));

        assert_eq!(classify("- a:/b").key(), None);
    }

    #[test]
    fn test_whitespace_predicates() {
        assert!(has_tab_indent("\timage: nginx"));
        assert!(!has_tab_indent("  image: nginx"));
        assert!(has_mixed_indent(" \timage: nginx"));
        assert!(!has_mixed_indent("\t\timage: nginx"));
        assert!(!has_mixed_indent("    image: nginx"));
    }
}
