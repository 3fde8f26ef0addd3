//! Top-level section location by indentation boundary.
//!
//! Docker Compose files overwhelmingly use 2-space indentation, which makes
//! a cheap boundary rule reliable: a top-level section runs until the next
//! line that starts with an alphabetic character at column 0. Documents
//! using a wider base indent mis-segment under this rule; that is a
//! documented limitation, not something we try to solve without a real YAML
//! grammar.

use once_cell::sync::Lazy;
use regex::Regex;

/// Service header: exactly two spaces, identifier, colon, end of line.
pub(crate) static SERVICE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {2}[A-Za-z][A-Za-z0-9_-]*:$").expect("valid regex"));

/// Network name within the top-level `networks:` section (colon optional).
pub(crate) static NETWORK_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {2}[A-Za-z][A-Za-z0-9_-]*:?$").expect("valid regex"));

/// Volume name within the top-level `volumes:` section. Dots are allowed
/// in volume names (e.g. `caddy.etc`).
pub(crate) static VOLUME_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {2}[A-Za-z][A-Za-z0-9_.-]*:?$").expect("valid regex"));

/// True when the raw line opens at column 0 with an alphabetic character,
/// i.e. starts a new top-level block.
pub(crate) fn is_top_level(raw: &str) -> bool {
    raw.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// Find the first line whose trimmed content equals `"<name>:"` at zero
/// indentation. An indented instance of the same key (e.g. a per-service
/// `volumes:` list) never matches.
pub fn find_section(lines: &[&str], name: &str) -> Option<usize> {
    let header = format!("{name}:");
    lines.iter().position(|raw| {
        let info = super::line::classify(raw);
        info.indent == 0 && info.trimmed == header
    })
}

/// Scan forward from a section start for the end of the section: the first
/// subsequent line starting at column 0 with an alphabetic character, or the
/// end of the document.
pub fn section_end(lines: &[&str], start: usize) -> usize {
    lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, raw)| is_top_level(raw))
        .map_or(lines.len(), |(i, _)| i)
}
