//! Lightweight counting pass for the summary badges.
//!
//! Deliberately independent of the structural parser: it only increments
//! three counters and never builds records, so it stays cheap enough to run
//! on every keystroke. For any well-formed document its counts agree with
//! the structural parser's (covered by the integration tests).

use crate::analyzer::model::ComposeOverview;
use crate::analyzer::section::{self, NETWORK_NAME, SERVICE_HEADER, VOLUME_NAME};

/// Count top-level services, networks, and volumes.
pub fn count(text: &str) -> ComposeOverview {
    let lines: Vec<&str> = super::split_lines(text);

    ComposeOverview {
        services_count: count_section(&lines, "services", &SERVICE_HEADER),
        networks_count: count_section(&lines, "networks", &NETWORK_NAME),
        volumes_count: count_section(&lines, "volumes", &VOLUME_NAME),
    }
}

fn count_section(lines: &[&str], name: &str, pattern: &regex::Regex) -> usize {
    let Some(start) = section::find_section(lines, name) else {
        return 0;
    };

    lines[start + 1..]
        .iter()
        .take_while(|raw| !section::is_top_level(raw))
        .filter(|raw| pattern.is_match(raw))
        .count()
}
