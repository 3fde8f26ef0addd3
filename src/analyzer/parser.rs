//! Structural parser: raw text to [`ParsedComposeData`].
//!
//! This is a line-oriented recursive-descent-by-indentation parser, not a
//! YAML parser. Structures are located by the fixed 2-space Compose
//! convention; every sub-field of a service is found by its own forward
//! scan, so field order in the source is irrelevant.
//!
//! The parser never fails: absent or malformed substructures degrade to
//! empty collections or missing optional fields, and all correctness
//! signaling is left to the validator.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyzer::line::{self, LineRole};
use crate::analyzer::model::{
    CommandValue, EnvVar, NetworkAttachment, NetworkConfig, ParsedComposeData, PortMapping,
    ServiceConfig, Sysctl, VolumeMapping,
};
use crate::analyzer::section::{self, NETWORK_NAME, SERVICE_HEADER, VOLUME_NAME};

/// A line that ends the current service body: a sibling service header or
/// any other 2-space key under `services:`.
pub(crate) static SERVICE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {2}[A-Za-z]").expect("valid regex"));

/// A list item at the depth service sub-fields use (2-6 leading spaces).
pub(crate) static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s{2,6}-\s+").expect("valid regex"));

/// A sibling property key, seen trimmed.
static PROPERTY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*:").expect("valid regex"));

/// A network attachment in mapping form (`netname:`), seen trimmed.
static NET_ATTACHMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*:$").expect("valid regex"));

/// `driver: <value>` at any indentation.
static NETWORK_DRIVER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s+driver:\s*(.+)$").expect("valid regex"));

/// Parse a Compose document into its structured model. Total over arbitrary
/// input; any text yields a (possibly empty) result.
pub fn parse(text: &str) -> ParsedComposeData {
    let lines: Vec<&str> = super::split_lines(text);

    let data = ParsedComposeData {
        services: parse_services(&lines),
        networks: parse_top_level_networks(&lines),
        volumes: parse_top_level_volumes(&lines),
    };

    log::debug!(
        "parsed {} services, {} networks, {} volumes",
        data.services.len(),
        data.networks.len(),
        data.volumes.len()
    );

    data
}

/// End of the service body that starts at `header`: the next 2-space key or
/// top-level line, exclusive.
pub(crate) fn service_body_end(lines: &[&str], header: usize) -> usize {
    lines
        .iter()
        .enumerate()
        .skip(header + 1)
        .find(|(_, raw)| SERVICE_BOUNDARY.is_match(raw) || section::is_top_level(raw))
        .map_or(lines.len(), |(i, _)| i)
}

fn parse_services(lines: &[&str]) -> Vec<ServiceConfig> {
    let Some(start) = section::find_section(lines, "services") else {
        return Vec::new();
    };

    let mut services = Vec::new();
    for i in start + 1..lines.len() {
        if section::is_top_level(lines[i]) {
            break;
        }
        if SERVICE_HEADER.is_match(lines[i]) {
            let name = lines[i].trim().trim_end_matches(':');
            let end = service_body_end(lines, i);
            services.push(parse_service(name, &lines[i..end]));
        }
    }
    services
}

/// Parse one service from its body slice (header line included).
fn parse_service(name: &str, body: &[&str]) -> ServiceConfig {
    let mut service = ServiceConfig::new(name);

    service.image = field_scalar(body, "image");
    service.restart = field_scalar(body, "restart");
    service.command = parse_command(body);

    service.ports = list_items(body, "ports")
        .into_iter()
        .filter_map(|(_, item)| {
            let entry = strip_all_quotes(item);
            let mut segments = entry.split(':');
            match (segments.next(), segments.next()) {
                (Some(host), Some(container)) if !host.is_empty() && !container.is_empty() => {
                    Some(PortMapping {
                        host: host.to_string(),
                        container: container.to_string(),
                    })
                }
                _ => None,
            }
        })
        .collect();

    service.environment = list_items(body, "environment")
        .into_iter()
        .filter(|(_, item)| !item.is_empty())
        .map(|(_, item)| match item.split_once('=') {
            Some((key, value)) => EnvVar {
                key: key.to_string(),
                value: Some(value.to_string()),
            },
            None => EnvVar {
                key: item.to_string(),
                value: None,
            },
        })
        .collect();

    service.volumes = list_items(body, "volumes")
        .into_iter()
        .filter_map(|(_, item)| {
            let entry = strip_volume_decorations(item);
            let mut segments = entry.split(':');
            match (segments.next(), segments.next()) {
                (Some(host), Some(container)) if !host.is_empty() && !container.is_empty() => {
                    Some(VolumeMapping {
                        host: host.to_string(),
                        container: container.to_string(),
                    })
                }
                _ => None,
            }
        })
        .collect();

    service.networks = parse_service_networks(body);

    service.depends_on = list_items(body, "depends_on")
        .into_iter()
        .map(|(_, item)| item.trim().to_string())
        .filter(|dep| !dep.is_empty())
        .collect();

    service.sysctls = list_items(body, "sysctls")
        .into_iter()
        .filter_map(|(_, item)| {
            let (key, value) = item.split_once('=')?;
            let (key, value) = (key.trim(), value.trim());
            (!key.is_empty() && !value.is_empty()).then(|| Sysctl {
                key: key.to_string(),
                value: value.to_string(),
            })
        })
        .collect();

    service.cap_add = list_items(body, "cap_add")
        .into_iter()
        .map(|(_, item)| item.trim().to_string())
        .filter(|cap| !cap.is_empty())
        .collect();

    service
}

/// First body line whose trimmed content starts with `"<field>:"`.
fn find_field(body: &[&str], field: &str) -> Option<usize> {
    let prefix = format!("{field}:");
    body.iter().position(|raw| raw.trim().starts_with(&prefix))
}

/// Scalar field value: first `field: value` line with a non-empty value.
fn field_scalar(body: &[&str], field: &str) -> Option<String> {
    let prefix = format!("{field}:");
    body.iter().find_map(|raw| {
        let rest = raw.trim().strip_prefix(&prefix)?.trim();
        (!rest.is_empty()).then(|| rest.to_string())
    })
}

/// Collect the list items under a field header, stopping at the next
/// sibling property. Returns `(body_index, item_content)` pairs; the dash
/// prefix is stripped. One routine serves every list-shaped field.
fn list_items<'a>(body: &[&'a str], field: &str) -> Vec<(usize, &'a str)> {
    let Some(start) = find_field(body, field) else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for (k, raw) in body.iter().enumerate().skip(start + 1) {
        let trimmed = raw.trim();
        if is_sibling_property(trimmed) {
            break;
        }
        if LIST_ITEM.is_match(raw) {
            items.push((k, list_item_content(trimmed)));
        }
    }
    items
}

fn is_sibling_property(trimmed: &str) -> bool {
    !trimmed.starts_with('-') && PROPERTY.is_match(trimmed)
}

/// The content of a trimmed list-item line, with the dash stripped.
fn list_item_content(trimmed: &str) -> &str {
    trimmed.strip_prefix('-').unwrap_or(trimmed).trim_start()
}

/// `command:` supports a single-line scalar, a list, and folded block
/// scalar lines; the source shape determines the result shape.
fn parse_command(body: &[&str]) -> Option<CommandValue> {
    let idx = find_field(body, "command")?;
    let inline = body[idx].trim()["command:".len()..].trim();

    // Block scalar indicators open the multi-line form.
    if !inline.is_empty() && !matches!(inline, "|" | ">" | "|-" | ">-") {
        return Some(CommandValue::Scalar(inline.to_string()));
    }

    let mut parts = Vec::new();
    for raw in &body[idx + 1..] {
        let trimmed = raw.trim();
        if is_sibling_property(trimmed) {
            break;
        }
        if LIST_ITEM.is_match(raw) {
            parts.push(strip_edge_quotes(list_item_content(trimmed)).to_string());
        } else if !trimmed.is_empty() && !trimmed.starts_with('-') && raw.starts_with("    ") {
            // Folded block scalar continuation.
            parts.push(trimmed.to_string());
        }
    }

    (!parts.is_empty()).then_some(CommandValue::List(parts))
}

/// Per-service `networks:` accepts a mapping form (`netname:` with an
/// optional nested `ipv4_address:`) and a list form (`- netname`).
fn parse_service_networks(body: &[&str]) -> Vec<NetworkAttachment> {
    let Some(start) = find_field(body, "networks") else {
        return Vec::new();
    };
    let header_indent = line::classify(body[start]).indent;

    let mut networks = Vec::new();
    for (k, raw) in body.iter().enumerate().skip(start + 1) {
        let info = line::classify(raw);
        if info.role != LineRole::Blank && info.indent <= header_indent {
            break;
        }
        match info.role {
            LineRole::MappingKey if NET_ATTACHMENT.is_match(info.trimmed) => {
                let name = info.trimmed.trim_end_matches(':').to_string();
                let ip = find_ipv4_address(&body[k + 1..], info.indent);
                networks.push(NetworkAttachment { name, ip });
            }
            LineRole::ListItem => {
                let name = list_item_content(info.trimmed).trim().to_string();
                if !name.is_empty() {
                    networks.push(NetworkAttachment { name, ip: None });
                }
            }
            _ => {}
        }
    }
    networks
}

/// Look inside one network attachment's scope for `ipv4_address:`.
fn find_ipv4_address(rest: &[&str], attachment_indent: usize) -> Option<String> {
    for raw in rest {
        let info = line::classify(raw);
        if info.role != LineRole::Blank && info.indent <= attachment_indent {
            break;
        }
        if let Some(value) = info.trimmed.strip_prefix("ipv4_address:") {
            return Some(value.trim().to_string());
        }
    }
    None
}

fn parse_top_level_networks(lines: &[&str]) -> Vec<NetworkConfig> {
    let Some(start) = section::find_section(lines, "networks") else {
        return Vec::new();
    };
    let end = section::section_end(lines, start);

    let mut networks = Vec::new();
    for i in start + 1..end {
        if !NETWORK_NAME.is_match(lines[i]) {
            continue;
        }
        let name = lines[i].trim().trim_end_matches(':').to_string();
        let mut external = false;
        let mut driver = None;

        // Scan this network's own scope for its properties.
        for raw in &lines[i + 1..end] {
            if SERVICE_BOUNDARY.is_match(raw) {
                break;
            }
            if raw.contains("external: true") {
                external = true;
            }
            if let Some(caps) = NETWORK_DRIVER.captures(raw) {
                driver = Some(caps[1].trim().to_string());
            }
        }

        networks.push(NetworkConfig {
            name,
            external,
            driver,
        });
    }
    networks
}

fn parse_top_level_volumes(lines: &[&str]) -> Vec<String> {
    let Some(start) = section::find_section(lines, "volumes") else {
        return Vec::new();
    };
    let end = section::section_end(lines, start);

    lines[start + 1..end]
        .iter()
        .filter(|raw| VOLUME_NAME.is_match(raw))
        .map(|raw| raw.trim().trim_end_matches(':').to_string())
        .collect()
}

/// Remove every quote character from a list entry, matching how quoted port
/// and volume entries are written in the wild.
fn strip_all_quotes(s: &str) -> String {
    s.chars().filter(|c| *c != '"' && *c != '\'').collect()
}

/// A trimmed `- <source>:<target>` volume line reduced to its bare entry:
/// dash stripped, quotes removed, `#optional` tail dropped.
pub(crate) fn clean_volume_entry(trimmed: &str) -> String {
    strip_volume_decorations(list_item_content(trimmed))
}

/// Strip quotes and a trailing `#optional` comment tail from a volume entry.
fn strip_volume_decorations(s: &str) -> String {
    let unquoted = strip_all_quotes(s);
    match unquoted.find("#optional") {
        Some(pos) => unquoted[..pos].trim().to_string(),
        None => unquoted.trim().to_string(),
    }
}

/// Strip one matching leading and trailing quote character.
fn strip_edge_quotes(s: &str) -> &str {
    let s = s.strip_prefix(['"', '\'']).unwrap_or(s);
    s.strip_suffix(['"', '\'']).unwrap_or(s)
}
