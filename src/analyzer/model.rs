//! Data model produced by the analyzer.
//!
//! All of these are immutable value snapshots rebuilt from scratch on every
//! analysis call; nothing here borrows from or outlives the input document.

use serde::Serialize;

/// Cheap top-level summary used for the overview badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeOverview {
    pub services_count: usize,
    pub networks_count: usize,
    pub volumes_count: usize,
}

/// A `command:` value. The shape follows the source: a single-line scalar
/// stays a scalar and is never normalized into a one-element list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CommandValue {
    Scalar(String),
    List(Vec<String>),
}

/// One `host:container` port mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortMapping {
    pub host: String,
    pub container: String,
}

/// One environment entry. A bare `KEY` with no `=` has no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvVar {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// One `host:container` volume mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeMapping {
    pub host: String,
    pub container: String,
}

/// A network a service is attached to, with an optional static address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkAttachment {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

/// One `key=value` sysctl entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sysctl {
    pub key: String,
    pub value: String,
}

/// One service block under `services:`.
///
/// Constructed fresh per parse from the text slice belonging to one service;
/// missing fields degrade to `None` or empty collections, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceConfig {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<CommandValue>,
    pub ports: Vec<PortMapping>,
    pub environment: Vec<EnvVar>,
    pub volumes: Vec<VolumeMapping>,
    pub networks: Vec<NetworkAttachment>,
    pub depends_on: Vec<String>,
    pub sysctls: Vec<Sysctl>,
    pub cap_add: Vec<String>,
}

impl ServiceConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One network defined under the top-level `networks:` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkConfig {
    pub name: String,
    pub external: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
}

/// The full structured model of a document.
///
/// Name uniqueness is not enforced here: duplicate services or networks
/// appear in list order, and only the validator flags the duplicate key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedComposeData {
    pub services: Vec<ServiceConfig>,
    pub networks: Vec<NetworkConfig>,
    pub volumes: Vec<String>,
}
