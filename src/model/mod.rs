//! Configuration Model
//!
//! In-memory tree of a gateway configuration: a [`Service`] owns its
//! [`Endpoint`]s, each endpoint owns its [`Backend`]s. Every node carries a
//! capability map keyed by [`namespace`] strings; services and endpoints also
//! carry packed [`Details`] words.
//!
//! The tree is built once by a loader and never mutated by the audit. All
//! accessors are total: missing words read as zero, missing capabilities read
//! as "not configured".

pub mod namespace;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

use crate::flags::{EndpointFlags, PackedFlags, ServiceFlags};

/// Slot of the flags word in every `details` field
pub const FLAGS_SLOT: usize = 0;
/// Endpoint slot: timeout in nanoseconds
pub const ENDPOINT_TIMEOUT_SLOT: usize = 3;

/// Read `null` the same way as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Packed numeric settings of a node
///
/// Word [`FLAGS_SLOT`] is a bitmask; the remaining words are plain numbers
/// whose meaning depends on the node kind. A `null` field decodes as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Details(Vec<i64>);

impl<'de> Deserialize<'de> for Details {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        null_as_default(deserializer).map(Self)
    }
}

impl Details {
    /// Word at `slot`, if present
    pub fn word(&self, slot: usize) -> Option<i64> {
        self.0.get(slot).copied()
    }

    /// Flags word, zero when absent
    pub fn flags(&self) -> i64 {
        self.word(FLAGS_SLOT).unwrap_or(0)
    }

    /// Flags word decoded as `F`
    pub fn flags_as<F: PackedFlags>(&self) -> F {
        F::from_word(self.flags())
    }

    /// Whether `flag` is set in the flags word
    pub fn is_set<F: PackedFlags>(&self, flag: F) -> bool {
        flag.is_set_in(self.flags())
    }

    /// Store `value` at `slot`, growing with zeros as needed
    pub fn set_word(&mut self, slot: usize, value: i64) {
        if self.0.len() <= slot {
            self.0.resize(slot + 1, 0);
        }
        self.0[slot] = value;
    }

    pub fn words(&self) -> &[i64] {
        &self.0
    }
}

/// Value attached to a configured capability
///
/// Presence in the map is what marks a capability as configured. Some
/// capabilities additionally pack sub-flags into word 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Capability(Vec<i64>);

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        null_as_default(deserializer).map(Self)
    }
}

impl Capability {
    /// A configured capability with no payload
    pub fn enabled() -> Self {
        Self(Vec::new())
    }

    /// A capability whose word 0 packs `flags`
    pub fn with_flags<F: PackedFlags>(flags: F) -> Self {
        Self(vec![flags.bits()])
    }

    /// First word, if the capability carries any payload
    pub fn flags(&self) -> Option<i64> {
        self.0.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Namespace-keyed capability map
pub type Capabilities = FxHashMap<String, Capability>;

/// Read-only access shared by every node of the tree
pub trait ConfigNode {
    fn capabilities(&self) -> &Capabilities;

    /// Whether the capability at `namespace` is configured on this node
    fn has_capability(&self, namespace: &str) -> bool {
        self.capabilities().contains_key(namespace)
    }

    /// Capability value at `namespace`
    fn capability(&self, namespace: &str) -> Option<&Capability> {
        self.capabilities().get(namespace)
    }

    /// Whether any of `namespaces` is configured on this node
    fn has_any_capability(&self, namespaces: &[&str]) -> bool {
        namespaces.iter().any(|ns| self.has_capability(ns))
    }

    /// How many of `namespaces` are configured on this node
    fn count_capabilities(&self, namespaces: &[&str]) -> usize {
        namespaces.iter().filter(|ns| self.has_capability(ns)).count()
    }
}

/// Root of the configuration tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub details: Details,
    #[serde(deserialize_with = "null_as_default")]
    pub capabilities: Capabilities,
    #[serde(deserialize_with = "null_as_default")]
    pub endpoints: Vec<Endpoint>,
    #[serde(deserialize_with = "null_as_default")]
    pub agents: Vec<Agent>,
}

impl Service {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service flags word
    pub fn with_flags(mut self, flags: ServiceFlags) -> Self {
        self.details.set_word(FLAGS_SLOT, flags.bits());
        self
    }

    pub fn with_capability(mut self, namespace: &str, capability: Capability) -> Self {
        self.capabilities.insert(namespace.to_string(), capability);
        self
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn is_set(&self, flag: ServiceFlags) -> bool {
        self.details.is_set(flag)
    }

    pub fn flags(&self) -> ServiceFlags {
        self.details.flags_as()
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }

    /// Every backend of every endpoint, in declaration order
    pub fn all_backends(&self) -> impl Iterator<Item = &Backend> {
        self.endpoints.iter().flat_map(|e| e.backends.iter())
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }
}

impl ConfigNode for Service {
    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}

/// One routable entry of the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    /// Route path, informational only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub details: Details,
    #[serde(deserialize_with = "null_as_default")]
    pub capabilities: Capabilities,
    #[serde(deserialize_with = "null_as_default")]
    pub backends: Vec<Backend>,
}

impl Endpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    /// Set the endpoint flags word
    pub fn with_flags(mut self, flags: EndpointFlags) -> Self {
        self.details.set_word(FLAGS_SLOT, flags.bits());
        self
    }

    /// Set the timeout slot, in nanoseconds
    pub fn with_timeout_nanos(mut self, nanos: i64) -> Self {
        self.details.set_word(ENDPOINT_TIMEOUT_SLOT, nanos);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        let nanos = i64::try_from(timeout.as_nanos()).unwrap_or(i64::MAX);
        self.with_timeout_nanos(nanos)
    }

    pub fn with_capability(mut self, namespace: &str, capability: Capability) -> Self {
        self.capabilities.insert(namespace.to_string(), capability);
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backends.push(backend);
        self
    }

    pub fn is_set(&self, flag: EndpointFlags) -> bool {
        self.details.is_set(flag)
    }

    pub fn flags(&self) -> EndpointFlags {
        self.details.flags_as()
    }

    /// Raw timeout slot, in nanoseconds
    pub fn timeout_nanos(&self) -> i64 {
        self.details.word(ENDPOINT_TIMEOUT_SLOT).unwrap_or(0)
    }

    /// Timeout, `None` when absent or negative
    pub fn timeout(&self) -> Option<Duration> {
        self.details
            .word(ENDPOINT_TIMEOUT_SLOT)
            .and_then(|n| u64::try_from(n).ok())
            .map(Duration::from_nanos)
    }

    pub fn backends(&self) -> impl Iterator<Item = &Backend> {
        self.backends.iter()
    }

    /// Whether the capability is configured on this endpoint or any of its backends
    pub fn has_capability_in_path(&self, endpoint_ns: &str, backend_ns: &str) -> bool {
        self.has_capability(endpoint_ns)
            || self.backends.iter().any(|b| b.has_capability(backend_ns))
    }
}

impl ConfigNode for Endpoint {
    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}

/// One upstream target of an endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Backend {
    /// Upstream host, informational only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub capabilities: Capabilities,
}

impl Backend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    pub fn with_capability(mut self, namespace: &str, capability: Capability) -> Self {
        self.capabilities.insert(namespace.to_string(), capability);
        self
    }
}

impl ConfigNode for Backend {
    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}

/// Async agent descriptor; only the count matters to the builtin rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Agent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub capabilities: Capabilities,
}

impl Agent {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }
}

impl ConfigNode for Agent {
    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}
