//! Node specs as supplied by callers and nodes as stored by the ring.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-supplied description of a node.
///
/// Only `key` is mandatory. `virtual_nodes` falls back to the ring's default
/// when absent. Any other fields land in `metadata` and are passed through
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Unique node key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Number of virtual nodes for this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_nodes: Option<u32>,
    /// Opaque caller-defined fields (host, port, ...).
    #[serde(flatten)]
    pub metadata: BTreeMap<String, Value>,
}

impl NodeSpec {
    /// Spec for `key` with the default virtual-node count and no metadata.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Set an explicit virtual-node count.
    pub fn with_virtual_nodes(mut self, virtual_nodes: u32) -> Self {
        self.virtual_nodes = Some(virtual_nodes);
        self
    }

    /// Attach an auxiliary field.
    pub fn with_metadata(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(name.into(), value.into());
        self
    }

    /// The key, if present and non-empty.
    pub(crate) fn valid_key(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| !k.is_empty())
    }
}

/// A node registered in the ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node key.
    pub key: String,
    /// Number of virtual nodes currently on the ring for this node.
    pub virtual_nodes: u32,
    /// Auxiliary fields from the most recent spec.
    #[serde(flatten)]
    pub metadata: BTreeMap<String, Value>,
}
