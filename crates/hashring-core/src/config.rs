//! Ring-wide settings.

use serde::{Deserialize, Serialize};

/// Virtual-node count applied to specs that do not set their own.
pub const DEFAULT_VIRTUAL_NODES: u32 = 10;

/// Ring-wide configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Virtual nodes given to a node whose spec omits `virtual_nodes`.
    pub default_virtual_nodes: u32,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            default_virtual_nodes: DEFAULT_VIRTUAL_NODES,
        }
    }
}

impl RingConfig {
    /// Config with an explicit default virtual-node count.
    pub fn with_default_virtual_nodes(default_virtual_nodes: u32) -> Self {
        Self {
            default_virtual_nodes,
        }
    }
}
