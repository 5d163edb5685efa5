//! Node registry and the public ring facade.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::config::RingConfig;
use crate::error::RingError;
use crate::hash::{hash, vnode_hash};
use crate::index::RingIndex;
use crate::node::{Node, NodeSpec};

/// Consistent hashing ring.
///
/// Each registered node owns `virtual_nodes` positions on a `u128` ring,
/// at `vnode_hash(key, 0..virtual_nodes)`. A value is owned by the node of
/// the first position at or clockwise after `hash(value)`.
///
/// Mutation needs `&mut Ring`; wrap the ring in a `RwLock` to share it
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct Ring {
    /// Virtual node positions: ring position -> node key.
    index: RingIndex,
    /// Registered nodes by key.
    nodes: BTreeMap<String, Node>,
    config: RingConfig,
}

impl Ring {
    /// Create an empty ring.
    pub fn new(config: RingConfig) -> Self {
        Self {
            index: RingIndex::new(),
            nodes: BTreeMap::new(),
            config,
        }
    }

    /// Create a ring and register `nodes` in it.
    pub fn with_nodes<I>(nodes: I, config: RingConfig) -> Result<Self, RingError>
    where
        I: IntoIterator<Item = NodeSpec>,
    {
        let mut ring = Self::new(config);
        ring.configure(nodes)?;
        Ok(ring)
    }

    /// Add new nodes or reconfigure existing ones.
    ///
    /// A spec with an unknown key registers the node with replicas
    /// `0..virtual_nodes`. A spec with a known key grows or shrinks the
    /// node's replica range to the new count and replaces its metadata.
    ///
    /// The batch is validated up front: if any spec lacks a key, nothing is
    /// applied and [`RingError::InvalidNodeConfig`] names the first bad one.
    pub fn configure<I>(&mut self, nodes: I) -> Result<(), RingError>
    where
        I: IntoIterator<Item = NodeSpec>,
    {
        let specs: Vec<NodeSpec> = nodes.into_iter().collect();

        for (index, spec) in specs.iter().enumerate() {
            if spec.valid_key().is_none() {
                let reason = match spec.key {
                    None => "missing key",
                    Some(_) => "empty key",
                };
                return Err(RingError::InvalidNodeConfig {
                    index,
                    reason: reason.to_string(),
                });
            }
        }

        for spec in specs {
            self.apply(spec);
        }
        Ok(())
    }

    fn apply(&mut self, spec: NodeSpec) {
        let NodeSpec {
            key,
            virtual_nodes,
            metadata,
        } = spec;
        let Some(key) = key else {
            return;
        };
        let new = virtual_nodes.unwrap_or(self.config.default_virtual_nodes);

        match self.nodes.get_mut(&key) {
            Some(node) => {
                let old = node.virtual_nodes;
                match new.cmp(&old) {
                    Ordering::Less => remove_vnodes(&mut self.index, &key, new..old),
                    Ordering::Greater => insert_vnodes(&mut self.index, &key, old..new),
                    Ordering::Equal => {}
                }
                node.virtual_nodes = new;
                node.metadata = metadata;
                debug!(%key, old, new, "reconfigured node");
            }
            None => {
                insert_vnodes(&mut self.index, &key, 0..new);
                debug!(%key, virtual_nodes = new, "added node to ring");
                self.nodes.insert(
                    key.clone(),
                    Node {
                        key,
                        virtual_nodes: new,
                        metadata,
                    },
                );
            }
        }
    }

    /// Remove nodes by key, dropping all of their virtual nodes.
    ///
    /// Unknown keys are ignored. Returns how many nodes were removed.
    pub fn remove<I, K>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut removed = 0;
        for key in keys {
            let key = key.as_ref();
            if let Some(node) = self.nodes.remove(key) {
                remove_vnodes(&mut self.index, key, 0..node.virtual_nodes);
                debug!(%key, virtual_nodes = node.virtual_nodes, "removed node from ring");
                removed += 1;
            }
        }
        removed
    }

    /// Key of the node that owns `value`.
    pub fn lookup(&self, value: impl AsRef<[u8]>) -> Result<&str, RingError> {
        self.index
            .successor(hash(value))
            .ok_or(RingError::EmptyRing)
    }

    /// Up to `n` distinct node keys for `value`, in clockwise order.
    ///
    /// The first entry is always `lookup(value)`. Fewer than `n` keys are
    /// returned when fewer nodes own positions on the ring.
    pub fn lookup_n(&self, value: impl AsRef<[u8]>, n: usize) -> Result<Vec<&str>, RingError> {
        if self.index.is_empty() {
            return Err(RingError::EmptyRing);
        }

        let max_distinct = n.min(self.nodes.len());
        let mut owners: Vec<&str> = Vec::with_capacity(max_distinct);
        if max_distinct == 0 {
            return Ok(owners);
        }

        for (_, owner) in self.index.walk(hash(value)) {
            if !owners.contains(&owner) {
                owners.push(owner);
                if owners.len() == max_distinct {
                    break;
                }
            }
        }
        Ok(owners)
    }

    /// Stored ring positions in ascending order.
    pub fn hashes(&self) -> impl Iterator<Item = u128> + '_ {
        self.index.hashes()
    }

    /// Owner of the exact ring position `hash`.
    pub fn owner_of(&self, hash: u128) -> Option<&str> {
        self.index.get(hash)
    }

    /// `(position, owner)` pairs in ascending position order.
    pub fn entries(&self) -> impl Iterator<Item = (u128, &str)> {
        self.index.iter()
    }

    /// Read-only view of the position index.
    pub fn index(&self) -> &RingIndex {
        &self.index
    }

    /// Registered nodes by key.
    pub fn nodes(&self) -> &BTreeMap<String, Node> {
        &self.nodes
    }

    /// Stored configuration of one node.
    pub fn node(&self, key: &str) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Whether `key` is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of virtual nodes on the ring.
    pub fn vnode_count(&self) -> usize {
        self.index.len()
    }

    /// Virtual-node count used when a spec omits one.
    pub fn default_virtual_nodes(&self) -> u32 {
        self.config.default_virtual_nodes
    }
}

fn insert_vnodes(index: &mut RingIndex, key: &str, replicas: Range<u32>) {
    let owner: Arc<str> = Arc::from(key);
    for replica in replicas {
        let pos = vnode_hash(key, replica);
        index.insert(pos, Arc::clone(&owner));
        trace!(%key, replica, "inserted virtual node");
    }
}

fn remove_vnodes(index: &mut RingIndex, key: &str, replicas: Range<u32>) {
    for replica in replicas {
        let pos = vnode_hash(key, replica);
        match index.remove(pos) {
            Ok(_) => trace!(%key, replica, "removed virtual node"),
            // Only reachable after a position collision overwrote this replica.
            Err(e) => warn!(%key, replica, error = %e, "virtual node missing from ring index"),
        }
    }
}
