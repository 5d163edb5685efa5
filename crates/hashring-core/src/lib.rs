//! Consistent hashing ring with virtual nodes.
//!
//! This crate maps arbitrary values onto a dynamic set of nodes such that
//! adding or removing a node only remaps the values that node gains or loses.
//!
//! - [`Ring`] — node registry plus lookup; the entry point.
//! - [`RingIndex`] — sorted index of virtual-node positions with wrap-around
//!   successor search.
//! - [`hash`] / [`vnode_hash`] — deterministic 128-bit BLAKE3 positions.
//!
//! Each node owns `virtual_nodes` positions, derived from
//! `blake3("{key}#{index}")`. More virtual nodes per node gives a smoother
//! distribution.
//!
//! ```
//! use hashring_core::{NodeSpec, Ring, RingConfig};
//!
//! let mut ring = Ring::with_nodes(
//!     [NodeSpec::new("cache-a"), NodeSpec::new("cache-b").with_virtual_nodes(20)],
//!     RingConfig::default(),
//! )?;
//! let owner = ring.lookup("user:42")?.to_string();
//! assert!(owner == "cache-a" || owner == "cache-b");
//!
//! ring.remove(["cache-a"]);
//! assert_eq!(ring.lookup("user:42")?, "cache-b");
//! # Ok::<(), hashring_core::RingError>(())
//! ```

mod config;
mod error;
mod hash;
mod index;
mod node;
mod ring;

pub use config::{DEFAULT_VIRTUAL_NODES, RingConfig};
pub use error::RingError;
pub use hash::{hash, vnode_hash};
pub use index::RingIndex;
pub use node::{Node, NodeSpec};
pub use ring::Ring;
