//! Error types for ring operations.

/// Errors that can occur while configuring or querying a ring.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RingError {
    /// A node spec passed to `configure` is unusable.
    ///
    /// Nothing in the batch has been applied when this is returned.
    #[error("invalid node config at position {index}: {reason}")]
    InvalidNodeConfig {
        /// Position of the offending spec in the batch.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// A lookup was attempted on a ring with no virtual nodes.
    #[error("ring is empty")]
    EmptyRing,

    /// A hash value targeted for removal is not present in the index.
    #[error("hash {0:032x} not found in ring index")]
    NotFound(u128),
}
