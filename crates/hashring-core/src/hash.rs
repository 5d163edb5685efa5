//! Ring positions for keys and virtual nodes.
//!
//! Positions are the first 16 bytes of `blake3(input)` read as a big-endian
//! `u128`. There is no per-process seed, so positions are stable across runs.

/// Compute the ring position of arbitrary bytes.
pub fn hash(input: impl AsRef<[u8]>) -> u128 {
    let digest = blake3::hash(input.as_ref());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest.as_bytes()[..16]);
    u128::from_be_bytes(bytes)
}

/// Compute the ring position of the `index`-th virtual node of `key`.
///
/// The pre-hash string is `"{key}#{index}"`. The index is always the decimal
/// suffix after the last `#`, so distinct `(key, index)` pairs never collide
/// before hashing. Every insert and every removal goes through this function.
pub fn vnode_hash(key: &str, index: u32) -> u128 {
    hash(format!("{key}#{index}"))
}
