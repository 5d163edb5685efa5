//! Integration test: lookups spread evenly and stay stable.

use std::collections::HashMap;

use hashring_core::NodeSpec;
use hashring_integration_tests::{numbered_ring, random_string, seeded_rng};

/// 100 nodes x 10 virtual nodes, 1000 random keys: every key lands somewhere
/// and no node takes a fifth of the load.
#[test]
fn test_load_balance_with_default_virtual_nodes() {
    let ring = numbered_ring(100, 10);
    assert_eq!(ring.vnode_count(), 1000);
    assert_eq!(ring.hashes().count(), 1000);

    let mut rng = seeded_rng(42);
    let mut distribution: HashMap<String, usize> = HashMap::new();
    for _ in 0..1000 {
        let key = random_string(&mut rng, 10);
        let owner = ring.lookup(&key).unwrap();
        *distribution.entry(owner.to_string()).or_default() += 1;
    }

    let total: usize = distribution.values().sum();
    let max = distribution.values().copied().max().unwrap_or(0);
    assert_eq!(total, 1000);
    assert!(max < 200, "one node took {max} of {total} keys");
}

/// Repeated lookups against an unchanged ring return the same node.
#[test]
fn test_lookup_is_stable() {
    let ring = numbered_ring(25, 10);
    let mut rng = seeded_rng(1);
    for _ in 0..500 {
        let key = random_string(&mut rng, 16);
        let first = ring.lookup(&key).unwrap();
        for _ in 0..3 {
            assert_eq!(ring.lookup(&key).unwrap(), first);
        }
    }
}

/// Two independently built rings agree on every key.
#[test]
fn test_independent_rings_agree() {
    let a = numbered_ring(10, 50);
    let b = numbered_ring(10, 50);
    let mut rng = seeded_rng(2);
    for _ in 0..1000 {
        let key = random_string(&mut rng, 12);
        assert_eq!(a.lookup(&key).unwrap(), b.lookup(&key).unwrap());
    }
}

/// Adding an 11th node moves roughly 1/11 of keys, all onto the new node.
#[test]
fn test_adding_node_moves_bounded_fraction() {
    let mut ring = numbered_ring(10, 100);
    let mut rng = seeded_rng(3);
    let keys: Vec<String> = (0..5000).map(|_| random_string(&mut rng, 10)).collect();
    let before: Vec<String> = keys
        .iter()
        .map(|k| ring.lookup(k).unwrap().to_string())
        .collect();

    ring.configure([NodeSpec::new("node10")]).unwrap();

    let mut moved = 0;
    for (key, old) in keys.iter().zip(&before) {
        let new = ring.lookup(key).unwrap();
        if new != old {
            assert_eq!(new, "node10", "{key} moved between existing nodes");
            moved += 1;
        }
    }
    let ratio = moved as f64 / keys.len() as f64;
    assert!(
        (0.02..=0.25).contains(&ratio),
        "unexpected share of keys moved: {moved}/{} ({ratio:.3})",
        keys.len()
    );
}
