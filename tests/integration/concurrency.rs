//! Integration test: a ring shared behind a `RwLock` serves concurrent
//! lookups while a writer changes membership.

use std::sync::RwLock;
use std::thread;

use hashring_core::NodeSpec;
use hashring_integration_tests::{numbered_ring, random_string, seeded_rng};

#[test]
fn test_concurrent_readers_with_single_writer() {
    let ring = RwLock::new(numbered_ring(20, 10));

    thread::scope(|s| {
        for t in 0..4u64 {
            let ring = &ring;
            s.spawn(move || {
                let mut rng = seeded_rng(t);
                for _ in 0..2000 {
                    let key = random_string(&mut rng, 8);
                    let guard = ring.read().unwrap();
                    let owner = guard.lookup(&key).unwrap();
                    assert!(guard.contains(owner), "{owner} not registered");
                }
            });
        }

        s.spawn(|| {
            for n in 20..40 {
                ring.write()
                    .unwrap()
                    .configure([NodeSpec::new(format!("node{n}"))])
                    .unwrap();
                ring.write().unwrap().remove([format!("node{}", n - 20)]);
            }
        });
    });

    let ring = ring.into_inner().unwrap();
    assert_eq!(ring.node_count(), 20);
    assert_eq!(ring.vnode_count(), 200);
    assert!(ring.contains("node39"));
    assert!(!ring.contains("node0"));
}
