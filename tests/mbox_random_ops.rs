// CLASSIFICATION: COMMUNITY
// Filename: mbox_random_ops.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

use std::sync::Arc;

use mifmbox::{MailboxPool, MboxError, MboxHandle, PoolLayout, StaticRegion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn random_sequences_hold_invariants() {
    let iterations = std::env::var("MIFMBOX_FUZZ_ITERS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(2048);
    let mut rng = StdRng::seed_from_u64(0x4D42_4F58_u64);

    for capacity in [4usize, 8, 13] {
        let layout = PoolLayout::new(capacity, 4).unwrap();
        let pool = MailboxPool::new(layout, Arc::new(StaticRegion::mapped(0x8000))).unwrap();
        pool.init().unwrap();
        let mut live: Vec<MboxHandle> = Vec::new();

        for _ in 0..iterations {
            let before = pool.snapshot().unwrap();
            match rng.gen_range(0..4) {
                0 | 1 => {
                    let n = rng.gen_range(1..=capacity);
                    match pool.alloc_mboxes(n) {
                        Ok(h) => {
                            assert!(h.indices().all(|i| !before.bitmap.test(i)));
                            live.push(h);
                        }
                        Err(MboxError::ResourceExhausted { .. }) => {
                            assert_eq!(before.bitmap.find_next_zero_area(0, n), None);
                            assert_eq!(pool.snapshot().unwrap(), before);
                        }
                        Err(e) => panic!("unexpected alloc error: {e}"),
                    }
                }
                2 if !live.is_empty() => {
                    let h = live.swap_remove(rng.gen_range(0..live.len()));
                    pool.free_handle(h).unwrap();
                }
                _ => {
                    let first = rng.gen_range(0..capacity);
                    let n = rng.gen_range(1..=capacity - first);
                    let owned = before.bitmap.range_is_set(first, n);
                    let res = pool.free_mboxes(first, n);
                    if owned {
                        res.unwrap();
                        // the freed range may have spanned several handles
                        live.retain(|h| h.indices().all(|i| i < first || i >= first + n));
                        assert!(live
                            .iter()
                            .all(|h| h.indices().all(|i| pool.snapshot().unwrap().bitmap.test(i))));
                    } else {
                        assert!(matches!(res, Err(MboxError::DoubleFreeOrInvalidRange { .. })));
                        assert_eq!(pool.snapshot().unwrap(), before);
                    }
                }
            }
            let after = pool.snapshot().unwrap();
            assert_eq!(after.free, capacity - after.bitmap.count_ones());
        }
    }
}
