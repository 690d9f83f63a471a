#![no_main]

use libfuzzer_sys::fuzz_target;
use lrumap::clock::ManualClock;
use lrumap::policy::{HitCountEnabled, LockNone, LogNone, TimestampAll};
use lrumap::LruMap;

type Map = LruMap<u8, u16, LockNone, TimestampAll<ManualClock>, HitCountEnabled, LogNone>;

// Fuzz arbitrary operation sequences on a fully featured LruMap
//
// First byte picks the capacity; then each (op, key) byte pair drives one
// insert, find, exists, erase or clear. Structure, stats and the recency
// audit are checked after every step.
fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(first % 32) + 1;
    let clock = ManualClock::new(0);
    let mut map = Map::with_policies(capacity, TimestampAll::with_clock(clock.clone()), LogNone)
        .unwrap();

    for pair in rest.chunks_exact(2) {
        let (op, key) = (pair[0], pair[1]);
        clock.advance(i64::from(op >> 4));
        let before = map.stats();

        match op % 5 {
            0 => {
                let value = u16::from(key) * 5;
                map.insert(key, value);
                assert_eq!(map.iter().next().map(|e| *e.key()), Some(key));
                assert_eq!(map.peek(&key), Some(&value));
            }
            1 => {
                let present = map.exists(&key);
                let found = map.find(&key).is_some();
                assert_eq!(present, found);
                if found {
                    assert_eq!(map.recency_rank(&key), Some(0));
                }
            }
            2 => {
                let size = map.size();
                let present = map.exists(&key);
                map.erase(&key);
                assert!(!map.exists(&key));
                assert_eq!(map.size(), size - usize::from(present));
            }
            3 => {
                map.clear();
                assert_eq!(map.size(), 0);
            }
            _ => {
                let _ = map.render();
            }
        }

        let after = map.stats();
        assert!(after.num_find_ok <= after.num_find);
        assert!(after.num_overflow <= after.num_insert);
        assert!(after.num_insert >= before.num_insert);
        assert!(after.num_clear >= before.num_clear);
        assert!(map.size() <= map.capacity());
        assert!(map.valid());
        assert!(map.check_invariants().is_ok());
    }
});
