#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use widemap::{BoundSpec, BytesCodec, MemoryStore, PartitionId, Slice, WideMap};

// Fuzz target for the scan pipeline.
// Builds arbitrary bound shapes over a small seeded partition and checks
// the invariants every scan must hold: bounded count, monotonic order,
// and boundary respect.
fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }

    let start = (data[0] & 0x0f) as u64;
    let end = (data[1] & 0x0f) as u64;
    let start_inclusive = data[2] & 1 == 1;
    let end_inclusive = data[3] & 1 == 1;
    let reverse = data[4] & 1 == 1;
    let count = (data[5] as usize) % 32 + 1;
    let page_size = (data[6] as usize) % 7 + 1;
    let unbounded_start = data[7] & 1 == 1;

    let spec = match BoundSpec::normalize(
        (!unbounded_start).then(|| Slice::from(start)),
        start_inclusive,
        Some(Slice::from(end)),
        end_inclusive,
        reverse,
        Some(count),
    ) {
        Ok(spec) => spec,
        Err(_) => return,
    };

    let store = Arc::new(MemoryStore::new());
    let partition = PartitionId::new("fuzz");
    let map: WideMap<Slice, BytesCodec> = WideMap::with_options(
        store,
        partition,
        BytesCodec,
        widemap::MapOptions {
            page_size,
            default_ttl: None,
        },
    );
    for i in 0u64..16 {
        map.insert(Slice::from(i), &Slice::from(vec![i as u8])).unwrap();
    }

    let keys = map
        .find_keys_range(
            spec.start().cloned(),
            spec.start_inclusive(),
            spec.end().cloned(),
            spec.end_inclusive(),
            spec.reverse(),
            count,
        )
        .unwrap();

    assert!(keys.len() <= count);
    for pair in keys.windows(2) {
        if reverse {
            assert!(pair[0] > pair[1]);
        } else {
            assert!(pair[0] < pair[1]);
        }
    }
    for key in &keys {
        if let Some(s) = spec.start() {
            if reverse {
                assert!(key < s || (key == s && start_inclusive));
            } else {
                assert!(key > s || (key == s && start_inclusive));
            }
        }
        if let Some(e) = spec.end() {
            if reverse {
                assert!(key > e || (key == e && end_inclusive));
            } else {
                assert!(key < e || (key == e && end_inclusive));
            }
        }
    }
});
