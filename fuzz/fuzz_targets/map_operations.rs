#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use widemap::{BytesCodec, MemoryStore, PartitionId, Slice, WideMap};

// Fuzz target for basic map operations.
// Replays an arbitrary insert/get/remove stream and checks the map never
// errors on well-formed input.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let store = Arc::new(MemoryStore::new());
    let map: WideMap<Slice, BytesCodec> =
        WideMap::new(store, PartitionId::new("fuzz_ops"), BytesCodec);

    let mut i = 0;
    while i + 2 < data.len() {
        let op_type = data[i] % 4;
        i += 1;

        let key_len = (data[i] as usize).min(32).min(data.len() - i - 1);
        i += 1;

        if i + key_len > data.len() {
            break;
        }

        let key = Slice::from(&data[i..i + key_len]);
        i += key_len;

        match op_type {
            0 => {
                map.insert(key, &Slice::from("value")).unwrap();
            }
            1 => {
                let _ = map.get(&key).unwrap();
            }
            2 => {
                map.remove(&key).unwrap();
            }
            _ => {
                let _ = map.find_first_n(8).unwrap();
            }
        }
    }
});
