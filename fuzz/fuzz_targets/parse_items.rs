#![no_main]

use libfuzzer_sys::fuzz_target;
use timeline_core::model::ingest::{parse_items, to_json};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(items) = parse_items(text) else {
        return;
    };
    for item in &items {
        assert!(item.start() <= item.end());
    }
    let json = to_json(&items).expect("valid items serialize");
    assert_eq!(parse_items(&json).expect("serialized items reparse"), items);
});
