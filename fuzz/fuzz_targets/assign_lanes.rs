#![no_main]

use chrono::{Duration, NaiveDate};
use libfuzzer_sys::fuzz_target;
use timeline_core::{TimelineItem, assign_lanes, peak_overlap};

fuzz_target!(|data: &[u8]| {
    let Some(epoch) = NaiveDate::from_ymd_opt(2020, 1, 1) else {
        return;
    };
    let items: Vec<TimelineItem> = data
        .chunks_exact(3)
        .enumerate()
        .filter_map(|(index, chunk)| {
            let offset = u16::from_le_bytes([chunk[0], chunk[1]]) % 512;
            let start = epoch + Duration::days(i64::from(offset));
            let end = start + Duration::days(i64::from(chunk[2] % 64));
            TimelineItem::new(index as i64, start, end, format!("item {index}")).ok()
        })
        .collect();

    let lanes = assign_lanes(&items);
    assert_eq!(lanes.iter().map(|lane| lane.len()).sum::<usize>(), items.len());
    assert_eq!(lanes.len(), peak_overlap(&items));
    for lane in &lanes {
        for pair in lane.items().windows(2) {
            assert!(pair[0].end() < pair[1].start());
        }
    }
});
