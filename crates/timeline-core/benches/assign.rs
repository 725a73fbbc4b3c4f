use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use timeline_core::lanes::{assign_lanes, peak_overlap};
use timeline_core::model::TimelineItem;

const SIZES: [usize; 4] = [16, 256, 2_048, 16_384];

fn synthetic_items(count: usize, seed: u64) -> Vec<TimelineItem> {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    let horizon = (count as i64 * 3).max(30);

    (0..count)
        .map(|index| {
            let start = base + Duration::days(rng.gen_range(0..horizon));
            let end = start + Duration::days(rng.gen_range(0..21));
            TimelineItem::new(index as i64, start, end, format!("Item {index}")).unwrap()
        })
        .collect()
}

fn bench_assign(c: &mut Criterion) {
    let mut group = c.benchmark_group("lanes.assign");

    for size in SIZES {
        let items = synthetic_items(size, 0x7113_u64 + size as u64);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("assign_lanes", size), &items, |b, items| {
            b.iter(|| black_box(assign_lanes(items)));
        });

        group.bench_with_input(BenchmarkId::new("peak_overlap", size), &items, |b, items| {
            b.iter(|| black_box(peak_overlap(items)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_assign);
criterion_main!(benches);
