// Raw table benches; build with --features bench_internal.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use probe_map::table::{Placement, ProbeTable, Slot};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

const CAPACITY: usize = 1 << 16;
const FILL: usize = (CAPACITY / 3) * 2 - 1;

fn filled_table() -> ProbeTable<u64, u64> {
    let mut t = ProbeTable::with_capacity(CAPACITY);
    for h in lcg(3).take(FILL) {
        t.place_rehashed(h, h, h);
    }
    t
}

fn bench_place_rehashed(c: &mut Criterion) {
    c.bench_function("probe_table_place_rehashed", |b| {
        b.iter_batched(
            || ProbeTable::<u64, u64>::with_capacity(CAPACITY),
            |mut t| {
                for h in lcg(3).take(FILL) {
                    t.place_rehashed(h, h, h);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit(c: &mut Criterion) {
    c.bench_function("probe_table_find_hit", |b| {
        let t = filled_table();
        let hashes: Vec<u64> = lcg(3).take(FILL).collect();
        let mut it = hashes.iter().cycle();
        b.iter(|| {
            let h = *it.next().unwrap();
            black_box(t.find(h, &h));
        })
    });
}

fn bench_locate_vacant(c: &mut Criterion) {
    c.bench_function("probe_table_locate_vacant", |b| {
        let t = filled_table();
        let mut misses = lcg(0xdead_beef);
        b.iter(|| {
            let h = misses.next().unwrap();
            match t.locate(h, &h) {
                Placement::Vacant(index) => {
                    black_box(matches!(t.slot(index), Slot::Empty));
                }
                other => {
                    black_box(other);
                }
            }
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_place_rehashed, bench_find_hit, bench_locate_vacant
}
criterion_main!(benches);
