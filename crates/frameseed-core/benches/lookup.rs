use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use frameseed_core::rng::Lcg16;
use frameseed_core::timers::{self, count_frames, simulate_timer, TimerKind};

fn bench_frame_lookup(c: &mut Criterion) {
    let _ = timers::tables();
    let mut group = c.benchmark_group("frameseed/timer_frames");

    for kind in TimerKind::ALL {
        group.bench_with_input(BenchmarkId::new("lookup", kind), &kind, |b, &kind| {
            let mut rng = Lcg16::new(0x1234_5678);
            b.iter(|| {
                rng.advance();
                black_box(timers::frames_for_sample(kind, rng.sample()))
            })
        });
        group.bench_with_input(BenchmarkId::new("simulate", kind), &kind, |b, &kind| {
            let mut rng = Lcg16::new(0x1234_5678);
            b.iter(|| {
                rng.advance();
                black_box(count_frames(simulate_timer(&rng, kind)))
            })
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut target = Lcg16::new(0);
    for _ in 0..100_000 {
        target.advance();
    }
    let target = target.state();

    c.bench_function("frameseed/find_index_100k", |b| {
        b.iter(|| frameseed_core::find_index(black_box(target), 1 << 24, |_| {}))
    });
}

criterion_group!(benches, bench_frame_lookup, bench_search);
criterion_main!(benches);
