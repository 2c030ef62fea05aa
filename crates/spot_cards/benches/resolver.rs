mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use spot_cards::prelude::{
    project, resolve, Anchor, CardId, Direction, FixedCardSize, PlacedCard, SpotId,
};

fn placed_cards(n: usize, seed: u64) -> Vec<PlacedCard> {
    let view = common::view(1280.0, 800.0);
    let viewport = Vec2::new(1280.0, 800.0);
    common::make_spots(n, 0.02, seed)
        .iter()
        .enumerate()
        .map(|(i, spot)| {
            PlacedCard::new(
                CardId::new(0, i as u32),
                spot.id.clone(),
                project(spot.coordinate(), &view),
                viewport,
                FixedCardSize::DEFAULT_SIZE,
                10.0,
            )
        })
        .collect()
}

fn resolver_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver/single_card");

    for &n in &[8usize, 64, 256, 1024] {
        let placed = placed_cards(n, 0xDEADBEEF);
        let candidate = PlacedCard::new(
            CardId::new(0, n as u32),
            SpotId::from("candidate"),
            Anchor::new(50.0, 50.0),
            Vec2::new(1280.0, 800.0),
            FixedCardSize::DEFAULT_SIZE,
            10.0,
        );
        group.throughput(common::elements_throughput(n));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let direction: Direction = resolve(black_box(&candidate), black_box(&placed));
                black_box(direction);
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = resolver_benches
}
criterion_main!(benches);
