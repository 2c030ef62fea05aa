use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spot_cards::prelude::*;
use spot_cards_examples::{init_tracing, PngCardLayer, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let image_size = (1024, 768);
    let center = LatLng::new(36.0619, 136.2235);
    let view = MapView::new(
        center,
        16.0,
        [f64::from(image_size.0), f64::from(image_size.1)],
    );

    // Dense enough that some cards run out of directions.
    let count = 60usize;
    let spread = 0.006;
    let mut rng = StdRng::seed_from_u64(2025);
    let spots: Vec<Spot> = (0..count as u64)
        .map(|i| {
            let lat = center.lat + (unit(&mut rng) - 0.5) * spread;
            let lng = center.lng + (unit(&mut rng) - 0.5) * spread * 1.5;
            Spot::new(i, lat, lng, format!("Spot {i}"))
        })
        .collect();

    let config = LayoutConfig::default().with_anchor_gap(6.0);
    let mut engine =
        LayoutEngine::try_new(spots, config)?.with_measurer(FixedCardSize::new(96.0, 32.0));
    let mut layer = PngCardLayer::new();
    let summary = engine.layout(Some(&view), &mut layer, &mut ())?;

    let overlaps = count_overlaps(engine.registry().all());
    tracing::info!(
        "Placed {} card(s), {} without a free direction, {} overlapping pair(s).",
        summary.placed,
        summary.unresolved,
        overlaps
    );

    let rc = RenderConfig::new(image_size).with_background([220, 228, 214]);
    layer.render_to_png(&rc, "cards-random-crowd.png")?;
    Ok(())
}

fn unit(rng: &mut impl Rng) -> f64 {
    f64::from(rng.next_u32()) / (f64::from(u32::MAX) + 1.0)
}
