//! Property-based invariant tests for layout passes.
//!
//! These hold for any spot sequence and any usable viewport:
//!
//! 1. Cardinality: one card per spot under the degrade policy.
//! 2. Every card faces one of the four candidate directions.
//! 3. Re-running a pass with the same input assigns the same directions.
//! 4. The first spot's card always faces up.
//! 5. A card that is collision free never overlaps an earlier card.
//! 6. Resizing keeps the card count and the pixel offset from the view center.

use glam::DVec2;
use proptest::prelude::*;
use spot_cards::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Container point is (lng, lat) in pixels.
#[derive(Debug)]
struct FlatView {
    size: DVec2,
}

impl ViewState for FlatView {
    fn latlng_to_container_point(&self, coord: LatLng) -> DVec2 {
        DVec2::new(coord.lng, coord.lat)
    }

    fn size(&self) -> DVec2 {
        self.size
    }
}

fn spot_strategy() -> impl Strategy<Value = (f64, f64, String)> {
    (-100.0f64..=900.0, -100.0f64..=900.0, "[a-z]{0,12}")
}

fn spots_strategy(max_len: usize) -> impl Strategy<Value = Vec<Spot>> {
    proptest::collection::vec(spot_strategy(), 0..=max_len).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (lat, lng, name))| Spot::new(i as u64, lat, lng, name))
            .collect()
    })
}

fn viewport_strategy() -> impl Strategy<Value = FlatView> {
    (50.0f64..=2000.0, 50.0f64..=2000.0).prop_map(|(w, h)| FlatView {
        size: DVec2::new(w, h),
    })
}

fn run(spots: Vec<Spot>, view: &FlatView) -> (LayoutEngine, LayoutSummary, VecSink) {
    let mut engine = LayoutEngine::new(spots, LayoutConfig::default());
    let mut sink = VecSink::only([LayoutEventKind::CardPlaced]);
    let summary = engine
        .layout(Some(view), &mut (), &mut sink)
        .expect("valid view");
    (engine, summary, sink)
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Cardinality and direction membership
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn one_card_per_spot(spots in spots_strategy(40), view in viewport_strategy()) {
        let count = spots.len();
        let (engine, summary, _) = run(spots, &view);
        prop_assert_eq!(engine.registry().len(), count);
        prop_assert_eq!(summary.placed, count);
    }

    #[test]
    fn directions_are_candidates(spots in spots_strategy(40), view in viewport_strategy()) {
        let (engine, _, _) = run(spots, &view);
        for card in engine.registry().all() {
            prop_assert!(Direction::PRIORITY.contains(&card.direction));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-4. Determinism and first-direction priority
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_is_deterministic(spots in spots_strategy(30), view in viewport_strategy()) {
        let (mut engine, _, _) = run(spots, &view);
        let first: Vec<_> = engine.registry().all().iter().map(|c| c.direction).collect();
        engine.layout(Some(&view), &mut (), &mut ()).expect("valid view");
        let second: Vec<_> = engine.registry().all().iter().map(|c| c.direction).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn first_card_faces_up(spots in spots_strategy(20), view in viewport_strategy()) {
        let (engine, _, _) = run(spots, &view);
        if let Some(first) = engine.registry().all().first() {
            prop_assert_eq!(first.direction, Direction::Up);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Collision-free cards do not overlap earlier cards
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn collision_free_cards_clear_earlier_cards(
        spots in spots_strategy(30),
        view in viewport_strategy(),
    ) {
        let (engine, summary, sink) = run(spots, &view);
        let cards = engine.registry().all();
        let mut fallbacks = 0;
        for (i, event) in sink.as_slice().iter().enumerate() {
            let LayoutEvent::CardPlaced { collision_free, .. } = event else {
                continue;
            };
            if *collision_free {
                let rect = cards[i].bounds();
                for earlier in &cards[..i] {
                    prop_assert!(!rect.overlaps(&earlier.bounds()));
                }
            } else {
                fallbacks += 1;
                prop_assert_eq!(cards[i].direction, Direction::FALLBACK);
            }
        }
        prop_assert_eq!(fallbacks, summary.unresolved);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Resize rebuild
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resize_keeps_count_and_center_offset(
        spots in spots_strategy(20),
        w in 200.0f64..=1600.0,
        h in 200.0f64..=1200.0,
        scale in 0.25f64..=4.0,
    ) {
        let center = LatLng::new(36.0619, 136.2235);
        let spots: Vec<Spot> = spots
            .into_iter()
            .map(|s| {
                let (lat, lng) = (center.lat + s.lat * 1e-5, center.lng + s.lng * 1e-5);
                Spot::new(s.id, lat, lng, s.name)
            })
            .collect();
        let count = spots.len();
        let view = MapView::new(center, 16.0, [w, h]);
        let mut engine = LayoutEngine::new(spots, LayoutConfig::default());
        engine.layout(Some(&view), &mut (), &mut ()).expect("valid view");
        let before: Vec<PlacedCard> = engine.registry().all().to_vec();

        let resized = view.with_size([w * scale, h * scale]);
        engine.on_resize(Some(&resized), &mut (), &mut ()).expect("valid view");
        prop_assert_eq!(engine.registry().len(), count);

        for (old, new) in before.iter().zip(engine.registry().all()) {
            let old_dx = (old.anchor.x_percent - 50.0) / 100.0 * w;
            let new_dx = (new.anchor.x_percent - 50.0) / 100.0 * w * scale;
            let old_dy = (old.anchor.y_percent - 50.0) / 100.0 * h;
            let new_dy = (new.anchor.y_percent - 50.0) / 100.0 * h * scale;
            prop_assert!((old_dx - new_dx).abs() < 1e-6);
            prop_assert!((old_dy - new_dy).abs() < 1e-6);
        }
    }
}
