use std::time::Duration;

use criterion::{Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spot_cards::prelude::{LatLng, MapView, Spot};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub const CENTER: LatLng = LatLng::new(36.0619, 136.2235);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

pub fn view(width: f64, height: f64) -> MapView {
    MapView::new(CENTER, 16.0, [width, height])
}

/// `count` spots scattered within `spread` degrees of [`CENTER`].
pub fn make_spots(count: usize, spread: f64, seed: u64) -> Vec<Spot> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let dlat = (unit(&mut rng) - 0.5) * spread;
            let dlng = (unit(&mut rng) - 0.5) * spread;
            Spot::new(i as u64, CENTER.lat + dlat, CENTER.lng + dlng, format!("Spot {i}"))
        })
        .collect()
}

fn unit(rng: &mut impl Rng) -> f64 {
    f64::from(rng.next_u32()) / (f64::from(u32::MAX) + 1.0)
}
