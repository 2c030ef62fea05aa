//! Geographic coordinates and the map view state the layout engine projects through.
use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod mercator;
pub mod projector;

pub use mercator::MapView;
pub use projector::{project, validate_view_state};

/// Geographic coordinate in decimal degrees.
///
/// Deserializes from either `{"lat": .., "lng": ..}` or a `[lat, lng]` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "LatLngRepr"))]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(untagged)]
enum LatLngRepr {
    Pair([f64; 2]),
    Fields { lat: f64, lng: f64 },
}

#[cfg(feature = "serde")]
impl From<LatLngRepr> for LatLng {
    fn from(repr: LatLngRepr) -> Self {
        match repr {
            LatLngRepr::Pair(pair) => pair.into(),
            LatLngRepr::Fields { lat, lng } => Self { lat, lng },
        }
    }
}

/// Read-only view of the map the cards are laid over.
///
/// Implemented by [`MapView`]; hosts with their own renderer can implement it
/// directly.
pub trait ViewState {
    /// Pixel position of `coord` relative to the viewport's top-left corner.
    fn latlng_to_container_point(&self, coord: LatLng) -> DVec2;

    /// Current viewport size in pixels.
    fn size(&self) -> DVec2;

    /// Checks that the view can project coordinates; a layout pass aborts otherwise.
    fn validate(&self) -> Result<()> {
        validate_view_state(self)
    }
}

impl<V: ViewState + ?Sized> ViewState for &V {
    fn latlng_to_container_point(&self, coord: LatLng) -> DVec2 {
        (**self).latlng_to_container_point(coord)
    }

    fn size(&self) -> DVec2 {
        (**self).size()
    }

    fn validate(&self) -> Result<()> {
        (**self).validate()
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn latlng_reads_pairs_and_fields() {
        let pair: LatLng = serde_json::from_str("[36.0619, 136.2235]").expect("pair");
        let fields: LatLng =
            serde_json::from_str(r#"{"lat":36.0619,"lng":136.2235}"#).expect("fields");
        assert_eq!(pair, LatLng::new(36.0619, 136.2235));
        assert_eq!(pair, fields);
    }
}
