//! Fixed, non-interactive Web Mercator map view.
//!
//! Mirrors what a slippy-map library reports for a map whose center and zoom
//! never change: spherical Mercator world pixels at `256 * 2^zoom`, offset so the
//! view center sits in the middle of the viewport.
use std::f64::consts::PI;

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::{LatLng, ViewState};

pub const EARTH_RADIUS_M: f64 = 6_378_137.0;
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;
pub const TILE_SIZE_PX: f64 = 256.0;

/// Map view state: center, zoom and viewport pixel size.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapView {
    pub center: LatLng,
    pub zoom: f64,
    pub size_px: DVec2,
}

impl MapView {
    pub fn new(center: LatLng, zoom: f64, size_px: impl Into<mint::Vector2<f64>>) -> Self {
        Self {
            center,
            zoom,
            size_px: DVec2::from(size_px.into()),
        }
    }

    /// Same center and zoom in a viewport of a different size.
    pub fn with_size(mut self, size_px: impl Into<mint::Vector2<f64>>) -> Self {
        self.size_px = DVec2::from(size_px.into());
        self
    }

    pub fn resize(&mut self, size_px: impl Into<mint::Vector2<f64>>) {
        self.size_px = DVec2::from(size_px.into());
    }

    pub fn validate(&self) -> Result<()> {
        if !self.center.is_finite() {
            return Err(Error::InvalidViewState("center must be finite".into()));
        }
        if !self.zoom.is_finite() {
            return Err(Error::InvalidViewState("zoom must be finite".into()));
        }
        if !self.world_scale().is_finite() || self.world_scale() <= 0.0 {
            return Err(Error::InvalidViewState(format!(
                "zoom {} is out of range",
                self.zoom
            )));
        }
        super::validate_view_state(self)
    }

    /// World width in pixels at the current zoom.
    pub fn world_scale(&self) -> f64 {
        TILE_SIZE_PX * self.zoom.exp2()
    }

    /// World pixel coordinate of `coord` at the current zoom.
    pub fn world_pixel(&self, coord: LatLng) -> DVec2 {
        let scale = self.world_scale();
        let projected = spherical_mercator(coord);
        let k = 0.5 / (PI * EARTH_RADIUS_M);
        DVec2::new(
            scale * (k * projected.x + 0.5),
            scale * (-k * projected.y + 0.5),
        )
    }
}

impl ViewState for MapView {
    fn latlng_to_container_point(&self, coord: LatLng) -> DVec2 {
        self.world_pixel(coord) - self.world_pixel(self.center) + self.size_px * 0.5
    }

    fn size(&self) -> DVec2 {
        self.size_px
    }

    fn validate(&self) -> Result<()> {
        MapView::validate(self)
    }
}

/// Spherical Mercator meters, latitude clamped to the square-world limit.
fn spherical_mercator(coord: LatLng) -> DVec2 {
    let d = PI / 180.0;
    let lat = coord.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let sin = (lat * d).sin();
    DVec2::new(
        EARTH_RADIUS_M * coord.lng * d,
        EARTH_RADIUS_M * ((1.0 + sin) / (1.0 - sin)).ln() / 2.0,
    )
}
