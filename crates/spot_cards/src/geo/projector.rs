//! Coordinate to viewport-percentage projection.
use crate::error::{Error, Result};
use crate::geo::{LatLng, ViewState};
use crate::layout::Anchor;

/// Checks that `view` reports a usable viewport size.
pub fn validate_view_state<V: ViewState + ?Sized>(view: &V) -> Result<()> {
    let size = view.size();
    if !size.is_finite() {
        return Err(Error::InvalidViewState(
            "viewport size must be finite".into(),
        ));
    }
    if size.x <= 0.0 || size.y <= 0.0 {
        return Err(Error::InvalidViewState(format!(
            "viewport size must be > 0 in both components, got {}x{}",
            size.x, size.y
        )));
    }
    Ok(())
}

/// Projects `coord` to a position in percent of the viewport width and height.
///
/// Values are not clipped: off-screen coordinates yield percentages outside
/// `0..=100`. The caller must have checked the view with
/// [`validate_view_state`]; a zero-sized viewport yields non-finite output.
pub fn project<V: ViewState + ?Sized>(coord: LatLng, view: &V) -> Anchor {
    let point = view.latlng_to_container_point(coord);
    let size = view.size();
    Anchor::new(point.x / size.x * 100.0, point.y / size.y * 100.0)
}
