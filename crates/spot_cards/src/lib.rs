#![forbid(unsafe_code)]
//! spot_cards: info-card placement and overlap resolution for spots on a static map view.
//!
//! Modules:
//! - spot: spot records and the page's spot catalog
//! - geo: coordinates, the map view state, and coordinate to viewport-percent projection
//! - layout: card geometry, registry, overlap resolver, layout engine, selection, events
//!
//! For a runnable walkthrough, see the `spot_cards_examples` crate.
pub mod error;
pub mod geo;
pub mod layout;
pub mod spot;

/// Convenient re-exports for common types. Import with `use spot_cards::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::geo::{project, LatLng, MapView, ViewState};
    pub use crate::layout::card::{
        CardMeasurer, CardRect, FixedCardSize, PlacedCard, TextCardMeasurer,
    };
    pub use crate::layout::engine::{
        CardHost, InvalidSpotPolicy, LayoutConfig, LayoutContext, LayoutEngine, LayoutSummary,
        PassTrigger,
    };
    pub use crate::layout::events::{
        EventSink, FnSink, LayoutEvent, LayoutEventKind, MultiSink, VecSink,
    };
    pub use crate::layout::registry::CardRegistry;
    pub use crate::layout::resolver::{count_overlaps, resolve, resolve_with_outcome, Resolution};
    pub use crate::layout::selection::{DetailView, SelectionDispatcher};
    pub use crate::layout::{Anchor, CardId, Direction};
    pub use crate::spot::{MenuItem, Spot, SpotCatalog, SpotId};
}
