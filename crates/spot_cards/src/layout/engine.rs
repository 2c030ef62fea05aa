//! Layout engine: full clear-and-rebuild passes over the page's spots.
//!
//! A pass clears the registry, the selection bindings and the host, projects
//! every spot in input order, asks the resolver for a direction against the
//! cards placed earlier in the same pass, attaches the card to the host,
//! registers it and binds its selection. The same pass runs at load and on
//! every viewport resize.
use glam::{DVec2, Vec2};
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::{project, ViewState};
use crate::layout::card::{CardMeasurer, FixedCardSize, PlacedCard};
use crate::layout::events::{EventSink, LayoutEvent, LayoutEventKind};
use crate::layout::registry::CardRegistry;
use crate::layout::resolver::resolve_with_outcome;
use crate::layout::selection::{DetailView, SelectionDispatcher};
use crate::layout::{Anchor, CardId};
use crate::spot::{Spot, SpotCatalog, SpotId};

pub const DEFAULT_ANCHOR_GAP_PX: f32 = 10.0;

/// What to do with a spot whose coordinate or name is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InvalidSpotPolicy {
    /// Render the card anyway: empty label, and a missing coordinate anchors
    /// at the viewport origin.
    #[default]
    Degrade,
    /// Leave the spot out of the pass.
    Skip,
}

/// Configuration for layout passes.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutConfig {
    /// Pixels between the anchor and the near edge of the card body.
    pub anchor_gap: f32,
    pub invalid_spot_policy: InvalidSpotPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            anchor_gap: DEFAULT_ANCHOR_GAP_PX,
            invalid_spot_policy: InvalidSpotPolicy::Degrade,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_gap(mut self, anchor_gap: f32) -> Self {
        self.anchor_gap = anchor_gap;
        self
    }

    pub fn with_invalid_spot_policy(mut self, policy: InvalidSpotPolicy) -> Self {
        self.invalid_spot_policy = policy;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.anchor_gap.is_finite() || self.anchor_gap < 0.0 {
            return Err(Error::InvalidConfig(
                "anchor_gap must be finite and >= 0".into(),
            ));
        }
        Ok(())
    }
}

/// Why a pass ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassTrigger {
    #[default]
    Load,
    Resize,
}

/// Counts for a completed pass.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSummary {
    pub generation: u32,
    pub trigger: PassTrigger,
    pub viewport_px: DVec2,
    /// Cards attached, including degraded ones.
    pub placed: usize,
    pub skipped: usize,
    pub degraded: usize,
    /// Cards left in the fallback direction because every candidate collided.
    pub unresolved: usize,
}

/// Render tree the cards are attached to (the card layer on the page).
pub trait CardHost {
    /// Removes every card attached by earlier passes.
    fn clear_cards(&mut self);

    fn attach_card(&mut self, card: &PlacedCard, spot: &Spot);
}

/// A host that renders nothing.
impl CardHost for () {
    #[inline]
    fn clear_cards(&mut self) {}

    #[inline]
    fn attach_card(&mut self, _card: &PlacedCard, _spot: &Spot) {}
}

/// Per-pass state handed to projection and card construction.
pub struct LayoutContext<'a> {
    pub view: &'a dyn ViewState,
    pub viewport_px: Vec2,
    pub config: &'a LayoutConfig,
    pub measurer: &'a dyn CardMeasurer,
    pub generation: u32,
}

impl<'a> LayoutContext<'a> {
    pub fn new(
        view: &'a dyn ViewState,
        config: &'a LayoutConfig,
        measurer: &'a dyn CardMeasurer,
        generation: u32,
    ) -> Self {
        Self {
            view,
            viewport_px: view.size().as_vec2(),
            config,
            measurer,
            generation,
        }
    }

    /// Anchor for `spot`; spots without a usable coordinate sit at the origin.
    pub fn anchor_for(&self, spot: &Spot) -> Anchor {
        if spot.has_coordinate() {
            project(spot.coordinate(), self.view)
        } else {
            Anchor::ORIGIN
        }
    }

    /// Card for `spot` at registry position `index`, facing the default direction.
    pub fn card_for(&self, index: u32, spot: &Spot) -> PlacedCard {
        PlacedCard::new(
            CardId::new(self.generation, index),
            spot.id.clone(),
            self.anchor_for(spot),
            self.viewport_px,
            self.measurer.measure(spot),
            self.config.anchor_gap,
        )
    }
}

/// Owns the page's spots and the cards of the latest pass.
pub struct LayoutEngine {
    spots: SpotCatalog,
    config: LayoutConfig,
    measurer: Box<dyn CardMeasurer>,
    registry: CardRegistry,
    dispatcher: SelectionDispatcher,
    generation: u32,
    resize_pending: bool,
    last_summary: Option<LayoutSummary>,
}

impl LayoutEngine {
    pub fn try_new(spots: Vec<Spot>, config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(spots, config))
    }

    pub fn new(spots: Vec<Spot>, config: LayoutConfig) -> Self {
        debug_assert!(
            config.anchor_gap.is_finite() && config.anchor_gap >= 0.0,
            "anchor_gap must be finite and >= 0"
        );

        let spots = SpotCatalog::new(spots);
        if spots.duplicate_count() > 0 {
            warn!(
                "{} spot(s) repeat an earlier id; lookups by id resolve to the first.",
                spots.duplicate_count()
            );
        }
        let capacity = spots.len();
        Self {
            spots,
            config,
            measurer: Box::new(FixedCardSize::default()),
            registry: CardRegistry::with_capacity(capacity),
            dispatcher: SelectionDispatcher::new(),
            generation: 0,
            resize_pending: false,
            last_summary: None,
        }
    }

    /// Replaces the card measurer used by subsequent passes.
    pub fn with_measurer<M: CardMeasurer + 'static>(mut self, measurer: M) -> Self {
        self.measurer = Box::new(measurer);
        self
    }

    pub fn spots(&self) -> &SpotCatalog {
        &self.spots
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn last_summary(&self) -> Option<&LayoutSummary> {
        self.last_summary.as_ref()
    }

    pub fn card_for_spot(&self, spot_id: &SpotId) -> Option<&PlacedCard> {
        self.registry.find_by_spot(spot_id)
    }

    /// Initial pass once the map is ready.
    pub fn layout(
        &mut self,
        view: Option<&dyn ViewState>,
        host: &mut dyn CardHost,
        sink: &mut dyn EventSink,
    ) -> Result<LayoutSummary> {
        self.run_pass(PassTrigger::Load, view, host, sink)
    }

    /// Rebuilds every card for the resized viewport.
    pub fn on_resize(
        &mut self,
        view: Option<&dyn ViewState>,
        host: &mut dyn CardHost,
        sink: &mut dyn EventSink,
    ) -> Result<LayoutSummary> {
        self.run_pass(PassTrigger::Resize, view, host, sink)
    }

    /// Marks the layout stale; the next [`LayoutEngine::flush_resize`] rebuilds once.
    pub fn request_resize(&mut self) {
        self.resize_pending = true;
    }

    pub fn resize_pending(&self) -> bool {
        self.resize_pending
    }

    /// Runs one resize pass if any resize was requested since the last flush.
    pub fn flush_resize(
        &mut self,
        view: Option<&dyn ViewState>,
        host: &mut dyn CardHost,
        sink: &mut dyn EventSink,
    ) -> Result<Option<LayoutSummary>> {
        if !self.resize_pending {
            return Ok(None);
        }
        self.resize_pending = false;
        self.on_resize(view, host, sink).map(Some)
    }

    /// Forwards an activation of `card` to `detail`.
    pub fn activate(
        &self,
        card: CardId,
        detail: &mut dyn DetailView,
        sink: &mut dyn EventSink,
    ) -> Result<()> {
        self.dispatcher.dispatch(card, &self.spots, detail, sink)
    }

    fn run_pass(
        &mut self,
        trigger: PassTrigger,
        view: Option<&dyn ViewState>,
        host: &mut dyn CardHost,
        sink: &mut dyn EventSink,
    ) -> Result<LayoutSummary> {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        self.resize_pending = false;

        self.registry.clear();
        self.dispatcher.unbind_all();
        self.last_summary = None;
        host.clear_cards();

        let view = match view {
            Some(view) => view,
            None => return Err(self.abort(Error::ViewStateUnavailable, sink)),
        };
        if let Err(e) = view.validate() {
            return Err(self.abort(e, sink));
        }

        if sink.wants(LayoutEventKind::PassStarted) {
            sink.send(LayoutEvent::PassStarted {
                generation,
                trigger,
                spot_count: self.spots.len(),
            });
        }

        let ctx = LayoutContext::new(view, &self.config, self.measurer.as_ref(), generation);
        let mut summary = LayoutSummary {
            generation,
            trigger,
            viewport_px: view.size(),
            ..Default::default()
        };

        for (position, spot) in self.spots.iter().enumerate() {
            if let Some(reason) = invalid_reason(spot) {
                match self.config.invalid_spot_policy {
                    InvalidSpotPolicy::Skip => {
                        warn!("Skipping spot '{}': {}.", spot.id, reason);
                        summary.skipped += 1;
                        if sink.wants(LayoutEventKind::SpotSkipped) {
                            sink.send(LayoutEvent::SpotSkipped {
                                spot_id: spot.id.clone(),
                                reason: reason.into(),
                            });
                        }
                        continue;
                    }
                    InvalidSpotPolicy::Degrade => {
                        warn!("Spot '{}' rendered degraded: {}.", spot.id, reason);
                        summary.degraded += 1;
                        if sink.wants(LayoutEventKind::SpotDegraded) {
                            sink.send(LayoutEvent::SpotDegraded {
                                spot_id: spot.id.clone(),
                                reason: reason.into(),
                            });
                        }
                    }
                }
            }

            let index = match card_index(self.registry.len()) {
                Ok(index) => index,
                Err(e) => return Err(self.abandon(e, host, sink)),
            };
            let mut card = ctx.card_for(index, spot);
            if spot.has_coordinate() && !card.anchor.is_finite() {
                let e = Error::InvalidViewState(format!(
                    "spot '{}' projects to a non-finite anchor",
                    spot.id
                ));
                return Err(self.abandon(e, host, sink));
            }
            let outcome = resolve_with_outcome(&card, self.registry.all());
            card.direction = outcome.direction;
            if !outcome.collision_free {
                summary.unresolved += 1;
                debug!(
                    "Spot '{}' collides in every direction; keeping {}.",
                    spot.id, card.direction
                );
            }

            host.attach_card(&card, spot);
            if sink.wants(LayoutEventKind::CardPlaced) {
                sink.send(LayoutEvent::CardPlaced {
                    card: card.id,
                    spot_id: spot.id.clone(),
                    anchor: card.anchor,
                    direction: card.direction,
                    collision_free: outcome.collision_free,
                });
            }
            let card_id = card.id;
            self.registry.add(card);
            self.dispatcher.bind(card_id, position, spot.id.clone());
            summary.placed += 1;
        }

        info!(
            "Layout pass {} ({:?}): {} card(s) in {}x{} px, {} skipped, {} unresolved.",
            generation,
            trigger,
            summary.placed,
            summary.viewport_px.x,
            summary.viewport_px.y,
            summary.skipped,
            summary.unresolved,
        );
        if sink.wants(LayoutEventKind::PassFinished) {
            sink.send(LayoutEvent::PassFinished {
                summary: summary.clone(),
            });
        }
        self.last_summary = Some(summary.clone());
        Ok(summary)
    }

    /// Drops the cards placed so far in this pass, then aborts it.
    fn abandon(
        &mut self,
        err: Error,
        host: &mut dyn CardHost,
        sink: &mut dyn EventSink,
    ) -> Error {
        self.registry.clear();
        self.dispatcher.unbind_all();
        host.clear_cards();
        self.abort(err, sink)
    }

    fn abort(&self, err: Error, sink: &mut dyn EventSink) -> Error {
        warn!("Layout pass {} aborted: {}.", self.generation, err);
        if sink.wants(LayoutEventKind::PassAborted) {
            sink.send(LayoutEvent::PassAborted {
                generation: self.generation,
                message: err.to_string(),
            });
        }
        err
    }
}

/// Card index for registry position `position`.
fn card_index(position: usize) -> Result<u32> {
    u32::try_from(position).map_err(|_| {
        Error::InvalidConfig(format!("card index {position} does not fit in a card id"))
    })
}

fn invalid_reason(spot: &Spot) -> Option<&'static str> {
    match (spot.has_coordinate(), spot.name.is_empty()) {
        (false, true) => Some("missing coordinate and name"),
        (false, false) => Some("missing coordinate"),
        (true, true) => Some("missing name"),
        (true, false) => None,
    }
}
