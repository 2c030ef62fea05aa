//! Event types and sinks for observing layout passes and card activations.
//!
//! This module defines [`LayoutEvent`] and a set of sinks to emit, collect, or
//! forward events while [`crate::layout::engine::LayoutEngine`] rebuilds cards
//! or dispatches a selection. Click metrics hook in here: every activation
//! produces a [`LayoutEvent::CardActivated`].
use crate::layout::engine::{LayoutSummary, PassTrigger};
use crate::layout::{Anchor, CardId, Direction};
use crate::spot::SpotId;

/// Describes events emitted by layout operations.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum LayoutEvent {
    /// Emitted when a layout pass starts, after the previous cards were cleared.
    PassStarted {
        generation: u32,
        trigger: PassTrigger,
        spot_count: usize,
    },

    /// Emitted for each card attached to the host.
    CardPlaced {
        card: CardId,
        spot_id: SpotId,
        anchor: Anchor,
        direction: Direction,
        /// `false` when every direction collided and the fallback was kept.
        collision_free: bool,
    },

    /// A spot with unusable fields was left out of the pass.
    SpotSkipped { spot_id: SpotId, reason: String },

    /// A spot with unusable fields was rendered as a degraded card.
    SpotDegraded { spot_id: SpotId, reason: String },

    /// Emitted when a pass placed all its cards.
    PassFinished { summary: LayoutSummary },

    /// Emitted when a pass was aborted before placing any card.
    PassAborted { generation: u32, message: String },

    /// Emitted after a card activation was forwarded to the detail view.
    CardActivated { card: CardId, spot_id: SpotId },
}

impl LayoutEvent {
    pub fn kind(&self) -> LayoutEventKind {
        match self {
            LayoutEvent::PassStarted { .. } => LayoutEventKind::PassStarted,
            LayoutEvent::CardPlaced { .. } => LayoutEventKind::CardPlaced,
            LayoutEvent::SpotSkipped { .. } => LayoutEventKind::SpotSkipped,
            LayoutEvent::SpotDegraded { .. } => LayoutEventKind::SpotDegraded,
            LayoutEvent::PassFinished { .. } => LayoutEventKind::PassFinished,
            LayoutEvent::PassAborted { .. } => LayoutEventKind::PassAborted,
            LayoutEvent::CardActivated { .. } => LayoutEventKind::CardActivated,
        }
    }
}

/// Discriminant of [`LayoutEvent`], used by sinks to filter what they receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutEventKind {
    PassStarted,
    CardPlaced,
    SpotSkipped,
    SpotDegraded,
    PassFinished,
    PassAborted,
    CardActivated,
}

/// A generic event sink that accepts [`LayoutEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: LayoutEvent);

    /// Whether events of `kind` should be built at all.
    fn wants(&self, _kind: LayoutEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: LayoutEvent) {}

    #[inline]
    fn wants(&self, _kind: LayoutEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<LayoutEvent>,
    only: Option<Vec<LayoutEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            only: None,
        }
    }

    /// Collects only events whose kind is listed.
    pub fn only(kinds: impl IntoIterator<Item = LayoutEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<LayoutEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[LayoutEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn count(&self, kind: LayoutEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: LayoutEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: LayoutEvent) {
        let kind = event.kind();
        let targets: Vec<usize> = (0..self.sinks.len())
            .filter(|&i| self.sinks[i].wants(kind))
            .collect();
        let Some((&last, rest)) = targets.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: LayoutEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
