//! Overlap resolution for a newly placed card.
//!
//! The resolver tries [`Direction::PRIORITY`] in order and returns the first
//! direction whose rectangle is disjoint from every card placed before it. When
//! every direction collides it falls back to [`Direction::FALLBACK`] and accepts
//! the overlap. Cards are only tested against earlier cards, so the outcome
//! depends on input order.
//!
//! This is pure geometry: it neither mutates the card nor touches the registry.
use crate::layout::card::{CardRect, PlacedCard};
use crate::layout::Direction;

/// Outcome of resolving a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub direction: Direction,
    /// `false` when every candidate collided and the fallback was used.
    pub collision_free: bool,
    /// Number of candidate directions tested.
    pub attempts: usize,
}

/// Direction for `card` given the cards already placed in this pass.
pub fn resolve(card: &PlacedCard, placed: &[PlacedCard]) -> Direction {
    resolve_with_outcome(card, placed).direction
}

pub fn resolve_with_outcome(card: &PlacedCard, placed: &[PlacedCard]) -> Resolution {
    for (i, direction) in Direction::PRIORITY.into_iter().enumerate() {
        let candidate = card.bounds_for(direction);
        if !collides_with_any(&candidate, placed) {
            return Resolution {
                direction,
                collision_free: true,
                attempts: i + 1,
            };
        }
    }

    Resolution {
        direction: Direction::FALLBACK,
        collision_free: false,
        attempts: Direction::PRIORITY.len(),
    }
}

/// Whether `rect` overlaps the current bounds of any card in `placed`.
pub fn collides_with_any(rect: &CardRect, placed: &[PlacedCard]) -> bool {
    placed.iter().any(|other| rect.overlaps(&other.bounds()))
}

/// Number of overlapping pairs among `cards` in their current directions.
pub fn count_overlaps(cards: &[PlacedCard]) -> usize {
    let mut count = 0;
    for (i, a) in cards.iter().enumerate() {
        let ra = a.bounds();
        count += cards[i + 1..]
            .iter()
            .filter(|b| ra.overlaps(&b.bounds()))
            .count();
    }
    count
}
