//! Card placement pipeline: project spots, place cards, resolve overlaps, wire selection.
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod card;
pub mod engine;
pub mod events;
pub mod registry;
pub mod resolver;
pub mod selection;

/// Side of the anchor the card body extends toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Candidate directions in the order the resolver tries them.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Used when no candidate is collision free.
    pub const FALLBACK: Direction = Direction::Up;

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Viewport-relative position of a spot, in percent of width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Anchor {
    pub x_percent: f64,
    pub y_percent: f64,
}

impl Anchor {
    pub const ORIGIN: Anchor = Anchor::new(0.0, 0.0);

    pub const fn new(x_percent: f64, y_percent: f64) -> Self {
        Self {
            x_percent,
            y_percent,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x_percent.is_finite() && self.y_percent.is_finite()
    }

    /// Whether the anchor falls inside the viewport.
    pub fn is_on_screen(&self) -> bool {
        (0.0..=100.0).contains(&self.x_percent) && (0.0..=100.0).contains(&self.y_percent)
    }
}

/// Identity of a card within one layout pass.
///
/// The generation changes on every pass, so ids handed out before a resize do
/// not resolve against the rebuilt cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId {
    pub generation: u32,
    pub index: u32,
}

impl CardId {
    pub const fn new(generation: u32, index: u32) -> Self {
        Self { generation, index }
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card {}:{}", self.generation, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_starts_with_fallback() {
        assert_eq!(Direction::PRIORITY[0], Direction::FALLBACK);
        assert_eq!(Direction::default(), Direction::Up);
    }

    #[test]
    fn direction_names_match_card_classes() {
        let names: Vec<_> = Direction::PRIORITY.iter().map(|d| d.to_string()).collect();
        assert_eq!(names, ["up", "right", "down", "left"]);
    }

    #[test]
    fn on_screen_is_inclusive() {
        assert!(Anchor::new(0.0, 100.0).is_on_screen());
        assert!(!Anchor::new(-0.1, 50.0).is_on_screen());
        assert!(!Anchor::new(50.0, 120.0).is_on_screen());
    }
}
