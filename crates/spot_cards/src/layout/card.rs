//! Placed cards and their on-screen geometry.
//!
//! A card's rectangle is never stored; it is derived from the anchor pixel, the
//! measured card size and the current [`Direction`] whenever a collision test
//! needs it.
use glam::Vec2;

use crate::layout::{Anchor, CardId, Direction};
use crate::spot::{Spot, SpotId};

/// Axis-aligned rectangle in viewport pixels (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl CardRect {
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict disjointness test: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &CardRect) -> bool {
        !(self.max.x <= other.min.x
            || self.min.x >= other.max.x
            || self.max.y <= other.min.y
            || self.min.y >= other.max.y)
    }
}

/// Rendered size of a spot's card in pixels.
pub trait CardMeasurer: Send + Sync {
    fn measure(&self, spot: &Spot) -> Vec2;
}

/// Every card has the same size.
#[derive(Debug, Clone, Copy)]
pub struct FixedCardSize {
    pub size: Vec2,
}

impl FixedCardSize {
    pub const DEFAULT_SIZE: Vec2 = Vec2::new(160.0, 56.0);

    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }
}

impl Default for FixedCardSize {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
        }
    }
}

impl CardMeasurer for FixedCardSize {
    fn measure(&self, _spot: &Spot) -> Vec2 {
        self.size
    }
}

/// Approximates the size of a two-line card (name, category) from glyph counts.
#[derive(Debug, Clone, Copy)]
pub struct TextCardMeasurer {
    pub glyph_advance: f32,
    pub line_height: f32,
    pub padding: Vec2,
    pub min_width: f32,
    pub max_width: f32,
}

impl Default for TextCardMeasurer {
    fn default() -> Self {
        Self {
            glyph_advance: 8.0,
            line_height: 18.0,
            padding: Vec2::new(12.0, 8.0),
            min_width: 64.0,
            max_width: 240.0,
        }
    }
}

impl TextCardMeasurer {
    pub fn with_glyph_advance(mut self, glyph_advance: f32) -> Self {
        self.glyph_advance = glyph_advance;
        self
    }

    pub fn with_width_range(mut self, min_width: f32, max_width: f32) -> Self {
        self.min_width = min_width;
        self.max_width = max_width;
        self
    }
}

impl CardMeasurer for TextCardMeasurer {
    fn measure(&self, spot: &Spot) -> Vec2 {
        // Both lines are always rendered, the meta line may be empty.
        let glyphs = spot
            .name
            .chars()
            .count()
            .max(spot.category_label().chars().count());
        let text_w = glyphs as f32 * self.glyph_advance;
        let width = (text_w + 2.0 * self.padding.x).clamp(self.min_width, self.max_width);
        let height = 2.0 * self.line_height + 2.0 * self.padding.y;
        Vec2::new(width, height)
    }
}

/// A spot's card as placed during one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCard {
    pub id: CardId,
    pub spot_id: SpotId,
    pub anchor: Anchor,
    pub direction: Direction,
    /// Anchor in viewport pixels.
    pub anchor_px: Vec2,
    pub size: Vec2,
    /// Distance between the anchor and the near edge of the card body.
    pub gap: f32,
}

impl PlacedCard {
    /// New card facing the default direction.
    pub fn new(
        id: CardId,
        spot_id: SpotId,
        anchor: Anchor,
        viewport_px: Vec2,
        size: Vec2,
        gap: f32,
    ) -> Self {
        let anchor_px = Vec2::new(
            (anchor.x_percent / 100.0) as f32 * viewport_px.x,
            (anchor.y_percent / 100.0) as f32 * viewport_px.y,
        );
        Self {
            id,
            spot_id,
            anchor,
            direction: Direction::default(),
            anchor_px,
            size,
            gap,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Current on-screen rectangle.
    pub fn bounds(&self) -> CardRect {
        self.bounds_for(self.direction)
    }

    /// Rectangle the card would occupy facing `direction`.
    pub fn bounds_for(&self, direction: Direction) -> CardRect {
        let a = self.anchor_px;
        let Vec2 { x: w, y: h } = self.size;
        let g = self.gap;
        let min = match direction {
            Direction::Up => Vec2::new(a.x - w * 0.5, a.y - g - h),
            Direction::Right => Vec2::new(a.x + g, a.y - h * 0.5),
            Direction::Down => Vec2::new(a.x - w * 0.5, a.y + g),
            Direction::Left => Vec2::new(a.x - g - w, a.y - h * 0.5),
        };
        CardRect::from_min_size(min, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_at(x: f32, y: f32) -> PlacedCard {
        PlacedCard::new(
            CardId::new(0, 0),
            SpotId::from("s"),
            Anchor::new(x as f64, y as f64),
            Vec2::new(100.0, 100.0),
            Vec2::new(20.0, 10.0),
            2.0,
        )
    }

    #[test]
    fn anchor_pixels_scale_with_viewport() {
        let card = PlacedCard::new(
            CardId::new(0, 0),
            SpotId::from("s"),
            Anchor::new(25.0, 50.0),
            Vec2::new(800.0, 600.0),
            Vec2::ONE,
            0.0,
        );
        assert_eq!(card.anchor_px, Vec2::new(200.0, 300.0));
    }

    #[test]
    fn bounds_extend_toward_direction() {
        let card = card_at(50.0, 50.0);
        assert_eq!(
            card.bounds_for(Direction::Up),
            CardRect::from_min_max(Vec2::new(40.0, 38.0), Vec2::new(60.0, 48.0))
        );
        assert_eq!(
            card.bounds_for(Direction::Right),
            CardRect::from_min_max(Vec2::new(52.0, 45.0), Vec2::new(72.0, 55.0))
        );
        assert_eq!(
            card.bounds_for(Direction::Down),
            CardRect::from_min_max(Vec2::new(40.0, 52.0), Vec2::new(60.0, 62.0))
        );
        assert_eq!(
            card.bounds_for(Direction::Left),
            CardRect::from_min_max(Vec2::new(28.0, 45.0), Vec2::new(48.0, 55.0))
        );
    }

    #[test]
    fn bounds_follow_current_direction() {
        let card = card_at(10.0, 10.0).with_direction(Direction::Left);
        assert_eq!(card.bounds(), card.bounds_for(Direction::Left));
        assert_eq!(card.bounds().size(), Vec2::new(20.0, 10.0));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = CardRect::from_min_max(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let right = CardRect::from_min_max(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        let below = CardRect::from_min_max(Vec2::new(0.0, 10.0), Vec2::new(10.0, 20.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
        assert!(!right.overlaps(&a));
    }

    #[test]
    fn intersecting_and_contained_rects_overlap() {
        let a = CardRect::from_min_max(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = CardRect::from_min_max(Vec2::new(5.0, 5.0), Vec2::new(15.0, 15.0));
        let inner = CardRect::from_min_max(Vec2::new(2.0, 2.0), Vec2::new(3.0, 3.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(a.overlaps(&inner));
        assert_eq!(inner.center(), Vec2::new(2.5, 2.5));
    }

    #[test]
    fn text_measurer_grows_with_label_and_clamps() {
        let m = TextCardMeasurer::default();
        let short = m.measure(&Spot::new("a", 0.0, 0.0, "x"));
        let long = m.measure(&Spot::new("b", 0.0, 0.0, "a considerably longer spot name"));
        let huge = m.measure(&Spot::new("c", 0.0, 0.0, "x".repeat(500)));
        assert_eq!(short.x, m.min_width);
        assert!(long.x > short.x);
        assert_eq!(huge.x, m.max_width);
        assert_eq!(short.y, long.y);
    }

    #[test]
    fn text_measurer_uses_category_when_longer() {
        let m = TextCardMeasurer::default().with_width_range(0.0, 1000.0);
        let spot = Spot::new("a", 0.0, 0.0, "ab").with_category("abcdefghij");
        assert_eq!(m.measure(&spot).x, 10.0 * 8.0 + 24.0);
    }

    #[test]
    fn fixed_size_ignores_spot() {
        let m = FixedCardSize::default();
        assert_eq!(
            m.measure(&Spot::new("a", 0.0, 0.0, "anything")),
            FixedCardSize::DEFAULT_SIZE
        );
    }
}
