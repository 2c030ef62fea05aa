//! Ordered storage for the cards of the current layout pass.
use crate::layout::CardId;
use crate::layout::card::PlacedCard;
use crate::spot::SpotId;

/// Cards in insertion order. Index order is stacking order: later cards are
/// drawn on top of earlier ones.
#[derive(Debug, Default)]
pub struct CardRegistry {
    cards: Vec<PlacedCard>,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            cards: Vec::with_capacity(cap),
        }
    }

    /// Removes every card. Calling it on an empty registry is a no-op.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn add(&mut self, card: PlacedCard) {
        self.cards.push(card);
    }

    pub fn all(&self) -> &[PlacedCard] {
        &self.cards
    }

    pub fn get(&self, id: CardId) -> Option<&PlacedCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn find_by_spot(&self, spot_id: &SpotId) -> Option<&PlacedCard> {
        self.cards.iter().find(|c| &c.spot_id == spot_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::layout::Anchor;

    fn card(index: u32, spot: &str) -> PlacedCard {
        PlacedCard::new(
            CardId::new(1, index),
            SpotId::from(spot),
            Anchor::new(10.0, 10.0),
            Vec2::new(100.0, 100.0),
            Vec2::ONE,
            0.0,
        )
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut registry = CardRegistry::with_capacity(2);
        registry.add(card(0, "b"));
        registry.add(card(1, "a"));
        let spots: Vec<_> = registry.all().iter().map(|c| c.spot_id.as_str()).collect();
        assert_eq!(spots, ["b", "a"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut registry = CardRegistry::new();
        registry.add(card(0, "a"));
        registry.clear();
        assert!(registry.is_empty());
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn lookup_by_card_and_spot() {
        let mut registry = CardRegistry::new();
        registry.add(card(0, "a"));
        registry.add(card(1, "b"));
        assert_eq!(
            registry.get(CardId::new(1, 1)).map(|c| c.spot_id.as_str()),
            Some("b")
        );
        assert!(registry.get(CardId::new(2, 1)).is_none());
        assert_eq!(
            registry.find_by_spot(&SpotId::from("a")).map(|c| c.id),
            Some(CardId::new(1, 0))
        );
    }
}
