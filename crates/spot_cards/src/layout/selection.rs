//! Routing card activations to the detail view.
//!
//! Cards carry no handlers of their own. Each pass binds every card id to the
//! catalog position and id of its spot, and one shared dispatch looks the spot
//! up when a card is activated. Binding the position keeps spots that share an
//! id apart.
use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::layout::events::{EventSink, LayoutEvent, LayoutEventKind};
use crate::layout::CardId;
use crate::spot::{Spot, SpotCatalog, SpotId};

/// External detail view (the modal) that renders a selected spot.
pub trait DetailView {
    fn show_detail(&mut self, spot: &Spot);
}

impl<F> DetailView for F
where
    F: FnMut(&Spot),
{
    fn show_detail(&mut self, spot: &Spot) {
        self(spot)
    }
}

#[derive(Debug, Clone)]
struct Binding {
    position: usize,
    spot_id: SpotId,
}

/// Card id to spot bindings for the current pass.
#[derive(Debug, Default)]
pub struct SelectionDispatcher {
    bindings: HashMap<CardId, Binding>,
}

impl SelectionDispatcher {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Binds `card` to the spot at `position` in the catalog, whose id is `spot_id`.
    pub fn bind(&mut self, card: CardId, position: usize, spot_id: SpotId) {
        self.bindings.insert(card, Binding { position, spot_id });
    }

    /// Drops every binding; ids from earlier passes stop resolving.
    pub fn unbind_all(&mut self) {
        self.bindings.clear();
    }

    pub fn spot_for(&self, card: CardId) -> Option<&SpotId> {
        self.bindings.get(&card).map(|b| &b.spot_id)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Shows the spot bound to `card` in `detail`, then reports the activation.
    ///
    /// The detail view is called exactly once on success and not at all on error.
    pub fn dispatch(
        &self,
        card: CardId,
        spots: &SpotCatalog,
        detail: &mut dyn DetailView,
        sink: &mut dyn EventSink,
    ) -> Result<()> {
        let binding = self.bindings.get(&card).ok_or(Error::UnknownCard { card })?;
        let spot_id = &binding.spot_id;
        let spot = spots
            .as_slice()
            .get(binding.position)
            .filter(|spot| &spot.id == spot_id)
            .ok_or_else(|| Error::UnknownSpot {
                id: spot_id.clone(),
            })?;

        debug!("Activating {} for spot '{}'.", card, spot_id);
        detail.show_detail(spot);

        if sink.wants(LayoutEventKind::CardActivated) {
            sink.send(LayoutEvent::CardActivated {
                card,
                spot_id: spot_id.clone(),
            });
        }
        Ok(())
    }
}
