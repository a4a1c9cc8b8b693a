use tower_defense_core::{CellRect, FrameInput, TowerId};
use tower_defense_rendering::{Paint, Surface};
use tracing::debug;

use crate::{Action, Placeable};

/// Tower committed to the board, acting as its own action producer.
#[derive(Debug)]
pub struct PlacedTower {
    id: TowerId,
    region: CellRect,
    entity: Box<dyn Placeable>,
}

impl PlacedTower {
    /// Wraps an entity that now occupies `region`.
    #[must_use]
    pub fn new(id: TowerId, region: CellRect, entity: Box<dyn Placeable>) -> Self {
        Self { id, region, entity }
    }

    /// Identifier allocated when the tower was placed.
    #[must_use]
    pub const fn id(&self) -> TowerId {
        self.id
    }

    /// Grid cells reserved by the tower.
    #[must_use]
    pub const fn region(&self) -> CellRect {
        self.region
    }

    /// The placed entity.
    #[must_use]
    pub fn entity(&self) -> &dyn Placeable {
        self.entity.as_ref()
    }

    /// Mutable access to the placed entity.
    pub fn entity_mut(&mut self) -> &mut dyn Placeable {
        self.entity.as_mut()
    }

    /// Emits [`Action::EntitySelected`] when the tower is clicked.
    #[must_use]
    pub fn game_logic(&self, input: &FrameInput) -> Vec<Action> {
        if input.primary_clicked() && self.entity.bounds().contains(input.pointer) {
            debug!(tower = self.id.get(), "placed tower clicked");
            return vec![Action::EntitySelected(self.id)];
        }
        Vec::new()
    }
}

impl Paint for PlacedTower {
    fn paint(&self, surface: &mut dyn Surface) {
        self.entity.paint(surface);
    }
}
