use glam::Vec2;
use tower_defense_core::{TowerCatalogConfig, TowerKind, TowerStats};
use tower_defense_rendering::Palette;

use crate::{GreenTower, Placeable, Tower};

/// Factory that builds fresh purchasers for every tower kind.
#[derive(Clone, Debug)]
pub struct TowerCatalog {
    stats: TowerCatalogConfig,
    cell_size: Vec2,
    palette: Palette,
}

impl TowerCatalog {
    /// Creates a catalog producing towers sized for cells of `cell_size`.
    #[must_use]
    pub fn new(stats: TowerCatalogConfig, cell_size: Vec2, palette: Palette) -> Self {
        Self {
            stats,
            cell_size,
            palette,
        }
    }

    /// Configured stats for `kind`.
    #[must_use]
    pub const fn stats(&self, kind: TowerKind) -> TowerStats {
        self.stats.stats(kind)
    }

    /// Builds a new, inactive entity of `kind` at the screen origin.
    #[must_use]
    pub fn purchase(&self, kind: TowerKind) -> Box<dyn Placeable> {
        let stats = self.stats(kind);
        match kind {
            TowerKind::Basic => Box::new(Tower::new(stats, self.cell_size, &self.palette)),
            TowerKind::Green => Box::new(GreenTower::new(stats, self.cell_size, &self.palette)),
        }
    }
}
