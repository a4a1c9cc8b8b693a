//! Immutable game configuration passed into the controller at construction.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CellRectSize, Money, TowerKind};

/// Largest number of cells a world grid may hold.
pub const MAX_GRID_CELLS: u64 = 1 << 20;

/// Dimensions of the screen and the spacing between laid-out panels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Screen width in pixels.
    pub width: f32,
    /// Screen height in pixels.
    pub height: f32,
    /// Gap between the screen edge, the world and the menu.
    pub margin: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: 20.0,
        }
    }
}

/// Extent of the playable world and its grid resolution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World width in screen units.
    pub width: f32,
    /// World height in screen units.
    pub height: f32,
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows.
    pub rows: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 448.0,
            columns: 20,
            rows: 14,
        }
    }
}

/// Purchase and placement parameters for a single tower kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    /// Price deducted on successful placement.
    pub cost: Money,
    /// Footprint measured in grid cells.
    pub footprint: CellRectSize,
    /// Range radius measured in cells.
    pub range: f32,
}

/// Stats for every purchasable tower kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerCatalogConfig {
    /// Stats of [`TowerKind::Basic`].
    pub basic: TowerStats,
    /// Stats of [`TowerKind::Green`].
    pub green: TowerStats,
}

impl TowerCatalogConfig {
    /// Looks up the stats configured for `kind`.
    #[must_use]
    pub const fn stats(&self, kind: TowerKind) -> TowerStats {
        match kind {
            TowerKind::Basic => self.basic,
            TowerKind::Green => self.green,
        }
    }
}

impl Default for TowerCatalogConfig {
    fn default() -> Self {
        Self {
            basic: TowerStats {
                cost: Money::new(80),
                footprint: CellRectSize::new(2, 2),
                range: 3.0,
            },
            green: TowerStats {
                cost: Money::new(120),
                footprint: CellRectSize::new(2, 2),
                range: 4.5,
            },
        }
    }
}

/// Complete configuration of a tower defense session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Screen layout.
    pub screen: ScreenConfig,
    /// World extent and grid resolution.
    pub world: WorldConfig,
    /// Balance available when the session starts.
    pub starting_money: Money,
    /// Tower stats offered by the menu.
    pub towers: TowerCatalogConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            world: WorldConfig::default(),
            starting_money: Money::new(200),
            towers: TowerCatalogConfig::default(),
        }
    }
}

impl GameConfig {
    /// Checks that the configuration describes a usable layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = &self.world;
        let screen = &self.screen;
        if ![screen.width, screen.height, screen.margin, world.width, world.height]
            .iter()
            .all(|value| value.is_finite())
        {
            return Err(ConfigError::NonFiniteLayout);
        }
        if world.columns == 0 || world.rows == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if u64::from(world.columns) * u64::from(world.rows) > MAX_GRID_CELLS {
            return Err(ConfigError::GridTooLarge {
                columns: world.columns,
                rows: world.rows,
            });
        }
        if !(world.width > 0.0 && world.height > 0.0) {
            return Err(ConfigError::WorldTooSmall {
                width: world.width,
                height: world.height,
            });
        }
        if world.width > self.screen.width {
            return Err(ConfigError::WorldWiderThanScreen {
                world: world.width,
                screen: self.screen.width,
            });
        }
        if self.menu_size().y <= 0.0 {
            return Err(ConfigError::NoRoomForMenu);
        }
        for kind in TowerKind::ALL {
            let stats = self.towers.stats(kind);
            if stats.footprint.is_empty() {
                return Err(ConfigError::EmptyFootprint { kind });
            }
            if stats.range.is_nan() || stats.range < 0.0 {
                return Err(ConfigError::NegativeRange { kind });
            }
        }
        Ok(())
    }

    /// Top-left corner of the world, centred horizontally below the top margin.
    #[must_use]
    pub fn world_origin(&self) -> Vec2 {
        Vec2::new(
            (self.screen.width - self.world.width) / 2.0,
            self.screen.margin,
        )
    }

    /// Top-left corner of the menu panel, one margin below the world.
    #[must_use]
    pub fn menu_origin(&self) -> Vec2 {
        let world = self.world_origin();
        Vec2::new(world.x, world.y + self.world.height + self.screen.margin)
    }

    /// Size of the menu panel: half the world width, filling the space below it.
    #[must_use]
    pub fn menu_size(&self) -> Vec2 {
        let world = self.world_origin();
        Vec2::new(
            self.world.width * 0.5,
            self.screen.height - (world.y + self.world.height + 2.0 * self.screen.margin),
        )
    }
}

/// Reasons a [`GameConfig`] is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A screen or world dimension is infinite or NaN.
    #[error("screen and world dimensions must be finite")]
    NonFiniteLayout,
    /// The world grid has zero columns or rows.
    #[error("world grid must contain at least one column and one row")]
    EmptyGrid,
    /// The world grid holds more than [`MAX_GRID_CELLS`] cells.
    #[error("world grid of {columns}x{rows} cells exceeds {max} cells", max = MAX_GRID_CELLS)]
    GridTooLarge {
        /// Configured columns.
        columns: u32,
        /// Configured rows.
        rows: u32,
    },
    /// The world extent is not positive.
    #[error("world must have a positive size, got {width}x{height}")]
    WorldTooSmall {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// The world does not fit horizontally on screen.
    #[error("world width {world} exceeds screen width {screen}")]
    WorldWiderThanScreen {
        /// Configured world width.
        world: f32,
        /// Configured screen width.
        screen: f32,
    },
    /// The screen leaves no vertical space for the menu.
    #[error("screen leaves no room for the menu below the world")]
    NoRoomForMenu,
    /// A tower kind was configured with an empty footprint.
    #[error("{kind:?} tower footprint must cover at least one cell")]
    EmptyFootprint {
        /// Offending tower kind.
        kind: TowerKind,
    },
    /// A tower kind was configured with a negative or NaN range.
    #[error("{kind:?} tower range must be non-negative")]
    NegativeRange {
        /// Offending tower kind.
        kind: TowerKind,
    },
}
