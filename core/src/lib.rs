#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the tower defense engine.
//!
//! This crate defines the vocabulary used by the world grid, the placeable
//! entities, the action producers and the placement controller. Adapters
//! describe each frame with a [`FrameInput`], producers translate it into
//! actions, and the controller resolves those actions against the world's
//! occupancy and the player's [`Money`].

use std::{collections::BTreeSet, fmt};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod config;

pub use config::{
    ConfigError, GameConfig, ScreenConfig, TowerCatalogConfig, TowerStats, WorldConfig,
    MAX_GRID_CELLS,
};

/// Coarse game state that frames the placement workflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// No wave is running; the board is clear of creeps.
    #[default]
    Clear,
    /// A wave of creeps is in progress.
    Wave,
}

/// Fine-grained interaction mode nested under the [`GameMode`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SubMode {
    /// Nothing is being placed and no tower shows its range.
    #[default]
    Idle,
    /// A purchaser follows the pointer, waiting to be placed.
    Following,
    /// A placed tower is selected and shows its range.
    ShowingRange,
}

/// Unique identifier assigned to a placed tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Identifier that follows this one in allocation order.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Axis-aligned rectangle expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    origin: CellCoord,
    size: CellRectSize,
}

impl CellRect {
    /// Constructs a rectangle from an origin cell and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: CellCoord, size: CellRectSize) -> Self {
        Self { origin, size }
    }

    /// Upper-left cell that anchors the rectangle.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Dimensions of the rectangle measured in whole cells.
    #[must_use]
    pub const fn size(&self) -> CellRectSize {
        self.size
    }

    /// Reports whether two rectangles share at least one cell.
    #[must_use]
    pub fn overlaps(&self, other: &CellRect) -> bool {
        if self.size.is_empty() || other.size.is_empty() {
            return false;
        }

        let (a_left, a_right) = span(self.origin.column(), self.size.width());
        let (b_left, b_right) = span(other.origin.column(), other.size.width());
        let (a_top, a_bottom) = span(self.origin.row(), self.size.height());
        let (b_top, b_bottom) = span(other.origin.row(), other.size.height());

        a_left < b_right && b_left < a_right && a_top < b_bottom && b_top < a_bottom
    }

    /// Iterates every cell covered by the rectangle in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let origin = self.origin;
        let size = self.size;
        (0..size.height()).flat_map(move |dy| {
            (0..size.width()).filter_map(move |dx| {
                let column = origin.column().checked_add(dx)?;
                let row = origin.row().checked_add(dy)?;
                Some(CellCoord::new(column, row))
            })
        })
    }
}

fn span(start: u32, length: u32) -> (u64, u64) {
    (u64::from(start), u64::from(start) + u64::from(length))
}

/// Size of a [`CellRect`] measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRectSize {
    width: u32,
    height: u32,
}

impl CellRectSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the rectangle in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rectangle in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the size covers no cells at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Amount of in-game currency.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u32);

impl Money {
    /// No money at all.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw currency amount.
    #[must_use]
    pub const fn new(amount: u32) -> Self {
        Self(amount)
    }

    /// Retrieves the raw currency amount.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Subtracts `cost`, returning `None` if the balance would go negative.
    #[must_use]
    pub const fn checked_sub(self, cost: Money) -> Option<Money> {
        match self.0.checked_sub(cost.0) {
            Some(remaining) => Some(Self(remaining)),
            None => None,
        }
    }

    /// Adds `amount`, clamping at the numeric limit.
    #[must_use]
    pub const fn saturating_add(self, amount: Money) -> Money {
        Self(self.0.saturating_add(amount.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Types of towers that can be purchased from the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// Basic tower with default attack parameters.
    Basic,
    /// Green tower with a wider reach.
    Green,
}

impl TowerKind {
    /// Every tower kind in menu order.
    pub const ALL: [TowerKind; 2] = [TowerKind::Basic, TowerKind::Green];

    /// Human readable label used by menus and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Tower",
            Self::Green => "Green Tower",
        }
    }
}

/// Keyboard key reported by adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Printable character key, normalised to lowercase.
    Char(char),
    /// Escape key.
    Escape,
}

/// Pointer button number as reported by the windowing layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerButton(u8);

impl PointerButton {
    /// Primary (left) button. Clicks with it carry deselect semantics.
    pub const PRIMARY: Self = Self(1);
    /// Secondary (right) button.
    pub const SECONDARY: Self = Self(3);
}

/// Input snapshot gathered by adapters for a single frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Keys held down during this frame.
    pub held_keys: BTreeSet<Key>,
    /// Keys that transitioned to pressed on this frame.
    pub new_keys: BTreeSet<Key>,
    /// Pointer position in screen space.
    pub pointer: Vec2,
    /// Pointer buttons newly pressed on this frame.
    pub new_clicks: BTreeSet<PointerButton>,
}

impl FrameInput {
    /// Creates an input snapshot with the pointer at `pointer` and nothing pressed.
    #[must_use]
    pub fn at(pointer: Vec2) -> Self {
        Self {
            pointer,
            ..Self::default()
        }
    }

    /// Adds a newly pressed pointer button.
    #[must_use]
    pub fn with_click(mut self, button: PointerButton) -> Self {
        let _ = self.new_clicks.insert(button);
        self
    }

    /// Adds a newly pressed primary button.
    #[must_use]
    pub fn with_primary_click(self) -> Self {
        self.with_click(PointerButton::PRIMARY)
    }

    /// Adds a key that was pressed on this frame. The key is also held.
    #[must_use]
    pub fn with_key_press(mut self, key: Key) -> Self {
        let _ = self.new_keys.insert(key);
        let _ = self.held_keys.insert(key);
        self
    }

    /// Reports whether the primary button was pressed on this frame.
    #[must_use]
    pub fn primary_clicked(&self) -> bool {
        self.new_clicks.contains(&PointerButton::PRIMARY)
    }

    /// Reports whether `key` was pressed on this frame.
    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.new_keys.contains(&key)
    }
}

/// Errors raised by spatial queries against the world grid.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum WorldError {
    /// The point lies outside the world bounds.
    #[error("point ({x}, {y}) lies outside the world")]
    OutOfBounds {
        /// Horizontal coordinate of the rejected point.
        x: f32,
        /// Vertical coordinate of the rejected point.
        y: f32,
    },
    /// The grid was configured with zero columns or rows.
    #[error("world grid must contain at least one column and one row")]
    EmptyGrid,
    /// The world extent is not a positive finite size.
    #[error("world dimensions must be positive, got {width}x{height}")]
    InvalidDimensions {
        /// Configured width in world units.
        width: f32,
        /// Configured height in world units.
        height: f32,
    },
    /// The world origin is infinite or NaN.
    #[error("world origin ({x}, {y}) must be finite")]
    NonFiniteOrigin {
        /// Horizontal coordinate of the origin.
        x: f32,
        /// Vertical coordinate of the origin.
        y: f32,
    },
    /// The grid holds more than [`MAX_GRID_CELLS`] cells.
    #[error("world grid of {columns}x{rows} cells exceeds {max} cells", max = MAX_GRID_CELLS)]
    GridTooLarge {
        /// Requested columns.
        columns: u32,
        /// Requested rows.
        rows: u32,
    },
}

/// Reasons a tower placement attempt is rejected.
///
/// These are policy outcomes rather than faults; the controller turns every
/// one of them into a cancelled purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum PlacementError {
    /// The anchor or part of the footprint lies outside the grid.
    #[error("footprint extends beyond the world grid")]
    OutOfBounds,
    /// The player cannot pay for the tower.
    #[error("tower costs {cost} but only {balance} is available")]
    InsufficientFunds {
        /// Price of the rejected tower.
        cost: Money,
        /// Balance at the time of the attempt.
        balance: Money,
    },
    /// Part of the footprint is already occupied.
    #[error("footprint overlaps an occupied cell")]
    Occupied,
}
