#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative grid and occupancy state for the tower defense world.
//!
//! The world maps a screen-space rectangle onto a dense grid of cells. Every
//! point inside the half-open bounds `[origin, origin + size)` belongs to
//! exactly one cell, and a cell's boundaries are defined by the same formula
//! [`World::cell_top_left`] uses, so snapping a point to its cell and looking
//! the anchor up again always lands in the same cell.

use glam::Vec2;
use tower_defense_core::{
    CellCoord, CellRect, CellRectSize, PlacementError, WorldConfig, WorldError, MAX_GRID_CELLS,
};
use tracing::debug;

/// Grid of cells covering the playable area, each tracking occupancy.
#[derive(Clone, Debug)]
pub struct World {
    origin: Vec2,
    size: Vec2,
    cell_size: Vec2,
    occupancy: OccupancyGrid,
}

impl World {
    /// Creates an empty world anchored at `origin` spanning `size` screen units.
    pub fn new(origin: Vec2, size: Vec2, columns: u32, rows: u32) -> Result<Self, WorldError> {
        if columns == 0 || rows == 0 {
            return Err(WorldError::EmptyGrid);
        }
        if u64::from(columns) * u64::from(rows) > MAX_GRID_CELLS {
            return Err(WorldError::GridTooLarge { columns, rows });
        }
        if !origin.is_finite() {
            return Err(WorldError::NonFiniteOrigin {
                x: origin.x,
                y: origin.y,
            });
        }
        if !(size.x > 0.0 && size.y > 0.0 && size.is_finite()) {
            return Err(WorldError::InvalidDimensions {
                width: size.x,
                height: size.y,
            });
        }

        Ok(Self {
            origin,
            size,
            cell_size: Vec2::new(size.x / columns as f32, size.y / rows as f32),
            occupancy: OccupancyGrid::new(columns, rows),
        })
    }

    /// Creates an empty world from configuration, anchored at `origin`.
    pub fn from_config(config: &WorldConfig, origin: Vec2) -> Result<Self, WorldError> {
        Self::new(
            origin,
            Vec2::new(config.width, config.height),
            config.columns,
            config.rows,
        )
    }

    /// Top-left corner of the world in screen space.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Width and height of the world in screen units.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Width and height of a single cell.
    #[must_use]
    pub const fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// Number of grid columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.occupancy.columns
    }

    /// Number of grid rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.occupancy.rows
    }

    /// Reports whether `point` lies within the world bounds.
    #[must_use]
    pub fn is_inside(&self, point: Vec2) -> bool {
        let far = self.origin + self.size;
        point.x >= self.origin.x && point.y >= self.origin.y && point.x < far.x && point.y < far.y
    }

    /// Maps `point` to the cell containing it.
    pub fn cell_at(&self, point: Vec2) -> Result<CellCoord, WorldError> {
        if !self.is_inside(point) {
            return Err(WorldError::OutOfBounds {
                x: point.x,
                y: point.y,
            });
        }

        Ok(CellCoord::new(
            axis_index(self.origin.x, self.cell_size.x, self.columns(), point.x),
            axis_index(self.origin.y, self.cell_size.y, self.rows(), point.y),
        ))
    }

    /// Top-left anchor of `cell` in screen space.
    ///
    /// Used to snap a dragged entity to grid lines. The result is computed for
    /// any coordinate, including ones outside the grid.
    #[must_use]
    pub fn cell_top_left(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            edge(self.origin.x, self.cell_size.x, cell.column()),
            edge(self.origin.y, self.cell_size.y, cell.row()),
        )
    }

    /// Reports whether `cell` lies within the grid.
    #[must_use]
    pub fn has_cell(&self, cell: CellCoord) -> bool {
        self.occupancy.index(cell).is_some()
    }

    /// Reports whether `cell` is reserved by a placed entity.
    ///
    /// Cells outside the grid are never occupied.
    #[must_use]
    pub fn is_occupied(&self, cell: CellCoord) -> bool {
        self.occupancy.is_occupied(cell)
    }

    /// Footprint rectangle anchored at the cell containing `point`.
    ///
    /// The rectangle may extend beyond the grid; only the anchor is checked.
    pub fn footprint_at(&self, point: Vec2, dims: CellRectSize) -> Result<CellRect, WorldError> {
        let origin = self.cell_at(point)?;
        Ok(CellRect::from_origin_and_size(origin, dims))
    }

    /// Explains why a footprint cannot be reserved, or returns its region.
    pub fn placement_check(
        &self,
        point: Vec2,
        dims: CellRectSize,
    ) -> Result<CellRect, PlacementError> {
        let region = self
            .footprint_at(point, dims)
            .map_err(|_| PlacementError::OutOfBounds)?;

        let mut occupied = false;
        for cell in region.cells() {
            if !self.has_cell(cell) {
                return Err(PlacementError::OutOfBounds);
            }
            occupied |= self.is_occupied(cell);
        }

        // Cells that wrap past u32::MAX are silently skipped by `cells()`.
        let far_column = u64::from(region.origin().column()) + u64::from(dims.width());
        let far_row = u64::from(region.origin().row()) + u64::from(dims.height());
        if far_column > u64::from(self.columns()) || far_row > u64::from(self.rows()) {
            return Err(PlacementError::OutOfBounds);
        }

        if occupied {
            Err(PlacementError::Occupied)
        } else {
            Ok(region)
        }
    }

    /// Reports whether every footprint cell exists and is unoccupied.
    #[must_use]
    pub fn can_build(&self, point: Vec2, dims: CellRectSize) -> bool {
        self.placement_check(point, dims).is_ok()
    }

    /// Marks every cell of the footprint anchored at `point` as occupied.
    ///
    /// Callers must have seen [`World::can_build`] succeed within the same
    /// logic step; the footprint is not re-validated.
    pub fn occupy_area(&mut self, point: Vec2, dims: CellRectSize) {
        debug_assert!(
            self.can_build(point, dims),
            "occupy_area called for a footprint that cannot be built"
        );

        let Ok(region) = self.footprint_at(point, dims) else {
            return;
        };
        for cell in region.cells() {
            self.occupancy.occupy(cell);
        }
        debug!(origin = %region.origin(), width = dims.width(), height = dims.height(), "reserved footprint");
    }

    /// Iterates every occupied cell in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.occupancy.occupied_cells()
    }
}

fn edge(origin: f32, length: f32, index: u32) -> f32 {
    origin + index as f32 * length
}

/// Index of the cell along one axis, consistent with [`edge`].
fn axis_index(origin: f32, length: f32, count: u32, value: f32) -> u32 {
    let estimate = ((value - origin) / length).floor();
    let mut index = if estimate <= 0.0 {
        0
    } else {
        (estimate as u32).min(count - 1)
    };

    while index + 1 < count && edge(origin, length, index + 1) <= value {
        index += 1;
    }
    while index > 0 && edge(origin, length, index) > value {
        index -= 1;
    }
    index
}

#[derive(Clone, Debug)]
struct OccupancyGrid {
    columns: u32,
    rows: u32,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![false; capacity],
        }
    }

    fn is_occupied(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(false)
    }

    fn occupy(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = true;
            }
        }
    }

    fn occupied_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let columns = self.columns.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .filter_map(move |(index, _)| {
                let index = u32::try_from(index).ok()?;
                Some(CellCoord::new(index % columns, index / columns))
            })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
