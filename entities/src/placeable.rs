use std::fmt;

use glam::Vec2;
use tower_defense_core::{CellRectSize, Money, TowerKind};
use tower_defense_rendering::{Color, Rect, Surface};

/// Capability set shared by every entity that can be bought and placed.
pub trait Placeable: fmt::Debug {
    /// Kind of tower this entity represents.
    fn kind(&self) -> TowerKind;

    /// Price deducted from the purse when the entity is placed.
    fn cost(&self) -> Money;

    /// Footprint measured in grid cells.
    fn footprint(&self) -> CellRectSize;

    /// Top-left corner in screen space.
    fn position(&self) -> Vec2;

    /// Moves the entity so its top-left corner sits at `position`.
    fn set_position(&mut self, position: Vec2);

    /// Width and height in screen units.
    fn size(&self) -> Vec2;

    /// Range radius in screen units, measured from the entity's centre.
    fn range(&self) -> f32;

    /// Color used by [`Placeable::paint_range`].
    fn range_color(&self) -> Color;

    /// Whether the entity currently shows its range.
    fn is_active(&self) -> bool;

    /// Makes the entity show its range.
    fn activate(&mut self);

    /// Hides the entity's range.
    fn deactivate(&mut self);

    /// Draws the entity body.
    fn paint(&self, surface: &mut dyn Surface);

    /// Screen-space rectangle covered by the entity.
    fn bounds(&self) -> Rect {
        Rect::new(self.position(), self.size())
    }

    /// Draws the range indicator in its usual color.
    fn paint_range(&self, surface: &mut dyn Surface) {
        self.paint_range_with(surface, self.range_color());
    }

    /// Draws the range indicator in an explicit color.
    fn paint_range_with(&self, surface: &mut dyn Surface, color: Color) {
        surface.fill_circle(self.bounds().center(), self.range(), color);
    }
}
