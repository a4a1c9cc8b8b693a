use glam::Vec2;
use tower_defense_rendering::{Paint, Palette, Rect, Surface};
use tower_defense_world::World;

use crate::{Interaction, TowerDefense};

const GRID_LINE_THICKNESS: f32 = 1.0;

impl Paint for TowerDefense {
    /// Paints the scene back to front: background, world, menu, creeps, the
    /// range preview, the pending purchase and finally the placed towers.
    fn paint(&self, surface: &mut dyn Surface) {
        surface.fill(self.palette.background);
        paint_world(&self.world, &self.palette, surface);
        self.menu.paint(surface);
        for creep in &self.creeps {
            creep.paint(surface);
        }

        match &self.interaction {
            Interaction::ShowingRange(id) => {
                if let Some(tower) = self.tower(*id) {
                    tower.entity().paint_range(surface);
                }
            }
            Interaction::Following(entity) => {
                if self.world.can_build(entity.position(), entity.footprint()) {
                    entity.paint_range(surface);
                } else {
                    entity.paint_range_with(surface, self.palette.range_bad);
                }
                entity.paint(surface);
            }
            Interaction::Idle => {}
        }

        for tower in &self.towers {
            tower.paint(surface);
        }
    }
}

fn paint_world(world: &World, palette: &Palette, surface: &mut dyn Surface) {
    let origin = world.origin();
    let size = world.size();
    let cell = world.cell_size();
    surface.fill_rect(Rect::new(origin, size), palette.world);

    for column in 0..=world.columns() {
        let x = origin.x + cell.x * column as f32;
        surface.draw_line(
            Vec2::new(x, origin.y),
            Vec2::new(x, origin.y + size.y),
            GRID_LINE_THICKNESS,
            palette.grid_line,
        );
    }
    for row in 0..=world.rows() {
        let y = origin.y + cell.y * row as f32;
        surface.draw_line(
            Vec2::new(origin.x, y),
            Vec2::new(origin.x + size.x, y),
            GRID_LINE_THICKNESS,
            palette.grid_line,
        );
    }
}
