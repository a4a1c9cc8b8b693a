//! Concrete tower variants.

use glam::Vec2;
use tower_defense_core::{CellRectSize, Money, TowerKind, TowerStats};
use tower_defense_rendering::{Color, Palette, Rect, Surface};

use crate::Placeable;

const HIGHLIGHT_THICKNESS: f32 = 2.0;

/// Basic square tower.
#[derive(Clone, Debug, PartialEq)]
pub struct Tower {
    kind: TowerKind,
    stats: TowerStats,
    position: Vec2,
    size: Vec2,
    range: f32,
    active: bool,
    body: Color,
    range_color: Color,
    highlight: Color,
}

impl Tower {
    /// Creates an inactive basic tower at the screen origin.
    ///
    /// `cell_size` converts the footprint and the range from cells into
    /// screen units.
    #[must_use]
    pub fn new(stats: TowerStats, cell_size: Vec2, palette: &Palette) -> Self {
        Self::with_kind(TowerKind::Basic, stats, cell_size, palette.tower, palette)
    }

    fn with_kind(
        kind: TowerKind,
        stats: TowerStats,
        cell_size: Vec2,
        body: Color,
        palette: &Palette,
    ) -> Self {
        let footprint = stats.footprint;
        Self {
            kind,
            stats,
            position: Vec2::ZERO,
            size: Vec2::new(
                cell_size.x * footprint.width() as f32,
                cell_size.y * footprint.height() as f32,
            ),
            range: stats.range * cell_size.min_element(),
            active: false,
            body,
            range_color: palette.range,
            highlight: palette.highlight,
        }
    }
}

impl Placeable for Tower {
    fn kind(&self) -> TowerKind {
        self.kind
    }

    fn cost(&self) -> Money {
        self.stats.cost
    }

    fn footprint(&self) -> CellRectSize {
        self.stats.footprint
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn range(&self) -> f32 {
        self.range
    }

    fn range_color(&self) -> Color {
        self.range_color
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(&mut self) {
        self.active = true;
    }

    fn deactivate(&mut self) {
        self.active = false;
    }

    fn paint(&self, surface: &mut dyn Surface) {
        let bounds = self.bounds();
        surface.fill_rect(bounds, self.body);
        if self.active {
            surface.stroke_rect(bounds, HIGHLIGHT_THICKNESS, self.highlight);
        }
    }
}

/// Tower with a green body and a glowing core.
///
/// Shares all placement behaviour with [`Tower`] and only differs in its
/// stats and appearance.
#[derive(Clone, Debug, PartialEq)]
pub struct GreenTower {
    base: Tower,
    core: Color,
}

impl GreenTower {
    /// Creates an inactive green tower at the screen origin.
    #[must_use]
    pub fn new(stats: TowerStats, cell_size: Vec2, palette: &Palette) -> Self {
        Self {
            base: Tower::with_kind(
                TowerKind::Green,
                stats,
                cell_size,
                palette.green_tower,
                palette,
            ),
            core: palette.green_tower.lighten(0.4),
        }
    }
}

impl Placeable for GreenTower {
    fn kind(&self) -> TowerKind {
        self.base.kind()
    }

    fn cost(&self) -> Money {
        self.base.cost()
    }

    fn footprint(&self) -> CellRectSize {
        self.base.footprint()
    }

    fn position(&self) -> Vec2 {
        self.base.position()
    }

    fn set_position(&mut self, position: Vec2) {
        self.base.set_position(position);
    }

    fn size(&self) -> Vec2 {
        self.base.size()
    }

    fn range(&self) -> f32 {
        self.base.range()
    }

    fn range_color(&self) -> Color {
        self.base.range_color()
    }

    fn is_active(&self) -> bool {
        self.base.is_active()
    }

    fn activate(&mut self) {
        self.base.activate();
    }

    fn deactivate(&mut self) {
        self.base.deactivate();
    }

    fn paint(&self, surface: &mut dyn Surface) {
        self.base.paint(surface);
        let bounds = self.bounds();
        let core = Rect::new(bounds.origin + bounds.size * 0.25, bounds.size * 0.5);
        surface.fill_circle(core.center(), core.size.min_element() * 0.5, self.core);
    }
}
