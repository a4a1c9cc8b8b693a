#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Purchase menu that emits follow and place requests.
//!
//! Clicking a purchase button (or pressing its hotkey) hands a fresh entity to
//! the controller through [`Action::RequestFollow`] and arms the menu. The
//! next primary click that misses every button asks the controller to place
//! that entity with [`Action::RequestPlace`].

use glam::Vec2;
use tower_defense_core::{FrameInput, GameConfig, Key, TowerKind};
use tower_defense_entities::{Action, TowerCatalog};
use tower_defense_rendering::{Color, Paint, Palette, Rect, Surface};
use tracing::debug;

const BUTTON_PADDING: f32 = 8.0;
const BUTTON_WIDTH: f32 = 112.0;
const LABEL_SIZE: f32 = 14.0;

/// Single purchase button.
#[derive(Clone, Debug, PartialEq)]
pub struct MenuEntry {
    kind: TowerKind,
    button: Rect,
    hotkey: Option<Key>,
    label: String,
}

impl MenuEntry {
    /// Tower kind sold by the button.
    #[must_use]
    pub const fn kind(&self) -> TowerKind {
        self.kind
    }

    /// Screen-space button rectangle.
    #[must_use]
    pub const fn button(&self) -> Rect {
        self.button
    }

    /// Keyboard shortcut, if one was assigned.
    #[must_use]
    pub const fn hotkey(&self) -> Option<Key> {
        self.hotkey
    }

    /// Caption drawn on the button.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Panel of purchase buttons laid out left to right.
#[derive(Clone, Debug)]
pub struct Menu {
    bounds: Rect,
    catalog: TowerCatalog,
    entries: Vec<MenuEntry>,
    armed: Option<TowerKind>,
    background: Color,
    button: Color,
    button_armed: Color,
    text: Color,
}

impl Menu {
    /// Creates an empty menu covering `bounds`.
    #[must_use]
    pub fn new(bounds: Rect, catalog: TowerCatalog, palette: &Palette) -> Self {
        Self {
            bounds,
            catalog,
            entries: Vec::new(),
            armed: None,
            background: palette.menu,
            button: palette.button,
            button_armed: palette.button_armed,
            text: palette.text,
        }
    }

    /// Creates the menu laid out below the world, offering every tower kind.
    #[must_use]
    pub fn from_config(config: &GameConfig, catalog: TowerCatalog, palette: &Palette) -> Self {
        let bounds = Rect::new(config.menu_origin(), config.menu_size());
        let mut menu = Self::new(bounds, catalog, palette);
        for kind in TowerKind::ALL {
            menu.add_purchaser(kind);
        }
        menu
    }

    /// Appends a purchase button for `kind`.
    ///
    /// The first nine buttons get the digit keys `1`..`9` as hotkeys.
    pub fn add_purchaser(&mut self, kind: TowerKind) {
        let index = self.entries.len();
        let height = (self.bounds.size.y - 2.0 * BUTTON_PADDING).max(0.0);
        let origin = self.bounds.origin
            + Vec2::new(
                BUTTON_PADDING + index as f32 * (BUTTON_WIDTH + BUTTON_PADDING),
                BUTTON_PADDING,
            );
        let hotkey = u32::try_from(index + 1)
            .ok()
            .and_then(|digit| char::from_digit(digit, 10))
            .map(Key::Char);
        let cost = self.catalog.stats(kind).cost;

        self.entries.push(MenuEntry {
            kind,
            button: Rect::new(origin, Vec2::new(BUTTON_WIDTH, height)),
            hotkey,
            label: format!("{} {cost}", kind.label()),
        });
    }

    /// Screen-space panel rectangle.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Purchase buttons in layout order.
    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Kind of the purchase awaiting placement, if any.
    #[must_use]
    pub const fn armed(&self) -> Option<TowerKind> {
        self.armed
    }

    /// Forgets the pending purchase without emitting anything.
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Translates this frame's input into menu actions.
    pub fn game_logic(&mut self, input: &FrameInput) -> Vec<Action> {
        let clicked = if input.primary_clicked() {
            self.entry_at(input.pointer)
        } else {
            None
        };
        let hotkey = self
            .entries
            .iter()
            .find(|entry| entry.hotkey.is_some_and(|key| input.key_pressed(key)))
            .map(MenuEntry::kind);

        if let Some(kind) = clicked.or(hotkey) {
            debug!(?kind, "purchase requested");
            self.armed = Some(kind);
            return vec![Action::RequestFollow(self.catalog.purchase(kind))];
        }

        if input.primary_clicked() && self.armed.take().is_some() {
            return vec![Action::RequestPlace];
        }

        Vec::new()
    }

    fn entry_at(&self, point: Vec2) -> Option<TowerKind> {
        self.entries
            .iter()
            .find(|entry| entry.button.contains(point))
            .map(MenuEntry::kind)
    }
}

impl Paint for Menu {
    fn paint(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.bounds, self.background);
        for entry in &self.entries {
            let fill = if self.armed == Some(entry.kind) {
                self.button_armed
            } else {
                self.button
            };
            surface.fill_rect(entry.button, fill);
            surface.draw_text(
                &entry.label,
                entry.button.origin + Vec2::splat(BUTTON_PADDING),
                LABEL_SIZE,
                self.text,
            );
        }
    }
}
