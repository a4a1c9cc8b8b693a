#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Placement and selection controller for the tower defense board.
//!
//! [`TowerDefense`] owns the world grid, the purchase menu, the placed towers
//! and the player's money. Each frame it gathers actions from the menu and
//! every placed tower, then resolves them against the current interaction:
//! idle, following the pointer with a purchased tower, or showing the range of
//! a selected tower.

mod economy;
mod paint;

use std::{fmt, mem};

use glam::Vec2;
use thiserror::Error;
use tower_defense_core::{
    ConfigError, FrameInput, GameConfig, GameMode, Money, PlacementError, SubMode, TowerId,
    TowerKind, WorldError,
};
use tower_defense_entities::{Action, Placeable, PlacedTower, TowerCatalog};
use tower_defense_rendering::{Paint, Palette};
use tower_defense_system_menu::Menu;
use tower_defense_world::World;
use tracing::{debug, info, warn};

pub use economy::Purse;

/// Reasons a [`TowerDefense`] session cannot be created.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum SetupError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The world grid could not be built from the configuration.
    #[error("invalid world: {0}")]
    World(#[from] WorldError),
}

/// Observable result of resolving one action during a logic step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// A purchased tower started following the pointer.
    Following {
        /// Kind of the purchased tower.
        kind: TowerKind,
    },
    /// A purchased tower was committed to the board.
    Placed {
        /// Identifier allocated to the new tower.
        tower: TowerId,
        /// Kind of the placed tower.
        kind: TowerKind,
        /// Money deducted for the tower.
        cost: Money,
    },
    /// A placement attempt failed and the purchase was cancelled.
    Rejected {
        /// Kind of the cancelled purchase.
        kind: TowerKind,
        /// First check that failed.
        reason: PlacementError,
    },
    /// A pending purchase was dropped because a placed tower was selected.
    Abandoned {
        /// Kind of the dropped purchase.
        kind: TowerKind,
    },
    /// A placed tower became the selection.
    Selected {
        /// Identifier of the selected tower.
        tower: TowerId,
    },
    /// The selection was cleared by clicking a free cell.
    Deselected {
        /// Identifier of the previously selected tower.
        tower: TowerId,
    },
}

/// What the player is currently doing with the pointer.
///
/// The purchased entity and the selected tower live inside the variants, so
/// no state can hold both or neither of what its mode requires.
#[derive(Debug)]
enum Interaction {
    Idle,
    Following(Box<dyn Placeable>),
    ShowingRange(TowerId),
}

impl Interaction {
    const fn sub_mode(&self) -> SubMode {
        match self {
            Self::Idle => SubMode::Idle,
            Self::Following(_) => SubMode::Following,
            Self::ShowingRange(_) => SubMode::ShowingRange,
        }
    }
}

/// Top-level game controller.
pub struct TowerDefense {
    palette: Palette,
    world: World,
    menu: Menu,
    towers: Vec<PlacedTower>,
    creeps: Vec<Box<dyn Paint>>,
    purse: Purse,
    mode: GameMode,
    wave: u32,
    interaction: Interaction,
    cursor_visible: bool,
    next_tower_id: TowerId,
    outcomes: Vec<PlacementOutcome>,
}

impl fmt::Debug for TowerDefense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TowerDefense")
            .field("world", &self.world)
            .field("towers", &self.towers)
            .field("creeps", &self.creeps.len())
            .field("purse", &self.purse)
            .field("mode", &self.mode)
            .field("wave", &self.wave)
            .field("interaction", &self.interaction)
            .field("cursor_visible", &self.cursor_visible)
            .finish_non_exhaustive()
    }
}

impl TowerDefense {
    /// Builds a session from a validated configuration.
    pub fn new(config: GameConfig, palette: Palette) -> Result<Self, SetupError> {
        config.validate()?;
        let world = World::from_config(&config.world, config.world_origin())?;
        let catalog = TowerCatalog::new(config.towers, world.cell_size(), palette);
        let menu = Menu::from_config(&config, catalog, &palette);
        let purse = Purse::new(config.starting_money);

        info!(
            columns = world.columns(),
            rows = world.rows(),
            money = %purse.balance(),
            "tower defense session created"
        );

        Ok(Self {
            palette,
            world,
            menu,
            towers: Vec::new(),
            creeps: Vec::new(),
            purse,
            mode: GameMode::Clear,
            wave: 0,
            interaction: Interaction::Idle,
            cursor_visible: true,
            next_tower_id: TowerId::new(0),
            outcomes: Vec::new(),
        })
    }

    /// Runs one logic step over the frame's input.
    pub fn game_logic(&mut self, input: &FrameInput) {
        self.outcomes.clear();
        self.follow_pointer(input.pointer);

        let mut actions = self.menu.game_logic(input);
        for tower in &self.towers {
            actions.extend(tower.game_logic(input));
        }

        for action in actions {
            debug!(action = action.name(), "resolving action");
            match action {
                Action::RequestFollow(entity) => self.request_follow(entity),
                Action::RequestPlace => self.request_place(),
                Action::EntitySelected(id) => self.entity_selected(id),
            }
        }

        if input.primary_clicked() {
            self.deselect_on_free_cell(input.pointer);
        }
    }

    /// Starts a wave. Placement keeps working while it runs.
    pub fn start_wave(&mut self) {
        self.wave = self.wave.saturating_add(1);
        self.mode = GameMode::Wave;
        info!(wave = self.wave, "wave started");
    }

    /// Ends the running wave and removes its creeps.
    pub fn clear_wave(&mut self) {
        self.mode = GameMode::Clear;
        self.creeps.clear();
        info!(wave = self.wave, "wave cleared");
    }

    /// Adds a creep to the painted scene.
    pub fn spawn_creep(&mut self, creep: Box<dyn Paint>) {
        self.creeps.push(creep);
    }

    /// Player's current balance.
    #[must_use]
    pub const fn money(&self) -> Money {
        self.purse.balance()
    }

    /// Coarse game mode.
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Number of waves started so far.
    #[must_use]
    pub const fn wave(&self) -> u32 {
        self.wave
    }

    /// Current interaction mode.
    #[must_use]
    pub const fn sub_mode(&self) -> SubMode {
        self.interaction.sub_mode()
    }

    /// Whether the adapter should draw the system cursor.
    #[must_use]
    pub const fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Tower whose range is being shown.
    #[must_use]
    pub const fn selected(&self) -> Option<TowerId> {
        match self.interaction {
            Interaction::ShowingRange(id) => Some(id),
            _ => None,
        }
    }

    /// Purchased entity following the pointer.
    #[must_use]
    pub fn purchaser(&self) -> Option<&dyn Placeable> {
        match &self.interaction {
            Interaction::Following(entity) => Some(entity.as_ref()),
            _ => None,
        }
    }

    /// Placed towers in placement order.
    #[must_use]
    pub fn towers(&self) -> &[PlacedTower] {
        &self.towers
    }

    /// Looks up a placed tower.
    #[must_use]
    pub fn tower(&self, id: TowerId) -> Option<&PlacedTower> {
        self.towers.iter().find(|tower| tower.id() == id)
    }

    /// The board grid.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The purchase menu.
    #[must_use]
    pub const fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Outcomes recorded during the most recent logic step.
    #[must_use]
    pub fn last_outcomes(&self) -> &[PlacementOutcome] {
        &self.outcomes
    }

    fn follow_pointer(&mut self, pointer: Vec2) {
        let Interaction::Following(entity) = &mut self.interaction else {
            return;
        };
        let position = match self.world.cell_at(pointer) {
            Ok(cell) => self.world.cell_top_left(cell),
            Err(_) => pointer,
        };
        entity.set_position(position);
    }

    fn request_follow(&mut self, mut entity: Box<dyn Placeable>) {
        match mem::replace(&mut self.interaction, Interaction::Idle) {
            Interaction::ShowingRange(id) => self.set_active(id, false),
            Interaction::Following(previous) => {
                debug!(kind = ?previous.kind(), "replacing pending purchase");
            }
            Interaction::Idle => {}
        }

        let kind = entity.kind();
        entity.activate();
        self.interaction = Interaction::Following(entity);
        self.cursor_visible = false;
        self.outcomes.push(PlacementOutcome::Following { kind });
    }

    fn request_place(&mut self) {
        let Some(entity) = self.take_purchaser() else {
            debug!("placement requested with nothing to place");
            return;
        };
        self.menu.disarm();
        self.cursor_visible = true;

        let kind = entity.kind();
        let cost = entity.cost();
        match self.place(entity) {
            Ok(tower) => {
                info!(tower = tower.get(), ?kind, %cost, money = %self.money(), "tower placed");
                self.interaction = Interaction::ShowingRange(tower);
                self.outcomes
                    .push(PlacementOutcome::Placed { tower, kind, cost });
            }
            Err(reason) => {
                debug!(?kind, %reason, "placement rejected");
                self.interaction = Interaction::Idle;
                self.outcomes
                    .push(PlacementOutcome::Rejected { kind, reason });
            }
        }
    }

    fn place(&mut self, mut entity: Box<dyn Placeable>) -> Result<TowerId, PlacementError> {
        let position = entity.position();
        let footprint = entity.footprint();

        let region = self.world.placement_check(position, footprint)?;
        self.purse.spend(entity.cost())?;
        self.world.occupy_area(position, footprint);
        entity.activate();

        let id = self.next_tower_id;
        self.next_tower_id = id.next();
        self.towers.push(PlacedTower::new(id, region, entity));
        Ok(id)
    }

    fn entity_selected(&mut self, id: TowerId) {
        if self.tower(id).is_none() {
            warn!(tower = id.get(), "selection of unknown tower ignored");
            return;
        }

        match mem::replace(&mut self.interaction, Interaction::Idle) {
            Interaction::Following(entity) => {
                // The cursor stays hidden until the next place or follow.
                self.menu.disarm();
                debug!(kind = ?entity.kind(), "pending purchase abandoned");
                self.outcomes
                    .push(PlacementOutcome::Abandoned { kind: entity.kind() });
            }
            Interaction::ShowingRange(previous) => self.set_active(previous, false),
            Interaction::Idle => {}
        }

        self.set_active(id, true);
        self.interaction = Interaction::ShowingRange(id);
        self.outcomes.push(PlacementOutcome::Selected { tower: id });
    }

    fn deselect_on_free_cell(&mut self, pointer: Vec2) {
        let Interaction::ShowingRange(id) = self.interaction else {
            return;
        };
        let Ok(cell) = self.world.cell_at(pointer) else {
            return;
        };
        if self.world.has_cell(cell) && !self.world.is_occupied(cell) {
            self.set_active(id, false);
            self.interaction = Interaction::Idle;
            debug!(tower = id.get(), %cell, "selection cleared");
            self.outcomes.push(PlacementOutcome::Deselected { tower: id });
        }
    }

    fn take_purchaser(&mut self) -> Option<Box<dyn Placeable>> {
        match mem::replace(&mut self.interaction, Interaction::Idle) {
            Interaction::Following(entity) => Some(entity),
            other => {
                self.interaction = other;
                None
            }
        }
    }

    fn set_active(&mut self, id: TowerId, active: bool) {
        let Some(tower) = self.towers.iter_mut().find(|tower| tower.id() == id) else {
            return;
        };
        let entity = tower.entity_mut();
        if active {
            entity.activate();
        } else {
            entity.deactivate();
        }
    }
}
