use std::collections::BTreeSet;

use glam::Vec2;
use tower_defense_core::{
    CellCoord, ConfigError, FrameInput, GameConfig, GameMode, Key, Money, PlacementError, SubMode,
    TowerId, TowerKind,
};
use tower_defense_rendering::{Color, DrawCommand, DrawList, Paint, Palette, Surface};
use tower_defense_system_placement::{PlacementOutcome, SetupError, TowerDefense};

fn session() -> TowerDefense {
    TowerDefense::new(GameConfig::default(), Palette::default()).expect("default config is valid")
}

fn session_with_money(amount: u32) -> TowerDefense {
    let config = GameConfig {
        starting_money: Money::new(amount),
        ..GameConfig::default()
    };
    TowerDefense::new(config, Palette::default()).expect("default config is valid")
}

fn cell_center(game: &TowerDefense, column: u32, row: u32) -> Vec2 {
    let world = game.world();
    world.cell_top_left(CellCoord::new(column, row)) + world.cell_size() * 0.5
}

fn button(game: &TowerDefense, kind: TowerKind) -> Vec2 {
    game.menu()
        .entries()
        .iter()
        .find(|entry| entry.kind() == kind)
        .map(|entry| entry.button().center())
        .expect("menu offers every kind")
}

fn click(game: &mut TowerDefense, point: Vec2) {
    game.game_logic(&FrameInput::at(point).with_primary_click());
}

fn buy(game: &mut TowerDefense, kind: TowerKind) {
    let point = button(game, kind);
    click(game, point);
}

fn place(game: &mut TowerDefense, kind: TowerKind, column: u32, row: u32) -> TowerId {
    buy(game, kind);
    let point = cell_center(game, column, row);
    click(game, point);
    match game.last_outcomes() {
        [PlacementOutcome::Placed { tower, .. }] => *tower,
        other => panic!("placement failed: {other:?}"),
    }
}

fn assert_consistent(game: &TowerDefense) {
    match game.sub_mode() {
        SubMode::Idle => {
            assert!(game.purchaser().is_none());
            assert!(game.selected().is_none());
        }
        SubMode::Following => {
            assert!(game.purchaser().is_some());
            assert!(game.selected().is_none());
            assert!(!game.cursor_visible());
        }
        SubMode::ShowingRange => {
            assert!(game.purchaser().is_none());
            let selected = game.selected().expect("showing range requires a selection");
            assert!(game.tower(selected).is_some());
        }
    }

    let reserved: BTreeSet<_> = game
        .towers()
        .iter()
        .flat_map(|tower| tower.region().cells())
        .collect();
    let occupied: BTreeSet<_> = game.world().occupied_cells().collect();
    assert_eq!(reserved, occupied);

    for tower in game.towers() {
        assert_eq!(
            tower.entity().is_active(),
            game.selected() == Some(tower.id()),
            "only the selected tower is active"
        );
    }
}

#[test]
fn placing_on_an_empty_board_reserves_cells_and_selects_the_tower() {
    let mut game = session();

    buy(&mut game, TowerKind::Basic);
    assert_eq!(game.sub_mode(), SubMode::Following);
    assert!(!game.cursor_visible());
    assert!(game.purchaser().is_some_and(|entity| entity.is_active()));
    assert_consistent(&game);

    let target = cell_center(&game, 3, 4);
    click(&mut game, target);

    assert_eq!(
        game.last_outcomes(),
        [PlacementOutcome::Placed {
            tower: TowerId::new(0),
            kind: TowerKind::Basic,
            cost: Money::new(80),
        }]
    );
    assert_eq!(game.money(), Money::new(120));
    assert_eq!(game.sub_mode(), SubMode::ShowingRange);
    assert_eq!(game.selected(), Some(TowerId::new(0)));
    assert!(game.cursor_visible());
    assert_eq!(game.menu().armed(), None);

    let tower = game.tower(TowerId::new(0)).expect("tower was placed");
    assert_eq!(tower.entity().position(), Vec2::new(176.0, 148.0));
    let occupied: Vec<_> = game.world().occupied_cells().collect();
    assert_eq!(
        occupied,
        vec![
            CellCoord::new(3, 4),
            CellCoord::new(4, 4),
            CellCoord::new(3, 5),
            CellCoord::new(4, 5),
        ]
    );
    assert_consistent(&game);
}

#[test]
fn affordable_purchase_deducts_exactly_its_cost() {
    let mut game = session_with_money(100);

    let tower = place(&mut game, TowerKind::Basic, 0, 0);

    assert_eq!(game.money(), Money::new(20));
    assert_eq!(game.selected(), Some(tower));
    assert_consistent(&game);
}

#[test]
fn purchaser_snaps_to_hovered_cell_and_follows_raw_pointer_outside() {
    let mut game = session();
    buy(&mut game, TowerKind::Basic);

    game.game_logic(&FrameInput::at(Vec2::new(190.0, 150.0)));
    let snapped = game.purchaser().map(|entity| entity.position());

    let outside = Vec2::new(30.0, 300.0);
    game.game_logic(&FrameInput::at(outside));
    let raw = game.purchaser().map(|entity| entity.position());

    assert_eq!(snapped, Some(Vec2::new(176.0, 148.0)));
    assert_eq!(raw, Some(outside));
}

#[test]
fn insufficient_funds_cancel_the_purchase() {
    let mut game = session_with_money(50);

    buy(&mut game, TowerKind::Basic);
    let target = cell_center(&game, 3, 4);
    click(&mut game, target);

    assert_eq!(
        game.last_outcomes(),
        [PlacementOutcome::Rejected {
            kind: TowerKind::Basic,
            reason: PlacementError::InsufficientFunds {
                cost: Money::new(80),
                balance: Money::new(50),
            },
        }]
    );
    assert_eq!(game.money(), Money::new(50));
    assert_eq!(game.sub_mode(), SubMode::Idle);
    assert!(game.cursor_visible());
    assert!(game.towers().is_empty());
    assert_eq!(game.world().occupied_cells().count(), 0);
    assert_consistent(&game);
}

#[test]
fn overlapping_footprint_is_rejected_without_charging() {
    let mut game = session();
    let _ = place(&mut game, TowerKind::Basic, 3, 4);

    buy(&mut game, TowerKind::Basic);
    let overlapping = cell_center(&game, 2, 3);
    click(&mut game, overlapping);

    assert_eq!(
        game.last_outcomes(),
        [PlacementOutcome::Rejected {
            kind: TowerKind::Basic,
            reason: PlacementError::Occupied,
        }]
    );
    assert_eq!(game.money(), Money::new(120));
    assert_eq!(game.towers().len(), 1);
    assert_eq!(game.sub_mode(), SubMode::Idle);
    assert_consistent(&game);
}

#[test]
fn blocked_footprint_is_reported_before_missing_funds() {
    let mut game = session_with_money(100);
    let _ = place(&mut game, TowerKind::Basic, 3, 4);

    buy(&mut game, TowerKind::Basic);
    let overlapping = cell_center(&game, 2, 3);
    click(&mut game, overlapping);

    assert_eq!(
        game.last_outcomes(),
        [PlacementOutcome::Rejected {
            kind: TowerKind::Basic,
            reason: PlacementError::Occupied,
        }]
    );
    assert_eq!(game.money(), Money::new(20));
    assert_consistent(&game);
}

#[test]
fn placing_outside_the_world_is_rejected() {
    let mut game = session();

    buy(&mut game, TowerKind::Basic);
    click(&mut game, Vec2::new(40.0, 300.0));

    assert!(matches!(
        game.last_outcomes(),
        [PlacementOutcome::Rejected {
            reason: PlacementError::OutOfBounds,
            ..
        }]
    ));
    assert_eq!(game.sub_mode(), SubMode::Idle);
    assert_eq!(game.money(), Money::new(200));
}

#[test]
fn footprint_hanging_off_the_last_column_is_rejected() {
    let mut game = session();

    buy(&mut game, TowerKind::Basic);
    let last_column = cell_center(&game, 19, 0);
    click(&mut game, last_column);

    assert!(matches!(
        game.last_outcomes(),
        [PlacementOutcome::Rejected {
            reason: PlacementError::OutOfBounds,
            ..
        }]
    ));
    assert!(game.towers().is_empty());
}

#[test]
fn spending_stops_once_money_runs_out() {
    let mut game = session();

    let _ = place(&mut game, TowerKind::Basic, 0, 0);
    let _ = place(&mut game, TowerKind::Green, 5, 5);
    assert_eq!(game.money(), Money::ZERO);

    buy(&mut game, TowerKind::Basic);
    let target = cell_center(&game, 10, 10);
    click(&mut game, target);

    assert!(matches!(
        game.last_outcomes(),
        [PlacementOutcome::Rejected {
            reason: PlacementError::InsufficientFunds { .. },
            ..
        }]
    ));
    assert_eq!(game.towers().len(), 2);
    assert_consistent(&game);
}

#[test]
fn clicking_a_free_cell_clears_the_selection() {
    let mut game = session();
    let tower = place(&mut game, TowerKind::Basic, 3, 4);

    let free = cell_center(&game, 10, 10);
    click(&mut game, free);

    assert_eq!(
        game.last_outcomes(),
        [PlacementOutcome::Deselected { tower }]
    );
    assert_eq!(game.sub_mode(), SubMode::Idle);
    assert!(game.tower(tower).is_some_and(|placed| !placed.entity().is_active()));
    assert_consistent(&game);
}

#[test]
fn clicking_outside_the_world_keeps_the_selection() {
    let mut game = session();
    let tower = place(&mut game, TowerKind::Basic, 3, 4);

    click(&mut game, Vec2::new(10.0, 10.0));

    assert!(game.last_outcomes().is_empty());
    assert_eq!(game.selected(), Some(tower));
}

#[test]
fn clicking_a_placed_tower_selects_it() {
    let mut game = session();
    let first = place(&mut game, TowerKind::Basic, 0, 0);
    let second = place(&mut game, TowerKind::Green, 6, 6);
    assert_eq!(game.selected(), Some(second));

    let on_first = cell_center(&game, 1, 1);
    click(&mut game, on_first);

    assert_eq!(
        game.last_outcomes(),
        [PlacementOutcome::Selected { tower: first }]
    );
    assert_eq!(game.selected(), Some(first));
    assert_consistent(&game);
}

#[test]
fn placing_onto_a_tower_rejects_then_selects_it() {
    let mut game = session();
    let tower = place(&mut game, TowerKind::Basic, 3, 4);

    buy(&mut game, TowerKind::Basic);
    let on_tower = cell_center(&game, 4, 5);
    click(&mut game, on_tower);

    assert_eq!(
        game.last_outcomes(),
        [
            PlacementOutcome::Rejected {
                kind: TowerKind::Basic,
                reason: PlacementError::Occupied,
            },
            PlacementOutcome::Selected { tower },
        ]
    );
    assert_eq!(game.selected(), Some(tower));
    assert!(game.cursor_visible());
    assert_consistent(&game);
}

#[test]
fn selecting_while_following_abandons_the_purchase_and_keeps_cursor_hidden() {
    let mut game = session();
    let tower = place(&mut game, TowerKind::Basic, 3, 4);
    let on_tower = cell_center(&game, 3, 4);

    game.game_logic(
        &FrameInput::at(on_tower)
            .with_primary_click()
            .with_key_press(Key::Char('2')),
    );

    assert_eq!(
        game.last_outcomes(),
        [
            PlacementOutcome::Following {
                kind: TowerKind::Green
            },
            PlacementOutcome::Abandoned {
                kind: TowerKind::Green
            },
            PlacementOutcome::Selected { tower },
        ]
    );
    assert_eq!(game.sub_mode(), SubMode::ShowingRange);
    assert!(!game.cursor_visible());
    assert_eq!(game.menu().armed(), None);
    assert_eq!(game.money(), Money::new(120));
    assert_consistent(&game);
}

#[test]
fn buying_while_showing_range_deselects_the_tower() {
    let mut game = session();
    let tower = place(&mut game, TowerKind::Basic, 3, 4);

    buy(&mut game, TowerKind::Green);

    assert_eq!(game.sub_mode(), SubMode::Following);
    assert_eq!(game.selected(), None);
    assert!(game.tower(tower).is_some_and(|placed| !placed.entity().is_active()));
    assert_consistent(&game);
}

#[test]
fn buying_again_replaces_the_pending_purchase() {
    let mut game = session();

    buy(&mut game, TowerKind::Basic);
    buy(&mut game, TowerKind::Green);

    assert_eq!(
        game.last_outcomes(),
        [PlacementOutcome::Following {
            kind: TowerKind::Green
        }]
    );
    assert_eq!(
        game.purchaser().map(|entity| entity.kind()),
        Some(TowerKind::Green)
    );
    assert_eq!(game.money(), Money::new(200));
}

#[test]
fn tower_ids_are_unique_and_increasing() {
    let mut game = session();

    let first = place(&mut game, TowerKind::Basic, 0, 0);
    let second = place(&mut game, TowerKind::Basic, 4, 4);

    assert!(first < second);
}

#[test]
fn invalid_configuration_is_rejected_at_setup() {
    let mut config = GameConfig::default();
    config.world.columns = 0;

    let error = TowerDefense::new(config, Palette::default()).expect_err("empty grid");

    assert_eq!(error, SetupError::Config(ConfigError::EmptyGrid));
}

#[test]
fn oversized_grid_is_rejected_at_setup_instead_of_allocating() {
    let mut config = GameConfig::default();
    config.world.columns = 4_000_000;
    config.world.rows = 4_000_000;

    let error = TowerDefense::new(config, Palette::default()).expect_err("grid too large");

    assert_eq!(
        error,
        SetupError::Config(ConfigError::GridTooLarge {
            columns: 4_000_000,
            rows: 4_000_000,
        })
    );
}

#[test]
fn infinite_screen_is_rejected_at_setup() {
    let mut config = GameConfig::default();
    config.screen.width = f32::INFINITY;

    let error = TowerDefense::new(config, Palette::default()).expect_err("unreachable board");

    assert_eq!(error, SetupError::Config(ConfigError::NonFiniteLayout));
}

#[test]
fn waves_toggle_the_game_mode() {
    let mut game = session();
    assert_eq!(game.mode(), GameMode::Clear);

    game.start_wave();
    assert_eq!(game.mode(), GameMode::Wave);
    assert_eq!(game.wave(), 1);

    game.clear_wave();
    assert_eq!(game.mode(), GameMode::Clear);
    assert_eq!(game.wave(), 1);
}

struct Creep {
    position: Vec2,
}

const CREEP_COLOR: Color = Color::new(0.9, 0.1, 0.8, 1.0);

impl Paint for Creep {
    fn paint(&self, surface: &mut dyn Surface) {
        surface.fill_circle(self.position, 6.0, CREEP_COLOR);
    }
}

fn index_of(list: &DrawList, predicate: impl Fn(&DrawCommand) -> bool) -> Option<usize> {
    list.commands().iter().position(predicate)
}

#[test]
fn scene_paints_background_world_and_menu_first() {
    let game = session();
    let palette = Palette::default();
    let mut list = DrawList::new();

    game.paint(&mut list);

    let commands = list.commands();
    assert_eq!(
        commands[0],
        DrawCommand::Fill {
            color: palette.background
        }
    );
    assert_eq!(commands[1].color(), palette.world);
    let grid_lines = commands
        .iter()
        .filter(|command| matches!(command, DrawCommand::Line { .. }))
        .count();
    assert_eq!(grid_lines, 21 + 15);
    assert_eq!(commands[2 + grid_lines].color(), palette.menu);
}

#[test]
fn creeps_are_painted_under_towers() {
    let mut game = session();
    let _ = place(&mut game, TowerKind::Basic, 3, 4);
    game.start_wave();
    game.spawn_creep(Box::new(Creep {
        position: Vec2::new(300.0, 300.0),
    }));
    let palette = Palette::default();

    let mut list = DrawList::new();
    game.paint(&mut list);

    let creep = index_of(&list, |command| command.color() == CREEP_COLOR).expect("creep painted");
    let tower = index_of(&list, |command| {
        matches!(command, DrawCommand::FillRect { color, .. } if *color == palette.tower)
    })
    .expect("tower painted");
    assert!(creep < tower);

    game.clear_wave();
    let mut cleared = DrawList::new();
    game.paint(&mut cleared);
    assert!(index_of(&cleared, |command| command.color() == CREEP_COLOR).is_none());
}

#[test]
fn selected_tower_range_is_painted_before_the_towers() {
    let mut game = session();
    let _ = place(&mut game, TowerKind::Basic, 3, 4);
    let palette = Palette::default();

    let mut list = DrawList::new();
    game.paint(&mut list);

    let range = index_of(&list, |command| {
        matches!(command, DrawCommand::FillCircle { color, .. } if *color == palette.range)
    })
    .expect("range painted");
    let tower = index_of(&list, |command| {
        matches!(command, DrawCommand::FillRect { color, .. } if *color == palette.tower)
    })
    .expect("tower painted");
    assert!(range < tower);
}

#[test]
fn purchaser_range_turns_bad_over_blocked_cells() {
    let mut game = session();
    let _ = place(&mut game, TowerKind::Basic, 3, 4);
    let palette = Palette::default();
    buy(&mut game, TowerKind::Basic);

    game.game_logic(&FrameInput::at(cell_center(&game, 10, 10)));
    let mut free = DrawList::new();
    game.paint(&mut free);

    game.game_logic(&FrameInput::at(cell_center(&game, 2, 3)));
    let mut blocked = DrawList::new();
    game.paint(&mut blocked);

    let has_circle = |list: &DrawList, wanted: Color| {
        index_of(list, |command| {
            matches!(command, DrawCommand::FillCircle { color, .. } if *color == wanted)
        })
        .is_some()
    };
    assert!(has_circle(&free, palette.range));
    assert!(!has_circle(&free, palette.range_bad));
    assert!(has_circle(&blocked, palette.range_bad));
    assert!(!has_circle(&blocked, palette.range));
}
