use glam::Vec2;
use tower_defense_core::{CellCoord, FrameInput, Key, TowerKind};
use tower_defense_system_placement::TowerDefense;

/// Frames replayed by the CLI: buy, place, deselect, a blocked placement,
/// a second purchase, reselection and finally an unaffordable purchase.
pub(crate) fn scripted_session(game: &TowerDefense) -> Vec<FrameInput> {
    let basic_button = button_center(game, TowerKind::Basic);
    let first = cell_center(game, 3, 4);
    let free = cell_center(game, 10, 8);
    let overlapping = cell_center(game, 2, 3);
    let second = cell_center(game, 8, 2);
    let far = cell_center(game, 12, 10);

    vec![
        FrameInput::at(basic_button).with_primary_click(),
        FrameInput::at(first),
        FrameInput::at(first).with_primary_click(),
        FrameInput::at(free).with_primary_click(),
        FrameInput::at(free).with_key_press(Key::Char('2')),
        FrameInput::at(overlapping).with_primary_click(),
        FrameInput::at(second).with_key_press(Key::Char('2')),
        FrameInput::at(second).with_primary_click(),
        FrameInput::at(first).with_primary_click(),
        FrameInput::at(far).with_key_press(Key::Char('1')),
        FrameInput::at(far).with_primary_click(),
    ]
}

fn button_center(game: &TowerDefense, kind: TowerKind) -> Vec2 {
    game.menu()
        .entries()
        .iter()
        .find(|entry| entry.kind() == kind)
        .map_or(game.menu().bounds().center(), |entry| entry.button().center())
}

fn cell_center(game: &TowerDefense, column: u32, row: u32) -> Vec2 {
    let world = game.world();
    let column = column.min(world.columns().saturating_sub(1));
    let row = row.min(world.rows().saturating_sub(1));
    world.cell_top_left(CellCoord::new(column, row)) + world.cell_size() * 0.5
}
