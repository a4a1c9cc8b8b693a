#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays a scripted tower defense session.

mod script;

use std::{
    fs, iter,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tower_defense_core::{FrameInput, GameConfig};
use tower_defense_rendering::{DrawList, Paint, Palette};
use tower_defense_system_placement::TowerDefense;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments accepted by the tower defense binary.
#[derive(Debug, Parser)]
#[command(name = "tower-defense")]
#[command(about = "Replays a scripted tower placement session headlessly")]
struct CliArgs {
    /// TOML file with `[game]` and `[palette]` overrides.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate; idle frames pad a short script.
    #[arg(long, default_value_t = 12)]
    frames: usize,
}

/// Settings file layout; every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SessionFile {
    game: GameConfig,
    palette: Palette,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let session = match args.config.as_deref() {
        Some(path) => load_session(path)?,
        None => SessionFile::default(),
    };
    let mut game =
        TowerDefense::new(session.game, session.palette).context("failed to set up the game")?;

    let script = script::scripted_session(&game);
    let rest = script
        .last()
        .map_or_else(|| game.world().origin(), |input| input.pointer);
    let frames = script
        .into_iter()
        .chain(iter::repeat_with(|| FrameInput::at(rest)))
        .take(args.frames);

    let mut surface = DrawList::new();
    for (frame, input) in frames.enumerate() {
        game.game_logic(&input);
        for outcome in game.last_outcomes() {
            info!(frame, ?outcome, "placement outcome");
        }

        surface.reset();
        game.paint(&mut surface);
        debug!(
            frame,
            commands = surface.len(),
            sub_mode = ?game.sub_mode(),
            cursor_visible = game.cursor_visible(),
            "frame painted"
        );
    }

    info!(
        money = %game.money(),
        towers = game.towers().len(),
        "session finished"
    );
    Ok(())
}

fn load_session(path: &Path) -> Result<SessionFile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_session(&text).with_context(|| format!("failed to parse config file {}", path.display()))
}

fn parse_session(text: &str) -> Result<SessionFile> {
    Ok(toml::from_str(text)?)
}
