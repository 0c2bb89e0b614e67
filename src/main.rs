//! Stitchwork - Entry Point
//!
//! Initializes logging and the terminal, dresses a demo character from the
//! loaded data, and runs the armor layering screen.

use std::fs::OpenOptions;
use std::io;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use stitchwork::character::{Attitude, Character};
use stitchwork::config::{config_path, Config};
use stitchwork::data::DataManager;
use stitchwork::game::{Game, Target};
use stitchwork::ui::TerminalUi;

fn main() -> Result<()> {
    let config = Config::load(&config_path())?;

    // Initialize logging to file (to avoid interfering with TUI)
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("stitchwork.log")?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str())
    )
    .target(env_logger::Target::Pipe(Box::new(log_file)))
    .init();

    log::info!("Starting Stitchwork v{}", env!("CARGO_PKG_VERSION"));

    let keys = config.keybindings()?;
    let data = DataManager::new(&config.data_dir);
    if let Err(e) = data.check_consistency() {
        log::error!("{}", e);
    }

    let mut game = build_demo(data);
    let target = if std::env::args().any(|a| a == "--npc") {
        Target::Npc(0)
    } else {
        Target::Avatar
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut ui = TerminalUi::new(Terminal::new(backend)?, keys);

    let result = game.run_armor_layers(&mut ui, target);

    // Restore terminal
    disable_raw_mode()?;
    execute!(ui.terminal_mut().backend_mut(), LeaveAlternateScreen)?;
    ui.terminal_mut().show_cursor()?;

    // Report any errors
    if let Err(ref e) = result {
        log::error!("Exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    for message in game.messages() {
        println!("{}", message.text);
    }

    log::info!("Stitchwork shut down cleanly after {} turns", game.turn());
    result
}

/// A survivor with a few badly ordered layers, and a friend next to them
fn build_demo(data: DataManager) -> Game {
    let mut game = Game::new(data, Character::avatar("Survivor"));

    let worn = [
        "undershirt", "tshirt", "trenchcoat", "hoodie", "jeans", "boots", "socks", "backpack", "glasses_eye",
    ];
    for id in worn {
        if let Some(item) = game.spawn_item(id) {
            game.avatar.worn.push(item);
        }
    }
    let pack = game.avatar.worn.iter().position(|i| i.type_id == "backpack");
    if let Some(item) = pack.and_then(|p| game.avatar.worn.get_mut(p)) {
        item.contents_ml = 2_500;
    }

    for id in ["kevlar", "scarf", "holster_ankle", "gloves_work", "fanny", "9mm_fmj"] {
        if let Some(item) = game.spawn_item(id) {
            game.avatar.inventory.push(item);
        }
    }

    let mut friend = Character::npc("Ana", (1, 0), Attitude::Friendly);
    for id in ["tshirt", "hoodie", "sleeves", "jeans"] {
        if let Some(item) = game.spawn_item(id) {
            friend.worn.push(item);
        }
    }
    game.npcs.push(friend);

    game
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_backpack_is_filled() {
        let game = build_demo(DataManager::default());
        let pack = game.avatar.worn.iter().find(|i| i.type_id == "backpack").unwrap();
        assert_eq!(pack.contents_ml, 2_500);
        assert_eq!(game.npcs.len(), 1);
    }
}
