pub mod board;
pub mod collision;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod render;
pub mod score;
pub mod snake;
pub mod sound;
pub mod store;
pub mod term;

use std::time::Instant;

use log::info;

use crate::board::Board;
use crate::config::{Config, CHIME_DURATION, TICK_INTERVAL};
use crate::error::Result;
use crate::game::{stop_on_signals, Game, SnakeGame};
use crate::input::{Command, Keyboard};
use crate::render::TermRenderer;
use crate::sound::Chime;
use crate::store::FileStore;
use crate::term::TermManager;

/// Sets up the terminal, shows the intro and plays until the player quits.
/// The terminal is restored on every way out.
pub fn run(cfg: &Config) -> Result<()> {
    let mut term = TermManager::new()?;
    let (width, height) = term.size();
    let board = Board::for_terminal(width, height);
    info!("Terminal is {}x{}, board is {}x{}", width, height, board.cols(), board.rows());

    let store = FileStore::new(&cfg.score_file);
    let game = Game::new(board, cfg.boundary, store, rand::thread_rng(), Instant::now())?;

    term.setup()?;
    let keyboard = Keyboard::new(cfg.bindings);
    let mut renderer = TermRenderer::new(term, cfg.debug);

    renderer.show_intro(cfg.bindings)?;
    if cfg.bindings.command_for(&keyboard.read_key_blocking()?) == Some(Command::Quit) {
        return renderer.restore();
    }

    let chime = Chime::new(cfg.sound, CHIME_DURATION);
    let mut snake_game = SnakeGame::new(game, keyboard, renderer, chime, TICK_INTERVAL);
    stop_on_signals(&snake_game.shutdown_flag())?;
    let result = snake_game.play();
    snake_game.renderer_mut().restore()?;
    result
}
