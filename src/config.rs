use std::{path::PathBuf, time::Duration};

use crate::error::ConfigError;
use crate::input::KeyBindings;

pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
pub const START_SIZE: usize = 5;
pub const GROW_RATE: usize = 3;
pub const SCORE_MULTIPLIER: u64 = 20;
pub const MIN_SNAKE_LENGTH: usize = 3;

/// The board never grows past this, however large the terminal is.
pub const MAX_ROWS: i32 = 100;
pub const MAX_COLS: i32 = 100;

/// Random samples tried before food placement falls back to scanning free cells.
pub const PLACEMENT_ATTEMPTS: usize = 1000;

pub const CHIME_DURATION: Duration = Duration::from_millis(250);

const SCORE_FILE_NAME: &str = "tsnake_score";
const LOG_FILE_NAME: &str = "tsnake.log";

pub const USAGE: &str = "\
Usage: tsnake [OPTIONS]

Options:
  -v, --vim                Use hjkl instead of wasd
  -n, --no-bounds          Wrap around the board edges instead of dying
  -s, --sound              Chime when food is eaten
  -d, --debug              Show debug info and log at debug level
      --score-file <PATH>  Where the high score is kept
      --log-file <PATH>    Where the log is written
  -h, --help               Print this help";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryPolicy {
    Bounded,
    Wrap,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub bindings: KeyBindings,
    pub boundary: BoundaryPolicy,
    pub sound: bool,
    pub debug: bool,
    pub score_file: PathBuf,
    pub log_file: PathBuf,
    pub help: bool,
}

impl Default for Config {
    fn default() -> Self {
        let tmp = std::env::temp_dir();
        Config {
            bindings: KeyBindings::Classic,
            boundary: BoundaryPolicy::Bounded,
            sound: false,
            debug: false,
            score_file: tmp.join(SCORE_FILE_NAME),
            log_file: tmp.join(LOG_FILE_NAME),
            help: false,
        }
    }
}

impl Config {
    /// Parses the arguments following the program name.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cfg = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-v" | "--vim" => cfg.bindings = KeyBindings::Vim,
                "-n" | "--no-bounds" => cfg.boundary = BoundaryPolicy::Wrap,
                "-s" | "--sound" => cfg.sound = true,
                "-d" | "--debug" => cfg.debug = true,
                "-h" | "--help" => cfg.help = true,
                "--score-file" => cfg.score_file = value_for(&arg, args.next())?,
                "--log-file" => cfg.log_file = value_for(&arg, args.next())?,
                _ => return Err(ConfigError::UnknownFlag(arg)),
            }
        }

        Ok(cfg)
    }
}

fn value_for(flag: &str, value: Option<String>) -> Result<PathBuf, ConfigError> {
    value
        .map(PathBuf::from)
        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))
}
