use std::{io, num::ParseIntError, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),

    #[error("board of {rows}x{cols} cannot hold a snake of length {length}")]
    BoardTooSmall { rows: i32, cols: i32, length: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown option `{0}`")]
    UnknownFlag(String),

    #[error("option `{0}` needs a value")]
    MissingValue(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("high score file {path} is corrupt: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnakeError {
    #[error("cannot shrink a snake of length {length} by {count}, minimum is {min}")]
    TooShort { length: usize, count: usize, min: usize },
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
