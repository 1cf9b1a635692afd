use std::{fs, io, path::PathBuf};

use crate::error::StoreError;

/// Where the high score lives between runs.
pub trait HighScoreStore {
    /// The stored value, 0 when nothing has been stored yet.
    fn read(&mut self) -> Result<u64, StoreError>;

    fn write(&mut self, score: u64) -> Result<(), StoreError>;
}

/// Keeps the score as a plain decimal number in a file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileStore { path: path.into() }
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}

impl HighScoreStore for FileStore {
    fn read(&mut self) -> Result<u64, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.io_error(e)),
        };

        let contents = contents.trim();
        if contents.is_empty() {
            return Ok(0);
        }

        contents.parse().map_err(|source| StoreError::Parse { path: self.path.clone(), source })
    }

    fn write(&mut self, score: u64) -> Result<(), StoreError> {
        fs::write(&self.path, score.to_string()).map_err(|e| self.io_error(e))
    }
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub value: u64,
    pub writes: usize,
    pub fail_writes: bool,
}

#[cfg(test)]
impl HighScoreStore for MemoryStore {
    fn read(&mut self) -> Result<u64, StoreError> {
        Ok(self.value)
    }

    fn write(&mut self, score: u64) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Io {
                path: PathBuf::from("memory"),
                source: io::Error::new(io::ErrorKind::Other, "read-only"),
            });
        }

        self.value = score;
        self.writes += 1;
        Ok(())
    }
}
