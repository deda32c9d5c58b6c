use thiserror::Error;

use crate::pit::{MAX_PIT_SIZE, MIN_PIT_SIZE};

#[derive(Debug, Error)]
pub enum Error {
    #[error("pit size must be between {MIN_PIT_SIZE} and {MAX_PIT_SIZE}, got {0}")]
    InvalidPitSize(usize),
    #[error("tick interval must be a positive number of milliseconds, got {0}")]
    InvalidSpeed(f64),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
