use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to access highscore file '{}': {source}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed highscore file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Terminal is {have_width}x{have_height}, the board needs {need_width}x{need_height}")]
    TerminalTooSmall { have_width: u16, have_height: u16, need_width: u16, need_height: u16 },

    #[error("Terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
