use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot inspect {}: {source}", .path.display())]
    RootUnreachable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no folder is open")]
    NoTree,
    #[error("clipboard error: {0}")]
    Clipboard(String),
}
