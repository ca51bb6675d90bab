//! Error types for corpus preprocessing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no score file could be parsed; nothing to normalize")]
    EmptyCorpus,

    #[error("corpus artifact error: {0}")]
    Artifact(String),

    #[error("Core error: {0}")]
    Core(#[from] cantata_core::Error),
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Artifact(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
