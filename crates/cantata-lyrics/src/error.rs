//! Error types for lyric generation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("text generation failed: {0}")]
    Generation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
