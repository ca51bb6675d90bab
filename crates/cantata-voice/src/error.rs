//! Error types for voice synthesis.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("external tool '{tool}' failed: {detail}")]
    ExternalTool { tool: String, detail: String },

    #[error("WAV write error: {0}")]
    Wav(String),
}

impl From<hound::Error> for Error {
    fn from(e: hound::Error) -> Self {
        Error::Wav(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
