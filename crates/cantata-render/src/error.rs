//! Error types for audio rendering and mixing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SoundFont error: {0}")]
    SoundFont(String),

    #[error("MIDI synthesis error: {0}")]
    Synthesis(String),

    #[error("WAV encode error: {0}")]
    Wav(String),

    #[error("channel length mismatch: left has {left} samples, right has {right}")]
    ChannelMismatch { left: usize, right: usize },

    #[error("external tool '{tool}' failed: {detail}")]
    ExternalTool { tool: String, detail: String },
}

impl From<hound::Error> for Error {
    fn from(e: hound::Error) -> Self {
        Error::Wav(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
