//! Error types for core symbolic-music operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid note: end time {end} is not after start time {start}")]
    InvalidNote { start: f64, end: f64 },

    #[error("invalid pitch {0}: MIDI note numbers are 0-127")]
    InvalidPitch(u8),

    #[error("shape mismatch: expected {expected} activations, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("invalid sampling rate: fs must be positive")]
    InvalidSamplingRate,
}

pub type Result<T> = std::result::Result<T, Error>;
