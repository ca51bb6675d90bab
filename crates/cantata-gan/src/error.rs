//! Error types for GAN training and sampling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("shape mismatch: generator produced {actual} activations, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("corpus too small: {samples} samples, batch size {batch_size}")]
    CorpusTooSmall { samples: usize, batch_size: usize },

    #[error("Core error: {0}")]
    Core(#[from] cantata_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
