//! Adversarial piano-roll generation.
//!
//! A small convolutional GAN over `[128, time_steps]` piano rolls: the
//! generator upsamples a Gaussian noise vector into a tanh-activated roll,
//! the discriminator scores rolls as real or generated, and [`GanTrainer`]
//! runs the standard alternating minibatch protocol against a
//! [`NormalizedCorpus`](cantata_corpus::NormalizedCorpus). Sampling
//! thresholds the generator output back into a binary [`PianoRoll`]
//! (cantata_core::PianoRoll) for MIDI export.

mod backend;
mod error;
mod loss;
mod model;
mod sampler;
mod trainer;

pub use backend::{CpuBackend, CpuInnerBackend};
pub use error::{Error, Result};
pub use loss::bce_with_logits;
pub use model::{Discriminator, GanModelConfig, Generator};
pub use sampler::{sample, SampleConfig};
pub use trainer::{GanTrainer, TrainConfig, TrainStatus};
