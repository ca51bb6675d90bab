//! MIDI corpus preprocessing for GAN training.
//!
//! Walks a directory tree for score files, encodes each into a piano roll,
//! pads every roll to the corpus-wide maximum length and stacks them into a
//! single `[N, 128, max_time_steps]` training tensor that can be saved to and
//! reloaded from disk.

mod collect;
mod error;
mod normalize;

pub use collect::collect_score_files;
pub use error::{Error, Result};
pub use normalize::{normalize, NormalizeReport, NormalizedCorpus};
