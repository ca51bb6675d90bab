//! # Cantata - prompt-to-song pipeline
//!
//! Umbrella crate coordinating the subsystems that turn a one-line prompt
//! into a finished song file:
//!
//! - **cantata-core** - note events and the binary piano-roll grid
//! - **cantata-midi** - Standard MIDI File reading and writing
//! - **cantata-corpus** - score collection and corpus normalization
//! - **cantata-gan** - the adversarial melody model (burn, CPU backend)
//! - **cantata-lyrics** - prompt shaping and lyrics generation
//! - **cantata-voice** - spoken-voice synthesis backends
//! - **cantata-render** - SoundFont rendering, WAV encoding, ffmpeg mixdown
//!
//! ## Quick start
//!
//! ```ignore
//! use cantata::prelude::*;
//!
//! let config = PipelineConfig::new("assets/piano.sf2", "out/");
//! let pipeline = SongPipeline::new(TemplateModel, SilenceVoice, config);
//! let report = cantata_corpus::normalize(&midi_paths, 100)?;
//! let artifacts = pipeline.run("a song about the sea", &report.corpus)?;
//! println!("{}", artifacts.song_wav.display());
//! ```

/// Re-export of cantata-core for direct access
pub use cantata_core as core;
pub use cantata_corpus as corpus;
pub use cantata_gan as gan;
pub use cantata_lyrics as lyrics;
pub use cantata_midi as midi;
pub use cantata_render as render;
pub use cantata_voice as voice;

mod error;
mod pipeline;

pub use error::{Error, Result};
pub use pipeline::{save_lyrics, PipelineConfig, SongArtifacts, SongPipeline};

/// Common imports for pipeline users.
pub mod prelude {
    pub use crate::pipeline::{PipelineConfig, SongArtifacts, SongPipeline};
    pub use crate::{Error, Result};
    pub use cantata_core::{NoteEvent, PianoRoll};
    pub use cantata_lyrics::{SamplingParams, TemplateModel, TextGenerator};
    pub use cantata_voice::{CommandVoice, SilenceVoice, VoiceSynth};
}
