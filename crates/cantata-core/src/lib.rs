//! Core symbolic-music types for cantata.
//!
//! Defines [`NoteEvent`] (a pitched note with start/end times in seconds) and
//! [`PianoRoll`] (a fixed-height time-by-pitch activity matrix), plus the
//! codec between them. Everything downstream - corpus normalization, GAN
//! training, MIDI export - speaks these two types.

mod error;
mod note;
mod roll;

pub use error::{Error, Result};
pub use note::NoteEvent;
pub use roll::{NoteRuns, PianoRoll, PITCH_COUNT};
