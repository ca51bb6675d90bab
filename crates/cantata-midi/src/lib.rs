//! Reading and writing Standard MIDI Files as timed note events.
//!
//! Parsing pairs NoteOn/NoteOff messages into [`NoteEvent`]s with
//! seconds-based timing derived from the file's tempo map; writing lays a
//! flat list of notes back out as a single-track SMF at a fixed tempo.
//!
//! [`NoteEvent`]: cantata_core::NoteEvent

mod error;
mod file;

pub use error::{Error, Result};
pub use file::{
    parse_note_events, read_note_events, render_note_events, write_note_events, TEMPO_US_PER_BEAT,
    TICKS_PER_BEAT,
};
