//! Note events - the symbolic unit everything else is built from.

use crate::error::{Error, Result};

/// A single pitched note with absolute times in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    /// MIDI note number (0-127)
    pub pitch: u8,

    /// Onset time in seconds
    pub start: f64,

    /// Release time in seconds (always after `start`)
    pub end: f64,

    /// MIDI velocity (0-127)
    pub velocity: u8,
}

impl NoteEvent {
    /// Create a note event, enforcing `end > start` and the MIDI pitch range.
    pub fn new(pitch: u8, start: f64, end: f64, velocity: u8) -> Result<Self> {
        if pitch > 127 {
            return Err(Error::InvalidPitch(pitch));
        }
        if end <= start {
            return Err(Error::InvalidNote { start, end });
        }
        Ok(Self {
            pitch,
            start,
            end,
            velocity,
        })
    }

    /// Note duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_note() {
        let note = NoteEvent::new(60, 0.5, 1.0, 100).unwrap();
        assert_eq!(note.pitch, 60);
        assert!((note.duration() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_duration_rejected() {
        assert!(NoteEvent::new(60, 1.0, 1.0, 100).is_err());
    }

    #[test]
    fn test_reversed_times_rejected() {
        assert!(NoteEvent::new(60, 2.0, 1.0, 100).is_err());
    }

    #[test]
    fn test_pitch_out_of_range_rejected() {
        // Pitch 128 would index past the roll's 128 rows if it got through.
        assert!(matches!(
            NoteEvent::new(128, 0.0, 0.1, 100),
            Err(Error::InvalidPitch(128))
        ));
        assert!(NoteEvent::new(127, 0.0, 0.1, 100).is_ok());
    }
}
