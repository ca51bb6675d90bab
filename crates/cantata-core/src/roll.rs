//! Piano-roll representation and the note-event codec.
//!
//! A [`PianoRoll`] is a row-major `[128, time_steps]` activity matrix where
//! row = MIDI pitch and column = one time step of `1/fs` seconds. Cells are
//! stored as `f32` so rolls can move in and out of model tensors unchanged;
//! anything greater than zero counts as "note on".

use crate::error::{Error, Result};
use crate::note::NoteEvent;

/// Number of pitch rows. Fixed by the MIDI note range.
pub const PITCH_COUNT: usize = 128;

/// Velocity assigned to notes reconstructed from a binary roll.
const DECODE_VELOCITY: u8 = 100;

/// Time-by-pitch activity matrix with a fixed 128-row pitch axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PianoRoll {
    /// Row-major activations, `PITCH_COUNT * time_steps` entries
    data: Vec<f32>,
    time_steps: usize,
}

impl PianoRoll {
    /// Create an all-silent roll with the given number of time steps.
    pub fn new(time_steps: usize) -> Self {
        Self {
            data: vec![0.0; PITCH_COUNT * time_steps],
            time_steps,
        }
    }

    /// Build a roll from a flat row-major activation buffer.
    ///
    /// The buffer length must be exactly `PITCH_COUNT * time_steps`.
    pub fn from_activations(data: Vec<f32>, time_steps: usize) -> Result<Self> {
        let expected = PITCH_COUNT * time_steps;
        if data.len() != expected {
            return Err(Error::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, time_steps })
    }

    /// Encode note events into a binary roll at `fs` steps per second.
    ///
    /// Each note marks steps `floor(start*fs)` through `floor(end*fs)`,
    /// always at least one step. Overlapping notes at the same pitch OR
    /// together; activation is never additive.
    pub fn encode(notes: &[NoteEvent], fs: u32) -> Result<Self> {
        if fs == 0 {
            return Err(Error::InvalidSamplingRate);
        }
        let fs_f = fs as f64;

        let mut last_step = 0usize;
        for note in notes {
            let end_step = (note.end * fs_f).floor() as usize;
            let start_step = (note.start * fs_f).floor() as usize;
            last_step = last_step.max(end_step.max(start_step + 1));
        }

        let mut roll = Self::new(if notes.is_empty() { 0 } else { last_step });
        for note in notes {
            let start_step = (note.start * fs_f).floor() as usize;
            let end_step = ((note.end * fs_f).floor() as usize).max(start_step + 1);
            for step in start_step..end_step {
                roll.set(note.pitch as usize, step);
            }
        }
        Ok(roll)
    }

    /// Decode the roll back into note events.
    ///
    /// Scans each pitch row for maximal contiguous runs of active steps and
    /// yields one note per run, spanning `run_start/fs` to `(run_end+1)/fs`
    /// at a fixed velocity. The iterator is lazy and can be restarted by
    /// calling `decode` again (or cloning it).
    pub fn decode(&self, fs: u32) -> NoteRuns<'_> {
        NoteRuns {
            roll: self,
            fs,
            pitch: 0,
            step: 0,
        }
    }

    /// Number of time steps (columns).
    pub fn time_steps(&self) -> usize {
        self.time_steps
    }

    /// Whether the cell at (pitch, step) is active.
    pub fn is_active(&self, pitch: usize, step: usize) -> bool {
        self.data[pitch * self.time_steps + step] > 0.0
    }

    /// Mark the cell at (pitch, step) active.
    pub fn set(&mut self, pitch: usize, step: usize) {
        self.data[pitch * self.time_steps + step] = 1.0;
    }

    /// One pitch row of activations.
    pub fn row(&self, pitch: usize) -> &[f32] {
        &self.data[pitch * self.time_steps..(pitch + 1) * self.time_steps]
    }

    /// Flat row-major activations.
    pub fn activations(&self) -> &[f32] {
        &self.data
    }

    /// Zero-pad the time axis on the right to `time_steps` columns.
    ///
    /// Padding never truncates; asking for fewer steps than the roll already
    /// has leaves it unchanged.
    pub fn pad_to(&mut self, time_steps: usize) {
        if time_steps <= self.time_steps {
            return;
        }
        let mut data = vec![0.0; PITCH_COUNT * time_steps];
        for pitch in 0..PITCH_COUNT {
            let src = pitch * self.time_steps;
            let dst = pitch * time_steps;
            data[dst..dst + self.time_steps]
                .copy_from_slice(&self.data[src..src + self.time_steps]);
        }
        self.data = data;
        self.time_steps = time_steps;
    }
}

/// Lazy iterator over the maximal active runs of a roll, one note per run.
#[derive(Debug, Clone)]
pub struct NoteRuns<'a> {
    roll: &'a PianoRoll,
    fs: u32,
    pitch: usize,
    step: usize,
}

impl Iterator for NoteRuns<'_> {
    type Item = NoteEvent;

    fn next(&mut self) -> Option<NoteEvent> {
        let steps = self.roll.time_steps();
        while self.pitch < PITCH_COUNT {
            while self.step < steps {
                if self.roll.is_active(self.pitch, self.step) {
                    let run_start = self.step;
                    let mut run_end = self.step;
                    while run_end + 1 < steps && self.roll.is_active(self.pitch, run_end + 1) {
                        run_end += 1;
                    }
                    self.step = run_end + 1;
                    let fs = self.fs as f64;
                    return Some(NoteEvent {
                        pitch: self.pitch as u8,
                        start: run_start as f64 / fs,
                        end: (run_end + 1) as f64 / fs,
                        velocity: DECODE_VELOCITY,
                    });
                }
                self.step += 1;
            }
            self.pitch += 1;
            self.step = 0;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(pitch: u8, start: f64, end: f64) -> NoteEvent {
        NoteEvent::new(pitch, start, end, 100).unwrap()
    }

    #[test]
    fn test_empty_roll_decodes_to_nothing() {
        let roll = PianoRoll::new(10);
        assert_eq!(roll.decode(100).count(), 0);
    }

    #[test]
    fn test_encode_marks_expected_steps() {
        let roll = PianoRoll::encode(&[note(60, 0.02, 0.05)], 100).unwrap();
        assert_eq!(roll.time_steps(), 5);
        assert!(!roll.is_active(60, 1));
        assert!(roll.is_active(60, 2));
        assert!(roll.is_active(60, 3));
        assert!(roll.is_active(60, 4));
    }

    #[test]
    fn test_encode_minimum_one_step() {
        // A note shorter than one step still occupies a full step.
        let roll = PianoRoll::encode(&[note(60, 0.001, 0.002)], 100).unwrap();
        assert!(roll.is_active(60, 0));
        assert_eq!(roll.decode(100).count(), 1);
    }

    #[test]
    fn test_overlap_is_logical_or() {
        let notes = [note(60, 0.0, 0.04), note(60, 0.02, 0.06)];
        let roll = PianoRoll::encode(&notes, 100).unwrap();
        // Overlapping notes merge into a single run.
        let decoded: Vec<_> = roll.decode(100).collect();
        assert_eq!(decoded.len(), 1);
        assert!((decoded[0].end - 0.06).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip_on_grid() {
        // Grid-aligned, non-overlapping notes survive encode/decode exactly.
        let fs = 100;
        let notes = [
            note(60, 0.10, 0.20),
            note(64, 0.20, 0.35),
            note(67, 0.50, 0.51),
        ];
        let roll = PianoRoll::encode(&notes, fs).unwrap();
        let decoded: Vec<_> = roll.decode(fs).collect();
        assert_eq!(decoded.len(), notes.len());
        for (orig, dec) in notes.iter().zip(decoded.iter()) {
            assert_eq!(orig.pitch, dec.pitch);
            assert!((orig.start - dec.start).abs() <= 1.0 / fs as f64);
            assert!((orig.end - dec.end).abs() <= 1.0 / fs as f64);
        }
    }

    #[test]
    fn test_single_step_run_has_positive_duration() {
        let mut roll = PianoRoll::new(10);
        roll.set(72, 4);
        let decoded: Vec<_> = roll.decode(100).collect();
        assert_eq!(decoded.len(), 1);
        assert!((decoded[0].duration() - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_decode_is_restartable() {
        let roll = PianoRoll::encode(&[note(60, 0.0, 0.1)], 100).unwrap();
        let first: Vec<_> = roll.decode(100).collect();
        let second: Vec<_> = roll.decode(100).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pad_to_extends_with_silence() {
        let mut roll = PianoRoll::encode(&[note(60, 0.0, 0.02)], 100).unwrap();
        roll.pad_to(10);
        assert_eq!(roll.time_steps(), 10);
        assert!(roll.is_active(60, 1));
        assert!(!roll.is_active(60, 5));
        // Padding to fewer steps is a no-op.
        roll.pad_to(4);
        assert_eq!(roll.time_steps(), 10);
    }

    #[test]
    fn test_from_activations_checks_shape() {
        assert!(PianoRoll::from_activations(vec![0.0; PITCH_COUNT * 4], 4).is_ok());
        assert!(PianoRoll::from_activations(vec![0.0; 100], 4).is_err());
    }
}
