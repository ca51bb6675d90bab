//! Two-pass corpus normalization and the on-disk tensor artifact.

use crate::error::{Error, Result};
use cantata_core::{PianoRoll, PITCH_COUNT};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, info, warn};

/// Stacked training tensor, `[samples, 128, time_steps]` row-major.
///
/// Every sample has the same number of time steps; shorter sources were
/// zero-padded on the trailing time axis during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCorpus {
    samples: usize,
    time_steps: usize,
    data: Vec<f32>,
}

impl NormalizedCorpus {
    /// Pad a set of rolls to their common maximum length and stack them.
    pub fn from_rolls(rolls: Vec<PianoRoll>) -> Result<Self> {
        if rolls.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        let max_time_steps = rolls
            .iter()
            .map(PianoRoll::time_steps)
            .max()
            .unwrap_or(0);

        let stride = PITCH_COUNT * max_time_steps;
        let mut data = Vec::with_capacity(rolls.len() * stride);
        let mut samples = 0;
        for mut roll in rolls {
            roll.pad_to(max_time_steps);
            data.extend_from_slice(roll.activations());
            samples += 1;
        }

        Ok(Self {
            samples,
            time_steps: max_time_steps,
            data,
        })
    }

    /// Number of samples (first tensor axis).
    pub fn len(&self) -> usize {
        self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }

    /// Time steps per sample (third tensor axis).
    pub fn time_steps(&self) -> usize {
        self.time_steps
    }

    /// Flat activations of one sample, `128 * time_steps` entries.
    pub fn sample(&self, index: usize) -> &[f32] {
        let stride = PITCH_COUNT * self.time_steps;
        &self.data[index * stride..(index + 1) * stride]
    }

    /// The whole tensor, flat.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Serialize to a binary artifact file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        bincode::serialize_into(BufWriter::new(file), self)?;
        info!(
            samples = self.samples,
            time_steps = self.time_steps,
            path = %path.as_ref().display(),
            "saved corpus artifact"
        );
        Ok(())
    }

    /// Load a previously saved artifact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let corpus: Self = bincode::deserialize_from(BufReader::new(file))?;
        debug!(
            samples = corpus.samples,
            time_steps = corpus.time_steps,
            "loaded corpus artifact"
        );
        Ok(corpus)
    }
}

/// Outcome of a normalization run.
#[derive(Debug)]
pub struct NormalizeReport {
    pub corpus: NormalizedCorpus,
    /// Files that failed to parse and were excluded.
    pub skipped: usize,
}

/// Encode every score file and stack the rolls into one training tensor.
///
/// Pass 1 parses and encodes each file at `fs` steps per second, keeping the
/// rolls so they are not re-parsed, and finds the maximum native length.
/// Pass 2 zero-pads each roll to that length and stacks them. Files that
/// fail to parse are skipped and counted, never fatal to the batch.
pub fn normalize(paths: &[impl AsRef<Path>], fs: u32) -> Result<NormalizeReport> {
    let mut rolls: Vec<PianoRoll> = Vec::with_capacity(paths.len());
    let mut skipped = 0usize;

    for path in paths {
        let path = path.as_ref();
        let notes = match cantata_midi::read_note_events(path) {
            Ok(notes) => notes,
            Err(e) => {
                warn!(path = %path.display(), "skipping unreadable score file: {e}");
                skipped += 1;
                continue;
            }
        };
        rolls.push(PianoRoll::encode(&notes, fs)?);
    }

    let corpus = NormalizedCorpus::from_rolls(rolls)?;
    info!(
        samples = corpus.samples,
        time_steps = corpus.time_steps,
        skipped, "normalized corpus"
    );

    Ok(NormalizeReport { corpus, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cantata_core::NoteEvent;
    use std::path::PathBuf;

    /// Write a MIDI file holding one long note so the encoded roll has a
    /// known native length at fs=100.
    fn write_score(dir: &Path, name: &str, steps: usize) -> PathBuf {
        let end = steps as f64 / 100.0;
        let notes = vec![NoteEvent::new(60, 0.0, end, 100).unwrap()];
        let path = dir.join(name);
        cantata_midi::write_note_events(&notes, &path).unwrap();
        path
    }

    #[test]
    fn test_distinct_lengths_pad_to_max() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_score(dir.path(), "short.mid", 200),
            write_score(dir.path(), "medium.mid", 350),
            write_score(dir.path(), "long.mid", 500),
        ];

        let report = normalize(&paths, 100).unwrap();
        assert_eq!(report.skipped, 0);
        assert_eq!(report.corpus.len(), 3);
        assert_eq!(report.corpus.time_steps(), 500);
        assert_eq!(report.corpus.data().len(), 3 * PITCH_COUNT * 500);

        // The 200-step sample is silent from column 200 onward.
        let short = report.corpus.sample(0);
        for pitch in 0..PITCH_COUNT {
            for step in 200..500 {
                assert_eq!(short[pitch * 500 + step], 0.0);
            }
        }
        // ...but active where the note was.
        assert!(short[60 * 500 + 100] > 0.0);
    }

    #[test]
    fn test_malformed_file_skipped_and_counted() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_score(dir.path(), "good.mid", 100);
        let bad = dir.path().join("bad.mid");
        std::fs::write(&bad, b"this is not midi").unwrap();

        let report = normalize(&[good, bad], 100).unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(report.corpus.len(), 1);
    }

    #[test]
    fn test_all_files_malformed_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.mid");
        std::fs::write(&bad, b"junk").unwrap();

        assert!(matches!(normalize(&[bad], 100), Err(Error::EmptyCorpus)));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![
            write_score(dir.path(), "a.mid", 50),
            write_score(dir.path(), "b.mid", 80),
        ];

        let first = normalize(&paths, 100).unwrap().corpus;
        let second = normalize(&paths, 100).unwrap().corpus;
        assert_eq!(first, second);
    }

    #[test]
    fn test_artifact_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![write_score(dir.path(), "a.mid", 40)];
        let corpus = normalize(&paths, 100).unwrap().corpus;

        let artifact = dir.path().join("corpus.bin");
        corpus.save(&artifact).unwrap();
        let reloaded = NormalizedCorpus::load(&artifact).unwrap();
        assert_eq!(corpus, reloaded);
    }
}
