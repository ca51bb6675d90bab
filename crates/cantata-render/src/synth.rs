//! MIDI to waveform rendering through a SoundFont.

use crate::error::{Error, Result};
use crate::wav::{encode_wav_file, WavConfig};
use rustysynth::{MidiFile, MidiFileSequencer, SoundFont, Synthesizer, SynthesizerSettings};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Seconds of tail kept after the last note for decay and reverb.
const DECAY_SECONDS: f64 = 3.0;

/// Render MIDI bytes through a SoundFont into stereo sample buffers.
pub fn render_midi_bytes(
    midi_bytes: &[u8],
    soundfont_bytes: &[u8],
    sample_rate: u32,
) -> Result<(Vec<f32>, Vec<f32>)> {
    let mut sf_cursor = Cursor::new(soundfont_bytes);
    let sound_font = Arc::new(
        SoundFont::new(&mut sf_cursor).map_err(|e| Error::SoundFont(e.to_string()))?,
    );

    let mut midi_cursor = Cursor::new(midi_bytes);
    let midi = Arc::new(
        MidiFile::new(&mut midi_cursor).map_err(|e| Error::Synthesis(e.to_string()))?,
    );

    let settings = SynthesizerSettings::new(sample_rate as i32);
    let synthesizer =
        Synthesizer::new(&sound_font, &settings).map_err(|e| Error::Synthesis(e.to_string()))?;

    let mut sequencer = MidiFileSequencer::new(synthesizer);
    sequencer.play(&midi, false);

    let total_seconds = midi.get_length() + DECAY_SECONDS;
    let sample_count = (sample_rate as f64 * total_seconds) as usize;
    debug!(sample_count, "rendering MIDI through SoundFont");

    let mut left = vec![0f32; sample_count];
    let mut right = vec![0f32; sample_count];
    sequencer.render(&mut left[..], &mut right[..]);

    Ok((left, right))
}

/// Render a MIDI file to a 16-bit stereo WAV file.
pub fn render_midi_file(
    midi_path: impl AsRef<Path>,
    soundfont_path: impl AsRef<Path>,
    out_path: impl AsRef<Path>,
    sample_rate: u32,
) -> Result<()> {
    let midi_bytes = std::fs::read(midi_path.as_ref())?;
    let soundfont_bytes = std::fs::read(soundfont_path.as_ref())?;

    let (left, right) = render_midi_bytes(&midi_bytes, &soundfont_bytes, sample_rate)?;
    encode_wav_file(&left, &right, out_path.as_ref(), &WavConfig::new(sample_rate))?;

    info!(
        out = %out_path.as_ref().display(),
        seconds = left.len() as f64 / sample_rate as f64,
        "music track rendered"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_soundfont_is_an_error() {
        let result = render_midi_bytes(b"junk midi", b"junk soundfont", 44_100);
        assert!(matches!(result, Err(Error::SoundFont(_))));
    }
}
