//! Text-to-speech capability boundary.
//!
//! The pipeline only ever needs "lyric text in, waveform file out", so that
//! is the whole interface. [`CommandVoice`] shells out to whatever TTS
//! program is configured; [`SilenceVoice`] writes a silent placeholder so
//! the pipeline runs end to end on machines with no speech model installed.

mod error;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Text-in, waveform-file-out capability of a speech model.
pub trait VoiceSynth {
    /// Render `text` as speech into a WAV file at `out`.
    fn synthesize(&self, text: &str, out: &Path) -> Result<()>;
}

/// Voice synthesis through an external TTS program.
///
/// Invoked as `<program> --text <lyrics> --out <path>`; a nonzero exit
/// status surfaces as [`Error::ExternalTool`] with the captured stderr.
#[derive(Debug, Clone)]
pub struct CommandVoice {
    program: PathBuf,
}

impl CommandVoice {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl VoiceSynth for CommandVoice {
    fn synthesize(&self, text: &str, out: &Path) -> Result<()> {
        debug!(program = %self.program.display(), "invoking TTS program");
        let output = Command::new(&self.program)
            .arg("--text")
            .arg(text)
            .arg("--out")
            .arg(out)
            .output()
            .map_err(|e| Error::ExternalTool {
                tool: self.program.display().to_string(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::ExternalTool {
                tool: self.program.display().to_string(),
                detail: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        info!(out = %out.display(), "voice track rendered");
        Ok(())
    }
}

/// Placeholder voice: a silent mono WAV, one tenth of a second per word.
///
/// Keeps the mixing stage honest in tests and model-less demo runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilenceVoice;

impl SilenceVoice {
    const SAMPLE_RATE: u32 = 22_050;
    const SECONDS_PER_WORD: f64 = 0.1;
}

impl VoiceSynth for SilenceVoice {
    fn synthesize(&self, text: &str, out: &Path) -> Result<()> {
        let words = text.split_whitespace().count().max(1);
        let samples = (words as f64 * Self::SECONDS_PER_WORD * Self::SAMPLE_RATE as f64) as usize;

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: Self::SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(out, spec)?;
        for _ in 0..samples {
            writer.write_sample(0i16)?;
        }
        writer.finalize()?;
        debug!(words, samples, "wrote silent voice placeholder");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_voice_writes_wav() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("voice.wav");
        SilenceVoice.synthesize("three short words", &out).unwrap();

        let reader = hound::WavReader::open(&out).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 22_050);
        // 3 words at 0.1 s per word.
        assert_eq!(reader.len(), (3.0 * 0.1 * 22_050.0) as u32);
    }

    #[test]
    fn test_silence_voice_empty_text_still_audible_length() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("voice.wav");
        SilenceVoice.synthesize("", &out).unwrap();
        let reader = hound::WavReader::open(&out).unwrap();
        assert!(reader.len() > 0);
    }

    #[test]
    fn test_missing_program_is_external_tool_error() {
        let dir = tempfile::tempdir().unwrap();
        let voice = CommandVoice::new("/definitely/not/a/tts/binary");
        let result = voice.synthesize("hello", &dir.path().join("v.wav"));
        assert!(matches!(result, Err(Error::ExternalTool { .. })));
    }
}
