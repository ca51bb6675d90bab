//! 16-bit PCM WAV encoding using hound.

use crate::error::{Error, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;

/// WAV encoder configuration; output is always 16-bit stereo PCM.
#[derive(Debug, Clone)]
pub struct WavConfig {
    pub sample_rate: u32,
}

impl WavConfig {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }
}

impl Default for WavConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
        }
    }
}

/// Encode stereo float samples (normalized -1.0 to 1.0) to a WAV file.
pub fn encode_wav_file(left: &[f32], right: &[f32], path: &Path, config: &WavConfig) -> Result<()> {
    if left.len() != right.len() {
        return Err(Error::ChannelMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    let spec = WavSpec {
        channels: 2,
        sample_rate: config.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for (l, r) in left.iter().zip(right.iter()) {
        writer.write_sample(float_to_i16(*l))?;
        writer.write_sample(float_to_i16(*r))?;
    }
    writer.finalize()?;
    Ok(())
}

/// Encode mono float samples (normalized -1.0 to 1.0) to a WAV file.
pub fn encode_wav_file_mono(samples: &[f32], path: &Path, config: &WavConfig) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: config.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for sample in samples {
        writer.write_sample(float_to_i16(*sample))?;
    }
    writer.finalize()?;
    Ok(())
}

/// Convert a float sample to 16-bit with clipping.
#[inline]
fn float_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0) as i16
}
