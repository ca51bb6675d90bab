//! Audio output stages of the pipeline.
//!
//! Takes the reconstructed MIDI through a SoundFont synthesizer into a PCM
//! waveform, encodes waveforms as 16-bit WAV, and mixes the music and voice
//! stems into the final song with ffmpeg.

mod error;
mod mix;
mod synth;
mod wav;

pub use error::{Error, Result};
pub use mix::{ffmpeg_args, mix_to_song};
pub use synth::{render_midi_bytes, render_midi_file};
pub use wav::{encode_wav_file, encode_wav_file_mono, WavConfig};
