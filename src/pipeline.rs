//! End-to-end prompt-to-song orchestration.
//!
//! Chains the subsystem crates in order: lyrics from the prompt, a freshly
//! trained generator sampled into a piano roll, the roll written out as MIDI,
//! the MIDI rendered through a SoundFont, the lyrics spoken by the voice
//! backend, and finally both stems mixed into one song file.

use crate::error::Result;
use cantata_core::NoteEvent;
use cantata_gan::{sample, CpuBackend, GanModelConfig, GanTrainer, SampleConfig, TrainConfig};
use cantata_lyrics::{LyricsGenerator, TextGenerator};
use cantata_midi::write_note_events;
use cantata_render::{mix_to_song, render_midi_file};
use cantata_voice::VoiceSynth;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Everything the pipeline needs besides the prompt and the corpus.
#[derive(Debug)]
pub struct PipelineConfig {
    /// SoundFont used to render the generated MIDI
    pub soundfont: PathBuf,
    /// Directory receiving every intermediate and final artifact
    pub work_dir: PathBuf,
    /// Piano-roll sampling rate in steps per second
    pub fs: u32,
    /// Audio sample rate of the rendered stems
    pub sample_rate: u32,
    pub model: GanModelConfig,
    pub train: TrainConfig,
    pub sample: SampleConfig,
}

impl PipelineConfig {
    pub fn new(soundfont: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            soundfont: soundfont.into(),
            work_dir: work_dir.into(),
            fs: 100,
            sample_rate: 44_100,
            model: GanModelConfig::new(),
            train: TrainConfig::new(),
            sample: SampleConfig::new(),
        }
    }
}

/// Paths of the files a pipeline run produced, plus the lyrics text.
#[derive(Debug, Clone, PartialEq)]
pub struct SongArtifacts {
    pub lyrics: String,
    pub lyrics_txt: PathBuf,
    pub midi: PathBuf,
    pub music_wav: PathBuf,
    pub voice_wav: PathBuf,
    pub song_wav: PathBuf,
}

/// The full pipeline, generic over the text and voice backends so tests can
/// substitute cheap deterministic ones.
pub struct SongPipeline<T: TextGenerator, V: VoiceSynth> {
    lyrics: LyricsGenerator<T>,
    voice: V,
    config: PipelineConfig,
}

impl<T: TextGenerator, V: VoiceSynth> SongPipeline<T, V> {
    pub fn new(model: T, voice: V, config: PipelineConfig) -> Self {
        Self {
            lyrics: LyricsGenerator::new(model),
            voice,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage, returning the artifact paths.
    ///
    /// Training runs from scratch each call; pass a small epoch count for
    /// quick runs. The corpus can have any length, the trainer fits samples
    /// onto the model's grid.
    pub fn run(&self, prompt: &str, corpus: &cantata_corpus::NormalizedCorpus) -> Result<SongArtifacts> {
        std::fs::create_dir_all(&self.config.work_dir)?;

        let lyrics = self.lyrics.generate(prompt)?;
        info!(chars = lyrics.len(), "lyrics generated");
        let lyrics_txt = save_lyrics(&lyrics, &self.config.work_dir)?;

        let melody = self.compose(corpus)?;
        let midi = self.config.work_dir.join("melody.mid");
        write_note_events(&melody, &midi)?;

        let music_wav = self.config.work_dir.join("music.wav");
        render_midi_file(&midi, &self.config.soundfont, &music_wav, self.config.sample_rate)?;

        let voice_wav = self.config.work_dir.join("voice.wav");
        self.voice.synthesize(&lyrics, &voice_wav)?;

        let song_wav = self.config.work_dir.join("song.wav");
        mix_to_song(&music_wav, &voice_wav, &song_wav)?;

        info!(song = %song_wav.display(), "pipeline finished");
        Ok(SongArtifacts {
            lyrics,
            lyrics_txt,
            midi,
            music_wav,
            voice_wav,
            song_wav,
        })
    }

    /// Train a generator on the corpus and sample one melody from it.
    pub fn compose(&self, corpus: &cantata_corpus::NormalizedCorpus) -> Result<Vec<NoteEvent>> {
        let mut trainer =
            GanTrainer::<CpuBackend>::new(&self.config.model, self.config.train.clone(), Default::default());
        let statuses = trainer.train(corpus)?;
        if let Some(last) = statuses.last() {
            info!(
                epoch = last.epoch,
                d_loss = last.discriminator_loss,
                g_loss = last.generator_loss,
                "training finished"
            );
        }

        let roll = sample(trainer.generator(), &self.config.sample, &Default::default())?;
        let notes: Vec<NoteEvent> = roll.decode(self.config.fs).collect();
        if notes.is_empty() {
            warn!("sampled roll decoded to zero notes; the MIDI will be silent");
        }
        Ok(notes)
    }
}

/// Write lyrics next to the other artifacts for inspection.
pub fn save_lyrics(lyrics: &str, work_dir: &Path) -> Result<PathBuf> {
    let path = work_dir.join("lyrics.txt");
    std::fs::write(&path, lyrics)?;
    Ok(path)
}
