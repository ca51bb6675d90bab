//! Command-line entry point for the cantata pipeline.

use anyhow::{bail, Context};
use cantata::prelude::*;
use cantata_corpus::NormalizedCorpus;
use cantata_gan::{GanModelConfig, TrainConfig};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "cantata", version, about = "Turn a one-line prompt into a song")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Collect MIDI scores and normalize them into a corpus artifact
    Preprocess {
        /// Directory searched recursively for .mid/.midi files
        #[arg(long)]
        midi_dir: PathBuf,

        /// Output path for the corpus artifact
        #[arg(long, default_value = "corpus.bin")]
        out: PathBuf,

        /// Stop after collecting this many files
        #[arg(long)]
        max_files: Option<usize>,

        /// Piano-roll sampling rate in steps per second
        #[arg(long, default_value_t = 100)]
        fs: u32,
    },

    /// Train the melody model on a corpus artifact and log the losses
    Train {
        /// Corpus artifact produced by `preprocess`
        #[arg(long, default_value = "corpus.bin")]
        corpus: PathBuf,

        #[arg(long, default_value_t = 10_000)]
        epochs: usize,

        #[arg(long, default_value_t = 32)]
        batch_size: usize,

        /// Emit a status record every this many epochs
        #[arg(long, default_value_t = 1_000)]
        save_interval: usize,
    },

    /// Read a prompt from stdin and produce the final song
    Sing {
        /// SoundFont used to render the melody
        #[arg(long)]
        soundfont: PathBuf,

        /// Corpus artifact to train on before sampling
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Training epochs when a corpus is given
        #[arg(long, default_value_t = 1_000)]
        epochs: usize,

        /// External text-to-speech command; expects --text and --out flags
        #[arg(long)]
        voice_cmd: Option<PathBuf>,

        /// Directory for intermediate and final artifacts
        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    match Cli::parse().command {
        Command::Preprocess {
            midi_dir,
            out,
            max_files,
            fs,
        } => preprocess(midi_dir, out, max_files, fs),
        Command::Train {
            corpus,
            epochs,
            batch_size,
            save_interval,
        } => train(corpus, epochs, batch_size, save_interval),
        Command::Sing {
            soundfont,
            corpus,
            epochs,
            voice_cmd,
            out_dir,
        } => sing(soundfont, corpus, epochs, voice_cmd, out_dir),
    }
}

fn preprocess(midi_dir: PathBuf, out: PathBuf, max_files: Option<usize>, fs: u32) -> anyhow::Result<()> {
    let files = cantata_corpus::collect_score_files(&midi_dir, max_files.unwrap_or(usize::MAX))
        .with_context(|| format!("collecting scores under {}", midi_dir.display()))?;
    if files.is_empty() {
        bail!("no .mid/.midi files found under {}", midi_dir.display());
    }
    info!(count = files.len(), "scores collected");

    let report = cantata_corpus::normalize(&files, fs)?;
    if report.skipped > 0 {
        info!(skipped = report.skipped, "unparseable files skipped");
    }
    report.corpus.save(&out)?;
    info!(
        samples = report.corpus.len(),
        time_steps = report.corpus.time_steps(),
        out = %out.display(),
        "corpus artifact written"
    );
    Ok(())
}

fn train(corpus: PathBuf, epochs: usize, batch_size: usize, save_interval: usize) -> anyhow::Result<()> {
    let corpus = NormalizedCorpus::load(&corpus)
        .with_context(|| format!("loading corpus artifact {}", corpus.display()))?;

    let model = GanModelConfig::new();
    let config = TrainConfig::new()
        .with_epochs(epochs)
        .with_batch_size(batch_size)
        .with_save_interval(save_interval);

    let mut trainer = cantata_gan::GanTrainer::<cantata_gan::CpuBackend>::new(
        &model,
        config,
        Default::default(),
    );
    let statuses = trainer.train(&corpus)?;
    for status in &statuses {
        println!(
            "epoch {:>6}  d_loss {:.4}  d_acc {:.3}  g_loss {:.4}",
            status.epoch,
            status.discriminator_loss,
            status.discriminator_accuracy,
            status.generator_loss
        );
    }
    Ok(())
}

fn sing(
    soundfont: PathBuf,
    corpus: Option<PathBuf>,
    epochs: usize,
    voice_cmd: Option<PathBuf>,
    out_dir: PathBuf,
) -> anyhow::Result<()> {
    // Without a corpus the generator stays untrained: zero epochs over a
    // silent placeholder roll. Still useful for dry runs of the audio path.
    let (corpus, epochs) = match corpus {
        Some(path) => {
            let corpus = NormalizedCorpus::load(&path)
                .with_context(|| format!("loading corpus artifact {}", path.display()))?;
            (corpus, epochs)
        }
        None => (
            NormalizedCorpus::from_rolls(vec![cantata_core::PianoRoll::new(500)])?,
            0,
        ),
    };

    print!("What should the song be about? ");
    std::io::stdout().flush()?;
    let mut prompt = String::new();
    std::io::stdin().lock().read_line(&mut prompt)?;
    let prompt = prompt.trim();
    if prompt.is_empty() {
        bail!("empty prompt");
    }

    let mut config = PipelineConfig::new(soundfont, &out_dir);
    config.train = TrainConfig::new().with_epochs(epochs);

    let artifacts = match voice_cmd {
        Some(cmd) => SongPipeline::new(TemplateModel, CommandVoice::new(cmd), config)
            .run(prompt, &corpus)?,
        None => SongPipeline::new(TemplateModel, SilenceVoice, config).run(prompt, &corpus)?,
    };

    println!("\n{}\n", artifacts.lyrics);
    println!("song written to {}", artifacts.song_wav.display());
    Ok(())
}
