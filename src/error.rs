//! Centralized error type for the cantata umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] cantata_core::Error),

    #[error("MIDI: {0}")]
    Midi(#[from] cantata_midi::Error),

    #[error("corpus: {0}")]
    Corpus(#[from] cantata_corpus::Error),

    #[error("GAN: {0}")]
    Gan(#[from] cantata_gan::Error),

    #[error("lyrics: {0}")]
    Lyrics(#[from] cantata_lyrics::Error),

    #[error("voice: {0}")]
    Voice(#[from] cantata_voice::Error),

    #[error("render: {0}")]
    Render(#[from] cantata_render::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
