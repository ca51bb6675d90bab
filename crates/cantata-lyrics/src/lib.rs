//! Lyric generation front-end.
//!
//! The actual language model sits behind the narrow [`TextGenerator`]
//! capability (prompt in, continuation out), so nothing here depends on any
//! model library. This crate owns the part that is ours: classifying the
//! user's request into a mood, expanding it into a detailed prompt, and
//! carrying the sampling knobs across the boundary.

mod error;
mod prompt;

pub use error::{Error, Result};
pub use prompt::{build_prompt, Mood};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Decoding knobs passed through to the text-generation collaborator.
///
/// `temperature` scales the logits before sampling; `top_k` keeps only the k
/// most probable next tokens; `top_p` keeps the smallest nucleus whose
/// probability mass reaches p. Given a fixed `seed` the collaborator is
/// expected to be deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub max_length: usize,
    pub temperature: f32,
    pub top_k: usize,
    pub top_p: f32,
    pub seed: Option<u64>,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_length: 200,
            temperature: 0.8,
            top_k: 50,
            top_p: 0.9,
            seed: None,
        }
    }
}

/// Text-in, text-out capability of a language model.
pub trait TextGenerator {
    /// Continue `prompt` into a full text under the given sampling knobs.
    fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String>;
}

/// Turns user requests into lyrics through a [`TextGenerator`].
pub struct LyricsGenerator<T: TextGenerator> {
    model: T,
    params: SamplingParams,
}

impl<T: TextGenerator> LyricsGenerator<T> {
    pub fn new(model: T) -> Self {
        Self {
            model,
            params: SamplingParams::default(),
        }
    }

    pub fn with_params(model: T, params: SamplingParams) -> Self {
        Self { model, params }
    }

    /// Expand the request into a mood-specific prompt and run the model.
    pub fn generate(&self, user_input: &str) -> Result<String> {
        let prompt = build_prompt(user_input);
        debug!(%prompt, "generating lyrics");
        self.model.complete(&prompt, &self.params)
    }
}

/// Deterministic fallback model: shapes the prompt into a verse skeleton.
///
/// Stands in where no language-model checkpoint is wired up, so the
/// end-to-end pipeline always produces singable text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateModel;

impl TextGenerator for TemplateModel {
    fn complete(&self, prompt: &str, params: &SamplingParams) -> Result<String> {
        let subject = prompt
            .split("about ")
            .nth(1)
            .and_then(|rest| rest.split('.').next())
            .unwrap_or("the world")
            .trim();

        let mut lyrics = format!(
            "Verse one, about {subject},\n\
             a melody carries it on.\n\
             Chorus now, about {subject},\n\
             we sing it until it is gone.\n"
        );
        if lyrics.len() > params.max_length {
            let mut cut = params.max_length;
            while !lyrics.is_char_boundary(cut) {
                cut -= 1;
            }
            lyrics.truncate(cut);
        }
        Ok(lyrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_model_mentions_subject() {
        let generator = LyricsGenerator::new(TemplateModel);
        let lyrics = generator.generate("a happy song on birds").unwrap();
        assert!(lyrics.contains("birds"));
    }

    #[test]
    fn test_max_length_is_respected() {
        let params = SamplingParams {
            max_length: 20,
            ..Default::default()
        };
        let generator = LyricsGenerator::with_params(TemplateModel, params);
        let lyrics = generator.generate("rivers").unwrap();
        assert!(lyrics.len() <= 20);
    }

    #[test]
    fn test_default_params_match_documented_knobs() {
        let params = SamplingParams::default();
        assert_eq!(params.max_length, 200);
        assert_eq!(params.top_k, 50);
        assert!((params.temperature - 0.8).abs() < 1e-6);
        assert!((params.top_p - 0.9).abs() < 1e-6);
    }
}
