//! Sampling a trained generator into a binary piano roll.

use crate::error::Error;
use crate::model::Generator;
use burn::config::Config;
use burn::tensor::backend::Backend;
use burn::tensor::{Distribution, Tensor};
use cantata_core::{PianoRoll, PITCH_COUNT};
use tracing::debug;

/// Sampling parameters.
#[derive(Config, Debug)]
pub struct SampleConfig {
    /// Time steps of the roll the generator is expected to produce
    #[config(default = 500)]
    pub time_steps: usize,

    /// Activation cutoff for "note on". Matched to the generator's output
    /// head: with tanh, zero splits the range symmetrically. If the output
    /// activation ever changes, re-derive this instead of trusting zero.
    #[config(default = 0.0)]
    pub threshold: f32,
}

/// Draw one noise vector and decode the generator output into a roll.
///
/// The generator must produce exactly `[128, time_steps]` activations; any
/// other shape is a precondition violation and comes back as
/// [`Error::ShapeMismatch`]. Activations above the threshold become active
/// cells, everything else is silence.
pub fn sample<B: Backend>(
    generator: &Generator<B>,
    config: &SampleConfig,
    device: &B::Device,
) -> crate::error::Result<PianoRoll> {
    let noise = Tensor::<B, 2>::random(
        [1, generator.noise_dim()],
        Distribution::Normal(0.0, 1.0),
        device,
    );
    let output = generator.forward(noise);

    let values: Vec<f32> = output
        .into_data()
        .to_vec::<f32>()
        .expect("generator output converts to f32");

    let expected = PITCH_COUNT * config.time_steps;
    if values.len() != expected {
        return Err(Error::ShapeMismatch {
            expected,
            actual: values.len(),
        });
    }

    let threshold = config.threshold;
    let activations: Vec<f32> = values
        .into_iter()
        .map(|v| if v > threshold { 1.0 } else { 0.0 })
        .collect();
    let active = activations.iter().filter(|&&v| v > 0.0).count();
    debug!(active, time_steps = config.time_steps, "sampled piano roll");

    Ok(PianoRoll::from_activations(activations, config.time_steps)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuInnerBackend;
    use crate::model::GanModelConfig;

    fn tiny_generator() -> Generator<CpuInnerBackend> {
        GanModelConfig::new()
            .with_noise_dim(8)
            .with_time_steps(8)
            .with_feature_maps(2)
            .init_generator(&Default::default())
    }

    #[test]
    fn test_sample_matches_target_shape() {
        let generator = tiny_generator();
        let config = SampleConfig::new().with_time_steps(8);
        let roll = sample(&generator, &config, &Default::default()).unwrap();
        assert_eq!(roll.time_steps(), 8);
    }

    #[test]
    fn test_shape_mismatch_is_fatal() {
        let generator = tiny_generator();
        let config = SampleConfig::new().with_time_steps(16);
        assert!(matches!(
            sample(&generator, &config, &Default::default()),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_low_threshold_yields_notes() {
        let generator = tiny_generator();
        // tanh output always exceeds -2, so every cell becomes active.
        let config = SampleConfig::new().with_time_steps(8).with_threshold(-2.0);
        let roll = sample(&generator, &config, &Default::default()).unwrap();
        assert!(roll.decode(100).next().is_some());
    }

    #[test]
    fn test_high_threshold_yields_silence() {
        let generator = tiny_generator();
        let config = SampleConfig::new().with_time_steps(8).with_threshold(2.0);
        let roll = sample(&generator, &config, &Default::default()).unwrap();
        assert_eq!(roll.decode(100).count(), 0);
    }
}
