//! Generator and discriminator networks.
//!
//! The generator projects a noise vector onto a coarse `(pitches/4,
//! time_steps/4)` feature grid and upsamples it twice with stride-2
//! transposed convolutions, landing exactly on the `[pitches, time_steps]`
//! roll shape with a tanh output head. The discriminator mirrors it with two
//! stride-2 convolutions and a single logit output.

use burn::config::Config;
use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig, ConvTranspose2d, ConvTranspose2dConfig};
use burn::nn::{
    BatchNorm, BatchNormConfig, Dropout, DropoutConfig, LeakyRelu, LeakyReluConfig, Linear,
    LinearConfig, PaddingConfig2d,
};
use burn::tensor::backend::Backend;
use burn::tensor::{activation, Tensor};

/// Architecture hyperparameters shared by both networks.
#[derive(Config, Debug)]
pub struct GanModelConfig {
    /// Length of the latent noise vector
    #[config(default = 100)]
    pub noise_dim: usize,

    /// Pitch rows of the roll; fixed at 128 by the MIDI note range
    #[config(default = 128)]
    pub pitches: usize,

    /// Time steps of the roll the generator produces
    #[config(default = 500)]
    pub time_steps: usize,

    /// Channel width of the narrower convolution stage
    #[config(default = 64)]
    pub feature_maps: usize,
}

impl GanModelConfig {
    /// Coarse grid the generator seeds before the two stride-2 upsamples.
    fn seed_grid(&self) -> (usize, usize) {
        assert!(
            self.pitches % 4 == 0 && self.time_steps % 4 == 0,
            "roll dimensions must be divisible by 4 (two stride-2 upsampling stages), got {}x{}",
            self.pitches,
            self.time_steps
        );
        (self.pitches / 4, self.time_steps / 4)
    }

    /// Initialize a generator on the given device.
    pub fn init_generator<B: Backend>(&self, device: &B::Device) -> Generator<B> {
        let (seed_pitches, seed_steps) = self.seed_grid();
        let seed_channels = self.feature_maps * 2;
        Generator {
            fc: LinearConfig::new(self.noise_dim, seed_channels * seed_pitches * seed_steps)
                .init(device),
            up1: ConvTranspose2dConfig::new([seed_channels, self.feature_maps], [4, 4])
                .with_stride([2, 2])
                .with_padding([1, 1])
                .init(device),
            bn1: BatchNormConfig::new(self.feature_maps).init(device),
            up2: ConvTranspose2dConfig::new([self.feature_maps, 1], [4, 4])
                .with_stride([2, 2])
                .with_padding([1, 1])
                .init(device),
            activation: LeakyReluConfig::new().with_negative_slope(0.2).init(),
            noise_dim: self.noise_dim,
            seed_channels,
            seed_pitches,
            seed_steps,
        }
    }

    /// Initialize a discriminator on the given device.
    pub fn init_discriminator<B: Backend>(&self, device: &B::Device) -> Discriminator<B> {
        let (seed_pitches, seed_steps) = self.seed_grid();
        let wide = self.feature_maps * 2;
        Discriminator {
            conv1: Conv2dConfig::new([1, self.feature_maps], [3, 3])
                .with_stride([2, 2])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .init(device),
            conv2: Conv2dConfig::new([self.feature_maps, wide], [3, 3])
                .with_stride([2, 2])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .init(device),
            dropout: DropoutConfig::new(0.4).init(),
            activation: LeakyReluConfig::new().with_negative_slope(0.2).init(),
            fc: LinearConfig::new(wide * seed_pitches * seed_steps, 1).init(device),
        }
    }
}

/// Noise vector to piano-roll-shaped tensor, tanh output in [-1, 1].
#[derive(Module, Debug)]
pub struct Generator<B: Backend> {
    fc: Linear<B>,
    up1: ConvTranspose2d<B>,
    bn1: BatchNorm<B>,
    up2: ConvTranspose2d<B>,
    activation: LeakyRelu,
    noise_dim: usize,
    seed_channels: usize,
    seed_pitches: usize,
    seed_steps: usize,
}

impl<B: Backend> Generator<B> {
    /// Map a `[batch, noise_dim]` noise batch to `[batch, 1, pitches, time_steps]`.
    pub fn forward(&self, noise: Tensor<B, 2>) -> Tensor<B, 4> {
        let [batch, _] = noise.dims();
        let x = self.activation.forward(self.fc.forward(noise));
        let x = x.reshape([batch, self.seed_channels, self.seed_pitches, self.seed_steps]);
        let x = self.up1.forward(x);
        let x = self.activation.forward(self.bn1.forward(x));
        let x = self.up2.forward(x);
        activation::tanh(x)
    }

    /// Length of the noise vector this generator expects.
    pub fn noise_dim(&self) -> usize {
        self.noise_dim
    }
}

/// Piano-roll-shaped tensor to realness logit.
///
/// The output is a raw logit; apply a sigmoid for a score in [0, 1].
#[derive(Module, Debug)]
pub struct Discriminator<B: Backend> {
    conv1: Conv2d<B>,
    conv2: Conv2d<B>,
    dropout: Dropout,
    activation: LeakyRelu,
    fc: Linear<B>,
}

impl<B: Backend> Discriminator<B> {
    /// Map `[batch, 1, pitches, time_steps]` rolls to `[batch, 1]` logits.
    pub fn forward(&self, rolls: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.dropout.forward(self.activation.forward(self.conv1.forward(rolls)));
        let x = self.dropout.forward(self.activation.forward(self.conv2.forward(x)));
        let x: Tensor<B, 2> = x.flatten(1, 3);
        self.fc.forward(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuInnerBackend;
    use burn::tensor::Distribution;

    fn tiny_config() -> GanModelConfig {
        GanModelConfig::new()
            .with_noise_dim(8)
            .with_time_steps(8)
            .with_feature_maps(2)
    }

    #[test]
    fn test_generator_output_shape() {
        let device = Default::default();
        let config = tiny_config();
        let generator = config.init_generator::<CpuInnerBackend>(&device);

        let noise = Tensor::random([3, 8], Distribution::Normal(0.0, 1.0), &device);
        let rolls = generator.forward(noise);
        assert_eq!(rolls.dims(), [3, 1, 128, 8]);
    }

    #[test]
    fn test_generator_output_is_bounded() {
        let device = Default::default();
        let generator = tiny_config().init_generator::<CpuInnerBackend>(&device);

        let noise = Tensor::random([2, 8], Distribution::Normal(0.0, 1.0), &device);
        let rolls = generator.forward(noise);
        let max = rolls.clone().abs().max().into_scalar();
        assert!(max <= 1.0);
    }

    #[test]
    fn test_discriminator_output_shape() {
        let device = Default::default();
        let config = tiny_config();
        let discriminator = config.init_discriminator::<CpuInnerBackend>(&device);

        let rolls = Tensor::random([4, 1, 128, 8], Distribution::Uniform(0.0, 1.0), &device);
        let logits = discriminator.forward(rolls);
        assert_eq!(logits.dims(), [4, 1]);
    }

    #[test]
    #[should_panic(expected = "divisible by 4")]
    fn test_indivisible_time_steps_rejected() {
        let device = Default::default();
        let _ = GanModelConfig::new()
            .with_time_steps(10)
            .init_generator::<CpuInnerBackend>(&device);
    }
}
