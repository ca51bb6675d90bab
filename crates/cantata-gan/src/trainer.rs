//! Alternating adversarial training loop.

use crate::error::Error;
use crate::loss::bce_with_logits;
use crate::model::{Discriminator, GanModelConfig, Generator};
use burn::config::Config;
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::tensor::backend::AutodiffBackend;
use burn::tensor::{Distribution, ElementConversion, Tensor, TensorData};
use cantata_core::PITCH_COUNT;
use cantata_corpus::NormalizedCorpus;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Training hyperparameters.
#[derive(Config, Debug)]
pub struct TrainConfig {
    #[config(default = 10000)]
    pub epochs: usize,

    #[config(default = 32)]
    pub batch_size: usize,

    /// Emit a status record every this many epochs
    #[config(default = 1000)]
    pub save_interval: usize,

    #[config(default = 2e-4)]
    pub learning_rate: f64,

    /// Adam first-moment decay
    #[config(default = 0.5)]
    pub beta1: f32,

    /// Seed for minibatch index draws
    #[config(default = 42)]
    pub seed: u64,
}

/// Periodic training status record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainStatus {
    pub epoch: usize,
    pub discriminator_loss: f32,
    pub discriminator_accuracy: f32,
    pub generator_loss: f32,
}

/// Owns both networks for the duration of a training run.
///
/// Each epoch: draw a real minibatch with replacement, generate a detached
/// fake minibatch, update the discriminator once against each (labels 1 and
/// 0), then push a fresh noise batch through generator and discriminator
/// with label 1 and apply the resulting gradients to the generator alone.
/// The discriminator is frozen during that last step by construction - its
/// parameters are simply not part of the gradient application - rather than
/// by a mutable trainability flag.
pub struct GanTrainer<B: AutodiffBackend> {
    generator: Generator<B>,
    discriminator: Discriminator<B>,
    config: TrainConfig,
    device: B::Device,
    noise_dim: usize,
    roll_steps: usize,
}

impl<B: AutodiffBackend> GanTrainer<B> {
    /// Initialize fresh networks on the given device.
    pub fn new(model_config: &GanModelConfig, config: TrainConfig, device: B::Device) -> Self {
        Self {
            generator: model_config.init_generator(&device),
            discriminator: model_config.init_discriminator(&device),
            config,
            device,
            noise_dim: model_config.noise_dim,
            roll_steps: model_config.time_steps,
        }
    }

    /// The trained (or untrained) generator, the artifact that survives.
    pub fn generator(&self) -> &Generator<B> {
        &self.generator
    }

    /// Consume the trainer, keeping only the generator.
    pub fn into_generator(self) -> Generator<B> {
        self.generator
    }

    /// Run the configured number of epochs, returning the status records.
    ///
    /// A NaN or infinite loss is not handled specially; it shows up in the
    /// status records as-is.
    pub fn train(&mut self, corpus: &NormalizedCorpus) -> crate::error::Result<Vec<TrainStatus>> {
        if corpus.is_empty() {
            return Err(Error::CorpusTooSmall {
                samples: 0,
                batch_size: self.config.batch_size,
            });
        }
        if self.config.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be positive".into()));
        }
        if self.config.save_interval == 0 {
            return Err(Error::InvalidConfig(
                "save_interval must be positive".into(),
            ));
        }

        let mut gen_optim = AdamConfig::new().with_beta_1(self.config.beta1).init();
        let mut disc_optim = AdamConfig::new().with_beta_1(self.config.beta1).init();
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut statuses = Vec::new();

        for epoch in 0..self.config.epochs {
            let real = self.real_batch(corpus, &mut rng);
            let noise = self.noise_batch();
            let fake = self.generator.forward(noise).detach();

            let (loss_real, acc_real) = self.discriminator_update(&mut disc_optim, real, true);
            let (loss_fake, acc_fake) = self.discriminator_update(&mut disc_optim, fake, false);
            let discriminator_loss = 0.5 * (loss_real + loss_fake);
            let discriminator_accuracy = 0.5 * (acc_real + acc_fake);

            let generator_loss = self.generator_update(&mut gen_optim);

            if epoch % self.config.save_interval == 0 {
                let status = TrainStatus {
                    epoch,
                    discriminator_loss,
                    discriminator_accuracy,
                    generator_loss,
                };
                info!(
                    epoch,
                    d_loss = discriminator_loss,
                    d_acc = discriminator_accuracy,
                    g_loss = generator_loss,
                    "training status"
                );
                statuses.push(status);
            }
        }

        Ok(statuses)
    }

    /// One discriminator update against a single-label minibatch.
    ///
    /// Returns the loss and the accuracy measured before the update.
    fn discriminator_update(
        &mut self,
        optim: &mut impl Optimizer<Discriminator<B>, B>,
        rolls: Tensor<B, 4>,
        real: bool,
    ) -> (f32, f32) {
        let logits = self.discriminator.forward(rolls);
        let targets = if real {
            logits.ones_like()
        } else {
            logits.zeros_like()
        };

        let loss = bce_with_logits(logits.clone(), targets.clone());
        let loss_value = loss.clone().into_scalar().elem::<f32>();

        let predictions = logits.greater_elem(0.0).float();
        let accuracy = predictions
            .equal(targets)
            .float()
            .mean()
            .into_scalar()
            .elem::<f32>();

        let grads = GradientsParams::from_grads(loss.backward(), &self.discriminator);
        self.discriminator =
            optim.step(self.config.learning_rate, self.discriminator.clone(), grads);

        (loss_value, accuracy)
    }

    /// One generator update through the combined pipeline.
    ///
    /// Gradients flow through the discriminator but are collected for the
    /// generator's parameters only, so the discriminator cannot move here.
    fn generator_update(&mut self, optim: &mut impl Optimizer<Generator<B>, B>) -> f32 {
        let fake = self.generator.forward(self.noise_batch());
        let logits = self.discriminator.forward(fake);
        let targets = logits.ones_like();

        let loss = bce_with_logits(logits, targets);
        let loss_value = loss.clone().into_scalar().elem::<f32>();

        let grads = GradientsParams::from_grads(loss.backward(), &self.generator);
        self.generator = optim.step(self.config.learning_rate, self.generator.clone(), grads);

        loss_value
    }

    /// Uniform-with-replacement minibatch of real rolls.
    ///
    /// The corpus keeps its native length; each drawn sample is truncated or
    /// zero-padded on the time axis here to fit the model's fixed grid.
    fn real_batch(&self, corpus: &NormalizedCorpus, rng: &mut StdRng) -> Tensor<B, 4> {
        let batch = self.config.batch_size;
        let steps = self.roll_steps;
        let src_steps = corpus.time_steps();
        let copy = src_steps.min(steps);

        let mut buf = vec![0f32; batch * PITCH_COUNT * steps];
        for b in 0..batch {
            let sample = corpus.sample(rng.gen_range(0..corpus.len()));
            let dst_base = b * PITCH_COUNT * steps;
            for pitch in 0..PITCH_COUNT {
                let src = pitch * src_steps;
                let dst = dst_base + pitch * steps;
                buf[dst..dst + copy].copy_from_slice(&sample[src..src + copy]);
            }
        }
        Tensor::from_data(
            TensorData::new(buf, [batch, 1, PITCH_COUNT, steps]),
            &self.device,
        )
    }

    fn noise_batch(&self) -> Tensor<B, 2> {
        Tensor::random(
            [self.config.batch_size, self.noise_dim],
            Distribution::Normal(0.0, 1.0),
            &self.device,
        )
    }
}
