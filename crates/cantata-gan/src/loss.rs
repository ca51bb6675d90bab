//! Binary cross entropy over raw logits.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Numerically stable binary cross entropy against float 0/1 targets.
///
/// Works on logits so the discriminator never has to squash through a
/// sigmoid before the loss: `max(z, 0) - z*t + ln(1 + exp(-|z|))`, averaged
/// over the batch.
pub fn bce_with_logits<B: Backend, const D: usize>(
    logits: Tensor<B, D>,
    targets: Tensor<B, D>,
) -> Tensor<B, 1> {
    let zeros = logits.zeros_like();
    let pointwise = logits.clone().max_pair(zeros) - logits.clone() * targets
        + (logits.abs().neg().exp().add_scalar(1.0)).log();
    pointwise.mean()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuInnerBackend;

    type B = CpuInnerBackend;

    fn scalar_loss(logit: f32, target: f32) -> f32 {
        let device = Default::default();
        let logits = Tensor::<B, 1>::from_floats([logit], &device);
        let targets = Tensor::<B, 1>::from_floats([target], &device);
        bce_with_logits(logits, targets).into_scalar()
    }

    #[test]
    fn test_uninformative_logit_costs_ln2() {
        assert!((scalar_loss(0.0, 1.0) - std::f32::consts::LN_2).abs() < 1e-6);
        assert!((scalar_loss(0.0, 0.0) - std::f32::consts::LN_2).abs() < 1e-6);
    }

    #[test]
    fn test_confident_correct_is_cheap() {
        assert!(scalar_loss(10.0, 1.0) < 1e-3);
        assert!(scalar_loss(-10.0, 0.0) < 1e-3);
    }

    #[test]
    fn test_confident_wrong_is_expensive() {
        assert!(scalar_loss(10.0, 0.0) > 5.0);
    }

    #[test]
    fn test_extreme_logits_stay_finite() {
        assert!(scalar_loss(1000.0, 0.0).is_finite());
        assert!(scalar_loss(-1000.0, 1.0).is_finite());
    }
}
