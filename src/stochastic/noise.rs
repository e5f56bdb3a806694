//! Per-cell noise distributions

use rand::Rng;
use rand_distr::{Distribution, Normal, Triangular};
use serde::{Deserialize, Serialize};

use crate::error::{ensure_at_least, Result, SimError};

/// Distribution each (run, day) noise sample is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NoiseModel {
    /// Zero-mean normal perturbation
    Normal { std_dev: f64 },
    /// Triangular draw between `min` and `max` peaking at `mode`
    Triangular { min: f64, mode: f64, max: f64 },
}

impl NoiseModel {
    /// No perturbation at all
    pub fn none() -> Self {
        NoiseModel::Normal { std_dev: 0.0 }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            NoiseModel::Normal { std_dev } => ensure_at_least("noise", std_dev, 0.0),
            NoiseModel::Triangular { min, mode, max } => {
                let bounds = [("noise_min", min), ("noise_mode", mode), ("noise_max", max)];
                for (name, value) in bounds {
                    if !value.is_finite() {
                        return Err(SimError::invalid(name, "must be finite"));
                    }
                }
                if !(min <= mode && mode <= max) {
                    return Err(SimError::invalid(
                        "noise_mode",
                        format!("expected min <= mode <= max, got {} / {} / {}", min, mode, max),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Build a sampler; degenerate distributions become constants
    pub(crate) fn sampler(&self) -> Result<NoiseSampler> {
        self.validate()?;
        match *self {
            NoiseModel::Normal { std_dev } if std_dev == 0.0 => Ok(NoiseSampler::Constant(0.0)),
            NoiseModel::Normal { std_dev } => Normal::new(0.0, std_dev)
                .map(NoiseSampler::Normal)
                .map_err(|e| SimError::invalid("noise", e.to_string())),
            NoiseModel::Triangular { min, max, .. } if min == max => {
                Ok(NoiseSampler::Constant(min))
            }
            NoiseModel::Triangular { min, mode, max } => Triangular::new(min, max, mode)
                .map(NoiseSampler::Triangular)
                .map_err(|e| SimError::invalid("noise_mode", e.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum NoiseSampler {
    Constant(f64),
    Normal(Normal<f64>),
    Triangular(Triangular<f64>),
}

impl NoiseSampler {
    pub(crate) fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            NoiseSampler::Constant(value) => *value,
            NoiseSampler::Normal(normal) => normal.sample(rng),
            NoiseSampler::Triangular(triangular) => triangular.sample(rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_noise_is_constant() {
        let sampler = NoiseModel::none().sampler().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(sampler.sample(&mut rng), 0.0);
        }
    }

    #[test]
    fn test_triangular_stays_in_range() {
        let sampler = NoiseModel::Triangular { min: 0.02, mode: 0.025, max: 0.035 }
            .sampler()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let x = sampler.sample(&mut rng);
            assert!((0.02..=0.035).contains(&x));
        }
    }

    #[test]
    fn test_degenerate_triangular() {
        let sampler = NoiseModel::Triangular { min: 0.03, mode: 0.03, max: 0.03 }
            .sampler()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(sampler.sample(&mut rng), 0.03);
    }

    #[test]
    fn test_invalid_models() {
        assert!(NoiseModel::Normal { std_dev: -0.1 }.validate().is_err());
        let unordered = NoiseModel::Triangular { min: 0.03, mode: 0.02, max: 0.04 };
        assert!(unordered.validate().is_err());
        let unbounded = NoiseModel::Triangular { min: 0.01, mode: 0.02, max: f64::NAN };
        assert!(unbounded.validate().is_err());
    }

    #[test]
    fn test_normal_mean_near_zero() {
        let sampler = NoiseModel::Normal { std_dev: 1.0 }.sampler().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let n = 20_000;
        let mean: f64 = (0..n).map(|_| sampler.sample(&mut rng)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "mean {}", mean);
    }
}
