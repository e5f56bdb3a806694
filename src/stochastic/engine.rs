//! Monte-Carlo projection engine
//!
//! Every (run, day) cell is independent: its value depends only on the day
//! index and its own noise draw. Day columns are therefore generated and
//! reduced to percentiles in parallel, and the `runs x days` matrix is never
//! held in memory as a whole.

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::noise::NoiseModel;
use super::percentile::percentile_sorted;
use crate::error::{ensure_at_least, Result, SimError};

pub const LOWER_PERCENTILE: f64 = 0.05;
pub const UPPER_PERCENTILE: f64 = 0.95;

/// Configuration for a noisy geometric projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Capital every run starts from
    pub initial_capital: f64,

    /// Deterministic rate per compounding period
    pub rate: f64,

    /// Perturbation added to `rate` in every cell
    pub noise: NoiseModel,

    /// Days per compounding period (365 annual, 30 monthly, 1 daily)
    pub period_length_days: u32,

    /// Number of simulated days
    pub days: usize,

    /// Number of independent runs
    pub runs: usize,

    /// Fixed seed for reproducible draws; `None` draws a fresh one
    pub seed: Option<u64>,
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.initial_capital.is_finite() {
            return Err(SimError::invalid("initial_capital", "must be finite"));
        }
        if !self.rate.is_finite() {
            return Err(SimError::invalid("rate", "must be finite"));
        }
        if self.period_length_days == 0 {
            return Err(SimError::invalid("period_length_days", "must be >= 1"));
        }
        validate_shape(self.days, self.runs)?;
        self.noise.validate()
    }
}

/// Percentile bands of an ensemble, aligned by day index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleResult {
    pub median: Vec<f64>,
    /// 5th percentile
    pub lower_bound: Vec<f64>,
    /// 95th percentile
    pub upper_bound: Vec<f64>,
}

impl EnsembleResult {
    pub fn len(&self) -> usize {
        self.median.len()
    }

    pub fn is_empty(&self) -> bool {
        self.median.is_empty()
    }

    /// Write the three bands as CSV rows
    pub fn write_csv<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["day", "median", "lower_bound", "upper_bound"])?;
        for day in 0..self.len() {
            writer.write_record(&[
                day.to_string(),
                self.median[day].to_string(),
                self.lower_bound[day].to_string(),
                self.upper_bound[day].to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

pub(crate) fn validate_shape(days: usize, runs: usize) -> Result<()> {
    if days < 1 {
        return Err(SimError::invalid("days", "must be >= 1"));
    }
    if runs < 1 {
        return Err(SimError::invalid("runs", "must be >= 1"));
    }
    Ok(())
}

/// Project `initial_capital * (1 + rate + noise)^(day / period + 1)` for every
/// cell and reduce across runs.
///
/// Negative capital under heavy negative noise is kept as is.
pub fn project(config: &ProjectionConfig) -> Result<EnsembleResult> {
    config.validate()?;
    let period = config.period_length_days as usize;
    let (capital, rate) = (config.initial_capital, config.rate);

    run_ensemble(config.days, config.runs, &config.noise, config.seed, |day, noise| {
        let exponent = (day / period + 1) as i32;
        capital * (1.0 + rate + noise).powi(exponent)
    })
}

/// Resolve the base seed shared by every day column of one call
pub(crate) fn base_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

/// Evaluate `cell(day, draw)` for `runs` draws per day and reduce each day
/// column to median / 5th / 95th percentile.
///
/// Column `day` draws from an RNG seeded with `seed + day`, so a longer
/// horizon run with the same seed reproduces the shorter one as its prefix.
pub(crate) fn run_ensemble<F>(
    days: usize,
    runs: usize,
    noise: &NoiseModel,
    seed: Option<u64>,
    cell: F,
) -> Result<EnsembleResult>
where
    F: Fn(usize, f64) -> f64 + Sync,
{
    validate_shape(days, runs)?;
    let sampler = noise.sampler()?;
    let seed = base_seed(seed);

    debug!("ensemble: {} runs x {} days (seed {})", runs, days, seed);

    let columns: Vec<(f64, f64, f64)> = (0..days)
        .into_par_iter()
        .map(|day| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(day as u64));
            let mut column: Vec<f64> =
                (0..runs).map(|_| cell(day, sampler.sample(&mut rng))).collect();
            column.sort_unstable_by(|a, b| a.total_cmp(b));
            (
                percentile_sorted(&column, 0.5),
                percentile_sorted(&column, LOWER_PERCENTILE),
                percentile_sorted(&column, UPPER_PERCENTILE),
            )
        })
        .collect();

    let mut result = EnsembleResult {
        median: Vec::with_capacity(days),
        lower_bound: Vec::with_capacity(days),
        upper_bound: Vec::with_capacity(days),
    };
    for (median, lower, upper) in columns {
        result.median.push(median);
        result.lower_bound.push(lower);
        result.upper_bound.push(upper);
    }

    Ok(result)
}

/// Validate a capital value that may legitimately be zero
pub(crate) fn ensure_capital(value: f64) -> Result<()> {
    ensure_at_least("initial_capital", value, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Frequency;
    use crate::simulation::{simulate, SimulationParameters};
    use approx::assert_relative_eq;

    fn config(noise: f64, days: usize, runs: usize) -> ProjectionConfig {
        ProjectionConfig {
            initial_capital: 10_000.0,
            rate: 0.03 / 365.0,
            noise: NoiseModel::Normal { std_dev: noise },
            period_length_days: 1,
            days,
            runs,
            seed: Some(11),
        }
    }

    #[test]
    fn test_shape() {
        let result = project(&config(0.002 / 365.0, 100, 50)).unwrap();
        assert_eq!(result.len(), 100);
        assert_eq!(result.lower_bound.len(), 100);
        assert_eq!(result.upper_bound.len(), 100);
    }

    #[test]
    fn test_percentile_ordering() {
        let result = project(&config(0.01, 400, 200)).unwrap();
        for n in 0..result.len() {
            assert!(result.lower_bound[n] <= result.median[n]);
            assert!(result.median[n] <= result.upper_bound[n]);
        }
    }

    #[test]
    fn test_zero_noise_matches_deterministic_engine() {
        let years = 2;
        let params = SimulationParameters {
            initial_capital: 10_000.0,
            annual_rate: 0.03,
            compound_frequency: Frequency::Daily,
            recurring_deposit: 0.0,
            recurring_frequency: Frequency::Daily,
            horizon_years: years,
        };
        let deterministic = simulate(&params).unwrap().summary().total_capital;

        let projected = project(&ProjectionConfig {
            seed: None,
            ..config(0.0, 365 * years as usize, 1)
        })
        .unwrap();

        let last = *projected.median.last().unwrap();
        // Only the per-day cent rounding separates the two
        assert_relative_eq!(last, deterministic, max_relative = 1e-4);
        assert_eq!(projected.lower_bound, projected.upper_bound);
    }

    #[test]
    fn test_exponent_steps_per_period() {
        let result = project(&ProjectionConfig {
            initial_capital: 100.0,
            rate: 0.01,
            noise: NoiseModel::none(),
            period_length_days: 30,
            days: 61,
            runs: 1,
            seed: None,
        })
        .unwrap();
        assert_relative_eq!(result.median[0], 101.0, epsilon = 1e-9);
        assert_relative_eq!(result.median[29], 101.0, epsilon = 1e-9);
        assert_relative_eq!(result.median[30], 102.01, epsilon = 1e-9);
        assert_relative_eq!(result.median[60], 100.0 * 1.01_f64.powi(3), epsilon = 1e-9);
    }

    #[test]
    fn test_seed_reproducible() {
        let a = project(&config(0.001, 50, 100)).unwrap();
        let b = project(&config(0.001, 50, 100)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_longer_horizon_extends_shorter() {
        let short = project(&config(0.001, 30, 100)).unwrap();
        let long = project(&config(0.001, 60, 100)).unwrap();
        assert_eq!(&long.median[..30], &short.median[..]);
    }

    #[test]
    fn test_negative_capital_tolerated() {
        let result = project(&ProjectionConfig {
            initial_capital: 100.0,
            rate: 0.0,
            noise: NoiseModel::Triangular { min: -3.0, mode: -2.5, max: -2.0 },
            period_length_days: 1,
            days: 2,
            runs: 10,
            seed: Some(5),
        })
        .unwrap();
        // (1 + noise) is negative, odd exponent keeps the sign
        assert!(result.upper_bound[0] < 0.0);
    }

    #[test]
    fn test_empty_shape_rejected() {
        assert!(project(&config(0.0, 0, 10)).is_err());
        assert!(project(&config(0.0, 10, 0)).is_err());
    }
}
