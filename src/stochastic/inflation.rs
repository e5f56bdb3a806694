//! Inflation erosion of a constant capital
//!
//! The yearly inflation rate of every (run, day) cell is drawn from a
//! triangular distribution spanning the optimistic, realistic and
//! pessimistic estimates, and the capital is divided by the compounded
//! inflation factor.

use log::info;
use serde::{Deserialize, Serialize};

use super::engine::{ensure_capital, run_ensemble, EnsembleResult};
use super::noise::NoiseModel;
use crate::error::{ensure_at_least, Result, SimError};
use crate::simulation::{MAX_HORIZON_YEARS, MIN_HORIZON_YEARS};

pub const DAYS_PER_YEAR: usize = 365;
pub const DEFAULT_INFLATION_RUNS: usize = 5_000;

/// How the yearly estimate becomes a per-day rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InflationCompounding {
    /// Effective daily rate `(1 + r)^(1/365) - 1`
    #[default]
    Annual,
    /// Nominal daily rate `r / 365`
    Daily,
}

/// Which erosion formula to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InflationFormula {
    #[default]
    Current,
    /// Formula of earlier dashboard releases, kept for reproducing old figures
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflationConfig {
    pub initial_capital: f64,

    /// Lowest expected yearly inflation, as a decimal
    pub optimistic: f64,

    /// Most likely yearly inflation, as a decimal
    pub realistic: f64,

    /// Highest expected yearly inflation, as a decimal
    pub pessimistic: f64,

    pub compounding: InflationCompounding,

    pub formula: InflationFormula,

    pub horizon_years: u32,

    pub runs: usize,

    pub seed: Option<u64>,
}

impl Default for InflationConfig {
    fn default() -> Self {
        Self {
            initial_capital: 10_000.0,
            optimistic: 0.02,
            realistic: 0.025,
            pessimistic: 0.035,
            compounding: InflationCompounding::Annual,
            formula: InflationFormula::Current,
            horizon_years: 2,
            runs: DEFAULT_INFLATION_RUNS,
            seed: None,
        }
    }
}

impl InflationConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_capital(self.initial_capital)?;
        ensure_at_least("optimistic", self.optimistic, 0.0)?;
        ensure_at_least("realistic", self.realistic, self.optimistic)?;
        ensure_at_least("pessimistic", self.pessimistic, self.realistic)?;
        if !(MIN_HORIZON_YEARS..=MAX_HORIZON_YEARS).contains(&self.horizon_years) {
            return Err(SimError::invalid(
                "horizon_years",
                format!(
                    "must be in [{}, {}], got {}",
                    MIN_HORIZON_YEARS, MAX_HORIZON_YEARS, self.horizon_years
                ),
            ));
        }
        if self.runs < 1 {
            return Err(SimError::invalid("runs", "must be >= 1"));
        }
        Ok(())
    }

    pub fn days(&self) -> usize {
        self.horizon_years as usize * DAYS_PER_YEAR
    }

    fn noise(&self) -> NoiseModel {
        NoiseModel::Triangular {
            min: self.optimistic,
            mode: self.realistic,
            max: self.pessimistic,
        }
    }
}

/// Real value at the end of the horizon for one band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationCase {
    pub final_value: f64,
    /// Purchasing power lost, in percent of the initial capital
    pub loss_pct: f64,
}

impl InflationCase {
    fn new(initial_capital: f64, final_value: f64) -> Self {
        let loss_pct = if initial_capital > 0.0 {
            (initial_capital - final_value) / initial_capital * 100.0
        } else {
            0.0
        };
        Self { final_value, loss_pct }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflationResult {
    pub bands: EnsembleResult,
    /// Upper band: low inflation keeps the most value
    pub optimistic: InflationCase,
    pub realistic: InflationCase,
    /// Lower band
    pub pessimistic: InflationCase,
}

/// Project the real value of a constant capital under inflation
pub fn simulate_inflation(config: &InflationConfig) -> Result<InflationResult> {
    config.validate()?;
    let capital = config.initial_capital;
    let days = config.days();
    let years = config.horizon_years as i32;
    let compounding = config.compounding;
    let (runs, noise, seed) = (config.runs, config.noise(), config.seed);

    let bands = match config.formula {
        InflationFormula::Current => run_ensemble(days, runs, &noise, seed, |day, rate| {
            let step = match compounding {
                InflationCompounding::Daily => rate / DAYS_PER_YEAR as f64,
                InflationCompounding::Annual => (1.0 + rate).powf(1.0 / DAYS_PER_YEAR as f64) - 1.0,
            };
            capital / (1.0 + step).powi(day as i32)
        })?,
        InflationFormula::Legacy => run_ensemble(days, runs, &noise, seed, |day, rate| {
            match compounding {
                InflationCompounding::Daily => capital / (1.0 + rate).powi(day as i32),
                InflationCompounding::Annual => {
                    let scaled = rate * linspace_point(1.0, DAYS_PER_YEAR as f64, days, day);
                    capital / (1.0 + scaled).powi(years)
                }
            }
        })?,
    };

    let last = |series: &[f64]| series.last().copied().unwrap_or(capital);
    let result = InflationResult {
        optimistic: InflationCase::new(capital, last(&bands.upper_bound)),
        realistic: InflationCase::new(capital, last(&bands.median)),
        pessimistic: InflationCase::new(capital, last(&bands.lower_bound)),
        bands,
    };

    info!(
        "inflation over {} years: realistic loss {:.2}%",
        config.horizon_years, result.realistic.loss_pct
    );

    Ok(result)
}

/// Point `index` of `count` evenly spaced values from `start` to `end` inclusive
fn linspace_point(start: f64, end: f64, count: usize, index: usize) -> f64 {
    if count <= 1 {
        return start;
    }
    start + (end - start) * index as f64 / (count - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config(compounding: InflationCompounding, formula: InflationFormula) -> InflationConfig {
        InflationConfig {
            compounding,
            formula,
            runs: 300,
            seed: Some(17),
            ..Default::default()
        }
    }

    #[test]
    fn test_value_erodes_monotonically() {
        let config = config(InflationCompounding::Annual, InflationFormula::Current);
        let result = simulate_inflation(&config).unwrap();
        assert_eq!(result.bands.len(), 730);
        assert_relative_eq!(result.bands.median[0], 10_000.0);
        assert!(result.bands.median[729] < result.bands.median[0]);
        assert!(result.pessimistic.final_value <= result.realistic.final_value);
        assert!(result.realistic.final_value <= result.optimistic.final_value);
        assert!(result.realistic.loss_pct > 0.0);
    }

    #[test]
    fn test_constant_inflation_annual_compounding() {
        let config = InflationConfig {
            optimistic: 0.03,
            realistic: 0.03,
            pessimistic: 0.03,
            horizon_years: 1,
            runs: 5,
            ..Default::default()
        };
        let result = simulate_inflation(&config).unwrap();
        // 364 daily steps of the effective rate
        let expected = 10_000.0 / 1.03_f64.powf(364.0 / 365.0);
        assert_relative_eq!(result.realistic.final_value, expected, max_relative = 1e-10);
        assert_relative_eq!(result.optimistic.final_value, result.pessimistic.final_value);
    }

    #[test]
    fn test_daily_and_annual_formulas_differ() {
        let base = InflationConfig {
            optimistic: 0.05,
            realistic: 0.05,
            pessimistic: 0.05,
            horizon_years: 3,
            runs: 1,
            ..Default::default()
        };
        let annual = simulate_inflation(&base).unwrap();
        let daily = simulate_inflation(&InflationConfig {
            compounding: InflationCompounding::Daily,
            ..base
        })
        .unwrap();
        // r/365 compounds to more than the effective rate
        assert!(daily.realistic.final_value < annual.realistic.final_value);
        let expected = 10_000.0 / (1.0 + 0.05 / 365.0_f64).powi(3 * 365 - 1);
        assert_relative_eq!(daily.realistic.final_value, expected, max_relative = 1e-10);
    }

    #[test]
    fn test_legacy_annual_formula() {
        let config = InflationConfig {
            optimistic: 0.02,
            realistic: 0.02,
            pessimistic: 0.02,
            horizon_years: 2,
            runs: 1,
            formula: InflationFormula::Legacy,
            ..Default::default()
        };
        let result = simulate_inflation(&config).unwrap();
        // First day: rate * 1, last day: rate * 365, both raised to the horizon
        assert_relative_eq!(
            result.bands.median[0],
            10_000.0 / 1.02_f64.powi(2),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            *result.bands.median.last().unwrap(),
            10_000.0 / (1.0 + 0.02 * 365.0_f64).powi(2),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_percentile_ordering() {
        let config = config(InflationCompounding::Daily, InflationFormula::Current);
        let result = simulate_inflation(&config).unwrap();
        for n in 0..result.bands.len() {
            assert!(result.bands.lower_bound[n] <= result.bands.median[n]);
            assert!(result.bands.median[n] <= result.bands.upper_bound[n]);
        }
    }

    #[test]
    fn test_unordered_estimates_rejected() {
        let config = InflationConfig {
            optimistic: 0.03,
            realistic: 0.02,
            ..Default::default()
        };
        assert!(simulate_inflation(&config).is_err());
    }

    #[test]
    fn test_zero_capital_has_no_loss_pct() {
        let config = InflationConfig {
            initial_capital: 0.0,
            runs: 2,
            horizon_years: 1,
            ..Default::default()
        };
        let result = simulate_inflation(&config).unwrap();
        assert_eq!(result.realistic.loss_pct, 0.0);
    }

    #[test]
    fn test_linspace_point() {
        assert_eq!(linspace_point(1.0, 365.0, 730, 0), 1.0);
        assert_eq!(linspace_point(1.0, 365.0, 730, 729), 365.0);
        assert_eq!(linspace_point(1.0, 365.0, 1, 0), 1.0);
    }
}
