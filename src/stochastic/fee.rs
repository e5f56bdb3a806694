//! Fee recovery projection
//!
//! An upfront fee is deducted from the capital, the remainder is projected
//! under noisy compounding, and the fee counts as recovered once the 5th
//! percentile path rises above the original, pre-fee capital.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::engine::{base_seed, project, EnsembleResult, ProjectionConfig};
use super::noise::NoiseModel;
use crate::calendar::Frequency;
use crate::error::{ensure_at_least, Result, SimError};

/// Horizons (in years) tried in order by the search mode
pub const FEE_SEARCH_HORIZONS: [u32; 6] = [1, 2, 3, 5, 10, 15];

/// Days projected per horizon year
pub const DAYS_PER_PROJECTED_YEAR: usize = 366;

/// Horizon reported when the fee is not recovered
pub const NOT_RECOVERED: i32 = -1;

pub const DEFAULT_FEE_RUNS: usize = 5_000;

/// How the fee is charged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FeeKind {
    /// Flat amount in currency
    Absolute(f64),
    /// Fraction of the capital (0.05 for 5%)
    Percentage(f64),
}

impl FeeKind {
    /// Capital left after the fee is paid
    pub fn apply(&self, capital: f64) -> f64 {
        match *self {
            FeeKind::Absolute(amount) => capital - amount,
            FeeKind::Percentage(fraction) => capital * (1.0 - fraction),
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            FeeKind::Absolute(amount) => ensure_at_least("fee", amount, 0.0),
            FeeKind::Percentage(fraction) => {
                ensure_at_least("fee", fraction, 0.0)?;
                if fraction >= 1.0 {
                    return Err(SimError::invalid(
                        "fee",
                        format!("percentage must be below 100%, got {}", fraction * 100.0),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Horizon strategy for the recovery projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeeRecoveryMode {
    /// Project exactly this many years
    FixedHorizon(u32),
    /// Try each horizon in order, stop at the first that recovers
    SearchHorizon(Vec<u32>),
}

impl Default for FeeRecoveryMode {
    fn default() -> Self {
        FeeRecoveryMode::SearchHorizon(FEE_SEARCH_HORIZONS.to_vec())
    }
}

/// Inputs of a fee recovery projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRecoveryConfig {
    /// Capital before the fee
    pub initial_capital: f64,

    pub fee: FeeKind,

    /// APR as a decimal
    pub annual_rate: f64,

    /// Annual standard deviation of the rate noise, as a decimal
    pub noise: f64,

    pub compound_frequency: Frequency,

    pub runs: usize,

    pub mode: FeeRecoveryMode,

    pub seed: Option<u64>,
}

impl Default for FeeRecoveryConfig {
    fn default() -> Self {
        Self {
            initial_capital: 10_000.0,
            fee: FeeKind::Percentage(0.05),
            annual_rate: 0.03,
            noise: 0.002,
            compound_frequency: Frequency::Daily,
            runs: DEFAULT_FEE_RUNS,
            mode: FeeRecoveryMode::default(),
            seed: None,
        }
    }
}

impl FeeRecoveryConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_at_least("initial_capital", self.initial_capital, 0.0)?;
        ensure_at_least("annual_rate", self.annual_rate, 0.0)?;
        ensure_at_least("noise", self.noise, 0.0)?;
        self.fee.validate()?;
        if self.runs < 1 {
            return Err(SimError::invalid("runs", "must be >= 1"));
        }
        let horizons = match &self.mode {
            FeeRecoveryMode::FixedHorizon(years) => std::slice::from_ref(years),
            FeeRecoveryMode::SearchHorizon(candidates) => candidates.as_slice(),
        };
        if horizons.is_empty() {
            return Err(SimError::invalid("horizons", "at least one horizon is required"));
        }
        if horizons.iter().any(|&years| years == 0) {
            return Err(SimError::invalid("horizons", "every horizon must be >= 1 year"));
        }
        Ok(())
    }

    /// Projection for one horizon, starting from the post-fee capital
    fn projection(&self, years: u32, seed: u64) -> ProjectionConfig {
        let periods = self.compound_frequency.periods_per_year() as f64;
        ProjectionConfig {
            initial_capital: self.fee.apply(self.initial_capital),
            rate: self.annual_rate / periods,
            noise: NoiseModel::Normal { std_dev: self.noise / periods },
            period_length_days: self.compound_frequency.period_length_days(),
            days: years as usize * DAYS_PER_PROJECTED_YEAR,
            runs: self.runs,
            seed: Some(seed),
        }
    }
}

/// Day on which each band comes closest to the original capital
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryDays {
    /// From the upper (95th percentile) band
    pub minimum: usize,
    pub median: usize,
    /// From the lower (5th percentile) band
    pub maximum: usize,
}

/// Outcome of a fee recovery projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRecoveryResult {
    /// Years projected, or [`NOT_RECOVERED`]
    pub horizon_years: i32,

    pub post_fee_capital: f64,

    /// Bands of the selected (or last tried) horizon
    pub bands: EnsembleResult,

    pub recovery_days: RecoveryDays,
}

impl FeeRecoveryResult {
    pub fn recovered(&self) -> bool {
        self.horizon_years != NOT_RECOVERED
    }
}

/// Index of the value closest to `target`, 0 for an empty series
pub fn closest_index(series: &[f64], target: f64) -> usize {
    series
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - target).abs().total_cmp(&(*b - target).abs()))
        .map(|(index, _)| index)
        .unwrap_or(0)
}

fn lower_band_recovers(bands: &EnsembleResult, original_capital: f64) -> bool {
    bands.lower_bound.iter().any(|&value| value > original_capital)
}

/// Run the fee recovery projection in the configured mode
pub fn simulate_fee_recovery(config: &FeeRecoveryConfig) -> Result<FeeRecoveryResult> {
    config.validate()?;
    let seed = base_seed(config.seed);
    let original = config.initial_capital;

    let candidates = match &config.mode {
        FeeRecoveryMode::FixedHorizon(years) => vec![*years],
        FeeRecoveryMode::SearchHorizon(candidates) => candidates.clone(),
    };

    let mut last = None;
    for years in candidates {
        let bands = project(&config.projection(years, seed))?;
        debug!("fee recovery: tried {} years", years);
        if lower_band_recovers(&bands, original) {
            info!("fee recovered within {} years", years);
            return Ok(build_result(config, years as i32, bands));
        }
        last = Some(bands);
    }

    warn!("fee not recovered within the maximum simulated horizon");
    let bands = last
        .ok_or_else(|| SimError::invalid("horizons", "at least one horizon is required"))?;
    Ok(build_result(config, NOT_RECOVERED, bands))
}

fn build_result(
    config: &FeeRecoveryConfig,
    horizon_years: i32,
    bands: EnsembleResult,
) -> FeeRecoveryResult {
    let original = config.initial_capital;
    let recovery_days = RecoveryDays {
        minimum: closest_index(&bands.upper_bound, original),
        median: closest_index(&bands.median, original),
        maximum: closest_index(&bands.lower_bound, original),
    };
    FeeRecoveryResult {
        horizon_years,
        post_fee_capital: config.fee.apply(original),
        bands,
        recovery_days,
    }
}
