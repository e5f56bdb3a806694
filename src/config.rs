//! Dashboard parameter file
//!
//! One JSON section per dashboard page. Rates are written in percent, the
//! way they are entered on the input forms, and converted to decimals when
//! an engine configuration is built. Missing fields take the form defaults.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::calendar::{Frequency, RecurringChoice};
use crate::error::Result;
use crate::simulation::SimulationParameters;
use crate::stochastic::{
    FeeKind, FeeRecoveryConfig, FeeRecoveryMode, InflationCompounding, InflationConfig,
    InflationFormula, DEFAULT_FEE_RUNS, DEFAULT_INFLATION_RUNS, FEE_SEARCH_HORIZONS,
};

fn default_years() -> u32 {
    2
}

fn default_comparison_years() -> u32 {
    5
}

fn default_capital() -> f64 {
    1000.0
}

fn default_apr_pct() -> f64 {
    15.0
}

fn default_deposit() -> f64 {
    50.0
}

fn default_fee_capital() -> f64 {
    10_000.0
}

fn default_fee() -> f64 {
    5.0
}

fn default_true() -> bool {
    true
}

fn default_fee_apr_pct() -> f64 {
    3.0
}

fn default_fee_noise_pct() -> f64 {
    0.2
}

fn default_fee_runs() -> usize {
    DEFAULT_FEE_RUNS
}

fn default_search_horizons() -> Vec<u32> {
    FEE_SEARCH_HORIZONS.to_vec()
}

fn default_optimistic_pct() -> f64 {
    2.0
}

fn default_realistic_pct() -> f64 {
    2.5
}

fn default_pessimistic_pct() -> f64 {
    3.5
}

fn default_inflation_runs() -> usize {
    DEFAULT_INFLATION_RUNS
}

fn default_holding() -> usize {
    30
}

/// Inputs of one deterministic simulation form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundSection {
    #[serde(default = "default_capital")]
    pub initial_capital: f64,

    #[serde(default = "default_apr_pct")]
    pub apr_pct: f64,

    #[serde(default)]
    pub compound_frequency: Frequency,

    #[serde(default = "default_deposit")]
    pub recurring_deposit: f64,

    #[serde(default)]
    pub recurring_frequency: RecurringChoice,

    #[serde(default = "default_years")]
    pub years: u32,
}

impl Default for CompoundSection {
    fn default() -> Self {
        Self {
            initial_capital: default_capital(),
            apr_pct: default_apr_pct(),
            compound_frequency: Frequency::Daily,
            recurring_deposit: default_deposit(),
            recurring_frequency: RecurringChoice::SameAsCompound,
            years: default_years(),
        }
    }
}

impl CompoundSection {
    pub fn to_parameters(&self) -> SimulationParameters {
        SimulationParameters {
            initial_capital: self.initial_capital,
            annual_rate: self.apr_pct / 100.0,
            compound_frequency: self.compound_frequency,
            recurring_deposit: self.recurring_deposit,
            recurring_frequency: self.recurring_frequency.resolve(self.compound_frequency),
            horizon_years: self.years,
        }
    }

    fn monthly(initial_capital: f64, apr_pct: f64) -> Self {
        Self {
            initial_capital,
            apr_pct,
            compound_frequency: Frequency::Monthly,
            years: default_comparison_years(),
            ..Default::default()
        }
    }
}

fn default_flex() -> CompoundSection {
    CompoundSection::monthly(500.0, 15.0)
}

fn default_fixed() -> CompoundSection {
    CompoundSection::monthly(800.0, 12.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSection {
    #[serde(default = "default_fee_capital")]
    pub initial_capital: f64,

    /// Fee amount, or percent of the capital when `percentage` is set
    #[serde(default = "default_fee")]
    pub fee: f64,

    #[serde(default = "default_true")]
    pub percentage: bool,

    #[serde(default = "default_fee_apr_pct")]
    pub apr_pct: f64,

    /// Yearly noise around the APR, in percent
    #[serde(default = "default_fee_noise_pct")]
    pub noise_pct: f64,

    #[serde(default)]
    pub compound_frequency: Frequency,

    #[serde(default = "default_fee_runs")]
    pub runs: usize,

    /// Project exactly this many years instead of searching
    #[serde(default)]
    pub fixed_years: Option<u32>,

    #[serde(default = "default_search_horizons")]
    pub search_horizons: Vec<u32>,

    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for FeeSection {
    fn default() -> Self {
        Self {
            initial_capital: default_fee_capital(),
            fee: default_fee(),
            percentage: true,
            apr_pct: default_fee_apr_pct(),
            noise_pct: default_fee_noise_pct(),
            compound_frequency: Frequency::Daily,
            runs: default_fee_runs(),
            fixed_years: None,
            search_horizons: default_search_horizons(),
            seed: None,
        }
    }
}

impl FeeSection {
    pub fn to_config(&self) -> FeeRecoveryConfig {
        let fee = if self.percentage {
            FeeKind::Percentage(self.fee / 100.0)
        } else {
            FeeKind::Absolute(self.fee)
        };
        let mode = match self.fixed_years {
            Some(years) => FeeRecoveryMode::FixedHorizon(years),
            None => FeeRecoveryMode::SearchHorizon(self.search_horizons.clone()),
        };
        FeeRecoveryConfig {
            initial_capital: self.initial_capital,
            fee,
            annual_rate: self.apr_pct / 100.0,
            noise: self.noise_pct / 100.0,
            compound_frequency: self.compound_frequency,
            runs: self.runs,
            mode,
            seed: self.seed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflationSection {
    #[serde(default = "default_fee_capital")]
    pub initial_capital: f64,

    #[serde(default = "default_optimistic_pct")]
    pub optimistic_pct: f64,

    #[serde(default = "default_realistic_pct")]
    pub realistic_pct: f64,

    #[serde(default = "default_pessimistic_pct")]
    pub pessimistic_pct: f64,

    #[serde(default)]
    pub daily_compounding: bool,

    #[serde(default)]
    pub legacy_formula: bool,

    #[serde(default = "default_years")]
    pub years: u32,

    #[serde(default = "default_inflation_runs")]
    pub runs: usize,

    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for InflationSection {
    fn default() -> Self {
        Self {
            initial_capital: default_fee_capital(),
            optimistic_pct: default_optimistic_pct(),
            realistic_pct: default_realistic_pct(),
            pessimistic_pct: default_pessimistic_pct(),
            daily_compounding: false,
            legacy_formula: false,
            years: default_years(),
            runs: default_inflation_runs(),
            seed: None,
        }
    }
}

impl InflationSection {
    pub fn to_config(&self) -> InflationConfig {
        InflationConfig {
            initial_capital: self.initial_capital,
            optimistic: self.optimistic_pct / 100.0,
            realistic: self.realistic_pct / 100.0,
            pessimistic: self.pessimistic_pct / 100.0,
            compounding: if self.daily_compounding {
                InflationCompounding::Daily
            } else {
                InflationCompounding::Annual
            },
            formula: if self.legacy_formula {
                InflationFormula::Legacy
            } else {
                InflationFormula::Current
            },
            horizon_years: self.years,
            runs: self.runs,
            seed: self.seed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakSection {
    /// Observations between buying and selling
    #[serde(default = "default_holding")]
    pub holding: usize,

    /// Years of history considered, 0 for all of it
    #[serde(default = "default_years")]
    pub window_years: u32,
}

impl Default for StreakSection {
    fn default() -> Self {
        Self {
            holding: default_holding(),
            window_years: default_years(),
        }
    }
}

/// Parameters for every dashboard page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub compound: CompoundSection,

    #[serde(default = "default_flex")]
    pub flex: CompoundSection,

    #[serde(default = "default_fixed")]
    pub fixed: CompoundSection,

    #[serde(default)]
    pub fee: FeeSection,

    #[serde(default)]
    pub inflation: InflationSection,

    #[serde(default)]
    pub streaks: StreakSection,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            compound: CompoundSection::default(),
            flex: default_flex(),
            fixed: default_fixed(),
            fee: FeeSection::default(),
            inflation: InflationSection::default(),
            streaks: StreakSection::default(),
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
