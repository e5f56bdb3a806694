//! Input parameters for a deterministic simulation

use serde::{Deserialize, Serialize};

use crate::calendar::Frequency;
use crate::error::{ensure_at_least, Result, SimError};

pub const MIN_HORIZON_YEARS: u32 = 1;
pub const MAX_HORIZON_YEARS: u32 = 15;

/// Parameters for one deterministic capital trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Starting capital
    pub initial_capital: f64,

    /// APR as a decimal (0.15 for 15%)
    pub annual_rate: f64,

    /// How often interest is folded into capital
    pub compound_frequency: Frequency,

    /// Amount added on every deposit event (negative values withdraw)
    pub recurring_deposit: f64,

    /// How often the recurring deposit is made
    pub recurring_frequency: Frequency,

    /// Investment horizon in whole years
    pub horizon_years: u32,
}

/// Soft conditions that do not stop a simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationWarning {
    /// Deposits happen less often than compounding, results may look unexpected
    RecurringCoarserThanCompound {
        recurring: Frequency,
        compound: Frequency,
    },
}

impl std::fmt::Display for SimulationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationWarning::RecurringCoarserThanCompound { recurring, compound } => write!(
                f,
                "recurring frequency ({}) is coarser than compound frequency ({}), \
                 results might be unexpected",
                recurring, compound
            ),
        }
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_capital: 1000.0,
            annual_rate: 0.15,
            compound_frequency: Frequency::Daily,
            recurring_deposit: 50.0,
            recurring_frequency: Frequency::Daily,
            horizon_years: 2,
        }
    }
}

impl SimulationParameters {
    /// Reject inputs outside the accepted ranges
    pub fn validate(&self) -> Result<()> {
        ensure_at_least("initial_capital", self.initial_capital, 0.0)?;
        ensure_at_least("annual_rate", self.annual_rate, 0.0)?;
        if !self.recurring_deposit.is_finite() {
            return Err(SimError::invalid("recurring_deposit", "must be finite"));
        }
        if !(MIN_HORIZON_YEARS..=MAX_HORIZON_YEARS).contains(&self.horizon_years) {
            return Err(SimError::invalid(
                "horizon_years",
                format!(
                    "must be in [{}, {}], got {}",
                    MIN_HORIZON_YEARS, MAX_HORIZON_YEARS, self.horizon_years
                ),
            ));
        }
        Ok(())
    }

    /// Soft warnings for this parameter set
    pub fn warnings(&self) -> Vec<SimulationWarning> {
        let mut warnings = Vec::new();
        if self.recurring_frequency.is_coarser_than(self.compound_frequency) {
            warnings.push(SimulationWarning::RecurringCoarserThanCompound {
                recurring: self.recurring_frequency,
                compound: self.compound_frequency,
            });
        }
        warnings
    }

    /// Rate applied on each compounding event
    pub fn period_rate(&self) -> f64 {
        self.annual_rate / self.compound_frequency.periods_per_year() as f64
    }
}
