//! Output structures for deterministic simulations

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::params::SimulationWarning;
use crate::calendar::Frequency;
use crate::error::Result;

/// Account state at the end of one simulated day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub day_index: u32,
    pub capital: f64,
    pub cumulative_deposits: f64,
    pub cumulative_interest: f64,
}

/// Complete simulation result, day 0 included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Starting capital the snapshots grow from
    pub initial_capital: f64,

    /// Snapshots in strict day-index order
    pub snapshots: Vec<DailySnapshot>,

    /// Soft warnings raised for the input parameters
    pub warnings: Vec<SimulationWarning>,
}

impl Trajectory {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            initial_capital,
            snapshots: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add a snapshot
    pub fn add_snapshot(&mut self, snapshot: DailySnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capital(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.capital).collect()
    }

    pub fn cumulative_deposits(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.cumulative_deposits).collect()
    }

    pub fn cumulative_interest(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.cumulative_interest).collect()
    }

    /// Totals at the end of the horizon
    pub fn summary(&self) -> TrajectorySummary {
        let last = self.snapshots.last();
        TrajectorySummary {
            total_capital: last.map(|s| s.capital).unwrap_or(self.initial_capital),
            total_deposits: last.map(|s| s.cumulative_deposits).unwrap_or(0.0),
            total_interest: last.map(|s| s.cumulative_interest).unwrap_or(0.0),
            days: self.snapshots.len().saturating_sub(1) as u32,
        }
    }

    /// Write every snapshot as a CSV row
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for snapshot in &self.snapshots {
            writer.serialize(snapshot)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// End-of-horizon totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySummary {
    pub total_capital: f64,
    pub total_deposits: f64,
    pub total_interest: f64,
    pub days: u32,
}

/// Interest a capital earns over one day, month and year at a given APR.
///
/// Granularities finer than the compounding frequency are not meaningful
/// and are left as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestBreakdown {
    pub daily: Option<f64>,
    pub monthly: Option<f64>,
    pub annually: Option<f64>,
}

impl InterestBreakdown {
    pub fn for_capital(annual_rate: f64, compound_frequency: Frequency, capital: f64) -> Self {
        let earned = |granularity: Frequency| -> Option<f64> {
            if !compound_frequency.is_coarser_than(granularity) {
                let rate = annual_rate / granularity.periods_per_year() as f64;
                Some((1.0 + rate) * capital - capital)
            } else {
                None
            }
        };

        Self {
            daily: earned(Frequency::Daily),
            monthly: earned(Frequency::Monthly),
            annually: earned(Frequency::Annually),
        }
    }
}
