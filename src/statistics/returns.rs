//! Holding-period returns of a price series

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use super::loader::PricePoint;
use super::streaks::{streaks, StreakStats};
use crate::error::{Result, SimError};
use crate::stochastic::median;

/// Only the most recent changes are analysed
pub const MAX_CHANGE_ROWS: usize = 5_000;

/// Profit or loss of buying `holding` observations before `date`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    pub date: NaiveDate,
    pub absolute: f64,
    pub percentage: f64,
}

/// Soft conditions raised while analysing a price series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreakWarning {
    /// The holding period spans the whole data window
    HoldingExceedsWindow { holding_days: usize, window_years: u32 },
}

impl std::fmt::Display for StreakWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreakWarning::HoldingExceedsWindow { holding_days, window_years } => write!(
                f,
                "investment time of {} days is not shorter than the {} years considered",
                holding_days, window_years
            ),
        }
    }
}

/// Warn when the holding period is at least as long as the data window.
///
/// A window of 0 years means the full history and never warns.
pub fn check_holding_window(holding_days: usize, window_years: u32) -> Option<StreakWarning> {
    if window_years > 0 && holding_days / 365 >= window_years as usize {
        Some(StreakWarning::HoldingExceedsWindow { holding_days, window_years })
    } else {
        None
    }
}

/// Absolute and percentage change over `holding` observations.
///
/// Entries whose base price is zero are dropped; at most the last
/// [`MAX_CHANGE_ROWS`] changes are kept.
pub fn price_changes(series: &[PricePoint], holding: usize) -> Result<Vec<PriceChange>> {
    if holding < 1 {
        return Err(SimError::invalid("holding", "must be >= 1"));
    }

    let changes: Vec<PriceChange> = series
        .iter()
        .skip(holding)
        .zip(series)
        .filter(|(_, base)| base.value != 0.0)
        .map(|(current, base)| {
            let absolute = current.value - base.value;
            PriceChange {
                date: current.date,
                absolute,
                percentage: absolute / base.value * 100.0,
            }
        })
        .collect();

    let start = changes.len().saturating_sub(MAX_CHANGE_ROWS);
    Ok(changes[start..].to_vec())
}

/// Mean and median of gains and of losses, in percent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReturnSummary {
    pub mean_positive: f64,
    pub median_positive: f64,
    pub mean_negative: f64,
    pub median_negative: f64,
}

/// Summarise strictly positive and strictly negative changes separately;
/// an empty side reports 0
pub fn return_summary(percentage_changes: &[f64]) -> ReturnSummary {
    let positive: Vec<f64> = percentage_changes.iter().copied().filter(|&x| x > 0.0).collect();
    let negative: Vec<f64> = percentage_changes.iter().copied().filter(|&x| x < 0.0).collect();

    ReturnSummary {
        mean_positive: mean(&positive),
        median_positive: median(&positive),
        mean_negative: mean(&negative),
        median_negative: median(&negative),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Everything shown for one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityReport {
    pub changes: Vec<PriceChange>,
    pub streaks: StreakStats,
    pub returns: ReturnSummary,
    pub warnings: Vec<StreakWarning>,
}

/// Holding-period changes, streaks and return summary for a price series
pub fn analyze_prices(
    series: &[PricePoint],
    holding: usize,
    window_years: u32,
) -> Result<ProfitabilityReport> {
    let warnings: Vec<StreakWarning> =
        check_holding_window(holding, window_years).into_iter().collect();
    for warning in &warnings {
        warn!("{}", warning);
    }

    let changes = price_changes(series, holding)?;
    let percentages: Vec<f64> = changes.iter().map(|c| c.percentage).collect();

    Ok(ProfitabilityReport {
        streaks: streaks(&percentages),
        returns: return_summary(&percentages),
        changes,
        warnings,
    })
}
