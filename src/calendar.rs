//! Calendar event resolution for compounding and deposit frequencies
//!
//! Events fire on calendar dates rather than on a fixed period counter, so
//! months and years of differing length are honoured as they fall.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SimError;

/// Start date of every deterministic simulation.
///
/// Jan 2 keeps the first Dec 31 and every first-of-month inside the window,
/// and termination is anchored on the same day-of-year.
pub fn anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 2).unwrap_or_default()
}

/// How often an event (compounding or deposit) occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    Annually,
    Monthly,
    #[default]
    Daily,
}

impl Frequency {
    /// Day-count divisor converting an APR into a per-period rate
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annually => 1,
            Frequency::Monthly => 12,
            Frequency::Daily => 365,
        }
    }

    /// Approximate period length in days, used by the stochastic engine
    pub fn period_length_days(&self) -> u32 {
        match self {
            Frequency::Annually => 365,
            Frequency::Monthly => 30,
            Frequency::Daily => 1,
        }
    }

    /// Whether an event of this frequency fires on `date`
    pub fn fires(&self, date: NaiveDate) -> bool {
        match self {
            Frequency::Daily => true,
            Frequency::Monthly => date.day() == 1,
            Frequency::Annually => date.day() == 31 && date.month() == 12,
        }
    }

    /// True when `self` fires less often than `other`
    pub fn is_coarser_than(&self, other: Frequency) -> bool {
        self.period_length_days() > other.period_length_days()
    }
}

/// Free-function form of [`Frequency::fires`]
pub fn fires(frequency: Frequency, date: NaiveDate) -> bool {
    frequency.fires(date)
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annually => "Annually",
            Frequency::Monthly => "Monthly",
            Frequency::Daily => "Daily",
        };
        f.pad(name)
    }
}

impl FromStr for Frequency {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "annually" | "annual" | "yearly" => Ok(Frequency::Annually),
            "monthly" => Ok(Frequency::Monthly),
            "daily" => Ok(Frequency::Daily),
            other => Err(SimError::Parse(format!("Unknown frequency: {}", other))),
        }
    }
}

/// Deposit frequency as chosen on the input form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RecurringChoice {
    #[default]
    SameAsCompound,
    Every(Frequency),
}

impl RecurringChoice {
    pub fn resolve(&self, compound_frequency: Frequency) -> Frequency {
        match self {
            RecurringChoice::SameAsCompound => compound_frequency,
            RecurringChoice::Every(frequency) => *frequency,
        }
    }
}

impl FromStr for RecurringChoice {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "same" | "same-as-compound" | "same_as_compound" => Ok(RecurringChoice::SameAsCompound),
            other => Ok(RecurringChoice::Every(other.parse()?)),
        }
    }
}
