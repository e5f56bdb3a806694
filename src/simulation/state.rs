//! Running state of a deterministic simulation

use chrono::{Datelike, NaiveDate};

use super::params::SimulationParameters;
use crate::calendar::anchor_date;

/// State of the simulated account on a given calendar day
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Index of the snapshot this state is recorded as (0 = initial state)
    pub day_index: u32,

    /// Calendar date whose events are processed next
    pub date: NaiveDate,

    /// Date the simulation started on
    pub start_date: NaiveDate,

    /// Capital, rounded to cents after every day
    pub capital: f64,

    /// Sum of all recurring deposits so far
    pub cumulative_deposits: f64,

    /// Sum of all credited interest so far
    pub cumulative_interest: f64,
}

impl SimulationState {
    /// Initialize state at the anchor date
    pub fn from_parameters(params: &SimulationParameters) -> Self {
        let start = anchor_date();
        Self {
            day_index: 0,
            date: start,
            start_date: start,
            capital: params.initial_capital,
            cumulative_deposits: 0.0,
            cumulative_interest: 0.0,
        }
    }

    /// Move the snapshot counter to the day whose events are about to be applied
    pub fn begin_day(&mut self) {
        self.day_index += 1;
    }

    /// Move to the next calendar day
    pub fn advance_day(&mut self) {
        // NaiveDate only overflows in the year 262143
        if let Some(next) = self.date.succ_opt() {
            self.date = next;
        }
    }

    /// True once `horizon_years` full years have elapsed from the start date
    pub fn horizon_reached(&self, horizon_years: u32) -> bool {
        self.date.year() - self.start_date.year() == horizon_years as i32
            && self.date.day() == self.start_date.day()
    }
}
