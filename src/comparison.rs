//! Flex term vs fixed term comparison
//!
//! Runs the deterministic engine once per parameter set and derives which
//! term earns more interest, by how much, and when the two capitals meet.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::simulation::{
    simulate, SimulationParameters, SimulationWarning, Trajectory, TrajectorySummary,
};

/// Term with the larger total interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Flex,
    Fixed,
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Flex => write!(f, "Flex"),
            Winner::Fixed => write!(f, "Fixed"),
        }
    }
}

/// Metrics derived from two trajectories of equal length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub winner: Winner,

    /// Absolute difference of total interest
    pub interest_gap_abs: f64,

    /// Larger total interest over the smaller one, minus one, in percent
    pub interest_gap_pct: f64,

    /// Day on which the two capitals are closest
    pub days_to_parity: usize,
}

/// Compare a flex trajectory against a fixed one.
///
/// The winner is decided on total interest, not on ending capital, because
/// the two terms may start from different capitals and deposits.
pub fn compare(flex: &Trajectory, fixed: &Trajectory) -> Result<ComparisonResult> {
    if flex.len() != fixed.len() {
        return Err(SimError::LengthMismatch {
            left: flex.len(),
            right: fixed.len(),
        });
    }
    if flex.is_empty() {
        return Err(SimError::EmptySeries);
    }

    let flex_interest = flex.summary().total_interest;
    let fixed_interest = fixed.summary().total_interest;

    let winner = if fixed_interest > flex_interest { Winner::Fixed } else { Winner::Flex };
    let interest_gap_abs = (fixed_interest - flex_interest).abs();

    let smaller = flex_interest.min(fixed_interest);
    let interest_gap_pct = if smaller > 0.0 {
        (flex_interest.max(fixed_interest) / smaller - 1.0) * 100.0
    } else {
        0.0
    };

    Ok(ComparisonResult {
        winner,
        interest_gap_abs,
        interest_gap_pct,
        days_to_parity: days_to_parity(&flex.capital(), &fixed.capital()),
    })
}

/// Index of the smallest absolute capital difference (first one on ties).
///
/// A minimum on the second-to-last day is reported as 0: trajectories that
/// only touch there do so through cent rounding, not through a real crossing.
pub fn days_to_parity(a: &[f64], b: &[f64]) -> usize {
    let index = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, diff)| match best {
            Some((_, min)) if diff >= min => best,
            _ => Some((i, diff)),
        })
        .map(|(i, _)| i)
        .unwrap_or(0);

    if a.len() >= 2 && index == a.len() - 2 {
        0
    } else {
        index
    }
}

/// Both simulations plus their comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterComparison {
    pub comparison: ComparisonResult,
    pub flex: TrajectorySummary,
    pub fixed: TrajectorySummary,
    pub flex_warnings: Vec<SimulationWarning>,
    pub fixed_warnings: Vec<SimulationWarning>,
}

/// Simulate both parameter sets and compare the resulting trajectories
pub fn compare_parameters(
    flex: &SimulationParameters,
    fixed: &SimulationParameters,
) -> Result<(ParameterComparison, Trajectory, Trajectory)> {
    let flex_trajectory = simulate(flex)?;
    let fixed_trajectory = simulate(fixed)?;
    let comparison = compare(&flex_trajectory, &fixed_trajectory)?;

    debug!(
        "comparison: {} wins by {:.2} ({:.2}%)",
        comparison.winner, comparison.interest_gap_abs, comparison.interest_gap_pct
    );

    let summary = ParameterComparison {
        comparison,
        flex: flex_trajectory.summary(),
        fixed: fixed_trajectory.summary(),
        flex_warnings: flex_trajectory.warnings.clone(),
        fixed_warnings: fixed_trajectory.warnings.clone(),
    };
    Ok((summary, flex_trajectory, fixed_trajectory))
}
