//! Capital Sim - capital growth simulation engines for the savings dashboard
//!
//! This library provides:
//! - Day-by-day deterministic simulation of compound interest and recurring deposits
//! - Monte-Carlo projections with percentile bands (fee recovery, inflation erosion)
//! - Flex term vs fixed term comparison
//! - Streak and return statistics over historical price series

pub mod error;
pub mod calendar;
pub mod simulation;
pub mod stochastic;
pub mod comparison;
pub mod statistics;
pub mod config;

// Re-export commonly used types
pub use error::{Result, SimError};
pub use calendar::{Frequency, RecurringChoice};
pub use simulation::{simulate, SimulationParameters, Trajectory, DailySnapshot};
pub use stochastic::{project, EnsembleResult, ProjectionConfig, NoiseModel};
pub use comparison::{compare, ComparisonResult, Winner};
pub use statistics::{streaks, StreakStats};
pub use config::DashboardConfig;
