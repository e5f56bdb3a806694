//! Deterministic day-by-day capital simulation

mod params;
mod state;
mod engine;
mod trajectory;

pub use params::{SimulationParameters, SimulationWarning, MAX_HORIZON_YEARS, MIN_HORIZON_YEARS};
pub use state::SimulationState;
pub use engine::{simulate, round_cents};
pub use trajectory::{DailySnapshot, Trajectory, TrajectorySummary, InterestBreakdown};
