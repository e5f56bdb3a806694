//! Monte-Carlo projections: generic noisy compounding, fee recovery and
//! inflation erosion

mod noise;
mod percentile;
mod engine;
mod fee;
mod inflation;

pub use noise::NoiseModel;
pub use percentile::{median, percentile, percentile_sorted};
pub use engine::{project, EnsembleResult, ProjectionConfig, LOWER_PERCENTILE, UPPER_PERCENTILE};
pub use fee::{
    closest_index, simulate_fee_recovery, FeeKind, FeeRecoveryConfig, FeeRecoveryMode,
    FeeRecoveryResult, RecoveryDays, DAYS_PER_PROJECTED_YEAR, DEFAULT_FEE_RUNS,
    FEE_SEARCH_HORIZONS, NOT_RECOVERED,
};
pub use inflation::{
    simulate_inflation, InflationCase, InflationCompounding, InflationConfig, InflationFormula,
    InflationResult, DEFAULT_INFLATION_RUNS,
};
