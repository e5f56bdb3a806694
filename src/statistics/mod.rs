//! Statistics over historical price series: holding-period returns, sign
//! streaks and mean/median gains and losses

pub mod loader;
mod returns;
mod streaks;

pub use loader::{load_price_series, load_price_series_from_reader, PricePoint};
pub use returns::{
    analyze_prices, check_holding_window, price_changes, return_summary, PriceChange,
    ProfitabilityReport, ReturnSummary, StreakWarning, MAX_CHANGE_ROWS,
};
pub use streaks::{streaks, StreakStats};
