//! Capital Sim CLI
//!
//! Runs one dashboard page's engine with parameters from a JSON file (or the
//! form defaults) and prints the metrics the dashboard would show.

use anyhow::{Context, Result};
use capital_sim::{
    comparison::compare_parameters,
    config::DashboardConfig,
    simulate,
    simulation::InterestBreakdown,
    statistics::{analyze_prices, load_price_series},
    stochastic::{simulate_fee_recovery, simulate_inflation},
    Frequency,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "capital_sim", version, about = "Capital growth simulations")]
struct Cli {
    /// JSON parameter file; form defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write the resulting series to this CSV file
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compound interest with recurring deposits
    Simulate {
        #[arg(long)]
        years: Option<u32>,
    },
    /// Flex term vs fixed term
    Compare {
        #[arg(long)]
        years: Option<u32>,
    },
    /// Time to recover an upfront fee
    Fee {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Purchasing power under inflation
    Inflation {
        #[arg(long)]
        years: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Holding-period streaks of a historical price series
    Streaks {
        /// CSV file with `date,value` columns
        #[arg(long)]
        prices: PathBuf,
        #[arg(long)]
        holding: Option<usize>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_json_path(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => DashboardConfig::default(),
    };

    match cli.command {
        Command::Simulate { years } => {
            if let Some(years) = years {
                config.compound.years = years;
            }
            run_simulate(&config, cli.output)
        }
        Command::Compare { years } => {
            if let Some(years) = years {
                config.flex.years = years;
                config.fixed.years = years;
            }
            run_compare(&config, cli.output)
        }
        Command::Fee { seed } => {
            config.fee.seed = seed.or(config.fee.seed);
            run_fee(&config, cli.output)
        }
        Command::Inflation { years, seed } => {
            if let Some(years) = years {
                config.inflation.years = years;
            }
            config.inflation.seed = seed.or(config.inflation.seed);
            run_inflation(&config, cli.output)
        }
        Command::Streaks { prices, holding } => {
            if let Some(holding) = holding {
                config.streaks.holding = holding;
            }
            run_streaks(&config, &prices, cli.output)
        }
    }
}

fn run_simulate(config: &DashboardConfig, output: Option<PathBuf>) -> Result<()> {
    let params = config.compound.to_parameters();
    let trajectory = simulate(&params)?;
    let summary = trajectory.summary();

    println!("Compound Interest ({} years, {} days)", params.horizon_years, summary.days);
    println!("{}", "-".repeat(48));
    println!("  Total Capital:  ${:>14.2}", summary.total_capital);
    println!("  Total Deposits: ${:>14.2}", summary.total_deposits);
    println!("  Total Interest: ${:>14.2}", summary.total_interest);

    println!("\nInterest at the beginning:");
    let breakdown = |capital| {
        InterestBreakdown::for_capital(params.annual_rate, params.compound_frequency, capital)
    };
    print_breakdown(breakdown(params.initial_capital));
    println!("Interest at the end:");
    print_breakdown(breakdown(summary.total_capital));

    for warning in &trajectory.warnings {
        println!("\nWarning: {}", warning);
    }

    if let Some(path) = output {
        trajectory.write_csv(&path).with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nTrajectory written to: {}", path.display());
    }
    Ok(())
}

fn print_breakdown(breakdown: InterestBreakdown) {
    let show = |value: Option<f64>| {
        value.map_or_else(|| "N/A".to_string(), |v| format!("${:.2}", v))
    };
    println!("  {:<8} {:>12}", Frequency::Daily, show(breakdown.daily));
    println!("  {:<8} {:>12}", Frequency::Monthly, show(breakdown.monthly));
    println!("  {:<8} {:>12}", Frequency::Annually, show(breakdown.annually));
}

fn run_compare(config: &DashboardConfig, output: Option<PathBuf>) -> Result<()> {
    let flex = config.flex.to_parameters();
    let fixed = config.fixed.to_parameters();
    let (result, flex_trajectory, fixed_trajectory) = compare_parameters(&flex, &fixed)?;

    println!("Flex Term vs Fixed Term ({} years)", flex.horizon_years);
    println!("{}", "-".repeat(48));
    println!("{:<16} {:>14} {:>14}", "", "Flex", "Fixed");
    let (flex_total, fixed_total) = (result.flex, result.fixed);
    for (label, flex_value, fixed_value) in [
        ("Total Capital", flex_total.total_capital, fixed_total.total_capital),
        ("Total Deposits", flex_total.total_deposits, fixed_total.total_deposits),
        ("Total Interest", flex_total.total_interest, fixed_total.total_interest),
    ] {
        println!("{:<16} {:>14.2} {:>14.2}", label, flex_value, fixed_value);
    }
    println!();
    println!("  Best Strategy:     {}", result.comparison.winner);
    println!("  Difference (abs):  ${:.2}", result.comparison.interest_gap_abs);
    println!("  Difference (%):    {:.2}%", result.comparison.interest_gap_pct);
    println!("  Time to match:     {} days", result.comparison.days_to_parity);

    for warning in result.flex_warnings.iter().chain(&result.fixed_warnings) {
        println!("\nWarning: {}", warning);
    }

    if let Some(path) = output {
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(["day", "flex_capital", "fixed_capital"])?;
        for (flex, fixed) in flex_trajectory.snapshots.iter().zip(&fixed_trajectory.snapshots) {
            writer.write_record(&[
                flex.day_index.to_string(),
                flex.capital.to_string(),
                fixed.capital.to_string(),
            ])?;
        }
        writer.flush()?;
        println!("\nCapitals written to: {}", path.display());
    }
    Ok(())
}

fn run_fee(config: &DashboardConfig, output: Option<PathBuf>) -> Result<()> {
    let fee_config = config.fee.to_config();
    let result = simulate_fee_recovery(&fee_config)?;

    println!("Fee Recovery Simulation");
    println!("{}", "-".repeat(48));
    println!("  Capital after fee: ${:.2}", result.post_fee_capital);
    if result.recovered() {
        println!("  Horizon simulated: {} years", result.horizon_years);
    } else {
        println!("  Warning: the fee will not be recovered within the maximum horizon");
    }
    println!("  Minimum Time to Recover: {} days", result.recovery_days.minimum);
    println!("  Median Time to Recover:  {} days", result.recovery_days.median);
    println!("  Maximum Time to Recover: {} days", result.recovery_days.maximum);

    if let Some(path) = output {
        result.bands.write_csv(&path)?;
        println!("\nBands written to: {}", path.display());
    }
    Ok(())
}

fn run_inflation(config: &DashboardConfig, output: Option<PathBuf>) -> Result<()> {
    let inflation_config = config.inflation.to_config();
    let result = simulate_inflation(&inflation_config)?;

    println!("Inflation Simulation ({} years)", inflation_config.horizon_years);
    println!("{}", "-".repeat(48));
    for (label, case) in [
        ("Optimistic Case", result.optimistic),
        ("Realistic Case", result.realistic),
        ("Pessimistic Case", result.pessimistic),
    ] {
        println!("  {:<17} ${:>12.2}  (-{:.2}%)", label, case.final_value, case.loss_pct);
    }

    if let Some(path) = output {
        result.bands.write_csv(&path)?;
        println!("\nBands written to: {}", path.display());
    }
    Ok(())
}

fn run_streaks(config: &DashboardConfig, prices: &Path, output: Option<PathBuf>) -> Result<()> {
    let series = load_price_series(prices)
        .with_context(|| format!("failed to load {}", prices.display()))?;
    let report = analyze_prices(&series, config.streaks.holding, config.streaks.window_years)?;

    for warning in &report.warnings {
        println!("Warning: {}", warning);
    }

    println!(
        "Asset Profitability ({} observations held {})",
        report.changes.len(),
        config.streaks.holding
    );
    println!("{}", "-".repeat(48));
    println!("  Longest Positive Streak:  {} days", report.streaks.longest_positive);
    println!("  Shortest Positive Streak: {} days", report.streaks.shortest_positive);
    println!("  Longest Negative Streak:  {} days", report.streaks.longest_negative);
    println!("  Shortest Negative Streak: {} days", report.streaks.shortest_negative);
    println!("  Mean Percentage Profit:   {:.2}%", report.returns.mean_positive);
    println!("  Median Percentage Profit: {:.2}%", report.returns.median_positive);
    println!("  Mean Percentage Loss:     {:.2}%", report.returns.mean_negative);
    println!("  Median Percentage Loss:   {:.2}%", report.returns.median_negative);

    if let Some(path) = output {
        let mut writer = csv::Writer::from_path(&path)?;
        for change in &report.changes {
            writer.serialize(change)?;
        }
        writer.flush()?;
        println!("\nChanges written to: {}", path.display());
    }
    Ok(())
}
