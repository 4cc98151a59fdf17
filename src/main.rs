use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chiefrank::{AccumulatorMode, PowerIteration, RankingRun};

/// Rank the pages of a synthetic chief-tribe network.
#[derive(Debug, Parser)]
#[command(name = "chiefrank", version, about)]
struct Cli {
    /// Number of node groups in the generated network.
    #[arg(short, long, default_value_t = 20)]
    groups: usize,

    /// Damping factor: weight on the freshly propagated scores.
    #[arg(long, default_value_t = 0.85)]
    damping: f64,

    /// Convergence tolerance on the 1-norm of successive score deltas.
    #[arg(long, default_value_t = 1e-5)]
    epsilon: f64,

    /// Iteration safety bound.
    #[arg(long, default_value_t = 1000)]
    max_iterations: usize,

    /// Zero the propagation accumulator every iteration (textbook power
    /// step) instead of the default cumulative accumulator.
    #[arg(long)]
    reset_accumulator: bool,

    /// Emit the table rows as JSON instead of plain text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.groups >= 1, "--groups must be at least 1");

    let accumulator = if cli.reset_accumulator {
        AccumulatorMode::Reset
    } else {
        AccumulatorMode::Cumulative
    };

    let engine = PowerIteration::new()
        .with_damping(cli.damping)
        .with_epsilon(cli.epsilon)
        .with_max_iterations(cli.max_iterations)
        .with_accumulator(accumulator);

    let outcome = RankingRun::new()
        .with_num_groups(cli.groups)
        .with_engine(engine)
        .execute()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(outcome.table.rows())?);
    } else {
        print!("{}", outcome.table.render());
    }

    Ok(())
}
