//! CLI for sortviz: watch sorting algorithms think.

mod commands;
mod tui;

use clap::{Parser, Subcommand};

use commands::AlgorithmArg;

#[derive(Parser)]
#[command(name = "sortviz")]
#[command(about = "sortviz: watch merge, quick, heap and bubble sort, one comparison at a time")]
#[command(version = sortviz_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive sorting visualizer (TUI)
    Visualize {
        /// Number of bars (20-150)
        #[arg(long, default_value_t = sortviz_core::DEFAULT_ARRAY_SIZE,
              value_parser = commands::parse_array_size)]
        size: usize,

        /// Delay between animation steps in milliseconds (4-40)
        #[arg(long, default_value_t = sortviz_core::DEFAULT_STEP_DELAY_MS,
              value_parser = commands::parse_step_delay)]
        delay: u64,

        /// Algorithm selected at startup
        #[arg(long, value_enum, default_value_t = AlgorithmArg::Merge)]
        algorithm: AlgorithmArg,

        /// Seed for the random arrays (default: fresh randomness)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the animation trace an algorithm produces for an array
    Trace {
        #[arg(long, value_enum)]
        algorithm: AlgorithmArg,

        /// Comma-separated values, e.g. "5,3,8,1"
        #[arg(long, conflicts_with = "size")]
        values: Option<String>,

        /// Generate a random array of this many values instead (at most 150)
        #[arg(long, value_parser = commands::parse_input_size)]
        size: Option<usize>,

        /// Seed for the random array
        #[arg(long)]
        seed: Option<u64>,

        /// Emit the trace as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sort values without animation and print the result
    Sort {
        #[arg(long, value_enum)]
        algorithm: AlgorithmArg,

        /// Comma-separated values, e.g. "5,3,8,1"
        #[arg(long)]
        values: String,
    },

    /// Check every algorithm against a reference sort on random arrays
    Selftest {
        /// Trials per algorithm
        #[arg(long, default_value = "50")]
        trials: usize,

        /// Seed for the random cases
        #[arg(long)]
        seed: Option<u64>,

        /// Emit results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play a trace headlessly onto in-memory bars and report the end state
    Replay {
        #[arg(long, value_enum)]
        algorithm: AlgorithmArg,

        /// Comma-separated values, e.g. "5,3,8,1"
        #[arg(long, conflicts_with = "size")]
        values: Option<String>,

        /// Generate a random array of this many values instead (at most 150)
        #[arg(long, value_parser = commands::parse_input_size)]
        size: Option<usize>,

        /// Seed for the random array
        #[arg(long)]
        seed: Option<u64>,

        /// Delay between steps in milliseconds (0 = as fast as possible)
        #[arg(long, default_value = "0")]
        delay: u64,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Visualize {
            size,
            delay,
            algorithm,
            seed,
        } => commands::visualize::run(size, delay, algorithm.into(), seed),
        Commands::Trace {
            algorithm,
            values,
            size,
            seed,
            json,
        } => commands::trace::run(algorithm.into(), values.as_deref(), size, seed, json),
        Commands::Sort { algorithm, values } => commands::sort::run(algorithm.into(), &values),
        Commands::Selftest { trials, seed, json } => commands::selftest::run(trials, seed, json),
        Commands::Replay {
            algorithm,
            values,
            size,
            seed,
            delay,
        } => commands::replay::run(algorithm.into(), values.as_deref(), size, seed, delay),
    }
}
