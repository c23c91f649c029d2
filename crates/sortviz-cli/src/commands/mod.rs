pub mod replay;
pub mod selftest;
pub mod sort;
pub mod trace;
pub mod visualize;

use rand::SeedableRng;
use rand::rngs::StdRng;
use sortviz_core::config::{ARRAY_SIZE_RANGE, check_array_size, check_step_delay_ms};
use sortviz_core::{Algorithm, Value, random_sequence};

/// Algorithm names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AlgorithmArg {
    Merge,
    Quick,
    Heap,
    Bubble,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Merge => Algorithm::Merge,
            AlgorithmArg::Quick => Algorithm::Quick,
            AlgorithmArg::Heap => Algorithm::Heap,
            AlgorithmArg::Bubble => Algorithm::Bubble,
        }
    }
}

/// clap value parser for `--size` on the visualizer.
pub fn parse_array_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("'{s}': {e}"))?;
    check_array_size(size).map_err(|e| e.to_string())?;
    Ok(size)
}

/// clap value parser for `--delay` on the visualizer.
pub fn parse_step_delay(s: &str) -> Result<u64, String> {
    let delay: u64 = s.parse().map_err(|e| format!("'{s}': {e}"))?;
    check_step_delay_ms(delay).map_err(|e| e.to_string())?;
    Ok(delay)
}

/// clap value parser for `--size` on the headless commands.
///
/// Any length up to the visualizer's largest array is accepted, including
/// the trivial lengths 0 and 1.
pub fn parse_input_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|e| format!("'{s}': {e}"))?;
    let max = *ARRAY_SIZE_RANGE.end();
    if size > max {
        return Err(format!("size {size} exceeds the maximum of {max}"));
    }
    Ok(size)
}

/// Parse a comma-separated list of integers. Blank entries are ignored.
pub fn parse_values(s: &str) -> Result<Vec<Value>, String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<Value>().map_err(|e| format!("bad value '{t}': {e}")))
        .collect()
}

/// Seeded RNG when a seed is given, otherwise one seeded from the OS.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Resolve the `--values` / `--size` / `--seed` trio into an input array.
///
/// Without either flag, a random array of the default visualizer size is
/// used.
pub fn input_values(
    values: Option<&str>,
    size: Option<usize>,
    seed: Option<u64>,
) -> Result<Vec<Value>, String> {
    match (values, size) {
        (Some(v), _) => parse_values(v),
        (None, size) => {
            let len = size.unwrap_or(sortviz_core::DEFAULT_ARRAY_SIZE);
            log::debug!("generating {len} random values (seed: {seed:?})");
            Ok(random_sequence(&mut make_rng(seed), len))
        }
    }
}

/// Print `msg` to stderr and exit with status 1.
pub fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}
