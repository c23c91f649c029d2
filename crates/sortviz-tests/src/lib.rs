//! Randomized self-test battery for the sortviz algorithms.
//!
//! Every algorithm's silent sort is checked against the standard library's
//! sort on random arrays. An algorithm stops at its first mismatch and the
//! offending input is reported; the other algorithms keep going.

use rand::Rng;
use serde::Serialize;
use sortviz_core::{Algorithm, Value, random_int_in, sort_only};

// ═══════════════════════════════════════════════════════════════════════════════
// Core types
// ═══════════════════════════════════════════════════════════════════════════════

/// Shape of the random cases the battery draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelfTestConfig {
    /// Trials per algorithm.
    pub trials: usize,
    pub min_len: usize,
    pub max_len: usize,
    pub min_value: Value,
    pub max_value: Value,
}

impl Default for SelfTestConfig {
    fn default() -> Self {
        Self {
            trials: 50,
            min_len: 1,
            max_len: 150,
            min_value: -1000,
            max_value: 1000,
        }
    }
}

/// Outcome of the battery for one algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfTestResult {
    pub algorithm: Algorithm,
    pub passed: bool,
    /// Trials actually run; fewer than configured when a trial failed.
    pub trials_run: usize,
    /// The input of the first failing trial.
    pub first_failure: Option<Vec<Value>>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// True when `output` is `input` rearranged into non-decreasing order.
pub fn is_sorted_permutation(input: &[Value], output: &[Value]) -> bool {
    if input.len() != output.len() || !output.windows(2).all(|w| w[0] <= w[1]) {
        return false;
    }
    let mut expected = input.to_vec();
    expected.sort_unstable();
    expected == output
}

/// Draw one random case.
fn random_case<R: Rng + ?Sized>(rng: &mut R, config: &SelfTestConfig) -> Vec<Value> {
    let (lo, hi) = if config.min_len <= config.max_len {
        (config.min_len, config.max_len)
    } else {
        (config.max_len, config.min_len)
    };
    let len = rng.random_range(lo..=hi);
    (0..len)
        .map(|_| random_int_in(rng, config.min_value, config.max_value))
        .collect()
}

/// Run `sorter` on `case`, treating a panic as a wrong answer.
fn check_case<F>(sorter: &F, algorithm: Algorithm, case: &[Value]) -> bool
where
    F: Fn(Algorithm, &[Value]) -> Vec<Value>,
{
    let mut expected = case.to_vec();
    expected.sort_unstable();
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sorter(algorithm, case))) {
        Ok(actual) => actual == expected,
        Err(_) => false,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Test battery
// ═══════════════════════════════════════════════════════════════════════════════

/// Run the default battery (50 trials per algorithm) with a thread-local RNG.
pub fn run_self_tests() -> Vec<SelfTestResult> {
    run_self_tests_with(&mut rand::rng(), &SelfTestConfig::default())
}

/// Run the battery against [`sort_only`] with the given RNG and config.
pub fn run_self_tests_with<R: Rng + ?Sized>(
    rng: &mut R,
    config: &SelfTestConfig,
) -> Vec<SelfTestResult> {
    run_self_tests_against(rng, config, sort_only)
}

/// Run the battery against an arbitrary sorter.
pub fn run_self_tests_against<R, F>(
    rng: &mut R,
    config: &SelfTestConfig,
    sorter: F,
) -> Vec<SelfTestResult>
where
    R: Rng + ?Sized,
    F: Fn(Algorithm, &[Value]) -> Vec<Value>,
{
    Algorithm::ALL
        .iter()
        .map(|&algorithm| {
            let mut trials_run = 0;
            for _ in 0..config.trials {
                let case = random_case(rng, config);
                trials_run += 1;
                if !check_case(&sorter, algorithm, &case) {
                    log::error!("{algorithm} failed on test case {case:?}");
                    return SelfTestResult {
                        algorithm,
                        passed: false,
                        trials_run,
                        first_failure: Some(case),
                    };
                }
            }
            log::info!("{algorithm} passed all {trials_run} tests");
            SelfTestResult {
                algorithm,
                passed: true,
                trials_run,
                first_failure: None,
            }
        })
        .collect()
}

/// `(algorithms passed, algorithms tested)`.
pub fn summarize(results: &[SelfTestResult]) -> (usize, usize) {
    let passed = results.iter().filter(|r| r.passed).count();
    (passed, results.len())
}
