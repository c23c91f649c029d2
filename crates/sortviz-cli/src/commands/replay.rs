use std::time::{Duration, Instant};

use sortviz_core::{Algorithm, Bars, generate_trace, play, sort_only};

pub fn run(
    algorithm: Algorithm,
    values: Option<&str>,
    size: Option<usize>,
    seed: Option<u64>,
    delay_ms: u64,
) {
    let input = super::input_values(values, size, seed).unwrap_or_else(|e| super::fail(e));
    let trace = generate_trace(algorithm, &input);
    let steps = trace.len();

    println!("Replaying {algorithm}: {} values, {steps} steps, {delay_ms}ms/step", input.len());

    let mut bars = Bars::from_values(&input);
    let mut playback = play(trace, Duration::from_millis(delay_ms));
    let t0 = Instant::now();
    playback.run_blocking(&mut bars);
    let elapsed = t0.elapsed().as_secs_f64();
    log::info!("replay finished in {elapsed:.3}s, state {:?}", playback.state());

    let expected = sort_only(algorithm, &input);
    let matches = bars.values() == expected.as_slice();

    println!("Final:  {:?}", bars.values());
    println!(
        "State:  {:?} after {:.2}s; matches sort: {}",
        playback.state(),
        elapsed,
        if matches { "yes" } else { "NO" }
    );

    if !matches {
        std::process::exit(1);
    }
}
