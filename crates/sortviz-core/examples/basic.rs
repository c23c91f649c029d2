//! Basic trace example.
//!
//! Generates a bubble sort trace for a small array, prints every step,
//! then replays it onto an in-memory bar display.
//!
//! Run: `cargo run --example basic`

use std::time::Duration;

use sortviz_core::{Algorithm, Bars, generate_trace, play};

fn main() {
    let values = vec![5, 3, 8, 1];
    let trace = generate_trace(Algorithm::Bubble, &values);

    println!("{} on {values:?}: {} steps", trace.algorithm(), trace.len());
    for (i, step) in trace.iter().enumerate() {
        println!("  {i:>3}  {step}");
    }

    let stats = trace.stats();
    println!("\n{} compares, {} writes", stats.compares, stats.writes);

    // Replay with no delay so the example finishes right away.
    let mut bars = Bars::from_values(&values);
    let mut playback = play(trace, Duration::ZERO);
    playback.advance_to(Duration::ZERO, &mut bars);
    println!("Bars after replay: {:?}", bars.values());
}
