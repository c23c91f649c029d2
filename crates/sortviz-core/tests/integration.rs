//! Integration tests for sortviz-core.
//!
//! These tests exercise the full pipeline:
//! random sequence → trace generation → playback onto a sink → end state.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sortviz_core::{
    Algorithm, BarColor, Bars, Sink, Step, Value, Visualizer, VisualizerConfig, generate_trace,
    play, random_sequence, sort_only,
};

fn random_case(rng: &mut StdRng) -> Vec<Value> {
    let len = rng.random_range(0..=150);
    (0..len).map(|_| rng.random_range(-1000..=1000)).collect()
}

/// Counts sink calls without storing them.
struct CountingSink {
    bars: usize,
    calls: usize,
}

impl Sink for CountingSink {
    fn bar_count(&self) -> usize {
        self.bars
    }
    fn set_height(&mut self, _index: usize, _value: Value) {
        self.calls += 1;
    }
    fn set_color(&mut self, _index: usize, _color: BarColor) {
        self.calls += 1;
    }
    fn mark_sorted(&mut self) {
        self.calls += 1;
    }
    fn clear_sorted(&mut self) {
        self.calls += 1;
    }
}

#[test]
fn sort_only_yields_sorted_permutation() {
    let mut rng = StdRng::seed_from_u64(0x5047);
    for _ in 0..40 {
        let input = random_case(&mut rng);
        let mut expected = input.clone();
        expected.sort_unstable();
        for alg in Algorithm::ALL {
            let out = sort_only(alg, &input);
            assert!(out.windows(2).all(|w| w[0] <= w[1]), "{alg} not sorted");
            assert_eq!(out, expected, "{alg} changed the multiset");
        }
    }
}

#[test]
fn trace_indices_stay_in_bounds() {
    let mut rng = StdRng::seed_from_u64(0xB0B);
    for _ in 0..25 {
        let input = random_case(&mut rng);
        let n = input.len();
        for alg in Algorithm::ALL {
            let trace = generate_trace(alg, &input);
            assert_eq!(trace.sequence_len(), n);
            for step in &trace {
                for idx in step.indices().into_iter().flatten() {
                    assert!(idx < n, "{alg}: index {idx} >= {n} in {step:?}");
                }
            }
        }
    }
}

#[test]
fn trace_generation_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(99);
    let input = random_sequence(&mut rng, 120);
    for alg in Algorithm::ALL {
        assert_eq!(generate_trace(alg, &input), generate_trace(alg, &input), "{alg}");
    }
}

#[test]
fn merge_of_two_leaves_one_two() {
    let trace = generate_trace(Algorithm::Merge, &[2, 1]);
    let writes: Vec<(usize, Value)> = trace
        .iter()
        .filter_map(|s| match *s {
            Step::Write { index, value } => Some((index, value)),
            Step::Compare { .. } => None,
        })
        .collect();
    assert_eq!(writes, vec![(0, 1), (1, 2)]);
}

#[test]
fn playback_completion_matches_sort_only() {
    let mut rng = StdRng::seed_from_u64(0xFEED);
    for alg in Algorithm::ALL {
        let input = random_sequence(&mut rng, 150);
        let mut bars = Bars::from_values(&input);
        let mut playback = play(generate_trace(alg, &input), Duration::from_millis(4));
        playback.advance_to(Duration::from_secs(24 * 3600), &mut bars);
        assert_eq!(bars.values(), sort_only(alg, &input).as_slice(), "{alg}");
        assert!(playback.is_done());
    }
}

#[test]
fn cancel_right_after_start_stabilizes_call_count() {
    let input: Vec<Value> = (0..60).rev().collect();
    for alg in Algorithm::ALL {
        let mut sink = CountingSink {
            bars: input.len(),
            calls: 0,
        };
        let mut playback = play(generate_trace(alg, &input), Duration::from_millis(4));
        let handle = playback.cancel_handle();
        playback.advance_to(Duration::ZERO, &mut sink);
        handle.cancel();

        let after_cancel = sink.calls;
        for secs in [1, 10, 1000] {
            playback.advance_to(Duration::from_secs(secs), &mut sink);
            assert_eq!(sink.calls, after_cancel, "{alg}");
        }
    }
}

#[test]
fn visualizer_session_end_to_end() {
    let mut rng = StdRng::seed_from_u64(2024);
    let config = VisualizerConfig {
        array_size: 40,
        step_delay_ms: 4,
        algorithm: Algorithm::Heap,
    };
    let mut vis = Visualizer::new(config, &mut rng).unwrap();
    let expected = sort_only(Algorithm::Heap, vis.array());

    let handle = vis.start_sort().unwrap();
    assert!(!handle.is_cancelled());
    vis.tick_at(Duration::from_secs(3600));

    assert_eq!(vis.bars().values(), expected.as_slice());
    assert!(!vis.bars().is_sorted_emphasis());
    assert!(!vis.is_running());

    // the sorted array is the new starting point; sorting it again is a no-op
    vis.start_sort().unwrap();
    vis.tick_at(Duration::from_secs(3600));
    assert_eq!(vis.bars().values(), expected.as_slice());
}
