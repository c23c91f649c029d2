//! Trace playback.
//!
//! A [`Playback`] is a single cooperative task: the host's event loop calls
//! [`Playback::poll`] (or [`Playback::advance_to`] with its own clock) and
//! every step whose offset has been reached is applied to the [`Sink`]. Step
//! `i` is due at `i * step_delay` after the start of the session, so a late
//! poll catches up in order instead of drifting.
//!
//! ```text
//! Playing ──last step──▶ Emphasis ──+900ms──▶ Finished
//!    │                      │
//!    └──────── cancel ──────┴──────▶ Cancelled
//! ```
//!
//! Cancellation goes through a [`CancelHandle`], which may live on another
//! thread. Liveness is checked before every single step, so once `cancel()`
//! returns nothing further reaches the sink.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::sink::{BarColor, Sink};
use crate::trace::{Step, Trace};

/// How long the "sorted" emphasis stays on after the last step.
pub const SORTED_EMPHASIS: Duration = Duration::from_millis(900);

/// Where a playback is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Steps remain to be applied.
    Playing,
    /// All steps applied; the sorted emphasis is showing.
    Emphasis,
    Finished,
    Cancelled,
}

// ---------------------------------------------------------------------------
// CancelHandle
// ---------------------------------------------------------------------------

/// Stops a playback from anywhere. Cloning shares the same flag.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    live: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.live.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        !self.live.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// Playback
// ---------------------------------------------------------------------------

/// Start playing `trace`, one step every `step_delay`.
pub fn play(trace: Trace, step_delay: Duration) -> Playback {
    Playback::new(trace, step_delay)
}

/// A running (or finished) replay of one trace.
#[derive(Debug)]
pub struct Playback {
    trace: Trace,
    step_delay: Duration,
    started: Instant,
    /// Index of the next step to apply.
    cursor: usize,
    live: Arc<AtomicBool>,
    state: PlaybackState,
}

impl Playback {
    pub fn new(trace: Trace, step_delay: Duration) -> Self {
        let state = if trace.is_empty() {
            PlaybackState::Finished
        } else {
            PlaybackState::Playing
        };
        Self {
            trace,
            step_delay,
            started: Instant::now(),
            cursor: 0,
            live: Arc::new(AtomicBool::new(true)),
            state,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            live: Arc::clone(&self.live),
        }
    }

    /// Cancel this playback directly.
    pub fn cancel(&mut self) {
        self.live.store(false, Ordering::SeqCst);
        self.refresh_cancelled();
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// True while steps remain to be applied.
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing && self.is_live()
    }

    /// True once nothing more will ever reach the sink.
    pub fn is_done(&self) -> bool {
        matches!(
            self.state,
            PlaybackState::Finished | PlaybackState::Cancelled
        ) || !self.is_live()
    }

    /// `(steps applied, total steps)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor, self.trace.len())
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// Time since the playback was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Offset (from the start) at which the next effect is due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        if !self.is_live() {
            return None;
        }
        match self.state {
            PlaybackState::Playing => Some(self.offset_of(self.cursor)),
            PlaybackState::Emphasis => Some(self.emphasis_ends()),
            PlaybackState::Finished | PlaybackState::Cancelled => None,
        }
    }

    /// Apply everything due by the wall clock.
    pub fn poll<S: Sink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let elapsed = self.started.elapsed();
        self.advance_to(elapsed, sink)
    }

    /// Apply every effect due at or before `elapsed`. Returns the number of
    /// trace steps applied.
    pub fn advance_to<S: Sink + ?Sized>(&mut self, elapsed: Duration, sink: &mut S) -> usize {
        let mut applied = 0;

        while self.state == PlaybackState::Playing && self.offset_of(self.cursor) <= elapsed {
            if !self.is_live() {
                self.refresh_cancelled();
                return applied;
            }
            let step = self.trace.steps()[self.cursor];
            apply_step(&step, sink);
            self.cursor += 1;
            applied += 1;

            if self.cursor == self.trace.len() {
                sink.mark_sorted();
                self.state = PlaybackState::Emphasis;
                log::debug!(
                    "{} playback complete after {} steps",
                    self.trace.algorithm(),
                    self.cursor
                );
            }
        }

        if self.state == PlaybackState::Emphasis && elapsed >= self.emphasis_ends() {
            if !self.is_live() {
                self.refresh_cancelled();
                return applied;
            }
            sink.clear_sorted();
            self.state = PlaybackState::Finished;
        }

        self.refresh_cancelled();
        applied
    }

    /// Drive the playback to its end on this thread, sleeping between
    /// deadlines. Returns early if cancelled.
    pub fn run_blocking<S: Sink + ?Sized>(&mut self, sink: &mut S) {
        while let Some(deadline) = self.next_deadline() {
            let now = self.started.elapsed();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
            self.poll(sink);
        }
        self.refresh_cancelled();
    }

    fn offset_of(&self, index: usize) -> Duration {
        self.step_delay
            .saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
    }

    fn emphasis_ends(&self) -> Duration {
        let last = self.trace.len().saturating_sub(1);
        self.offset_of(last) + SORTED_EMPHASIS
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    fn refresh_cancelled(&mut self) {
        if !self.is_live() && self.state != PlaybackState::Finished {
            self.state = PlaybackState::Cancelled;
        }
    }
}

/// Apply one step to the sink, skipping indices the sink does not have.
fn apply_step<S: Sink + ?Sized>(step: &Step, sink: &mut S) {
    let count = sink.bar_count();
    match *step {
        Step::Compare { a, b, alert } => {
            let color = if alert {
                BarColor::Alert
            } else {
                BarColor::Primary
            };
            for index in [a, b] {
                if index < count {
                    sink.set_color(index, color);
                } else {
                    log::trace!("skipping color for missing bar {index}");
                }
            }
        }
        Step::Write { index, value } => {
            if index < count {
                sink.set_height(index, value);
            } else {
                log::trace!("skipping write to missing bar {index}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{generate_trace, sort_only};
    use crate::sink::Bars;
    use crate::trace::{Algorithm, Value};

    const MS: Duration = Duration::from_millis(1);

    /// Records every sink call.
    #[derive(Default)]
    struct Recording {
        bars: usize,
        calls: Vec<String>,
    }

    impl Sink for Recording {
        fn bar_count(&self) -> usize {
            self.bars
        }
        fn set_height(&mut self, index: usize, value: Value) {
            self.calls.push(format!("h{index}={value}"));
        }
        fn set_color(&mut self, index: usize, color: BarColor) {
            self.calls.push(format!("c{index}={color:?}"));
        }
        fn mark_sorted(&mut self) {
            self.calls.push("sorted".into());
        }
        fn clear_sorted(&mut self) {
            self.calls.push("clear".into());
        }
    }

    fn trace_of(steps: Vec<Step>, len: usize) -> Trace {
        Trace::new(Algorithm::Bubble, len, steps)
    }

    #[test]
    fn steps_fire_at_absolute_offsets() {
        let trace = trace_of(
            vec![
                Step::Write { index: 0, value: 1 },
                Step::Write { index: 1, value: 2 },
                Step::Write { index: 2, value: 3 },
            ],
            3,
        );
        let mut sink = Recording {
            bars: 3,
            ..Default::default()
        };
        let mut pb = play(trace, 10 * MS);

        assert_eq!(pb.advance_to(Duration::ZERO, &mut sink), 1);
        assert_eq!(pb.advance_to(9 * MS, &mut sink), 0);
        assert_eq!(pb.next_deadline(), Some(10 * MS));
        // a late poll catches up in order
        assert_eq!(pb.advance_to(25 * MS, &mut sink), 2);
        assert_eq!(sink.calls, vec!["h0=1", "h1=2", "h2=3", "sorted"]);
        assert_eq!(pb.state(), PlaybackState::Emphasis);
    }

    #[test]
    fn compare_colors_follow_alert_flag() {
        let trace = trace_of(
            vec![
                Step::Compare { a: 0, b: 1, alert: true },
                Step::Compare { a: 0, b: 1, alert: false },
            ],
            2,
        );
        let mut sink = Recording {
            bars: 2,
            ..Default::default()
        };
        let mut pb = play(trace, MS);
        pb.advance_to(MS, &mut sink);
        assert_eq!(
            sink.calls,
            vec!["c0=Alert", "c1=Alert", "c0=Primary", "c1=Primary", "sorted"]
        );
    }

    #[test]
    fn missing_bars_are_skipped_and_playback_continues() {
        let trace = trace_of(
            vec![
                Step::Compare { a: 0, b: 9, alert: true },
                Step::Write { index: 9, value: 4 },
                Step::Write { index: 1, value: 4 },
            ],
            10,
        );
        let mut sink = Recording {
            bars: 2,
            ..Default::default()
        };
        let mut pb = play(trace, MS);
        pb.advance_to(100 * MS, &mut sink);
        assert_eq!(sink.calls, vec!["c0=Alert", "h1=4", "sorted"]);
    }

    #[test]
    fn emphasis_clears_after_fixed_duration() {
        let trace = trace_of(vec![Step::Write { index: 0, value: 1 }; 3], 1);
        let mut bars = Bars::from_values(&[0]);
        let mut pb = play(trace, 10 * MS);

        pb.advance_to(20 * MS, &mut bars);
        assert!(bars.is_sorted_emphasis());
        assert_eq!(pb.next_deadline(), Some(20 * MS + SORTED_EMPHASIS));

        pb.advance_to(20 * MS + SORTED_EMPHASIS - MS, &mut bars);
        assert!(bars.is_sorted_emphasis());

        pb.advance_to(20 * MS + SORTED_EMPHASIS, &mut bars);
        assert!(!bars.is_sorted_emphasis());
        assert_eq!(pb.state(), PlaybackState::Finished);
        assert!(pb.is_done());
        assert_eq!(pb.next_deadline(), None);
    }

    #[test]
    fn cancel_before_first_step_touches_nothing() {
        let trace = generate_trace(Algorithm::Bubble, &[4, 3, 2, 1]);
        let mut sink = Recording {
            bars: 4,
            ..Default::default()
        };
        let mut pb = play(trace, MS);
        pb.cancel_handle().cancel();

        assert_eq!(pb.advance_to(Duration::from_secs(10), &mut sink), 0);
        assert!(sink.calls.is_empty());
        assert_eq!(pb.state(), PlaybackState::Cancelled);
        assert_eq!(pb.next_deadline(), None);
    }

    #[test]
    fn cancel_mid_playback_freezes_sink() {
        let trace = generate_trace(Algorithm::Bubble, &[4, 3, 2, 1]);
        let total = trace.len();
        let mut sink = Recording {
            bars: 4,
            ..Default::default()
        };
        let mut pb = play(trace, MS);
        let handle = pb.cancel_handle();

        pb.advance_to(2 * MS, &mut sink);
        let calls = sink.calls.len();
        handle.cancel();
        assert!(handle.is_cancelled());

        pb.advance_to(Duration::from_secs(60), &mut sink);
        assert_eq!(sink.calls.len(), calls);
        assert_eq!(pb.progress(), (3, total));
        assert!(!pb.is_playing());
    }

    #[test]
    fn cancel_during_emphasis_keeps_it_from_clearing() {
        let trace = trace_of(vec![Step::Write { index: 0, value: 1 }], 1);
        let mut bars = Bars::from_values(&[0]);
        let mut pb = play(trace, MS);
        pb.advance_to(Duration::ZERO, &mut bars);
        assert!(bars.is_sorted_emphasis());

        pb.cancel();
        pb.advance_to(Duration::from_secs(5), &mut bars);
        assert!(bars.is_sorted_emphasis());
        assert_eq!(pb.state(), PlaybackState::Cancelled);
    }

    #[test]
    fn empty_trace_finishes_without_sink_calls() {
        let mut sink = Recording::default();
        let mut pb = play(generate_trace(Algorithm::Merge, &[1]), MS);
        assert_eq!(pb.state(), PlaybackState::Finished);
        assert_eq!(pb.advance_to(Duration::from_secs(1), &mut sink), 0);
        assert!(sink.calls.is_empty());
        assert!(pb.is_done());
    }

    #[test]
    fn natural_completion_leaves_sorted_values() {
        let input = vec![12, 700, 5, 333, 333, 41, 90];
        for alg in Algorithm::ALL {
            let mut bars = Bars::from_values(&input);
            let mut pb = play(generate_trace(alg, &input), 4 * MS);
            pb.advance_to(Duration::from_secs(3600), &mut bars);
            assert_eq!(bars.values(), sort_only(alg, &input).as_slice(), "{alg}");
            assert!(
                bars.colors().iter().all(|&c| c == BarColor::Primary),
                "{alg}"
            );
            assert_eq!(pb.state(), PlaybackState::Finished, "{alg}");
        }
    }

    #[test]
    fn run_blocking_with_zero_delay_completes() {
        let input = vec![3, 1, 2];
        let mut bars = Bars::from_values(&input);
        let mut pb = play(generate_trace(Algorithm::Quick, &input), Duration::ZERO);
        pb.run_blocking(&mut bars);
        assert_eq!(bars.values(), &[1, 2, 3]);
        assert_eq!(pb.state(), PlaybackState::Finished);
    }

    #[test]
    fn cancel_from_another_thread_stops_run_blocking() {
        let input: Vec<Value> = (0..40).rev().collect();
        let mut bars = Bars::from_values(&input);
        let mut pb = play(generate_trace(Algorithm::Bubble, &input), MS);
        let handle = pb.cancel_handle();
        let canceller = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            handle.cancel();
        });
        pb.run_blocking(&mut bars);
        canceller.join().unwrap();
        assert_eq!(pb.state(), PlaybackState::Cancelled);
        assert!(pb.progress().0 < pb.progress().1);
    }
}
