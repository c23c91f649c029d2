//! The visualizer session: one array, one set of bars, at most one playback.
//!
//! [`Visualizer`] enforces the single-session rule. While a sort is playing,
//! every control that would change what is on screen (new array, size,
//! speed, algorithm, another sort) is rejected with [`SortvizError::Busy`];
//! [`Visualizer::stop`] is the way out.

use std::time::Duration;

use rand::Rng;

use crate::algorithms::generate_trace;
use crate::config::{VisualizerConfig, check_array_size, check_step_delay_ms};
use crate::error::{Result, SortvizError};
use crate::player::{CancelHandle, Playback, PlaybackState, play};
use crate::sequence::random_sequence;
use crate::sink::Bars;
use crate::trace::{Algorithm, TraceStats, Value};

pub struct Visualizer {
    config: VisualizerConfig,
    /// The values the next sort starts from.
    array: Vec<Value>,
    bars: Bars,
    playback: Option<Playback>,
    last_stats: Option<TraceStats>,
}

impl Visualizer {
    /// Validate `config` and generate the first array.
    pub fn new<R: Rng + ?Sized>(config: VisualizerConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let array = random_sequence(rng, config.array_size);
        Ok(Self::with_array(config, array))
    }

    /// Start from a given array. The array length wins over
    /// `config.array_size`, so fixed inputs of any length can be shown.
    pub fn with_array(mut config: VisualizerConfig, array: Vec<Value>) -> Self {
        config.array_size = array.len();
        let bars = Bars::from_values(&array);
        Self {
            config,
            array,
            bars,
            playback: None,
            last_stats: None,
        }
    }

    // --- Controls ---

    /// Replace the array with fresh random values.
    pub fn reset_array<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.ensure_idle()?;
        self.drop_playback();
        self.array = random_sequence(rng, self.config.array_size);
        self.bars.reset(&self.array);
        self.last_stats = None;
        Ok(())
    }

    /// Change the number of bars; regenerates the array.
    pub fn set_array_size<R: Rng + ?Sized>(&mut self, size: usize, rng: &mut R) -> Result<()> {
        self.ensure_idle()?;
        check_array_size(size)?;
        self.config.array_size = size;
        self.reset_array(rng)
    }

    pub fn set_step_delay_ms(&mut self, delay_ms: u64) -> Result<()> {
        self.ensure_idle()?;
        check_step_delay_ms(delay_ms)?;
        self.config.step_delay_ms = delay_ms;
        Ok(())
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> Result<()> {
        self.ensure_idle()?;
        self.config.algorithm = algorithm;
        Ok(())
    }

    /// Generate a trace for the current array and start playing it.
    ///
    /// Any earlier playback that is still showing its sorted emphasis is
    /// discarded along with its pending clear.
    pub fn start_sort(&mut self) -> Result<CancelHandle> {
        self.ensure_idle()?;
        self.drop_playback();
        self.bars.reset(&self.array);

        let trace = generate_trace(self.config.algorithm, &self.array);
        let stats = trace.stats();
        log::info!(
            "starting {} on {} bars: {} compares, {} writes",
            self.config.algorithm,
            self.array.len(),
            stats.compares,
            stats.writes
        );
        self.last_stats = Some(stats);

        let playback = play(trace, self.config.step_delay());
        let handle = playback.cancel_handle();
        self.playback = Some(playback);
        Ok(handle)
    }

    /// Cancel playback and put the array back on screen as it was before
    /// the sort started.
    pub fn stop(&mut self) {
        if let Some(playback) = self.playback.as_mut() {
            playback.cancel();
            log::info!(
                "stopped {} at step {}/{}",
                playback.trace().algorithm(),
                playback.progress().0,
                playback.progress().1
            );
        }
        self.playback = None;
        self.bars.reset(&self.array);
    }

    // --- Driving ---

    /// Advance the playback by the wall clock.
    pub fn tick(&mut self) {
        if let Some(playback) = self.playback.as_mut() {
            playback.poll(&mut self.bars);
        }
        self.settle();
    }

    /// Advance the playback to `elapsed` since it started.
    pub fn tick_at(&mut self, elapsed: Duration) {
        if let Some(playback) = self.playback.as_mut() {
            playback.advance_to(elapsed, &mut self.bars);
        }
        self.settle();
    }

    /// How long the host may sleep before the next tick has work to do.
    pub fn time_to_next_tick(&self) -> Option<Duration> {
        let playback = self.playback.as_ref()?;
        let deadline = playback.next_deadline()?;
        Some(deadline.saturating_sub(playback.elapsed()))
    }

    // --- Accessors ---

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn array(&self) -> &[Value] {
        &self.array
    }

    pub fn bars(&self) -> &Bars {
        &self.bars
    }

    /// True while trace steps are still being applied.
    pub fn is_running(&self) -> bool {
        self.playback.as_ref().is_some_and(Playback::is_playing)
    }

    pub fn playback_state(&self) -> Option<PlaybackState> {
        self.playback.as_ref().map(Playback::state)
    }

    pub fn last_stats(&self) -> Option<TraceStats> {
        self.last_stats
    }

    /// `(steps applied, total steps)` of the current or last playback.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.playback.as_ref().map(Playback::progress)
    }

    // --- Internals ---

    fn ensure_idle(&self) -> Result<()> {
        if self.is_running() {
            Err(SortvizError::Busy)
        } else {
            Ok(())
        }
    }

    fn drop_playback(&mut self) {
        if let Some(mut playback) = self.playback.take() {
            playback.cancel();
        }
    }

    /// Once every step has landed, the bars hold the sorted values; they
    /// become the starting point of the next sort.
    fn settle(&mut self) {
        let Some(playback) = self.playback.as_ref() else {
            return;
        };
        let (applied, total) = playback.progress();
        if total > 0 && applied == total && self.array.as_slice() != self.bars.values() {
            self.array = self.bars.values().to_vec();
        }
        if playback.state() == PlaybackState::Cancelled {
            self.playback = None;
        }
    }
}
