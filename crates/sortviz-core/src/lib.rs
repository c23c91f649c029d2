//! # sortviz-core
//!
//! **Watch a sort think.**
//!
//! `sortviz-core` turns merge, quick, heap and bubble sort into animation
//! traces, and replays those traces onto any display surface as timed visual
//! updates.
//!
//! ## Quick Start
//!
//! ```
//! use std::time::Duration;
//! use sortviz_core::{Algorithm, Bars, generate_trace, play, sort_only};
//!
//! let values = vec![5, 3, 8, 1];
//! let trace = generate_trace(Algorithm::Bubble, &values);
//!
//! let mut bars = Bars::from_values(&values);
//! let mut playback = play(trace, Duration::from_millis(4));
//! playback.advance_to(Duration::from_secs(60), &mut bars);
//!
//! assert_eq!(bars.values(), sort_only(Algorithm::Bubble, &values).as_slice());
//! ```
//!
//! ## Architecture
//!
//! Sequence → Trace Generator → [`Trace`] → [`Playback`] → [`Sink`]
//!
//! - **Trace Generator** ([`algorithms`]): pure functions that sort a copy of
//!   the input and record every comparison and write as a [`Step`].
//! - **Player** ([`player`]): a cooperative playback that applies step `i` at
//!   `i * step_delay` and can be cancelled at any moment through a
//!   [`CancelHandle`].
//! - **Session** ([`session`]): one array, one set of [`Bars`], at most one
//!   playback at a time.

pub mod algorithms;
pub mod config;
pub mod error;
pub mod player;
pub mod sequence;
pub mod session;
pub mod sink;
pub mod trace;

pub use algorithms::{Recorder, Silent, generate_trace, sort_only, sort_with};
pub use config::{
    ARRAY_SIZE_RANGE, DEFAULT_ARRAY_SIZE, DEFAULT_STEP_DELAY_MS, STEP_DELAY_MS_RANGE,
    VisualizerConfig,
};
pub use error::{Result, SortvizError};
pub use player::{CancelHandle, Playback, PlaybackState, SORTED_EMPHASIS, play};
pub use sequence::{RAW_MAX_VALUE, RAW_MIN_VALUE, random_int_in, random_sequence, scale_height};
pub use session::Visualizer;
pub use sink::{BarColor, Bars, Sink};
pub use trace::{Algorithm, Step, Trace, TraceStats, Value};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
