//! User-adjustable visualizer settings.

use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SortvizError};
use crate::trace::Algorithm;

/// Allowed number of bars.
pub const ARRAY_SIZE_RANGE: RangeInclusive<usize> = 20..=150;

/// Allowed delay between animation steps, in milliseconds.
pub const STEP_DELAY_MS_RANGE: RangeInclusive<u64> = 4..=40;

pub const DEFAULT_ARRAY_SIZE: usize = 110;
pub const DEFAULT_STEP_DELAY_MS: u64 = 12;

/// Array size, animation speed and algorithm choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub array_size: usize,
    pub step_delay_ms: u64,
    pub algorithm: Algorithm,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            array_size: DEFAULT_ARRAY_SIZE,
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
            algorithm: Algorithm::default(),
        }
    }
}

impl VisualizerConfig {
    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<()> {
        check_array_size(self.array_size)?;
        check_step_delay_ms(self.step_delay_ms)?;
        Ok(())
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

pub fn check_array_size(size: usize) -> Result<()> {
    if ARRAY_SIZE_RANGE.contains(&size) {
        Ok(())
    } else {
        Err(SortvizError::ArraySizeOutOfRange {
            size,
            range: ARRAY_SIZE_RANGE,
        })
    }
}

pub fn check_step_delay_ms(delay_ms: u64) -> Result<()> {
    if STEP_DELAY_MS_RANGE.contains(&delay_ms) {
        Ok(())
    } else {
        Err(SortvizError::StepDelayOutOfRange {
            delay_ms,
            range: STEP_DELAY_MS_RANGE,
        })
    }
}
