//! Animation traces: the ordered list of visual steps a sort performs.
//!
//! A [`Trace`] is produced once per sort by [`crate::algorithms::generate_trace`]
//! and consumed by [`crate::player::Playback`]. Steps are tagged, so the
//! player never has to guess whether a pair of numbers is two indices or an
//! index and a value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SortvizError;

/// One array element; also the raw bar height.
pub type Value = i32;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The sorting algorithms that can be traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Merge,
    Quick,
    Heap,
    Bubble,
}

impl Algorithm {
    /// Every algorithm, in menu order.
    pub const ALL: [Algorithm; 4] = [Self::Merge, Self::Quick, Self::Heap, Self::Bubble];

    /// Human-readable name, e.g. "Merge Sort".
    pub fn name(self) -> &'static str {
        match self {
            Self::Merge => "Merge Sort",
            Self::Quick => "Quick Sort",
            Self::Heap => "Heap Sort",
            Self::Bubble => "Bubble Sort",
        }
    }

    /// Next algorithm in menu order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::Merge => Self::Quick,
            Self::Quick => Self::Heap,
            Self::Heap => Self::Bubble,
            Self::Bubble => Self::Merge,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SortvizError;

    /// Accepts `merge`, `Merge Sort`, `merge-sort`, `merge_sort` and the same
    /// spellings of the other three, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        let key = key.strip_suffix("sort").unwrap_or(&key);
        match key {
            "merge" => Ok(Self::Merge),
            "quick" => Ok(Self::Quick),
            "heap" => Ok(Self::Heap),
            "bubble" => Ok(Self::Bubble),
            _ => Err(SortvizError::UnknownAlgorithm(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// A single animation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Step {
    /// Highlight positions `a` and `b`.
    ///
    /// Generators emit every comparison twice: first with `alert` set (the
    /// pair is drawn in the alert color), then without it (the pair returns
    /// to the primary color).
    Compare { a: usize, b: usize, alert: bool },
    /// Set the displayed value at `index` to `value`.
    Write { index: usize, value: Value },
}

impl Step {
    /// Indices this step touches. Write values are not indices.
    pub fn indices(&self) -> [Option<usize>; 2] {
        match *self {
            Self::Compare { a, b, .. } => [Some(a), Some(b)],
            Self::Write { index, .. } => [Some(index), None],
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Compare { a, b, alert: true } => write!(f, "compare {a} {b} !"),
            Self::Compare { a, b, alert: false } => write!(f, "compare {a} {b}"),
            Self::Write { index, value } => write!(f, "write   {index} = {value}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Trace
// ---------------------------------------------------------------------------

/// Step counts for a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TraceStats {
    /// Comparison events (one per highlighted pair, not per emitted step).
    pub compares: usize,
    /// Value writes.
    pub writes: usize,
}

/// Ordered animation steps for one sort of one sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trace {
    algorithm: Algorithm,
    sequence_len: usize,
    steps: Vec<Step>,
}

impl Trace {
    pub(crate) fn new(algorithm: Algorithm, sequence_len: usize, steps: Vec<Step>) -> Self {
        Self {
            algorithm,
            sequence_len,
            steps,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Length of the sequence this trace was generated from.
    pub fn sequence_len(&self) -> usize {
        self.sequence_len
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn stats(&self) -> TraceStats {
        self.steps
            .iter()
            .fold(TraceStats::default(), |mut acc, step| {
                match step {
                    Step::Compare { alert: true, .. } => acc.compares += 1,
                    Step::Compare { .. } => {}
                    Step::Write { .. } => acc.writes += 1,
                }
                acc
            })
    }

    /// Apply every write step to a copy of `initial` and return the result.
    ///
    /// Writes outside `initial` are skipped, just as the player skips them.
    pub fn replay(&self, initial: &[Value]) -> Vec<Value> {
        let mut values = initial.to_vec();
        for step in &self.steps {
            if let Step::Write { index, value } = *step
                && let Some(slot) = values.get_mut(index)
            {
                *slot = value;
            }
        }
        values
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
