//! The visual surface a trace is played onto.
//!
//! The player only ever talks to a [`Sink`]; rendering is someone else's
//! problem. [`Bars`] is the in-memory sink the terminal UI draws from.

use serde::Serialize;

use crate::trace::Value;

/// Highlight color of a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarColor {
    /// Resting / read-only color.
    #[default]
    Primary,
    /// A pair that is being compared right now.
    Alert,
}

/// Operations the player needs from its host.
pub trait Sink {
    /// Number of bars currently displayed.
    fn bar_count(&self) -> usize;

    /// Set the displayed value (and so the height) of bar `index`.
    fn set_height(&mut self, index: usize, value: Value);

    fn set_color(&mut self, index: usize, color: BarColor);

    /// Start the transient "sorted" emphasis.
    fn mark_sorted(&mut self);

    fn clear_sorted(&mut self);
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn bar_count(&self) -> usize {
        (**self).bar_count()
    }
    fn set_height(&mut self, index: usize, value: Value) {
        (**self).set_height(index, value);
    }
    fn set_color(&mut self, index: usize, color: BarColor) {
        (**self).set_color(index, color);
    }
    fn mark_sorted(&mut self) {
        (**self).mark_sorted();
    }
    fn clear_sorted(&mut self) {
        (**self).clear_sorted();
    }
}

// ---------------------------------------------------------------------------
// Bars
// ---------------------------------------------------------------------------

/// In-memory bar display: one value and one color per bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bars {
    values: Vec<Value>,
    colors: Vec<BarColor>,
    sorted: bool,
}

impl Bars {
    /// Bars showing `values`, all primary, no emphasis.
    pub fn from_values(values: &[Value]) -> Self {
        Self {
            values: values.to_vec(),
            colors: vec![BarColor::Primary; values.len()],
            sorted: false,
        }
    }

    /// Replace every bar with `values` and reset colors and emphasis.
    pub fn reset(&mut self, values: &[Value]) {
        *self = Self::from_values(values);
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn colors(&self) -> &[BarColor] {
        &self.colors
    }

    pub fn is_sorted_emphasis(&self) -> bool {
        self.sorted
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(value, color)` per bar.
    pub fn iter(&self) -> impl Iterator<Item = (Value, BarColor)> + '_ {
        self.values.iter().copied().zip(self.colors.iter().copied())
    }
}

impl Sink for Bars {
    fn bar_count(&self) -> usize {
        self.values.len()
    }

    fn set_height(&mut self, index: usize, value: Value) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }

    fn set_color(&mut self, index: usize, color: BarColor) {
        if let Some(slot) = self.colors.get_mut(index) {
            *slot = color;
        }
    }

    fn mark_sorted(&mut self) {
        self.sorted = true;
    }

    fn clear_sorted(&mut self) {
        self.sorted = false;
    }
}
