//! Random sequences and bar-height scaling.

use rand::Rng;

use crate::trace::Value;

/// Smallest raw value a generated bar can have.
pub const RAW_MIN_VALUE: Value = 5;

/// Largest raw value a generated bar can have; also the full-height reference.
pub const RAW_MAX_VALUE: Value = 730;

/// Uniform integer in `lo..=hi`. The bounds may be given in either order.
pub fn random_int_in<R: Rng + ?Sized>(rng: &mut R, lo: Value, hi: Value) -> Value {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    rng.random_range(lo..=hi)
}

/// A fresh sequence of `len` raw bar values.
pub fn random_sequence<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<Value> {
    (0..len)
        .map(|_| random_int_in(rng, RAW_MIN_VALUE, RAW_MAX_VALUE))
        .collect()
}

/// Scale a raw value to a height inside a container `container_height` tall.
///
/// Never returns less than 1, so every bar stays visible.
pub fn scale_height(value: Value, container_height: u16) -> u16 {
    let ratio = f64::from(value.max(0)) / f64::from(RAW_MAX_VALUE);
    let scaled = (ratio * f64::from(container_height)).round();
    (scaled as u16).max(1)
}
