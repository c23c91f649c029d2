//! Instrumented textbook sorts.
//!
//! Each algorithm is written once, generic over a [`Recorder`]. Recording into
//! a `Vec<Step>` yields an animation [`Trace`]; the [`Silent`] recorder turns
//! the same code into a plain ascending sort.
//!
//! Every comparison is recorded as an alert/release pair of
//! [`Step::Compare`] steps, and every swap as two [`Step::Write`] steps that
//! carry the values each position is about to receive.

use crate::trace::{Algorithm, Step, Trace, Value};

/// Sink for the steps an algorithm emits while it sorts.
pub trait Recorder {
    /// Positions `a` and `b` are being compared.
    fn compare(&mut self, a: usize, b: usize);
    /// Position `index` is about to hold `value`.
    fn write(&mut self, index: usize, value: Value);
}

impl Recorder for Vec<Step> {
    fn compare(&mut self, a: usize, b: usize) {
        self.push(Step::Compare { a, b, alert: true });
        self.push(Step::Compare { a, b, alert: false });
    }

    fn write(&mut self, index: usize, value: Value) {
        self.push(Step::Write { index, value });
    }
}

/// Recorder that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Recorder for Silent {
    #[inline]
    fn compare(&mut self, _a: usize, _b: usize) {}

    #[inline]
    fn write(&mut self, _index: usize, _value: Value) {}
}

/// Sort a copy of `values` and return the steps that animate it.
///
/// The caller's slice is never touched. The same input always yields the
/// same trace.
pub fn generate_trace(algorithm: Algorithm, values: &[Value]) -> Trace {
    let mut work = values.to_vec();
    let mut steps = Vec::new();
    sort_with(algorithm, &mut work, &mut steps);
    log::debug!(
        "{algorithm}: {} steps for {} values",
        steps.len(),
        values.len()
    );
    Trace::new(algorithm, values.len(), steps)
}

/// Sort a copy of `values` ascending without recording anything.
pub fn sort_only(algorithm: Algorithm, values: &[Value]) -> Vec<Value> {
    let mut work = values.to_vec();
    sort_with(algorithm, &mut work, &mut Silent);
    work
}

/// Sort `values` in place with `algorithm`, reporting steps to `rec`.
pub fn sort_with<R: Recorder + ?Sized>(algorithm: Algorithm, values: &mut [Value], rec: &mut R) {
    match algorithm {
        Algorithm::Merge => merge_sort(values, rec),
        Algorithm::Quick => quick_sort(values, rec),
        Algorithm::Heap => heap_sort(values, rec),
        Algorithm::Bubble => bubble_sort(values, rec),
    }
}

// ---------------------------------------------------------------------------
// Merge sort
// ---------------------------------------------------------------------------

/// Top-down merge sort alternating between the main and an auxiliary buffer.
pub fn merge_sort<R: Recorder + ?Sized>(values: &mut [Value], rec: &mut R) {
    if values.len() <= 1 {
        return;
    }
    let mut aux = values.to_vec();
    let end = values.len() - 1;
    merge_sort_range(values, &mut aux, 0, end, rec);
}

fn merge_sort_range<R: Recorder + ?Sized>(
    main: &mut [Value],
    aux: &mut [Value],
    start: usize,
    end: usize,
    rec: &mut R,
) {
    if start == end {
        return;
    }
    let mid = (start + end) / 2;
    // Buffers swap roles at each level so the merge reads from `aux`.
    merge_sort_range(aux, main, start, mid, rec);
    merge_sort_range(aux, main, mid + 1, end, rec);
    merge(main, aux, start, mid, end, rec);
}

fn merge<R: Recorder + ?Sized>(
    main: &mut [Value],
    aux: &[Value],
    start: usize,
    mid: usize,
    end: usize,
    rec: &mut R,
) {
    let (mut k, mut i, mut j) = (start, start, mid + 1);

    while i <= mid && j <= end {
        rec.compare(i, j);
        if aux[i] <= aux[j] {
            rec.write(k, aux[i]);
            main[k] = aux[i];
            i += 1;
        } else {
            rec.write(k, aux[j]);
            main[k] = aux[j];
            j += 1;
        }
        k += 1;
    }
    while i <= mid {
        rec.compare(i, i);
        rec.write(k, aux[i]);
        main[k] = aux[i];
        i += 1;
        k += 1;
    }
    while j <= end {
        rec.compare(j, j);
        rec.write(k, aux[j]);
        main[k] = aux[j];
        j += 1;
        k += 1;
    }
}

// ---------------------------------------------------------------------------
// Quick sort
// ---------------------------------------------------------------------------

/// Quick sort with Lomuto partitioning around the last element.
pub fn quick_sort<R: Recorder + ?Sized>(values: &mut [Value], rec: &mut R) {
    if values.len() >= 2 {
        let high = values.len() - 1;
        quick_sort_range(values, 0, high, rec);
    }
}

fn quick_sort_range<R: Recorder + ?Sized>(
    values: &mut [Value],
    low: usize,
    high: usize,
    rec: &mut R,
) {
    if low >= high {
        return;
    }
    let pivot = partition(values, low, high, rec);
    if pivot > low {
        quick_sort_range(values, low, pivot - 1, rec);
    }
    quick_sort_range(values, pivot + 1, high, rec);
}

fn partition<R: Recorder + ?Sized>(
    values: &mut [Value],
    low: usize,
    high: usize,
    rec: &mut R,
) -> usize {
    let pivot = values[high];
    let mut i = low;
    for j in low..high {
        rec.compare(j, high);
        if values[j] < pivot {
            rec.write(i, values[j]);
            rec.write(j, values[i]);
            values.swap(i, j);
            i += 1;
        }
    }
    rec.write(i, values[high]);
    rec.write(high, values[i]);
    values.swap(i, high);
    i
}

// ---------------------------------------------------------------------------
// Heap sort
// ---------------------------------------------------------------------------

/// In-place heap sort over a max-heap.
pub fn heap_sort<R: Recorder + ?Sized>(values: &mut [Value], rec: &mut R) {
    let n = values.len();
    for i in (0..n / 2).rev() {
        sift_down(values, n, i, rec);
    }
    for last in (1..n).rev() {
        rec.compare(0, last);
        rec.write(0, values[last]);
        rec.write(last, values[0]);
        values.swap(0, last);
        sift_down(values, last, 0, rec);
    }
}

fn sift_down<R: Recorder + ?Sized>(values: &mut [Value], n: usize, root: usize, rec: &mut R) {
    let mut largest = root;
    let left = 2 * root + 1;
    let right = 2 * root + 2;

    if left < n && values[left] > values[largest] {
        largest = left;
    }
    if right < n && values[right] > values[largest] {
        largest = right;
    }
    if largest != root {
        rec.compare(root, largest);
        rec.write(root, values[largest]);
        rec.write(largest, values[root]);
        values.swap(root, largest);
        sift_down(values, n, largest, rec);
    }
}

// ---------------------------------------------------------------------------
// Bubble sort
// ---------------------------------------------------------------------------

/// Adjacent-pair bubble sort; `n - 1` passes, each one shorter than the last.
pub fn bubble_sort<R: Recorder + ?Sized>(values: &mut [Value], rec: &mut R) {
    let n = values.len();
    for pass in 0..n.saturating_sub(1) {
        for j in 0..n - 1 - pass {
            rec.compare(j, j + 1);
            if values[j] > values[j + 1] {
                rec.write(j, values[j + 1]);
                rec.write(j + 1, values[j]);
                values.swap(j, j + 1);
            }
        }
    }
}
