use crate::signal::types::{SignalPoint, TimeSeriesSignal};

/// Min-max rescale a signal into [0, 1]
///
/// `normalized = (v - min) / (max - min)` when `max > min`. Two edge cases
/// are defined explicitly rather than left to float arithmetic:
///
/// - an empty signal stays empty (it contributes nothing when queried);
/// - a constant signal (`max == min`) normalizes to all zeros, avoiding a
///   divide-by-zero NaN.
///
/// Applying this to a series already spanning [0, 1] is a no-op, so
/// normalization is idempotent.
pub fn normalize(signal: &TimeSeriesSignal) -> TimeSeriesSignal {
    let Some((min, max)) = signal.value_range() else {
        return TimeSeriesSignal::empty(signal.kind());
    };

    let span = max - min;
    let points = signal
        .points()
        .iter()
        .map(|p| SignalPoint {
            time: p.time,
            value: if span > 0.0 { (p.value - min) / span } else { 0.0 },
        })
        .collect();

    TimeSeriesSignal::from_points(signal.kind(), points)
}
