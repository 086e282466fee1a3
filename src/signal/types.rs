use serde::{Deserialize, Serialize};

/// Kind tag for a continuous time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// Frame-to-frame motion intensity
    Motion,

    /// Spectral centroid of the audio (brightness, Hz)
    SpectralCentroid,
}

/// One sample of a continuous signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalPoint {
    /// Time in seconds
    pub time: f64,

    /// Signal value at that time
    pub value: f64,
}

/// Ordered sequence of (timestamp, value) samples for one signal kind
///
/// Timestamps increase monotonically. An empty series is valid and behaves as
/// all-absent wherever it is queried.
#[derive(Debug, Clone)]
pub struct TimeSeriesSignal {
    kind: SignalKind,
    points: Vec<SignalPoint>,
}

impl TimeSeriesSignal {
    /// Create an empty signal of the given kind
    pub fn empty(kind: SignalKind) -> Self {
        Self {
            kind,
            points: Vec::new(),
        }
    }

    /// Build a signal from points, sorting by time to restore monotonicity
    pub fn from_points(kind: SignalKind, mut points: Vec<SignalPoint>) -> Self {
        points.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { kind, points }
    }

    /// Append a sample; `time` must not precede the last sample
    pub fn push(&mut self, time: f64, value: f64) {
        debug_assert!(
            self.points.last().map_or(true, |p| time >= p.time),
            "timestamps must be monotonically increasing"
        );
        self.points.push(SignalPoint { time, value });
    }

    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    pub fn points(&self) -> &[SignalPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Value of the sample nearest to `time`, or 0.0 for an empty signal
    pub fn value_at(&self, time: f64) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }

        let idx = self
            .points
            .partition_point(|p| p.time < time)
            .min(self.points.len() - 1);

        // The nearest sample is either at the partition point or just before it.
        let mut best = idx;
        if idx > 0 {
            let before = &self.points[idx - 1];
            let after = &self.points[idx];
            if (time - before.time).abs() < (after.time - time).abs() {
                best = idx - 1;
            }
        }
        self.points[best].value
    }

    /// Minimum and maximum values, or None for an empty signal
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.points.iter().map(|p| p.value);
        let first = iter.next()?;
        let (mut min, mut max) = (first, first);
        for v in iter {
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }
}

/// Kind tag for a discrete detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectionKind {
    Face,
    Object,
}

/// One discrete detection emitted by a face or object extractor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionEvent {
    /// Time in seconds
    pub time: f64,

    /// What was detected
    pub kind: DetectionKind,

    /// Detector confidence in [0, 1]
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[(f64, f64)]) -> TimeSeriesSignal {
        TimeSeriesSignal::from_points(
            SignalKind::Motion,
            values
                .iter()
                .map(|&(time, value)| SignalPoint { time, value })
                .collect(),
        )
    }

    #[test]
    fn test_empty_signal_queries_to_zero() {
        let signal = TimeSeriesSignal::empty(SignalKind::Motion);
        assert_eq!(signal.value_at(5.0), 0.0);
        assert!(signal.value_range().is_none());
    }

    #[test]
    fn test_value_at_picks_nearest_sample() {
        let signal = series(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);
        assert_eq!(signal.value_at(0.1), 1.0);
        assert_eq!(signal.value_at(0.9), 2.0);
        assert_eq!(signal.value_at(1.6), 3.0);
        assert_eq!(signal.value_at(10.0), 3.0);
        assert_eq!(signal.value_at(-1.0), 1.0);
    }

    #[test]
    fn test_from_points_restores_order() {
        let signal = series(&[(2.0, 3.0), (0.0, 1.0), (1.0, 2.0)]);
        let times: Vec<f64> = signal.points().iter().map(|p| p.time).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_value_range() {
        let signal = series(&[(0.0, 4.0), (1.0, -2.0), (2.0, 3.0)]);
        assert_eq!(signal.value_range(), Some((-2.0, 4.0)));
    }
}
