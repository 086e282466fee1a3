//! # Scene Boundary Detection
//!
//! Segments the timeline into contiguous scenes. Two interchangeable
//! algorithms are provided, selected by the typed [`SceneAlgorithm`] enum:
//!
//! - **Content discontinuity** — mean absolute frame difference against a
//!   threshold.
//! - **Histogram correlation** — normalized grayscale histograms compared by
//!   Pearson correlation, debounced by a minimum scene length.
//!
//! Both honor the same contract: the returned spans exactly tile
//! `[0, duration]` with no gaps or overlaps, and the last span always extends
//! to `duration` even when the final detected boundary falls short.

pub mod content;
pub mod histogram;

use serde::{Deserialize, Serialize};

use crate::{config::EngineConfig, engine::Deadline, error::Result, media::DecodedMedia};

pub use content::ContentDetector;
pub use histogram::HistogramDetector;

/// One contiguous scene on the timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSpan {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds, strictly greater than start
    pub end: f64,
}

impl SceneSpan {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Which boundary detection algorithm to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneAlgorithm {
    ContentDiscontinuity,
    HistogramCorrelation,
}

/// Timeline segmentation capability
pub trait SceneBoundaryDetector: Send + Sync {
    /// Short identifier for logs
    fn name(&self) -> &'static str;

    /// Segment the media into spans tiling `[0, duration]`
    fn detect(&self, media: &DecodedMedia, deadline: Option<&Deadline>) -> Result<Vec<SceneSpan>>;
}

/// Instantiate the detector selected by the configuration
pub fn detector_for(config: &EngineConfig) -> Box<dyn SceneBoundaryDetector> {
    match config.scene.algorithm {
        SceneAlgorithm::ContentDiscontinuity => {
            Box::new(ContentDetector::new(config.scene_threshold))
        }
        SceneAlgorithm::HistogramCorrelation => Box::new(HistogramDetector::new(
            config.scene.histogram_similarity,
            config.scene.min_scene_length,
        )),
    }
}

/// Turn interior boundary timestamps into spans tiling `[0, duration]`
///
/// Boundaries outside `(0, duration)` and duplicates are ignored; the final
/// span always runs to `duration`.
pub(crate) fn spans_from_boundaries(boundaries: &[f64], duration: f64) -> Vec<SceneSpan> {
    let mut spans = Vec::with_capacity(boundaries.len() + 1);
    let mut start = 0.0;

    for &boundary in boundaries {
        if boundary > start && boundary < duration {
            spans.push(SceneSpan {
                start,
                end: boundary,
            });
            start = boundary;
        }
    }

    if duration > start {
        spans.push(SceneSpan {
            start,
            end: duration,
        });
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_tiles(spans: &[SceneSpan], duration: f64) {
        assert!(!spans.is_empty());
        assert_eq!(spans[0].start, 0.0);
        assert!((spans.last().unwrap().end - duration).abs() < 1e-9);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        for span in spans {
            assert!(span.start < span.end);
        }
    }

    #[test]
    fn test_spans_tile_with_interior_boundaries() {
        let spans = spans_from_boundaries(&[2.0, 5.0, 8.0], 10.0);
        assert_eq!(spans.len(), 4);
        assert_tiles(&spans, 10.0);
    }

    #[test]
    fn test_no_boundaries_yields_single_span() {
        let spans = spans_from_boundaries(&[], 10.0);
        assert_eq!(
            spans,
            vec![SceneSpan {
                start: 0.0,
                end: 10.0
            }]
        );
    }

    #[test]
    fn test_out_of_range_and_duplicate_boundaries_ignored() {
        let spans = spans_from_boundaries(&[-1.0, 0.0, 3.0, 3.0, 10.0, 12.0], 10.0);
        assert_eq!(spans.len(), 2);
        assert_tiles(&spans, 10.0);
    }

    #[test]
    fn test_last_span_extends_to_duration() {
        let spans = spans_from_boundaries(&[9.0], 10.0);
        assert_eq!(spans.last().unwrap().end, 10.0);
        assert_tiles(&spans, 10.0);
    }
}
