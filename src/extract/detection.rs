use tracing::{debug, warn};

use crate::{
    engine::Deadline,
    error::{ExtractorError, Result},
    media::{DecodedMedia, Frame},
    signal::{DetectionEvent, DetectionKind},
};

/// Confidence a detection must clear to produce an event
const CONFIDENCE_THRESHOLD: f32 = 0.5;

/// One detection reported by a [`Detector`] for a single frame
#[derive(Debug, Clone)]
pub struct Detection {
    /// Detector confidence in [0, 1]
    pub confidence: f32,

    /// Optional class label ("person", "dog", ...)
    pub label: Option<String>,
}

/// External detection model collaborator
///
/// An implementation owns its model weights and inference runtime; it is
/// constructed once by the caller and passed into the engine by handle, never
/// held as process-global state.
pub trait Detector: Send + Sync {
    /// Short identifier for logs ("haar-face", "yolo", ...)
    fn name(&self) -> &str;

    /// Run detection on one frame
    fn detect(&self, frame: &Frame) -> std::result::Result<Vec<Detection>, ExtractorError>;
}

/// Face / object presence extractor
///
/// Samples every Nth frame and records a [`DetectionEvent`] whenever the
/// collaborator reports at least one detection above the confidence
/// threshold. A missing or failing collaborator degrades to an empty result;
/// it must never abort the pipeline.
pub struct DetectionExtractor<'a> {
    kind: DetectionKind,
    detector: Option<&'a dyn Detector>,
    sample_rate: usize,
}

impl<'a> DetectionExtractor<'a> {
    pub fn new(kind: DetectionKind, detector: Option<&'a dyn Detector>, sample_rate: usize) -> Self {
        Self {
            kind,
            detector,
            sample_rate: sample_rate.max(1),
        }
    }

    /// Extract the sorted, deduplicated event list
    pub fn extract(
        &self,
        media: &DecodedMedia,
        deadline: Option<&Deadline>,
    ) -> Result<Vec<DetectionEvent>> {
        let Some(detector) = self.detector else {
            warn!(kind = ?self.kind, "detector collaborator unavailable, signal degraded to empty");
            return Ok(Vec::new());
        };

        let mut events: Vec<DetectionEvent> = Vec::new();
        let mut failed_frames = 0usize;

        for (index, frame) in media.frames.iter().enumerate().step_by(self.sample_rate) {
            if let Some(deadline) = deadline {
                deadline.check("detection extraction")?;
            }

            match detector.detect(frame) {
                Ok(detections) => {
                    let best = detections
                        .iter()
                        .map(|d| d.confidence)
                        .filter(|&c| c >= CONFIDENCE_THRESHOLD)
                        .fold(f32::NEG_INFINITY, f32::max);

                    if best.is_finite() {
                        events.push(DetectionEvent {
                            time: media.frame_time(index),
                            kind: self.kind,
                            confidence: best,
                        });
                    }
                }
                Err(e) => {
                    // Single-frame hiccups are absorbed; the signal just gets sparser.
                    failed_frames += 1;
                    if failed_frames == 1 {
                        warn!(detector = detector.name(), frame = index, error = %e,
                              "detector error, continuing");
                    }
                }
            }
        }

        if failed_frames > 0 {
            warn!(
                detector = detector.name(),
                failed_frames, "detector errors absorbed during extraction"
            );
        }

        // Sampling already visits each timestamp once, but keep the contract explicit.
        events.sort_by(|a, b| a.time.total_cmp(&b.time));
        events.dedup_by(|a, b| a.time == b.time);

        debug!(kind = ?self.kind, events = events.len(), "detection extraction complete");
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubDetector {
        hit_frames: Vec<usize>,
        calls: std::sync::atomic::AtomicUsize,
    }

    impl Detector for StubDetector {
        fn name(&self) -> &str {
            "stub"
        }

        fn detect(&self, _frame: &Frame) -> std::result::Result<Vec<Detection>, ExtractorError> {
            let call = self
                .calls
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            if self.hit_frames.contains(&call) {
                Ok(vec![Detection {
                    confidence: 0.9,
                    label: Some("person".to_string()),
                }])
            } else {
                Ok(vec![])
            }
        }
    }

    struct FailingDetector;

    impl Detector for FailingDetector {
        fn name(&self) -> &str {
            "failing"
        }

        fn detect(&self, _frame: &Frame) -> std::result::Result<Vec<Detection>, ExtractorError> {
            Err(ExtractorError::DetectorFailed {
                frame_index: 0,
                reason: "model not loaded".to_string(),
            })
        }
    }

    fn media_with_frames(count: usize, fps: f64) -> DecodedMedia {
        DecodedMedia {
            frames: vec![Frame::new_black(4, 4); count],
            fps,
            samples: vec![],
            sample_rate: 44100,
            duration: count as f64 / fps,
        }
    }

    #[test]
    fn test_missing_detector_yields_empty_not_error() {
        let media = media_with_frames(10, 10.0);
        let extractor = DetectionExtractor::new(DetectionKind::Face, None, 5);
        let events = extractor.extract(&media, None).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_failing_detector_yields_empty_not_error() {
        let media = media_with_frames(10, 10.0);
        let detector = FailingDetector;
        let extractor = DetectionExtractor::new(DetectionKind::Object, Some(&detector), 1);
        let events = extractor.extract(&media, None).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_sampled_frames_produce_timestamped_events() {
        // 20 frames at 10 fps, sampled every 5th: calls see frames 0,5,10,15.
        let media = media_with_frames(20, 10.0);
        let detector = StubDetector {
            hit_frames: vec![1, 3], // second and fourth sampled frames
            calls: std::sync::atomic::AtomicUsize::new(0),
        };
        let extractor = DetectionExtractor::new(DetectionKind::Face, Some(&detector), 5);
        let events = extractor.extract(&media, None).unwrap();

        let times: Vec<f64> = events.iter().map(|e| e.time).collect();
        assert_eq!(times, vec![0.5, 1.5]);
        assert!(events.iter().all(|e| e.kind == DetectionKind::Face));
        assert!(events.iter().all(|e| e.confidence >= 0.5));
    }
}
