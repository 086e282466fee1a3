use tracing::debug;

use crate::{
    engine::Deadline,
    error::Result,
    media::{DecodedMedia, Frame},
    scene::{spans_from_boundaries, SceneBoundaryDetector, SceneSpan},
};

const HISTOGRAM_BINS: usize = 256;

/// Histogram-correlation scene detector
///
/// Builds a normalized grayscale histogram per frame and declares a boundary
/// when the Pearson correlation with the previous frame's histogram drops
/// below the similarity threshold. Boundaries closer than the minimum scene
/// length to the previous cut are suppressed to avoid over-segmentation.
pub struct HistogramDetector {
    similarity: f64,
    min_scene_length: f64,
}

impl HistogramDetector {
    pub fn new(similarity: f64, min_scene_length: f64) -> Self {
        Self {
            similarity,
            min_scene_length,
        }
    }

    fn histogram(frame: &Frame) -> Vec<f64> {
        let mut bins = vec![0.0f64; HISTOGRAM_BINS];
        for &luma in frame.as_luma_bytes() {
            bins[luma as usize] += 1.0;
        }
        let total = frame.pixel_count() as f64;
        if total > 0.0 {
            for bin in &mut bins {
                *bin /= total;
            }
        }
        bins
    }

    /// Pearson correlation between two histograms
    ///
    /// Identical histograms score 1.0; a fully constant histogram has no
    /// variance and correlates at 0.0 with everything.
    fn correlation(a: &[f64], b: &[f64]) -> f64 {
        let n = a.len() as f64;
        let mean_a = a.iter().sum::<f64>() / n;
        let mean_b = b.iter().sum::<f64>() / n;

        let mut cov = 0.0;
        let mut var_a = 0.0;
        let mut var_b = 0.0;
        for (&x, &y) in a.iter().zip(b) {
            let dx = x - mean_a;
            let dy = y - mean_b;
            cov += dx * dy;
            var_a += dx * dx;
            var_b += dy * dy;
        }

        let denom = (var_a * var_b).sqrt();
        if denom > 0.0 {
            cov / denom
        } else {
            0.0
        }
    }
}

impl SceneBoundaryDetector for HistogramDetector {
    fn name(&self) -> &'static str {
        "histogram-correlation"
    }

    fn detect(&self, media: &DecodedMedia, deadline: Option<&Deadline>) -> Result<Vec<SceneSpan>> {
        let mut boundaries = Vec::new();
        let mut prev_hist: Option<Vec<f64>> = None;
        let mut last_cut = 0.0;

        for (index, frame) in media.frames.iter().enumerate() {
            if let Some(deadline) = deadline {
                deadline.check("scene detection")?;
            }

            let hist = Self::histogram(frame);

            if let Some(prev) = &prev_hist {
                let correlation = Self::correlation(prev, &hist);
                if correlation < self.similarity {
                    let time = media.frame_time(index);
                    if time - last_cut >= self.min_scene_length {
                        boundaries.push(time);
                        last_cut = time;
                    }
                }
            }
            prev_hist = Some(hist);
        }

        let spans = spans_from_boundaries(&boundaries, media.duration);
        debug!(
            detector = self.name(),
            boundaries = boundaries.len(),
            scenes = spans.len(),
            "scene detection complete"
        );
        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_frame(offset: u8) -> Frame {
        let mut frame = Frame::new_black(16, 16);
        for y in 0..16 {
            for x in 0..16 {
                frame.set_pixel(x, y, ((x * 16) as u8).wrapping_add(offset));
            }
        }
        frame
    }

    fn media_from_frames(frames: Vec<Frame>, fps: f64) -> DecodedMedia {
        let duration = frames.len() as f64 / fps;
        DecodedMedia {
            frames,
            fps,
            samples: vec![],
            sample_rate: 44100,
            duration,
        }
    }

    #[test]
    fn test_identical_histograms_correlate_fully() {
        let hist = HistogramDetector::histogram(&gradient_frame(0));
        let corr = HistogramDetector::correlation(&hist, &hist);
        assert!((corr - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_stable_content_is_one_scene() {
        let media = media_from_frames(vec![gradient_frame(0); 60], 10.0);
        let detector = HistogramDetector::new(0.6, 2.0);
        let spans = detector.detect(&media, None).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].end, 6.0);
    }

    #[test]
    fn test_histogram_jump_splits_with_debounce() {
        // 30 gradient frames, 30 flat frames, 30 gradient again at 10 fps.
        // The second transition at t = 6.0 clears the 2 s debounce from the
        // first cut at t = 3.0, so both boundaries survive.
        let mut frames = vec![gradient_frame(0); 30];
        frames.extend(vec![Frame::new_filled(16, 16, 128); 30]);
        frames.extend(vec![gradient_frame(0); 30]);
        let media = media_from_frames(frames, 10.0);

        let detector = HistogramDetector::new(0.6, 2.0);
        let spans = detector.detect(&media, None).unwrap();

        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].end, 3.0);
        assert_eq!(spans[1].end, 6.0);
        assert_eq!(spans[2].end, 9.0);
    }

    #[test]
    fn test_debounce_suppresses_rapid_boundaries() {
        // Alternating content every 5 frames (0.5 s) with a 2 s minimum scene
        // length: most boundaries are suppressed, but the output still tiles.
        let mut frames = Vec::new();
        for block in 0..12 {
            let frame = if block % 2 == 0 {
                gradient_frame(0)
            } else {
                Frame::new_filled(16, 16, 128)
            };
            frames.extend(vec![frame; 5]);
        }
        let media = media_from_frames(frames, 10.0);

        let detector = HistogramDetector::new(0.6, 2.0);
        let spans = detector.detect(&media, None).unwrap();

        for span in &spans {
            assert!(span.start < span.end);
        }
        assert_eq!(spans[0].start, 0.0);
        assert!((spans.last().unwrap().end - media.duration).abs() < 1e-9);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        // Every interior boundary respects the debounce.
        for span in &spans[..spans.len() - 1] {
            assert!(span.duration() >= 2.0 - 1e-9);
        }
    }
}
