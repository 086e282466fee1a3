use tracing::debug;

use crate::{
    engine::Deadline,
    error::Result,
    media::DecodedMedia,
    scene::{spans_from_boundaries, SceneBoundaryDetector, SceneSpan},
};

/// Content-discontinuity scene detector
///
/// Compares the mean absolute pixel difference between consecutive frames
/// against a threshold; a boundary is declared at each frame where the
/// statistic crosses it.
pub struct ContentDetector {
    threshold: f64,
}

impl ContentDetector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl SceneBoundaryDetector for ContentDetector {
    fn name(&self) -> &'static str {
        "content-discontinuity"
    }

    fn detect(&self, media: &DecodedMedia, deadline: Option<&Deadline>) -> Result<Vec<SceneSpan>> {
        let mut boundaries = Vec::new();

        for (index, pair) in media.frames.windows(2).enumerate() {
            if let Some(deadline) = deadline {
                deadline.check("scene detection")?;
            }

            let diff_sum: u64 = pair[0]
                .as_luma_bytes()
                .iter()
                .zip(pair[1].as_luma_bytes())
                .map(|(&a, &b)| a.abs_diff(b) as u64)
                .sum();
            let mean_diff = diff_sum as f64 / pair[1].pixel_count() as f64;

            if mean_diff > self.threshold {
                boundaries.push(media.frame_time(index + 1));
            }
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
