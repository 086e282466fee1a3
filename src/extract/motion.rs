use serde::{Deserialize, Serialize};

use crate::{
    engine::Deadline,
    error::Result,
    media::DecodedMedia,
    signal::{SignalKind, TimeSeriesSignal},
};

/// Gaussian blur applied before differencing to suppress sensor noise
const BLUR_SIGMA: f32 = 3.5;

/// How per-frame motion intensity is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionMetric {
    /// Fraction of pixels that changed (scale-independent)
    Fraction,

    /// Raw count of changed pixels
    Sum,
}

/// Frame-to-frame motion intensity extractor
///
/// Blurs consecutive grayscale frames, takes the absolute difference, applies
/// a binary per-pixel threshold and reports how much of the frame changed.
/// Emits one sample per frame pair at `frame_index / fps`.
pub struct MotionExtractor {
    pixel_threshold: u8,
    metric: MotionMetric,
}

impl MotionExtractor {
    pub fn new(pixel_threshold: f64, metric: MotionMetric) -> Self {
        Self {
            pixel_threshold: pixel_threshold.clamp(0.0, 255.0) as u8,
            metric,
        }
    }

    /// Extract the motion time series
    ///
    /// Degenerate input (one frame or fewer) yields an empty series.
    pub fn extract(
        &self,
        media: &DecodedMedia,
        deadline: Option<&Deadline>,
    ) -> Result<TimeSeriesSignal> {
        let mut signal = TimeSeriesSignal::empty(SignalKind::Motion);
        if media.frames.len() <= 1 {
            return Ok(signal);
        }

        let mut prev = media.frames[0].blurred(BLUR_SIGMA);

        for (index, frame) in media.frames.iter().enumerate().skip(1) {
            if let Some(deadline) = deadline {
                deadline.check("motion extraction")?;
            }

            let current = frame.blurred(BLUR_SIGMA);
            let changed = prev
                .as_luma_bytes()
                .iter()
                .zip(current.as_luma_bytes())
                .filter(|(&a, &b)| a.abs_diff(b) > self.pixel_threshold)
                .count();

            let intensity = match self.metric {
                MotionMetric::Fraction => changed as f64 / current.pixel_count() as f64,
                MotionMetric::Sum => changed as f64,
            };

            signal.push(media.frame_time(index), intensity);
            prev = current;
        }

        tracing::debug!("motion: {} samples extracted", signal.len());
        Ok(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::Frame;

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
    fn test_single_frame_yields_empty_series() {
        let media = media_from_frames(vec![Frame::new_black(8, 8)], 30.0);
        let extractor = MotionExtractor::new(20.0, MotionMetric::Fraction);
        let signal = extractor.extract(&media, None).unwrap();
        assert!(signal.is_empty());
    }

    #[test]
    fn test_static_frames_have_zero_motion() {
        let frames = vec![Frame::new_filled(16, 16, 90); 5];
        let media = media_from_frames(frames, 10.0);
        let extractor = MotionExtractor::new(20.0, MotionMetric::Fraction);
        let signal = extractor.extract(&media, None).unwrap();

        assert_eq!(signal.len(), 4);
        assert!(signal.points().iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_full_frame_change_registers() {
        let frames = vec![
            Frame::new_filled(16, 16, 0),
            Frame::new_filled(16, 16, 255),
        ];
        let media = media_from_frames(frames, 10.0);
        let extractor = MotionExtractor::new(20.0, MotionMetric::Fraction);
        let signal = extractor.extract(&media, None).unwrap();

        assert_eq!(signal.len(), 1);
        let point = signal.points()[0];
        assert_eq!(point.time, 0.1);
        assert!(point.value > 0.9, "expected most pixels to register change");
    }

    #[test]
    fn test_sum_metric_counts_pixels() {
        let frames = vec![
            Frame::new_filled(16, 16, 0),
            Frame::new_filled(16, 16, 255),
        ];
        let media = media_from_frames(frames, 10.0);
        let extractor = MotionExtractor::new(20.0, MotionMetric::Sum);
        let signal = extractor.extract(&media, None).unwrap();
        assert!(signal.points()[0].value > 200.0);
    }
}
