use tracing::debug;

use crate::{engine::Deadline, error::Result, media::DecodedMedia};

/// Analysis window length in milliseconds
const WINDOW_MS: usize = 50;

/// Hop between windows in milliseconds (50% overlap)
const HOP_MS: usize = 25;

/// Audio loudness peak extractor
///
/// Slides a fixed 50 ms window (25 ms hop) over the mono waveform, computes
/// the peak level per window in dBFS and emits the window's midpoint
/// timestamp whenever the peak clears the configured threshold.
pub struct AudioPeakExtractor {
    threshold_dbfs: f64,
}

impl AudioPeakExtractor {
    pub fn new(threshold_dbfs: f64) -> Self {
        Self { threshold_dbfs }
    }

    /// Extract the sorted, deduplicated peak timestamp list
    pub fn extract(&self, media: &DecodedMedia, deadline: Option<&Deadline>) -> Result<Vec<f64>> {
        if media.samples.is_empty() || media.sample_rate == 0 {
            return Ok(Vec::new());
        }

        let sr = media.sample_rate as usize;
        let window = (sr * WINDOW_MS / 1000).max(1);
        let hop = (sr * HOP_MS / 1000).max(1);

        let mut peaks = Vec::new();

        for (i, chunk) in media.samples.windows(window).step_by(hop).enumerate() {
            if i % 1024 == 0 {
                if let Some(deadline) = deadline {
                    deadline.check("audio peak extraction")?;
                }
            }

            let max_abs = chunk.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
            let dbfs = 20.0 * (max_abs as f64).log10();

            if dbfs > self.threshold_dbfs {
                let midpoint = (i * hop + window / 2) as f64 / sr as f64;
                peaks.push(midpoint);
            }
        }

        peaks.dedup();
        debug!(peaks = peaks.len(), "audio peak extraction complete");
        Ok(peaks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media_with_samples(samples: Vec<f32>, sample_rate: u32) -> DecodedMedia {
        let duration = samples.len() as f64 / sample_rate as f64;
        DecodedMedia {
            frames: vec![],
            fps: 30.0,
            samples,
            sample_rate,
            duration,
        }
    }

    #[test]
    fn test_silence_yields_no_peaks() {
        let media = media_with_samples(vec![0.0; 8000], 8000);
        let extractor = AudioPeakExtractor::new(-20.0);
        assert!(extractor.extract(&media, None).unwrap().is_empty());
    }

    #[test]
    fn test_empty_audio_yields_no_peaks() {
        let media = media_with_samples(vec![], 8000);
        let extractor = AudioPeakExtractor::new(-20.0);
        assert!(extractor.extract(&media, None).unwrap().is_empty());
    }

    #[test]
    fn test_loud_burst_is_located_at_window_midpoint() {
        // 2 s of silence with a full-scale 50 ms burst at t = 1.0 s.
        let sr = 8000usize;
        let mut samples = vec![0.0f32; sr * 2];
        for s in samples.iter_mut().skip(sr).take(sr / 20) {
            *s = 1.0;
        }
        let media = media_with_samples(samples, sr as u32);

        let extractor = AudioPeakExtractor::new(-20.0);
        let peaks = extractor.extract(&media, None).unwrap();

        assert!(!peaks.is_empty());
        assert!(
            peaks.iter().all(|&t| (t - 1.0).abs() < 0.1),
            "peaks {:?} should cluster around 1.0 s",
            peaks
        );

        // Sorted and deduplicated.
        let mut sorted = peaks.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        sorted.dedup();
        assert_eq!(peaks, sorted);
    }

    #[test]
    fn test_quiet_audio_below_threshold() {
        // -40 dBFS tone stays below a -20 dBFS threshold.
        let samples = vec![0.01f32; 8000];
        let media = media_with_samples(samples, 8000);
        let extractor = AudioPeakExtractor::new(-20.0);
        assert!(extractor.extract(&media, None).unwrap().is_empty());
    }
}
