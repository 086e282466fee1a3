use realfft::RealFftPlanner;
use tracing::debug;

use crate::{
    config::FeatureTuning,
    engine::Deadline,
    error::{ExtractorError, Result},
    media::DecodedMedia,
};

/// Onset picking sensitivity for beat tracking (0.0-1.0)
const BEAT_SENSITIVITY: f32 = 0.7;

/// Minimum spacing between accepted beats (seconds, caps tracking at 240 BPM)
const MIN_BEAT_INTERVAL: f64 = 0.25;

/// One advanced audio feature sample
#[derive(Debug, Clone, Copy)]
pub struct FeaturePoint {
    /// Time in seconds
    pub time: f64,

    /// Spectral centroid in Hz (brightness)
    pub spectral_centroid: f64,

    /// Whether this point falls within the beat tolerance of a tracked beat
    pub is_music: bool,
}

/// Advanced audio analysis output: centroid series plus tracked beat times
#[derive(Debug, Clone, Default)]
pub struct AudioFeatures {
    pub points: Vec<FeaturePoint>,
    pub beats: Vec<f64>,
}

impl AudioFeatures {
    /// Any speech-like sample (centroid above `centroid_hz`) within
    /// `tolerance` seconds of `time`?
    pub fn any_speech_near(&self, time: f64, tolerance: f64, centroid_hz: f64) -> bool {
        self.points
            .iter()
            .any(|p| (p.time - time).abs() < tolerance && p.spectral_centroid > centroid_hz)
    }

    /// Any musical sample within `tolerance` seconds of `time`?
    pub fn any_music_near(&self, time: f64, tolerance: f64) -> bool {
        self.points
            .iter()
            .any(|p| (p.time - time).abs() < tolerance && p.is_music)
    }
}

/// Spectral centroid and beat extractor
///
/// Windows the mono waveform with a Hann function, runs a real FFT per
/// window, and derives two things from the magnitude spectra: the spectral
/// centroid of each window, and onset candidates from the spectral flux
/// (positive magnitude differences) which become beat timestamps. Each
/// feature point is then tagged `is_music` when it lies within the configured
/// tolerance of a tracked beat.
pub struct AudioFeatureExtractor {
    tuning: FeatureTuning,
}

impl AudioFeatureExtractor {
    pub fn new(tuning: FeatureTuning) -> Self {
        Self { tuning }
    }

    pub fn extract(
        &self,
        media: &DecodedMedia,
        deadline: Option<&Deadline>,
    ) -> Result<AudioFeatures> {
        let window_size = self.tuning.window_size;
        let hop_size = self.tuning.hop_size;

        if media.samples.len() < window_size || media.sample_rate == 0 {
            return Ok(AudioFeatures::default());
        }

        let mut planner = RealFftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(window_size);
        let mut input_buffer = fft.make_input_vec();
        let mut spectrum_buffer = fft.make_output_vec();

        let mut previous_magnitude = vec![0.0f32; window_size / 2 + 1];
        let mut centroids: Vec<(f64, f64)> = Vec::new();
        let mut flux_values: Vec<f32> = Vec::new();

        for (frame_idx, window) in media
            .samples
            .windows(window_size)
            .step_by(hop_size)
            .enumerate()
        {
            if frame_idx % 256 == 0 {
                if let Some(deadline) = deadline {
                    deadline.check("audio feature extraction")?;
                }
            }

            // Hann window
            for (i, &sample) in window.iter().enumerate() {
                let window_val = 0.5
                    * (1.0
                        - (2.0 * std::f32::consts::PI * i as f32 / (window_size - 1) as f32).cos());
                input_buffer[i] = sample * window_val;
            }

            fft.process(&mut input_buffer, &mut spectrum_buffer)
                .map_err(|_| ExtractorError::AudioAnalysisFailed {
                    reason: "FFT processing failed".to_string(),
                })?;

            let magnitude: Vec<f32> = spectrum_buffer.iter().map(|c| c.norm()).collect();

            // Spectral centroid in Hz
            let total_magnitude: f32 = magnitude.iter().sum();
            let weighted_sum: f32 = magnitude
                .iter()
                .enumerate()
                .map(|(i, &mag)| i as f32 * mag)
                .sum();
            let centroid = if total_magnitude > 0.0 {
                (weighted_sum / total_magnitude) * (media.sample_rate as f32 / 2.0)
                    / (magnitude.len() as f32)
            } else {
                0.0
            };

            // Spectral flux: sum of positive magnitude differences
            let flux: f32 = magnitude
                .iter()
                .zip(previous_magnitude.iter())
                .map(|(&curr, &prev)| (curr - prev).max(0.0))
                .sum();
            flux_values.push(flux);
            previous_magnitude.copy_from_slice(&magnitude);

            let time = (frame_idx * hop_size) as f64 / media.sample_rate as f64;
            centroids.push((time, centroid as f64));
        }

        let beats = self.track_beats(&flux_values, media.sample_rate);

        let points = centroids
            .into_iter()
            .map(|(time, spectral_centroid)| FeaturePoint {
                time,
                spectral_centroid,
                is_music: beats
                    .iter()
                    .any(|&bt| (time - bt).abs() < self.tuning.beat_tolerance),
            })
            .collect::<Vec<_>>();

        debug!(
            points = points.len(),
            beats = beats.len(),
            "audio feature extraction complete"
        );
        Ok(AudioFeatures { points, beats })
    }

    /// Pick beats from the spectral flux curve
    ///
    /// Local maxima above an adaptive threshold become onsets; if none
    /// qualify, a simpler global mean threshold is tried. Onsets closer
    /// together than the minimum beat interval are dropped.
    fn track_beats(&self, flux_values: &[f32], sample_rate: u32) -> Vec<f64> {
        let hop_size = self.tuning.hop_size;
        let time_of = |idx: usize| (idx * hop_size) as f64 / sample_rate as f64;

        let mut onsets = Vec::new();

        for frame_idx in 3..flux_values.len().saturating_sub(3) {
            let window = &flux_values[frame_idx - 3..frame_idx + 3];
            let local_max = window.iter().fold(0.0f32, |acc, &x| acc.max(x));
            let local_mean = window.iter().sum::<f32>() / window.len() as f32;

            let threshold = local_mean + BEAT_SENSITIVITY * (local_max - local_mean) * 0.5;
            let flux = flux_values[frame_idx];

            if flux >= threshold && flux == local_max && flux > local_mean * 1.5 {
                onsets.push(time_of(frame_idx));
            }
        }

        if onsets.is_empty() && !flux_values.is_empty() {
            let mean_flux = flux_values.iter().sum::<f32>() / flux_values.len() as f32;
            let simple_threshold = mean_flux * (2.0 + BEAT_SENSITIVITY);

            for (frame_idx, &flux) in flux_values.iter().enumerate() {
                if flux > simple_threshold {
                    onsets.push(time_of(frame_idx));
                }
            }
        }

        let mut beats = Vec::with_capacity(onsets.len());
        let mut last_beat = f64::NEG_INFINITY;
        for onset in onsets {
            if onset - last_beat >= MIN_BEAT_INTERVAL {
                beats.push(onset);
                last_beat = onset;
            }
        }
        beats
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

    fn sine(sample_rate: u32, seconds: f64, frequency: f32) -> Vec<f32> {
        (0..(sample_rate as f64 * seconds) as usize)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                (2.0 * std::f32::consts::PI * frequency * t).sin() * 0.5
            })
            .collect()
    }

    #[test]
    fn test_short_audio_yields_empty_features() {
        let media = media_with_samples(vec![0.1; 100], 44100);
        let extractor = AudioFeatureExtractor::new(FeatureTuning::default());
        let features = extractor.extract(&media, None).unwrap();
        assert!(features.points.is_empty());
        assert!(features.beats.is_empty());
    }

    #[test]
    fn test_tone_produces_centroid_series() {
        let media = media_with_samples(sine(44100, 1.0, 440.0), 44100);
        let extractor = AudioFeatureExtractor::new(FeatureTuning::default());
        let features = extractor.extract(&media, None).unwrap();

        assert!(!features.points.is_empty());
        assert!(features.points.iter().all(|p| p.spectral_centroid >= 0.0));

        // Timestamps are monotonically increasing.
        for pair in features.points.windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
    }

    #[test]
    fn test_speech_query_respects_threshold() {
        let features = AudioFeatures {
            points: vec![
                FeaturePoint {
                    time: 1.0,
                    spectral_centroid: 4000.0,
                    is_music: false,
                },
                FeaturePoint {
                    time: 5.0,
                    spectral_centroid: 500.0,
                    is_music: true,
                },
            ],
            beats: vec![5.0],
        };

        assert!(features.any_speech_near(1.2, 0.5, 3000.0));
        assert!(!features.any_speech_near(5.0, 0.5, 3000.0));
        assert!(features.any_music_near(5.3, 0.5));
        assert!(!features.any_music_near(1.0, 0.5));
    }
}
