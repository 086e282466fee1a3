use std::collections::BTreeMap;

use crate::{
    config::EngineConfig,
    extract::AudioFeatures,
    scene::SceneSpan,
    selection::{CandidateSegment, Contribution},
    signal::{DetectionEvent, TimeSeriesSignal},
};

/// Window around the segment midpoint for speech/music indicator lookups
const MIDPOINT_TOLERANCE: f64 = 0.5;

/// All extractor outputs for one video, joined before scoring begins
///
/// `motion` is expected to be normalized to [0, 1] already; the scorer uses
/// its magnitudes directly.
#[derive(Debug, Clone, Default)]
pub struct SignalBundle {
    pub motion: Option<TimeSeriesSignal>,
    pub faces: Vec<DetectionEvent>,
    pub objects: Vec<DetectionEvent>,
    pub audio_peaks: Vec<f64>,
    pub features: Option<AudioFeatures>,
}

impl SignalBundle {
    fn motion_at(&self, time: f64) -> f64 {
        self.motion.as_ref().map_or(0.0, |s| s.value_at(time))
    }
}

/// Combines normalized signals and discrete events into one score per candidate
///
/// Every candidate starts from a baseline of 1.0; each present signal adds
/// its weighted term. Indicator terms are binary presence, the motion term
/// uses the normalized magnitude at the segment midpoint.
pub struct CandidateScorer<'a> {
    config: &'a EngineConfig,
    signals: &'a SignalBundle,
}

impl<'a> CandidateScorer<'a> {
    pub fn new(config: &'a EngineConfig, signals: &'a SignalBundle) -> Self {
        Self { config, signals }
    }

    /// The highest score any candidate can reach under the active config
    pub fn max_attainable(&self) -> f64 {
        let mut max = 1.0
            + self.config.motion_weight
            + self.config.audio_weight
            + self.config.face_weight
            + self.config.object_weight;
        if self.config.analyze_audio_advanced {
            max += self.config.speech_weight + self.config.music_weight * 0.5;
        }
        max
    }

    /// Score one scene-derived candidate
    ///
    /// Segments outside the configured duration bounds are discarded here,
    /// before scoring — they are never scored and never selectable.
    pub fn score(&self, span: &SceneSpan) -> Option<CandidateSegment> {
        let duration = span.duration();
        if duration < self.config.min_cut_duration || duration > self.config.max_cut_duration {
            return None;
        }

        let midpoint = (span.start + span.end) / 2.0;
        let mut contributions = BTreeMap::new();
        let mut score = 1.0;
        contributions.insert(Contribution::Baseline, 1.0);

        let motion = self.config.motion_weight * self.signals.motion_at(midpoint);
        if motion > 0.0 {
            contributions.insert(Contribution::Motion, motion);
            score += motion;
        }

        if self
            .signals
            .audio_peaks
            .iter()
            .any(|&t| t >= span.start && t <= span.end)
        {
            contributions.insert(Contribution::AudioPeak, self.config.audio_weight);
            score += self.config.audio_weight;
        }

        if in_segment(&self.signals.faces, span) {
            contributions.insert(Contribution::Face, self.config.face_weight);
            score += self.config.face_weight;
        }

        if in_segment(&self.signals.objects, span) {
            contributions.insert(Contribution::Object, self.config.object_weight);
            score += self.config.object_weight;
        }

        if let Some(features) = &self.signals.features {
            if features.any_speech_near(
                midpoint,
                MIDPOINT_TOLERANCE,
                self.config.features.speech_centroid_hz,
            ) {
                contributions.insert(Contribution::Speech, self.config.speech_weight);
                score += self.config.speech_weight;
            }

            if features.any_music_near(midpoint, MIDPOINT_TOLERANCE) {
                let music = self.config.music_weight * 0.5;
                contributions.insert(Contribution::Music, music);
                score += music;
            }
        }

        Some(CandidateSegment {
            start: span.start,
            end: span.end,
            raw_score: score,
            normalized_score: score / self.max_attainable(),
            contributions,
        })
    }
}

fn in_segment(events: &[DetectionEvent], span: &SceneSpan) -> bool {
    events
        .iter()
        .any(|e| e.time >= span.start && e.time <= span.end)
}
