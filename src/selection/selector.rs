use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    config::EngineConfig,
    selection::{CandidateSegment, Contribution, SelectionResult},
};

/// Greedy constrained segment selector
///
/// Candidates are ranked by score (ties broken by earlier start, so identical
/// inputs always produce identical output) and accepted greedily as long as
/// they keep a minimum gap of `min_cut_duration` after the previously
/// accepted cut. Selection stops at `max_num_cuts`; the accepted set is
/// re-sorted by start time for the final result.
pub struct SegmentSelector<'a> {
    config: &'a EngineConfig,
}

impl<'a> SegmentSelector<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Synthesize degraded-mode candidates from audio peak timestamps
    ///
    /// Used when scene detection is disabled or produced zero usable
    /// segments: every peak strictly inside
    /// `(min_cut_duration, duration - min_cut_duration)` becomes a
    /// `[t - 1, t + 1]` window clamped to video bounds, carrying a flat
    /// baseline score. Explicitly weaker than full fusion.
    pub fn fallback_candidates(&self, audio_peaks: &[f64], duration: f64) -> Vec<CandidateSegment> {
        let min = self.config.min_cut_duration;
        let score = self.config.fallback_score;

        audio_peaks
            .iter()
            .filter(|&&t| t > min && t < duration - min)
            .map(|&t| {
                let start = (t - 1.0).max(0.0);
                let end = (t + 1.0).min(duration);
                CandidateSegment {
                    start,
                    end,
                    raw_score: score,
                    normalized_score: score,
                    contributions: BTreeMap::from([(Contribution::Baseline, score)]),
                }
            })
            .filter(|c| {
                c.duration() >= self.config.min_cut_duration
                    && c.duration() <= self.config.max_cut_duration
            })
            .collect()
    }

    /// Run the greedy selection over scored candidates
    pub fn select(&self, mut candidates: Vec<CandidateSegment>) -> SelectionResult {
        // Score descending, earlier start wins ties.
        candidates.sort_by(|a, b| {
            b.raw_score
                .total_cmp(&a.raw_score)
                .then(a.start.total_cmp(&b.start))
        });

        let mut accepted: Vec<CandidateSegment> = Vec::new();
        let mut last_end = f64::NEG_INFINITY;

        for candidate in candidates {
            if accepted.len() >= self.config.max_num_cuts {
                break;
            }
            if candidate.start >= last_end + self.config.min_cut_duration {
                last_end = candidate.end;
                accepted.push(candidate);
            }
        }

        accepted.sort_by(|a, b| a.start.total_cmp(&b.start));

        debug!(selected = accepted.len(), "segment selection complete");
        SelectionResult { cuts: accepted }
    }
}
