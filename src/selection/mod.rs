//! # Candidate Scoring and Selection
//!
//! The last two pipeline stages: [`CandidateScorer`] fuses the normalized
//! signals into one score per candidate segment, and [`SegmentSelector`]
//! solves the constrained selection problem — greedy, non-overlapping,
//! capped, deterministic.

pub mod scorer;
pub mod selector;

use std::collections::BTreeMap;

pub use scorer::{CandidateScorer, SignalBundle};
pub use selector::SegmentSelector;

/// Which signal contributed to a candidate's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Contribution {
    Baseline,
    Motion,
    AudioPeak,
    Face,
    Object,
    Speech,
    Music,
}

/// A time window under consideration for selection
#[derive(Debug, Clone)]
pub struct CandidateSegment {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds, strictly greater than start
    pub end: f64,

    /// Fused score before normalization
    pub raw_score: f64,

    /// Raw score divided by the maximum attainable score for the active config
    pub normalized_score: f64,

    /// Per-signal score contributions, keyed for deterministic iteration
    pub contributions: BTreeMap<Contribution, f64>,
}

impl CandidateSegment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Final ordered list of chosen cuts
#[derive(Debug, Clone, Default)]
pub struct SelectionResult {
    /// Accepted segments, ordered by start time
    pub cuts: Vec<CandidateSegment>,
}

impl SelectionResult {
    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    /// The chosen cuts as plain (start, end) pairs in seconds
    pub fn ranges(&self) -> Vec<(f64, f64)> {
        self.cuts.iter().map(|c| (c.start, c.end)).collect()
    }
}
