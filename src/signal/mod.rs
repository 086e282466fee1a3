//! # Signal Module
//!
//! Time-tagged analysis signals and their normalization. Continuous signals
//! (motion intensity, spectral centroid) are [`TimeSeriesSignal`]s; discrete
//! detections (faces, objects) are [`DetectionEvent`]s. Normalization brings
//! every continuous signal into a comparable [0, 1] range before scoring.

pub mod normalize;
pub mod types;

pub use normalize::normalize;
pub use types::{DetectionEvent, DetectionKind, SignalKind, SignalPoint, TimeSeriesSignal};
