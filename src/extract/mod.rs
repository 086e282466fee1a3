//! # Signal Extractors
//!
//! One extractor per analysis signal: frame-to-frame motion, face and object
//! presence (through an external [`Detector`] collaborator), audio loudness
//! peaks, and optional advanced audio features (spectral centroid plus beat
//! tracking).
//!
//! Extractors are read-only over the shared [`DecodedMedia`] and write only
//! their own output, so the engine runs them as parallel tasks. An internal
//! extractor failure degrades that one signal to empty and is logged; it
//! never aborts the pipeline. Only a deadline timeout is fatal.
//!
//! [`DecodedMedia`]: crate::media::DecodedMedia

pub mod audio_features;
pub mod audio_peaks;
pub mod detection;
pub mod motion;

pub use audio_features::{AudioFeatureExtractor, AudioFeatures, FeaturePoint};
pub use audio_peaks::AudioPeakExtractor;
pub use detection::{Detection, DetectionExtractor, Detector};
pub use motion::{MotionExtractor, MotionMetric};
