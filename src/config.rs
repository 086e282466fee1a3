use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    extract::MotionMetric,
    scene::SceneAlgorithm,
};

/// Engine configuration, validated once at construction
///
/// All thresholds and weights that drive candidate generation, scoring and
/// selection live here. Invalid combinations are rejected before any media is
/// touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Use scene boundary detection for candidate segments
    pub use_scene_detection: bool,

    /// Minimum duration of a selected cut (seconds)
    pub min_cut_duration: f64,

    /// Maximum duration of a selected cut (seconds)
    pub max_cut_duration: f64,

    /// Content-discontinuity threshold for scene detection
    pub scene_threshold: f64,

    /// Per-pixel difference threshold for motion detection
    pub motion_threshold: f64,

    /// Loudness threshold for audio peak detection (dBFS, <= 0)
    pub audio_peak_threshold: f64,

    /// Maximum number of cuts to select
    pub max_num_cuts: usize,

    /// Score weight for face presence
    pub face_weight: f64,

    /// Score weight for object presence
    pub object_weight: f64,

    /// Score weight for audio peak presence
    pub audio_weight: f64,

    /// Score weight for motion intensity
    pub motion_weight: f64,

    /// Score weight for speech-like spectral content (advanced audio only)
    pub speech_weight: f64,

    /// Score weight for musical content (advanced audio only)
    pub music_weight: f64,

    /// Run the advanced audio feature extractor (spectral centroid, beats)
    pub analyze_audio_advanced: bool,

    /// Run face/object detection on every Nth frame
    pub frame_sample_rate_face_object: usize,

    /// Baseline score assigned to peak-derived fallback candidates
    pub fallback_score: f64,

    /// How motion intensity is reported per frame
    pub motion_metric: MotionMetric,

    /// Scene detection tuning
    pub scene: SceneTuning,

    /// Advanced audio feature tuning
    pub features: FeatureTuning,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            use_scene_detection: true,
            min_cut_duration: 1.0,
            max_cut_duration: 10.0,
            scene_threshold: 20.0,
            motion_threshold: 20.0,
            audio_peak_threshold: -20.0,
            max_num_cuts: 5,
            face_weight: 0.5,
            object_weight: 0.6,
            audio_weight: 0.4,
            motion_weight: 0.3,
            speech_weight: 0.3,
            music_weight: 0.2,
            analyze_audio_advanced: false,
            frame_sample_rate_face_object: 5,
            fallback_score: 0.6,
            motion_metric: MotionMetric::Fraction,
            scene: SceneTuning::default(),
            features: FeatureTuning::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: EngineConfig =
            toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
                path: path.display().to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path.as_ref(), content).map_err(|_| crate::error::EngineError::Io {
            path: path.as_ref().to_path_buf(),
        })?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_cut_duration <= 0.0 || self.max_cut_duration <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "cut_duration".to_string(),
                value: format!("{}-{}", self.min_cut_duration, self.max_cut_duration),
            }
            .into());
        }

        if self.min_cut_duration > self.max_cut_duration {
            return Err(ConfigError::InvalidValue {
                key: "cut_duration_range".to_string(),
                value: format!("{}-{}", self.min_cut_duration, self.max_cut_duration),
            }
            .into());
        }

        if self.audio_peak_threshold > 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "audio_peak_threshold".to_string(),
                value: self.audio_peak_threshold.to_string(),
            }
            .into());
        }

        if self.max_num_cuts < 1 {
            return Err(ConfigError::InvalidValue {
                key: "max_num_cuts".to_string(),
                value: self.max_num_cuts.to_string(),
            }
            .into());
        }

        if self.frame_sample_rate_face_object < 1 {
            return Err(ConfigError::InvalidValue {
                key: "frame_sample_rate_face_object".to_string(),
                value: self.frame_sample_rate_face_object.to_string(),
            }
            .into());
        }

        let weights = [
            ("face_weight", self.face_weight),
            ("object_weight", self.object_weight),
            ("audio_weight", self.audio_weight),
            ("motion_weight", self.motion_weight),
            ("speech_weight", self.speech_weight),
            ("music_weight", self.music_weight),
        ];
        for (key, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: weight.to_string(),
                }
                .into());
            }
        }

        self.scene.validate()?;
        self.features.validate()?;
        Ok(())
    }
}

/// Scene detection tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneTuning {
    /// Which boundary detection algorithm to run
    pub algorithm: SceneAlgorithm,

    /// Correlation below which the histogram detector declares a boundary
    pub histogram_similarity: f64,

    /// Minimum scene length for histogram debouncing (seconds)
    pub min_scene_length: f64,
}

impl Default for SceneTuning {
    fn default() -> Self {
        Self {
            algorithm: SceneAlgorithm::ContentDiscontinuity,
            histogram_similarity: 0.6,
            min_scene_length: 2.0,
        }
    }
}

impl SceneTuning {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.histogram_similarity) {
            return Err(ConfigError::InvalidValue {
                key: "scene.histogram_similarity".to_string(),
                value: self.histogram_similarity.to_string(),
            }
            .into());
        }

        if self.min_scene_length <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "scene.min_scene_length".to_string(),
                value: self.min_scene_length.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Advanced audio feature tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureTuning {
    /// Window size for FFT analysis
    pub window_size: usize,

    /// Hop size for analysis windows
    pub hop_size: usize,

    /// A time point is musical if within this tolerance of a beat (seconds)
    pub beat_tolerance: f64,

    /// Spectral centroid above this frequency counts as speech-like (Hz)
    pub speech_centroid_hz: f64,
}

impl Default for FeatureTuning {
    fn default() -> Self {
        Self {
            window_size: 1024,
            hop_size: 512,
            beat_tolerance: 0.2,
            speech_centroid_hz: 3000.0,
        }
    }
}

impl FeatureTuning {
    fn validate(&self) -> Result<()> {
        if self.window_size == 0 || !self.window_size.is_power_of_two() {
            return Err(ConfigError::InvalidValue {
                key: "features.window_size".to_string(),
                value: self.window_size.to_string(),
            }
            .into());
        }

        if self.hop_size == 0 || self.hop_size > self.window_size {
            return Err(ConfigError::InvalidValue {
                key: "features.hop_size".to_string(),
                value: self.hop_size.to_string(),
            }
            .into());
        }

        if self.beat_tolerance <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "features.beat_tolerance".to_string(),
                value: self.beat_tolerance.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
