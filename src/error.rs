use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the smartcut engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("media file unreadable: {path}")]
    Io { path: PathBuf },

    #[error("media decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("extractor failure: {0}")]
    Extractor(#[from] ExtractorError),

    #[error("deadline exceeded during {phase}")]
    Timeout { phase: &'static str },

    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

/// Fatal decode errors reported by the media decoding collaborator
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("unsupported codec: {codec}")]
    UnsupportedCodec { codec: String },

    #[error("corrupt media: {reason}")]
    CorruptMedia { reason: String },

    #[error("decoder unavailable: {reason}")]
    DecoderUnavailable { reason: String },
}

/// Configuration errors, rejected at engine construction
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },
}

/// Per-signal extractor failures
///
/// These are recoverable at the pipeline level: the signal degrades to empty
/// and scoring proceeds with whatever remains.
#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("detector unavailable: {name}")]
    DetectorUnavailable { name: String },

    #[error("detector failed on frame {frame_index}: {reason}")]
    DetectorFailed { frame_index: usize, reason: String },

    #[error("audio analysis failed: {reason}")]
    AudioAnalysisFailed { reason: String },
}

/// Errors from the external clip export collaborator
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write clip {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("encoder rejected segment [{start:.2}, {end:.2}]: {reason}")]
    EncodeFailed { start: f64, end: f64, reason: String },
}

/// Convenience type alias for Results using EngineError
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Check if this error is recoverable at the pipeline level
    ///
    /// Recoverable errors degrade one signal to empty; everything else aborts
    /// the run before a `SelectionResult` is produced.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Extractor(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extractor_errors_are_recoverable() {
        let err = EngineError::from(ExtractorError::DetectorUnavailable {
            name: "face".to_string(),
        });
        assert!(err.is_recoverable());
    }

    #[test]
    fn fatal_errors_are_not_recoverable() {
        let io = EngineError::Io {
            path: PathBuf::from("/missing.mp4"),
        };
        assert!(!io.is_recoverable());

        let timeout = EngineError::Timeout { phase: "motion" };
        assert!(!timeout.is_recoverable());

        let decode = EngineError::from(DecodeError::UnsupportedCodec {
            codec: "av99".to_string(),
        });
        assert!(!decode.is_recoverable());
    }
}
