use std::path::Path;

use crate::{
    error::{DecodeError, ExportError},
    media::DecodedMedia,
};

/// External media decoding collaborator
///
/// Implementations own container parsing and codec work. The engine calls
/// this exactly once per invocation; a failure here is fatal and aborts
/// before any extractor runs.
pub trait MediaDecoder: Send + Sync {
    /// Decode the file at `path` into frames and a mono waveform
    fn decode(&self, path: &Path) -> Result<DecodedMedia, DecodeError>;
}

/// External clip export collaborator
///
/// Handed each accepted segment when the caller requests physical export.
/// Producing the clip file (re-encode, remux, whatever) is entirely the
/// implementation's concern.
pub trait ClipExporter: Send + Sync {
    /// Materialize `[start, end]` of `source` as a standalone clip
    fn export_clip(&self, source: &Path, start: f64, end: f64) -> Result<(), ExportError>;
}
