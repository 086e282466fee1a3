//! # Media Module
//!
//! Decoded-media types shared by every extractor, plus the collaborator
//! traits for the external decode and export steps. The engine never opens
//! containers or touches codecs itself; a [`MediaDecoder`] hands it frames
//! and a waveform, and a [`ClipExporter`] materializes chosen segments.

pub mod traits;
pub mod types;

pub use traits::{ClipExporter, MediaDecoder};
pub use types::{DecodedMedia, Frame};
