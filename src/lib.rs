//! # Smartcut
//!
//! Automatic highlight selection for video: analyze one video's decoded
//! frames and audio, score candidate segments by fusing motion, detection,
//! and audio signals, and pick the best non-overlapping cuts.
//!
//! ## Architecture
//!
//! The crate is built around a clear pipeline:
//!
//! - **Media Layer**: one shared decode pass ([`media::DecodedMedia`]) plus
//!   the decoder/exporter collaborator traits
//! - **Signal Extraction**: motion, face/object presence, audio peaks, and
//!   optional spectral features, run as parallel tasks ([`extract`])
//! - **Scene Detection**: segments the timeline into candidate spans
//!   ([`scene`])
//! - **Scoring and Selection**: weighted signal fusion and greedy constrained
//!   selection ([`selection`])
//! - **Engine**: the orchestrating entry point ([`engine::SmartCutEngine`])
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use smartcut::{DecodedMedia, EngineConfig, SmartCutEngine};
//!
//! fn main() -> smartcut::Result<()> {
//!     let engine = SmartCutEngine::new(EngineConfig::default())?;
//!
//!     // Decoded elsewhere, for example by a MediaDecoder collaborator.
//!     let media = DecodedMedia {
//!         frames: vec![],
//!         fps: 30.0,
//!         samples: vec![0.0; 48_000 * 60],
//!         sample_rate: 48_000,
//!         duration: 60.0,
//!     };
//!
//!     let result = engine.select_cuts(&media, None)?;
//!     for (start, end) in result.ranges() {
//!         println!("cut: {start:.2}s - {end:.2}s");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod media;
pub mod scene;
pub mod selection;
pub mod signal;

pub use config::EngineConfig;
pub use engine::{Deadline, SmartCutEngine};
pub use error::{EngineError, Result};
pub use media::{ClipExporter, DecodedMedia, Frame, MediaDecoder};
pub use selection::{CandidateSegment, SelectionResult};
