//! # Smart Cut Engine
//!
//! The orchestrating pipeline: run every extractor over one shared decode
//! pass, normalize the continuous signals, generate candidate segments from
//! scene boundaries (or the peak-derived fallback), score them, and select
//! the final non-overlapping cut list.
//!
//! The engine is a synchronous, deterministic function over one video's
//! derived signals. It holds no mutable global state; detector models are
//! explicitly owned handles passed in at construction.

pub mod deadline;
pub mod pipeline;

pub use deadline::Deadline;
pub use pipeline::SmartCutEngine;
