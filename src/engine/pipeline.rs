use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    config::EngineConfig,
    engine::Deadline,
    error::{EngineError, Result},
    extract::{
        AudioFeatureExtractor, AudioPeakExtractor, DetectionExtractor, Detector, MotionExtractor,
    },
    media::{ClipExporter, DecodedMedia, MediaDecoder},
    scene,
    selection::{CandidateScorer, SegmentSelector, SelectionResult, SignalBundle},
    signal::{normalize, DetectionKind, SignalKind, TimeSeriesSignal},
};

/// Main smart-cut engine
///
/// The engine follows a clear pipeline:
/// 1. Signal Extraction - motion, detections, audio peaks and features, in parallel
/// 2. Normalization - continuous signals rescaled to [0, 1]
/// 3. Candidate Generation - scene boundaries, or the peak-derived fallback
/// 4. Scoring - weighted fusion of signals per candidate
/// 5. Selection - greedy, non-overlapping, capped, deterministic
///
/// Construction validates the configuration; an invalid combination is
/// rejected before any media is touched. Detector models are explicitly
/// owned handles supplied by the caller, never process-global state.
pub struct SmartCutEngine {
    config: EngineConfig,
    face_detector: Option<Arc<dyn Detector>>,
    object_detector: Option<Arc<dyn Detector>>,
}

impl SmartCutEngine {
    /// Create an engine with a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            face_detector: None,
            object_detector: None,
        })
    }

    /// Attach a face detection collaborator
    pub fn with_face_detector(mut self, detector: Arc<dyn Detector>) -> Self {
        self.face_detector = Some(detector);
        self
    }

    /// Attach an object detection collaborator
    pub fn with_object_detector(mut self, detector: Arc<dyn Detector>) -> Self {
        self.object_detector = Some(detector);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Decode a media file and select cuts from it
    ///
    /// The path is checked before the decoder is invoked; an unreadable file
    /// and a decode failure are both fatal and abort before any extractor
    /// runs.
    pub fn analyze_file(
        &self,
        path: &Path,
        decoder: &dyn MediaDecoder,
        deadline: Option<&Deadline>,
    ) -> Result<SelectionResult> {
        if !path.exists() {
            return Err(EngineError::Io {
                path: path.to_path_buf(),
            });
        }

        info!("🎬 decoding {:?}", path);
        let media = decoder.decode(path)?;
        self.select_cuts(&media, deadline)
    }

    /// Select cuts from already-decoded media
    ///
    /// This is the pure entry point: identical media and configuration always
    /// produce an identical result. All state lives on the stack of this
    /// call; nothing is shared across invocations.
    pub fn select_cuts(
        &self,
        media: &DecodedMedia,
        deadline: Option<&Deadline>,
    ) -> Result<SelectionResult> {
        info!(
            "🎞️ analyzing {:.1}s of media ({} frames @ {:.1} fps, {} audio samples)",
            media.duration,
            media.frames.len(),
            media.fps,
            media.samples.len()
        );

        let signals = self.extract_signals(media, deadline)?;
        let scorer = CandidateScorer::new(&self.config, &signals);
        let selector = SegmentSelector::new(&self.config);

        let mut candidates = Vec::new();
        if self.config.use_scene_detection {
            let detector = scene::detector_for(&self.config);
            let spans = detector.detect(media, deadline)?;
            debug!(
                detector = detector.name(),
                scenes = spans.len(),
                "scene candidates generated"
            );
            candidates = spans.iter().filter_map(|span| scorer.score(span)).collect();
        }

        if candidates.is_empty() {
            info!("🔊 no usable scene candidates, falling back to peak-derived segments");
            candidates = selector.fallback_candidates(&signals.audio_peaks, media.duration);
        }

        let result = selector.select(candidates);
        info!("✂️ selected {} cuts", result.len());
        for cut in &result.cuts {
            debug!(
                "   [{:.2}s - {:.2}s] score {:.3}",
                cut.start, cut.end, cut.raw_score
            );
        }
        Ok(result)
    }

    /// Hand each accepted segment to the export collaborator
    ///
    /// Materializing the clip files is entirely the collaborator's job; this
    /// just drives one call per cut.
    pub fn export_selection(
        &self,
        source: &Path,
        result: &SelectionResult,
        exporter: &dyn ClipExporter,
    ) -> Result<()> {
        for cut in &result.cuts {
            exporter.export_clip(source, cut.start, cut.end)?;
        }
        info!("📦 exported {} clips from {:?}", result.len(), source);
        Ok(())
    }

    /// Run every extractor over the shared decode pass
    ///
    /// Extractors are read-only over `media` and independent of each other,
    /// so they run as parallel tasks joined here before scoring. A timeout is
    /// fatal; any other extractor error degrades that one signal to empty.
    fn extract_signals(
        &self,
        media: &DecodedMedia,
        deadline: Option<&Deadline>,
    ) -> Result<SignalBundle> {
        let motion_extractor =
            MotionExtractor::new(self.config.motion_threshold, self.config.motion_metric);
        let peak_extractor = AudioPeakExtractor::new(self.config.audio_peak_threshold);
        let face_extractor = DetectionExtractor::new(
            DetectionKind::Face,
            self.face_detector.as_deref(),
            self.config.frame_sample_rate_face_object,
        );
        let object_extractor = DetectionExtractor::new(
            DetectionKind::Object,
            self.object_detector.as_deref(),
            self.config.frame_sample_rate_face_object,
        );

        let ((motion, peaks), (faces, (objects, features))) = rayon::join(
            || {
                rayon::join(
                    || motion_extractor.extract(media, deadline),
                    || peak_extractor.extract(media, deadline),
                )
            },
            || {
                rayon::join(
                    || face_extractor.extract(media, deadline),
                    || {
                        rayon::join(
                            || object_extractor.extract(media, deadline),
                            || {
                                if self.config.analyze_audio_advanced {
                                    AudioFeatureExtractor::new(self.config.features.clone())
                                        .extract(media, deadline)
                                        .map(Some)
                                } else {
                                    Ok(None)
                                }
                            },
                        )
                    },
                )
            },
        );

        let motion = absorb(motion, TimeSeriesSignal::empty(SignalKind::Motion), "motion")?;
        let bundle = SignalBundle {
            motion: Some(normalize(&motion)),
            faces: absorb(faces, Vec::new(), "faces")?,
            objects: absorb(objects, Vec::new(), "objects")?,
            audio_peaks: absorb(peaks, Vec::new(), "audio_peaks")?,
            features: absorb(features, None, "audio_features")?,
        };

        debug!(
            motion = bundle.motion.as_ref().map_or(0, |s| s.len()),
            faces = bundle.faces.len(),
            objects = bundle.objects.len(),
            audio_peaks = bundle.audio_peaks.len(),
            "extraction complete"
        );
        Ok(bundle)
    }
}

/// Absorb a recoverable extractor failure into an absent signal
fn absorb<T>(result: Result<T>, fallback: T, signal: &'static str) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.is_recoverable() => {
            warn!(signal, error = %e, "extractor failed, signal degraded to empty");
            Ok(fallback)
        }
        Err(e) => Err(e),
    }
}
