use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::{FaceAnchors, SamplerConfig, SmootherConfig};
use crate::modules::classifier::{classify, Mood};
use crate::modules::feature_extractor::FeatureExtractor;
use crate::modules::smoother::SignalSmoother;
use crate::utils::coordinate::LandmarkSet;

const STATS_LOG_INTERVAL: u64 = 50;

/// One frame from the video source. The sampling loop only reads the
/// timestamp; pixel layout is a contract between source and detector.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub timestamp_ms: u64,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Capability contract for the injected face-landmark detector.
///
/// Returns zero or more landmark sets for the frame; only the first set is
/// consumed. How the detector instance was obtained is not the pipeline's
/// concern.
pub trait LandmarkDetector {
    fn detect(
        &mut self,
        frame: &VideoFrame,
        timestamp_ms: u64,
    ) -> impl Future<Output = Result<Vec<LandmarkSet>>> + Send;
}

/// Health of the published estimate, so a UI can tell an absent face apart
/// from a failing detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Tracking,
    NoFace,
    DetectorUnavailable,
}

/// The published snapshot, replaced atomically as a whole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodEstimate {
    pub mood: Mood,
    pub confidence: f32,
    /// Human-readable summary of the smoothed features, diagnostics only.
    pub debug: String,
    pub status: PipelineStatus,
}

impl MoodEstimate {
    pub(crate) fn unknown() -> Self {
        MoodEstimate {
            mood: Mood::Unknown,
            confidence: 0.0,
            debug: "no face".to_string(),
            status: PipelineStatus::NoFace,
        }
    }
}

/// Sequential per-frame stages: detect, extract, smooth, classify.
struct PipelineCore<D> {
    detector: D,
    extractor: FeatureExtractor,
    smoother: SignalSmoother,
    frames_processed: u64,
    frames_with_face: u64,
}

impl<D: LandmarkDetector> PipelineCore<D> {
    fn new(detector: D, anchors: FaceAnchors, smoother: SmootherConfig) -> Self {
        PipelineCore {
            detector,
            extractor: FeatureExtractor::new(anchors),
            smoother: SignalSmoother::new(smoother),
            frames_processed: 0,
            frames_with_face: 0,
        }
    }

    fn reset_session(&mut self) {
        self.smoother.reset();
        self.frames_processed = 0;
        self.frames_with_face = 0;
    }

    /// process runs one frame through the full pipeline.
    ///
    /// No face yields the `unknown` estimate and leaves the smoother alone.
    /// Detector failures and malformed landmark sets surface as errors for
    /// the loop to log and skip.
    async fn process(&mut self, frame: &VideoFrame) -> Result<MoodEstimate> {
        let sets = self.detector.detect(frame, frame.timestamp_ms).await?;
        self.frames_processed += 1;
        if self.frames_processed % STATS_LOG_INTERVAL == 0 {
            debug!(
                processed = self.frames_processed,
                with_face = self.frames_with_face,
                "sampling statistics"
            );
        }

        let Some(landmarks) = sets.first() else {
            return Ok(MoodEstimate::unknown());
        };
        self.frames_with_face += 1;

        let features = self.extractor.extract(landmarks)?;
        let signals = self.smoother.update(&features);
        let (mood, confidence) = classify(
            signals.smile_score,
            signals.eye_open_score,
            features.mouth_open_ratio,
        );
        let debug = format!(
            "smile={:.2} eye={:.2} mouthW={:.2} mouthO={:.2}",
            signals.smile_score,
            signals.eye_open_score,
            features.mouth_width_ratio,
            features.mouth_open_ratio
        );

        Ok(MoodEstimate {
            mood,
            confidence,
            debug,
            status: PipelineStatus::Tracking,
        })
    }
}

/// Drives the pipeline at a fixed cadence until stopped.
///
/// Frames arrive through a latest-value slot; a frame is processed when its
/// timestamp is new and at least the configured interval past the last
/// processed one. Detection is single-flight: the loop awaits each call
/// before scheduling another.
async fn run_loop<D: LandmarkDetector>(
    core: Arc<Mutex<PipelineCore<D>>>,
    frames: watch::Receiver<Option<Arc<VideoFrame>>>,
    estimates: Arc<watch::Sender<MoodEstimate>>,
    mut stop: watch::Receiver<bool>,
    sampler: SamplerConfig,
) {
    let mut tick = time::interval(Duration::from_millis(sampler.tick_interval_ms));
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_ts: Option<u64> = None;

    loop {
        tokio::select! {
            changed = stop.changed() => {
                match changed {
                    Ok(()) if *stop.borrow() => break,
                    Ok(()) => continue,
                    Err(_) => break,
                }
            }
            _ = tick.tick() => {}
        }

        let Some(frame) = frames.borrow().clone() else {
            continue;
        };
        let frame_ts = frame.timestamp_ms;
        if let Some(last) = last_ts {
            if frame_ts <= last || frame_ts - last < sampler.min_process_interval_ms {
                continue;
            }
        }
        last_ts = Some(frame_ts);

        let outcome = {
            let mut core = core.lock().await;
            match sampler.detect_timeout_ms {
                Some(ms) => {
                    match time::timeout(Duration::from_millis(ms), core.process(&frame)).await {
                        Ok(result) => result,
                        Err(_) => {
                            warn!(
                                timestamp_ms = frame_ts,
                                "detector call timed out, treating frame as no face"
                            );
                            Ok(MoodEstimate::unknown())
                        }
                    }
                }
                None => core.process(&frame).await,
            }
        };

        // A detection that finished after the stop signal is discarded.
        if *stop.borrow() {
            break;
        }

        match outcome {
            Ok(estimate) => {
                estimates.send_replace(estimate);
            }
            Err(err) => {
                warn!(
                    error = %err,
                    timestamp_ms = frame_ts,
                    "detection failed, keeping previous estimate"
                );
                let mut prior = estimates.borrow().clone();
                prior.status = PipelineStatus::DetectorUnavailable;
                estimates.send_replace(prior);
            }
        }
    }
    info!("mood sampling loop stopped");
}

/// Session handle around the sampling loop.
///
/// Single writer of the published estimate; any number of readers subscribe
/// and observe atomically replaced snapshots at their own cadence.
pub struct MoodScanner<D> {
    core: Arc<Mutex<PipelineCore<D>>>,
    sampler: SamplerConfig,
    estimates: Arc<watch::Sender<MoodEstimate>>,
    stop: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl<D: LandmarkDetector + Send + 'static> MoodScanner<D> {
    pub fn new(
        detector: D,
        anchors: FaceAnchors,
        smoother: SmootherConfig,
        sampler: SamplerConfig,
    ) -> Self {
        let (estimates, _) = watch::channel(MoodEstimate::unknown());
        MoodScanner {
            core: Arc::new(Mutex::new(PipelineCore::new(detector, anchors, smoother))),
            sampler,
            estimates: Arc::new(estimates),
            stop: None,
            task: None,
        }
    }

    /// start begins sampling from the given frame slot.
    ///
    /// Idempotent while a loop is running. Starting a new session resets the
    /// smoother so signals never blend across input sources.
    pub async fn start(&mut self, frames: watch::Receiver<Option<Arc<VideoFrame>>>) {
        if self.is_running() {
            return;
        }
        self.core.lock().await.reset_session();

        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(run_loop(
            self.core.clone(),
            frames,
            self.estimates.clone(),
            stop_rx,
            self.sampler.clone(),
        ));
        self.stop = Some(stop_tx);
        self.task = Some(task);
        info!("mood sampling loop started");
    }

    /// stop halts scheduling; the last published estimate stays in place.
    /// An in-flight detection may complete but its result is discarded.
    pub fn stop(&self) {
        if let Some(stop) = &self.stop {
            let _ = stop.send(true);
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Readers observe the published estimate through this receiver.
    pub fn subscribe(&self) -> watch::Receiver<MoodEstimate> {
        self.estimates.subscribe()
    }

    /// Clone of the currently published estimate.
    pub fn current(&self) -> MoodEstimate {
        self.estimates.borrow().clone()
    }
}
