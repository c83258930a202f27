//! Plumbing around the external hand detector.
//!
//! The detector itself lives outside this crate. It is reached through two
//! traits: [`BridgeLoader`] produces a [`PerceptionBridge`] once the model is
//! available, and the bridge answers one frame at a time through a
//! [`ResultSender`] into the session's [`Mailbox`].

pub mod frame;
pub mod mailbox;

pub use frame::{CameraFeed, PerceptionFrame, VideoFrame};
pub use mailbox::{Mailbox, ResultSender};

use std::time::{Duration, Instant};

use serde::Deserialize;
use thiserror::Error;

// ── BridgeConfig ────────────────────────────────────────────────────────────

/// Detector options plus the loader's retry budget.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub max_hands: u32,
    pub model_complexity: u32,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
    /// Load attempts before giving up with [`PerceptionStatus::Error`].
    pub load_retries: u32,
    pub load_retry_interval_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_hands:                2,
            model_complexity:         1,
            min_detection_confidence: 0.6,
            min_tracking_confidence:  0.6,
            load_retries:             30,
            load_retry_interval_ms:   200,
        }
    }
}

impl BridgeConfig {
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.load_retry_interval_ms)
    }
}

// ── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PerceptionError {
    #[error("hand detector still unavailable after {attempts} attempts")]
    Unavailable { attempts: u32 },
    #[error("hand detector failed to initialise: {0}")]
    Init(String),
    #[error("hand detector rejected a frame: {0}")]
    Send(String),
}

// ── Traits ──────────────────────────────────────────────────────────────────

/// A running hand detector.
pub trait PerceptionBridge {
    /// Submit one frame. The answer arrives later through `reply`; dropping
    /// it unanswered frees the request slot for the next frame.
    fn send(&mut self, frame: &VideoFrame, reply: ResultSender) -> Result<(), PerceptionError>;

    /// Release the detector. Called once when the battle closes.
    fn close(&mut self) {}
}

/// Produces a bridge once the detector is available.
pub trait BridgeLoader {
    /// `Ok(None)` means "not yet, try again later"; `Err` is a hard failure.
    fn load(&mut self, config: &BridgeConfig) -> Result<Option<Box<dyn PerceptionBridge>>, PerceptionError>;
}

// ── Status ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PerceptionStatus {
    Loading,
    Ready,
    /// Camera frames are flowing into the detector.
    Tracking,
    /// Loading gave up. Casting is disabled but the battle keeps running.
    Error,
}

impl PerceptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "LOADING",
            Self::Ready => "READY",
            Self::Tracking => "TRACKING",
            Self::Error => "ERROR",
        }
    }
}

// ── Loader retries ──────────────────────────────────────────────────────────

/// Non-blocking retry loop around a [`BridgeLoader`]: at most one attempt per
/// retry interval, polled from the frame loop.
pub(crate) struct LoadRetry {
    attempts: u32,
    next_attempt: Instant,
}

pub(crate) enum LoadStep {
    Waiting,
    Loaded(Box<dyn PerceptionBridge>),
    Failed(PerceptionError),
}

impl LoadRetry {
    pub(crate) fn new(now: Instant) -> Self {
        Self { attempts: 0, next_attempt: now }
    }

    #[cfg(test)]
    pub(crate) fn attempts(&self) -> u32 {
        self.attempts
    }

    pub(crate) fn poll(&mut self, loader: &mut dyn BridgeLoader, config: &BridgeConfig, now: Instant) -> LoadStep {
        if now < self.next_attempt {
            return LoadStep::Waiting;
        }
        self.attempts += 1;
        match loader.load(config) {
            Ok(Some(bridge)) => {
                log::info!("[perception] detector ready after {} attempt(s)", self.attempts);
                LoadStep::Loaded(bridge)
            }
            Ok(None) if self.attempts >= config.load_retries => {
                LoadStep::Failed(PerceptionError::Unavailable { attempts: self.attempts })
            }
            Ok(None) => {
                self.next_attempt = now + config.retry_interval();
                LoadStep::Waiting
            }
            Err(e) => LoadStep::Failed(e),
        }
    }
}
