//! Cosmetic battle effects: floating damage numbers and short pulses.
//!
//! Nothing here feeds back into combat. The gameplay timers in
//! `combat::timer` are the only clocks that may change `CombatState`.

use std::time::{Duration, Instant};

use glam::Vec2;

use crate::combat::{CombatEvent, Side};

/// How long a floating marker stays on screen.
pub const MARKER_LIFETIME: Duration = Duration::from_millis(1000);

// ── Pulses ──────────────────────────────────────────────────────────────────

/// Visual pulse applied to a portrait on top of its resting position.
#[derive(Clone, Debug, PartialEq)]
pub enum PulseKind {
    /// Push toward the opponent and return: follows `sin(t * π)`.
    Lunge {
        /// Normalised direction vector (e.g. `[1.0, 0.0]` for right).
        direction: Vec2,
        /// Peak displacement in pixels.
        magnitude: f32,
    },
    /// Rapid jitter with a bell-shaped envelope.
    Shake {
        /// Peak jitter radius in pixels.
        magnitude: f32,
    },
}

impl PulseKind {
    /// Playback duration in seconds.
    pub fn duration(&self) -> f32 {
        match self {
            PulseKind::Lunge { .. } => 0.3,
            PulseKind::Shake { .. } => 0.4,
        }
    }
}

/// Pixel offset of a pulse at `elapsed` seconds. Pure, so it can be tested
/// without a clock.
pub fn compute_offset(kind: &PulseKind, elapsed: f32, duration: f32) -> Vec2 {
    use std::f32::consts::{PI, TAU};
    let progress = (elapsed / duration).clamp(0.0, 1.0);
    match kind {
        PulseKind::Lunge { direction, magnitude } => *direction * (*magnitude * (progress * PI).sin()),
        PulseKind::Shake { magnitude } => {
            let envelope = (progress * PI).sin();
            let jitter_x = (elapsed * 40.0 * TAU).sin();
            let jitter_y = (elapsed * 33.0 * TAU + 1.3).sin();
            Vec2::new(jitter_x, jitter_y) * (*magnitude * envelope)
        }
    }
}

struct ActivePulse {
    target: Side,
    kind: PulseKind,
    started: Instant,
}

// ── Floating markers ────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Damage,
    Heal,
    Message,
}

/// Where a marker is drawn; the presentation layer maps these to pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkerAnchor {
    Over(Side),
    Center,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloatingMarker {
    pub text: String,
    pub kind: MarkerKind,
    pub anchor: MarkerAnchor,
    pub spawned: Instant,
}

impl FloatingMarker {
    /// Fraction of the lifetime elapsed at `now`, in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f32 {
        let age = now.saturating_duration_since(self.spawned).as_secs_f32();
        (age / MARKER_LIFETIME.as_secs_f32()).clamp(0.0, 1.0)
    }
}

// ── FxState ─────────────────────────────────────────────────────────────────

/// All live cosmetic effects of one battle.
#[derive(Default)]
pub struct FxState {
    markers: Vec<FloatingMarker>,
    pulses: Vec<ActivePulse>,
}

impl FxState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_marker(&mut self, text: impl Into<String>, kind: MarkerKind, anchor: MarkerAnchor, now: Instant) {
        self.markers.push(FloatingMarker { text: text.into(), kind, anchor, spawned: now });
    }

    /// Start (or restart) a pulse on `target`.
    pub fn pulse(&mut self, target: Side, kind: PulseKind, now: Instant) {
        self.pulses.retain(|p| p.target != target);
        self.pulses.push(ActivePulse { target, kind, started: now });
    }

    /// Translate one combat event into markers and pulses.
    pub fn apply(&mut self, event: &CombatEvent, now: Instant) {
        match event {
            CombatEvent::Cast { side, .. } => {
                let direction = match side {
                    Side::Player => Vec2::X,
                    Side::Enemy => Vec2::NEG_X,
                };
                self.pulse(*side, PulseKind::Lunge { direction, magnitude: 20.0 }, now);
            }
            CombatEvent::Damaged { target, amount } => {
                self.push_marker(format!("-{amount}"), MarkerKind::Damage, MarkerAnchor::Over(*target), now);
                self.pulse(*target, PulseKind::Shake { magnitude: 10.0 }, now);
            }
            CombatEvent::Healed { target, amount } => {
                self.push_marker(format!("+{amount}"), MarkerKind::Heal, MarkerAnchor::Over(*target), now);
            }
            CombatEvent::Fizzled { side: Side::Player, .. } => {
                self.push_marker("Invalid spell", MarkerKind::Message, MarkerAnchor::Center, now);
            }
            CombatEvent::Fizzled { .. } | CombatEvent::Ended { .. } => {}
        }
    }

    /// Drop expired markers and pulses.
    pub fn tick(&mut self, now: Instant) {
        self.markers
            .retain(|m| now.saturating_duration_since(m.spawned) < MARKER_LIFETIME);
        self.pulses.retain(|p| {
            now.saturating_duration_since(p.started).as_secs_f32() < p.kind.duration()
        });
    }

    pub fn markers(&self) -> &[FloatingMarker] {
        &self.markers
    }

    /// Current pulse offset for a portrait, zero when idle.
    pub fn offset(&self, target: Side, now: Instant) -> Vec2 {
        self.pulses
            .iter()
            .find(|p| p.target == target)
            .map_or(Vec2::ZERO, |p| {
                let elapsed = now.saturating_duration_since(p.started).as_secs_f32();
                compute_offset(&p.kind, elapsed, p.kind.duration())
            })
    }

    /// True while `target` has a pulse playing.
    pub fn is_pulsing(&self, target: Side) -> bool {
        self.pulses.iter().any(|p| p.target == target)
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.pulses.clear();
    }
}
