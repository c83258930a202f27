use std::time::Duration;

use serde::Deserialize;

use crate::combat::CombatTiming;
use crate::gesture::stroke::DEFAULT_JITTER_PX;
use crate::perception::BridgeConfig;

// ── BattleConfig ────────────────────────────────────────────────────────────

/// Tunables for one battle session.
///
/// Every field has a default, so a JSON document only needs to name the
/// values it overrides:
///
/// ```json
/// { "player_max_hp": 300, "bridge": { "load_retries": 10 } }
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Drawing canvas size in pixels. Landmarks are scaled to this.
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Minimum distance between consecutive stroke points.
    pub jitter_px: f32,
    /// The player's battle-local HP pool.
    pub player_max_hp: i32,
    /// A cast needs at least this many captured points.
    pub min_cast_points: usize,
    /// The live preview runs once more than this many points exist.
    pub preview_min_points: usize,
    pub enemy_attack_interval_ms: u64,
    /// How often the enemy checks whether it may act.
    pub enemy_poll_interval_ms: u64,
    /// Delay between the battle being decided and the session closing.
    pub close_delay_ms: u64,
    pub bridge: BridgeConfig,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            canvas_width:             500.0,
            canvas_height:            500.0,
            jitter_px:                DEFAULT_JITTER_PX,
            player_max_hp:            500,
            min_cast_points:          5,
            preview_min_points:       8,
            enemy_attack_interval_ms: 4000,
            enemy_poll_interval_ms:   1000,
            close_delay_ms:           2000,
            bridge:                   BridgeConfig::default(),
        }
    }
}

impl BattleConfig {
    /// Parse a (possibly partial) config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn timing(&self) -> CombatTiming {
        CombatTiming {
            enemy_attack_interval: Duration::from_millis(self.enemy_attack_interval_ms),
            close_delay: Duration::from_millis(self.close_delay_ms),
        }
    }

    pub fn enemy_poll_interval(&self) -> Duration {
        Duration::from_millis(self.enemy_poll_interval_ms)
    }
}
