use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::skill::{SkillCatalog, SkillKind};
use super::timer::Deadline;

/// Flat jitter ceiling for enemy damage. Player jitter scales with power.
const ENEMY_JITTER: i32 = 10;
/// Player jitter is up to `power / PLAYER_JITTER_DIVISOR` (20 %).
const PLAYER_JITTER_DIVISOR: i32 = 5;

// ── Sides and results ───────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// How a battle ended. Handed to the world through the end callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BattleResult {
    Win,
    Lose,
    Escape,
}

impl BattleResult {
    /// Log line shown once the battle is decided.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Win => "Victory!",
            Self::Lose => "You collapsed...",
            Self::Escape => "You slipped away from the fight.",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Active,
    /// Terminal. Entered once, never left.
    Over(BattleResult),
}

// ── State ───────────────────────────────────────────────────────────────────

/// A battle participant: battle-local copy of the world actor.
#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    pub name: String,
    pub max_hp: i32,
    pub skills: Vec<String>,
}

impl Combatant {
    pub fn new(name: impl Into<String>, max_hp: i32, skills: Vec<String>) -> Self {
        Self { name: name.into(), max_hp, skills }
    }

    pub fn knows(&self, skill_id: &str) -> bool {
        self.skills.iter().any(|s| s == skill_id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CombatState {
    pub player_hp: i32,
    pub player_max_hp: i32,
    pub enemy_hp: i32,
    pub enemy_max_hp: i32,
    pub phase: Phase,
    /// Enemy auto-attacks stay off until the player lands a first cast.
    pub has_player_acted_once: bool,
    pub last_enemy_action: Instant,
}

impl CombatState {
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over(_))
    }

    pub fn result(&self) -> Option<BattleResult> {
        match self.phase {
            Phase::Over(r) => Some(r),
            Phase::Active => None,
        }
    }

    pub fn hp(&self, side: Side) -> i32 {
        match side {
            Side::Player => self.player_hp,
            Side::Enemy => self.enemy_hp,
        }
    }

    fn pool_mut(&mut self, side: Side) -> (&mut i32, i32) {
        match side {
            Side::Player => (&mut self.player_hp, self.player_max_hp),
            Side::Enemy => (&mut self.enemy_hp, self.enemy_max_hp),
        }
    }
}

// ── Outcomes and events ─────────────────────────────────────────────────────

/// Why a cast produced no effect.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Fizzle {
    #[error("no valid spell")]
    NoGesture,
    #[error("unknown skill '{0}'")]
    UnknownSkill(String),
    #[error("{caster} does not know '{skill}'")]
    SkillNotKnown { caster: String, skill: String },
    #[error("the battle is already over")]
    BattleOver,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CastOutcome {
    Hit { caster: Side, skill: String, amount: i32, target_hp: i32 },
    Healed { caster: Side, skill: String, amount: i32, hp: i32 },
    Fizzled(Fizzle),
}

/// Things that happened inside the loop, for presentation and logging.
#[derive(Clone, Debug, PartialEq)]
pub enum CombatEvent {
    Cast { side: Side, skill_name: String },
    Damaged { target: Side, amount: i32 },
    Healed { target: Side, amount: i32 },
    Fizzled { side: Side, reason: Fizzle },
    Ended { result: BattleResult },
}

// ── Timing ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CombatTiming {
    /// The enemy acts only after strictly more than this since its last action.
    pub enemy_attack_interval: Duration,
    /// Delay between the battle being decided and the close callback.
    pub close_delay: Duration,
}

impl Default for CombatTiming {
    fn default() -> Self {
        Self {
            enemy_attack_interval: Duration::from_millis(4000),
            close_delay: Duration::from_millis(2000),
        }
    }
}

// ── CombatLoop ──────────────────────────────────────────────────────────────

/// Owns the battle state and is the only thing that mutates it.
pub struct CombatLoop<R = StdRng> {
    catalog: SkillCatalog,
    player: Combatant,
    enemy: Combatant,
    state: CombatState,
    timing: CombatTiming,
    rng: R,
    close: Deadline,
    events: Vec<CombatEvent>,
}

impl CombatLoop<StdRng> {
    pub fn new(catalog: SkillCatalog, player: Combatant, enemy: Combatant, timing: CombatTiming, now: Instant) -> Self {
        Self::with_rng(catalog, player, enemy, timing, StdRng::from_entropy(), now)
    }
}

impl<R: Rng> CombatLoop<R> {
    /// Start a battle at `now` with an explicit RNG for damage jitter and
    /// enemy skill choice.
    pub fn with_rng(
        catalog: SkillCatalog,
        player: Combatant,
        enemy: Combatant,
        timing: CombatTiming,
        rng: R,
        now: Instant,
    ) -> Self {
        let state = CombatState {
            player_hp: player.max_hp,
            player_max_hp: player.max_hp,
            enemy_hp: enemy.max_hp,
            enemy_max_hp: enemy.max_hp,
            phase: Phase::Active,
            has_player_acted_once: false,
            last_enemy_action: now,
        };
        log::info!("[battle] {} ({} HP) vs {} ({} HP)", player.name, player.max_hp, enemy.name, enemy.max_hp);
        Self {
            catalog,
            player,
            enemy,
            state,
            timing,
            rng,
            close: Deadline::default(),
            events: Vec::new(),
        }
    }
}

impl<R> CombatLoop<R> {
    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    /// Events emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }
}

impl<R: Rng> CombatLoop<R> {
    /// Resolve one cast by `side`. Invalid casts fizzle without touching state.
    pub fn resolve_cast(&mut self, side: Side, skill_id: &str, now: Instant) -> CastOutcome {
        match self.apply_cast(side, skill_id, now) {
            Ok(outcome) => outcome,
            Err(reason) => {
                log::debug!("[battle] {:?} cast '{}' fizzled: {}", side, skill_id, reason);
                self.events.push(CombatEvent::Fizzled { side, reason: reason.clone() });
                CastOutcome::Fizzled(reason)
            }
        }
    }

    fn apply_cast(&mut self, side: Side, skill_id: &str, now: Instant) -> Result<CastOutcome, Fizzle> {
        if self.state.is_over() {
            return Err(Fizzle::BattleOver);
        }
        let skill = self
            .catalog
            .get(skill_id)
            .ok_or_else(|| Fizzle::UnknownSkill(skill_id.to_string()))?;
        let caster = self.combatant(side);
        if !caster.knows(skill_id) {
            return Err(Fizzle::SkillNotKnown { caster: caster.name.clone(), skill: skill_id.to_string() });
        }

        let (kind, power, skill_name) = (skill.kind, skill.power, skill.name.clone());
        let amount = self.roll_amount(side, power);

        if side == Side::Player {
            self.state.has_player_acted_once = true;
        }
        self.events.push(CombatEvent::Cast { side, skill_name });

        if kind == SkillKind::Heal {
            let (hp, max) = self.state.pool_mut(side);
            *hp = hp.saturating_add(amount).clamp(0, max);
            let hp = *hp;
            self.events.push(CombatEvent::Healed { target: side, amount });
            return Ok(CastOutcome::Healed { caster: side, skill: skill_id.to_string(), amount, hp });
        }

        let target = side.opponent();
        let (hp, max) = self.state.pool_mut(target);
        *hp = hp.saturating_sub(amount).clamp(0, max);
        let target_hp = *hp;
        self.events.push(CombatEvent::Damaged { target, amount });

        if target_hp <= 0 {
            let result = match target {
                Side::Enemy => BattleResult::Win,
                Side::Player => BattleResult::Lose,
            };
            self.end(result, now);
        }

        Ok(CastOutcome::Hit { caster: side, skill: skill_id.to_string(), amount, target_hp })
    }

    /// Never negative, whatever the catalog says.
    fn roll_amount(&mut self, side: Side, power: i32) -> i32 {
        let power = power.max(0);
        let spread = match side {
            Side::Player => power / PLAYER_JITTER_DIVISOR,
            Side::Enemy => ENEMY_JITTER,
        };
        if spread > 0 { power.saturating_add(self.rng.gen_range(0..spread)) } else { power }
    }

    /// Enemy auto-attack check, meant to be polled on a fixed interval.
    ///
    /// Fires only while the battle is active, after the player's first
    /// successful cast, and once more than the attack interval has passed
    /// since the enemy last acted. The skill is drawn uniformly from the
    /// enemy's list.
    pub fn resolve_enemy_action(&mut self, now: Instant) -> Option<CastOutcome> {
        if self.state.is_over() || !self.state.has_player_acted_once {
            return None;
        }
        let idle = now.saturating_duration_since(self.state.last_enemy_action);
        if idle <= self.timing.enemy_attack_interval {
            return None;
        }
        let skill_id = self.enemy.skills.choose(&mut self.rng)?.clone();
        self.state.last_enemy_action = now;
        Some(self.resolve_cast(Side::Enemy, &skill_id, now))
    }
}

impl<R> CombatLoop<R> {
    /// Decide the battle. Returns `false` if it was already over.
    pub fn end(&mut self, result: BattleResult, now: Instant) -> bool {
        if self.state.is_over() {
            return false;
        }
        self.state.phase = Phase::Over(result);
        log::info!("[battle] {} vs {} ended: {:?}", self.player.name, self.enemy.name, result);
        self.events.push(CombatEvent::Ended { result });
        self.close.arm(now + self.timing.close_delay);
        true
    }

    /// The result, once the close delay after `end` has elapsed. Yields at
    /// most once.
    pub fn take_close(&mut self, now: Instant) -> Option<BattleResult> {
        if self.close.fire(now) { self.state.result() } else { None }
    }

    /// Drop any pending close notification.
    pub fn cancel_timers(&mut self) {
        self.close.cancel();
    }
}
