//! Battle resolution: skills, combat state and gameplay timers.

pub mod battle;
pub mod skill;
pub mod timer;

pub use battle::{
    BattleResult, CastOutcome, CombatEvent, CombatLoop, CombatState, CombatTiming, Combatant, Fizzle, Phase, Side,
};
pub use skill::{Skill, SkillCatalog, SkillKind, MAX_SKILL_POWER};
pub use timer::{Deadline, IntervalTimer};
