//! World-side actor records and what a battle result does to them.

use serde::{Deserialize, Serialize};

use crate::combat::{BattleResult, Combatant};

/// Experience granted for a won battle.
pub const WIN_EXP: u32 = 50;
/// Map and tile the player wakes up on after losing.
pub const RESPAWN_MAP: &str = "HOUSE";
pub const RESPAWN_TILE: (i32, i32) = (14, 7);

// ── PlayerProfile ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub exp: u32,
    pub skills: Vec<String>,
}

/// What the world should do after a battle, beyond the stat changes already
/// applied to the profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Aftermath {
    Nothing,
    ExpGained { amount: u32, total: u32 },
    Respawn { map: &'static str, x: i32, y: i32 },
}

impl PlayerProfile {
    /// The starting hero.
    pub fn default_hero() -> Self {
        Self {
            name: "Hero".to_string(),
            level: 5,
            hp: 120,
            max_hp: 150,
            exp: 25,
            skills: ["slash", "fireball", "heal", "braver"].map(String::from).to_vec(),
        }
    }

    /// Battle-local copy with a fixed HP pool. The profile's own HP is not
    /// used inside a battle.
    pub fn combatant(&self, battle_hp: i32) -> Combatant {
        Combatant::new(self.name.clone(), battle_hp, self.skills.clone())
    }

    pub fn apply_battle_result(&mut self, result: BattleResult) -> Aftermath {
        match result {
            BattleResult::Win => {
                self.exp += WIN_EXP;
                Aftermath::ExpGained { amount: WIN_EXP, total: self.exp }
            }
            BattleResult::Lose => {
                self.hp = self.max_hp;
                let (x, y) = RESPAWN_TILE;
                Aftermath::Respawn { map: RESPAWN_MAP, x, y }
            }
            BattleResult::Escape => Aftermath::Nothing,
        }
    }
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self::default_hero()
    }
}

// ── Npc ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub id: String,
    pub name: String,
    #[serde(rename = "maxHp")]
    pub max_hp: i32,
    pub skills: Vec<String>,
}

impl Npc {
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_hp: i32, skills: &[&str]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            max_hp,
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The built-in characters.
    pub fn roster() -> Vec<Npc> {
        vec![
            Npc::new("elder", "Mr. Zhang", 2500, &["veteran_strike"]),
            Npc::new("friend", "Kobayashi", 500, &["heal"]),
        ]
    }

    /// Parse a roster from a JSON array of NPC records.
    pub fn roster_from_json(json: &str) -> Result<Vec<Npc>, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn find<'a>(roster: &'a [Npc], id: &str) -> Option<&'a Npc> {
        roster.iter().find(|n| n.id == id)
    }

    /// Battle-local copy starting at full HP. The record itself is untouched.
    pub fn combatant(&self) -> Combatant {
        Combatant::new(self.name.clone(), self.max_hp, self.skills.clone())
    }
}
