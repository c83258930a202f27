use serde::{Deserialize, Deserializer, Serialize};

use crate::gesture::GestureId;

/// Largest `power` a catalog may declare.
pub const MAX_SKILL_POWER: i32 = 100_000;

/// How a skill's power is applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillKind {
    Physical,
    Magic,
    /// Restores the caster's own pool instead of hitting the opponent.
    Heal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub kind: SkillKind,
    #[serde(deserialize_with = "bounded_power")]
    pub power: i32,
    #[serde(default)]
    pub description: String,
    /// Rune that casts this skill; `None` for skills only NPCs use.
    #[serde(default, rename = "gestureId")]
    pub gesture: Option<GestureId>,
}

fn bounded_power<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    use serde::de::Error;
    let power = i32::deserialize(deserializer)?;
    if !(0..=MAX_SKILL_POWER).contains(&power) {
        return Err(D::Error::custom(format!("skill power {power} outside 0..={MAX_SKILL_POWER}")));
    }
    Ok(power)
}

impl Skill {
    fn builtin(id: &str, name: &str, kind: SkillKind, power: i32, description: &str, gesture: Option<GestureId>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            power,
            description: description.to_string(),
            gesture,
        }
    }
}

/// Static skill table. Lookup order is declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillCatalog {
    skills: Vec<Skill>,
}

impl SkillCatalog {
    pub fn new(skills: Vec<Skill>) -> Self {
        Self { skills }
    }

    /// The game's stock skills.
    pub fn builtin() -> Self {
        use SkillKind::*;
        Self::new(vec![
            Skill::builtin("slash", "Sweeping Slash", Physical, 90, "A quick horizontal cut.", Some(GestureId::Line)),
            Skill::builtin("braver", "Gravity Slash", Physical, 280, "A crushing V-shaped blow.", Some(GestureId::VShape)),
            Skill::builtin("fireball", "Burst Shell", Magic, 200, "Summons a triangular fireball.", Some(GestureId::Triangle)),
            Skill::builtin("heal", "Healing Cross", Heal, 150, "Channels life energy through a drawn cross.", Some(GestureId::Circle)),
            Skill::builtin("veteran_strike", "Veteran Swordplay", Physical, 45, "A seasoned heavy strike.", None),
        ])
    }

    /// Deserialise a catalog from a JSON array of skills.
    ///
    /// Returns a `serde_json::Error` if the input is malformed, is missing
    /// required fields, or declares a `power` outside `0..=MAX_SKILL_POWER`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let skills: Vec<Skill> = serde_json::from_str(json)?;
        Ok(Self::new(skills))
    }

    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == id)
    }

    /// First skill bound to `gesture` that appears in `known`.
    pub fn castable_for(&self, gesture: GestureId, known: &[String]) -> Option<&Skill> {
        self.skills
            .iter()
            .find(|s| s.gesture == Some(gesture) && known.iter().any(|k| *k == s.id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
