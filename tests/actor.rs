use runecast::actor::{Aftermath, Npc, PlayerProfile, WIN_EXP};
use runecast::combat::BattleResult;

#[test]
fn win_grants_experience() {
    let mut hero = PlayerProfile::default_hero();
    let before = hero.exp;
    let aftermath = hero.apply_battle_result(BattleResult::Win);
    assert_eq!(hero.exp, before + WIN_EXP);
    assert_eq!(aftermath, Aftermath::ExpGained { amount: 50, total: before + 50 });
}

#[test]
fn loss_restores_hp_and_respawns_at_home() {
    let mut hero = PlayerProfile::default_hero();
    assert!(hero.hp < hero.max_hp);
    let aftermath = hero.apply_battle_result(BattleResult::Lose);
    assert_eq!(hero.hp, hero.max_hp);
    assert_eq!(aftermath, Aftermath::Respawn { map: "HOUSE", x: 14, y: 7 });
}

#[test]
fn escape_changes_nothing() {
    let mut hero = PlayerProfile::default_hero();
    let before = hero.clone();
    assert_eq!(hero.apply_battle_result(BattleResult::Escape), Aftermath::Nothing);
    assert_eq!(hero, before);
}

#[test]
fn battle_pools_are_battle_local() {
    let hero = PlayerProfile::default_hero();
    let c = hero.combatant(500);
    assert_eq!(c.max_hp, 500);
    assert_eq!(c.skills, hero.skills);

    let elder = Npc::find(&Npc::roster(), "elder").cloned().expect("builtin npc");
    assert_eq!(elder.combatant().max_hp, 2500);
    assert!(elder.combatant().knows("veteran_strike"));
}

#[test]
fn roster_loads_from_json() {
    let json = r#"[{ "id": "slime", "name": "Slime", "maxHp": 40, "skills": ["veteran_strike"] }]"#;
    let roster = Npc::roster_from_json(json).expect("valid roster");
    assert_eq!(roster[0].max_hp, 40);
    assert!(Npc::find(&roster, "elder").is_none());
}
