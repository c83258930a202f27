use std::time::Duration;

use runecast::BattleConfig;

#[test]
fn defaults() {
    let c = BattleConfig::default();
    assert_eq!(c.canvas_width, 500.0);
    assert_eq!(c.canvas_height, 500.0);
    assert_eq!(c.jitter_px, 5.0);
    assert_eq!(c.player_max_hp, 500);
    assert_eq!(c.min_cast_points, 5);
    assert_eq!(c.preview_min_points, 8);
    assert_eq!(c.enemy_poll_interval(), Duration::from_secs(1));

    let timing = c.timing();
    assert_eq!(timing.enemy_attack_interval, Duration::from_secs(4));
    assert_eq!(timing.close_delay, Duration::from_secs(2));
}

#[test]
fn empty_json_is_default() {
    assert_eq!(BattleConfig::from_json("{}").expect("valid"), BattleConfig::default());
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let c = BattleConfig::from_json(r#"{ "player_max_hp": 300, "bridge": { "load_retries": 10 } }"#).expect("valid");
    assert_eq!(c.player_max_hp, 300);
    assert_eq!(c.bridge.load_retries, 10);
    assert_eq!(c.bridge.max_hands, 2);
    assert_eq!(c.close_delay_ms, 2000);
}

#[test]
fn wrong_types_are_rejected() {
    assert!(BattleConfig::from_json(r#"{ "player_max_hp": "lots" }"#).is_err());
}
