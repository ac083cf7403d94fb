use std::path::Path;

use kong_climber::config::GameConfig;
use kong_climber::entities::{Direction, Point, Size};
use kong_climber::error::ConfigError;

#[test]
fn builtin_config_has_both_levels() {
    let config = GameConfig::builtin().expect("builtin config parses");
    assert_eq!(config.levels.len(), 2);
    assert_eq!(config.screen.width, 1024.0);
    assert_eq!(config.timing.max_frames, 10_800);
    assert_eq!(config.banana_interval_frames(), 300);

    let two = config.level(2).expect("level 2");
    assert_eq!(two.normal_monkeys[0].facing, Direction::Right);
    assert_eq!(two.normal_monkeys[0].route, vec![100.0, 150.0]);
    assert_eq!(two.player, Point::new(60.0, 718.0));
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let config = GameConfig::from_json_str(r#"{ "sprites": { "barrel": { "width": 20.0, "height": 20.0 } } }"#)
        .expect("partial config");
    assert!(config.levels.is_empty());
    assert_eq!(config.sprites.barrel, Size::new(20.0, 20.0));
    assert_eq!(config.sprites.player, Size::new(32.0, 40.0));
    assert_eq!(config.tuning.player.max_jump_height, 62.5);
    assert_eq!(config.scoring.barrel_jump, 30);
    assert_eq!(config.tuning, GameConfig::default().tuning);
}

#[test]
fn unknown_level_is_an_error() {
    let config = GameConfig::builtin().expect("builtin config parses");
    assert!(matches!(config.level(3), Err(ConfigError::UnknownLevel(3))));
}

#[test]
fn parse_errors_name_the_offending_field() {
    let err = GameConfig::from_json_str(r#"{ "timing": { "max_frames": "lots" } }"#).unwrap_err();
    match err {
        ConfigError::Parse { path, .. } => assert_eq!(path, "timing.max_frames"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_monkey_route_is_rejected() {
    let raw = r#"{
        "levels": {
            "1": {
                "player": { "x": 10.0, "y": 10.0 },
                "donkey": { "x": 90.0, "y": 10.0 },
                "normal_monkeys": [
                    { "position": { "x": 50.0, "y": 10.0 }, "facing": "left", "route": [] }
                ]
            }
        }
    }"#;
    let err = GameConfig::from_json_str(raw).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyRoute { level: 1, index: 0 }));
}

#[test]
fn negative_route_segment_is_rejected() {
    let raw = r#"{
        "levels": {
            "2": {
                "player": { "x": 10.0, "y": 10.0 },
                "donkey": { "x": 90.0, "y": 10.0 },
                "intelligent_monkeys": [
                    { "position": { "x": 50.0, "y": 10.0 }, "facing": "right", "route": [40.0, -5.0] }
                ]
            }
        }
    }"#;
    let err = GameConfig::from_json_str(raw).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidRouteSegment { level: 2, index: 0, .. }
    ));
}

#[test]
fn non_positive_screen_is_rejected() {
    let err = GameConfig::from_json_str(r#"{ "screen": { "width": 0.0 } }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NonPositive { field: "screen.width", .. }
    ));
    assert_eq!(err.to_string(), "screen.width must be positive, got 0");
}

fn tuning_error(tuning: &str) -> ConfigError {
    GameConfig::from_json_str(&format!(r#"{{ "tuning": {tuning} }}"#)).unwrap_err()
}

#[test]
fn empty_blaster_is_rejected() {
    let err = tuning_error(r#"{ "blaster_bullets": 0 }"#);
    assert!(matches!(
        err,
        ConfigError::NonPositive { field: "tuning.blaster_bullets", .. }
    ));
}

#[test]
fn zero_counts_and_speeds_are_rejected() {
    let cases = [
        (r#"{ "banana_interval_seconds": 0 }"#, "tuning.banana_interval_seconds"),
        (r#"{ "donkey_health": 0 }"#, "tuning.donkey_health"),
        (r#"{ "bullet_damage": -1 }"#, "tuning.bullet_damage"),
        (r#"{ "bullet": { "speed": 0.0 } }"#, "tuning.bullet.speed"),
        (r#"{ "banana": { "max_range": 0.0 } }"#, "tuning.banana.max_range"),
        (r#"{ "player": { "gravity": 0.0 } }"#, "tuning.player.gravity"),
    ];
    for (tuning, expected) in cases {
        match tuning_error(tuning) {
            ConfigError::NonPositive { field, .. } => assert_eq!(field, expected),
            other => panic!("unexpected error for {tuning}: {other}"),
        }
    }
}

#[test]
fn downward_jump_is_rejected() {
    let err = tuning_error(r#"{ "player": { "jump_velocity": 5.0 } }"#);
    assert!(matches!(
        err,
        ConfigError::NotUpward { field: "tuning.player.jump_velocity", .. }
    ));
    assert_eq!(
        err.to_string(),
        "tuning.player.jump_velocity must be negative (upwards), got 5"
    );
}

#[test]
fn missing_file_reports_its_path() {
    let err = GameConfig::load(Path::new("/nonexistent/kong_climber.json")).unwrap_err();
    match err {
        ConfigError::Io { path, .. } => assert_eq!(path, Path::new("/nonexistent/kong_climber.json")),
        other => panic!("unexpected error: {other}"),
    }
}
