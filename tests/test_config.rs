use std::io::Write;
use std::path::PathBuf;

use rail_shooter::config::{Rules, Settings, CONFIG_ENV};
use rail_shooter::error::GameError;

#[test]
fn empty_file_gives_defaults() {
    let settings = Settings::parse("").unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.fps, 60);
    assert_eq!(settings.asset_dir, PathBuf::from("res"));
    assert!(settings.log_file.is_none());
}

#[test]
fn defaults_match_the_stock_game() {
    let rules = Rules::default();
    assert_eq!(rules.title_frames, 120);
    assert_eq!(rules.fadeout_frames, 60);
    assert_eq!(rules.spawn_interval, 60);
    assert_eq!(rules.enemy_fire_interval, 40);
    assert_eq!(rules.ship_fire_interval, 5);
    assert_eq!(rules.explosion_lifetime(), 12);
}

#[test]
fn partial_rules_keep_other_defaults() {
    let settings = Settings::parse(
        r#"
        fps = 30
        asset_dir = "assets"
        log_file = "game.log"

        [rules]
        title_frames = 0
        blue_shot_speed = 0.1
        "#,
    )
    .unwrap();

    assert_eq!(settings.fps, 30);
    assert_eq!(settings.asset_dir, PathBuf::from("assets"));
    assert_eq!(settings.log_file, Some(PathBuf::from("game.log")));
    assert_eq!(settings.rules.title_frames, 0);
    assert_eq!(settings.rules.blue_shot_speed, 0.1);
    assert_eq!(settings.rules.fadeout_frames, 60);
}

#[test]
fn invalid_values_are_rejected() {
    for toml in [
        "fps = 0",
        "[rules]\nspawn_interval = 0",
        "[rules]\nexplosion_stage_len = 0",
        "[rules]\nenemy_speed_min = 0.01\nenemy_speed_max = 0.001",
        "[rules]\nenemy_speed_min = nan",
        "[rules]\nenemy_speed_max = inf",
        "[rules]\nred_shot_speed = -inf",
        "[rules]\nfiring_alignment = -0.1",
        "[rules]\nship_hit_radius_sq = -0.001",
        "[rules]\nblue_shot_speed = -0.05",
        "[rules]\nenemy_speed_min = -0.006\nenemy_speed_max = -0.004",
        "[rules]\nexplosion_stages = 0",
        "[rules]\nexplosion_stages = 4",
        "fps = \"fast\"",
        "this is not toml",
    ] {
        match Settings::parse(toml) {
            Err(GameError::Config(_)) => {}
            other => panic!("{toml:?} gave {other:?}"),
        }
    }
}

#[test]
fn explosion_stages_up_to_the_boom_frames_are_accepted() {
    for stages in 1..=3 {
        let settings = Settings::parse(&format!("[rules]\nexplosion_stages = {stages}")).unwrap();
        assert_eq!(settings.rules.explosion_stages, stages);
    }
}

#[test]
fn load_reads_file_and_env_var() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "fps = 50").unwrap();

    let settings = Settings::load(file.path()).unwrap();
    assert_eq!(settings.fps, 50);

    std::env::set_var(CONFIG_ENV, file.path());
    let from_env = Settings::from_env();
    std::env::remove_var(CONFIG_ENV);
    assert_eq!(from_env.unwrap().fps, 50);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    match Settings::load(&dir.path().join("absent.toml")) {
        Err(GameError::Io(_)) => {}
        other => panic!("unexpected {other:?}"),
    }
}
