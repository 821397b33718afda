use rail_shooter::compute::init_state;
use rail_shooter::config::Rules;
use rail_shooter::entities::*;

#[test]
fn phase_enum_eq() {
    assert_eq!(GamePhase::Title, GamePhase::Title);
    assert_ne!(GamePhase::Playing, GamePhase::GameOver);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(Rules::default());
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.ship.pos = Vec2::new(0.9, 0.1);
    cloned.frame = 999;
    cloned.shipwreck = Some(3);
    cloned.enemies.push(Enemy {
        start_frame: 0,
        pos: Vec2::new(1.0, 0.0),
        vel: Vec2::new(-0.005, 0.0),
    });
    cloned.blue_shots.push(Shot { pos: Vec2::default(), vel: Vec2::new(0.05, 0.0) });

    assert_eq!(original.ship.pos, Vec2::default());
    assert_eq!(original.frame, 0);
    assert!(original.shipwreck.is_none());
    assert!(original.enemies.is_empty());
    assert!(original.blue_shots.is_empty());
}
