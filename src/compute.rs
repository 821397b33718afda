/// Pure game-logic functions.
///
/// The public update functions take an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and return a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and logging.

use log::{debug, info};
use rand::Rng;

use crate::config::Rules;
use crate::entities::{Enemy, Explosion, GamePhase, GameState, Ship, Shot, Vec2};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the state of a fresh program: clock at zero, no entities, title
/// still to be shown.
pub fn init_state(rules: Rules) -> GameState {
    GameState {
        ship: Ship::default(),
        explosions: Vec::new(),
        enemies: Vec::new(),
        red_shots: Vec::new(),
        blue_shots: Vec::new(),
        frame: 0,
        shipwreck: None,
        first_run: true,
        rules,
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Map a pointer position in surface pixels to world coordinates.
///
/// x covers [0, 1] across the surface; y is centred and uses the same scale
/// as x, so it spans ±height/(2·width).
pub fn pointer_to_world(px: f32, py: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(px / width, (py * 2.0 - height) / 2.0 / width)
}

/// Projectiles outside this rectangle are discarded.
pub fn out_of_bounds(pt: Vec2) -> bool {
    !(pt.x > -0.05 && pt.x < 1.05 && pt.y > -1.5 && pt.y < 1.5)
}

/// Remove every element matching `pred` by swapping the last element into
/// its slot.  Survivors keep no particular order.
pub fn remove_unordered<T>(list: &mut Vec<T>, mut pred: impl FnMut(&T) -> bool) {
    let mut i = 0;
    while i < list.len() {
        if pred(&list[i]) {
            // The element moved into `i` still has to be checked.
            list.swap_remove(i);
        } else {
            i += 1;
        }
    }
}

/// Animation stage of an explosion at `frame`; `>= rules.explosion_stages`
/// means it has burnt out.
pub fn explosion_stage(explosion: &Explosion, frame: u32, rules: &Rules) -> u32 {
    frame.wrapping_sub(explosion.start_frame) / rules.explosion_stage_len
}

pub fn phase(state: &GameState) -> GamePhase {
    if state.shipwreck.is_some() {
        GamePhase::GameOver
    } else if state.first_run && state.frame < state.rules.title_frames {
        GamePhase::Title
    } else {
        GamePhase::Playing
    }
}

/// Velocity of a shot fired from `from` towards `target` at `speed`.
fn aim(from: Vec2, target: Vec2, speed: f32) -> Vec2 {
    let d = target - from;
    let len_sq = d.length_squared();
    if len_sq == 0.0 {
        return Vec2::default();
    }
    d * (speed / len_sq.sqrt())
}

fn spawn_enemy(frame: u32, rules: &Rules, rng: &mut impl Rng) -> Enemy {
    let y = (rng.gen::<f32>() - 0.5) * rules.enemy_spawn_spread;
    let speed = rng.gen_range(rules.enemy_speed_min..=rules.enemy_speed_max);
    let drift = (rng.gen::<f32>() - 0.5) * rules.enemy_max_drift;
    Enemy {
        start_frame: frame,
        pos: Vec2::new(1.0, y),
        vel: Vec2::new(-speed, drift),
    }
}

// ── Overlays ─────────────────────────────────────────────────────────────────

/// Opacity of the title card, while it is showing.
pub fn title_alpha(state: &GameState) -> Option<f32> {
    if phase(state) != GamePhase::Title {
        return None;
    }
    let t = state.frame as f32 / state.rules.title_frames as f32;
    Some((4.0 * (1.0 - t)).clamp(0.0, 1.0))
}

/// Left and right opacity of the black fade drawn while the ship is wrecked.
pub fn shipwreck_gradient(state: &GameState) -> Option<(f32, f32)> {
    let wreck = state.shipwreck?;
    let t = state.frame.saturating_sub(wreck) as f32;
    let fade = state.rules.fadeout_frames as f32;
    Some((
        ((t + 20.0 - fade) / 10.0).clamp(0.0, 1.0),
        ((t + 10.0 - fade) / 10.0).clamp(0.0, 1.0),
    ))
}

/// Left and right opacity of the fade-in at the start of every later round.
pub fn round_start_gradient(state: &GameState) -> Option<(f32, f32)> {
    if state.first_run || state.frame >= state.rules.title_frames {
        return None;
    }
    let t = state.frame as f32;
    Some((
        (1.0 - t / 10.0).clamp(0.0, 1.0),
        (1.0 - (t - 10.0) / 10.0).clamp(0.0, 1.0),
    ))
}

// ── Collisions ───────────────────────────────────────────────────────────────

fn collide(state: &mut GameState) {
    let rules = state.rules;

    // Red shots ↔ ship
    if state.shipwreck.is_none() {
        let ship = state.ship.pos;
        let hit = state
            .red_shots
            .iter()
            .any(|shot| shot.pos.distance_squared(ship) < rules.ship_hit_radius_sq);
        if hit {
            info!("ship destroyed at frame {}", state.frame);
            state.explosions.push(Explosion { start_frame: state.frame, pos: ship });
            state.shipwreck = Some(state.frame);
        }
    }

    // Blue shots ↔ enemies.  A hit enemy is parked left of the screen and
    // pruned by the next tick instead of being removed mid-scan.
    for shot in &state.blue_shots {
        for enemy in state.enemies.iter_mut() {
            if shot.pos.distance_squared(enemy.pos) < rules.enemy_hit_radius_sq {
                state.explosions.push(Explosion { start_frame: state.frame, pos: enemy.pos });
                enemy.pos = Vec2::new(-1.0, 0.0);
            }
        }
    }
}

/// Apply both collision rules to `state` as it stands.
pub fn resolve_collisions(state: &GameState) -> GameState {
    let mut next = state.clone();
    collide(&mut next);
    next
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  `pointer` is the ship position in
/// world coordinates (see `pointer_to_world`).  All randomness comes through
/// `rng` so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(state: &GameState, pointer: Vec2, rng: &mut impl Rng) -> GameState {
    let mut s = state.clone();
    let rules = s.rules;

    // ── 1. End of the fade-out: start a new round ────────────────────────────
    if let Some(wreck) = s.shipwreck {
        if s.frame >= wreck + rules.fadeout_frames {
            info!("round over after {} frames, restarting", s.frame);
            s.shipwreck = None;
            s.frame = 0;
            s.first_run = false;
            s.explosions.clear();
            s.enemies.clear();
            s.red_shots.clear();
            s.blue_shots.clear();
        }
    }

    s.frame += 1;
    let frame = s.frame;
    let wrecked = s.shipwreck.is_some();

    s.ship.pos = pointer;

    // ── 2. Explosions ────────────────────────────────────────────────────────
    remove_unordered(&mut s.explosions, |e| {
        explosion_stage(e, frame, &rules) >= rules.explosion_stages
    });

    // ── 3. Enemies: prune, move, fire, check alignment ───────────────────────
    remove_unordered(&mut s.enemies, |e| e.pos.x < 0.0);

    let ship = s.ship.pos;
    let mut ship_firing = false;
    for enemy in s.enemies.iter_mut() {
        enemy.pos = enemy.pos + enemy.vel;

        if !wrecked && frame.wrapping_sub(enemy.start_frame) % rules.enemy_fire_interval == 0 {
            s.red_shots.push(Shot {
                pos: enemy.pos,
                vel: aim(enemy.pos, ship, rules.red_shot_speed),
            });
        }

        if (ship.y - enemy.pos.y).abs() < rules.firing_alignment {
            ship_firing = true;
        }
    }

    // ── 4. Spawn a new enemy at the right edge ───────────────────────────────
    if !wrecked && frame % rules.spawn_interval == 0 && frame >= rules.title_frames {
        let enemy = spawn_enemy(frame, &rules, rng);
        debug!("enemy spawned at {:?} moving {:?}", enemy.pos, enemy.vel);
        s.enemies.push(enemy);
    }

    // ── 5. Shots ─────────────────────────────────────────────────────────────
    remove_unordered(&mut s.red_shots, |shot| out_of_bounds(shot.pos));
    remove_unordered(&mut s.blue_shots, |shot| out_of_bounds(shot.pos));

    for shot in s.red_shots.iter_mut().chain(s.blue_shots.iter_mut()) {
        shot.pos = shot.pos + shot.vel;
    }

    // ── 6. Fire! ─────────────────────────────────────────────────────────────
    if !wrecked && ship_firing && frame % rules.ship_fire_interval == 0 {
        s.blue_shots.push(Shot {
            pos: ship,
            vel: Vec2::new(rules.blue_shot_speed, 0.0),
        });
    }

    // ── 7. Collisions ────────────────────────────────────────────────────────
    collide(&mut s);

    s
}
