/// All game entity types — pure data, no logic.

// ── Geometry ──────────────────────────────────────────────────────────────────

// World coordinates: x runs 0.0 (left edge) → 1.0 (right edge); y is
// centred on 0.0 and grows downward, scaled by the surface aspect ratio.
pub use glam::Vec2;

use crate::config::Rules;

// ── Phase ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    /// Opening grace period of the very first round; the title is shown.
    Title,
    Playing,
    /// The ship was destroyed and the screen is fading out.
    GameOver,
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ship {
    pub pos: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub start_frame: u32,
    pub pos: Vec2,
}

/// A drifting enemy ("hate shroom").
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Frame the enemy appeared on; its firing timer counts from here.
    pub start_frame: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// A projectile.  Which side fired it is given by the list it lives in.
#[derive(Clone, Debug, PartialEq)]
pub struct Shot {
    pub pos: Vec2,
    pub vel: Vec2,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation state.  Cloneable so the per-frame update can
/// return a new copy without mutating the original.
///
/// None of the entity lists is ordered; removal swaps the last element
/// into the freed slot.
#[derive(Clone, Debug)]
pub struct GameState {
    pub ship: Ship,
    pub explosions: Vec<Explosion>,
    pub enemies: Vec<Enemy>,
    /// Enemy-fired shots.
    pub red_shots: Vec<Shot>,
    /// Player-fired shots.
    pub blue_shots: Vec<Shot>,
    /// Frame counter of the current round.
    pub frame: u32,
    /// Frame the ship was destroyed on, while the fade-out runs.
    pub shipwreck: Option<u32>,
    /// Cleared after the first restart so the title only plays once.
    pub first_run: bool,
    pub rules: Rules,
}
