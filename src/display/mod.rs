/// Rendering layer.
///
/// `render` composes an immutable view of the game state into a `Canvas`;
/// no game logic is performed there.  `present` is the only function that
/// talks to the terminal.

pub mod canvas;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::assets::{TextureId, TextureSet};
use crate::compute::{explosion_stage, round_start_gradient, shipwreck_gradient, title_alpha};
use crate::entities::{GameState, Vec2};
use canvas::{Blend, Canvas, Rgb, BLACK};

/// 640 source pixels span the world's unit width; sprites are drawn
/// centred, so each half extent is pixels / 1280.
const SPRITE_SCALE: f32 = 1.0 / (640.0 * 2.0);

/// Seconds of play it takes the backdrop to scroll by one full width.
const BACKDROP_PERIOD: f32 = 32.0;

/// Glyph showing the top pixel as foreground, the bottom one as background.
const HALF_BLOCK: char = '▀';

// ── Composition ───────────────────────────────────────────────────────────────

/// Half extents of `id` drawn as a sprite, in world units.
pub fn sprite_extent(textures: &TextureSet, id: TextureId) -> Vec2 {
    let tex = textures.get(id);
    Vec2::new(tex.width as f32 * SPRITE_SCALE, tex.height as f32 * SPRITE_SCALE)
}

/// Horizontal texture offset of the backdrop at `frame`.
pub fn backdrop_offset(frame: u32, fps: u32) -> f32 {
    frame as f32 / fps as f32 / BACKDROP_PERIOD
}

fn sprite(canvas: &mut Canvas, textures: &TextureSet, pos: Vec2, id: TextureId, alpha: f32) {
    let half = sprite_extent(textures, id);
    canvas.textured_quad(pos - half, pos + half, textures.get(id), 0.0, Blend::Alpha(alpha));
}

/// Compose one complete frame into `canvas`.
pub fn render(canvas: &mut Canvas, state: &GameState, textures: &TextureSet, fps: u32) {
    canvas.clear(BLACK);

    // Backdrop
    canvas.textured_quad(
        Vec2::new(0.0, -0.5),
        Vec2::new(1.0, 0.5),
        textures.get(TextureId::Backdrop),
        backdrop_offset(state.frame, fps),
        Blend::Opaque,
    );

    for shot in &state.red_shots {
        sprite(canvas, textures, shot.pos, TextureId::RedShot, 1.0);
    }
    for shot in &state.blue_shots {
        sprite(canvas, textures, shot.pos, TextureId::BlueShot, 1.0);
    }

    if state.shipwreck.is_none() {
        sprite(canvas, textures, state.ship.pos, TextureId::Ship, 1.0);
    }

    for explosion in &state.explosions {
        let stage = explosion_stage(explosion, state.frame, &state.rules);
        if let Some(id) = TextureId::boom(stage) {
            sprite(canvas, textures, explosion.pos, id, 1.0);
        }
    }

    for enemy in &state.enemies {
        sprite(canvas, textures, enemy.pos, TextureId::Enemy, 1.0);
    }

    if let Some(alpha) = title_alpha(state) {
        sprite(canvas, textures, Vec2::new(0.5, 0.0), TextureId::Title, alpha);
    }

    if let Some((left, right)) = shipwreck_gradient(state) {
        canvas.gradient(left, right);
    }
    if let Some((left, right)) = round_start_gradient(state) {
        canvas.gradient(left, right);
    }
}

// ── Presentation ──────────────────────────────────────────────────────────────

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c[0], g: c[1], b: c[2] }
}

/// Write `canvas` to the terminal, two pixels per cell, and flush.
pub fn present<W: Write>(out: &mut W, canvas: &Canvas) -> std::io::Result<()> {
    let rows = canvas.height() / 2;
    // Colours already set on the terminal; only changes are emitted.
    let mut fg: Option<Rgb> = None;
    let mut bg: Option<Rgb> = None;

    for row in 0..rows {
        out.queue(cursor::MoveTo(0, row as u16))?;
        for col in 0..canvas.width() {
            let top = canvas.pixel(col, row * 2);
            let bottom = canvas.pixel(col, row * 2 + 1);
            if fg != Some(top) {
                out.queue(style::SetForegroundColor(rgb(top)))?;
                fg = Some(top);
            }
            if bg != Some(bottom) {
                out.queue(style::SetBackgroundColor(rgb(bottom)))?;
                bg = Some(bottom);
            }
            out.queue(Print(HALF_BLOCK))?;
        }
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
