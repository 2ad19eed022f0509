//! Pointer collision and slice resolution
//!
//! Tests the tracked pointer against every live projectile and converts a
//! hit into score changes, explosion particles, split halves and floating
//! text. Each projectile registers at most one hit; several projectiles
//! can be hit in the same tick.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use rand::Rng;

use super::state::{
    Color, FloatingText, HalfSide, Particle, ParticleKind, Projectile, ProjectileKind, SimState,
    SlicedHalf,
};
use crate::consts::SCREEN_FLASH_STRENGTH;

/// Tint for hazard explosions and the "-10" popup
pub const HAZARD_BURST_COLOR: Color = [239, 68, 68];
/// Tint for the "+5" popup
pub const SCORE_TEXT_COLOR: Color = [250, 204, 21];
/// Tint of the slash flash bar
pub const FLASH_COLOR: Color = [255, 255, 255];
/// Flash particle starting life; shorter than debris so it reads as a pop
const FLASH_LIFE: f32 = 0.2;

/// Direction the blade is traveling, from the last two trail samples.
/// Fewer than two samples is not an error; the cut defaults to horizontal.
pub fn cut_angle(trail: &[Vec2]) -> f32 {
    match trail {
        [.., a, b] => (b.y - a.y).atan2(b.x - a.x),
        _ => 0.0,
    }
}

/// Run one tick of pointer-vs-projectile collision.
///
/// Only called while a round is active; the caller also guarantees the
/// pointer state is current. Sliced projectiles are removed at the end of
/// the pass.
pub fn resolve_slices(state: &mut SimState) {
    if !state.pointer.hand_present {
        return;
    }

    let pointer = state.pointer.pos;
    let angle = cut_angle(&state.pointer.trail);

    for i in 0..state.projectiles.len() {
        let p = &state.projectiles[i];
        if p.sliced {
            continue;
        }
        if pointer.distance(p.pos) >= p.radius + state.tuning.pointer_radius {
            continue;
        }

        let hit = state.projectiles[i].clone();
        state.projectiles[i].sliced = true;

        match hit.kind {
            ProjectileKind::Hazard => {
                state.stats.score = state.stats.score.saturating_sub(state.tuning.hazard_penalty);
                state.stats.hazards_hit += 1;
                spawn_explosion(state, hit.pos, HAZARD_BURST_COLOR);
                let text = format!("-{}", state.tuning.hazard_penalty);
                spawn_floating_text(state, hit.pos, text, HAZARD_BURST_COLOR);
                state.screen_flash = SCREEN_FLASH_STRENGTH;
            }
            ProjectileKind::Fruit => {
                state.stats.score += state.tuning.fruit_score;
                state.stats.fruits_sliced += 1;
                spawn_explosion(state, hit.pos, hit.color);
                spawn_halves(state, &hit, angle);
                let text = format!("+{}", state.tuning.fruit_score);
                spawn_floating_text(state, hit.pos, text, SCORE_TEXT_COLOR);
            }
        }
    }

    state.projectiles.retain(|p| !p.sliced);
}

/// Burst of debris plus a single slash flash at `pos`
pub fn spawn_explosion(state: &mut SimState, pos: Vec2, color: Color) {
    let spread = state.tuning.debris_spread;
    for _ in 0..state.tuning.debris_count {
        let id = state.next_entity_id();
        let vel = Vec2::new(
            state.rng.random_range(-0.5..0.5) * spread,
            state.rng.random_range(-0.5..0.5) * spread,
        );
        let size = state.rng.random_range(4.0..12.0);
        state.particles.push(Particle {
            id,
            pos,
            vel,
            life: 1.0,
            color,
            kind: ParticleKind::Debris { size },
        });
    }

    let id = state.next_entity_id();
    state.particles.push(Particle {
        id,
        pos,
        vel: Vec2::ZERO,
        life: FLASH_LIFE,
        color: FLASH_COLOR,
        kind: ParticleKind::Flash,
    });
}

/// Two mirror halves of `hit`, thrown apart along the normal of the cut
/// line and spinning away from each other
fn spawn_halves(state: &mut SimState, hit: &Projectile, cut_angle: f32) {
    let normal = Vec2::new((cut_angle + FRAC_PI_2).cos(), (cut_angle + FRAC_PI_2).sin());
    let impulse = normal * state.tuning.split_impulse;

    for side in [HalfSide::Left, HalfSide::Right] {
        let id = state.next_entity_id();
        let spin = 0.2 + state.rng.random_range(0.0..0.2);
        let (vel, rotation_speed) = match side {
            HalfSide::Left => (hit.vel - impulse, -spin),
            HalfSide::Right => (hit.vel + impulse, spin),
        };
        state.halves.push(SlicedHalf {
            id,
            pos: hit.pos,
            vel,
            rotation: hit.rotation,
            rotation_speed,
            cut_angle,
            side,
            glyph: hit.glyph,
            color: hit.color,
            radius: hit.radius,
            life: 1.0,
        });
    }
}

fn spawn_floating_text(state: &mut SimState, pos: Vec2, text: String, color: Color) {
    let id = state.next_entity_id();
    state.texts.push(FloatingText {
        id,
        pos: pos - Vec2::new(0.0, crate::consts::TEXT_SPAWN_LIFT),
        text,
        color,
        life: 1.0,
        vy: state.tuning.text_rise,
    });
}
