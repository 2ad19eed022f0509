//! Per-tick motion integration and pool pruning
//!
//! Pure state advance: position from velocity, constant gravity on the
//! airborne pools, life decay on everything ephemeral. No I/O, no RNG;
//! behavior is frame-count-driven, so a fixed input sequence replays
//! exactly.

use super::state::{FloatingText, Particle, ParticleKind, Projectile, SlicedHalf};
use crate::tuning::Tuning;

/// Advance live projectiles and drop the ones that scrolled offscreen.
///
/// Position integrates before gravity is added, so each step moves by the
/// previous tick's velocity.
pub fn integrate_projectiles(projectiles: &mut Vec<Projectile>, tuning: &Tuning, height: f32) {
    for p in projectiles.iter_mut() {
        p.pos += p.vel;
        p.vel.y += tuning.gravity;
        p.rotation += p.rotation_speed;
    }
    projectiles.retain(|p| p.pos.y < height + p.radius * 2.0);
}

/// Advance sliced halves under full gravity and fade them out
pub fn integrate_halves(halves: &mut Vec<SlicedHalf>, tuning: &Tuning) {
    for h in halves.iter_mut() {
        h.pos += h.vel;
        h.vel.y += tuning.gravity;
        h.rotation += h.rotation_speed;
        h.life -= tuning.half_decay;
    }
    halves.retain(|h| h.life > 0.0);
}

/// Advance particles: debris drifts and falls at half gravity, the flash
/// stays put and burns out faster
pub fn integrate_particles(particles: &mut Vec<Particle>, tuning: &Tuning) {
    for p in particles.iter_mut() {
        match p.kind {
            ParticleKind::Debris { .. } => {
                p.pos += p.vel;
                p.vel.y += tuning.gravity * 0.5;
                p.life -= tuning.debris_decay;
            }
            ParticleKind::Flash => {
                p.life -= tuning.flash_decay;
            }
        }
    }
    particles.retain(|p| p.life > 0.0);
}

/// Floating text rises at its own constant speed, unaffected by gravity
pub fn integrate_texts(texts: &mut Vec<FloatingText>, tuning: &Tuning) {
    for t in texts.iter_mut() {
        t.pos.y += t.vy;
        t.life -= tuning.text_decay;
    }
    texts.retain(|t| t.life > 0.0);
}
