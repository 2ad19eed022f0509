//! Projectile spawning
//!
//! Launch parameters are chosen so every projectile arcs from below the
//! visible area toward the middle half of the view: the horizontal speed is
//! derived from a fixed flight-time budget, which keeps the arrival pace
//! consistent regardless of how far the projectile has to travel.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Color, Projectile, ProjectileKind};
use crate::tuning::Tuning;

/// Fruit glyph/color palette; the color also tints slice effects
pub const FRUITS: [(char, Color); 6] = [
    ('🍉', [255, 85, 85]),
    ('🍌', [250, 204, 21]),
    ('🥝', [132, 204, 22]),
    ('🍍', [251, 191, 36]),
    ('🍇', [168, 85, 247]),
    ('🍊', [251, 146, 60]),
];

pub const HAZARD_GLYPH: char = '💣';
pub const HAZARD_COLOR: Color = [255, 255, 255];

/// Create one projectile just below the bottom edge of a `view`-sized field.
///
/// Draw order is part of the contract: x, target x, flight time, vertical
/// velocity, kind, palette index, spin.
pub fn spawn_projectile(id: u32, rng: &mut Pcg32, tuning: &Tuning, view: Vec2) -> Projectile {
    let x = rng.random_range(tuning.spawn_margin..view.x - tuning.spawn_margin);
    let y = view.y + tuning.projectile_radius;

    // Land somewhere in the middle half of the width
    let target_x = rng.random_range(view.x * 0.25..view.x * 0.75);
    let flight_time = rng.random_range(tuning.flight_time_min..tuning.flight_time_max);
    let vy = rng.random_range(tuning.launch_vy_min..tuning.launch_vy_max);
    let vx = (target_x - x) / flight_time;

    let (kind, glyph, color) = if rng.random_bool(tuning.hazard_chance) {
        (ProjectileKind::Hazard, HAZARD_GLYPH, HAZARD_COLOR)
    } else {
        let (glyph, color) = FRUITS[rng.random_range(0..FRUITS.len())];
        (ProjectileKind::Fruit, glyph, color)
    };

    Projectile {
        id,
        pos: Vec2::new(x, y),
        vel: Vec2::new(vx, vy),
        rotation: 0.0,
        rotation_speed: rng.random_range(-0.05..0.05),
        kind,
        glyph,
        color,
        radius: tuning.projectile_radius,
        sliced: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn horizontal_velocity_matches_flight_budget() {
        // Replay the documented draw order against an identically seeded rng
        let tuning = Tuning::default();
        let view = Vec2::new(1280.0, 720.0);
        for seed in 0..64u64 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let x = rng.random_range(tuning.spawn_margin..view.x - tuning.spawn_margin);
            let target_x = rng.random_range(view.x * 0.25..view.x * 0.75);
            let flight_time = rng.random_range(tuning.flight_time_min..tuning.flight_time_max);

            let mut rng = Pcg32::seed_from_u64(seed);
            let p = spawn_projectile(1, &mut rng, &tuning, view);
            assert_eq!(p.pos.x, x);
            assert_eq!(p.vel.x, (target_x - x) / flight_time);
        }
    }

    #[test]
    fn hazard_rate_is_roughly_fifteen_percent() {
        let tuning = Tuning::default();
        let view = Vec2::new(1280.0, 720.0);
        let mut rng = Pcg32::seed_from_u64(0xB1ADE);
        let hazards = (0..2000)
            .filter(|_| {
                spawn_projectile(1, &mut rng, &tuning, view).kind == ProjectileKind::Hazard
            })
            .count();
        assert!((200..400).contains(&hazards), "got {hazards} hazards");
    }

    proptest! {
        #[test]
        fn spawn_respects_ballistic_envelope(
            seed in any::<u64>(),
            w in 600.0f32..3840.0,
            h in 400.0f32..2160.0,
        ) {
            let tuning = Tuning::default();
            let view = Vec2::new(w, h);
            let mut rng = Pcg32::seed_from_u64(seed);
            let p = spawn_projectile(1, &mut rng, &tuning, view);

            // Starts inside the horizontal margins, just below the view
            prop_assert!(p.pos.x >= tuning.spawn_margin);
            prop_assert!(p.pos.x <= w - tuning.spawn_margin);
            prop_assert_eq!(p.pos.y, h + tuning.projectile_radius);

            // Launches upward within the tuned band
            prop_assert!(p.vel.y >= tuning.launch_vy_min);
            prop_assert!(p.vel.y < tuning.launch_vy_max);

            // The landing column over the flight-time window must overlap
            // the middle half of the width, since the actual target lies
            // there and x + vx*t is monotonic in t
            let a = p.pos.x + p.vel.x * tuning.flight_time_min;
            let b = p.pos.x + p.vel.x * tuning.flight_time_max;
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(lo <= w * 0.75 + 1.0);
            prop_assert!(hi >= w * 0.25 - 1.0);

            prop_assert!(!p.sliced);
            prop_assert_eq!(p.radius, tuning.projectile_radius);
        }
    }
}
