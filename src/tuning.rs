//! Data-driven game balance
//!
//! Every behavioral constant the simulation uses, collected into one struct
//! so tests and alternate builds can override individual knobs. Defaults
//! come from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Simulation balance parameters
///
/// `SimState` carries one of these; all spawn, physics, slicing and timing
/// code reads from it rather than from the raw constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    // === Physics ===
    /// Downward acceleration per tick (debris feels half of it)
    pub gravity: f32,

    // === Round ===
    /// Countdown length in wall-clock seconds
    pub round_duration_secs: u32,

    // === Projectiles ===
    /// Collision radius of every projectile
    pub projectile_radius: f32,
    /// Hazard probability per spawn
    pub hazard_chance: f64,
    /// Flight-time budget range (ticks)
    pub flight_time_min: f32,
    pub flight_time_max: f32,
    /// Vertical launch velocity range (negative = upward)
    pub launch_vy_min: f32,
    pub launch_vy_max: f32,
    /// Horizontal margin kept clear at both edges when spawning
    pub spawn_margin: f32,

    // === Spawn cadence ===
    /// Live-projectile cap; spawning pauses at or above it
    pub max_live_projectiles: usize,
    /// Interval at score zero (ms)
    pub spawn_interval_max_ms: f64,
    /// Interval floor (ms)
    pub spawn_interval_min_ms: f64,
    /// Interval shrink per point of score (ms)
    pub spawn_interval_per_point_ms: f64,

    // === Pointer ===
    /// Radius modeling the pointer-tip thickness
    pub pointer_radius: f32,
    /// Exponential smoothing factor toward the raw sample, per tick
    pub pointer_smoothing: f32,
    /// Blade trail capacity (samples)
    pub trail_capacity: usize,
    /// Dwell time inside a start button before it triggers (ms)
    pub dwell_ms: f64,
    /// Start button radius
    pub button_radius: f32,

    // === Effects ===
    /// Lateral impulse given to each sliced half
    pub split_impulse: f32,
    /// Debris particles per explosion
    pub debris_count: usize,
    /// Full width of the debris velocity spread
    pub debris_spread: f32,
    /// Life decay per tick, per pool
    pub half_decay: f32,
    pub debris_decay: f32,
    pub flash_decay: f32,
    pub text_decay: f32,
    /// Constant upward drift of floating text (pixels/tick)
    pub text_rise: f32,

    // === Scoring ===
    pub fruit_score: u32,
    pub hazard_penalty: u32,

    // === Feedback ===
    /// Oracle timeout before the fallback rank is used (ms)
    pub feedback_timeout_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            round_duration_secs: ROUND_DURATION_SECS,
            projectile_radius: PROJECTILE_RADIUS,
            hazard_chance: HAZARD_CHANCE,
            flight_time_min: FLIGHT_TIME_MIN,
            flight_time_max: FLIGHT_TIME_MAX,
            launch_vy_min: LAUNCH_VY_MIN,
            launch_vy_max: LAUNCH_VY_MAX,
            spawn_margin: SPAWN_MARGIN,
            max_live_projectiles: MAX_LIVE_PROJECTILES,
            spawn_interval_max_ms: SPAWN_INTERVAL_MAX_MS,
            spawn_interval_min_ms: SPAWN_INTERVAL_MIN_MS,
            spawn_interval_per_point_ms: SPAWN_INTERVAL_PER_POINT_MS,
            pointer_radius: POINTER_RADIUS,
            pointer_smoothing: POINTER_SMOOTHING,
            trail_capacity: TRAIL_CAPACITY,
            dwell_ms: DWELL_MS,
            button_radius: BUTTON_RADIUS,
            split_impulse: SPLIT_IMPULSE,
            debris_count: DEBRIS_COUNT,
            debris_spread: DEBRIS_SPREAD,
            half_decay: HALF_DECAY,
            debris_decay: DEBRIS_DECAY,
            flash_decay: FLASH_DECAY,
            text_decay: TEXT_DECAY,
            text_rise: TEXT_RISE,
            fruit_score: FRUIT_SCORE,
            hazard_penalty: HAZARD_PENALTY,
            feedback_timeout_ms: FEEDBACK_TIMEOUT_MS,
        }
    }
}

impl Tuning {
    /// Spawn interval for a given score: shrinks as the score grows,
    /// floored at `spawn_interval_min_ms`.
    pub fn spawn_interval_ms(&self, score: u32) -> f64 {
        (self.spawn_interval_max_ms - self.spawn_interval_per_point_ms * f64::from(score))
            .max(self.spawn_interval_min_ms)
    }
}
