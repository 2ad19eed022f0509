//! Blade Rush - simulation core for a motion-controlled slicing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, slicing, game state)
//! - `driver`: Frame scheduling loop and collaborator traits
//! - `feedback`: End-of-round rank generation
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod feedback;
pub mod sim;
pub mod tuning;

pub use driver::{FrameDriver, PointerSample, PointerSource, Presenter, StopHandle};
pub use feedback::{FeedbackOracle, RankTable, RankText};
pub use tuning::Tuning;

/// Game configuration constants
///
/// Velocities and accelerations are in pixels per simulation tick; the
/// round countdown and spawn cadence run on wall-clock milliseconds.
pub mod consts {
    /// Downward acceleration applied each tick (halved for debris)
    pub const GRAVITY: f32 = 0.25;
    /// Round length in wall-clock seconds
    pub const ROUND_DURATION_SECS: u32 = 60;

    /// Collision radius of every projectile
    pub const PROJECTILE_RADIUS: f32 = 70.0;
    /// Radius modeling the pointer-tip thickness
    pub const POINTER_RADIUS: f32 = 20.0;

    /// Live projectiles allowed before spawning is suppressed
    pub const MAX_LIVE_PROJECTILES: usize = 6;
    /// Spawn interval at score zero (ms)
    pub const SPAWN_INTERVAL_MAX_MS: f64 = 1500.0;
    /// Spawn interval floor (ms)
    pub const SPAWN_INTERVAL_MIN_MS: f64 = 600.0;
    /// How much the interval shrinks per point of score (ms)
    pub const SPAWN_INTERVAL_PER_POINT_MS: f64 = 10.0;
    /// Horizontal margin kept clear at both edges when spawning
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Probability that a spawned projectile is a hazard
    pub const HAZARD_CHANCE: f64 = 0.15;
    /// Flight-time budget drawn per spawn (ticks to reach the target column)
    pub const FLIGHT_TIME_MIN: f32 = 55.0;
    pub const FLIGHT_TIME_MAX: f32 = 65.0;
    /// Vertical launch velocity range (negative = upward)
    pub const LAUNCH_VY_MIN: f32 = -21.0;
    pub const LAUNCH_VY_MAX: f32 = -15.0;

    /// Lateral impulse given to each sliced half, along the cut normal
    pub const SPLIT_IMPULSE: f32 = 12.0;
    /// Debris particles per explosion
    pub const DEBRIS_COUNT: usize = 15;
    /// Full width of the debris velocity spread
    pub const DEBRIS_SPREAD: f32 = 15.0;

    /// Life decay per tick, per pool
    pub const HALF_DECAY: f32 = 0.05;
    pub const DEBRIS_DECAY: f32 = 0.05;
    pub const FLASH_DECAY: f32 = 0.15;
    pub const TEXT_DECAY: f32 = 0.02;
    /// Constant upward drift of floating text (pixels/tick)
    pub const TEXT_RISE: f32 = -2.0;
    /// Floating text spawns this far above the scoring event
    pub const TEXT_SPAWN_LIFT: f32 = 20.0;

    /// Blade trail capacity (samples)
    pub const TRAIL_CAPACITY: usize = 7;
    /// Exponential smoothing factor toward the raw pointer sample, per tick
    pub const POINTER_SMOOTHING: f32 = 0.6;

    /// Dwell time inside a start button before it triggers (ms)
    pub const DWELL_MS: f64 = 1500.0;
    /// Start button radius
    pub const BUTTON_RADIUS: f32 = 80.0;
    /// Button center offset from view center, per phase
    pub const MENU_BUTTON_OFFSET: f32 = 60.0;
    pub const GAME_OVER_BUTTON_OFFSET: f32 = -30.0;

    /// Points per fruit sliced
    pub const FRUIT_SCORE: u32 = 5;
    /// Points lost per hazard hit (score never goes below zero)
    pub const HAZARD_PENALTY: u32 = 10;

    /// Full-screen flash intensity set on a hazard hit
    pub const SCREEN_FLASH_STRENGTH: f32 = 0.8;
    /// Multiplicative flash decay per tick
    pub const SCREEN_FLASH_DECAY: f32 = 0.6;

    /// Feedback request timeout before the fallback rank is used (ms)
    pub const FEEDBACK_TIMEOUT_MS: u64 = 5000;
}
