//! Game state and core simulation types
//!
//! The whole simulation is one owned `SimState` aggregate: the four object
//! pools, session stats, pointer state and timer bookkeeping. The frame
//! driver owns it exclusively; every system borrows it for the duration of
//! a single call and retains nothing.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// RGB triple handed to the presentation layer as-is
pub type Color = [u8; 3];

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle, waiting for the start action
    Menu,
    /// Active round, countdown running
    Playing,
    /// Round ended, results on screen
    GameOver,
}

/// What a projectile does to the score when sliced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Fruit,
    Hazard,
}

/// A projectile arcing across the play field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub kind: ProjectileKind,
    pub glyph: char,
    pub color: Color,
    /// Constant after creation
    pub radius: f32,
    /// Transitions false -> true exactly once; removed at end of that tick
    pub sliced: bool,
}

/// Which side of the cut line a half flies toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HalfSide {
    Left,
    Right,
}

/// One of the two mirror halves of a sliced fruit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlicedHalf {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Angle of the cut line; the presentation clips the glyph along it
    pub cut_angle: f32,
    pub side: HalfSide,
    pub glyph: char,
    pub color: Color,
    pub radius: f32,
    pub life: f32,
}

/// Visual sub-kind of a particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Falling fleck, drawn as a disc
    Debris { size: f32 },
    /// Single slash flash per explosion, drawn as a rotated bar
    Flash,
}

/// A short-lived visual particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub color: Color,
    pub kind: ParticleKind,
}

/// Score popup that rises and fades above a slicing event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub id: u32,
    pub pos: Vec2,
    pub text: String,
    pub color: Color,
    pub life: f32,
    pub vy: f32,
}

/// Accumulated counters for the active (or most recent) round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u32,
    pub fruits_sliced: u32,
    pub hazards_hit: u32,
}

/// Snapshot handed to the feedback oracle when a round ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Round sequence number; stale feedback responses are matched on it
    pub round: u32,
    pub score: u32,
    pub fruits_sliced: u32,
    pub hazards_hit: u32,
    pub rank_title: String,
    pub rank_description: String,
}

impl RoundResult {
    pub const PENDING_TITLE: &'static str = "Analyzing...";
    pub const PENDING_DESCRIPTION: &'static str = "...";

    /// Result with placeholder rank fields, overwritten once the oracle
    /// responds
    pub fn pending(round: u32, stats: &SessionStats) -> Self {
        Self {
            round,
            score: stats.score,
            fruits_sliced: stats.fruits_sliced,
            hazards_hit: stats.hazards_hit,
            rank_title: Self::PENDING_TITLE.to_string(),
            rank_description: Self::PENDING_DESCRIPTION.to_string(),
        }
    }
}

/// Smoothed pointer position plus the recent blade trail
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    pub pos: Vec2,
    /// Oldest sample first; capped at `Tuning::trail_capacity`
    pub trail: Vec<Vec2>,
    pub hand_present: bool,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub stats: SessionStats,
    /// Live projectiles, insertion order
    pub projectiles: Vec<Projectile>,
    pub halves: Vec<SlicedHalf>,
    pub particles: Vec<Particle>,
    pub texts: Vec<FloatingText>,
    pub pointer: PointerState,
    /// Full-screen flash intensity in [0,1], decays each tick
    pub screen_flash: f32,
    /// Countdown seconds shown on the HUD
    pub time_left: u32,
    /// Round sequence number, bumped on every start
    pub round: u32,
    pub last_result: Option<RoundResult>,
    /// True while a feedback request is in flight
    pub analyzing: bool,
    /// Wall-clock ms of the current round's start
    pub(crate) round_started_ms: f64,
    /// Wall-clock ms of the previous spawn
    pub(crate) last_spawn_ms: f64,
    /// When the pointer entered the start button, if it is inside
    pub(crate) dwell_since_ms: Option<f64>,
    /// Next entity ID
    next_id: u32,
}

impl SimState {
    /// Create an idle simulation with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_left: tuning.round_duration_secs,
            tuning,
            phase: GamePhase::Menu,
            stats: SessionStats::default(),
            projectiles: Vec::new(),
            halves: Vec::new(),
            particles: Vec::new(),
            texts: Vec::new(),
            pointer: PointerState::default(),
            screen_flash: 0.0,
            round: 0,
            last_result: None,
            analyzing: false,
            round_started_ms: 0.0,
            last_spawn_ms: 0.0,
            dwell_since_ms: None,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Render-ready view of the current tick
    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        RenderSnapshot {
            phase: self.phase,
            score: self.stats.score,
            time_left: self.time_left,
            pointer: self.pointer.pos,
            hand_present: self.pointer.hand_present,
            trail: &self.pointer.trail,
            projectiles: &self.projectiles,
            halves: &self.halves,
            particles: &self.particles,
            texts: &self.texts,
            screen_flash: self.screen_flash,
            result: self.last_result.as_ref(),
            analyzing: self.analyzing,
        }
    }
}

/// Everything the presentation layer needs for one frame
///
/// Borrows from `SimState`; the presenter must not hold it across ticks.
#[derive(Debug)]
pub struct RenderSnapshot<'a> {
    pub phase: GamePhase,
    pub score: u32,
    pub time_left: u32,
    pub pointer: Vec2,
    pub hand_present: bool,
    pub trail: &'a [Vec2],
    pub projectiles: &'a [Projectile],
    pub halves: &'a [SlicedHalf],
    pub particles: &'a [Particle],
    pub texts: &'a [FloatingText],
    pub screen_flash: f32,
    pub result: Option<&'a RoundResult>,
    pub analyzing: bool,
}
