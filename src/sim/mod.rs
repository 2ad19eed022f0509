//! Deterministic slicing simulation
//!
//! All gameplay logic lives here. The module is pure given its inputs:
//! - One `tick` per scheduled frame, driven by the timestamps it is handed
//! - Seeded RNG owned by `SimState`
//! - Monotonic entity IDs, stable iteration order
//! - No rendering or platform dependencies

pub mod physics;
pub mod slice;
pub mod spawn;
pub mod state;
pub mod tick;

pub use slice::cut_angle;
pub use spawn::{FRUITS, spawn_projectile};
pub use state::{
    Color, FloatingText, GamePhase, HalfSide, Particle, ParticleKind, PointerState, Projectile,
    ProjectileKind, RenderSnapshot, RoundResult, SessionStats, SimState, SlicedHalf,
};
pub use tick::{TickEvents, TickInput, tick};
