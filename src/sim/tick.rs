//! Per-frame simulation tick
//!
//! One call advances the whole game by a single frame: pointer smoothing,
//! dwell-button handling, spawn cadence, projectile integration, slice
//! resolution and the round countdown. The countdown is derived from the
//! wall-clock timestamp carried by `TickInput`, so it runs at one second
//! per second no matter how fast frames arrive.

use glam::Vec2;

use super::physics;
use super::slice::{resolve_slices, spawn_explosion};
use super::spawn::spawn_projectile;
use super::state::{GamePhase, RoundResult, SessionStats, SimState};
use crate::consts::{
    GAME_OVER_BUTTON_OFFSET, MENU_BUTTON_OFFSET, SCREEN_FLASH_DECAY,
};

/// Tint of the celebratory burst fired when a round starts
const START_BURST_COLOR: super::state::Color = [168, 85, 247];

/// External input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Monotonic wall-clock milliseconds (driver epoch)
    pub now_ms: f64,
    /// View size in pixels
    pub view: Vec2,
    /// Latest raw pointer sample, normalized to [0,1]²; `None` when the
    /// tracker has not produced a fresh one
    pub pointer: Option<Vec2>,
    /// Whether the tracker currently sees a hand
    pub hand_present: bool,
    /// One-shot start action from the host UI
    pub start: bool,
}

/// What a tick produced beyond state mutation
#[derive(Debug, Default)]
pub struct TickEvents {
    /// Set on the tick the countdown expired; the driver should request
    /// rank feedback for this result
    pub round_ended: Option<RoundResult>,
    /// Set on the tick a new round began
    pub round_started: bool,
}

/// Advance the simulation by one frame
pub fn tick(state: &mut SimState, input: &TickInput) -> TickEvents {
    let mut events = TickEvents::default();

    update_pointer(state, input);

    state.screen_flash *= SCREEN_FLASH_DECAY;
    if state.screen_flash < 0.01 {
        state.screen_flash = 0.0;
    }

    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => {
            let offset = if state.phase == GamePhase::Menu {
                MENU_BUTTON_OFFSET
            } else {
                GAME_OVER_BUTTON_OFFSET
            };
            if input.start || dwell_button_hit(state, input, offset) {
                start_round(state, input);
                events.round_started = true;
            }
        }
        GamePhase::Playing => {
            let elapsed_secs = ((input.now_ms - state.round_started_ms) / 1000.0).floor();
            let remaining = f64::from(state.tuning.round_duration_secs) - elapsed_secs;
            state.time_left = remaining.max(0.0) as u32;

            if state.time_left == 0 {
                events.round_ended = Some(end_round(state));
            } else {
                maybe_spawn(state, input);
                physics::integrate_projectiles(
                    &mut state.projectiles,
                    &state.tuning,
                    input.view.y,
                );
                resolve_slices(state);
            }
        }
    }

    // Cosmetic pools keep decaying in every phase so a finished round
    // fades out instead of freezing
    physics::integrate_halves(&mut state.halves, &state.tuning);
    physics::integrate_particles(&mut state.particles, &state.tuning);
    physics::integrate_texts(&mut state.texts, &state.tuning);

    // The trail refills while the hand is visible and drains one sample
    // per tick otherwise, so it never outlives the gesture that drew it
    if !input.hand_present && !state.pointer.trail.is_empty() {
        state.pointer.trail.remove(0);
    }

    events
}

/// Smooth the raw sample toward the current position and record the trail
fn update_pointer(state: &mut SimState, input: &TickInput) {
    state.pointer.hand_present = input.hand_present;
    if !input.hand_present {
        // Stale or missing tracking: the pointer simply stops moving
        return;
    }

    if let Some(raw) = input.pointer {
        let target = raw * input.view;
        state.pointer.pos = state.pointer.pos.lerp(target, state.tuning.pointer_smoothing);
    }

    state.pointer.trail.push(state.pointer.pos);
    let cap = state.tuning.trail_capacity;
    if state.pointer.trail.len() > cap {
        let excess = state.pointer.trail.len() - cap;
        state.pointer.trail.drain(..excess);
    }
}

/// True once the pointer has dwelled inside the start button long enough.
/// Leaving the region or losing the hand resets the dwell clock.
fn dwell_button_hit(state: &mut SimState, input: &TickInput, y_offset: f32) -> bool {
    if !input.hand_present {
        state.dwell_since_ms = None;
        return false;
    }

    let center = Vec2::new(input.view.x / 2.0, input.view.y / 2.0 + y_offset);
    let reach = state.tuning.button_radius + state.tuning.pointer_radius;
    if state.pointer.pos.distance(center) >= reach {
        state.dwell_since_ms = None;
        return false;
    }

    let since = *state.dwell_since_ms.get_or_insert(input.now_ms);
    input.now_ms - since > state.tuning.dwell_ms
}

/// Reset everything for a fresh round and fire the opening burst
fn start_round(state: &mut SimState, input: &TickInput) {
    state.stats = SessionStats::default();
    state.projectiles.clear();
    state.halves.clear();
    state.particles.clear();
    state.texts.clear();
    state.pointer.trail.clear();

    state.round += 1;
    state.round_started_ms = input.now_ms;
    state.last_spawn_ms = input.now_ms;
    state.time_left = state.tuning.round_duration_secs;
    state.dwell_since_ms = None;
    state.last_result = None;
    state.analyzing = false;
    state.screen_flash = 0.0;
    state.phase = GamePhase::Playing;

    log::info!("round {} started", state.round);
    spawn_explosion(state, input.view * 0.5, START_BURST_COLOR);
}

/// Countdown expired: clear the in-flight pools for a clean results view
/// and snapshot the stats for the feedback oracle
fn end_round(state: &mut SimState) -> RoundResult {
    state.phase = GamePhase::GameOver;
    state.projectiles.clear();
    state.halves.clear();
    state.dwell_since_ms = None;

    let result = RoundResult::pending(state.round, &state.stats);
    state.last_result = Some(result.clone());
    state.analyzing = true;

    log::info!(
        "round {} over: score {} ({} fruits, {} hazards)",
        state.round,
        result.score,
        result.fruits_sliced,
        result.hazards_hit
    );
    result
}

/// Spawn cadence: capped live count, interval shrinking with score
fn maybe_spawn(state: &mut SimState, input: &TickInput) {
    if state.projectiles.len() >= state.tuning.max_live_projectiles {
        return;
    }
    let interval = state.tuning.spawn_interval_ms(state.stats.score);
    if input.now_ms - state.last_spawn_ms <= interval {
        return;
    }

    let id = state.next_entity_id();
    let projectile = spawn_projectile(id, &mut state.rng, &state.tuning, input.view);
    state.projectiles.push(projectile);
    state.last_spawn_ms = input.now_ms;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Particle, ParticleKind, Projectile, ProjectileKind};

    const VIEW: Vec2 = Vec2::new(1280.0, 720.0);

    fn input_at(now_ms: f64) -> TickInput {
        TickInput {
            now_ms,
            view: VIEW,
            pointer: None,
            hand_present: false,
            start: false,
        }
    }

    fn start_input(now_ms: f64) -> TickInput {
        TickInput {
            start: true,
            ..input_at(now_ms)
        }
    }

    fn dirty_state() -> SimState {
        let mut state = SimState::new(5);
        state.phase = GamePhase::GameOver;
        state.stats = SessionStats {
            score: 120,
            fruits_sliced: 30,
            hazards_hit: 2,
        };
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            rotation: 0.0,
            rotation_speed: 0.0,
            kind: ProjectileKind::Fruit,
            glyph: '🍊',
            color: [251, 146, 60],
            radius: 70.0,
            sliced: false,
        });
        let id = state.next_entity_id();
        state.particles.push(Particle {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 1.0,
            color: [255, 255, 255],
            kind: ParticleKind::Debris { size: 5.0 },
        });
        state.texts.push(crate::sim::FloatingText {
            id: 99,
            pos: Vec2::ZERO,
            text: "+5".into(),
            color: [255, 255, 255],
            life: 1.0,
            vy: -2.0,
        });
        state
    }

    #[test]
    fn explicit_start_resets_session() {
        let mut state = dirty_state();
        let events = tick(&mut state, &start_input(10_000.0));

        assert!(events.round_started);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.stats, SessionStats::default());
        assert!(state.projectiles.is_empty());
        assert!(state.halves.is_empty());
        assert!(state.texts.is_empty());
        // the only particles left are the fresh opening burst
        assert_eq!(
            state.particles.len(),
            state.tuning.debris_count + 1,
            "stale particles must not survive a restart"
        );
        assert_eq!(state.round, 1);
        assert_eq!(state.time_left, state.tuning.round_duration_secs);
    }

    #[test]
    fn countdown_tracks_wall_clock_and_ends_once() {
        let mut state = SimState::new(11);
        tick(&mut state, &start_input(0.0));

        let events = tick(&mut state, &input_at(45_000.0));
        assert_eq!(state.time_left, 15);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(events.round_ended.is_none());

        let events = tick(&mut state, &input_at(61_000.0));
        assert_eq!(state.time_left, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let result = events.round_ended.expect("round must end");
        assert_eq!(result.round, 1);
        assert_eq!(result.rank_title, RoundResult::PENDING_TITLE);
        assert!(state.analyzing);

        // already over: no second transition
        let events = tick(&mut state, &input_at(62_000.0));
        assert!(events.round_ended.is_none());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn round_end_clears_in_flight_pools_but_keeps_effects() {
        let mut state = SimState::new(11);
        tick(&mut state, &start_input(0.0));
        // burn past the opening burst so the pools are distinguishable
        for i in 0..30 {
            tick(&mut state, &input_at(100.0 + f64::from(i) * 16.0));
        }
        state.projectiles.push(Projectile {
            id: 500,
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            rotation: 0.0,
            rotation_speed: 0.0,
            kind: ProjectileKind::Fruit,
            glyph: '🍇',
            color: [168, 85, 247],
            radius: 70.0,
            sliced: false,
        });
        state.texts.push(crate::sim::FloatingText {
            id: 501,
            pos: Vec2::ZERO,
            text: "+5".into(),
            color: [255, 255, 255],
            life: 1.0,
            vy: -2.0,
        });

        tick(&mut state, &input_at(61_000.0));
        assert!(state.projectiles.is_empty());
        assert!(state.halves.is_empty());
        // cosmetic pools survive the transition and keep decaying
        assert_eq!(state.texts.len(), 1);
        assert!(state.texts[0].life < 1.0);
    }

    #[test]
    fn spawn_cadence_waits_for_interval() {
        let mut state = SimState::new(3);
        tick(&mut state, &start_input(0.0));
        assert!(state.projectiles.is_empty());

        // interval at score 0 is 1500ms
        tick(&mut state, &input_at(1_000.0));
        assert!(state.projectiles.is_empty());

        tick(&mut state, &input_at(1_600.0));
        assert_eq!(state.projectiles.len(), 1);

        // next spawn only after another full interval
        tick(&mut state, &input_at(1_700.0));
        assert_eq!(state.projectiles.len(), 1);
        tick(&mut state, &input_at(3_200.0));
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn spawning_suppressed_at_live_cap() {
        let mut state = SimState::new(3);
        tick(&mut state, &start_input(0.0));
        for _ in 0..state.tuning.max_live_projectiles {
            let id = state.next_entity_id();
            state.projectiles.push(Projectile {
                id,
                pos: Vec2::new(600.0, 100.0),
                vel: Vec2::ZERO,
                rotation: 0.0,
                rotation_speed: 0.0,
                kind: ProjectileKind::Fruit,
                glyph: '🍌',
                color: [250, 204, 21],
                radius: 70.0,
                sliced: false,
            });
        }

        tick(&mut state, &input_at(5_000.0));
        assert_eq!(
            state.projectiles.len(),
            state.tuning.max_live_projectiles,
            "cap must hold even long past the spawn interval"
        );
    }

    #[test]
    fn dwell_button_starts_after_threshold() {
        let mut state = SimState::new(17);
        // raw sample aimed at the menu button center (640, 420)
        let raw = Vec2::new(640.0 / VIEW.x, 420.0 / VIEW.y);

        let mut started_at = None;
        for frame in 0..150u32 {
            let now = f64::from(frame) * 16.0;
            let input = TickInput {
                now_ms: now,
                view: VIEW,
                pointer: Some(raw),
                hand_present: true,
                start: false,
            };
            let events = tick(&mut state, &input);
            if events.round_started {
                started_at = Some(now);
                break;
            }
        }

        let started_at = started_at.expect("dwell start never fired");
        assert!(
            started_at > state.tuning.dwell_ms,
            "started after only {started_at}ms"
        );
        assert!(started_at < state.tuning.dwell_ms + 500.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn losing_the_hand_resets_dwell() {
        let mut state = SimState::new(17);
        let raw = Vec2::new(640.0 / VIEW.x, 420.0 / VIEW.y);

        for frame in 0..200u32 {
            // hand disappears for one frame every 800ms, so an unreset
            // dwell clock would fire around the 96th frame
            let hand_present = frame % 50 != 49;
            let input = TickInput {
                now_ms: f64::from(frame) * 16.0,
                view: VIEW,
                pointer: Some(raw),
                hand_present,
                start: false,
            };
            let events = tick(&mut state, &input);
            assert!(!events.round_started, "dwell should never complete");
        }
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn menu_never_runs_projectile_logic() {
        let mut state = SimState::new(23);
        for frame in 0..200u32 {
            tick(&mut state, &input_at(f64::from(frame) * 16.0));
        }
        assert!(state.projectiles.is_empty());
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn residual_effects_decay_after_game_over() {
        let mut state = SimState::new(29);
        tick(&mut state, &start_input(0.0));
        tick(&mut state, &input_at(61_000.0));
        assert_eq!(state.phase, GamePhase::GameOver);

        state.particles.push(Particle {
            id: 900,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            life: 0.1,
            color: [255, 255, 255],
            kind: ParticleKind::Debris { size: 4.0 },
        });
        for i in 0..3 {
            tick(&mut state, &input_at(61_100.0 + f64::from(i) * 16.0));
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn trail_caps_and_thins() {
        let mut state = SimState::new(31);
        let raw = Vec2::new(0.5, 0.5);
        for frame in 0..30u32 {
            let input = TickInput {
                now_ms: f64::from(frame) * 16.0,
                view: VIEW,
                pointer: Some(raw),
                hand_present: true,
                start: false,
            };
            tick(&mut state, &input);
            assert!(state.pointer.trail.len() <= state.tuning.trail_capacity);
        }
        let filled = state.pointer.trail.len();
        assert!(filled >= state.tuning.trail_capacity - 1);

        // hand gone: trail drains one sample per tick
        for expected in (0..filled).rev() {
            tick(&mut state, &input_at(1_000.0));
            assert_eq!(state.pointer.trail.len(), expected);
        }
    }

    #[test]
    fn end_to_end_slice_through_tick() {
        let mut state = SimState::new(37);
        tick(&mut state, &start_input(0.0));
        state.projectiles.push(Projectile {
            id: 700,
            pos: Vec2::new(640.0, 360.0),
            vel: Vec2::ZERO,
            rotation: 0.0,
            rotation_speed: 0.0,
            kind: ProjectileKind::Fruit,
            glyph: '🍉',
            color: [255, 85, 85],
            radius: 70.0,
            sliced: false,
        });
        state.pointer.pos = Vec2::new(640.0, 360.0);

        let input = TickInput {
            now_ms: 100.0,
            view: VIEW,
            pointer: Some(Vec2::new(0.5, 0.5)),
            hand_present: true,
            start: false,
        };
        tick(&mut state, &input);

        assert_eq!(state.stats.score, 5);
        assert_eq!(state.stats.fruits_sliced, 1);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.halves.len(), 2);
    }
}
