//! Frame scheduling and collaborator wiring
//!
//! The driver owns the `SimState` and runs the per-frame loop: sample the
//! pointer source, tick the simulation, poll any in-flight feedback
//! request, hand the snapshot to the presenter, then sleep off the rest of
//! the frame budget. A shared stop token cancels the loop between frames,
//! which also abandons whatever was pending.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use glam::Vec2;

use crate::feedback::{FeedbackOracle, PendingFeedback, RankText};
use crate::sim::{RenderSnapshot, SimState, TickInput, tick};

/// Default frame cadence (60 Hz)
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Latest reading from the gesture tracker
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSample {
    /// Normalized position in [0,1]², if the tracker has one
    pub pos: Option<Vec2>,
    /// Whether a hand is currently visible
    pub hand_present: bool,
}

/// Input collaborator: produces pointer samples at its own rate.
///
/// Called once per frame; returning the same sample repeatedly is fine
/// when the tracker runs slower than the frame loop.
pub trait PointerSource {
    fn sample(&mut self) -> PointerSample;
}

/// Output collaborator: receives the render-ready state once per tick
pub trait Presenter {
    fn present(&mut self, frame: &RenderSnapshot<'_>);
}

/// Cancels a running `FrameDriver`, possibly from another thread
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The per-frame scheduling loop composing the whole game
pub struct FrameDriver<I, P> {
    state: SimState,
    view: Vec2,
    input: I,
    presenter: P,
    oracle: Arc<dyn FeedbackOracle>,
    pending: Option<PendingFeedback>,
    stop: StopHandle,
    frame_interval: Duration,
    feedback_timeout: Duration,
    start_requested: bool,
}

impl<I: PointerSource, P: Presenter> FrameDriver<I, P> {
    pub fn new(
        state: SimState,
        view: Vec2,
        input: I,
        presenter: P,
        oracle: Arc<dyn FeedbackOracle>,
        stop: StopHandle,
    ) -> Self {
        let feedback_timeout = Duration::from_millis(state.tuning.feedback_timeout_ms);
        Self {
            state,
            view,
            input,
            presenter,
            oracle,
            pending: None,
            stop,
            frame_interval: FRAME_INTERVAL,
            feedback_timeout,
            start_requested: false,
        }
    }

    /// Override the 60 Hz default
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Queue the explicit start action for the next frame (host UI button)
    pub fn request_start(&mut self) {
        self.start_requested = true;
    }

    /// Run frames until the stop token is set
    pub fn run(&mut self) {
        log::info!("frame driver running at {:?} per frame", self.frame_interval);
        let epoch = Instant::now();
        while !self.stop.is_stopped() {
            let frame_began = Instant::now();
            self.step(epoch);

            let spent = frame_began.elapsed();
            if let Some(rest) = self.frame_interval.checked_sub(spent) {
                thread::sleep(rest);
            }
        }
        log::info!("frame driver stopped");
    }

    /// One frame: sample input, tick, poll feedback, present
    fn step(&mut self, epoch: Instant) {
        let sample = self.input.sample();
        let input = TickInput {
            now_ms: epoch.elapsed().as_secs_f64() * 1000.0,
            view: self.view,
            pointer: sample.pos,
            hand_present: sample.hand_present,
            start: std::mem::take(&mut self.start_requested),
        };

        let events = tick(&mut self.state, &input);

        if let Some(result) = events.round_ended {
            self.pending = Some(PendingFeedback::spawn(
                self.oracle.clone(),
                &result,
                self.feedback_timeout,
            ));
        }
        if events.round_started {
            // a new round obsoletes whatever rank was being computed
            self.pending = None;
        }

        let finished = self
            .pending
            .as_ref()
            .and_then(|p| p.poll().map(|rank| (p.round(), rank)));
        if let Some((round, rank)) = finished {
            self.pending = None;
            self.apply_rank(round, rank);
        }

        self.presenter.present(&self.state.snapshot());
    }

    /// Write a resolved rank into the matching round's result; answers for
    /// rounds that are no longer current are discarded
    fn apply_rank(&mut self, round: u32, rank: RankText) {
        if round != self.state.round {
            log::debug!(
                "discarding stale rank for round {round} (current {})",
                self.state.round
            );
            return;
        }
        if let Some(result) = &mut self.state.last_result {
            result.rank_title = rank.title;
            result.rank_description = rank.description;
        }
        self.state.analyzing = false;
    }
}
