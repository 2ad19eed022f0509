//! End-of-round rank feedback
//!
//! A finished round's stats go to an opaque, possibly slow oracle that
//! answers with a flavor title and description. The driver runs whichever
//! oracle it was given on a background thread and keeps ticking; responses
//! are tagged with the round they were requested for so a slow answer can
//! never overwrite a newer round's result.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::sim::RoundResult;

/// Flavor text for a finished round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankText {
    pub title: String,
    pub description: String,
}

impl RankText {
    fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    /// Used when the oracle times out or fails
    pub fn fallback() -> Self {
        Self::new(
            "Blade for Hire",
            "The judges lost their notes, but the arena remembers your run.",
        )
    }
}

/// Maps final round stats to flavor text.
///
/// Treated as a black box by the simulation: it may be slow, it must not
/// touch game state.
pub trait FeedbackOracle: Send + Sync + 'static {
    fn rank(&self, score: u32, fruits_sliced: u32, hazards_hit: u32) -> RankText;
}

/// Static rule-table oracle: tiers of 10 points up to 100, tiers of 100
/// beyond, with a priority override for hazard-happy rounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankTable {
    /// Artificial thinking time, so hosts can show the analyzing state
    latency: Duration,
}

impl RankTable {
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl FeedbackOracle for RankTable {
    fn rank(&self, score: u32, _fruits_sliced: u32, hazards_hit: u32) -> RankText {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }

        if hazards_hit >= 3 {
            return RankText::new(
                "Demolition Artist",
                "Art is an explosion. The fruit was mostly decoration.",
            );
        }

        if score < 100 {
            match score / 10 {
                0 => RankText::new("Air Slicer", "Plenty of wind, not a lot of fruit."),
                1 => RankText::new("Kitchen Intern", "Shaky knife work. Mind your fingers."),
                2 => RankText::new("Fruit Peeler", "Clean peels, but we asked for slices."),
                3 => RankText::new("Salad Hand", "A respectable, evenly cut bowl."),
                4 => RankText::new("Juice Apprentice", "Somewhere between slicing and juicing."),
                5 => RankText::new("Junior Ninja", "The path of the blade is opening to you."),
                6 => RankText::new("Keen Edge", "The fruit has started to fear you."),
                7 => RankText::new("Quickhand", "Fast enough to leave afterimages."),
                8 => RankText::new("Blade Dancer", "Cutting fruit like choreography."),
                _ => RankText::new("Combo Master", "A whisker away from the hundred mark."),
            }
        } else {
            match score / 100 {
                1 => RankText::new("Gale Blade", "Death comes like the wind; so does lunch."),
                2 => RankText::new("Thunderstrike", "Fast as lightning, twice as loud."),
                3 => RankText::new("Shadow Sovereign", "The fruit never saw the edge."),
                4 => RankText::new("Peerless Saber", "One blade, no equal."),
                5 => RankText::new("Galaxy Splitter", "Your arc could cut a river of stars."),
                _ => RankText::new("Cosmic Legend", "No fruit in this dimension can stop you."),
            }
        }
    }
}

/// An in-flight feedback request
///
/// The oracle call runs on its own thread; `poll` never blocks. Dropping
/// the handle abandons the request (the worker's send just fails).
pub struct PendingFeedback {
    round: u32,
    rx: mpsc::Receiver<RankText>,
    sent_at: Instant,
    timeout: Duration,
}

impl PendingFeedback {
    /// Fire the oracle for `result` off-thread
    pub fn spawn(oracle: Arc<dyn FeedbackOracle>, result: &RoundResult, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let (round, score) = (result.round, result.score);
        let (fruits, hazards) = (result.fruits_sliced, result.hazards_hit);

        thread::spawn(move || {
            let rank = panic::catch_unwind(AssertUnwindSafe(|| oracle.rank(score, fruits, hazards)))
                .unwrap_or_else(|_| {
                    log::warn!("feedback oracle panicked for round {round}");
                    RankText::fallback()
                });
            // The driver may have stopped or moved on; that is fine
            let _ = tx.send(rank);
        });

        Self {
            round,
            rx,
            sent_at: Instant::now(),
            timeout,
        }
    }

    /// Round this request was made for
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Non-blocking poll. `Some` means the request is finished one way or
    /// another and should be dropped by the caller; timeouts and worker
    /// failures degrade to the fallback rank rather than hanging forever.
    pub fn poll(&self) -> Option<RankText> {
        match self.rx.try_recv() {
            Ok(rank) => Some(rank),
            Err(mpsc::TryRecvError::Disconnected) => {
                log::warn!("feedback worker for round {} went away", self.round);
                Some(RankText::fallback())
            }
            Err(mpsc::TryRecvError::Empty) => {
                if self.sent_at.elapsed() >= self.timeout {
                    log::warn!("feedback for round {} timed out", self.round);
                    Some(RankText::fallback())
                } else {
                    None
                }
            }
        }
    }
}
