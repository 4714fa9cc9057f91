//! Run state machine and frame scheduling
//!
//! `Game` owns the simulation context and drives it one tick per display
//! frame. Frames are requested with a [`FrameTicket`]; every transition out of
//! `Active` invalidates outstanding tickets, so a frame callback that was
//! already queued can never mutate a finished or abandoned run.

use rand_pcg::Pcg32;
use serde::Serialize;

use crate::best_score::{BestScore, Outcome};
use crate::persistence::{MemoryStore, ScoreStore};
use crate::sim::{
    Collectible, FeedbackEvent, Flyer, GameEvent, GameMode, GameState, Obstacle, RandomSource,
    RngSource, RunState, TickInput, TickOutcome, spawn_collectible, spawn_obstacle, tick,
};
use crate::consts::INITIAL_COLLECTIBLE_OFFSET;
use crate::tuning::Tuning;

/// Permission to run frames for one scheduling generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTicket {
    generation: u64,
}

/// What the frame driver should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRequest {
    /// Schedule another frame with this ticket
    Continue(FrameTicket),
    /// Stop scheduling
    Stop,
}

/// Read-only view handed to presentation after each frame.
///
/// Collected coins stay in `collectibles` (flagged) until the next tick drops them.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub flyer: &'a Flyer,
    pub obstacles: &'a [Obstacle],
    pub collectibles: &'a [Collectible],
    pub feedback: &'a [FeedbackEvent],
    pub score: u32,
    pub best_score: u32,
    pub run_state: RunState,
    pub mode: GameMode,
}

/// Everything presentation needs after a frame: the snapshot plus the events
/// drained that frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport<'a> {
    #[serde(flatten)]
    pub snapshot: Snapshot<'a>,
    pub events: Vec<GameEvent>,
}

/// Game orchestrator
pub struct Game<S = RngSource<Pcg32>, P = MemoryStore> {
    state: GameState,
    tuning: Tuning,
    rng: S,
    store: P,
    best: BestScore,
    input: TickInput,
    /// Bumped whenever scheduling must stop
    generation: u64,
}

impl<P: ScoreStore> Game<RngSource<Pcg32>, P> {
    /// Default tuning with a seeded PCG stream
    pub fn with_seed(seed: u64, store: P) -> Self {
        Self::new(Tuning::default(), RngSource::seeded(seed), store)
    }
}

impl<S: RandomSource, P: ScoreStore> Game<S, P> {
    /// Create a game parked in the menu. The best score is read once, here.
    pub fn new(tuning: Tuning, rng: S, store: P) -> Self {
        let best = BestScore::load(&store);
        Self {
            state: GameState::new(),
            tuning,
            rng,
            store,
            best,
            input: TickInput::default(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.best.value
    }

    /// Begin a fresh run in `mode` (menu selection or restart)
    pub fn start(&mut self, mode: GameMode) {
        self.cancel_frames();
        self.input = TickInput::default();

        self.state.mode = mode;
        self.state.clear_run(&self.tuning);

        let width = self.tuning.playfield_width;
        if let Some(obstacle) = spawn_obstacle(&mut self.state, &self.tuning, &mut self.rng, width)
        {
            self.state.obstacles.push(obstacle);
        }
        let coin_x = width + INITIAL_COLLECTIBLE_OFFSET;
        let coin = spawn_collectible(&mut self.state, &self.tuning, &mut self.rng, coin_x);
        self.state.collectibles.push(coin);

        self.state.run_state = RunState::Active;
        log::info!("Run started in {} mode", mode.as_str());
    }

    /// Try again with the same mode. Only valid after a crash.
    pub fn retry(&mut self) -> bool {
        if self.state.run_state != RunState::Ended {
            return false;
        }
        self.start(self.state.mode);
        true
    }

    /// Back to the menu; the best score is untouched
    pub fn return_to_menu(&mut self) {
        if self.state.run_state == RunState::Idle {
            return;
        }
        self.cancel_frames();
        self.input = TickInput::default();
        self.state.clear_run(&self.tuning);
        self.state.run_state = RunState::Idle;
        log::info!("Returned to menu");
    }

    /// Flap. Ignored unless a run is active; applied at the start of the next tick.
    pub fn trigger_impulse(&mut self) {
        if self.state.is_active() {
            self.input.flap = true;
        }
    }

    /// Ticket for the frame loop of the current run
    pub fn begin_frames(&self) -> Option<FrameTicket> {
        self.state.is_active().then_some(FrameTicket {
            generation: self.generation,
        })
    }

    /// Invalidate every outstanding ticket. Safe to call repeatedly.
    pub fn cancel_frames(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Run one frame if `ticket` is still current
    pub fn frame(&mut self, ticket: FrameTicket, now_ms: f64) -> FrameRequest {
        if ticket.generation != self.generation || !self.state.is_active() {
            return FrameRequest::Stop;
        }

        let input = std::mem::take(&mut self.input);
        match tick(&mut self.state, &self.tuning, &mut self.rng, &input, now_ms) {
            TickOutcome::Running => FrameRequest::Continue(ticket),
            TickOutcome::Crashed(cause) => {
                log::info!("Crashed ({:?}) with score {}", cause, self.state.score);
                self.finish_run();
                FrameRequest::Stop
            }
            TickOutcome::Skipped => FrameRequest::Stop,
        }
    }

    fn finish_run(&mut self) {
        self.cancel_frames();
        if self.best.record(self.state.score) {
            log::info!("New best score: {}", self.best.value);
            self.best.save(&mut self.store);
        }
    }

    /// End-of-run message tier, once the run has ended
    pub fn outcome(&self) -> Option<Outcome> {
        (self.state.run_state == RunState::Ended).then(|| Outcome::from_score(self.state.score))
    }

    /// Events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Drain this frame's events and pair them with the current snapshot
    pub fn frame_report(&mut self) -> FrameReport<'_> {
        let events = self.drain_events();
        FrameReport {
            snapshot: self.snapshot(),
            events,
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            flyer: &self.state.flyer,
            obstacles: &self.state.obstacles,
            collectibles: &self.state.collectibles,
            feedback: &self.state.feedback,
            score: self.state.score,
            best_score: self.best.value,
            run_state: self.state.run_state,
            mode: self.state.mode,
        }
    }
}

/// Demo pilot: decide whether to flap this frame.
///
/// Aims for the wider side of the nearest obstacle ahead, else for the next
/// coin. Only flaps while falling, so each flap starts near the top of an arc.
pub fn autopilot_wants_flap(state: &GameState, tuning: &Tuning) -> bool {
    const LOOK_AHEAD: f32 = 250.0;
    const CLEARANCE: f32 = 30.0;
    let flyer = &state.flyer;

    let threat = state
        .obstacles
        .iter()
        .find(|o| o.x + o.width >= flyer.x && o.x <= flyer.x + flyer.width + LOOK_AHEAD);

    let target = match threat {
        Some(o) => {
            let room_above = o.y;
            let room_below = tuning.playfield_height - (o.y + o.height);
            if room_above > room_below {
                o.y - flyer.height - CLEARANCE
            } else {
                o.y + o.height + CLEARANCE
            }
        }
        None => state
            .collectibles
            .iter()
            .find(|c| !c.collected && c.x + c.width >= flyer.x)
            .map(|c| c.y)
            .unwrap_or(tuning.playfield_height / 2.0),
    };

    // Keep arcs clear of the ceiling and floor
    let low = 150.0;
    let high = (tuning.playfield_height - 120.0).max(low);
    flyer.y > target.clamp(low, high) && flyer.velocity > 0.0
}
