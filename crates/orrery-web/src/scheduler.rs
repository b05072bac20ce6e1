use orrery_engine::Game;
use crate::runner::GameRunner;

/// Source of display frames.
///
/// The runner asks for the next frame at the end of every tick unless it
/// has been stopped. In the browser the host owns `requestAnimationFrame`;
/// tests drive frames by hand.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Records whether the runner asked for another frame during this call.
/// The host reads the flag through the `game_frame` return value.
#[derive(Debug, Default)]
pub struct HostScheduler {
    requested: bool,
}

impl HostScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return and clear the pending request flag.
    pub fn take_request(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }
}

impl FrameScheduler for HostScheduler {
    fn request_frame(&mut self) {
        self.requested = true;
    }
}

/// Deterministic scheduler that runs queued frames synchronously, up to a budget.
#[derive(Debug)]
pub struct ManualScheduler {
    budget: u64,
    pending: bool,
    requests: u64,
}

impl ManualScheduler {
    pub fn new(budget: u64) -> Self {
        Self {
            budget,
            pending: false,
            requests: 0,
        }
    }

    /// Number of frame requests received so far.
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Run the first frame, then keep running while frames are requested and
    /// the budget allows. Returns the number of frames run.
    pub fn run<G: Game>(&mut self, runner: &mut GameRunner<G>) -> u64 {
        let mut frames = 0;
        self.pending = true;
        while self.pending && frames < self.budget {
            self.pending = false;
            runner.frame(self);
            frames += 1;
        }
        frames
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requests += 1;
    }
}
