use std::time::{Duration, Instant};

use rand::rngs::ThreadRng;
use tracing::{debug, info};

use crate::config::Config;
use crate::controller::Controller;
use crate::error::Result;
use crate::input::{command_for, Command};
use crate::render::Palette;
use crate::store::ScoreStore;
use crate::term::{read_key_events, TermManager};
use crate::view::TerminalView;

/// Longest wait for input between timer checks.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// The interactive terminal game: keyboard in, timers in between, a
/// `TerminalView` redrawing on every state change.
pub struct SnakeGame<S: ScoreStore> {
    controller: Controller<S, ThreadRng>,
}

impl<S: ScoreStore> SnakeGame<S> {
    pub fn new(config: &Config, store: S) -> Result<Self> {
        let mut controller = Controller::new(config, store, rand::thread_rng());
        let view = TerminalView::new(TermManager::new()?, config.grid(), Palette::default())?;
        controller.subscribe(Box::new(view));
        Ok(SnakeGame { controller })
    }

    /// Runs until the player quits. The terminal is handed back on return,
    /// including when an error cuts the loop short.
    pub fn play(&mut self) -> Result<()> {
        info!("session started");
        let outcome = self.event_loop();
        self.controller.shutdown();
        info!("session ended");
        outcome
    }

    fn event_loop(&mut self) -> Result<()> {
        loop {
            let now = Instant::now();
            let wait = self
                .controller
                .time_until_due(now)
                .map_or(POLL_INTERVAL, |due| due.min(POLL_INTERVAL));

            for key_ev in read_key_events(wait)? {
                match command_for(&key_ev) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Start) => {
                        self.controller.start(Instant::now());
                    }
                    Some(Command::Steer(velocity)) => {
                        if !self.controller.steer(velocity) {
                            debug!(?velocity, "turn rejected");
                        }
                    }
                    None => {}
                }
            }

            self.controller.advance(Instant::now());
        }
    }
}
