use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::{Config, SpeedRamp};
use crate::rules::{Board, Collision, TickOutcome};
use crate::schedule::{Scheduler, TimerKind};
use crate::snake::Velocity;
use crate::store::ScoreStore;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Countdown(u32),
    Running,
    Lost,
}

impl Status {
    /// Whether the start control is available.
    pub fn can_start(self) -> bool {
        matches!(self, Status::Idle | Status::Lost)
    }
}

/// A read-only snapshot handed to observers after every state change.
pub struct Frame<'a> {
    pub status: Status,
    pub board: &'a Board,
    pub highscore: u32,
    pub new_record: bool,
    pub crash: Option<Collision>,
}

impl Frame<'_> {
    /// The best score to display: the stored one, or the running score once
    /// it has overtaken it.
    pub fn best(&self) -> u32 {
        self.highscore.max(self.board.score())
    }
}

pub trait Observer {
    fn notify(&mut self, frame: &Frame<'_>);
}

pub struct Controller<S: ScoreStore, R: Rng> {
    board: Board,
    status: Status,
    highscore: u32,
    new_record: bool,
    crash: Option<Collision>,
    scheduler: Scheduler,
    ramp: SpeedRamp,
    countdown_from: u32,
    countdown_period: Duration,
    store: S,
    rng: R,
    observers: Vec<Box<dyn Observer>>,
}

impl<S: ScoreStore, R: Rng> Controller<S, R> {
    /// Reads the stored highscore once; an unreadable store counts as zero.
    pub fn new(config: &Config, store: S, rng: R) -> Self {
        let highscore = match store.load() {
            Ok(score) => score.unwrap_or(0),
            Err(e) => {
                warn!(error = %e, "could not read highscore, starting from zero");
                0
            }
        };

        Controller {
            board: Board::new(config.grid()),
            status: Status::Idle,
            highscore,
            new_record: false,
            crash: None,
            scheduler: Scheduler::new(),
            ramp: config.speed_ramp(),
            countdown_from: config.countdown_from,
            countdown_period: config.countdown_period(),
            store,
            rng,
            observers: vec![],
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn highscore(&self) -> u32 {
        self.highscore
    }

    pub fn new_record(&self) -> bool {
        self.new_record
    }

    pub fn crash(&self) -> Option<Collision> {
        self.crash
    }

    pub fn active_timer(&self) -> Option<TimerKind> {
        self.scheduler.active()
    }

    pub fn tick_interval(&self) -> Option<Duration> {
        match self.scheduler.active() {
            Some(TimerKind::Gameplay) => self.scheduler.period(),
            _ => None,
        }
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_due(now)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers an observer and immediately shows it the current state.
    pub fn subscribe(&mut self, mut observer: Box<dyn Observer>) {
        observer.notify(&self.frame());
        self.observers.push(observer);
    }

    /// Begins a new round with a countdown. Ignored while a round is under way.
    pub fn start(&mut self, now: Instant) -> bool {
        if !self.status.can_start() {
            return false;
        }

        self.board.reset(&mut self.rng);
        self.new_record = false;
        self.crash = None;
        self.status = Status::Countdown(self.countdown_from);
        self.scheduler.arm(TimerKind::Countdown, self.countdown_period, now);

        info!(highscore = self.highscore, "game starting");
        self.notify();
        true
    }

    /// Queues a direction for the next tick. Only honoured once a round has
    /// been started.
    pub fn steer(&mut self, velocity: Velocity) -> bool {
        match self.status {
            Status::Countdown(_) | Status::Running => self.board.steer(velocity),
            Status::Idle | Status::Lost => false,
        }
    }

    /// Fires whatever timer is due at `now`.
    pub fn advance(&mut self, now: Instant) {
        while let Some(kind) = self.scheduler.poll(now) {
            match kind {
                TimerKind::Countdown => self.on_countdown(now),
                TimerKind::Gameplay => self.on_tick(),
            }
        }
    }

    /// Stops every timer and drops all observers.
    pub fn shutdown(&mut self) {
        self.scheduler.cancel();
        self.observers.clear();
    }

    ///////////////////////////////////////////////////////////////////////////

    fn on_countdown(&mut self, now: Instant) {
        let remaining = match self.status {
            Status::Countdown(n) => n.saturating_sub(1),
            _ => return,
        };

        if remaining == 0 {
            let interval = self.ramp.interval(self.board.score());
            self.status = Status::Running;
            self.scheduler.arm(TimerKind::Gameplay, interval, now);
            debug!(?interval, "countdown finished");
        } else {
            self.status = Status::Countdown(remaining);
            debug!(remaining, "countdown");
        }

        self.notify();
    }

    fn on_tick(&mut self) {
        if self.status != Status::Running {
            return;
        }

        match self.board.tick(&mut self.rng) {
            TickOutcome::Crashed { cause, .. } => self.game_over(cause),
            TickOutcome::Moved { ate } => {
                if ate {
                    self.adjust_speed();
                }
                self.notify();
            }
        }
    }

    fn adjust_speed(&mut self) {
        let interval = self.ramp.interval(self.board.score());
        if self.scheduler.period() != Some(interval) {
            debug!(?interval, score = self.board.score(), "speed change");
            self.scheduler.set_period(interval);
        }
    }

    fn game_over(&mut self, cause: Collision) {
        self.scheduler.cancel();
        self.board.freeze();
        self.status = Status::Lost;
        self.crash = Some(cause);

        let score = self.board.score();
        if score > self.highscore {
            self.highscore = score;
            self.new_record = true;
            if let Err(e) = self.store.save(score) {
                warn!(error = %e, "could not save highscore");
            }
        }

        info!(score, highscore = self.highscore, new_record = self.new_record, ?cause, "game over");
        self.notify();
    }

    fn frame(&self) -> Frame<'_> {
        Frame {
            status: self.status,
            board: &self.board,
            highscore: self.highscore,
            new_record: self.new_record,
            crash: self.crash,
        }
    }

    fn notify(&mut self) {
        // Observers cannot reach the controller, so none are added meanwhile.
        let mut observers = std::mem::take(&mut self.observers);
        let frame = self.frame();
        for observer in observers.iter_mut() {
            observer.notify(&frame);
        }
        self.observers = observers;
    }
}

impl<S: ScoreStore, R: Rng> Drop for Controller<S, R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
