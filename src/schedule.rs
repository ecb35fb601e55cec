use std::time::{Duration, Instant};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerKind {
    Countdown,
    Gameplay,
}

#[derive(Copy, Clone, Debug)]
struct ActiveTimer {
    kind: TimerKind,
    period: Duration,
    due: Instant,
}

/// Owns at most one periodic timer. Arming replaces whatever was running, so
/// a timer from a previous state can never fire after a transition.
#[derive(Debug, Default)]
pub struct Scheduler {
    active: Option<ActiveTimer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Scheduler { active: None }
    }

    pub fn arm(&mut self, kind: TimerKind, period: Duration, now: Instant) {
        self.active = Some(ActiveTimer { kind, period, due: now + period });
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<TimerKind> {
        self.active.map(|timer| timer.kind)
    }

    pub fn period(&self) -> Option<Duration> {
        self.active.map(|timer| timer.period)
    }

    /// Changes the period of the running timer; the pending deadline is kept.
    pub fn set_period(&mut self, period: Duration) {
        if let Some(timer) = self.active.as_mut() {
            timer.period = period;
        }
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.active.map(|timer| timer.due.saturating_duration_since(now))
    }

    /// Fires the active timer if it is due. Fires at most once per deadline;
    /// missed periods are dropped rather than replayed in a burst.
    pub fn poll(&mut self, now: Instant) -> Option<TimerKind> {
        let timer = self.active.as_mut()?;
        if now < timer.due {
            return None;
        }

        timer.due += timer.period;
        if timer.due <= now {
            timer.due = now + timer.period;
        }
        Some(timer.kind)
    }
}
