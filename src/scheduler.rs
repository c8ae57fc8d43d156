use std::time::{Duration, Instant};

/// Fixed-cadence tick source driving the game loop.
pub trait Scheduler {
    /// How long the loop may wait for input before the next tick is due.
    fn time_until_tick(&self) -> Duration;

    /// True at most once per elapsed interval; consumes that tick.
    fn take_tick(&mut self) -> bool;

    /// Restart the cadence from now, e.g. when a new game begins.
    fn restart(&mut self);
}

/// Wall-clock scheduler. Missed intervals are not replayed: a late tick just
/// pushes the next deadline one interval past now.
pub struct IntervalScheduler {
    interval: Duration,
    next_tick: Instant,
}

impl IntervalScheduler {
    pub fn new(interval: Duration) -> Self {
        IntervalScheduler { interval, next_tick: Instant::now() + interval }
    }
}

impl Scheduler for IntervalScheduler {
    fn time_until_tick(&self) -> Duration {
        self.next_tick.saturating_duration_since(Instant::now())
    }

    fn take_tick(&mut self) -> bool {
        let now = Instant::now();
        if now < self.next_tick {
            return false;
        }

        self.next_tick += self.interval;
        if self.next_tick <= now {
            self.next_tick = now + self.interval;
        }
        true
    }

    fn restart(&mut self) {
        self.next_tick = Instant::now() + self.interval;
    }
}

/// Scheduler advanced by hand, so loops can be driven without sleeping.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    due: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ticks: u32) {
        self.due += ticks;
    }

    pub fn pending(&self) -> u32 {
        self.due
    }
}

impl Scheduler for ManualScheduler {
    fn time_until_tick(&self) -> Duration {
        Duration::ZERO
    }

    fn take_tick(&mut self) -> bool {
        if self.due == 0 {
            return false;
        }
        self.due -= 1;
        true
    }

    fn restart(&mut self) {
        self.due = 0;
    }
}
