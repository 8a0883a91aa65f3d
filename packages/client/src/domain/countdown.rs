//! Second-granularity countdown shared by the lobby and the arena.
//!
//! The value itself is pure: something else calls [`Countdown::tick`] once per
//! second (see `infrastructure::timer::CountdownTimer`). Expiry is reported
//! exactly once.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Idle,
    Running,
    Paused,
    Expired,
    Cancelled,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still running, with this many seconds left
    Running(u32),
    /// Reached zero on this tick
    Expired,
    /// Not running (idle, paused, cancelled or already expired)
    Inactive,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    total: u32,
    remaining: u32,
    state: CountdownState,
}

impl Countdown {
    pub fn new(total_secs: u32) -> Self {
        Self {
            total: total_secs,
            remaining: total_secs,
            state: CountdownState::Idle,
        }
    }

    /// Start or resume. Has no effect once expired or cancelled.
    pub fn start(&mut self) {
        if matches!(self.state, CountdownState::Idle | CountdownState::Paused) {
            self.state = CountdownState::Running;
        }
    }

    pub fn pause(&mut self) {
        if self.state == CountdownState::Running {
            self.state = CountdownState::Paused;
        }
    }

    pub fn cancel(&mut self) {
        if self.state != CountdownState::Expired {
            self.state = CountdownState::Cancelled;
        }
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Tick {
        if self.state != CountdownState::Running {
            return Tick::Inactive;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = CountdownState::Expired;
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn is_expired(&self) -> bool {
        self.state == CountdownState::Expired
    }

    /// Elapsed fraction in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        f64::from(self.total - self.remaining) / f64::from(self.total)
    }
}

/// `MM:SS` rendering of a number of seconds
pub fn format_mm_ss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
