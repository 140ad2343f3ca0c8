/// Result of one countdown step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountdownTick {
    pub remaining: u32,
    /// Set only on the step that moved remaining from 1 to 0.
    pub expired: bool,
}

/// One-unit-per-tick countdown. Holds no game rules; the owner decides what expiry means.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    running: bool,
}

impl Countdown {
    pub fn new(duration: u32) -> Self {
        Countdown {
            duration,
            remaining: duration,
            running: false,
        }
    }

    pub fn start(&mut self, duration: u32) {
        self.duration = duration;
        self.remaining = duration;
        self.running = duration > 0;
    }

    pub fn restart(&mut self) {
        self.start(self.duration);
    }

    /// Returns `None` when stopped or already expired.
    pub fn tick(&mut self) -> Option<CountdownTick> {
        if !self.running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        let expired = self.remaining == 0;
        if expired {
            self.running = false;
        }
        Some(CountdownTick {
            remaining: self.remaining,
            expired,
        })
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn elapsed(&self) -> u32 {
        self.duration.saturating_sub(self.remaining)
    }
}
