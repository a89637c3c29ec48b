//! Countdown state of a single Pomodoro run

use serde::{Deserialize, Serialize};

use super::CycleKind;

/// Outcome of a single countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running, nothing changed
    Inactive,
    /// One second elapsed, the run continues
    Ticked { remaining_seconds: u32 },
    /// The run reached zero and stopped
    Completed { cycle: CycleKind },
}

/// Timer state for tracking a work/break countdown
///
/// `total_duration_seconds == 0` is the idle state (nothing configured),
/// which is distinct from a run that finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub cycle: CycleKind,
    pub total_duration_seconds: u32,
    pub remaining_seconds: u32,
    pub is_running: bool,
}

impl TimerState {
    /// Create an idle timer state
    pub fn new() -> Self {
        Self {
            cycle: CycleKind::Work,
            total_duration_seconds: 0,
            remaining_seconds: 0,
            is_running: false,
        }
    }

    /// Create a running timer state of the given length
    pub fn running(cycle: CycleKind, minutes: u32) -> Self {
        let seconds = minutes * 60;
        Self {
            cycle,
            total_duration_seconds: seconds,
            remaining_seconds: seconds,
            is_running: true,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.total_duration_seconds == 0
    }

    pub fn is_completed(&self) -> bool {
        self.total_duration_seconds > 0 && self.remaining_seconds == 0
    }

    /// Begin a new run, replacing whatever was configured
    pub fn start(&mut self, cycle: CycleKind, minutes: u32) {
        *self = Self::running(cycle, minutes);
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running {
            return TickOutcome::Inactive;
        }
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            return TickOutcome::Ticked { remaining_seconds: self.remaining_seconds };
        }
        self.is_running = false;
        TickOutcome::Completed { cycle: self.cycle }
    }

    /// Return to idle, keeping the last cycle kind
    pub fn reset(&mut self) {
        self.total_duration_seconds = 0;
        self.remaining_seconds = 0;
        self.is_running = false;
    }

    /// Fraction of the run still remaining, 1.0 when not running
    pub fn progress(&self) -> f64 {
        if !self.is_running || self.total_duration_seconds == 0 {
            return 1.0;
        }
        let total = f64::from(self.total_duration_seconds);
        let elapsed = f64::from(self.total_duration_seconds - self.remaining_seconds);
        1.0 - elapsed / total
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
