//! Next-cycle suggestions offered after a run completes

use serde::{Deserialize, Serialize};

use super::CycleKind;

/// Work sessions up to this length earn the short break
const SHORT_WORK_SESSION_SECONDS: u32 = 25 * 60;

/// A proposed next cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub cycle: CycleKind,
    pub minutes: u32,
}

impl Suggestion {
    pub const fn new(cycle: CycleKind, minutes: u32) -> Self {
        Self { cycle, minutes }
    }

    /// Button caption, e.g. "5 min short break"
    pub fn caption(&self) -> String {
        match self.cycle {
            CycleKind::Work => format!("{} min work session", self.minutes),
            other => format!("{} min {}", self.minutes, other.label()),
        }
    }
}

/// Suggestions for the cycle that just finished after `total_duration_seconds`
pub fn suggestions_after(finished: CycleKind, total_duration_seconds: u32) -> Vec<Suggestion> {
    match finished {
        CycleKind::Work => {
            let short_minutes = if total_duration_seconds <= SHORT_WORK_SESSION_SECONDS { 5 } else { 10 };
            vec![
                Suggestion::new(CycleKind::ShortBreak, short_minutes),
                Suggestion::new(CycleKind::LongBreak, 15),
            ]
        }
        CycleKind::ShortBreak | CycleKind::LongBreak => vec![
            Suggestion::new(CycleKind::Work, 25),
            Suggestion::new(CycleKind::Work, 50),
        ],
    }
}
