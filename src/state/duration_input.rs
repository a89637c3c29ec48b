//! Pending duration typed by the user before a run starts

use serde::Serialize;

pub const MIN_MINUTES: u32 = 1;
pub const MAX_MINUTES: u32 = 120;

/// Minute count entered in the configuration form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DurationInput {
    minutes: Option<u32>,
}

impl DurationInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn minutes(&self) -> Option<u32> {
        self.minutes
    }

    /// Apply raw form text.
    ///
    /// Blank text clears the pending value. Anything that is not a whole
    /// number in `1..=120` is ignored and the previous value stays. Returns
    /// whether the input was accepted.
    pub fn apply(&mut self, raw: &str) -> bool {
        let raw = raw.trim();
        if raw.is_empty() {
            self.minutes = None;
            return true;
        }
        match raw.parse::<i64>() {
            Ok(value) if (i64::from(MIN_MINUTES)..=i64::from(MAX_MINUTES)).contains(&value) => {
                self.minutes = Some(value as u32);
                true
            }
            _ => false,
        }
    }

    /// Set a known-valid minute count, as suggestions do
    pub fn set(&mut self, minutes: u32) {
        self.minutes = Some(minutes.clamp(MIN_MINUTES, MAX_MINUTES));
    }
}
