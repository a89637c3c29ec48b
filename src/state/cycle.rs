//! Cycle kinds and their per-kind presentation

use serde::{Deserialize, Serialize};

use crate::services::AudioAsset;

/// Named timer mode of a Pomodoro run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CycleKind {
    Work,
    ShortBreak,
    LongBreak,
}

impl CycleKind {
    pub const ALL: [CycleKind; 3] = [CycleKind::Work, CycleKind::ShortBreak, CycleKind::LongBreak];

    /// Wire name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleKind::Work => "WORK",
            CycleKind::ShortBreak => "SHORT_BREAK",
            CycleKind::LongBreak => "LONG_BREAK",
        }
    }

    /// Human readable name used in display headlines ("short break")
    pub fn label(&self) -> &'static str {
        match self {
            CycleKind::Work => "work",
            CycleKind::ShortBreak => "short break",
            CycleKind::LongBreak => "long break",
        }
    }

    /// Icon shown on the widget while a run of this kind is active
    pub fn icon(&self) -> &'static str {
        match self {
            CycleKind::Work => "🧠",
            CycleKind::ShortBreak => "☕",
            CycleKind::LongBreak => "🌴",
        }
    }

    /// Alarm played when a run of this kind completes
    pub fn completion_asset(&self) -> AudioAsset {
        match self {
            CycleKind::Work => AudioAsset::WorkAlarm,
            CycleKind::ShortBreak | CycleKind::LongBreak => AudioAsset::BreakAlarm,
        }
    }
}

impl Default for CycleKind {
    fn default() -> Self {
        CycleKind::Work
    }
}

impl std::fmt::Display for CycleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_names() {
        for cycle in CycleKind::ALL {
            let json = serde_json::to_string(&cycle).unwrap();
            assert_eq!(json, format!("\"{}\"", cycle.as_str()));
        }
        let parsed: CycleKind = serde_json::from_str("\"LONG_BREAK\"").unwrap();
        assert_eq!(parsed, CycleKind::LongBreak);
    }

    #[test]
    fn breaks_share_the_break_alarm() {
        assert_eq!(CycleKind::Work.completion_asset(), AudioAsset::WorkAlarm);
        assert_eq!(CycleKind::ShortBreak.completion_asset(), AudioAsset::BreakAlarm);
        assert_eq!(CycleKind::LongBreak.completion_asset(), AudioAsset::BreakAlarm);
    }
}
