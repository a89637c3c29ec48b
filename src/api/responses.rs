//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{ClickTarget, ClockFace, CycleKind, PomodoroSnapshot, WaterReminder};

/// Body of PUT /pomodoro/duration, the raw text of the minutes field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationRequest {
    pub input: String,
}

/// Body of PUT /pomodoro/cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleRequest {
    pub cycle: CycleKind,
}

/// Body of POST /pomodoro/display/click
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickRequest {
    pub target: ClickTarget,
}

/// Response to every Pomodoro endpoint
#[derive(Debug, Clone, Serialize)]
pub struct PomodoroResponse {
    /// "ok" when the action applied, "ignored" when it did not apply
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub pomodoro: PomodoroSnapshot,
}

impl PomodoroResponse {
    pub fn new(status: &str, message: String, pomodoro: PomodoroSnapshot) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            pomodoro,
        }
    }

    pub fn ok(message: String, pomodoro: PomodoroSnapshot) -> Self {
        Self::new("ok", message, pomodoro)
    }

    pub fn ignored(message: String, pomodoro: PomodoroSnapshot) -> Self {
        Self::new("ignored", message, pomodoro)
    }
}

/// Water reminder state
#[derive(Debug, Clone, Serialize)]
pub struct WaterResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub reminder: WaterReminder,
    pub cue_playing: bool,
}

impl WaterResponse {
    pub fn new(status: &str, message: String, reminder: WaterReminder, cue_playing: bool) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            reminder,
            cue_playing,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClockResponse {
    #[serde(flatten)]
    pub face: ClockFace,
    pub timestamp: DateTime<Utc>,
}

/// Service status with every widget at a glance
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub pomodoro: PomodoroSnapshot,
    pub countdown_armed: bool,
    pub water: WaterReminder,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
