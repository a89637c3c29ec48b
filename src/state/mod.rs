//! State management module
//!
//! This module contains the widget models and the application state that
//! owns them together with their timers and audio channels.

pub mod app_state;
pub mod clock;
pub mod cycle;
pub mod display;
pub mod duration_input;
pub mod pomodoro;
pub mod suggestion;
pub mod timer_state;
pub mod water_reminder;

// Re-export main types
pub use app_state::{ActionError, AppState};
pub use clock::ClockFace;
pub use cycle::CycleKind;
pub use display::{ClickTarget, DisplayContent};
pub use duration_input::DurationInput;
pub use pomodoro::{Pomodoro, PomodoroSnapshot};
pub use suggestion::Suggestion;
pub use timer_state::{TickOutcome, TimerState};
pub use water_reminder::{Notification, NotificationPhase, WaterReminder};
