//! Pomodesk - desk widgets served over HTTP
//!
//! This library provides a Pomodoro work/break timer with completion alarms
//! and next-cycle suggestions, a wall clock and a periodic water reminder,
//! all driven by tokio timers and exposed through a small JSON API.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
