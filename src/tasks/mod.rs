//! Background tasks module
//!
//! This module contains the timer tasks that drive the widgets and the
//! handle type that owns them.

pub mod countdown;
pub mod scoped;
pub mod water_reminder;

// Re-export main types and functions
pub use countdown::countdown_task;
pub use scoped::ScopedTask;
pub use water_reminder::water_reminder_task;
