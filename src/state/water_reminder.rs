//! Notification banner and the water reminder built on it

use serde::Serialize;

/// Visibility phase of a notification banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPhase {
    /// Slid in and waiting for the action
    Showing,
    /// Action pressed, exit animation running
    Closing,
    Hidden,
}

/// Dismissible banner with one action button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub action_label: String,
    pub phase: NotificationPhase,
}

impl Notification {
    pub fn new(message: impl Into<String>, action_label: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action_label: action_label.into(),
            phase: NotificationPhase::Showing,
        }
    }

    /// Press the action button; starts the exit phase.
    /// Returns false if the banner is not showing.
    pub fn act(&mut self) -> bool {
        if self.phase != NotificationPhase::Showing {
            return false;
        }
        self.phase = NotificationPhase::Closing;
        true
    }

    /// Exit animation finished
    pub fn finish_exit(&mut self) -> bool {
        if self.phase != NotificationPhase::Closing {
            return false;
        }
        self.phase = NotificationPhase::Hidden;
        true
    }

    pub fn show(&mut self) {
        self.phase = NotificationPhase::Showing;
    }
}

/// Periodic nudge to drink water
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaterReminder {
    pub enabled: bool,
    pub interval_minutes: u64,
    pub notification: Notification,
    /// How many times the reminder came back after being acknowledged
    pub reminders_sent: u64,
}

impl WaterReminder {
    pub fn new(enabled: bool, interval_minutes: u64) -> Self {
        let mut notification = Notification::new("Time to drink some water!", "💧");
        if !enabled {
            notification.phase = NotificationPhase::Hidden;
        }
        Self {
            enabled,
            interval_minutes,
            notification,
            reminders_sent: 0,
        }
    }

    pub fn is_showing(&self) -> bool {
        self.notification.phase == NotificationPhase::Showing
    }

    /// Bring the banner back after the interval elapsed
    pub fn remind(&mut self) {
        self.notification.show();
        self.reminders_sent += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_goes_through_closing_before_hidden() {
        let mut notification = Notification::new("hello", "ok");
        assert!(!notification.finish_exit());
        assert!(notification.act());
        assert_eq!(notification.phase, NotificationPhase::Closing);
        assert!(!notification.act());
        assert!(notification.finish_exit());
        assert_eq!(notification.phase, NotificationPhase::Hidden);
    }

    #[test]
    fn reminder_starts_showing_when_enabled() {
        let reminder = WaterReminder::new(true, 20);
        assert!(reminder.is_showing());
        assert_eq!(reminder.notification.message, "Time to drink some water!");

        let disabled = WaterReminder::new(false, 20);
        assert!(!disabled.is_showing());
    }

    #[test]
    fn remind_shows_again_and_counts() {
        let mut reminder = WaterReminder::new(true, 20);
        reminder.notification.act();
        reminder.notification.finish_exit();
        reminder.remind();
        assert!(reminder.is_showing());
        assert_eq!(reminder.reminders_sent, 1);
    }
}
