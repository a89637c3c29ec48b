//! Water reminder background task

use std::{sync::Weak, time::Duration};
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::state::AppState;

/// Finish the notification exit, then bring the reminder back after `interval`.
pub async fn water_reminder_task(state: Weak<AppState>, exit_delay: Duration, interval: Duration) {
    sleep(exit_delay).await;

    let reschedule = match state.upgrade().map(|state| state.finish_water_exit()) {
        Some(Ok(reschedule)) => reschedule,
        Some(Err(e)) => {
            error!("Failed to hide water reminder: {}", e);
            return;
        }
        None => return,
    };
    if !reschedule {
        return;
    }

    debug!("Water reminder sleeping for {:?}", interval);
    sleep(interval).await;

    match state.upgrade() {
        Some(state) => {
            if let Err(e) = state.remind_water() {
                error!("Failed to show water reminder: {}", e);
            }
        }
        None => info!("Application state gone, dropping water reminder"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        config::Config,
        services::{AudioAsset, AudioEvent, SilentAudioCue},
        state::{AppState, NotificationPhase},
    };
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn acknowledged_reminder_comes_back_after_the_interval() {
        let water = Arc::new(SilentAudioCue::new());
        let state = Arc::new(AppState::with_audio(
            &Config::default(),
            Arc::new(SilentAudioCue::new()),
            water.clone(),
        ));

        assert!(state.acknowledge_water().unwrap());
        assert!(!state.acknowledge_water().unwrap());
        assert_eq!(state.water_snapshot().unwrap().0.notification.phase, NotificationPhase::Closing);

        sleep(Duration::from_millis(400)).await;
        let (reminder, playing) = state.water_snapshot().unwrap();
        assert_eq!(reminder.notification.phase, NotificationPhase::Hidden);
        assert!(!playing);

        sleep(Duration::from_secs(20 * 60)).await;
        let (reminder, playing) = state.water_snapshot().unwrap();
        assert!(reminder.is_showing());
        assert_eq!(reminder.reminders_sent, 1);
        assert!(playing);
        assert_eq!(
            water.events(),
            vec![
                AudioEvent::Stop,
                AudioEvent::Prime(AudioAsset::WaterReminder),
                AudioEvent::Play(AudioAsset::WaterReminder),
            ]
        );
    }
}
