//! Main application state management

use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    services::{AudioAsset, AudioCue, CommandAudioCue, SilentAudioCue},
    tasks::{countdown_task, water_reminder_task, ScopedTask},
};
use super::{
    display::ClickTarget, CycleKind, Pomodoro, PomodoroSnapshot, Suggestion, TickOutcome,
    TimerState, WaterReminder,
};

/// How long the notification exit animation runs before its action fires
pub const NOTIFICATION_EXIT_DELAY: Duration = Duration::from_millis(300);

/// Why a widget action did not happen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The action does not apply in the current state; nothing changed
    Rejected(String),
    /// State could not be accessed
    Internal(String),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Rejected(msg) => write!(f, "rejected: {}", msg),
            ActionError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

/// Main application state that owns the widgets, their timers and audio
#[derive(Debug)]
pub struct AppState {
    pomodoro: Mutex<Pomodoro>,
    water: Mutex<WaterReminder>,
    /// Completion alarm channel of the Pomodoro widget
    alarm: Arc<dyn AudioCue>,
    /// Separate channel so stopping the alarm never cuts the water cue
    water_cue: Arc<dyn AudioCue>,
    /// Single owner of the running countdown, if any
    countdown: Mutex<Option<ScopedTask>>,
    /// Single owner of the pending water reminder, if any
    water_timer: Mutex<Option<ScopedTask>>,
    next_run_id: AtomicU64,
    pub tick_interval: Duration,
    pub water_interval: Duration,
    pub notification_exit_delay: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create the state with the audio backend selected by `config`
    pub fn new(config: &Config) -> Self {
        let (alarm, water_cue): (Arc<dyn AudioCue>, Arc<dyn AudioCue>) = if config.no_sound {
            info!("Sound disabled, using silent audio cues");
            (Arc::new(SilentAudioCue::new()), Arc::new(SilentAudioCue::new()))
        } else {
            (
                Arc::new(CommandAudioCue::new(&config.player, config.player_args.clone(), &config.audio_dir)),
                Arc::new(CommandAudioCue::new(&config.player, config.player_args.clone(), &config.audio_dir)),
            )
        };
        Self::with_audio(config, alarm, water_cue)
    }

    /// Create the state with explicit audio channels
    pub fn with_audio(config: &Config, alarm: Arc<dyn AudioCue>, water_cue: Arc<dyn AudioCue>) -> Self {
        Self {
            pomodoro: Mutex::new(Pomodoro::new()),
            water: Mutex::new(WaterReminder::new(!config.no_water_reminder, config.water_interval)),
            alarm,
            water_cue,
            countdown: Mutex::new(None),
            water_timer: Mutex::new(None),
            next_run_id: AtomicU64::new(1),
            tick_interval: config.tick_interval(),
            water_interval: config.water_interval(),
            notification_exit_delay: NOTIFICATION_EXIT_DELAY,
            start_time: Instant::now(),
            port: config.port,
            host: config.host.clone(),
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    fn lock_pomodoro(&self) -> Result<MutexGuard<'_, Pomodoro>, ActionError> {
        self.pomodoro
            .lock()
            .map_err(|e| ActionError::Internal(format!("Failed to lock pomodoro state: {}", e)))
    }

    fn lock_countdown(&self) -> Result<MutexGuard<'_, Option<ScopedTask>>, ActionError> {
        self.countdown
            .lock()
            .map_err(|e| ActionError::Internal(format!("Failed to lock countdown slot: {}", e)))
    }

    fn lock_water(&self) -> Result<MutexGuard<'_, WaterReminder>, ActionError> {
        self.water
            .lock()
            .map_err(|e| ActionError::Internal(format!("Failed to lock water reminder: {}", e)))
    }

    fn lock_water_timer(&self) -> Result<MutexGuard<'_, Option<ScopedTask>>, ActionError> {
        self.water_timer
            .lock()
            .map_err(|e| ActionError::Internal(format!("Failed to lock water timer slot: {}", e)))
    }

    /// Apply a change to the Pomodoro widget
    fn modify_pomodoro<T, F>(&self, updater: F) -> Result<T, ActionError>
    where
        F: FnOnce(&mut Pomodoro) -> Result<T, String>,
    {
        let mut pomodoro = self.lock_pomodoro()?;
        updater(&mut pomodoro).map_err(ActionError::Rejected)
    }

    /// Apply a user action to the Pomodoro widget, tracking it as the last action
    fn update_pomodoro<T, F>(&self, action: &str, updater: F) -> Result<T, ActionError>
    where
        F: FnOnce(&mut Pomodoro) -> Result<T, String>,
    {
        let value = self.modify_pomodoro(updater)?;
        self.record_action(action);
        Ok(value)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn next_run_id(&self) -> u64 {
        self.next_run_id.fetch_add(1, Ordering::SeqCst)
    }

    fn spawn_countdown(self: &Arc<Self>) -> ScopedTask {
        let run_id = self.next_run_id();
        ScopedTask::spawn(
            "countdown",
            run_id,
            countdown_task(Arc::downgrade(self), run_id, self.tick_interval),
        )
    }

    /// Current Pomodoro view
    pub fn pomodoro_snapshot(&self) -> Result<PomodoroSnapshot, ActionError> {
        let pomodoro = self.lock_pomodoro()?;
        Ok(pomodoro.snapshot(self.alarm.is_playing()))
    }

    /// Feed raw duration text. Returns whether it was accepted.
    pub fn set_duration_input(&self, raw: &str) -> Result<bool, ActionError> {
        self.update_pomodoro("duration", |pomodoro| Ok(pomodoro.set_duration_input(raw)))
    }

    pub fn select_cycle(&self, cycle: CycleKind) -> Result<(), ActionError> {
        debug!("Selecting {} cycle", cycle);
        self.update_pomodoro("cycle", |pomodoro| {
            pomodoro.select_cycle(cycle);
            Ok(())
        })
    }

    /// Start a run from the configuration form and arm a fresh countdown
    pub fn start_pomodoro(self: &Arc<Self>) -> Result<TimerState, ActionError> {
        let mut countdown = self.lock_countdown()?;
        let timer = self.update_pomodoro("start", |pomodoro| pomodoro.start())?;
        self.alarm.prime(timer.cycle.completion_asset());
        *countdown = Some(self.spawn_countdown());
        Ok(timer)
    }

    /// Start the suggested next cycle straight from the completed state
    pub fn accept_suggestion(self: &Arc<Self>, index: usize) -> Result<Suggestion, ActionError> {
        let mut countdown = self.lock_countdown()?;
        let suggestion = self.update_pomodoro("suggestion", |pomodoro| pomodoro.accept_suggestion(index))?;
        self.alarm.prime(suggestion.cycle.completion_asset());
        *countdown = Some(self.spawn_countdown());
        Ok(suggestion)
    }

    /// Return the Pomodoro timer to idle, releasing its countdown
    pub fn reset_pomodoro(&self) -> Result<bool, ActionError> {
        let mut countdown = self.lock_countdown()?;
        let changed = self.update_pomodoro("reset", |pomodoro| Ok(pomodoro.reset()))?;
        countdown.take();
        Ok(changed)
    }

    /// Apply one countdown tick on behalf of run `run_id`.
    ///
    /// Ticks from a run that no longer owns the countdown slot are ignored.
    /// The slot stays locked until the completion alarm has started, so a
    /// follow-up run can never be primed before it.
    pub fn apply_tick(&self, run_id: u64) -> Result<TickOutcome, ActionError> {
        let mut countdown = self.lock_countdown()?;
        if countdown.as_ref().map(ScopedTask::run_id) != Some(run_id) {
            debug!("Ignoring tick from stale run {}", run_id);
            return Ok(TickOutcome::Inactive);
        }

        let outcome = self.modify_pomodoro(|pomodoro| Ok(pomodoro.tick()))?;
        match outcome {
            TickOutcome::Ticked { remaining_seconds } => {
                debug!("Run {}: {}s remaining", run_id, remaining_seconds);
            }
            TickOutcome::Completed { cycle } => {
                countdown.take();
                self.alarm.play(cycle.completion_asset());
            }
            TickOutcome::Inactive => {
                countdown.take();
            }
        }
        Ok(outcome)
    }

    /// Halt the completion alarm
    pub fn stop_alarm(&self) -> Result<(), ActionError> {
        info!("Stopping alarm");
        self.alarm.stop();
        self.update_pomodoro("stop-alarm", |_| Ok(()))
    }

    pub fn open_display(&self) -> Result<(), ActionError> {
        self.update_pomodoro("open-display", |pomodoro| {
            pomodoro.open_display();
            Ok(())
        })
    }

    /// Returns whether the click dismissed the display
    pub fn click_display(&self, target: ClickTarget) -> Result<bool, ActionError> {
        self.update_pomodoro("click-display", |pomodoro| Ok(pomodoro.click_display(target)))
    }

    pub fn finish_celebration(&self) -> Result<(), ActionError> {
        self.update_pomodoro("celebration-finished", |pomodoro| {
            pomodoro.finish_celebration();
            Ok(())
        })
    }

    /// Whether a countdown task currently owns the slot and is alive
    pub fn countdown_armed(&self) -> bool {
        self.countdown
            .lock()
            .map(|slot| slot.as_ref().map_or(false, |task| !task.is_finished()))
            .unwrap_or(false)
    }

    /// Current water reminder and whether its cue is playing
    pub fn water_snapshot(&self) -> Result<(WaterReminder, bool), ActionError> {
        let water = self.lock_water()?;
        Ok((water.clone(), self.water_cue.is_playing()))
    }

    /// Press the water notification action: exit, then schedule the next reminder.
    ///
    /// Returns false if the banner was not showing.
    pub fn acknowledge_water(self: &Arc<Self>) -> Result<bool, ActionError> {
        let mut timer = self.lock_water_timer()?;
        let acted = self.lock_water()?.notification.act();
        if !acted {
            return Ok(false);
        }
        self.record_action("water-acknowledge");

        let run_id = self.next_run_id();
        *timer = Some(ScopedTask::spawn(
            "water reminder",
            run_id,
            water_reminder_task(Arc::downgrade(self), self.notification_exit_delay, self.water_interval),
        ));
        Ok(true)
    }

    /// Exit animation done: hide the banner and arm the cue.
    /// Returns whether another reminder should be scheduled.
    pub fn finish_water_exit(&self) -> Result<bool, ActionError> {
        let mut water = self.lock_water()?;
        if !water.notification.finish_exit() {
            return Ok(false);
        }
        self.water_cue.stop();
        if !water.enabled {
            debug!("Water reminder disabled, not rescheduling");
            return Ok(false);
        }
        self.water_cue.prime(AudioAsset::WaterReminder);
        info!("Next water reminder in {} minutes", water.interval_minutes);
        Ok(true)
    }

    /// Bring the water reminder back and play its cue
    pub fn remind_water(&self) -> Result<(), ActionError> {
        let mut water = self.lock_water()?;
        water.remind();
        drop(water);
        info!("Time to drink some water");
        self.water_cue.play(AudioAsset::WaterReminder);
        Ok(())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        if let Ok(slot) = self.countdown.get_mut() {
            if slot.take().is_some() {
                warn!("Dropping state with a countdown still running");
            }
        }
        self.alarm.stop();
        self.water_cue.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use crate::services::{AudioEvent, SilentAudioCue};

    fn silent_state() -> (Arc<AppState>, Arc<SilentAudioCue>, Arc<SilentAudioCue>) {
        let alarm = Arc::new(SilentAudioCue::new());
        let water = Arc::new(SilentAudioCue::new());
        let state = AppState::with_audio(&Config::default(), alarm.clone(), water.clone());
        (Arc::new(state), alarm, water)
    }

    #[tokio::test(start_paused = true)]
    async fn start_primes_the_cycle_alarm() {
        let (state, alarm, _) = silent_state();
        state.set_duration_input("25").unwrap();
        state.select_cycle(CycleKind::ShortBreak).unwrap();
        let timer = state.start_pomodoro().unwrap();

        assert_eq!(timer.total_duration_seconds, 1500);
        assert_eq!(alarm.events(), vec![AudioEvent::Prime(AudioAsset::BreakAlarm)]);
        assert!(state.countdown_armed());
        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));
    }

    #[tokio::test(start_paused = true)]
    async fn start_without_duration_is_rejected() {
        let (state, alarm, _) = silent_state();
        assert!(matches!(state.start_pomodoro(), Err(ActionError::Rejected(_))));
        assert!(alarm.events().is_empty());
        assert!(!state.countdown_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_releases_the_countdown() {
        let (state, _, _) = silent_state();
        state.set_duration_input("5").unwrap();
        state.start_pomodoro().unwrap();
        assert!(state.reset_pomodoro().unwrap());
        assert!(!state.countdown_armed());

        let snapshot = state.pomodoro_snapshot().unwrap();
        assert!(snapshot.idle);
        assert!(!snapshot.timer.is_running);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_ticks_are_ignored() {
        let (state, _, _) = silent_state();
        state.set_duration_input("5").unwrap();
        state.start_pomodoro().unwrap();
        assert_eq!(state.apply_tick(9999).unwrap(), TickOutcome::Inactive);
        assert_eq!(state.pomodoro_snapshot().unwrap().timer.remaining_seconds, 300);
    }

    #[tokio::test(start_paused = true)]
    async fn completion_alarm_starts_before_the_next_run_is_primed() {
        let (state, alarm, _) = silent_state();
        state.set_duration_input("1").unwrap();
        state.select_cycle(CycleKind::ShortBreak).unwrap();
        state.start_pomodoro().unwrap();
        tokio::time::sleep(Duration::from_millis(60_500)).await;

        state.accept_suggestion(0).unwrap();
        assert_eq!(
            alarm.events(),
            vec![
                AudioEvent::Prime(AudioAsset::BreakAlarm),
                AudioEvent::Play(AudioAsset::BreakAlarm),
                AudioEvent::Prime(AudioAsset::WorkAlarm),
            ]
        );
        assert!(state.countdown_armed());
        assert!(state.pomodoro_snapshot().unwrap().timer.is_running);
    }

    #[test]
    fn water_exit_only_reschedules_when_enabled() {
        let (state, _, water) = silent_state();
        assert!(state.lock_water().unwrap().notification.act());
        assert!(state.finish_water_exit().unwrap());
        assert_eq!(
            water.events(),
            vec![AudioEvent::Stop, AudioEvent::Prime(AudioAsset::WaterReminder)]
        );

        let config = Config::parse_from(["pomodesk", "--no-water-reminder"]);
        let disabled = AppState::with_audio(
            &config,
            Arc::new(SilentAudioCue::new()),
            Arc::new(SilentAudioCue::new()),
        );
        assert!(!disabled.water_snapshot().unwrap().0.is_showing());
        assert!(!disabled.finish_water_exit().unwrap());
    }
}
