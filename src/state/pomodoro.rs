//! Pomodoro widget model: timer, configuration form, display and celebration

use serde::Serialize;
use tracing::{debug, info};

use super::{
    display::{
        completed_headline, configure_headline, running_headline, ClickTarget, DisplayContent,
        DisplaySurface, SuggestionButton,
    },
    suggestion::suggestions_after,
    CycleKind, DurationInput, Suggestion, TickOutcome, TimerState,
};

/// Everything the Pomodoro widget knows, without any timer or audio resources
#[derive(Debug, Clone, Default)]
pub struct Pomodoro {
    timer: TimerState,
    selected_cycle: CycleKind,
    input: DurationInput,
    display: DisplaySurface,
    celebrating: bool,
}

/// Serializable view of the widget for clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PomodoroSnapshot {
    #[serde(flatten)]
    pub timer: TimerState,
    pub selected_cycle: CycleKind,
    pub duration_input_minutes: Option<u32>,
    pub idle: bool,
    pub completed: bool,
    pub progress: f64,
    pub icon: &'static str,
    pub display_visible: bool,
    pub content: DisplayContent,
    pub suggestions: Vec<Suggestion>,
    pub alarm_playing: bool,
    pub celebrating: bool,
}

impl Pomodoro {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    pub fn is_display_visible(&self) -> bool {
        self.display.is_visible()
    }

    /// Feed raw text from the duration field
    pub fn set_duration_input(&mut self, raw: &str) -> bool {
        let accepted = self.input.apply(raw);
        if !accepted {
            debug!("Ignoring duration input {:?}", raw);
        }
        accepted
    }

    pub fn select_cycle(&mut self, cycle: CycleKind) {
        self.selected_cycle = cycle;
    }

    /// Start a run from the configuration form
    pub fn start(&mut self) -> Result<TimerState, String> {
        if !self.timer.is_idle() {
            return Err("A timer is already configured".to_string());
        }
        let minutes = self
            .input
            .minutes()
            .ok_or_else(|| "No duration entered".to_string())?;

        self.begin(self.selected_cycle, minutes);
        Ok(self.timer)
    }

    /// Advance the countdown, completing the run when it reaches zero
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = self.timer.tick();
        if outcome == (TickOutcome::Ticked { remaining_seconds: 0 }) {
            outcome = self.timer.tick();
        }
        if let TickOutcome::Completed { cycle } = outcome {
            info!("Completed a {} cycle", cycle.label());
            self.display.open();
            self.celebrating = true;
        }
        outcome
    }

    /// Suggestions for the next cycle, empty unless a run just completed
    pub fn suggestions(&self) -> Vec<Suggestion> {
        if !self.timer.is_completed() {
            return Vec::new();
        }
        suggestions_after(self.timer.cycle, self.timer.total_duration_seconds)
    }

    /// Start the suggested cycle at `index` straight from the completed state
    pub fn accept_suggestion(&mut self, index: usize) -> Result<Suggestion, String> {
        if !self.timer.is_completed() {
            return Err("No completed cycle to follow up on".to_string());
        }
        let suggestion = self
            .suggestions()
            .get(index)
            .copied()
            .ok_or_else(|| format!("No suggestion at index {}", index))?;

        self.begin(suggestion.cycle, suggestion.minutes);
        Ok(suggestion)
    }

    /// Clear a configured timer back to idle. Returns false if already idle.
    pub fn reset(&mut self) -> bool {
        if self.timer.is_idle() {
            return false;
        }
        info!("Resetting {} cycle", self.timer.cycle.label());
        self.timer.reset();
        self.celebrating = false;
        true
    }

    pub fn open_display(&mut self) {
        self.display.open();
    }

    pub fn click_display(&mut self, target: ClickTarget) -> bool {
        self.display.click(target)
    }

    pub fn finish_celebration(&mut self) {
        self.celebrating = false;
    }

    pub fn icon(&self) -> &'static str {
        if self.timer.is_running {
            self.timer.cycle.icon()
        } else {
            "⏳"
        }
    }

    pub fn content(&self, alarm_playing: bool) -> DisplayContent {
        if !self.display.is_visible() {
            return DisplayContent::Hidden;
        }
        if self.timer.is_idle() {
            return DisplayContent::Configure {
                headline: configure_headline(),
                duration_minutes: self.input.minutes(),
                selected_cycle: self.selected_cycle,
                cycles: CycleKind::ALL.to_vec(),
            };
        }
        if self.timer.is_completed() {
            return DisplayContent::Completed {
                headline: completed_headline(self.timer.cycle),
                cycle: self.timer.cycle,
                suggestions: SuggestionButton::list(&self.suggestions()),
                show_stop_alarm: alarm_playing,
                celebrating: self.celebrating,
            };
        }
        DisplayContent::Running {
            headline: running_headline(self.timer.cycle, self.timer.remaining_seconds),
            cycle: self.timer.cycle,
            minutes: self.timer.remaining_seconds / 60,
            seconds: self.timer.remaining_seconds % 60,
        }
    }

    pub fn snapshot(&self, alarm_playing: bool) -> PomodoroSnapshot {
        PomodoroSnapshot {
            timer: self.timer,
            selected_cycle: self.selected_cycle,
            duration_input_minutes: self.input.minutes(),
            idle: self.timer.is_idle(),
            completed: self.timer.is_completed(),
            progress: self.timer.progress(),
            icon: self.icon(),
            display_visible: self.display.is_visible(),
            content: self.content(alarm_playing),
            suggestions: self.suggestions(),
            alarm_playing,
            celebrating: self.celebrating,
        }
    }

    fn begin(&mut self, cycle: CycleKind, minutes: u32) {
        info!("Starting {} cycle for {} minutes", cycle.label(), minutes);
        self.selected_cycle = cycle;
        self.input.set(minutes);
        self.timer.start(cycle, minutes);
        self.celebrating = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_completion(pomodoro: &mut Pomodoro) -> TickOutcome {
        loop {
            match pomodoro.tick() {
                TickOutcome::Ticked { .. } => continue,
                other => return other,
            }
        }
    }

    fn started(cycle: CycleKind, minutes: &str) -> Pomodoro {
        let mut pomodoro = Pomodoro::new();
        assert!(pomodoro.set_duration_input(minutes));
        pomodoro.select_cycle(cycle);
        pomodoro.start().unwrap();
        pomodoro
    }

    #[test]
    fn start_requires_a_duration() {
        let mut pomodoro = Pomodoro::new();
        assert!(pomodoro.start().is_err());
        assert!(pomodoro.timer().is_idle());
    }

    #[test]
    fn start_is_ignored_while_configured() {
        let mut pomodoro = started(CycleKind::Work, "25");
        pomodoro.tick();
        assert!(pomodoro.start().is_err());
        assert_eq!(pomodoro.timer().remaining_seconds, 25 * 60 - 1);
    }

    #[test]
    fn start_is_ignored_once_completed() {
        let mut pomodoro = started(CycleKind::Work, "1");
        run_to_completion(&mut pomodoro);
        assert!(pomodoro.start().is_err());

        let timer = pomodoro.timer();
        assert!(timer.is_completed());
        assert!(!timer.is_running);
        assert_eq!(timer.total_duration_seconds, 60);
        assert!(pomodoro.is_celebrating());
    }

    #[test]
    fn reaching_zero_completes_in_the_same_tick() {
        let mut pomodoro = started(CycleKind::ShortBreak, "1");
        for _ in 0..59 {
            assert!(matches!(pomodoro.tick(), TickOutcome::Ticked { .. }));
        }
        assert_eq!(
            pomodoro.tick(),
            TickOutcome::Completed { cycle: CycleKind::ShortBreak }
        );
        assert!(!pomodoro.timer().is_running);
        assert!(pomodoro.is_display_visible());
        assert!(pomodoro.is_celebrating());
    }

    #[test]
    fn completed_work_session_of_25_minutes() {
        let mut pomodoro = started(CycleKind::Work, "25");
        run_to_completion(&mut pomodoro);
        assert_eq!(
            pomodoro.suggestions(),
            vec![
                Suggestion::new(CycleKind::ShortBreak, 5),
                Suggestion::new(CycleKind::LongBreak, 15),
            ]
        );
    }

    #[test]
    fn accepting_a_suggestion_runs_without_passing_through_idle() {
        let mut pomodoro = started(CycleKind::Work, "50");
        run_to_completion(&mut pomodoro);
        assert_eq!(pomodoro.suggestions()[0], Suggestion::new(CycleKind::ShortBreak, 10));

        let accepted = pomodoro.accept_suggestion(0).unwrap();
        assert_eq!(accepted, Suggestion::new(CycleKind::ShortBreak, 10));
        let timer = pomodoro.timer();
        assert!(timer.is_running);
        assert_eq!(timer.cycle, CycleKind::ShortBreak);
        assert_eq!(timer.total_duration_seconds, 600);
        assert_eq!(timer.remaining_seconds, 600);
        assert!(!pomodoro.is_celebrating());
    }

    #[test]
    fn suggestions_are_only_accepted_after_completion() {
        let mut pomodoro = started(CycleKind::Work, "25");
        assert!(pomodoro.accept_suggestion(0).is_err());
        run_to_completion(&mut pomodoro);
        assert!(pomodoro.accept_suggestion(7).is_err());
    }

    #[test]
    fn reset_ends_celebration_and_returns_to_idle() {
        let mut pomodoro = started(CycleKind::LongBreak, "15");
        run_to_completion(&mut pomodoro);
        assert!(pomodoro.reset());
        let timer = pomodoro.timer();
        assert_eq!((timer.total_duration_seconds, timer.remaining_seconds, timer.is_running), (0, 0, false));
        assert!(!pomodoro.is_celebrating());
        assert!(!pomodoro.reset());
    }

    #[test]
    fn content_follows_timer_state() {
        let mut pomodoro = Pomodoro::new();
        assert_eq!(pomodoro.content(false), DisplayContent::Hidden);

        pomodoro.open_display();
        assert!(matches!(pomodoro.content(false), DisplayContent::Configure { .. }));

        pomodoro.set_duration_input("1");
        pomodoro.start().unwrap();
        assert!(matches!(
            pomodoro.content(false),
            DisplayContent::Running { minutes: 1, seconds: 0, .. }
        ));

        run_to_completion(&mut pomodoro);
        match pomodoro.content(true) {
            DisplayContent::Completed { suggestions, show_stop_alarm, .. } => {
                assert_eq!(suggestions.len(), 2);
                assert!(show_stop_alarm);
            }
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn icon_tracks_running_cycle() {
        let mut pomodoro = Pomodoro::new();
        assert_eq!(pomodoro.icon(), "⏳");
        pomodoro.set_duration_input("5");
        pomodoro.select_cycle(CycleKind::LongBreak);
        pomodoro.start().unwrap();
        assert_eq!(pomodoro.icon(), "🌴");
    }
}
