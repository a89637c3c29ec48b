//! Modal display surface and the content the Pomodoro widget shows in it

use serde::{Deserialize, Serialize};

use super::{CycleKind, Suggestion};

/// Where a click on an open display landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickTarget {
    /// The dimmed area around the content
    Overlay,
    /// The content box itself
    Content,
}

/// Generic show/hide container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplaySurface {
    visible: bool,
}

impl DisplaySurface {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Handle a click; only clicks outside the content dismiss.
    /// Returns whether the surface was dismissed.
    pub fn click(&mut self, target: ClickTarget) -> bool {
        if !self.visible {
            return false;
        }
        match target {
            ClickTarget::Overlay => {
                self.dismiss();
                true
            }
            ClickTarget::Content => false,
        }
    }
}

/// What the display shows for the current timer state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DisplayContent {
    /// Nothing rendered while the surface is hidden
    Hidden,
    /// Configuration form for an idle timer
    Configure {
        headline: String,
        duration_minutes: Option<u32>,
        selected_cycle: CycleKind,
        cycles: Vec<CycleKind>,
    },
    Running {
        headline: String,
        cycle: CycleKind,
        minutes: u32,
        seconds: u32,
    },
    Completed {
        headline: String,
        cycle: CycleKind,
        suggestions: Vec<SuggestionButton>,
        show_stop_alarm: bool,
        celebrating: bool,
    },
}

/// A suggestion as rendered, addressable by index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionButton {
    pub index: usize,
    pub caption: String,
    #[serde(flatten)]
    pub suggestion: Suggestion,
}

impl SuggestionButton {
    pub fn list(suggestions: &[Suggestion]) -> Vec<Self> {
        suggestions
            .iter()
            .enumerate()
            .map(|(index, suggestion)| Self {
                index,
                caption: suggestion.caption(),
                suggestion: *suggestion,
            })
            .collect()
    }
}

pub fn configure_headline() -> String {
    "No timer running".to_string()
}

pub fn running_headline(cycle: CycleKind, remaining_seconds: u32) -> String {
    format!(
        "You are in a {} cycle for another {} minutes and {} seconds.",
        cycle.label(),
        remaining_seconds / 60,
        remaining_seconds % 60
    )
}

pub fn completed_headline(cycle: CycleKind) -> String {
    format!("You just completed a {} cycle!", cycle.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_click_dismisses_content_click_does_not() {
        let mut surface = DisplaySurface::default();
        surface.open();
        assert!(!surface.click(ClickTarget::Content));
        assert!(surface.is_visible());
        assert!(surface.click(ClickTarget::Overlay));
        assert!(!surface.is_visible());
    }

    #[test]
    fn clicks_on_hidden_surface_are_ignored() {
        let mut surface = DisplaySurface::default();
        assert!(!surface.click(ClickTarget::Overlay));
    }

    #[test]
    fn headlines() {
        assert_eq!(
            running_headline(CycleKind::ShortBreak, 125),
            "You are in a short break cycle for another 2 minutes and 5 seconds."
        );
        assert_eq!(completed_headline(CycleKind::Work), "You just completed a work cycle!");
    }
}
