//! Application state types for the TUI
//!
//! - Focus between the filter sidebar and the candidate list
//! - Modal states (Help, Detail)
//! - Row selection (ListState)
//! - Feedback state for config warnings

// ============================================================================
// List Navigation State
// ============================================================================

/// Selected row of the current page; the renderer derives scrolling from it
#[derive(Debug, Clone, Default)]
pub struct ListState {
    pub selected: usize,
}

impl ListState {
    pub fn clamp(&mut self, list_len: usize) {
        self.selected = self.selected.min(list_len.saturating_sub(1));
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self, list_len: usize) {
        if self.selected + 1 < list_len {
            self.selected += 1;
        }
    }

    pub fn move_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn move_to_bottom(&mut self, list_len: usize) {
        self.selected = list_len.saturating_sub(1);
    }
}

// ============================================================================
// Focus
// ============================================================================

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Sidebar,
    Candidates,
}

impl Focus {
    #[must_use]
    pub fn next(&self) -> Self {
        match self {
            Focus::Sidebar => Focus::Candidates,
            Focus::Candidates => Focus::Sidebar,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Focus::Sidebar => "Filters",
            Focus::Candidates => "Candidates",
        }
    }
}

// ============================================================================
// Modal State
// ============================================================================

/// Modal overlay state - only one modal can be active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    None,
    Help,
    /// Detail popup for the selected candidate row
    Detail,
}

// ============================================================================
// Feedback State
// ============================================================================

/// Messages shown in the status bar
#[derive(Debug, Default)]
pub struct FeedbackState {
    pub config_warnings: Vec<String>,
}

impl FeedbackState {
    pub fn new(config_warnings: Vec<String>) -> Self {
        Self { config_warnings }
    }

    /// First config warning, with a count of the rest
    #[must_use]
    pub fn warning_summary(&self) -> Option<String> {
        let first = self.config_warnings.first()?;
        match self.config_warnings.len() {
            1 => Some(first.clone()),
            n => Some(format!("{} (+{} more)", first, n - 1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_state_navigation() {
        let mut state = ListState::default();

        state.move_up();
        assert_eq!(state.selected, 0);

        state.move_down(5);
        assert_eq!(state.selected, 1);

        state.move_to_bottom(5);
        assert_eq!(state.selected, 4);
        state.move_down(5);
        assert_eq!(state.selected, 4);

        state.move_to_top();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_clamp_after_shorter_page() {
        let mut state = ListState { selected: 4 };
        state.clamp(2);
        assert_eq!(state.selected, 1);
        state.clamp(0);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_focus_cycling() {
        assert_eq!(Focus::Sidebar.next(), Focus::Candidates);
        assert_eq!(Focus::Candidates.next(), Focus::Sidebar);
    }

    #[test]
    fn test_warning_summary() {
        assert_eq!(FeedbackState::default().warning_summary(), None);
        let state = FeedbackState::new(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(state.warning_summary().as_deref(), Some("a (+2 more)"));
    }
}
