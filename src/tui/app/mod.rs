//! Application state and core logic for the TUI
//!
//! The App routes keys to the filter panel or the candidate list, turns
//! panel intents into controller mutations and folds request completions
//! back in. All query state lives in the controller.

mod panel;
mod state;

pub use panel::{FilterPanel, PanelIntent, PanelRow, SORT_LABEL, Section, is_checked};
pub use state::{FeedbackState, Focus, ListState, ModalState};

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::{CandidateSource, HttpCandidateSource};
use crate::controller::{QueryController, ResultState};
use crate::models::{Candidate, CviewConfig};
use crate::tui::event::{DataEvent, EventResult, InputEvent, KeyAction};
use crate::tui::theme::Theme;

/// Main application state
pub struct App<S = HttpCandidateSource> {
    // Lifecycle
    pub running: bool,

    pub focus: Focus,
    pub modal: ModalState,

    pub controller: QueryController<S, DataEvent>,
    pub panel: FilterPanel,
    pub list_state: ListState,

    /// Advances on every spinner tick while loading
    pub spinner_frame: usize,

    pub feedback: FeedbackState,
    pub config: CviewConfig,
    pub theme: Theme,
}

impl<S: CandidateSource> App<S> {
    /// Create the app. Completions are posted to `data_tx`.
    pub fn new(
        source: Arc<S>,
        data_tx: mpsc::Sender<DataEvent>,
        config: CviewConfig,
        config_warnings: Vec<String>,
    ) -> Self {
        let theme = Theme::from_name(&config.display.theme);
        Self {
            running: true,
            focus: Focus::Sidebar,
            modal: ModalState::None,
            controller: QueryController::new(source, data_tx),
            panel: FilterPanel::new(),
            list_state: ListState::default(),
            spinner_frame: 0,
            feedback: FeedbackState::new(config_warnings),
            config,
            theme,
        }
    }

    /// Issue the initial request
    pub fn start(&mut self) {
        self.controller.refresh();
    }

    #[must_use]
    pub fn result(&self) -> &ResultState {
        self.controller.result()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.controller.result().loading
    }

    /// Candidate under the list cursor
    #[must_use]
    pub fn selected_candidate(&self) -> Option<&Candidate> {
        self.result().candidates.get(self.list_state.selected)
    }

    /// Keys go to the search box while it is being edited
    #[must_use]
    pub fn is_editing_search(&self) -> bool {
        self.focus == Focus::Sidebar && self.panel.is_editing_search()
    }

    /// Handle an input event
    pub fn handle_input(&mut self, event: InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key_event) => {
                let action = KeyAction::from_key_event(key_event, self.is_editing_search());
                self.handle_action(action)
            }
            InputEvent::Resize(_, _) => EventResult::Continue,
            InputEvent::Mouse(mouse_event) => {
                let action = KeyAction::from_mouse_event(mouse_event);
                self.handle_action(action)
            }
        }
    }

    /// Handle a key action
    fn handle_action(&mut self, action: KeyAction) -> EventResult {
        // Help overlay takes priority
        if self.modal == ModalState::Help {
            return match action {
                KeyAction::Escape | KeyAction::ShowHelp | KeyAction::Quit => {
                    self.modal = ModalState::None;
                    EventResult::Continue
                }
                _ => EventResult::Unchanged,
            };
        }

        if self.modal == ModalState::Detail {
            return self.handle_detail_action(action);
        }

        if self.is_editing_search() {
            return self.handle_search_action(action);
        }

        if let Some(result) = self.handle_navigation(action) {
            return result;
        }

        match action {
            KeyAction::Quit => {
                self.running = false;
                EventResult::Quit
            }
            KeyAction::SwitchFocus => {
                self.focus = self.focus.next();
                EventResult::Continue
            }
            KeyAction::PrevPage => self.change_page(-1),
            KeyAction::NextPage => self.change_page(1),
            KeyAction::Select | KeyAction::Toggle => match self.focus {
                Focus::Sidebar => {
                    if let Some(intent) = self.panel.activate(self.controller.filters()) {
                        self.dispatch(intent);
                    }
                    EventResult::Continue
                }
                Focus::Candidates if action == KeyAction::Select => {
                    if self.selected_candidate().is_some() {
                        self.modal = ModalState::Detail;
                    }
                    EventResult::Continue
                }
                Focus::Candidates => EventResult::Unchanged,
            },
            KeyAction::FocusSearch => {
                self.focus = Focus::Sidebar;
                self.panel.focus_search();
                EventResult::Continue
            }
            KeyAction::ToggleFullText => {
                self.panel.toggle_full_text_search();
                EventResult::Continue
            }
            KeyAction::ResetFilters => {
                self.dispatch(PanelIntent::ResetFilters);
                EventResult::Continue
            }
            KeyAction::Refresh => {
                self.controller.refresh();
                EventResult::Continue
            }
            KeyAction::ShowHelp => {
                self.modal = ModalState::Help;
                EventResult::Continue
            }
            KeyAction::Escape if self.focus == Focus::Candidates => {
                self.focus = Focus::Sidebar;
                EventResult::Continue
            }
            _ => EventResult::Unchanged,
        }
    }

    /// Handle navigation actions (returns Some if action was handled)
    fn handle_navigation(&mut self, action: KeyAction) -> Option<EventResult> {
        let len = self.result().candidates.len();
        match (action, self.focus) {
            (KeyAction::MoveUp | KeyAction::MouseScrollUp, Focus::Sidebar) => self.panel.move_up(),
            (KeyAction::MoveDown | KeyAction::MouseScrollDown, Focus::Sidebar) => {
                self.panel.move_down()
            }
            (KeyAction::MoveToTop, Focus::Sidebar) => self.panel.move_to_top(),
            (KeyAction::MoveToBottom, Focus::Sidebar) => self.panel.move_to_bottom(),

            (KeyAction::MoveUp | KeyAction::MouseScrollUp, Focus::Candidates) => {
                self.list_state.move_up()
            }
            (KeyAction::MoveDown | KeyAction::MouseScrollDown, Focus::Candidates) => {
                self.list_state.move_down(len)
            }
            (KeyAction::MoveToTop, Focus::Candidates) => self.list_state.move_to_top(),
            (KeyAction::MoveToBottom, Focus::Candidates) => self.list_state.move_to_bottom(len),
            _ => return None,
        }
        Some(EventResult::Continue)
    }

    fn handle_search_action(&mut self, action: KeyAction) -> EventResult {
        if action == KeyAction::Quit {
            self.running = false;
            return EventResult::Quit;
        }

        let current = self.controller.search().to_string();
        if let Some(intent) = self.panel.edit_search(action, &current) {
            self.dispatch(intent);
        }
        EventResult::Continue
    }

    fn handle_detail_action(&mut self, action: KeyAction) -> EventResult {
        match action {
            KeyAction::Escape | KeyAction::Select => {
                self.modal = ModalState::None;
                EventResult::Continue
            }
            KeyAction::Quit => {
                self.running = false;
                EventResult::Quit
            }
            _ => EventResult::Unchanged,
        }
    }

    /// Apply a panel intent to the controller
    fn dispatch(&mut self, intent: PanelIntent) {
        match intent {
            PanelIntent::SetSearch(value) => self.controller.set_search(value),
            PanelIntent::ToggleFilter {
                key,
                value,
                included,
            } => self.controller.set_filter(key, &value, included),
            PanelIntent::ToggleJob { job_id, included } => {
                self.controller.set_job_filter(&job_id, included)
            }
            PanelIntent::ResetFilters => self.controller.reset_filters(),
        }
        self.list_state.move_to_top();
    }

    /// Step to the previous/next page, staying within 1..=total_pages
    fn change_page(&mut self, delta: i64) -> EventResult {
        let total_pages = self.result().total_pages;
        if total_pages <= 1 {
            return EventResult::Unchanged;
        }

        let target = i64::from(self.controller.page()) + delta;
        if target < 1 || target as u64 > total_pages {
            return EventResult::Unchanged;
        }

        // Bounded by total_pages above, which came from a u64 count of pages
        let Ok(target) = u32::try_from(target) else {
            return EventResult::Unchanged;
        };
        self.controller.set_page(target);
        self.list_state.move_to_top();
        EventResult::Continue
    }

    /// Handle a data event
    pub fn handle_data(&mut self, event: DataEvent) -> EventResult {
        match event {
            DataEvent::AnimationTick => {
                if self.is_loading() {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                    EventResult::Continue
                } else {
                    EventResult::Unchanged
                }
            }
            DataEvent::CandidatesFetched(completion) => {
                if self.controller.apply(completion) {
                    let len = self.result().candidates.len();
                    self.list_state.clamp(len);
                    if len == 0 && self.modal == ModalState::Detail {
                        self.modal = ModalState::None;
                    }
                    EventResult::Continue
                } else {
                    EventResult::Unchanged
                }
            }
        }
    }
}
