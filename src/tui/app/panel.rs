//! Filter panel (sidebar)
//!
//! The panel never owns filter or search state. It is handed the
//! controller's current `FilterState` and search text whenever it renders
//! or reacts to a key, and answers with a `PanelIntent` describing the
//! change the user asked for. Its own state is presentation only: which
//! row has focus, which sections are collapsed, whether the search box is
//! being edited, and the "Full Text Search" switch (which is not part of
//! the query).

use std::collections::HashSet;

use crate::query::{FilterKey, FilterState};
use crate::tui::event::KeyAction;

/// A selectable value inside a filter section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub label: &'static str,
    pub value: &'static str,
}

const fn opt(label: &'static str, value: &'static str) -> FilterOption {
    FilterOption { label, value }
}

pub const APPLICATION_TYPE_OPTIONS: &[FilterOption] =
    &[opt("Active", "active"), opt("Archived", "archived")];

pub const JOB_OPTIONS: &[FilterOption] = &[
    opt("job-123", "job-123"),
    opt("job-456", "job-456"),
    opt("job-789", "job-789"),
    opt("job-234", "job-234"),
    opt("job-567", "job-567"),
    opt("job-345", "job-345"),
    opt("job-678", "job-678"),
    opt("job-890", "job-890"),
    opt("job-901", "job-901"),
];

pub const SOURCE_OPTIONS: &[FilterOption] = &[
    opt("LinkedIn", "LinkedIn"),
    opt("Indeed", "Indeed"),
    opt("Career Page", "Career Page"),
    opt("Referral", "Referral"),
    opt("GitHub", "GitHub"),
    opt("Dribbble", "Dribbble"),
];

/// Sort order shown in the sidebar. The API default; not selectable.
pub const SORT_LABEL: &str = "Last Activity (new to old)";

/// Collapsible sidebar sections, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    ApplicationType,
    Jobs,
    Crm,
    ProfileDetails,
    Source,
    Responsibility,
    PipelineTasks,
    Education,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::ApplicationType,
        Section::Jobs,
        Section::Crm,
        Section::ProfileDetails,
        Section::Source,
        Section::Responsibility,
        Section::PipelineTasks,
        Section::Education,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Section::ApplicationType => "Application Type",
            Section::Jobs => "Jobs",
            Section::Crm => "CRM",
            Section::ProfileDetails => "Profile Details",
            Section::Source => "Source",
            Section::Responsibility => "Responsibility",
            Section::PipelineTasks => "Pipeline Tasks",
            Section::Education => "Education",
        }
    }

    /// Options listed under this section; empty for placeholders
    #[must_use]
    pub fn options(self) -> &'static [FilterOption] {
        match self {
            Section::ApplicationType => APPLICATION_TYPE_OPTIONS,
            Section::Jobs => JOB_OPTIONS,
            Section::Source => SOURCE_OPTIONS,
            _ => &[],
        }
    }

    /// Sections that are declared but do not filter anything yet
    #[must_use]
    pub fn is_placeholder(self) -> bool {
        self.options().is_empty()
    }
}

/// One line of the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRow {
    Search,
    FullTextToggle,
    SortLabel,
    SectionHeader(Section),
    Option { section: Section, index: usize },
    Reset,
}

impl PanelRow {
    /// Rows that can take focus
    #[must_use]
    pub fn is_focusable(self) -> bool {
        !matches!(self, PanelRow::SortLabel)
    }
}

/// Change requested by the user through the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelIntent {
    SetSearch(String),
    ToggleFilter {
        key: FilterKey,
        value: String,
        included: bool,
    },
    ToggleJob {
        job_id: String,
        included: bool,
    },
    ResetFilters,
}

/// Whether `option` in `section` is currently selected
#[must_use]
pub fn is_checked(section: Section, option: &FilterOption, filters: &FilterState) -> bool {
    match section {
        Section::ApplicationType => filters.application_type.contains(option.value),
        Section::Source => filters.source.contains(option.value),
        Section::Jobs => filters.job_id.as_deref() == Some(option.value),
        _ => false,
    }
}

/// Sidebar presentation state
#[derive(Debug, Default)]
pub struct FilterPanel {
    focused: usize,
    collapsed: HashSet<Section>,
    editing_search: bool,
    full_text_search: bool,
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible rows given the current collapse state
    #[must_use]
    pub fn rows(&self) -> Vec<PanelRow> {
        let mut rows = vec![PanelRow::Search, PanelRow::FullTextToggle, PanelRow::SortLabel];
        for section in Section::ALL {
            rows.push(PanelRow::SectionHeader(section));
            if !self.is_collapsed(section) {
                rows.extend(
                    (0..section.options().len()).map(|index| PanelRow::Option { section, index }),
                );
            }
        }
        rows.push(PanelRow::Reset);
        rows
    }

    #[must_use]
    pub fn focused_index(&self) -> usize {
        self.focused
    }

    #[must_use]
    pub fn focused_row(&self) -> PanelRow {
        self.rows()
            .get(self.focused)
            .copied()
            .unwrap_or(PanelRow::Search)
    }

    #[must_use]
    pub fn is_collapsed(&self, section: Section) -> bool {
        self.collapsed.contains(&section)
    }

    #[must_use]
    pub fn is_editing_search(&self) -> bool {
        self.editing_search
    }

    #[must_use]
    pub fn full_text_search(&self) -> bool {
        self.full_text_search
    }

    pub fn toggle_full_text_search(&mut self) {
        self.full_text_search = !self.full_text_search;
    }

    pub fn move_down(&mut self) {
        let rows = self.rows();
        if let Some(next) = (self.focused + 1..rows.len()).find(|&i| rows[i].is_focusable()) {
            self.focused = next;
        }
    }

    pub fn move_up(&mut self) {
        let rows = self.rows();
        if let Some(prev) = (0..self.focused).rev().find(|&i| rows[i].is_focusable()) {
            self.focused = prev;
        }
    }

    pub fn move_to_top(&mut self) {
        self.focused = 0;
    }

    pub fn move_to_bottom(&mut self) {
        self.focused = self.rows().len().saturating_sub(1);
    }

    /// Focus the search box and start editing it
    pub fn focus_search(&mut self) {
        self.focused = 0;
        self.editing_search = true;
    }

    fn toggle_section(&mut self, section: Section) {
        if !self.collapsed.remove(&section) {
            self.collapsed.insert(section);
        }
        self.focused = self.focused.min(self.rows().len().saturating_sub(1));
    }

    /// Activate the focused row (Enter/Space).
    ///
    /// Checkbox rows answer with the intent to flip their current state as
    /// read from `filters`; other rows act on panel-local state.
    pub fn activate(&mut self, filters: &FilterState) -> Option<PanelIntent> {
        match self.focused_row() {
            PanelRow::Search => {
                self.editing_search = true;
                None
            }
            PanelRow::FullTextToggle => {
                self.toggle_full_text_search();
                None
            }
            PanelRow::SortLabel => None,
            PanelRow::SectionHeader(section) => {
                self.toggle_section(section);
                None
            }
            PanelRow::Option { section, index } => {
                let option = section.options().get(index)?;
                let included = !is_checked(section, option, filters);
                match section {
                    Section::ApplicationType => Some(PanelIntent::ToggleFilter {
                        key: FilterKey::ApplicationType,
                        value: option.value.to_string(),
                        included,
                    }),
                    Section::Source => Some(PanelIntent::ToggleFilter {
                        key: FilterKey::Source,
                        value: option.value.to_string(),
                        included,
                    }),
                    Section::Jobs => Some(PanelIntent::ToggleJob {
                        job_id: option.value.to_string(),
                        included,
                    }),
                    _ => None,
                }
            }
            PanelRow::Reset => Some(PanelIntent::ResetFilters),
        }
    }

    /// Handle a key while the search box is being edited.
    ///
    /// Every edit produces the full new search text.
    pub fn edit_search(&mut self, action: KeyAction, current: &str) -> Option<PanelIntent> {
        match action {
            KeyAction::SearchChar(c) => {
                let mut next = current.to_string();
                next.push(c);
                Some(PanelIntent::SetSearch(next))
            }
            KeyAction::SearchBackspace => {
                let mut next = current.to_string();
                next.pop()?;
                Some(PanelIntent::SetSearch(next))
            }
            KeyAction::SearchClear => {
                (!current.is_empty()).then(|| PanelIntent::SetSearch(String::new()))
            }
            KeyAction::Escape | KeyAction::Select => {
                self.editing_search = false;
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus(panel: &mut FilterPanel, target: PanelRow) {
        panel.focused = panel
            .rows()
            .iter()
            .position(|r| *r == target)
            .expect("row not visible");
    }

    #[test]
    fn test_row_layout() {
        let panel = FilterPanel::new();
        let rows = panel.rows();
        assert_eq!(rows[0], PanelRow::Search);
        assert_eq!(rows[1], PanelRow::FullTextToggle);
        assert_eq!(rows[2], PanelRow::SortLabel);
        assert_eq!(rows[3], PanelRow::SectionHeader(Section::ApplicationType));
        assert_eq!(*rows.last().unwrap(), PanelRow::Reset);

        // 3 fixed rows, 8 headers, 2 + 9 + 6 options, reset
        assert_eq!(rows.len(), 3 + 8 + 17 + 1);
    }

    #[test]
    fn test_move_skips_sort_label() {
        let mut panel = FilterPanel::new();
        panel.move_down();
        assert_eq!(panel.focused_row(), PanelRow::FullTextToggle);
        panel.move_down();
        assert_eq!(
            panel.focused_row(),
            PanelRow::SectionHeader(Section::ApplicationType)
        );
        panel.move_up();
        assert_eq!(panel.focused_row(), PanelRow::FullTextToggle);
    }

    #[test]
    fn test_checkbox_reflects_filters() {
        let mut panel = FilterPanel::new();
        focus(
            &mut panel,
            PanelRow::Option {
                section: Section::Source,
                index: 4,
            },
        );

        let unchecked = FilterState::default();
        assert_eq!(
            panel.activate(&unchecked),
            Some(PanelIntent::ToggleFilter {
                key: FilterKey::Source,
                value: "GitHub".to_string(),
                included: true,
            })
        );

        let checked = unchecked.with_value(FilterKey::Source, "GitHub", true);
        assert_eq!(
            panel.activate(&checked),
            Some(PanelIntent::ToggleFilter {
                key: FilterKey::Source,
                value: "GitHub".to_string(),
                included: false,
            })
        );
    }

    #[test]
    fn test_job_checkbox_selects_exclusively() {
        let mut panel = FilterPanel::new();
        focus(
            &mut panel,
            PanelRow::Option {
                section: Section::Jobs,
                index: 1,
            },
        );

        let filters = FilterState::default().with_job("job-123", true);
        assert_eq!(
            panel.activate(&filters),
            Some(PanelIntent::ToggleJob {
                job_id: "job-456".to_string(),
                included: true,
            })
        );

        let filters = FilterState::default().with_job("job-456", true);
        assert_eq!(
            panel.activate(&filters),
            Some(PanelIntent::ToggleJob {
                job_id: "job-456".to_string(),
                included: false,
            })
        );
    }

    #[test]
    fn test_application_type_uses_value_not_label() {
        let mut panel = FilterPanel::new();
        focus(
            &mut panel,
            PanelRow::Option {
                section: Section::ApplicationType,
                index: 1,
            },
        );
        match panel.activate(&FilterState::default()) {
            Some(PanelIntent::ToggleFilter { value, .. }) => assert_eq!(value, "archived"),
            other => panic!("unexpected intent {:?}", other),
        }
    }

    #[test]
    fn test_collapse_hides_options() {
        let mut panel = FilterPanel::new();
        focus(&mut panel, PanelRow::SectionHeader(Section::Jobs));
        let before = panel.rows().len();

        assert_eq!(panel.activate(&FilterState::default()), None);
        assert!(panel.is_collapsed(Section::Jobs));
        assert_eq!(panel.rows().len(), before - JOB_OPTIONS.len());

        panel.activate(&FilterState::default());
        assert!(!panel.is_collapsed(Section::Jobs));
    }

    #[test]
    fn test_placeholder_sections_are_inert() {
        for section in [
            Section::Crm,
            Section::ProfileDetails,
            Section::Responsibility,
            Section::PipelineTasks,
            Section::Education,
        ] {
            assert!(section.is_placeholder());
            let mut panel = FilterPanel::new();
            focus(&mut panel, PanelRow::SectionHeader(section));
            assert_eq!(panel.activate(&FilterState::default()), None);
        }
    }

    #[test]
    fn test_full_text_toggle_is_local() {
        let mut panel = FilterPanel::new();
        focus(&mut panel, PanelRow::FullTextToggle);
        assert_eq!(panel.activate(&FilterState::default()), None);
        assert!(panel.full_text_search());
    }

    #[test]
    fn test_reset_row() {
        let mut panel = FilterPanel::new();
        panel.move_to_bottom();
        assert_eq!(
            panel.activate(&FilterState::default()),
            Some(PanelIntent::ResetFilters)
        );
    }

    #[test]
    fn test_search_editing_emits_full_text() {
        let mut panel = FilterPanel::new();
        panel.focus_search();
        assert!(panel.is_editing_search());

        assert_eq!(
            panel.edit_search(KeyAction::SearchChar('e'), "ali"),
            Some(PanelIntent::SetSearch("alie".to_string()))
        );
        assert_eq!(
            panel.edit_search(KeyAction::SearchBackspace, "alie"),
            Some(PanelIntent::SetSearch("ali".to_string()))
        );
        assert_eq!(panel.edit_search(KeyAction::SearchBackspace, ""), None);
        assert_eq!(
            panel.edit_search(KeyAction::SearchClear, "ali"),
            Some(PanelIntent::SetSearch(String::new()))
        );
        assert_eq!(panel.edit_search(KeyAction::SearchClear, ""), None);

        assert_eq!(panel.edit_search(KeyAction::Escape, "ali"), None);
        assert!(!panel.is_editing_search());
    }
}
