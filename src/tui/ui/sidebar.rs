//! Filter sidebar rendering

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::api::CandidateSource;
use crate::query::FilterState;
use crate::tui::app::{App, FilterPanel, Focus, PanelRow, SORT_LABEL, Section, is_checked};
use crate::tui::theme::Theme;

use super::widgets::calculate_scroll_offset;

const SEARCH_PLACEHOLDER: &str = "Search candidates...";
const FULL_TEXT_HINT: &str = "(Includes resumes and notes)";

pub fn render_sidebar<S: CandidateSource>(
    app: &App<S>,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    let focused = app.focus == Focus::Sidebar;
    let active = app.controller.filters().active_count();
    let title = if active > 0 {
        format!(" Filters ({}) ", active)
    } else {
        " Filters ".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            theme.border_focused
        } else {
            theme.border
        }))
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = app.panel.rows();
    let height = inner.height as usize;
    let selected = app.panel.focused_index();
    let offset = calculate_scroll_offset(selected, height, rows.len());

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, row)| {
            let line = row_line(
                *row,
                &app.panel,
                app.controller.filters(),
                app.controller.search(),
                theme,
            );
            if focused && i == selected {
                line.style(
                    Style::default()
                        .bg(theme.selected_bg)
                        .fg(theme.selected_fg),
                )
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn checkbox(checked: bool, theme: &Theme) -> Span<'static> {
    if checked {
        Span::styled("[x] ", Style::default().fg(theme.checked).bold())
    } else {
        Span::styled("[ ] ", Style::default().fg(theme.muted))
    }
}

/// Number of selected values under a section
fn section_count(section: Section, filters: &FilterState) -> usize {
    section
        .options()
        .iter()
        .filter(|o| is_checked(section, o, filters))
        .count()
}

fn row_line<'a>(
    row: PanelRow,
    panel: &FilterPanel,
    filters: &FilterState,
    search: &'a str,
    theme: &Theme,
) -> Line<'a> {
    match row {
        PanelRow::Search => {
            let mut spans = vec![Span::styled("Search: ", Style::default().bold())];
            if search.is_empty() && !panel.is_editing_search() {
                spans.push(Span::styled(
                    SEARCH_PLACEHOLDER,
                    Style::default().fg(theme.muted).italic(),
                ));
            } else {
                spans.push(Span::raw(search));
            }
            if panel.is_editing_search() {
                spans.push(Span::styled("_", Style::default().fg(theme.accent)));
            }
            Line::from(spans)
        }
        PanelRow::FullTextToggle => Line::from(vec![
            checkbox(panel.full_text_search(), theme),
            Span::raw("Full Text Search "),
            Span::styled(FULL_TEXT_HINT, Style::default().fg(theme.muted)),
        ]),
        PanelRow::SortLabel => Line::from(vec![
            Span::styled("Sort: ", Style::default().fg(theme.muted)),
            Span::styled(SORT_LABEL, Style::default().fg(theme.muted)),
        ]),
        PanelRow::SectionHeader(section) => {
            let marker = if panel.is_collapsed(section) { "+ " } else { "- " };
            let style = if section.is_placeholder() {
                Style::default().fg(theme.muted)
            } else {
                Style::default().bold()
            };
            let mut spans = vec![Span::raw(marker), Span::styled(section.title(), style)];
            let count = section_count(section, filters);
            if count > 0 {
                spans.push(Span::styled(
                    format!(" ({})", count),
                    Style::default().fg(theme.checked),
                ));
            }
            Line::from(spans)
        }
        PanelRow::Option { section, index } => match section.options().get(index) {
            Some(option) => Line::from(vec![
                Span::raw("  "),
                checkbox(is_checked(section, option, filters), theme),
                Span::raw(option.label),
            ]),
            None => Line::default(),
        },
        PanelRow::Reset => Line::from(Span::styled(
            "[ Reset Filters ]",
            Style::default().fg(theme.warning).bold(),
        )),
    }
}
