//! Candidate list and pagination rendering

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::api::CandidateSource;
use crate::formatting::{format_results_summary, truncate_string};
use crate::models::Candidate;
use crate::tui::app::{App, Focus};
use crate::tui::theme::Theme;

use super::widgets::{calculate_scroll_offset, create_table_header, spinner};

/// Page numbers shown around the current page
const PAGE_WINDOW: u64 = 7;

pub fn render_candidates<S: CandidateSource>(
    app: &App<S>,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    let result = app.result();
    let focused = app.focus == Focus::Candidates;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            theme.border_focused
        } else {
            theme.border
        }))
        .title(" Candidates ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let show_pager = result.total_pages > 1;
    let layout = Layout::vertical([
        Constraint::Length(1), // Summary
        Constraint::Min(0),    // Body
        Constraint::Length(if show_pager { 1 } else { 0 }),
    ])
    .split(inner);

    let summary = Paragraph::new(format_results_summary(result.total))
        .style(Style::default().fg(theme.fg).bold());
    frame.render_widget(summary, layout[0]);

    if result.loading {
        let msg = format!("Loading candidates... {}", spinner(app.spinner_frame));
        let para = Paragraph::new(msg)
            .style(Style::default().fg(theme.muted))
            .alignment(Alignment::Center);
        frame.render_widget(para, layout[1]);
    } else if let Some(error) = &result.error {
        let para = Paragraph::new(vec![
            Line::from(Span::styled(error.as_str(), Style::default().fg(theme.error))),
            Line::from(Span::styled(
                "Press r to retry",
                Style::default().fg(theme.muted),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(para, layout[1]);
    } else if result.candidates.is_empty() {
        let para = Paragraph::new("No candidates found.")
            .style(Style::default().fg(theme.muted))
            .alignment(Alignment::Center);
        frame.render_widget(para, layout[1]);
    } else {
        render_rows(app, frame, layout[1], theme, focused);
    }

    if show_pager {
        let pager = pagination_line(app.controller.page(), result.total_pages, theme);
        frame.render_widget(
            Paragraph::new(pager).alignment(Alignment::Center),
            layout[2],
        );
    }
}

fn render_rows<S: CandidateSource>(
    app: &App<S>,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    focused: bool,
) {
    let candidates = &app.result().candidates;
    let header = create_table_header(&["Name", "Job/Status"], theme);

    let available_height = area.height.saturating_sub(1) as usize; // -1 for header
    let selected = app.list_state.selected;
    let scroll_offset = calculate_scroll_offset(selected, available_height, candidates.len());
    let name_max = app.config.display.name_max_length;

    let rows: Vec<Row> = candidates
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(available_height)
        .map(|(i, c)| candidate_row(c, focused && i == selected, name_max, theme))
        .collect();

    let widths = [Constraint::Percentage(45), Constraint::Percentage(55)];
    let table = Table::new(rows, widths).header(header);
    frame.render_widget(table, area);
}

fn candidate_row(
    candidate: &Candidate,
    is_selected: bool,
    name_max: usize,
    theme: &Theme,
) -> Row<'static> {
    let name_style = match candidate.application_type.as_deref() {
        Some(kind) => Style::default().fg(theme.application_type_color(kind)),
        None => Style::default().fg(theme.fg),
    };

    let row = Row::new(vec![
        Cell::from(truncate_string(&candidate.name, name_max)).style(name_style),
        Cell::from(candidate.job_status()),
    ]);

    if is_selected {
        row.style(
            Style::default()
                .bg(theme.selected_bg)
                .fg(theme.selected_fg),
        )
    } else {
        row
    }
}

/// Page numbers to display: a window of at most `PAGE_WINDOW` pages
/// around `current`, clamped to `1..=total`.
fn page_numbers(current: u64, total: u64) -> std::ops::RangeInclusive<u64> {
    if total <= PAGE_WINDOW {
        return 1..=total;
    }
    let half = PAGE_WINDOW / 2;
    let start = current.saturating_sub(half).max(1).min(total - PAGE_WINDOW + 1);
    start..=start + PAGE_WINDOW - 1
}

fn pagination_line(current: u32, total_pages: u64, theme: &Theme) -> Line<'static> {
    let current = u64::from(current);
    let enabled = Style::default().fg(theme.accent);
    let disabled = Style::default().fg(theme.muted);

    let mut spans = vec![Span::styled(
        "< Prev ",
        if current > 1 { enabled } else { disabled },
    )];

    let window = page_numbers(current, total_pages);
    if *window.start() > 1 {
        spans.push(Span::styled(" ...", disabled));
    }
    for page in window.clone() {
        if page == current {
            spans.push(Span::styled(
                format!(" [{}]", page),
                Style::default().fg(theme.selected_fg).bg(theme.selected_bg).bold(),
            ));
        } else {
            spans.push(Span::styled(format!(" {}", page), Style::default().fg(theme.fg)));
        }
    }
    if *window.end() < total_pages {
        spans.push(Span::styled(" ...", disabled));
    }

    spans.push(Span::styled(
        "  Next >",
        if current < total_pages { enabled } else { disabled },
    ));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_numbers_small_total() {
        assert_eq!(page_numbers(1, 3), 1..=3);
    }

    #[test]
    fn test_page_numbers_window_clamps() {
        assert_eq!(page_numbers(1, 20), 1..=7);
        assert_eq!(page_numbers(10, 20), 7..=13);
        assert_eq!(page_numbers(20, 20), 14..=20);
    }

    #[test]
    fn test_pagination_line_marks_current() {
        let line = pagination_line(2, 3, &Theme::dark());
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "< Prev  1 [2] 3  Next >");
    }
}
