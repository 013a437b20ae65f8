//! UI rendering for the TUI
//!
//! Rendering is event-driven: we only render when an event triggers a state
//! change, not at a fixed frame rate.

mod candidates;
mod overlays;
mod sidebar;
mod widgets;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::api::CandidateSource;
use crate::display::format_query_line;
use crate::tui::app::{App, Focus, ModalState};
use crate::tui::theme::Theme;

use candidates::render_candidates;
use overlays::{render_candidate_detail_popup, render_help_overlay};
use sidebar::render_sidebar;

const SIDEBAR_WIDTH: u16 = 52;

/// Render the entire TUI
pub fn render<S: CandidateSource>(app: &App<S>, frame: &mut Frame) {
    let theme = &app.theme;
    let area = frame.area();

    // Main layout: header, content, footer
    let layout = Layout::vertical([
        Constraint::Length(1), // Info bar
        Constraint::Min(0),    // Main content
        Constraint::Length(2), // Status bar
    ])
    .split(area);

    render_info_bar(app, frame, layout[0], theme);

    let content = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(layout[1]);
    render_sidebar(app, frame, content[0], theme);
    render_candidates(app, frame, content[1], theme);

    render_status_bar(app, frame, layout[2], theme);

    // Overlays
    match app.modal {
        ModalState::Help => render_help_overlay(frame, area, theme),
        ModalState::Detail => render_candidate_detail_popup(app, frame, area, theme),
        ModalState::None => {}
    }
}

fn render_info_bar<S: CandidateSource>(app: &App<S>, frame: &mut Frame, area: Rect, theme: &Theme) {
    let info = format!(
        " cview | {} | Page {} | {}",
        app.config.api.base_url,
        app.controller.page(),
        format_query_line(&app.controller.params()),
    );
    let para = Paragraph::new(info).style(Style::default().fg(theme.border));
    frame.render_widget(para, area);
}

fn render_status_bar<S: CandidateSource>(
    app: &App<S>,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    let layout = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

    // Keybindings line - context-sensitive
    let keybinds = if app.is_editing_search() {
        " type to search  Ctrl+u:clear  Esc/Enter:done "
    } else {
        match app.focus {
            Focus::Sidebar => {
                " j/k:move  Space:toggle  /:search  x:reset  Tab:candidates  ?:help  q:quit "
            }
            Focus::Candidates => {
                " j/k:move  h/l:page  Enter:detail  r:reload  Tab:filters  ?:help  q:quit "
            }
        }
    };
    let keybinds_para = Paragraph::new(keybinds).style(Style::default().fg(theme.border));
    frame.render_widget(keybinds_para, layout[0]);

    let mut status_parts = vec![Span::styled(
        format!(" [{}]", app.focus.label()),
        Style::default().fg(theme.accent).bold(),
    )];

    if app.panel.full_text_search() {
        status_parts.push(Span::styled(
            " Full text",
            Style::default().fg(theme.checked),
        ));
    }

    let result = app.result();
    status_parts.push(Span::raw(" | "));
    if result.loading {
        status_parts.push(Span::styled("Loading...", Style::default().fg(theme.warning)));
    } else if result.error.is_some() {
        status_parts.push(Span::styled("Request failed", Style::default().fg(theme.error)));
    } else {
        status_parts.push(Span::styled(
            format!("{} of {} pages", app.controller.page(), result.total_pages.max(1)),
            Style::default().fg(theme.border),
        ));
    }

    // Config warnings stay until fixed
    if let Some(warning) = app.feedback.warning_summary() {
        status_parts.push(Span::styled(
            format!(" | WARN: {}", warning),
            Style::default().fg(theme.warning),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(status_parts)), layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::controller::FetchCompletion;
    use crate::models::{CandidatePage, CviewConfig};
    use crate::query::QueryParams;
    use crate::tui::event::DataEvent;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    /// Never answers; tests feed completions by hand
    struct SilentSource;

    impl CandidateSource for SilentSource {
        async fn fetch(&self, _params: &QueryParams) -> Result<CandidatePage, ApiError> {
            std::future::pending().await
        }
    }

    fn app() -> (App<SilentSource>, mpsc::Receiver<DataEvent>) {
        let (tx, rx) = mpsc::channel(8);
        let app = App::new(Arc::new(SilentSource), tx, CviewConfig::default(), Vec::new());
        (app, rx)
    }

    fn page(count: usize, total_pages: u64) -> CandidatePage {
        let candidates: Vec<_> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "id": i, "name": format!("Person {}", i),
                    "job_id": "job-123", "status": "Interview"
                })
            })
            .collect();
        let total = count as u64 * total_pages;
        serde_json::from_value(serde_json::json!({
            "candidates": candidates,
            "total": total,
            "total_pages": total_pages
        }))
        .unwrap()
    }

    fn deliver(app: &mut App<SilentSource>, outcome: Result<CandidatePage, ApiError>) {
        let generation = app.controller.generation();
        app.handle_data(DataEvent::CandidatesFetched(FetchCompletion {
            generation,
            outcome,
        }));
    }

    fn draw(app: &App<SilentSource>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_loading_state() {
        let (mut app, _rx) = app();
        app.start();
        let screen = draw(&app);
        assert!(screen.contains("Loading candidates..."));
        assert!(!screen.contains("No candidates found."));
    }

    #[tokio::test]
    async fn test_rows_and_summary() {
        let (mut app, _rx) = app();
        app.start();
        deliver(&mut app, Ok(page(2, 1)));

        let screen = draw(&app);
        assert!(screen.contains("Showing 2 candidate applications"));
        assert!(screen.contains("Name"));
        assert!(screen.contains("Job/Status"));
        assert!(screen.contains("Person 1"));
        assert!(screen.contains("job-123"));
        assert!(!screen.contains("Next >"));
    }

    #[tokio::test]
    async fn test_pager_only_with_multiple_pages() {
        let (mut app, _rx) = app();
        app.start();
        deliver(&mut app, Ok(page(5, 3)));

        let screen = draw(&app);
        assert!(screen.contains("< Prev"));
        assert!(screen.contains("[1]"));
        assert!(screen.contains("Next >"));
    }

    #[tokio::test]
    async fn test_empty_state() {
        let (mut app, _rx) = app();
        app.start();
        deliver(&mut app, Ok(page(0, 0)));
        assert!(draw(&app).contains("No candidates found."));
    }

    #[tokio::test]
    async fn test_error_state() {
        let (mut app, _rx) = app();
        app.start();
        deliver(
            &mut app,
            Err(ApiError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR)),
        );

        let screen = draw(&app);
        assert!(screen.contains("Unable to load candidates. Please try again."));
        assert!(!screen.contains("Loading candidates..."));
        assert!(!screen.contains("No candidates found."));
    }

    #[tokio::test]
    async fn test_sidebar_rows() {
        let (app, _rx) = app();
        let screen = draw(&app);
        assert!(screen.contains("Search candidates..."));
        assert!(screen.contains("Full Text Search"));
        assert!(screen.contains("(Includes resumes and notes)"));
        assert!(screen.contains("Last Activity (new to old)"));
        assert!(screen.contains("Application Type"));
        assert!(screen.contains("Career Page"));
    }

    #[tokio::test]
    async fn test_help_overlay() {
        let (mut app, _rx) = app();
        app.modal = ModalState::Help;
        assert!(draw(&app).contains("Keyboard Shortcuts"));
    }

    #[tokio::test]
    async fn test_detail_popup_shows_extra_fields() {
        let (mut app, _rx) = app();
        app.start();
        let page: CandidatePage = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "id": 42, "name": "Dana Reyes",
                "position": "Backend Engineer", "company": "Acme",
                "application_type": "active", "source": "Referral",
                "job_id": "job-456", "status": "Offer",
                "email": "dana@example.com", "years_experience": 7
            }],
            "total": 1,
            "total_pages": 1
        }))
        .unwrap();
        deliver(&mut app, Ok(page));
        app.modal = ModalState::Detail;

        let screen = draw(&app);
        assert!(screen.contains(" Dana Reyes "));
        assert!(screen.contains("Referral"));
        assert!(screen.contains("Offer"));
        assert!(screen.contains("Other"));
        assert!(screen.contains("email: dana@example.com"));
        assert!(screen.contains("years_experience: 7"));
        assert!(screen.contains("Esc/Enter: close"));
    }

    #[tokio::test]
    async fn test_detail_popup_without_selection_draws_nothing() {
        let (mut app, _rx) = app();
        app.start();
        deliver(&mut app, Ok(page(0, 0)));
        app.modal = ModalState::Detail;
        assert!(!draw(&app).contains("Esc/Enter: close"));
    }
}
