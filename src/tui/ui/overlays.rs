//! Overlay rendering: help and candidate detail popups

use chrono::Utc;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::api::CandidateSource;
use crate::formatting::format_last_activity;
use crate::tui::app::App;
use crate::tui::theme::Theme;

use super::widgets::centered_rect;

fn section_title(title: &'static str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(theme.accent).bold(),
    ))
}

pub fn render_help_overlay(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = centered_rect(60, 80, area);

    // Clear the area first
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "cview - Keyboard Shortcuts",
            Style::default().bold(),
        )),
        Line::from(""),
        section_title("Navigation", theme),
        Line::from("  j / Down       Move down"),
        Line::from("  k / Up         Move up"),
        Line::from("  g / Home       Jump to top"),
        Line::from("  G / End        Jump to bottom"),
        Line::from("  Tab            Switch between filters and candidates"),
        Line::from("  Scroll wheel   Navigate up/down"),
        Line::from(""),
        section_title("Filters", theme),
        Line::from("  /              Edit search (Esc or Enter to finish)"),
        Line::from("  Ctrl+u         Clear search while editing"),
        Line::from("  Space / Enter  Toggle checkbox or collapse section"),
        Line::from("  t              Toggle full text search"),
        Line::from("  x              Reset filters (keeps search)"),
        Line::from(""),
        section_title("Candidates", theme),
        Line::from("  h / Left       Previous page"),
        Line::from("  l / Right      Next page"),
        Line::from("  Enter          Candidate details"),
        Line::from(""),
        section_title("General", theme),
        Line::from("  r              Reload current query"),
        Line::from("  ?/F1           Show this help"),
        Line::from("  Esc            Close overlay"),
        Line::from("  q              Quit application"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or Esc to close this help",
            Style::default().fg(theme.border),
        )),
    ];

    let help_para = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .title(" Help "),
        )
        .style(Style::default().fg(theme.fg));

    frame.render_widget(help_para, popup_area);
}

pub fn render_candidate_detail_popup<S: CandidateSource>(
    app: &App<S>,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
) {
    let Some(candidate) = app.selected_candidate() else {
        return;
    };

    let popup_area = centered_rect(70, 70, area);
    frame.render_widget(Clear, popup_area);

    let border_color = candidate
        .application_type
        .as_deref()
        .map(|kind| theme.application_type_color(kind))
        .unwrap_or(theme.border_focused);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", candidate.name));

    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", label), Style::default().bold()),
            Span::raw(value),
        ])
    };
    let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());

    let headline = candidate.headline();
    let mut lines = vec![
        field("ID:", candidate.id.to_string()),
        field(
            "Position:",
            if headline.is_empty() {
                "-".to_string()
            } else {
                headline
            },
        ),
        field("Type:", or_dash(&candidate.application_type)),
        field("Source:", or_dash(&candidate.source)),
        field("Job:", or_dash(&candidate.job_id)),
        field("Status:", or_dash(&candidate.status)),
        field("Last Activity:", format_last_activity(candidate, Utc::now())),
    ];

    if !candidate.extra.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_title("Other", theme));
        for (key, value) in &candidate.extra {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {}: ", key), Style::default().fg(theme.muted)),
                Span::raw(text),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Esc/Enter: close",
        Style::default().fg(theme.border),
    )));

    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(theme.fg));
    frame.render_widget(para, popup_area);
}
