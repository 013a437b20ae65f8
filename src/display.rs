//! Plain-terminal output for the `list` subcommand

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, Width, object::Rows},
};

use crate::formatting::{format_last_activity, format_results_summary, truncate_string};
use crate::models::{Candidate, CandidatePage};
use crate::query::QueryParams;

/// Table row for candidate display
#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "ID")]
    id: String,

    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Position")]
    headline: String,

    #[tabled(rename = "Job/Status")]
    job_status: String,

    #[tabled(rename = "Type")]
    application_type: String,

    #[tabled(rename = "Source")]
    source: String,

    #[tabled(rename = "Last Activity")]
    last_activity: String,
}

impl CandidateRow {
    fn from_candidate(candidate: &Candidate, name_max_length: usize, now: DateTime<Utc>) -> Self {
        Self {
            id: candidate.id.to_string(),
            name: truncate_string(&candidate.name, name_max_length),
            headline: candidate.headline(),
            job_status: candidate.job_status(),
            application_type: format_application_type(candidate.application_type.as_deref()),
            source: candidate.source.clone().unwrap_or_else(|| "-".to_string()),
            last_activity: format_last_activity(candidate, now),
        }
    }
}

/// Color the application type: active green, archived dimmed
fn format_application_type(value: Option<&str>) -> String {
    match value {
        Some(v) if v.eq_ignore_ascii_case("active") => v.green().to_string(),
        Some(v) if v.eq_ignore_ascii_case("archived") => v.bright_black().to_string(),
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

/// One-line description of the active query
#[must_use]
pub fn format_query_line(params: &QueryParams) -> String {
    let filters: Vec<String> = params
        .pairs()
        .iter()
        .filter(|(k, _)| !matches!(*k, "page" | "per_page"))
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();

    if filters.is_empty() {
        "no filters".to_string()
    } else {
        filters.join(" ")
    }
}

/// Format one page of results as a table with a summary line
#[must_use]
pub fn format_candidates(
    page: &CandidatePage,
    current_page: u32,
    name_max_length: usize,
    now: DateTime<Utc>,
) -> String {
    let mut output = String::new();
    output.push_str(&format_results_summary(page.total).bold().to_string());
    output.push('\n');

    if page.candidates.is_empty() {
        output.push_str(&"No candidates found.".yellow().to_string());
        return output;
    }

    let rows: Vec<CandidateRow> = page
        .candidates
        .iter()
        .map(|c| CandidateRow::from_candidate(c, name_max_length, now))
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Width::wrap(200).keep_words(true))
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    output.push_str(&table.to_string());

    if page.total_pages > 1 {
        output.push_str(&format!(
            "\n{}",
            format!("Page {} of {}", current_page, page.total_pages).bright_black()
        ));
    }

    output
}
