//! Candidate records and the paginated list response.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Stable candidate identifier, used as the row key.
///
/// The API may send ids as strings or integers; both are normalised
/// to their string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CandidateId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => CandidateId(s),
            RawId::Number(n) => CandidateId(n.to_string()),
        })
    }
}

/// A job applicant as returned by the candidates API
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Candidate {
    pub id: CandidateId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub application_type: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_activity: Option<String>,

    /// Fields this client does not model, kept for the detail view
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Candidate {
    /// "Position @ Company", or whichever half is known
    #[must_use]
    pub fn headline(&self) -> String {
        match (self.position.as_deref(), self.company.as_deref()) {
            (Some(p), Some(c)) => format!("{} @ {}", p, c),
            (Some(p), None) => p.to_string(),
            (None, Some(c)) => c.to_string(),
            (None, None) => String::new(),
        }
    }

    /// Job id and pipeline status for the "Job/Status" column
    #[must_use]
    pub fn job_status(&self) -> String {
        let job = self.job_id.as_deref().unwrap_or("-");
        match self.status.as_deref() {
            Some(status) => format!("{} · {}", job, status),
            None => job.to_string(),
        }
    }

    /// Parse `last_activity`, accepting RFC 3339 timestamps or bare dates
    #[must_use]
    pub fn last_activity_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.last_activity.as_deref()?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}

/// One page of the candidates collection
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CandidatePage {
    pub candidates: Vec<Candidate>,
    pub total: u64,
    pub total_pages: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_response() {
        let json = r#"{
            "candidates": [
                {
                    "id": "cand-001",
                    "name": "Alice Johnson",
                    "position": "Backend Engineer",
                    "company": "Acme",
                    "application_type": "active",
                    "source": "LinkedIn",
                    "job_id": "job-123",
                    "last_activity": "2024-03-01T10:15:00Z",
                    "tags": ["rust", "go"]
                }
            ],
            "total": 11,
            "page": 1,
            "per_page": 5,
            "total_pages": 3
        }"#;

        let page: CandidatePage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total, 11);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.per_page, Some(5));

        let alice = &page.candidates[0];
        assert_eq!(alice.id.as_str(), "cand-001");
        assert_eq!(alice.headline(), "Backend Engineer @ Acme");
        assert!(alice.extra.contains_key("tags"));
        assert!(alice.last_activity_at().is_some());
    }

    #[test]
    fn test_numeric_id_is_normalised() {
        let json = r#"{"id": 42, "name": "Bob"}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.id, CandidateId::new("42"));
        assert_eq!(candidate.job_status(), "-");
    }

    #[test]
    fn test_missing_total_pages_is_rejected() {
        let json = r#"{"candidates": [], "total": 0}"#;
        assert!(serde_json::from_str::<CandidatePage>(json).is_err());
    }

    #[test]
    fn test_last_activity_accepts_plain_date() {
        let json = r#"{"id": "c", "name": "C", "last_activity": "2024-02-29"}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        let at = candidate.last_activity_at().unwrap();
        assert_eq!(at.format("%Y-%m-%d").to_string(), "2024-02-29");
    }

    #[test]
    fn test_job_status_with_status() {
        let json = r#"{"id": "c", "name": "C", "job_id": "job-567", "status": "Interview"}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.job_status(), "job-567 · Interview");
    }
}
