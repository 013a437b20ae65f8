//! Data models for the candidates API and local configuration.

mod candidate;
mod config;

pub use candidate::{Candidate, CandidateId, CandidatePage};
pub use config::{CviewConfig, validate_api_url};
