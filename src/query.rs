//! Filter state and request-parameter derivation
//!
//! Everything in this module is pure: `FilterState` values are replaced,
//! never edited in place, and `derive_params` maps the current
//! (search, filters, page) combination to the exact query string the
//! candidates API expects.

use std::fmt;

/// Page size requested from the API. The server echoes it back.
pub const PER_PAGE: u32 = 5;

/// Multi-valued filter fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    ApplicationType,
    Source,
}

impl FilterKey {
    /// Query parameter name for this field
    #[must_use]
    pub const fn param_name(self) -> &'static str {
        match self {
            FilterKey::ApplicationType => "application_type",
            FilterKey::Source => "source",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param_name())
    }
}

/// Set of selected values for one filter field.
///
/// Membership has set semantics; iteration follows selection order so the
/// repeated query parameters come out in the order the user picked them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet(Vec<String>);

impl SelectionSet {
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// New set with `value` added (`included`) or removed
    #[must_use]
    pub fn with(&self, value: &str, included: bool) -> Self {
        let mut values = self.0.clone();
        if included {
            if !self.contains(value) {
                values.push(value.to_string());
            }
        } else {
            values.retain(|v| v != value);
        }
        Self(values)
    }
}

impl<S: Into<String>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::default(), |set, v| set.with(&v.into(), true))
    }
}

/// Canonical filter selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub application_type: SelectionSet,
    pub source: SelectionSet,
    /// Exclusive: at most one job is selected
    pub job_id: Option<String>,
}

impl FilterState {
    #[must_use]
    pub fn set(&self, key: FilterKey) -> &SelectionSet {
        match key {
            FilterKey::ApplicationType => &self.application_type,
            FilterKey::Source => &self.source,
        }
    }

    /// Snapshot with `value` toggled in the set named by `key`
    #[must_use]
    pub fn with_value(&self, key: FilterKey, value: &str, included: bool) -> Self {
        let mut next = self.clone();
        match key {
            FilterKey::ApplicationType => {
                next.application_type = self.application_type.with(value, included);
            }
            FilterKey::Source => next.source = self.source.with(value, included),
        }
        next
    }

    /// Snapshot with the job selection replaced (or cleared)
    #[must_use]
    pub fn with_job(&self, job_id: &str, included: bool) -> Self {
        Self {
            job_id: included.then(|| job_id.to_string()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.application_type.is_empty() && self.source.is_empty() && self.job_id.is_none()
    }

    /// Number of active selections, for the status bar
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.application_type.len() + self.source.len() + usize::from(self.job_id.is_some())
    }
}

/// Request parameters for one candidates query, in wire order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Key/value pairs; repeated keys are kept as separate entries
    #[must_use]
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// All values for a parameter name
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First value for a parameter name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Build the request parameters for the current inputs.
///
/// `page` and `per_page` are always present; `search` and `job_id` only
/// when set; one `application_type`/`source` entry per selected value.
#[must_use]
pub fn derive_params(search: &str, filters: &FilterState, page: u32) -> QueryParams {
    let mut pairs = vec![
        ("page", page.max(1).to_string()),
        ("per_page", PER_PAGE.to_string()),
    ];

    if !search.is_empty() {
        pairs.push(("search", search.to_string()));
    }

    for key in [FilterKey::ApplicationType, FilterKey::Source] {
        pairs.extend(
            filters
                .set(key)
                .iter()
                .map(|value| (key.param_name(), value.to_string())),
        );
    }

    if let Some(job_id) = &filters.job_id {
        pairs.push(("job_id", job_id.clone()));
    }

    QueryParams { pairs }
}
