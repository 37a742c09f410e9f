use crate::classifier::Classify;
use crate::error::AnalyticsError;
use core_types::{ModelKind, PredictionRecord, PredictionStatus};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A filter dimension that is either inactive (`all`) or pinned to one value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

/// `all` (or an empty string) selects everything; anything else must parse as `T`.
impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Selection::All);
        }
        trimmed.parse().map(Selection::Only)
    }
}

/// Resolved vs. unresolved predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    All,
    Pending,
    Completed,
}

impl Scope {
    pub fn admits(&self, record: &PredictionRecord) -> bool {
        match self {
            Scope::All => true,
            Scope::Pending => !record.is_resolved(),
            Scope::Completed => record.is_resolved(),
        }
    }
}

impl FromStr for Scope {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Scope::All),
            "pending" => Ok(Scope::Pending),
            "completed" => Ok(Scope::Completed),
            _ => Err(AnalyticsError::InvalidOption {
                option: "scope",
                value: s.to_string(),
            }),
        }
    }
}

/// The active filter options of a view. The default is the identity filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterConfig {
    /// Case-insensitive substring matched against username or stock symbol.
    pub search_term: String,
    pub stock_symbol: Selection<String>,
    pub model: Selection<ModelKind>,
    pub status: Selection<PredictionStatus>,
    pub scope: Scope,
}

impl FilterConfig {
    pub fn is_identity(&self) -> bool {
        self.search_term.is_empty()
            && self.stock_symbol.is_all()
            && self.model.is_all()
            && self.status.is_all()
            && self.scope == Scope::All
    }
}

/// Applies a `FilterConfig` to record sequences.
#[derive(Debug, Clone)]
pub struct RecordFilter {
    config: FilterConfig,
    needle: String,
}

impl RecordFilter {
    pub fn new(config: FilterConfig) -> Self {
        let needle = config.search_term.to_lowercase();
        Self { config, needle }
    }

    /// All active options, combined with logical AND.
    pub fn matches(&self, record: &PredictionRecord) -> bool {
        self.matches_search(record)
            && self.config.stock_symbol.admits(&record.stock_symbol)
            && self.config.model.admits(&record.model_used)
            && self.config.scope.admits(record)
            && (self.config.status.is_all() || self.config.status.admits(&record.status()))
    }

    fn matches_search(&self, record: &PredictionRecord) -> bool {
        self.needle.is_empty()
            || record.username.to_lowercase().contains(&self.needle)
            || record.stock_symbol.to_lowercase().contains(&self.needle)
    }

    /// Returns the matching records in input order. The input is never modified.
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a PredictionRecord>
    where
        I: IntoIterator<Item = &'a PredictionRecord>,
    {
        let kept: Vec<_> = records.into_iter().filter(|r| self.matches(r)).collect();
        tracing::debug!(kept = kept.len(), "Filtered prediction records.");
        kept
    }
}

/// Convenience wrapper for a one-off filter pass.
pub fn filter_records<'a, I>(records: I, config: &FilterConfig) -> Vec<&'a PredictionRecord>
where
    I: IntoIterator<Item = &'a PredictionRecord>,
{
    RecordFilter::new(config.clone()).apply(records)
}
