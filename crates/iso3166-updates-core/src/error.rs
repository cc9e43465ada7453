// crates/iso3166-updates-core/src/error.rs
use thiserror::Error;

/// Errors produced by the registry, the filter parsers, the matchers and the
/// dataset loaders.
///
/// Validation variants always embed the caller's original input so the
/// transport can echo it back verbatim.
#[derive(Debug, Error)]
pub enum UpdatesError {
    #[error("Invalid country code input: {0}")]
    InvalidCode(String),

    #[error("Invalid year input: {0}")]
    InvalidYear(String),

    #[error("Ambiguous year expression, only one of '<>', '-', '>', '<' or ',' may be used: {0}")]
    AmbiguousYearExpression(String),

    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("Invalid month input: {0}")]
    InvalidMonths(String),

    #[error("Invalid sort order (expected dateAsc or dateDesc): {0}")]
    InvalidSortOrder(String),

    #[error("No match found for {term:?}{}", suggestion.as_ref().map(|s| format!(", did you mean {s:?}?")).unwrap_or_default())]
    NoMatchFound {
        term: String,
        suggestion: Option<String>,
    },

    #[error("Conflicting filters, only one of year, months or date range may be used: {0}")]
    ConflictingFilters(String),

    #[error("Empty value for parameter: {0}")]
    EmptyParameter(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Bincode(#[from] bincode::Error),

    #[cfg(feature = "fetch")]
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl UpdatesError {
    /// `true` for errors caused by malformed query input, `false` for
    /// failures while loading a dataset.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            UpdatesError::InvalidCode(_)
                | UpdatesError::InvalidYear(_)
                | UpdatesError::AmbiguousYearExpression(_)
                | UpdatesError::InvalidDateFormat(_)
                | UpdatesError::InvalidMonths(_)
                | UpdatesError::InvalidSortOrder(_)
                | UpdatesError::NoMatchFound { .. }
                | UpdatesError::ConflictingFilters(_)
                | UpdatesError::EmptyParameter(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, UpdatesError>;
