// crates/iso3166-updates-core/src/config.rs
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables of the query engine.
///
/// Every field has a default, so a config file only needs to list what it
/// changes:
///
/// ```json
/// { "excluded_codes": ["XK"], "suggestion_threshold": 70 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Codes left out of the implicit all-countries set and rejected by
    /// strict normalization.
    pub excluded_codes: Vec<String>,
    /// Best score needed before a failed name lookup suggests a name.
    pub suggestion_threshold: u8,
    /// Likeness used for name filters when the caller gives none.
    pub name_likeness: u8,
    /// Likeness used for search when the caller gives none.
    pub search_likeness: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            excluded_codes: vec!["XK".to_string()],
            suggestion_threshold: 60,
            name_likeness: 100,
            search_likeness: 100,
        }
    }
}

impl EngineConfig {
    #[cfg(feature = "json")]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            crate::error::UpdatesError::NotFound(format!(
                "Config not found at {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(config)
    }

    #[cfg(not(feature = "json"))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Err(crate::error::UpdatesError::NotFound(format!(
            "reading {} requires the 'json' feature",
            path.as_ref().display()
        )))
    }
}
