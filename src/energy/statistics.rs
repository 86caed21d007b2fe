use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Metadata for one long-term statistic the picker can offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticMetadata {
    pub statistic_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub unit_of_measurement: Option<String>,
}

impl StatisticMetadata {
    pub fn new(statistic_id: impl Into<String>, unit: Option<&str>) -> Self {
        Self {
            statistic_id: statistic_id.into(),
            name: None,
            source: "recorder".to_string(),
            unit_of_measurement: unit.map(str::to_string),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// External statistics use `domain:id`; entity-backed ones use `domain.object_id`.
    pub fn is_entity(&self) -> bool {
        !self.statistic_id.contains(':')
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.statistic_id)
    }

    /// Load a JSON array of statistics.
    pub fn load_catalog(path: &Path) -> Result<Vec<Self>, CatalogError> {
        let content = fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read statistics catalog '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse statistics catalog '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
