//! Dataset snapshots.
//!
//! A snapshot is the JSON the farm API returns for its list endpoints,
//! gathered into one document.

use domain::models::{Farm, FarmId, Field, FieldGroup, HarvestEvent, HarvestType};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Error type for loading a dataset snapshot.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Already-fetched farm data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Dataset {
    #[serde(default)]
    pub farms: Vec<Farm>,
    #[serde(default)]
    pub groups: Vec<FieldGroup>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub harvest_types: Vec<HarvestType>,
    #[serde(default)]
    pub harvest_events: Vec<HarvestEvent>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset: Self = serde_json::from_str(&text).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            path = %path.display(),
            groups = dataset.groups.len(),
            fields = dataset.fields.len(),
            harvest_events = dataset.harvest_events.len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    /// Restricts the snapshot to one farm's groups and fields, and to the
    /// harvest events on those fields.
    pub fn for_farm(&self, farm_id: FarmId) -> Self {
        let fields: Vec<Field> = self
            .fields
            .iter()
            .filter(|f| f.farm_id == farm_id)
            .cloned()
            .collect();
        let harvest_events = self
            .harvest_events
            .iter()
            .filter(|e| fields.iter().any(|f| f.id == e.field_id))
            .cloned()
            .collect();
        Self {
            farms: self
                .farms
                .iter()
                .filter(|f| f.id == farm_id)
                .cloned()
                .collect(),
            groups: self
                .groups
                .iter()
                .filter(|g| g.farm_id == farm_id)
                .cloned()
                .collect(),
            fields,
            harvest_types: self.harvest_types.clone(),
            harvest_events,
        }
    }
}
