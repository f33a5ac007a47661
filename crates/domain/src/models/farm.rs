//! Farm domain model.

use serde::{Deserialize, Serialize};

/// Identifier of a farm.
pub type FarmId = i32;

/// The ownership root for field groups and fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Farm {
    pub id: FarmId,
    pub name: String,
    /// Map center for the farm, as stored by the map view.
    #[serde(default)]
    pub farm_coordinates: String,
}
