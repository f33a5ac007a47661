//! Field domain model.

use serde::{Deserialize, Serialize};

use super::farm::FarmId;
use super::field_group::GroupId;

/// Identifier of a field.
pub type FieldId = i32;

/// A mapped land parcel with a drawn boundary.
///
/// Wire names follow the farm API (`map_polygon_string`,
/// `farm_field_group_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    pub farm_id: FarmId,
    /// Owning group, `None` for ungrouped fields.
    #[serde(rename = "farm_field_group_id", default)]
    pub group_id: Option<GroupId>,
    /// Boundary as a single GeoJSON feature (projected, metric).
    #[serde(rename = "map_polygon_string", default)]
    pub boundary: String,
}

impl Field {
    pub fn is_grouped(&self) -> bool {
        self.group_id.is_some()
    }
}
