//! Map layer assembly for field groups.

use serde::Serialize;
use std::fmt;
use tracing::warn;

use super::field_table::DisplayedField;
use crate::geometry::{decode_boundary, encode_boundary, DecodedBoundary, FeatureProperties};
use crate::models::{Field, FieldGroup, FieldId, GroupId};

/// Labelled features for one group, drawn in the group's color.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupLayer {
    pub group_id: GroupId,
    pub group_name: String,
    /// Persisted rgba color used for fill and stroke.
    pub draw_color: String,
    /// Encoded GeoJSON features, one per drawable field.
    pub features: Vec<String>,
    /// Fields left out because their boundary could not be decoded.
    pub skipped: Vec<FieldId>,
}

/// Builds the layer for `group` from the fields that belong to it.
pub fn group_layer(group: &FieldGroup, fields: &[Field]) -> GroupLayer {
    let mut features = Vec::new();
    let mut skipped = Vec::new();
    for field in fields.iter().filter(|f| f.group_id == Some(group.id)) {
        match decode_boundary(&field.boundary) {
            Ok(polygon) => {
                let props = FeatureProperties::new(field.name.as_str(), group.name.as_str());
                features.push(encode_boundary(&polygon, &props));
            }
            Err(e) => {
                warn!(field_id = field.id, error = %e, "Skipping field on map");
                skipped.push(field.id);
            }
        }
    }
    GroupLayer {
        group_id: group.id,
        group_name: group.name.clone(),
        draw_color: group.draw_color.clone(),
        features,
        skipped,
    }
}

/// One layer per group, in group order.
pub fn group_layers(groups: &[FieldGroup], fields: &[Field]) -> Vec<GroupLayer> {
    groups.iter().map(|g| group_layer(g, fields)).collect()
}

/// Decodes a single field for a preview map, labelled with its names.
pub fn peek_feature(field: &Field, group_name: &str) -> Option<DecodedBoundary> {
    match decode_boundary(&field.boundary) {
        Ok(polygon) => Some(DecodedBoundary {
            polygon,
            properties: FeatureProperties::new(field.name.as_str(), group_name),
        }),
        Err(e) => {
            warn!(field_id = field.id, error = %e, "Cannot preview field");
            None
        }
    }
}

/// Popup content for a selected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSummary {
    pub name: String,
    pub group_name: String,
    pub area: String,
}

impl From<&DisplayedField> for FeatureSummary {
    fn from(row: &DisplayedField) -> Self {
        Self {
            name: row.name.clone(),
            group_name: row.group_name.clone(),
            area: row.area_label(),
        }
    }
}

impl fmt::Display for FeatureSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Navn: {}", self.name)?;
        writeln!(f, "Gruppe: {}", self.group_name)?;
        write!(f, "Areal: {}", self.area)
    }
}
