//! Summed field area per group.

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::geometry::{boundary_area, is_valid_area, to_dekar};
use crate::models::{Field, FieldGroup, GroupId};

/// Square meters of field area per group.
///
/// Ungrouped fields and fields whose boundary could not be decoded are left
/// out of the sums.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupAreas {
    square_meters: HashMap<GroupId, f64>,
}

impl GroupAreas {
    pub fn from_fields(fields: &[Field]) -> Self {
        let mut square_meters: HashMap<GroupId, f64> = HashMap::new();
        for field in fields {
            let Some(group_id) = field.group_id else {
                continue;
            };
            let area = boundary_area(&field.boundary);
            if !is_valid_area(area) {
                debug!(field_id = field.id, "Leaving field out of group area");
                continue;
            }
            *square_meters.entry(group_id).or_insert(0.0) += area;
        }
        Self { square_meters }
    }

    /// Summed area in square meters, 0 for groups without measurable fields.
    pub fn square_meters(&self, group_id: GroupId) -> f64 {
        self.square_meters.get(&group_id).copied().unwrap_or(0.0)
    }

    /// Summed area in dekar.
    pub fn dekar(&self, group_id: GroupId) -> f64 {
        to_dekar(self.square_meters(group_id))
    }
}

/// One bar of the group area chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupAreaPoint {
    pub group_id: GroupId,
    pub group_name: String,
    /// Dekar, rounded to two decimals.
    pub dekar: f64,
    /// `#rrggbb` fill color.
    pub color: String,
}

/// Area per group in dekar, one point per group in group order.
pub fn area_by_group(fields: &[Field], groups: &[FieldGroup]) -> Vec<GroupAreaPoint> {
    let areas = GroupAreas::from_fields(fields);
    groups
        .iter()
        .map(|group| GroupAreaPoint {
            group_id: group.id,
            group_name: group.name.clone(),
            dekar: round_to_hundredths(areas.dekar(group.id)),
            color: group.hex_color(),
        })
        .collect()
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
