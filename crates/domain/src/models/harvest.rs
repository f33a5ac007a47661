//! Harvest domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::dates::YearMonth;

use super::field::FieldId;

/// Identifier of a harvest type.
pub type HarvestTypeId = i32;

/// Identifier of a harvest event.
pub type HarvestEventId = i32;

/// A kind of harvest, e.g. "Hay" or "Silage".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HarvestType {
    pub id: HarvestTypeId,
    pub name: String,
}

/// A dated harvest count on one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HarvestEvent {
    pub id: HarvestEventId,
    /// Bale count. Kept non-negative by [`HarvestEvent::decrement`].
    pub value: i32,
    pub time: DateTime<Utc>,
    pub field_id: FieldId,
    pub type_id: HarvestTypeId,
    /// Denormalized name of the harvest type.
    pub type_name: String,
}

impl HarvestEvent {
    /// Adds one bale.
    pub fn increment(&mut self) {
        self.value = self.value.saturating_add(1);
    }

    /// Removes one bale. Returns `false` and leaves the value alone at zero.
    pub fn decrement(&mut self) -> bool {
        if self.value <= 0 {
            return false;
        }
        self.value -= 1;
        true
    }

    /// Month bucket of the event time.
    pub fn period(&self) -> YearMonth {
        YearMonth::of(&self.time)
    }

    /// Calendar year of the event time.
    pub fn year(&self) -> i32 {
        self.period().year
    }
}
