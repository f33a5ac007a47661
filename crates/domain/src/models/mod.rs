//! Domain models for the farm dataset.

pub mod farm;
pub mod field;
pub mod field_group;
pub mod harvest;

pub use farm::{Farm, FarmId};
pub use field::{Field, FieldId};
pub use field_group::{FieldGroup, FieldRef, GroupId, NewFieldGroup};
pub use harvest::{HarvestEvent, HarvestEventId, HarvestType, HarvestTypeId};
