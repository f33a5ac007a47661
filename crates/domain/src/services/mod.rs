//! Domain services for the farm views.
//!
//! Services are pure functions over already-fetched data. They never fail on
//! a single bad record; decode failures become sentinels and are logged.

pub mod field_layers;
pub mod field_table;
pub mod group_area;
pub mod group_lookup;
pub mod harvest_stats;

pub use field_layers::{group_layer, group_layers, peek_feature, FeatureSummary, GroupLayer};
pub use field_table::{
    build_display_rows, DisplayedField, FieldTableQuery, SortDirection, SortKey, SortSpec,
};
pub use group_area::{area_by_group, GroupAreaPoint, GroupAreas};
pub use group_lookup::{build_lookup, resolve, FieldMembership, GroupLookup};
pub use harvest_stats::{
    aggregate_by_date, aggregate_by_group, bales_per_area, events_in_year, harvest_series,
    DateBucket, GroupHarvestTotal, GroupRatio, HarvestSeries, TypeSeries,
};
