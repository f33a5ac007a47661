//! Domain layer for the Sorjordet farm tools.
//!
//! This crate contains:
//! - Domain models (Farm, FieldGroup, Field, HarvestEvent, HarvestType)
//! - Field boundary geometry (GeoJSON codec, area in dekar)
//! - Pure view-model services (group lookup, field table, harvest statistics)

pub mod geometry;
pub mod models;
pub mod services;
