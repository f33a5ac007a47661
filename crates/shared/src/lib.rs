//! Shared utilities and common types for the Sorjordet farm tools.
//!
//! This crate provides helpers used across the other crates:
//! - Group draw color conversion (hex and rgba)
//! - Locale-aware name comparison
//! - Month bucketing and date formatting

pub mod color;
pub mod dates;
pub mod text;
