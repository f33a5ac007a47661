//! Farm statistics tool.
//!
//! Loads a dataset snapshot and renders the field table, group areas,
//! harvest statistics and map layers as JSON.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod logging;
pub mod report;
