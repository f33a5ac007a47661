//! Report assembly over a dataset snapshot.

use domain::services::{
    aggregate_by_date, aggregate_by_group, area_by_group, bales_per_area, events_in_year,
    group_layers, harvest_series, DateBucket, DisplayedField, FieldTableQuery, GroupAreaPoint,
    GroupAreas, GroupHarvestTotal, GroupLayer, GroupRatio, HarvestSeries,
};
use domain::models::HarvestEvent;
use serde::Serialize;
use shared::dates::year_range;
use std::borrow::Cow;
use tracing::info;

use crate::dataset::Dataset;

/// Parameters for building a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Field table shown in full.
    pub table: FieldTableQuery,
    /// Rows in the dashboard summary table.
    pub summary_rows: usize,
    /// Restrict harvest statistics to one year.
    pub year: Option<i32>,
    /// First year offered by the year selector.
    pub first_harvest_year: i32,
    /// Last year offered by the year selector.
    pub current_year: i32,
}

/// Harvest statistics section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HarvestReport {
    pub year: Option<i32>,
    pub by_group: Vec<GroupHarvestTotal>,
    pub by_date: Vec<DateBucket>,
    pub chart: HarvestSeries,
    pub bales_per_area: Vec<GroupRatio>,
}

/// Everything the farm dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FarmReport {
    pub fields: Vec<DisplayedField>,
    pub summary: Vec<DisplayedField>,
    pub group_areas: Vec<GroupAreaPoint>,
    pub harvests: HarvestReport,
    pub years: Vec<i32>,
}

/// The field table view.
pub fn field_rows(dataset: &Dataset, query: &FieldTableQuery) -> Vec<DisplayedField> {
    query.run(&dataset.fields, &dataset.groups)
}

/// The dashboard field summary: largest fields first.
pub fn summary_rows(dataset: &Dataset, rows: usize) -> Vec<DisplayedField> {
    field_rows(dataset, &FieldTableQuery::summary(rows))
}

/// Map layers, one per group.
pub fn map_layers(dataset: &Dataset) -> Vec<GroupLayer> {
    group_layers(&dataset.groups, &dataset.fields)
}

/// Harvest statistics, optionally for one year.
pub fn harvest_report(dataset: &Dataset, year: Option<i32>) -> HarvestReport {
    let events: Cow<'_, [HarvestEvent]> = match year {
        Some(year) => Cow::Owned(events_in_year(&dataset.harvest_events, year)),
        None => Cow::Borrowed(&dataset.harvest_events),
    };

    let by_group = aggregate_by_group(&events, &dataset.fields, &dataset.groups);
    let areas = GroupAreas::from_fields(&dataset.fields);
    let bales_per_area = bales_per_area(&by_group, &areas);

    HarvestReport {
        year,
        by_date: aggregate_by_date(&events),
        chart: harvest_series(&events, &dataset.harvest_types),
        by_group,
        bales_per_area,
    }
}

/// Builds the complete dashboard report.
pub fn build_report(dataset: &Dataset, options: &ReportOptions) -> FarmReport {
    let report = FarmReport {
        fields: field_rows(dataset, &options.table),
        summary: summary_rows(dataset, options.summary_rows),
        group_areas: area_by_group(&dataset.fields, &dataset.groups),
        harvests: harvest_report(dataset, options.year),
        years: year_range(options.first_harvest_year, options.current_year),
    };
    info!(
        rows = report.fields.len(),
        groups = report.group_areas.len(),
        months = report.harvests.by_date.len(),
        "Built farm report"
    );
    report
}
