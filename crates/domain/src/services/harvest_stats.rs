//! Harvest statistics for charts.
//!
//! Charts align parallel series by index, so every output here covers its
//! whole domain (all groups, all months, all types) with zeros filling the
//! gaps.

use serde::Serialize;
use shared::dates::YearMonth;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::group_area::GroupAreas;
use super::group_lookup::FieldMembership;
use crate::models::{Field, FieldGroup, GroupId, HarvestEvent, HarvestType, HarvestTypeId};

/// Harvest total for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupHarvestTotal {
    pub group_id: GroupId,
    pub group_name: String,
    pub total: i64,
    /// `#rrggbb` fill color.
    pub color: String,
}

/// Harvest totals per type within one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DateBucket {
    pub date: YearMonth,
    pub per_type: BTreeMap<String, i64>,
}

/// One chart series: totals for a single harvest type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TypeSeries {
    pub type_id: HarvestTypeId,
    pub type_name: String,
    /// Aligned with [`HarvestSeries::categories`].
    pub data: Vec<i64>,
}

/// Month categories with one aligned series per harvest type.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HarvestSeries {
    pub categories: Vec<YearMonth>,
    pub series: Vec<TypeSeries>,
}

/// Harvest per dekar for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupRatio {
    pub group_id: GroupId,
    pub group_name: String,
    /// Bales per dekar, 0 when the group has no area.
    pub ratio: f64,
    pub color: String,
}

/// Events that happened in `year` (UTC calendar).
pub fn events_in_year(events: &[HarvestEvent], year: i32) -> Vec<HarvestEvent> {
    events.iter().filter(|e| e.year() == year).cloned().collect()
}

/// Sums event values per owning group.
///
/// Every group appears, in group order, with 0 when it has no events.
/// Events on ungrouped or unknown fields are not attributed.
pub fn aggregate_by_group(
    events: &[HarvestEvent],
    fields: &[Field],
    groups: &[FieldGroup],
) -> Vec<GroupHarvestTotal> {
    let membership = FieldMembership::build(fields, groups);
    let mut totals: HashMap<GroupId, i64> = HashMap::new();
    for event in events {
        match membership.group_of(event.field_id) {
            Some(group) => *totals.entry(group.id).or_insert(0) += i64::from(event.value),
            None => debug!(
                event_id = event.id,
                field_id = event.field_id,
                "Harvest event has no group"
            ),
        }
    }

    groups
        .iter()
        .map(|group| GroupHarvestTotal {
            group_id: group.id,
            group_name: group.name.clone(),
            total: totals.get(&group.id).copied().unwrap_or(0),
            color: group.hex_color(),
        })
        .collect()
}

/// Sums event values per month and harvest type.
///
/// Buckets are ordered by (year, month) numerically. Every bucket lists
/// every type name seen in `events`.
pub fn aggregate_by_date(events: &[HarvestEvent]) -> Vec<DateBucket> {
    let type_names: Vec<&str> = {
        let mut names: Vec<&str> = events.iter().map(|e| e.type_name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    };

    let mut buckets: BTreeMap<YearMonth, BTreeMap<String, i64>> = BTreeMap::new();
    for event in events {
        let bucket = buckets.entry(event.period()).or_insert_with(|| {
            type_names
                .iter()
                .map(|name| (name.to_string(), 0))
                .collect()
        });
        *bucket.entry(event.type_name.clone()).or_insert(0) += i64::from(event.value);
    }

    buckets
        .into_iter()
        .map(|(date, per_type)| DateBucket { date, per_type })
        .collect()
}

/// Builds the harvests-by-month chart.
///
/// Series are ordered by type id. Types from `known_types` without events
/// get an all-zero series.
pub fn harvest_series(events: &[HarvestEvent], known_types: &[HarvestType]) -> HarvestSeries {
    let mut types: BTreeMap<HarvestTypeId, String> = known_types
        .iter()
        .map(|t| (t.id, t.name.clone()))
        .collect();
    for event in events {
        types
            .entry(event.type_id)
            .or_insert_with(|| event.type_name.clone());
    }

    let mut totals: BTreeMap<(HarvestTypeId, YearMonth), i64> = BTreeMap::new();
    for event in events {
        *totals.entry((event.type_id, event.period())).or_insert(0) += i64::from(event.value);
    }

    let categories: Vec<YearMonth> = aggregate_by_date(events)
        .into_iter()
        .map(|bucket| bucket.date)
        .collect();

    let series = types
        .into_iter()
        .map(|(type_id, type_name)| TypeSeries {
            type_id,
            type_name,
            data: categories
                .iter()
                .map(|date| totals.get(&(type_id, *date)).copied().unwrap_or(0))
                .collect(),
        })
        .collect();

    HarvestSeries { categories, series }
}

/// Harvest per dekar for each group total. Never divides by zero.
pub fn bales_per_area(totals: &[GroupHarvestTotal], areas: &GroupAreas) -> Vec<GroupRatio> {
    totals
        .iter()
        .map(|t| {
            let dekar = areas.dekar(t.group_id);
            let ratio = if dekar > 0.0 {
                t.total as f64 / dekar
            } else {
                0.0
            };
            GroupRatio {
                group_id: t.group_id,
                group_name: t.group_name.clone(),
                ratio,
                color: t.color.clone(),
            }
        })
        .collect()
}
