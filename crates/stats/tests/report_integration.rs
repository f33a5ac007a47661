//! Integration tests for report assembly over the fixture dataset.
//!
//! Run with: cargo test -p farm-stats --test report_integration

use std::path::PathBuf;

use domain::services::{FieldTableQuery, SortDirection, SortKey, SortSpec};
use farm_stats::dataset::Dataset;
use farm_stats::report::{
    build_report, field_rows, harvest_report, map_layers, summary_rows, ReportOptions,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("farm.json")
}

fn load_fixture() -> Dataset {
    Dataset::load(&fixture_path()).expect("Failed to load fixture dataset")
}

fn sorjordet() -> Dataset {
    load_fixture().for_farm(1)
}

// ============================================================================
// Field table
// ============================================================================

#[test]
fn test_group_fields_sorted_by_size() {
    let dataset = sorjordet();
    let query = FieldTableQuery {
        sort: Some(SortSpec::default()),
        ..FieldTableQuery::default()
    };

    let group_a: Vec<_> = field_rows(&dataset, &query)
        .into_iter()
        .filter(|row| row.group_name == "A")
        .collect();

    let sizes: Vec<f64> = group_a.iter().map(|row| row.size).collect();
    assert_eq!(sizes, vec![1000.0, 500.0, 0.0]);
    assert_eq!(group_a[0].area_label(), "1 dekar");
    assert!(group_a
        .iter()
        .all(|row| row.draw_color == "rgba(100,200,50,0.2)"));
}

#[test]
fn test_unsorted_rows_keep_input_order() {
    let dataset = sorjordet();
    let ids: Vec<i32> = field_rows(&dataset, &FieldTableQuery::default())
        .iter()
        .map(|row| row.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 7]);
}

#[test]
fn test_undecodable_boundary_sorts_last() {
    let dataset = sorjordet();
    let rows = field_rows(&dataset, &FieldTableQuery::summary(10));
    let last = rows.last().unwrap();
    assert_eq!(last.name, "Myra");
    assert_eq!(last.size, -1.0);
    assert_eq!(last.area_label(), "ukjent areal");
    assert_eq!(rows[0].name, "Bakken");
}

#[test]
fn test_text_filter_matches_group_name() {
    let dataset = sorjordet();
    let query = FieldTableQuery {
        text_filter: "øVRE".to_string(),
        sort: Some(SortSpec::new(SortKey::Name, SortDirection::Asc)),
        max_items: None,
    };
    let rows = field_rows(&dataset, &query);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Bakken");
}

#[test]
fn test_ungrouped_field_has_blank_group() {
    let dataset = sorjordet();
    let rows = field_rows(&dataset, &FieldTableQuery::default());
    let loose = rows.iter().find(|row| row.id == 5).unwrap();
    assert_eq!(loose.group_name, "");
    assert_eq!(loose.draw_color, "");
    assert_eq!(loose.size, 100.0);
}

#[test]
fn test_summary_truncates() {
    let dataset = load_fixture();
    let rows = summary_rows(&dataset, 3);
    let names: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Bakken", "Nordre", "Søndre"]);
}

// ============================================================================
// Harvest statistics
// ============================================================================

#[test]
fn test_same_month_events_are_summed() {
    let dataset = sorjordet();
    let harvests = harvest_report(&dataset, Some(2024));

    let june = harvests
        .by_date
        .iter()
        .find(|bucket| bucket.date.to_string() == "2024-06")
        .unwrap();
    assert_eq!(june.per_type["Hay"], 8);
    assert_eq!(june.per_type["Silage"], 0);
}

#[test]
fn test_months_ordered_across_year_boundary() {
    let dataset = sorjordet();
    let harvests = harvest_report(&dataset, None);

    let months: Vec<String> = harvests
        .by_date
        .iter()
        .map(|bucket| bucket.date.to_string())
        .collect();
    assert_eq!(months, vec!["2023-12", "2024-01", "2024-06", "2024-08"]);

    let chart = &harvests.chart;
    assert_eq!(chart.categories.len(), 4);
    assert_eq!(chart.series[0].type_name, "Hay");
    assert_eq!(chart.series[0].data, vec![0, 0, 8, 10]);
    assert_eq!(chart.series[1].type_name, "Silage");
    assert_eq!(chart.series[1].data, vec![2, 4, 0, 0]);
}

#[test]
fn test_year_filter_uses_calendar_year() {
    let dataset = sorjordet();
    let harvests = harvest_report(&dataset, Some(2023));
    assert_eq!(harvests.by_date.len(), 1);
    assert_eq!(harvests.by_date[0].date.to_string(), "2023-12");

    let totals: Vec<(String, i64)> = harvests
        .by_group
        .iter()
        .map(|t| (t.group_name.clone(), t.total))
        .collect();
    assert_eq!(
        totals,
        vec![
            ("A".to_string(), 0),
            ("Øvre".to_string(), 2),
            ("Myr".to_string(), 0)
        ]
    );
}

#[test]
fn test_bales_per_area_with_zero_area_group() {
    let dataset = sorjordet();
    let harvests = harvest_report(&dataset, None);

    let myr = harvests
        .bales_per_area
        .iter()
        .find(|r| r.group_name == "Myr")
        .unwrap();
    assert_eq!(myr.ratio, 0.0);

    let total_myr = harvests
        .by_group
        .iter()
        .find(|t| t.group_name == "Myr")
        .unwrap();
    assert_eq!(total_myr.total, 10);

    let a = harvests
        .bales_per_area
        .iter()
        .find(|r| r.group_name == "A")
        .unwrap();
    assert!((a.ratio - 8.0 / 1.5).abs() < 1e-9);
    assert_eq!(a.color, "#64c832");
}

// ============================================================================
// Map layers and full report
// ============================================================================

#[test]
fn test_map_layers_skip_broken_boundaries() {
    let dataset = sorjordet();
    let layers = map_layers(&dataset);
    assert_eq!(layers.len(), 3);
    assert_eq!(layers[0].features.len(), 3);
    assert!(layers[0].skipped.is_empty());
    assert!(layers[2].features.is_empty());
    assert_eq!(layers[2].skipped, vec![7]);
}

#[test]
fn test_build_report() {
    let dataset = sorjordet();
    let options = ReportOptions {
        table: FieldTableQuery::default(),
        summary_rows: 2,
        year: None,
        first_harvest_year: 2022,
        current_year: 2024,
    };
    let report = build_report(&dataset, &options);

    assert_eq!(report.fields.len(), 6);
    assert_eq!(report.summary.len(), 2);
    assert_eq!(report.years, vec![2022, 2023, 2024]);

    let areas: Vec<(String, f64)> = report
        .group_areas
        .iter()
        .map(|p| (p.group_name.clone(), p.dekar))
        .collect();
    assert_eq!(
        areas,
        vec![
            ("A".to_string(), 1.5),
            ("Øvre".to_string(), 3.0),
            ("Myr".to_string(), 0.0)
        ]
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["harvests"]["by_date"][0]["date"], "2023-12");
    assert_eq!(json["summary"][0]["name"], "Bakken");
}
