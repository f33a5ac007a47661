//! Field table view model.
//!
//! Joins fields with their group and area into display rows, then filters,
//! sorts and optionally truncates them.

use serde::{Deserialize, Serialize};
use shared::text::{contains_ignore_case, locale_cmp};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::group_lookup::GroupLookup;
use crate::geometry::{boundary_area, format_area};
use crate::models::{Field, FieldGroup, FieldId};

/// Column a field table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Name,
    GroupName,
    Size,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::GroupName => "group-name",
            SortKey::Size => "size",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "group-name" => Ok(SortKey::GroupName),
            "size" => Ok(SortKey::Size),
            _ => Err(format!(
                "Invalid sort key: {}. Must be one of: name, group-name, size",
                s
            )),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: {}. Must be asc or desc", s)),
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Header click: the active column flips direction, another column
    /// starts ascending.
    pub fn toggle(self, key: SortKey) -> Self {
        if key == self.key {
            Self::new(key, self.direction.flipped())
        } else {
            Self::new(key, SortDirection::Asc)
        }
    }

    fn compare(&self, a: &DisplayedField, b: &DisplayedField) -> Ordering {
        let ordering = match self.key {
            SortKey::Name => locale_cmp(&a.name, &b.name),
            SortKey::GroupName => locale_cmp(&a.group_name, &b.group_name),
            SortKey::Size => a.size.total_cmp(&b.size),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl Default for SortSpec {
    /// Largest fields first.
    fn default() -> Self {
        Self::new(SortKey::Size, SortDirection::Desc)
    }
}

/// One row of the field table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DisplayedField {
    pub id: FieldId,
    pub name: String,
    /// Empty when ungrouped.
    pub group_name: String,
    /// Area in square meters, `-1` when the boundary could not be decoded.
    pub size: f64,
    /// Group color as persisted, empty when ungrouped.
    pub draw_color: String,
}

impl DisplayedField {
    /// Area rendered in whole dekar.
    pub fn area_label(&self) -> String {
        format_area(self.size)
    }

    fn matches(&self, text_filter: &str) -> bool {
        contains_ignore_case(&self.name, text_filter)
            || contains_ignore_case(&self.group_name, text_filter)
    }
}

/// Builds the filtered, sorted field table.
///
/// `sort: None` keeps the input order. Rows that compare equal keep their
/// input order.
pub fn build_display_rows(
    fields: &[Field],
    groups: &[FieldGroup],
    text_filter: &str,
    sort: Option<SortSpec>,
) -> Vec<DisplayedField> {
    let lookup = GroupLookup::build(groups);
    let mut rows: Vec<DisplayedField> = fields
        .iter()
        .map(|field| {
            let group = lookup.group_of(field);
            DisplayedField {
                id: field.id,
                name: field.name.clone(),
                group_name: group.map(|g| g.name.clone()).unwrap_or_default(),
                size: boundary_area(&field.boundary),
                draw_color: group.map(|g| g.draw_color.clone()).unwrap_or_default(),
            }
        })
        .filter(|row| row.matches(text_filter))
        .collect();

    if let Some(spec) = sort {
        rows.sort_by(|a, b| spec.compare(a, b));
    }
    rows
}

/// Parameters of a field table view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldTableQuery {
    pub text_filter: String,
    pub sort: Option<SortSpec>,
    /// Keep only the first rows after filtering and sorting.
    pub max_items: Option<usize>,
}

impl FieldTableQuery {
    /// Dashboard summary: largest fields first, no search.
    pub fn summary(max_items: usize) -> Self {
        Self {
            text_filter: String::new(),
            sort: Some(SortSpec::default()),
            max_items: Some(max_items),
        }
    }

    pub fn run(&self, fields: &[Field], groups: &[FieldGroup]) -> Vec<DisplayedField> {
        let mut rows = build_display_rows(fields, groups, &self.text_filter, self.sort);
        if let Some(max) = self.max_items {
            rows.truncate(max);
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{encode_boundary, FeatureProperties};
    use crate::models::GroupId;
    use fake::faker::lorem::en::Word;
    use fake::Fake;
    use geo::polygon;

    fn boundary(width: f64, height: f64) -> String {
        let p = polygon![
            (x: 0.0, y: 0.0),
            (x: width, y: 0.0),
            (x: width, y: height),
            (x: 0.0, y: height),
        ];
        encode_boundary(&p, &FeatureProperties::default())
    }

    fn field(id: FieldId, name: &str, group_id: Option<GroupId>, boundary: String) -> Field {
        Field {
            id,
            name: name.to_string(),
            farm_id: 1,
            group_id,
            boundary,
        }
    }

    fn group(id: GroupId, name: &str, color: &str) -> FieldGroup {
        FieldGroup {
            id,
            name: name.to_string(),
            farm_id: 1,
            draw_color: color.to_string(),
            fields: vec![],
        }
    }

    fn sizes(rows: &[DisplayedField]) -> Vec<f64> {
        rows.iter().map(|r| r.size).collect()
    }

    #[test]
    fn test_size_descending_scenario() {
        let groups = vec![group(1, "A", "rgba(100,200,50,0.2)")];
        let fields = vec![
            field(1, "Middle", Some(1), boundary(25.0, 20.0)),
            field(2, "Flat", Some(1), boundary(10.0, 0.0)),
            field(3, "Big", Some(1), boundary(50.0, 20.0)),
        ];

        let rows = build_display_rows(&fields, &groups, "", Some(SortSpec::default()));
        assert_eq!(sizes(&rows), vec![1000.0, 500.0, 0.0]);
        assert_eq!(rows[0].area_label(), "1 dekar");
        assert!(rows.iter().all(|r| r.group_name == "A"));
        assert!(rows.iter().all(|r| r.draw_color == "rgba(100,200,50,0.2)"));
    }

    #[test]
    fn test_toggle_same_key_flips_direction() {
        let fields = vec![
            field(1, "a", None, boundary(10.0, 10.0)),
            field(2, "b", None, boundary(30.0, 10.0)),
            field(3, "c", None, boundary(20.0, 10.0)),
        ];
        let asc = SortSpec::new(SortKey::Size, SortDirection::Asc);
        let rows = build_display_rows(&fields, &[], "", Some(asc));
        assert!(rows.windows(2).all(|w| w[0].size <= w[1].size));

        let desc = asc.toggle(SortKey::Size);
        assert_eq!(desc.direction, SortDirection::Desc);
        let rows = build_display_rows(&fields, &[], "", Some(desc));
        assert!(rows.windows(2).all(|w| w[0].size >= w[1].size));
    }

    #[test]
    fn test_toggle_other_key_resets_to_ascending() {
        let spec = SortSpec::new(SortKey::Size, SortDirection::Desc).toggle(SortKey::Name);
        assert_eq!(spec, SortSpec::new(SortKey::Name, SortDirection::Asc));
        let spec = spec.toggle(SortKey::GroupName);
        assert_eq!(spec, SortSpec::new(SortKey::GroupName, SortDirection::Asc));
    }

    #[test]
    fn test_ungrouped_and_unknown_group_default_to_empty() {
        let groups = vec![group(1, "A", "rgba(1,2,3,0.2)")];
        let fields = vec![
            field(1, "Loose", None, boundary(1.0, 1.0)),
            field(2, "Orphan", Some(42), boundary(1.0, 1.0)),
        ];
        let rows = build_display_rows(&fields, &groups, "", None);
        assert!(rows.iter().all(|r| r.group_name.is_empty()));
        assert!(rows.iter().all(|r| r.draw_color.is_empty()));
    }

    #[test]
    fn test_unparsable_boundary_gets_sentinel() {
        let fields = vec![field(1, "Broken", None, "not json".to_string())];
        let rows = build_display_rows(&fields, &[], "", None);
        assert_eq!(rows[0].size, -1.0);
    }

    #[test]
    fn test_filter_matches_name_or_group_case_insensitive() {
        let groups = vec![
            group(1, "Heimejordet", "rgba(1,1,1,0.2)"),
            group(2, "Utmark", "rgba(2,2,2,0.2)"),
        ];
        let fields = vec![
            field(1, "Nordre", Some(1), boundary(1.0, 1.0)),
            field(2, "Søndre", Some(2), boundary(1.0, 1.0)),
            field(3, "Heia", Some(2), boundary(1.0, 1.0)),
        ];

        let rows = build_display_rows(&fields, &groups, "HEI", None);
        let ids: Vec<FieldId> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let rows = build_display_rows(&fields, &groups, "", None);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_filter_property_with_random_names() {
        let groups = vec![group(1, "Grp", "rgba(1,1,1,0.2)")];
        let fields: Vec<Field> = (0..40)
            .map(|i| {
                let name: String = Word().fake();
                let group_id = if i % 2 == 0 { Some(1) } else { None };
                field(i, &name, group_id, boundary(1.0, 1.0))
            })
            .collect();
        let needle: String = Word().fake::<String>().chars().take(2).collect();

        let rows = build_display_rows(&fields, &groups, &needle, None);
        let needle_lower = needle.to_lowercase();
        for row in &rows {
            assert!(
                row.name.to_lowercase().contains(&needle_lower)
                    || row.group_name.to_lowercase().contains(&needle_lower)
            );
        }
        let kept: Vec<FieldId> = rows.iter().map(|r| r.id).collect();
        for f in fields.iter().filter(|f| !kept.contains(&f.id)) {
            let group_name = if f.group_id.is_some() { "grp" } else { "" };
            assert!(!f.name.to_lowercase().contains(&needle_lower));
            assert!(!group_name.contains(&needle_lower));
        }
    }

    #[test]
    fn test_sort_by_name_is_locale_aware() {
        let fields = vec![
            field(1, "Åkeren", None, boundary(1.0, 1.0)),
            field(2, "bakken", None, boundary(1.0, 1.0)),
            field(3, "Aust", None, boundary(1.0, 1.0)),
        ];
        let rows = build_display_rows(
            &fields,
            &[],
            "",
            Some(SortSpec::new(SortKey::Name, SortDirection::Asc)),
        );
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Aust", "bakken", "Åkeren"]);
    }

    #[test]
    fn test_sort_by_group_name_ties_keep_input_order() {
        let groups = vec![group(1, "B", ""), group(2, "A", "")];
        let fields = vec![
            field(1, "one", Some(1), boundary(1.0, 1.0)),
            field(2, "two", Some(2), boundary(1.0, 1.0)),
            field(3, "three", Some(1), boundary(1.0, 1.0)),
            field(4, "four", Some(2), boundary(1.0, 1.0)),
        ];
        let rows = build_display_rows(
            &fields,
            &groups,
            "",
            Some(SortSpec::new(SortKey::GroupName, SortDirection::Asc)),
        );
        let ids: Vec<FieldId> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_no_sort_keeps_input_order() {
        let fields = vec![
            field(5, "e", None, boundary(1.0, 1.0)),
            field(1, "a", None, boundary(9.0, 9.0)),
        ];
        let rows = build_display_rows(&fields, &[], "", None);
        let ids: Vec<FieldId> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 1]);
    }

    #[test]
    fn test_query_truncates_after_sort() {
        let fields: Vec<Field> = (1..=10)
            .map(|i| field(i, &format!("f{}", i), None, boundary(i as f64, 10.0)))
            .collect();
        let rows = FieldTableQuery::summary(3).run(&fields, &[]);
        let ids: Vec<FieldId> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![10, 9, 8]);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("group-name".parse::<SortKey>().unwrap(), SortKey::GroupName);
        assert!("area".parse::<SortKey>().is_err());
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!(SortKey::Size.to_string(), "size");
    }
}
