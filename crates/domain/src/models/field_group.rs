//! Field group domain model.

use serde::{Deserialize, Serialize};
use shared::color::{self, ColorError, DrawColor};

use super::farm::FarmId;
use super::field::FieldId;

/// Identifier of a field group.
pub type GroupId = i32;

/// Reference from a group to one of its fields.
///
/// The full group listing carries bare ids, the meta listing carries
/// `{ id, name }` pairs; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldRef {
    Id(FieldId),
    Meta { id: FieldId, name: String },
}

impl FieldRef {
    pub fn id(&self) -> FieldId {
        match self {
            FieldRef::Id(id) => *id,
            FieldRef::Meta { id, .. } => *id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            FieldRef::Id(_) => None,
            FieldRef::Meta { name, .. } => Some(name),
        }
    }
}

/// A named, colored collection of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FieldGroup {
    pub id: GroupId,
    pub name: String,
    pub farm_id: FarmId,
    /// Persisted `rgba(r,g,b,a)` string, kept exactly as stored.
    pub draw_color: String,
    #[serde(default)]
    pub fields: Vec<FieldRef>,
}

impl FieldGroup {
    /// The draw color as `#rrggbb`, for pickers and chart fills.
    pub fn hex_color(&self) -> String {
        color::rgba_to_hex(&self.draw_color)
    }

    /// Parses the persisted draw color.
    pub fn parsed_color(&self) -> Result<DrawColor, ColorError> {
        self.draw_color.parse()
    }

    pub fn contains_field(&self, field_id: FieldId) -> bool {
        self.fields.iter().any(|f| f.id() == field_id)
    }
}

/// Payload for creating a field group from color-picker input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct NewFieldGroup {
    pub name: String,
    pub farm_id: FarmId,
    pub draw_color: String,
}

impl NewFieldGroup {
    /// Builds the payload, storing the picked hex color as rgba at the
    /// standard group opacity.
    pub fn from_hex(name: &str, farm_id: FarmId, hex: &str) -> Result<Self, ColorError> {
        Self::with_opacity(name, farm_id, hex, color::DEFAULT_GROUP_OPACITY)
    }

    pub fn with_opacity(
        name: &str,
        farm_id: FarmId,
        hex: &str,
        opacity: f64,
    ) -> Result<Self, ColorError> {
        Ok(Self {
            name: name.to_string(),
            farm_id,
            draw_color: color::hex_to_rgba(hex, opacity)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_refs_accept_both_shapes() {
        let json = r#"{
            "id": 1,
            "name": "Heimejordet",
            "farm_id": 1,
            "draw_color": "rgba(100,200,50,0.2)",
            "fields": [3, {"id": 4, "name": "Nordre"}]
        }"#;

        let group: FieldGroup = serde_json::from_str(json).unwrap();
        assert_eq!(group.fields.len(), 2);
        assert_eq!(group.fields[0].id(), 3);
        assert_eq!(group.fields[0].name(), None);
        assert_eq!(group.fields[1].id(), 4);
        assert_eq!(group.fields[1].name(), Some("Nordre"));
        assert!(group.contains_field(4));
        assert!(!group.contains_field(5));
    }

    #[test]
    fn test_fields_default_to_empty() {
        let json = r#"{"id": 1, "name": "A", "farm_id": 1, "draw_color": ""}"#;
        let group: FieldGroup = serde_json::from_str(json).unwrap();
        assert!(group.fields.is_empty());
    }

    #[test]
    fn test_hex_color() {
        let group = FieldGroup {
            id: 1,
            name: "A".to_string(),
            farm_id: 1,
            draw_color: "rgba(100,200,50,0.2)".to_string(),
            fields: vec![],
        };
        assert_eq!(group.hex_color(), "#64c832");
        assert_eq!(group.parsed_color().unwrap().alpha, 0.2);
    }

    #[test]
    fn test_hex_color_of_empty_color() {
        let group = FieldGroup {
            id: 1,
            name: "A".to_string(),
            farm_id: 1,
            draw_color: String::new(),
            fields: vec![],
        };
        assert_eq!(group.hex_color(), "#000");
        assert!(group.parsed_color().is_err());
    }

    #[test]
    fn test_new_field_group_stores_rgba() {
        let group = NewFieldGroup::from_hex("Utmark", 1, "#ff0000").unwrap();
        assert_eq!(group.draw_color, "rgba(255,0,0,0.2)");
        assert!(NewFieldGroup::from_hex("Utmark", 1, "red").is_err());
    }

    #[test]
    fn test_new_field_group_with_opacity() {
        let group = NewFieldGroup::with_opacity("Utmark", 2, "00ff00", 0.5).unwrap();
        assert_eq!(group.draw_color, "rgba(0,255,0,0.5)");
        assert_eq!(group.farm_id, 2);
        assert!(NewFieldGroup::with_opacity("Utmark", 2, "#00ff00", 1.5).is_err());
    }
}
