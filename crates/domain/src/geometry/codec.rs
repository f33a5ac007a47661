//! Field boundary codec.
//!
//! A boundary is persisted as a single GeoJSON feature holding one polygon in
//! the map's projected (metric) coordinate system. Coordinates are never
//! reprojected here.

use geo::{Coord, LineString, Polygon};
use geojson::{Feature, GeoJson, Geometry, JsonObject, JsonValue, Value};
use thiserror::Error;

/// Property key for the field name.
pub const NAME_PROPERTY: &str = "name";

/// Property key for the owning group's name.
pub const GROUP_NAME_PROPERTY: &str = "group-name";

/// Error type for boundary decoding.
#[derive(Debug, Error, PartialEq)]
pub enum BoundaryError {
    #[error("Boundary is empty")]
    Empty,
    #[error("Boundary is not valid GeoJSON: {0}")]
    Malformed(String),
    #[error("Expected exactly one feature, found {0}")]
    FeatureCount(usize),
    #[error("Feature has no geometry")]
    MissingGeometry,
    #[error("Expected a Polygon geometry, found {0}")]
    NotAPolygon(&'static str),
    #[error("Polygon holes are not supported ({0} interior rings)")]
    HolesUnsupported(usize),
    #[error("Invalid coordinate at position {0}")]
    InvalidCoordinate(usize),
}

/// Display properties attached to a boundary feature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureProperties {
    pub name: Option<String>,
    pub group_name: Option<String>,
}

impl FeatureProperties {
    pub fn new(name: impl Into<String>, group_name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            group_name: Some(group_name.into()),
        }
    }

    fn to_json_object(&self) -> Option<JsonObject> {
        let mut object = JsonObject::new();
        if let Some(name) = &self.name {
            object.insert(NAME_PROPERTY.to_string(), JsonValue::from(name.as_str()));
        }
        if let Some(group_name) = &self.group_name {
            object.insert(
                GROUP_NAME_PROPERTY.to_string(),
                JsonValue::from(group_name.as_str()),
            );
        }
        if object.is_empty() {
            None
        } else {
            Some(object)
        }
    }

    fn from_json_object(object: Option<&JsonObject>) -> Self {
        let read = |key: &str| {
            object
                .and_then(|o| o.get(key))
                .and_then(|v| match v {
                    JsonValue::String(s) => Some(s.clone()),
                    JsonValue::Number(n) => Some(n.to_string()),
                    _ => None,
                })
        };
        Self {
            name: read(NAME_PROPERTY),
            group_name: read(GROUP_NAME_PROPERTY),
        }
    }
}

/// A decoded boundary with the display properties found on the feature.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBoundary {
    pub polygon: Polygon<f64>,
    pub properties: FeatureProperties,
}

/// Decodes a boundary into its polygon.
///
/// A polygon with no rings decodes to an empty polygon, which is valid and
/// distinct from a parse failure.
pub fn decode_boundary(text: &str) -> Result<Polygon<f64>, BoundaryError> {
    decode_feature(text).map(|decoded| decoded.polygon)
}

/// Decodes a boundary together with its display properties.
///
/// Accepts a Feature, a FeatureCollection holding exactly one feature, or a
/// bare Polygon geometry.
pub fn decode_feature(text: &str) -> Result<DecodedBoundary, BoundaryError> {
    if text.trim().is_empty() {
        return Err(BoundaryError::Empty);
    }
    let geojson: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| BoundaryError::Malformed(e.to_string()))?;

    let (geometry, properties) = match geojson {
        GeoJson::Geometry(geometry) => (Some(geometry), FeatureProperties::default()),
        GeoJson::Feature(feature) => split_feature(feature),
        GeoJson::FeatureCollection(collection) => {
            let count = collection.features.len();
            match <[Feature; 1]>::try_from(collection.features) {
                Ok([feature]) => split_feature(feature),
                Err(_) => return Err(BoundaryError::FeatureCount(count)),
            }
        }
    };

    let geometry = geometry.ok_or(BoundaryError::MissingGeometry)?;
    let polygon = polygon_from_value(geometry.value)?;
    Ok(DecodedBoundary {
        polygon,
        properties,
    })
}

/// Encodes a polygon as a single GeoJSON feature carrying `properties`.
pub fn encode_boundary(polygon: &Polygon<f64>, properties: &FeatureProperties) -> String {
    let feature = Feature {
        bbox: None,
        geometry: Some(Geometry::new(polygon_to_value(polygon))),
        id: None,
        properties: properties.to_json_object(),
        foreign_members: None,
    };
    GeoJson::Feature(feature).to_string()
}

fn split_feature(feature: Feature) -> (Option<Geometry>, FeatureProperties) {
    let properties = FeatureProperties::from_json_object(feature.properties.as_ref());
    (feature.geometry, properties)
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn polygon_from_value(value: Value) -> Result<Polygon<f64>, BoundaryError> {
    let rings = match value {
        Value::Polygon(rings) => rings,
        other => return Err(BoundaryError::NotAPolygon(value_type_name(&other))),
    };

    // The first ring is the exterior even when it is empty.
    if rings.len() > 1 {
        return Err(BoundaryError::HolesUnsupported(rings.len() - 1));
    }
    match rings.into_iter().next() {
        Some(ring) => Ok(Polygon::new(ring_from_positions(ring)?, vec![])),
        None => Ok(Polygon::new(LineString::new(vec![]), vec![])),
    }
}

fn ring_from_positions(positions: Vec<Vec<f64>>) -> Result<LineString<f64>, BoundaryError> {
    positions
        .into_iter()
        .enumerate()
        .map(|(i, position)| match position.as_slice() {
            [x, y, ..] if x.is_finite() && y.is_finite() => Ok(Coord { x: *x, y: *y }),
            _ => Err(BoundaryError::InvalidCoordinate(i)),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

fn ring_to_positions(ring: &LineString<f64>) -> Vec<Vec<f64>> {
    ring.coords().map(|c| vec![c.x, c.y]).collect()
}

fn polygon_to_value(polygon: &Polygon<f64>) -> Value {
    let mut rings = Vec::with_capacity(1 + polygon.interiors().len());
    if !polygon.exterior().0.is_empty() {
        rings.push(ring_to_positions(polygon.exterior()));
    }
    rings.extend(polygon.interiors().iter().map(ring_to_positions));
    Value::Polygon(rings)
}
