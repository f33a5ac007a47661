//! Planar area of field boundaries, in square meters and dekar.

use geo::{Area, Polygon};
use tracing::warn;

use super::codec::decode_boundary;

/// Area reported for a boundary that could not be decoded.
///
/// Negative so callers can tell it apart from a legitimately empty field
/// and leave it out of sums.
pub const INVALID_AREA: f64 = -1.0;

/// Square meters in one dekar.
pub const SQUARE_METERS_PER_DEKAR: f64 = 1000.0;

/// Unit label used by [`format_area`].
pub const DEKAR_LABEL: &str = "dekar";

/// Label [`format_area`] renders for [`INVALID_AREA`].
pub const UNKNOWN_AREA_LABEL: &str = "ukjent areal";

/// Planar area of the outer ring in square meters, always `>= 0`.
///
/// Interior rings are not supported. They are logged and not subtracted.
pub fn polygon_area(polygon: &Polygon<f64>) -> f64 {
    if polygon.interiors().is_empty() {
        return polygon.unsigned_area();
    }
    warn!(
        interior_rings = polygon.interiors().len(),
        "Polygon holes are not supported, measuring outer ring only"
    );
    Polygon::new(polygon.exterior().clone(), vec![]).unsigned_area()
}

/// Area of a persisted boundary in square meters.
///
/// Returns [`INVALID_AREA`] when the boundary cannot be decoded.
pub fn boundary_area(boundary: &str) -> f64 {
    match decode_boundary(boundary) {
        Ok(polygon) => polygon_area(&polygon),
        Err(e) => {
            warn!(error = %e, "Failed to decode field boundary");
            INVALID_AREA
        }
    }
}

/// Returns true for areas that can be summed (not the parse-failure sentinel).
pub fn is_valid_area(area: f64) -> bool {
    area >= 0.0
}

/// Converts square meters to dekar.
pub fn to_dekar(square_meters: f64) -> f64 {
    square_meters / SQUARE_METERS_PER_DEKAR
}

/// Whole dekar, rounded half away from zero.
pub fn whole_dekar(square_meters: f64) -> i64 {
    to_dekar(square_meters).round() as i64
}

/// Input accepted by [`format_area`].
#[derive(Debug, Clone, Copy)]
pub enum AreaSource<'a> {
    SquareMeters(f64),
    Polygon(&'a Polygon<f64>),
}

impl From<f64> for AreaSource<'_> {
    fn from(square_meters: f64) -> Self {
        AreaSource::SquareMeters(square_meters)
    }
}

impl<'a> From<&'a Polygon<f64>> for AreaSource<'a> {
    fn from(polygon: &'a Polygon<f64>) -> Self {
        AreaSource::Polygon(polygon)
    }
}

/// Formats an area as whole dekar, e.g. `"12 dekar"`.
///
/// The parse-failure sentinel renders as [`UNKNOWN_AREA_LABEL`], never as
/// `"0 dekar"`.
pub fn format_area<'a>(source: impl Into<AreaSource<'a>>) -> String {
    let square_meters = match source.into() {
        AreaSource::SquareMeters(value) => value,
        AreaSource::Polygon(polygon) => polygon_area(polygon),
    };
    if !is_valid_area(square_meters) {
        return UNKNOWN_AREA_LABEL.to_string();
    }
    format!("{} {}", whole_dekar(square_meters), DEKAR_LABEL)
}
