//! Field boundary geometry.

pub mod area;
pub mod codec;

pub use area::{
    boundary_area, format_area, is_valid_area, polygon_area, to_dekar, whole_dekar, AreaSource,
    INVALID_AREA, UNKNOWN_AREA_LABEL,
};
pub use codec::{
    decode_boundary, decode_feature, encode_boundary, BoundaryError, DecodedBoundary,
    FeatureProperties,
};
