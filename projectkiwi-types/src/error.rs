//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Input geometry cannot be used, e.g. an empty polygon.
    #[error("invalid input geometry: {0}")]
    InvalidInput(String),
    /// Tile address is not a `z/x/y` triple of non-negative integers.
    #[error("malformed tile address: {0:?}")]
    MalformedAddress(String),
    /// Bounding box has zero width or height and cannot be used as a divisor.
    #[error("bounding box has zero area")]
    DegenerateGeometry,
    /// Latitude at or beyond the poles, where Mercator projection is undefined.
    #[error("latitude {0} is out of range for Mercator projection")]
    OutOfRangeLatitude(f64),
}
