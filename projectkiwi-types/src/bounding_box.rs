//! Axis-aligned bounding boxes of polygons, in geographic and in tile-local coordinates.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geo::GeoPoint;
use crate::slippy;
use crate::tile::TileIndex;

/// Bounding box in geographic coordinates.
///
/// The box is stored top first (`max_lat` before `min_lat`), since tile rows grow as latitude
/// decreases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBoundingBox {
    /// Western edge.
    pub min_lon: f64,
    /// Eastern edge.
    pub max_lon: f64,
    /// Northern (top) edge.
    pub max_lat: f64,
    /// Southern (bottom) edge.
    pub min_lat: f64,
}

impl GeoBoundingBox {
    /// Computes the bounding box of the given points. Returns `None` for an empty iterator.
    pub fn from_points<P: GeoPoint>(points: impl IntoIterator<Item = P>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bbox = Self {
            min_lon: first.lon(),
            max_lon: first.lon(),
            max_lat: first.lat(),
            min_lat: first.lat(),
        };

        for p in points {
            if bbox.min_lon > p.lon() {
                bbox.min_lon = p.lon();
            }
            if bbox.max_lon < p.lon() {
                bbox.max_lon = p.lon();
            }
            if bbox.max_lat < p.lat() {
                bbox.max_lat = p.lat();
            }
            if bbox.min_lat > p.lat() {
                bbox.min_lat = p.lat();
            }
        }

        Some(bbox)
    }

    /// Box spanned by two opposite corners.
    pub fn from_corners(a: &impl GeoPoint, b: &impl GeoPoint) -> Self {
        Self {
            min_lon: a.lon().min(b.lon()),
            max_lon: a.lon().max(b.lon()),
            max_lat: a.lat().max(b.lat()),
            min_lat: a.lat().min(b.lat()),
        }
    }

    /// Returns `(min_lon, max_lon, max_lat, min_lat)`.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.min_lon, self.max_lon, self.max_lat, self.min_lat)
    }

    /// Corners of the box as `[lon, lat]` pairs, clockwise from the top-left one.
    pub fn corners(&self) -> [[f64; 2]; 4] {
        [
            [self.min_lon, self.max_lat],
            [self.max_lon, self.max_lat],
            [self.max_lon, self.min_lat],
            [self.min_lon, self.min_lat],
        ]
    }

    /// Re-expresses the box relative to the top-left corner of `tile`, in tile units.
    pub fn to_tile_relative(&self, tile: &TileIndex) -> Result<TileBoundingBox, GeometryError> {
        let top_left = slippy::degrees_to_tile(self.max_lat, self.min_lon, tile.z)?.relative_to(tile);
        let bottom_right =
            slippy::degrees_to_tile(self.min_lat, self.max_lon, tile.z)?.relative_to(tile);

        Ok(TileBoundingBox {
            x1: top_left.x,
            y1: top_left.y,
            x2: bottom_right.x,
            y2: bottom_right.y,
        })
    }
}

/// Bounding box as offsets from the top-left corner of a tile, in units of one tile.
///
/// Values inside the tile are in `0.0..=1.0`. A box extending beyond the tile has values below
/// zero or above one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileBoundingBox {
    /// Left edge.
    pub x1: f64,
    /// Top edge.
    pub y1: f64,
    /// Right edge.
    pub x2: f64,
    /// Bottom edge.
    pub y2: f64,
}

impl TileBoundingBox {
    /// Returns `(x1, y1, x2, y2)`.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x1, self.y1, self.x2, self.y2)
    }

    /// Width of the box in tile units.
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Height of the box in tile units.
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Unsigned area of the box.
    pub fn area(&self) -> f64 {
        (self.width() * self.height()).abs()
    }

    /// The part of the box inside the unit tile square. Every coordinate is clipped to `0..=1`
    /// independently.
    pub fn clipped(&self) -> Self {
        Self {
            x1: self.x1.clamp(0.0, 1.0),
            y1: self.y1.clamp(0.0, 1.0),
            x2: self.x2.clamp(0.0, 1.0),
            y2: self.y2.clamp(0.0, 1.0),
        }
    }

    /// Whether the box touches the unit tile square (edges included).
    pub fn touches_tile(&self) -> bool {
        self.x1.min(self.x2) <= 1.0
            && self.x1.max(self.x2) >= 0.0
            && self.y1.min(self.y2) <= 1.0
            && self.y1.max(self.y2) >= 0.0
    }
}

/// Geographic bounding box of a polygon given as `[lon, lat]` points.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidInput`] if the polygon is empty.
pub fn geographic_bounding_box<P: GeoPoint>(polygon: &[P]) -> Result<GeoBoundingBox, GeometryError> {
    GeoBoundingBox::from_points(polygon)
        .ok_or_else(|| GeometryError::InvalidInput("polygon has no points".into()))
}

/// Bounding box of a polygon relative to the top-left corner of `tile`, in tile units.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidInput`] if the polygon is empty, and
/// [`GeometryError::OutOfRangeLatitude`] if it reaches the poles.
pub fn tile_relative_bounding_box<P: GeoPoint>(
    polygon: &[P],
    tile: &TileIndex,
) -> Result<TileBoundingBox, GeometryError> {
    geographic_bounding_box(polygon)?.to_tile_relative(tile)
}
