//! [`TileIndex`] addresses one tile of the power-of-two slippy-map grid, [`TilePoint`] is a
//! position in fractional tile coordinates.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use crate::bounding_box::GeoBoundingBox;
use crate::error::GeometryError;
use crate::geo::GeoPoint2d;
use crate::slippy;

/// Tile index. Tiles with `y == 0` are at the top of the map.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash, Serialize, Deserialize)]
pub struct TileIndex {
    /// Z index (zoom level).
    pub z: u32,
    /// X index (column).
    pub x: u32,
    /// Y index (row).
    pub y: u32,
}

impl TileIndex {
    /// Create a new index instance.
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Number of tiles along each axis at the index's zoom level.
    pub fn tiles_per_axis(&self) -> f64 {
        slippy::tiles_per_axis(self.z)
    }

    /// Whether `x` and `y` fall into the `0..2^z` range.
    pub fn is_valid(&self) -> bool {
        let n = self.tiles_per_axis();
        (self.x as f64) < n && (self.y as f64) < n
    }

    /// Fractional tile coordinates of the top-left corner of the tile.
    pub fn origin(&self) -> TilePoint {
        TilePoint::new(self.x as f64, self.y as f64)
    }

    /// Geographic position of the centre of the tile.
    pub fn center(&self) -> GeoPoint2d {
        slippy::tile_to_degrees(self.x as f64 + 0.5, self.y as f64 + 0.5, self.z)
    }

    /// Geographic extent of the tile.
    pub fn geo_bounds(&self) -> GeoBoundingBox {
        let top_left = slippy::tile_to_degrees(self.x as f64, self.y as f64, self.z);
        let bottom_right = slippy::tile_to_degrees(self.x as f64 + 1.0, self.y as f64 + 1.0, self.z);
        GeoBoundingBox::from_corners(&top_left, &bottom_right)
    }

    /// Index of the tile `dx` columns and `dy` rows away from this one, if it is not negative.
    pub fn offset(&self, dx: i64, dy: i64) -> Option<Self> {
        let x = u32::try_from(self.x as i64 + dx).ok()?;
        let y = u32::try_from(self.y as i64 + dy).ok()?;
        Some(Self::new(self.z, x, y))
    }
}

impl Display for TileIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

impl FromStr for TileIndex {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || GeometryError::MalformedAddress(s.to_owned());

        let mut parts = s.trim().split('/');
        let mut next = || -> Result<u32, GeometryError> {
            parts
                .next()
                .and_then(|part| part.trim().parse().ok())
                .ok_or_else(malformed)
        };

        let index = Self::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(malformed());
        }

        Ok(index)
    }
}

/// Position in fractional tile coordinates: the integer part identifies a tile, the fractional
/// part the position inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TilePoint {
    /// Column coordinate.
    pub x: f64,
    /// Row coordinate, growing southwards.
    pub y: f64,
}

impl TilePoint {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point relative to the top-left corner of the given tile, in tile units.
    pub fn relative_to(&self, tile: &TileIndex) -> Self {
        let origin = tile.origin();
        Self {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl AbsDiffEq for TilePoint {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}
