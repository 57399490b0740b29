//! Geometry of the slippy-map tile grid used by the Project Kiwi platform.
//!
//! The crate converts geographic positions to fractional [tile coordinates](slippy), computes
//! [bounding boxes](bounding_box) of annotation polygons relative to a tile, and estimates how
//! much of an annotation [overlaps](overlap) a tile.
//!
//! ```
//! use projectkiwi_types::{tile_overlap_ratio, TileIndex};
//!
//! let tile: TileIndex = "12/1051/1522".parse().expect("valid address");
//! let polygon = tile.geo_bounds().corners();
//! let ratio = tile_overlap_ratio(&polygon, &tile).expect("non-degenerate polygon");
//! assert!((ratio - 1.0).abs() < 1e-9);
//! ```
//!
//! Everything here is pure computation on `Copy` values and can be freely used from multiple
//! threads.

pub mod bounding_box;
pub mod error;
pub mod geo;
pub mod overlap;
pub mod slippy;
pub mod tile;

pub use bounding_box::{
    geographic_bounding_box, tile_relative_bounding_box, GeoBoundingBox, TileBoundingBox,
};
pub use error::GeometryError;
pub use geo::{GeoPoint, GeoPoint2d};
pub use overlap::{tile_overlap_ratio, OverlapFilter, DEFAULT_OVERLAP_THRESHOLD};
pub use slippy::{degrees_to_tile, degrees_to_tile_unchecked, tile_to_degrees};
pub use tile::{TileIndex, TilePoint};
