//! Client for the [Project Kiwi](https://project-kiwi.org) imagery and annotation platform.
//!
//! The [`Connector`] lists projects, imagery and tiles, uploads new imagery, downloads tile
//! images (or stitches them into [super tiles](super_tile)), and selects the annotations that
//! belong to a map tile.
//!
//! ```no_run
//! use projectkiwi::{Connector, ConnectorConfig};
//! use projectkiwi::projectkiwi_types::TileIndex;
//!
//! # async fn run() -> Result<(), projectkiwi::KiwiError> {
//! let connector = Connector::new(ConnectorConfig::new("my-api-key"))?;
//! let tile = TileIndex::new(12, 1051, 1522);
//! let annotations = connector
//!     .get_annotations_for_tile(None, tile, 0.5, None)
//!     .await?;
//! for annotation in annotations {
//!     println!("{}: {}", annotation.id, annotation.label_name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Tile geometry (slippy-map conversions, bounding boxes and overlap ratios) lives in the
//! [`projectkiwi_types`] crate, which is re-exported here.

pub mod config;
pub mod connector;
pub mod decoded_image;
pub mod error;
pub mod model;
pub mod platform;
pub mod super_tile;

#[cfg(test)]
mod tests;

pub use config::ConnectorConfig;
pub use connector::Connector;
pub use decoded_image::DecodedImage;
pub use error::KiwiError;
pub use model::{filter_annotations_for_tile, Annotation, Imagery, Task, TileRecord};
pub use projectkiwi_types;
pub use super_tile::{imagery_url_source, template_url_source, UrlSource};
