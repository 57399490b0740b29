//! Error types used by the crate.

use image::ImageError;
use projectkiwi_types::{GeometryError, TileIndex};
use thiserror::Error;

/// Project Kiwi client error type.
#[derive(Debug, Error)]
pub enum KiwiError {
    /// Network error.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Server responded with a non-success status.
    #[error("request to {url} failed with status {status}")]
    Status {
        /// Requested url (without query parameters).
        url: String,
        /// HTTP status code.
        status: u16,
    },
    /// Response body is not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decoding(#[from] serde_json::Error),
    /// Response was decoded but contains an invalid value.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    /// Image decoding error.
    #[error("image decode error: {0:?}")]
    ImageDecode(#[from] ImageError),
    /// Geometry of an annotation or tile cannot be processed.
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),
    /// Error reading a file to upload.
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    /// No API key was given.
    #[error("API key missing")]
    MissingApiKey,
    /// The account has no projects.
    #[error("no projects found")]
    NoProjects,
    /// The account has several projects, and the request did not specify which one to use.
    #[error("multiple projects found, please specify a single project")]
    AmbiguousProject,
    /// Requested super tile would be too large to assemble.
    #[error("super tile of {width}x{width} pixels is too large, reduce max zoom or increase tile zoom")]
    SuperTileTooLarge {
        /// Width (and height) of the image in pixels.
        width: u64,
    },
    /// Max zoom is below the zoom of the requested tile.
    #[error("max zoom {max_zoom} is less than tile zoom {zoom}")]
    InvalidZoom {
        /// Zoom of the requested tile.
        zoom: u32,
        /// Requested max zoom.
        max_zoom: u32,
    },
    /// Tile coordinates are outside the grid of its zoom level.
    #[error("tile {0} is outside the tile grid")]
    InvalidTile(TileIndex),
    /// Requested max zoom is deeper than tile indices can address.
    #[error("max zoom {max_zoom} is above the deepest supported zoom 32")]
    UnsupportedZoom {
        /// Requested max zoom.
        max_zoom: u32,
    },
    /// None of the tiles of a super tile could be loaded.
    #[error("no valid tiles loaded")]
    NoTilesLoaded,
}
