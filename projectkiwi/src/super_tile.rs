//! Stitching of high-zoom tiles into one image covering a lower-zoom tile.

use image::imageops;
use image::RgbaImage;
use log::{info, warn};
use projectkiwi_types::TileIndex;

use crate::config::DEFAULT_TILE_URL_TEMPLATE;
use crate::decoded_image::DecodedImage;
use crate::error::KiwiError;
use crate::platform::HttpService;

/// Size of a tile image in pixels.
pub const TILE_SIZE: u32 = 256;

/// Super tiles must be smaller than this many pixels along each side.
pub const MAX_SUPER_TILE_SIZE: u64 = 10_000;

/// Deepest zoom level whose tile indices fit into `u32`.
pub const MAX_SUPPORTED_ZOOM: u32 = 32;

/// Function constructing the url of a tile image from its index.
pub trait UrlSource: (Fn(&TileIndex) -> String) + Send + Sync {}
impl<T: Fn(&TileIndex) -> String + Send + Sync> UrlSource for T {}

/// Url source substituting `{z}`, `{x}` and `{y}` in the template.
pub fn template_url_source(template: impl Into<String>) -> impl UrlSource {
    let template = template.into();
    move |index: &TileIndex| {
        template
            .replace("{z}", &index.z.to_string())
            .replace("{x}", &index.x.to_string())
            .replace("{y}", &index.y.to_string())
    }
}

/// Url source of the tiles of the given imagery on the platform's tile storage.
pub fn imagery_url_source(imagery_id: &str) -> impl UrlSource {
    template_url_source(DEFAULT_TILE_URL_TEMPLATE.replace("{imagery_id}", imagery_id))
}

/// Layout of a super tile: which max-zoom tiles it consists of and where they go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuperTileLayout {
    tile: TileIndex,
    max_zoom: u32,
    tiles_per_side: u32,
}

impl SuperTileLayout {
    /// Validates the requested super tile.
    pub fn new(tile: TileIndex, max_zoom: u32) -> Result<Self, KiwiError> {
        if !tile.is_valid() {
            return Err(KiwiError::InvalidTile(tile));
        }

        if max_zoom > MAX_SUPPORTED_ZOOM {
            return Err(KiwiError::UnsupportedZoom { max_zoom });
        }

        if max_zoom < tile.z {
            return Err(KiwiError::InvalidZoom {
                zoom: tile.z,
                max_zoom,
            });
        }

        let width = 1u64
            .checked_shl(max_zoom - tile.z)
            .and_then(|tiles| tiles.checked_mul(TILE_SIZE as u64))
            .unwrap_or(u64::MAX);
        if width >= MAX_SUPER_TILE_SIZE {
            return Err(KiwiError::SuperTileTooLarge { width });
        }

        Ok(Self {
            tile,
            max_zoom,
            tiles_per_side: (width / TILE_SIZE as u64) as u32,
        })
    }

    /// Number of max-zoom tiles along each side.
    pub fn tiles_per_side(&self) -> u32 {
        self.tiles_per_side
    }

    /// Width (and height) of the image in pixels.
    pub fn width(&self) -> u32 {
        self.tiles_per_side * TILE_SIZE
    }

    /// Max-zoom tiles with their column and row in the super tile, row by row from the top.
    ///
    /// The tile is valid and `max_zoom` is at most [`MAX_SUPPORTED_ZOOM`], so the indices are
    /// below `2^max_zoom` and fit into `u32`.
    pub fn sub_tiles(&self) -> impl Iterator<Item = (u32, u32, TileIndex)> + '_ {
        let k = self.tiles_per_side;
        (0..k).flat_map(move |row| {
            (0..k).map(move |col| {
                let index =
                    TileIndex::new(self.max_zoom, self.tile.x * k + col, self.tile.y * k + row);
                (col, row, index)
            })
        })
    }

    /// Loads all tiles and stitches them together. Tiles that fail to load are left transparent.
    pub(crate) async fn assemble(
        &self,
        http: &impl HttpService,
        url_source: &dyn UrlSource,
    ) -> Result<DecodedImage, KiwiError> {
        let mut canvas = RgbaImage::new(self.width(), self.width());
        let mut loaded = 0;

        for (col, row, index) in self.sub_tiles() {
            let url = url_source(&index);
            let decoded = match http.get(&url, &[]).await {
                Ok(bytes) => DecodedImage::decode(&bytes),
                Err(err) => Err(err),
            };

            match decoded.map(DecodedImage::into_rgba_image) {
                Ok(Some(image)) => {
                    imageops::replace(
                        &mut canvas,
                        &image,
                        (col * TILE_SIZE) as i64,
                        (row * TILE_SIZE) as i64,
                    );
                    loaded += 1;
                }
                Ok(None) => warn!("Failed to load {url}: inconsistent image buffer"),
                Err(err) => warn!("Failed to load {url}: {err}"),
            }
        }

        if loaded == 0 {
            return Err(KiwiError::NoTilesLoaded);
        }

        info!(
            "Loaded {loaded} of {} tiles of super tile {}",
            self.tiles_per_side * self.tiles_per_side,
            self.tile
        );
        Ok(DecodedImage::from_rgba(canvas))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::config::DEFAULT_MAX_ZOOM;

    #[test]
    fn urls() {
        let source = imagery_url_source("abc");
        assert_eq!(
            source(&TileIndex::new(13, 2096, 3047)),
            "https://project-kiwi-tiles.s3.amazonaws.com/abc/13/2096/3047"
        );

        let source = template_url_source("http://localhost/{z}/{x}/{y}.png");
        assert_eq!(source(&TileIndex::new(1, 0, 1)), "http://localhost/1/0/1.png");
    }

    #[test]
    fn layout() {
        let layout = SuperTileLayout::new(TileIndex::new(10, 262, 380), 11).unwrap();
        assert_eq!(layout.tiles_per_side(), 2);
        assert_eq!(layout.width(), 512);

        let tiles: Vec<_> = layout.sub_tiles().collect();
        assert_eq!(
            tiles,
            vec![
                (0, 0, TileIndex::new(11, 524, 760)),
                (1, 0, TileIndex::new(11, 525, 760)),
                (0, 1, TileIndex::new(11, 524, 761)),
                (1, 1, TileIndex::new(11, 525, 761)),
            ]
        );

        let same_zoom = SuperTileLayout::new(TileIndex::new(10, 262, 380), 10).unwrap();
        assert_eq!(
            same_zoom.sub_tiles().collect::<Vec<_>>(),
            vec![(0, 0, TileIndex::new(10, 262, 380))]
        );
    }

    #[test]
    fn layout_rejects_tiles_outside_grid() {
        let outside = TileIndex::new(10, u32::MAX, 0);
        assert_matches!(
            SuperTileLayout::new(outside, 11),
            Err(KiwiError::InvalidTile(tile)) if tile == outside
        );
        assert_matches!(
            SuperTileLayout::new(TileIndex::new(10, 0, 1024), 10),
            Err(KiwiError::InvalidTile(_))
        );
    }

    #[test]
    fn layout_zoom_beyond_u32_indices() {
        let last_column = TileIndex::new(30, (1 << 30) - 1, 0);
        assert_matches!(
            SuperTileLayout::new(last_column, 33),
            Err(KiwiError::UnsupportedZoom { max_zoom: 33 })
        );
        assert_matches!(
            SuperTileLayout::new(TileIndex::new(0, 0, 0), 200),
            Err(KiwiError::UnsupportedZoom { max_zoom: 200 })
        );

        let deepest = SuperTileLayout::new(TileIndex::new(30, (1 << 30) - 1, 0), 32).unwrap();
        let last = deepest.sub_tiles().last().unwrap();
        assert_eq!(last, (3, 3, TileIndex::new(32, u32::MAX, 3)));
    }

    #[test]
    fn layout_limits() {
        let tile = TileIndex::new(10, 262, 380);
        assert!(SuperTileLayout::new(tile, 15).is_ok());
        assert_matches!(
            SuperTileLayout::new(tile, 16),
            Err(KiwiError::SuperTileTooLarge { width: 16384 })
        );
        assert_matches!(
            SuperTileLayout::new(tile, DEFAULT_MAX_ZOOM),
            Err(KiwiError::SuperTileTooLarge { .. })
        );
        assert_matches!(
            SuperTileLayout::new(TileIndex::new(0, 0, 0), 32),
            Err(KiwiError::SuperTileTooLarge { width: 1_099_511_627_776 })
        );
        assert_matches!(
            SuperTileLayout::new(tile, 9),
            Err(KiwiError::InvalidZoom {
                zoom: 10,
                max_zoom: 9
            })
        );
    }
}
