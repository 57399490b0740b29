//! Estimation of how much of an annotation lies inside a map tile.
//!
//! The estimate works on bounding boxes only: the part of the polygon's bounding box clipped to
//! the tile is divided by the area of the whole (unclipped) bounding box. The remote platform
//! uses the same formula, so it must not be "improved" here.

use crate::bounding_box::{tile_relative_bounding_box, TileBoundingBox};
use crate::error::GeometryError;
use crate::geo::GeoPoint;
use crate::tile::TileIndex;

/// Default overlap threshold. Any overlap, however small, qualifies.
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.0;

impl TileBoundingBox {
    /// Fraction of this box that lies inside the unit tile square.
    ///
    /// A box that does not intersect the tile gives exactly `0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateGeometry`] if the box has zero width or height.
    pub fn overlap_ratio(&self) -> Result<f64, GeometryError> {
        let area = self.area();
        if area == 0.0 || !area.is_finite() {
            return Err(GeometryError::DegenerateGeometry);
        }

        let intersection = self.clipped();
        Ok(intersection.width() * intersection.height() / area)
    }
}

/// Fraction of the polygon's bounding box that lies inside `tile`.
///
/// # Errors
///
/// * [`GeometryError::InvalidInput`] if the polygon is empty;
/// * [`GeometryError::OutOfRangeLatitude`] if the polygon reaches the poles;
/// * [`GeometryError::DegenerateGeometry`] if the polygon's bounding box has zero area, which is
///   the case for point annotations and perfectly horizontal or vertical lines.
pub fn tile_overlap_ratio<P: GeoPoint>(polygon: &[P], tile: &TileIndex) -> Result<f64, GeometryError> {
    tile_relative_bounding_box(polygon, tile)?.overlap_ratio()
}

/// Decides whether an annotation belongs to a tile: it does if its overlap ratio is not less than
/// the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapFilter {
    tile: TileIndex,
    threshold: f64,
}

impl OverlapFilter {
    /// Creates a filter with [`DEFAULT_OVERLAP_THRESHOLD`].
    pub fn new(tile: TileIndex) -> Self {
        Self {
            tile,
            threshold: DEFAULT_OVERLAP_THRESHOLD,
        }
    }

    /// Sets the minimum overlap ratio.
    pub fn with_threshold(self, threshold: f64) -> Self {
        Self { threshold, ..self }
    }

    /// Tile the filter selects annotations for.
    pub fn tile(&self) -> TileIndex {
        self.tile
    }

    /// Minimum overlap ratio.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Checks the polygon against the filter.
    ///
    /// Polygons with a zero-area bounding box have no meaningful ratio. They match if they touch
    /// the tile.
    pub fn matches<P: GeoPoint>(&self, polygon: &[P]) -> Result<bool, GeometryError> {
        let bbox = tile_relative_bounding_box(polygon, &self.tile)?;
        match bbox.overlap_ratio() {
            Ok(ratio) => Ok(ratio >= self.threshold),
            Err(GeometryError::DegenerateGeometry) => Ok(bbox.touches_tile()),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;
    use crate::geo::GeoPoint2d;
    use crate::slippy::tile_to_degrees;

    fn square_around(center: GeoPoint2d, half_size: f64) -> Vec<[f64; 2]> {
        vec![
            [center.lon() - half_size, center.lat() - half_size],
            [center.lon() + half_size, center.lat() - half_size],
            [center.lon() + half_size, center.lat() + half_size],
            [center.lon() - half_size, center.lat() + half_size],
        ]
    }

    #[test]
    fn full_containment() {
        let tile = TileIndex::new(10, 262, 380);
        let ratio = tile_overlap_ratio(&tile.geo_bounds().corners(), &tile).unwrap();
        assert_abs_diff_eq!(ratio, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn polygon_inside_tile() {
        let tile = TileIndex::new(10, 262, 380);
        let polygon = square_around(tile.center(), 0.01);
        assert_abs_diff_eq!(tile_overlap_ratio(&polygon, &tile).unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn half_overlap() {
        let tile = TileIndex::new(4, 3, 5);
        // Box spanning from the middle of the tile to the middle of its right neighbour.
        let top_left = tile_to_degrees(3.5, 5.0, 4);
        let bottom_right = tile_to_degrees(4.5, 6.0, 4);
        let polygon = [top_left, bottom_right];

        assert_abs_diff_eq!(tile_overlap_ratio(&polygon, &tile).unwrap(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn tile_inside_polygon() {
        let tile = TileIndex::new(4, 3, 5);
        let polygon = [tile_to_degrees(2.0, 4.0, 4), tile_to_degrees(5.0, 7.0, 4)];

        // The tile is one of nine covered by the box.
        assert_abs_diff_eq!(
            tile_overlap_ratio(&polygon, &tile).unwrap(),
            1.0 / 9.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn degenerate_point_at_tile_center() {
        let tile: TileIndex = "10/262/380".parse().unwrap();
        assert_matches!(
            tile_overlap_ratio(&[tile.center()], &tile),
            Err(GeometryError::DegenerateGeometry)
        );

        let line = [[-1.0, 10.0], [1.0, 10.0]];
        assert_matches!(
            tile_overlap_ratio(&line, &TileIndex::new(0, 0, 0)),
            Err(GeometryError::DegenerateGeometry)
        );
    }

    #[test]
    fn disjoint_box_is_zero() {
        let tile = TileIndex::new(10, 262, 380);
        // the tile is in the western hemisphere
        let antipode = GeoPoint2d::latlon(-tile.center().lat(), tile.center().lon() + 180.0);
        let polygon = square_around(antipode, 1.0);

        assert_eq!(tile_overlap_ratio(&polygon, &tile).unwrap(), 0.0);
    }

    #[test]
    fn overlap_monotonicity() {
        let start = TileIndex::new(8, 100, 100);
        let top_left = tile_to_degrees(100.25, 100.25, 8);
        let bottom_right = tile_to_degrees(101.75, 101.75, 8);
        let polygon = [top_left, bottom_right];

        for (dx, dy) in [(1, 0), (0, 1), (1, 1), (-1, 0), (0, -1), (-1, -1)] {
            let mut prev = f64::INFINITY;
            for step in 0..5 {
                let tile = start.offset(dx * step, dy * step).unwrap();
                let ratio = tile_overlap_ratio(&polygon, &tile).unwrap();
                assert!(ratio >= 0.0);
                assert!(ratio <= prev + 1e-12, "ratio grew at {tile}");
                prev = ratio;
            }

            assert_eq!(prev, 0.0);
        }
    }

    #[test]
    fn empty_polygon() {
        let polygon: Vec<[f64; 2]> = vec![];
        assert_matches!(
            tile_overlap_ratio(&polygon, &TileIndex::new(0, 0, 0)),
            Err(GeometryError::InvalidInput(_))
        );
    }

    #[test]
    fn filter() {
        let tile = TileIndex::new(4, 3, 5);
        let half = [tile_to_degrees(3.5, 5.0, 4), tile_to_degrees(4.5, 6.0, 4)];

        assert!(OverlapFilter::new(tile).matches(&half).unwrap());
        assert!(OverlapFilter::new(tile).with_threshold(0.4).matches(&half).unwrap());
        assert!(!OverlapFilter::new(tile).with_threshold(0.6).matches(&half).unwrap());

        let far_away = [tile_to_degrees(10.0, 10.0, 4), tile_to_degrees(11.0, 11.0, 4)];
        assert!(OverlapFilter::new(tile).matches(&far_away).unwrap());
        assert!(!OverlapFilter::new(tile).with_threshold(0.01).matches(&far_away).unwrap());
    }

    #[test]
    fn filter_degenerate_boxes() {
        let tile = TileIndex::new(10, 262, 380);
        let filter = OverlapFilter::new(tile).with_threshold(0.5);

        assert!(filter.matches(&[tile.center()]).unwrap());
        assert!(!filter
            .matches(&[TileIndex::new(10, 0, 0).center()])
            .unwrap());
    }
}
