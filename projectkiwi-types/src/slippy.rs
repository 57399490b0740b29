//! Conversion between geographic degrees and fractional tile coordinates of the standard
//! spherical Mercator slippy-map grid (the scheme used by OSM and most XYZ tile servers).

use std::f64::consts::PI;

use crate::error::GeometryError;
use crate::geo::GeoPoint2d;
use crate::tile::TilePoint;

/// Number of tiles along each axis at the given zoom level.
pub fn tiles_per_axis(zoom: u32) -> f64 {
    2f64.powi(zoom as i32)
}

/// Converts a geographic position into fractional tile coordinates at the given zoom level.
///
/// The result is not rounded: `floor` it to get the index of the containing tile.
///
/// # Errors
///
/// Returns [`GeometryError::OutOfRangeLatitude`] if the latitude is at or beyond the poles (or is
/// NaN), since the projection is undefined there.
pub fn degrees_to_tile(lat: f64, lon: f64, zoom: u32) -> Result<TilePoint, GeometryError> {
    if !(lat.abs() < 90.0) {
        return Err(GeometryError::OutOfRangeLatitude(lat));
    }

    let point = degrees_to_tile_unchecked(lat, lon, zoom);
    if !point.y.is_finite() {
        return Err(GeometryError::OutOfRangeLatitude(lat));
    }

    Ok(point)
}

/// Same as [`degrees_to_tile`] but without the range check. Latitudes at or beyond the poles
/// produce meaningless (far out of the grid, or NaN) coordinates, which are returned as is.
pub fn degrees_to_tile_unchecked(lat: f64, lon: f64, zoom: u32) -> TilePoint {
    let n = tiles_per_axis(zoom);
    let x = (lon + 180.0) / 360.0 * n;
    let y = (1.0 - lat.to_radians().tan().asinh() / PI) / 2.0 * n;

    TilePoint::new(x, y)
}

/// Converts fractional tile coordinates at the given zoom level into a geographic position.
///
/// This is the exact inverse of [`degrees_to_tile`].
pub fn tile_to_degrees(x: f64, y: f64, zoom: u32) -> GeoPoint2d {
    let n = tiles_per_axis(zoom);
    let lon = x / n * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y / n)).sinh().atan().to_degrees();

    GeoPoint2d::latlon(lat, lon)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;
    use crate::geo::GeoPoint;

    #[test]
    fn known_tiles() {
        assert_abs_diff_eq!(
            degrees_to_tile(0.0, 0.0, 0).unwrap(),
            TilePoint::new(0.5, 0.5),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            degrees_to_tile(0.0, -180.0, 3).unwrap(),
            TilePoint::new(0.0, 4.0),
            epsilon = 1e-12
        );

        // Berlin is in tile 10/550/335
        let point = degrees_to_tile(52.52, 13.405, 10).unwrap();
        assert_eq!(point.x.floor(), 550.0);
        assert_eq!(point.y.floor(), 335.0);
    }

    #[test]
    fn mercator_limit() {
        let top = tile_to_degrees(0.0, 0.0, 5);
        assert_abs_diff_eq!(top.lat(), 85.0511287798, epsilon = 1e-9);
        assert_abs_diff_eq!(top.lon(), -180.0, epsilon = 1e-12);

        let bottom = tile_to_degrees(32.0, 32.0, 5);
        assert_abs_diff_eq!(bottom.lat(), -85.0511287798, epsilon = 1e-9);
        assert_abs_diff_eq!(bottom.lon(), 180.0, epsilon = 1e-12);
    }

    #[test]
    fn round_trip() {
        for zoom in 0..=20 {
            let mut lat = -88.9;
            while lat < 89.0 {
                let mut lon = -179.9;
                while lon < 180.0 {
                    let tile = degrees_to_tile(lat, lon, zoom).unwrap();
                    let back = tile_to_degrees(tile.x, tile.y, zoom);
                    assert_abs_diff_eq!(back, GeoPoint2d::latlon(lat, lon), epsilon = 1e-6);

                    lon += 17.3;
                }

                lat += 7.7;
            }
        }
    }

    #[test]
    fn latitude_out_of_range() {
        for lat in [90.0, -90.0, 91.0, -1000.0, f64::NAN, f64::INFINITY] {
            assert_matches!(
                degrees_to_tile(lat, 0.0, 10),
                Err(GeometryError::OutOfRangeLatitude(_))
            );
        }
    }

    #[test]
    fn unchecked_keeps_non_finite_values() {
        // tan(pi/2) is merely huge in f64, so the pole lands far above the grid instead of
        // being clamped to its edge.
        let north = degrees_to_tile_unchecked(90.0, 0.0, 1);
        assert!(north.y < -1.0);

        let nan = degrees_to_tile_unchecked(f64::NAN, 0.0, 1);
        assert!(nan.y.is_nan());
        assert!(!nan.is_finite());
        assert_eq!(nan.x, 1.0);

        assert!(degrees_to_tile_unchecked(f64::INFINITY, 0.0, 1).y.is_nan());

        let ok = degrees_to_tile_unchecked(45.0, 0.0, 1);
        assert_eq!(ok, degrees_to_tile(45.0, 0.0, 1).unwrap());
    }
}
