//! Points in geographic coordinates (latitude and longitude in degrees).

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

/// A point on the surface of the Earth, with coordinates in degrees.
///
/// No geodesic correction is ever applied: coordinates are treated as planar values by all
/// algorithms of this crate.
pub trait GeoPoint {
    /// Latitude in degrees.
    fn lat(&self) -> f64;
    /// Longitude in degrees.
    fn lon(&self) -> f64;

    /// Latitude in radians.
    fn lat_rad(&self) -> f64 {
        self.lat().to_radians()
    }

    /// Longitude in radians.
    fn lon_rad(&self) -> f64 {
        self.lon().to_radians()
    }
}

/// Annotation coordinates come over the wire as `[lon, lat]` pairs.
impl GeoPoint for [f64; 2] {
    fn lat(&self) -> f64 {
        self[1]
    }

    fn lon(&self) -> f64 {
        self[0]
    }
}

impl<T: GeoPoint> GeoPoint for &T {
    fn lat(&self) -> f64 {
        (*self).lat()
    }

    fn lon(&self) -> f64 {
        (*self).lon()
    }
}

/// 2d geographic point.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lat: f64,
    lon: f64,
}

impl GeoPoint2d {
    /// Creates a point from latitude and longitude (in this order).
    pub const fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Creates a point from longitude and latitude (in this order).
    pub const fn lonlat(lon: f64, lat: f64) -> Self {
        Self { lat, lon }
    }

    /// Creates a new point from any other geographic point.
    pub fn from(other: &impl GeoPoint) -> Self {
        Self {
            lat: other.lat(),
            lon: other.lon(),
        }
    }

    /// Returns the point as a `[lon, lat]` pair, the order used by annotation records.
    pub fn to_lonlat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl GeoPoint for GeoPoint2d {
    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl AbsDiffEq for GeoPoint2d {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.lat.abs_diff_eq(&other.lat, epsilon) && self.lon.abs_diff_eq(&other.lon, epsilon)
    }
}

/// Creates a new [`GeoPoint2d`] from latitude and longitude values (in degrees).
///
/// ```
/// use projectkiwi_types::geo::GeoPoint;
/// use projectkiwi_types::latlon;
///
/// let point = latlon!(38.0, 52.0);
/// assert_eq!(point.lat(), 38.0);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        $crate::geo::GeoPoint2d::latlon($lat, $lon)
    };
}
