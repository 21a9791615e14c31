//! Spherical-earth helpers for projecting wind radii and measuring storm motion.
//!
//! Two radii are in play: projection uses 6378.1 km, while the haversine
//! distance uses a 6371 km mean radius (the `12742` diameter constant).

use serde::{Deserialize, Serialize};

/// Earth radius in kilometers used when projecting a point along a bearing.
pub const PROJECTION_RADIUS_KM: f64 = 6378.1;

/// Twice the mean Earth radius, in kilometers, for the haversine distance.
pub const MEAN_DIAMETER_KM: f64 = 12742.0;

/// Projected coordinates are quantized to this many decimal places (~100 m).
pub const COORDINATE_DECIMALS: i32 = 3;

/// A position in decimal degrees, longitude first.
///
/// Serializes as a `[lon, lat]` pair so it can be dropped straight into a
/// GeoJSON `coordinates` member.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.lon, point.lat]
    }
}

/// Axis-aligned extent in degrees.
///
/// A box crossing the antimeridian has `min_lon > max_lon`: it spans from
/// `min_lon` east through 180 to `max_lon`, as GeoJSON bounding boxes do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Degenerate box around a single point.
    pub fn point(p: GeoPoint) -> Self {
        Self {
            min_lon: p.lon,
            min_lat: p.lat,
            max_lon: p.lon,
            max_lat: p.lat,
        }
    }

    pub fn including(self, p: GeoPoint) -> Self {
        Self {
            min_lon: self.min_lon.min(p.lon),
            min_lat: self.min_lat.min(p.lat),
            max_lon: self.max_lon.max(p.lon),
            max_lat: self.max_lat.max(p.lat),
        }
    }

    /// Smallest box holding every point, or `None` for an empty slice.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::point(*first), |acc, p| acc.including(*p)))
    }

    pub fn crosses_antimeridian(&self) -> bool {
        self.min_lon > self.max_lon
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        let in_lon = if self.crosses_antimeridian() {
            point.lon >= self.min_lon || point.lon <= self.max_lon
        } else {
            (self.min_lon..=self.max_lon).contains(&point.lon)
        };
        in_lon && (self.min_lat..=self.max_lat).contains(&point.lat)
    }
}

/// Round a coordinate to [`COORDINATE_DECIMALS`] places.
pub fn round_coordinate(value: f64) -> f64 {
    let scale = 10f64.powi(COORDINATE_DECIMALS);
    (value * scale).round() / scale
}

pub(crate) fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 540.0).rem_euclid(360.0) - 180.0
    }
}

/// Point reached by travelling `distance_km` from `origin` on the initial
/// compass bearing `bearing_deg` (0 = north, clockwise).
///
/// The result is already rounded to three decimals, so every ring vertex
/// built from it is quantized the same way.
pub fn destination_point(origin: GeoPoint, distance_km: f64, bearing_deg: f64) -> GeoPoint {
    let angular = distance_km / PROJECTION_RADIUS_KM;
    let bearing = bearing_deg.to_radians();
    let lat1 = origin.lat.to_radians();
    let lon1 = origin.lon.to_radians();

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());

    GeoPoint::new(
        round_coordinate(wrap_longitude(lon2.to_degrees())),
        round_coordinate(lat2.to_degrees()),
    )
}

/// Haversine distance in kilometers.
pub fn great_circle_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let p = std::f64::consts::PI / 180.0;
    let h = 0.5 - ((b.lat - a.lat) * p).cos() / 2.0
        + (a.lat * p).cos() * (b.lat * p).cos() * (1.0 - ((b.lon - a.lon) * p).cos()) / 2.0;
    MEAN_DIAMETER_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Initial compass bearing from `start` toward `end`, in `[0, 360)`.
///
/// Coincident points have no direction; they report 0.
pub fn initial_bearing_deg(start: GeoPoint, end: GeoPoint) -> f64 {
    if start == end {
        return 0.0;
    }
    let lat1 = start.lat.to_radians();
    let lat2 = end.lat.to_radians();
    let delta_lon = (end.lon - start.lon).to_radians();

    let x = delta_lon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    (x.atan2(y).to_degrees() + 360.0) % 360.0
}
