//! Query result model structs.

use chrono::NaiveDateTime;
use hur_track::geodesy::GeoPoint;
use hur_track::wind_field::WindFieldGeometry;
use serde::Serialize;

/// One storm as listed in the database.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StormSummary {
    pub basin: String,
    pub season: i32,
    pub cyclone_number: u8,
    pub name: String,
    /// Number of stored fixes.
    pub fixes: u32,
    /// Strongest max wind over the track, in knots.
    pub peak_wind: i32,
}

/// A stored fix read back from the `observations` table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrackFix {
    pub basin: String,
    pub season: i32,
    pub cyclone_number: u8,
    pub name: String,
    pub seq: u32,
    pub ts: NaiveDateTime,
    pub code: String,
    pub status: String,
    pub center: GeoPoint,
    pub max_wind: i32,
    pub min_pressure: i32,
    /// 0 when no threshold is active.
    pub highest_threshold: u8,
    pub wind_rings: WindFieldGeometry,
    pub bearing: Option<u16>,
    pub avg_speed: Option<u32>,
}
