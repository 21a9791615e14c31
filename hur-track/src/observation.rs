use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::WindFieldConfig;
use crate::geodesy::GeoPoint;
use crate::hurdat::RawFix;
use crate::quadrant::ThresholdSet;
use crate::wind_field::{assemble, WindFieldGeometry};

/// Record identifier given to ordinary synoptic fixes, which HURDAT2 leaves blank.
pub const REGULAR_FIX_CODE: &str = "D";

/// One fix of a storm, with its derived wind field and motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "ts")]
    pub timestamp: NaiveDateTime,
    pub code: String,
    pub status: String,
    pub center: GeoPoint,
    /// Maximum sustained wind in knots.
    #[serde(rename = "maxWind")]
    pub max_wind: i32,
    /// Minimum central pressure in millibars, `-999` when unknown.
    #[serde(rename = "minPres")]
    pub min_pressure: i32,
    /// Radii as recorded, nautical miles with `-999` for missing.
    #[serde(rename = "windRadii")]
    pub wind_radii: ThresholdSet,
    #[serde(rename = "windRings")]
    pub wind_rings: WindFieldGeometry,
    /// Compass heading on the leg leaving this fix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing: Option<u16>,
    /// km/h over the leg arriving at this fix.
    #[serde(rename = "avgSpeed", default, skip_serializing_if = "Option::is_none")]
    pub avg_speed: Option<u32>,
}

impl Observation {
    /// Derive the wind field for a parsed fix. Motion is filled in later,
    /// once the whole track is known.
    pub fn from_fix(fix: RawFix, config: &WindFieldConfig) -> Self {
        let wind_rings = assemble(fix.center, &fix.radii, config);
        Self {
            timestamp: fix.timestamp,
            code: fix.code,
            status: fix.status,
            center: fix.center,
            max_wind: fix.max_wind,
            min_pressure: fix.min_pressure,
            wind_radii: fix.radii,
            wind_rings,
            bearing: None,
            avg_speed: None,
        }
    }

    pub fn is_regular(&self) -> bool {
        self.code == REGULAR_FIX_CODE
    }
}
