//! Bearing and average speed between consecutive fixes of one storm.
//!
//! The bearing of a leg belongs to the fix it departs from; the speed belongs
//! to the fix it arrives at. The last fix of a track therefore never has a
//! bearing, and the first never has a speed.

use log::warn;

use crate::geodesy::{great_circle_distance_km, initial_bearing_deg};
use crate::observation::Observation;

/// Motion between two adjacent fixes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub distance_km: f64,
    /// Rounded compass bearing, `None` when the storm did not move.
    pub bearing: Option<u16>,
    /// Rounded km/h, `None` when no time elapsed.
    pub avg_speed: Option<u32>,
}

impl Leg {
    pub fn between(from: &Observation, to: &Observation) -> Self {
        let distance_km = great_circle_distance_km(from.center, to.center);

        let bearing = (from.center != to.center)
            .then(|| initial_bearing_deg(from.center, to.center).round() as u16 % 360);

        let elapsed_secs = (to.timestamp - from.timestamp).num_seconds();
        if elapsed_secs < 0 {
            warn!(
                "fix at {} precedes the fix before it ({}); leaving speed unset",
                to.timestamp, from.timestamp
            );
        }
        let avg_speed = (elapsed_secs > 0).then(|| {
            let hours = elapsed_secs as f64 / 3600.0;
            (distance_km / hours).round() as u32
        });

        Self {
            distance_km,
            bearing,
            avg_speed,
        }
    }
}

/// Attach bearing and average speed to every fix of an ordered track.
///
/// Any previously derived values are cleared first, so running this twice
/// over the same sequence gives the same result.
pub fn derive_kinematics(observations: &mut [Observation]) {
    let legs: Vec<Leg> = observations
        .windows(2)
        .map(|pair| Leg::between(&pair[0], &pair[1]))
        .collect();

    for obs in observations.iter_mut() {
        obs.bearing = None;
        obs.avg_speed = None;
    }

    for (i, leg) in legs.into_iter().enumerate() {
        observations[i].bearing = leg.bearing;
        observations[i + 1].avg_speed = leg.avg_speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindFieldConfig;
    use crate::geodesy::GeoPoint;
    use crate::hurdat::RawFix;
    use crate::quadrant::ThresholdSet;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2005, 8, 24)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn obs(timestamp: NaiveDateTime, lon: f64, lat: f64) -> Observation {
        Observation::from_fix(
            RawFix {
                timestamp,
                code: "D".to_string(),
                status: "TS".to_string(),
                center: GeoPoint::new(lon, lat),
                max_wind: 40,
                min_pressure: 1000,
                radii: ThresholdSet::default(),
            },
            &WindFieldConfig::default(),
        )
    }

    #[test]
    fn eastward_track_at_constant_speed() {
        let mut track = vec![
            obs(start(), -80.0, 0.0),
            obs(start() + Duration::hours(6), -79.0, 0.0),
            obs(start() + Duration::hours(12), -78.0, 0.0),
        ];
        derive_kinematics(&mut track);

        assert_eq!(track[0].bearing, Some(90));
        assert_eq!(track[1].bearing, Some(90));
        assert_eq!(track[2].bearing, None);

        assert_eq!(track[0].avg_speed, None);
        // One degree of longitude on the equator is ~111.2 km, over 6 hours.
        assert_eq!(track[1].avg_speed, Some(19));
        assert_eq!(track[1].avg_speed, track[2].avg_speed);
    }

    #[test]
    fn bearing_describes_departure_not_arrival() {
        let mut track = vec![
            obs(start(), -80.0, 25.0),
            obs(start() + Duration::hours(6), -80.0, 26.0),
        ];
        derive_kinematics(&mut track);
        assert_eq!(track[0].bearing, Some(0));
        assert_eq!(track[1].bearing, None);
    }

    #[test]
    fn zero_elapsed_time_omits_speed() {
        let mut track = vec![obs(start(), -80.0, 25.0), obs(start(), -80.5, 25.0)];
        derive_kinematics(&mut track);
        assert_eq!(track[1].avg_speed, None);
        assert_eq!(track[0].bearing, Some(270));
    }

    #[test]
    fn stationary_storm_omits_bearing_but_reports_zero_speed() {
        let mut track = vec![
            obs(start(), -80.0, 25.0),
            obs(start() + Duration::hours(6), -80.0, 25.0),
        ];
        derive_kinematics(&mut track);
        assert_eq!(track[0].bearing, None);
        assert_eq!(track[1].avg_speed, Some(0));
    }

    #[test]
    fn multi_day_gaps_use_full_elapsed_time() {
        let mut track = vec![
            obs(start(), -80.0, 0.0),
            obs(start() + Duration::hours(30), -79.0, 0.0),
        ];
        derive_kinematics(&mut track);
        // ~111.2 km over 30 hours.
        assert_eq!(track[1].avg_speed, Some(4));
    }

    #[test]
    fn rerunning_is_idempotent() {
        let mut track = vec![
            obs(start(), -80.0, 25.0),
            obs(start() + Duration::hours(6), -81.0, 26.0),
            obs(start() + Duration::hours(12), -82.0, 27.5),
        ];
        derive_kinematics(&mut track);
        let first = track.clone();
        derive_kinematics(&mut track);
        assert_eq!(track, first);
    }

    #[test]
    fn single_fix_has_no_motion() {
        let mut track = vec![obs(start(), -80.0, 25.0)];
        derive_kinematics(&mut track);
        assert_eq!(track[0].bearing, None);
        assert_eq!(track[0].avg_speed, None);
        derive_kinematics(&mut []);
    }

    #[test]
    fn bearing_rounds_into_compass_range() {
        // Slightly west of due north rounds to 360, which must wrap to 0.
        let a = obs(start(), 0.0, 0.0);
        let b = obs(start() + Duration::hours(6), -0.001, 1.0);
        let leg = Leg::between(&a, &b);
        assert_eq!(leg.bearing, Some(0));
    }
}
