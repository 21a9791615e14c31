//! Writing derived observations into the `observations` table.

use crate::{schema, Database, TS_FORMAT};
use hur_track::observation::Observation;
use hur_track::track::{StormId, Track, TrackStore};
use rusqlite::params;

impl TrackStore for Database {
    fn store(&self, storm: &StormId, seq: usize, observation: &Observation) -> anyhow::Result<()> {
        let wind_radii = serde_json::to_string(&observation.wind_radii)?;
        let wind_rings = serde_json::to_string(&observation.wind_rings)?;
        let highest = observation
            .wind_rings
            .highest_active()
            .map_or(0, |t| t.knots());
        let bbox = observation.wind_rings.bounding_box();

        let conn = self.conn.borrow();
        conn.execute(
            "INSERT OR REPLACE INTO observations
                (basin, season, cyclone_number, seq, name, ts, code, status, lon, lat,
                 max_wind, min_pressure, wind_radii, wind_rings, highest_threshold,
                 ring_min_lon, ring_min_lat, ring_max_lon, ring_max_lat, bearing, avg_speed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
                     ?16, ?17, ?18, ?19, ?20, ?21)",
            params![
                storm.basin,
                storm.season,
                storm.cyclone_number,
                seq as i64,
                storm.name,
                observation.timestamp.format(TS_FORMAT).to_string(),
                observation.code,
                observation.status,
                observation.center.lon,
                observation.center.lat,
                observation.max_wind,
                observation.min_pressure,
                wind_radii,
                wind_rings,
                highest,
                bbox.map(|b| b.min_lon),
                bbox.map(|b| b.min_lat),
                bbox.map(|b| b.max_lon),
                bbox.map(|b| b.max_lat),
                observation.bearing,
                observation.avg_speed,
            ],
        )?;
        Ok(())
    }

    /// Replace every stored row of the track's storm, so a reload with
    /// fewer fixes leaves nothing behind from the previous load.
    fn store_track(&self, track: &Track) -> anyhow::Result<usize> {
        let storm = track.storm();
        let removed = self.conn.borrow().execute(
            "DELETE FROM observations WHERE basin = ?1 AND season = ?2 AND cyclone_number = ?3",
            params![storm.basin, storm.season, storm.cyclone_number],
        )?;
        if removed > track.len() {
            log::debug!(
                "db: {} shrank from {} to {} fixes",
                storm,
                removed,
                track.len()
            );
        }
        for (seq, observation) in track.observations().iter().enumerate() {
            self.store(storm, seq, observation)?;
        }
        Ok(track.len())
    }

    fn ensure_geo_indexes(&self) -> anyhow::Result<()> {
        self.conn.borrow().execute_batch(schema::geo_indexes())?;
        log::info!("db: geo indexes ready on center and windRings");
        Ok(())
    }
}
