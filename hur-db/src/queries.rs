//! Typed query methods for reading stored storms back out.
//!
//! All queries return structs from [`crate::models`]. JSON and timestamp
//! columns are decoded while mapping rows, so a corrupt row surfaces as a
//! `FromSqlConversionFailure` naming the offending column.

use crate::models::{StormSummary, TrackFix};
use crate::{Database, TS_FORMAT};
use chrono::NaiveDateTime;
use hur_track::geodesy::{BoundingBox, GeoPoint};
use rusqlite::types::Type;
use rusqlite::{params, Row};

const FIX_COLUMNS: &str = "basin, season, cyclone_number, name, seq, ts, code, status, lon, lat,
     max_wind, min_pressure, highest_threshold, wind_rings, bearing, avg_speed";

fn conversion_error<E>(column: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

/// Map a row selected with [`FIX_COLUMNS`].
fn track_fix(row: &Row<'_>) -> rusqlite::Result<TrackFix> {
    let ts: String = row.get(5)?;
    let ts = NaiveDateTime::parse_from_str(&ts, TS_FORMAT).map_err(|e| conversion_error(5, e))?;
    let rings: String = row.get(13)?;
    let wind_rings = serde_json::from_str(&rings).map_err(|e| conversion_error(13, e))?;
    Ok(TrackFix {
        basin: row.get(0)?,
        season: row.get(1)?,
        cyclone_number: row.get(2)?,
        name: row.get(3)?,
        seq: row.get(4)?,
        ts,
        code: row.get(6)?,
        status: row.get(7)?,
        center: GeoPoint::new(row.get(8)?, row.get(9)?),
        max_wind: row.get(10)?,
        min_pressure: row.get(11)?,
        highest_threshold: row.get(12)?,
        wind_rings,
        bearing: row.get(14)?,
        avg_speed: row.get(15)?,
    })
}

impl Database {
    /// List stored storms, optionally limited to one season.
    ///
    /// Ordered by season, basin and cyclone number.
    pub fn query_storms(&self, season: Option<i32>) -> anyhow::Result<Vec<StormSummary>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT basin, season, cyclone_number, name, COUNT(*), MAX(max_wind)
             FROM observations
             WHERE ?1 IS NULL OR season = ?1
             GROUP BY basin, season, cyclone_number
             ORDER BY season, basin, cyclone_number",
        )?;
        let rows = stmt
            .query_map(params![season], |row| {
                Ok(StormSummary {
                    basin: row.get(0)?,
                    season: row.get(1)?,
                    cyclone_number: row.get(2)?,
                    name: row.get(3)?,
                    fixes: row.get(4)?,
                    peak_wind: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_storms returned {} storms", rows.len());
        Ok(rows)
    }

    /// All fixes of the named storm in one season, in track order.
    ///
    /// The name is matched case-insensitively against the stored upper-case
    /// names. Several basins can reuse a name in the same season; their
    /// fixes are grouped by basin and cyclone number.
    pub fn query_track(&self, name: &str, season: i32) -> anyhow::Result<Vec<TrackFix>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT {FIX_COLUMNS}
             FROM observations
             WHERE name = ?1 AND season = ?2
             ORDER BY basin, cyclone_number, seq"
        ))?;
        let rows = stmt
            .query_map(params![name.to_uppercase(), season], track_fix)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_track {} {} returned {} fixes",
            name,
            season,
            rows.len()
        );
        Ok(rows)
    }

    /// Fixes whose center lies inside `bbox`, edges included.
    pub fn query_fixes_within(&self, bbox: &BoundingBox) -> anyhow::Result<Vec<TrackFix>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT {FIX_COLUMNS}
             FROM observations
             WHERE lon BETWEEN ?1 AND ?3 AND lat BETWEEN ?2 AND ?4
             ORDER BY ts, basin, cyclone_number"
        ))?;
        let rows = stmt
            .query_map(
                params![bbox.min_lon, bbox.min_lat, bbox.max_lon, bbox.max_lat],
                track_fix,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_fixes_within returned {} fixes", rows.len());
        Ok(rows)
    }

    /// Fixes whose outermost wind ring extent covers `point`.
    ///
    /// This is a bounding-box test; a point near a box corner can fall
    /// outside the ring itself. Extents straddling the antimeridian are
    /// stored wrapped (`ring_min_lon > ring_max_lon`) and matched on
    /// either side of 180.
    pub fn query_wind_fields_over(&self, point: GeoPoint) -> anyhow::Result<Vec<TrackFix>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT {FIX_COLUMNS}
             FROM observations
             WHERE ring_min_lat <= ?2 AND ring_max_lat >= ?2
               AND ((ring_min_lon <= ring_max_lon
                     AND ring_min_lon <= ?1 AND ring_max_lon >= ?1)
                 OR (ring_min_lon > ring_max_lon
                     AND (ring_min_lon <= ?1 OR ring_max_lon >= ?1)))
             ORDER BY ts, basin, cyclone_number"
        ))?;
        let rows = stmt
            .query_map(params![point.lon, point.lat], track_fix)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_wind_fields_over returned {} fixes",
            rows.len()
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use hur_track::config::WindFieldConfig;
    use hur_track::geodesy::{BoundingBox, GeoPoint};
    use hur_track::hurdat::parse_tracks;
    use hur_track::quadrant::Threshold;
    use hur_track::track::{Track, TrackStore};
    use hur_track::SAMPLE_HURDAT2;

    fn loaded_db() -> Database {
        let db = Database::new().unwrap();
        for raw in parse_tracks(SAMPLE_HURDAT2).unwrap() {
            db.store_track(&Track::from_raw(raw, &WindFieldConfig::default()))
                .unwrap();
        }
        db.ensure_geo_indexes().unwrap();
        db
    }

    #[test]
    fn query_storms_lists_every_storm() {
        let db = loaded_db();
        let storms = db.query_storms(None).unwrap();
        assert_eq!(storms.len(), 3);
        assert_eq!(storms[0].season, 1851);
        assert_eq!(storms[0].name, "UNNAMED");
        assert_eq!(storms[0].fixes, 3);

        let katrina = &storms[1];
        assert_eq!(katrina.basin, "AL");
        assert_eq!(katrina.cyclone_number, 12);
        assert_eq!(katrina.fixes, 6);
        assert_eq!(katrina.peak_wind, 110);
    }

    #[test]
    fn query_storms_filters_by_season() {
        let db = loaded_db();
        let storms = db.query_storms(Some(2015)).unwrap();
        assert_eq!(storms.len(), 1);
        assert_eq!(storms[0].name, "ANDRES");
        assert!(db.query_storms(Some(1999)).unwrap().is_empty());
    }

    #[test]
    fn query_track_returns_fixes_in_order() {
        let db = loaded_db();
        let fixes = db.query_track("katrina", 2005).unwrap();
        assert_eq!(fixes.len(), 6);
        assert!(fixes.iter().enumerate().all(|(i, f)| f.seq as usize == i));
        assert!(fixes.windows(2).all(|w| w[0].ts <= w[1].ts));

        let landfall = &fixes[3];
        assert_eq!(landfall.code, "L");
        assert_eq!(landfall.highest_threshold, 64);
        assert_eq!(landfall.wind_rings.highest_active(), Some(Threshold::Kt64));
        assert_eq!(landfall.center, GeoPoint::new(-80.1, 26.0));
        assert_eq!(fixes[0].avg_speed, None);
        assert_eq!(fixes[5].bearing, None);
    }

    #[test]
    fn query_track_round_trips_wind_rings() {
        let db = loaded_db();
        let stored = db.query_track("KATRINA", 2005).unwrap();
        let raw = parse_tracks(SAMPLE_HURDAT2).unwrap().remove(0);
        let track = Track::from_raw(raw, &WindFieldConfig::default());
        for (fix, obs) in stored.iter().zip(track.observations()) {
            assert_eq!(fix.wind_rings, obs.wind_rings);
        }
    }

    #[test]
    fn query_track_unknown_storm_is_empty() {
        let db = loaded_db();
        assert!(db.query_track("KATRINA", 2006).unwrap().is_empty());
    }

    #[test]
    fn query_fixes_within_uses_center() {
        let db = loaded_db();
        // Gulf of Mexico, west of 85W.
        let gulf = BoundingBox {
            min_lon: -98.0,
            min_lat: 25.0,
            max_lon: -85.0,
            max_lat: 31.0,
        };
        let fixes = db.query_fixes_within(&gulf).unwrap();
        let names: Vec<_> = fixes.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["UNNAMED", "UNNAMED", "UNNAMED", "KATRINA", "KATRINA"]);
    }

    #[test]
    fn query_wind_fields_over_uses_ring_extent() {
        let db = loaded_db();
        // Just east of Katrina's Florida landfall: inside the 34 kt ring.
        let fixes = db.query_wind_fields_over(GeoPoint::new(-79.8, 26.2)).unwrap();
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].seq, 3);

        // Centers without rings never match, even at their own position.
        let none = db.query_wind_fields_over(GeoPoint::new(-75.1, 23.1)).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn wind_fields_across_antimeridian_match_locally_only() {
        let text = "WP011990,             ALPHA,      1,\n\
            19900101, 0000,  , TS, 10.0N, 179.9E,  45,  998,   60,   60,   60,   60,    0,    0,    0,    0,    0,    0,    0,    0,\n";
        let db = Database::new().unwrap();
        for raw in parse_tracks(text).unwrap() {
            db.store_track(&Track::from_raw(raw, &WindFieldConfig::default()))
                .unwrap();
        }

        assert_eq!(db.query_wind_fields_over(GeoPoint::new(179.5, 10.0)).unwrap().len(), 1);
        assert_eq!(db.query_wind_fields_over(GeoPoint::new(-179.5, 10.0)).unwrap().len(), 1);
        assert!(db.query_wind_fields_over(GeoPoint::new(0.0, 10.0)).unwrap().is_empty());
        assert!(db.query_wind_fields_over(GeoPoint::new(-80.0, 10.0)).unwrap().is_empty());
    }
}
