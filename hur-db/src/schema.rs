//! SQL schema definitions.
//!
//! The base schema is applied whenever a database is opened. Spatial indexes
//! are kept separate and created once a load has finished, since building
//! them over a full table is cheaper than maintaining them row by row.

/// Returns the base schema as a single batch string.
///
/// `observations` holds one row per fix:
/// - storm identity: `basin`, `season`, `cyclone_number`, `name`
/// - `seq`: position of the fix within its storm
/// - recorded fields: `ts`, `code`, `status`, `lon`, `lat`, `max_wind`, `min_pressure`
/// - `wind_radii`: raw radii as JSON (nautical miles, `-999` missing)
/// - `wind_rings`: derived `GeometryCollection` as JSON
/// - `highest_threshold`: 0, 34, 50 or 64
/// - `ring_*`: bounding box of the outermost ring, NULL when there is none
/// - `bearing`, `avg_speed`: track kinematics, NULL where undefined
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS observations (
        basin TEXT NOT NULL,
        season INTEGER NOT NULL,
        cyclone_number INTEGER NOT NULL,
        seq INTEGER NOT NULL,
        name TEXT NOT NULL,
        ts TEXT NOT NULL,
        code TEXT NOT NULL,
        status TEXT NOT NULL,
        lon REAL NOT NULL,
        lat REAL NOT NULL,
        max_wind INTEGER NOT NULL,
        min_pressure INTEGER NOT NULL,
        wind_radii TEXT NOT NULL,
        wind_rings TEXT NOT NULL,
        highest_threshold INTEGER NOT NULL,
        ring_min_lon REAL,
        ring_min_lat REAL,
        ring_max_lon REAL,
        ring_max_lat REAL,
        bearing INTEGER,
        avg_speed INTEGER,
        PRIMARY KEY (basin, season, cyclone_number, seq)
    );
    CREATE INDEX IF NOT EXISTS idx_obs_name_season ON observations(name, season);
    CREATE INDEX IF NOT EXISTS idx_obs_ts ON observations(ts);
    "#
}

/// Spatial indexes over fix centers and wind-ring extents.
pub fn geo_indexes() -> &'static str {
    r#"
    CREATE INDEX IF NOT EXISTS idx_obs_center ON observations(lon, lat);
    CREATE INDEX IF NOT EXISTS idx_obs_ring_bbox
        ON observations(ring_min_lon, ring_max_lon, ring_min_lat, ring_max_lat);
    "#
}

pub fn drop_schema() -> &'static str {
    "DROP TABLE IF EXISTS observations;"
}
