//! SQLite storage for derived storm-track observations.
//!
//! One row per fix, carrying the storm identity, the recorded fields, the
//! raw radii and the derived `windRings` geometry (both as JSON), plus the
//! bearing and average speed computed over the track.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper, single-threaded like the loader
//! - On-disk (`Database::open`) or in-memory (`Database::new`) via `rusqlite`
//! - [`hur_track::track::TrackStore`] implemented in `store`, so the core
//!   never sees SQL
//! - Typed query methods returning the structs in [`models`]
//!
//! # Usage
//!
//! ```rust
//! use hur_db::Database;
//! use hur_track::config::WindFieldConfig;
//! use hur_track::hurdat::parse_tracks;
//! use hur_track::track::{Track, TrackStore};
//! use hur_track::SAMPLE_HURDAT2;
//!
//! let db = Database::new().unwrap();
//! for raw in parse_tracks(SAMPLE_HURDAT2).unwrap() {
//!     db.store_track(&Track::from_raw(raw, &WindFieldConfig::default())).unwrap();
//! }
//! db.ensure_geo_indexes().unwrap();
//!
//! let katrina = db.query_track("KATRINA", 2005).unwrap();
//! assert_eq!(katrina.len(), 6);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the SQL schema and
//! [`schema::geo_indexes`] for the spatial indexes created after a load.

pub mod schema;
mod store;
mod queries;
pub mod models;

use rusqlite::Connection;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Timestamp format of the `ts` column; sorts chronologically as text.
pub const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// SQLite database of storm observations.
///
/// Cheaply cloneable (via `Rc`); clones share one connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Open (or create) a database file and apply the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    fn from_connection(conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }

    /// Drop every stored observation and recreate the empty schema.
    pub fn drop_observations(&self) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        conn.execute_batch(schema::drop_schema())?;
        conn.execute_batch(schema::create_schema())?;
        log::info!("db: dropped observations");
        Ok(())
    }
}
