//! Command implementations for the HURDAT2 track CLI.
//!
//! Provides subcommands for loading a HURDAT2 file into SQLite and for
//! exporting one stored storm as GeoJSON.

use clap::Subcommand;
use hur_track::config::{
    WindFieldConfig, DEFAULT_CONTAINMENT_MARGIN_KM, DEFAULT_FUDGE_DIVISOR,
    DEFAULT_ZERO_QUADRANT_FLOOR_NM,
};

pub mod load;
pub mod track;

/// Database file used when `--db` is not given.
pub const DEFAULT_DB_PATH: &str = "hurricane.db";

#[derive(Subcommand)]
pub enum Command {
    /// Parse a HURDAT2 file, derive wind rings and motion, and store every fix
    Load {
        /// Path to the HURDAT2 text file
        file: String,

        /// SQLite database to write into
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db: String,

        /// Drop previously stored observations before loading
        #[arg(long)]
        drop: bool,

        /// Radius (nm) given to zero quadrants of an active threshold
        #[arg(long, default_value_t = DEFAULT_ZERO_QUADRANT_FLOOR_NM)]
        zero_quadrant_floor_nm: f64,

        /// Divisor pulling the diagonal ring vertices inward
        #[arg(long, default_value_t = DEFAULT_FUDGE_DIVISOR)]
        fudge_divisor: f64,

        /// Minimum gap (km) between nested threshold rings
        #[arg(long, default_value_t = DEFAULT_CONTAINMENT_MARGIN_KM)]
        containment_margin_km: f64,
    },

    /// Export one stored storm as a GeoJSON FeatureCollection
    Track {
        /// Storm name, e.g. KATRINA
        name: String,

        /// Season (year) of the storm
        year: i32,

        /// SQLite database to read from
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db: String,

        /// Output path for the GeoJSON (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Also emit the wind-field polygons of landfall fixes
        #[arg(long)]
        landfall_rings: bool,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Load {
            file,
            db,
            drop,
            zero_quadrant_floor_nm,
            fudge_divisor,
            containment_margin_km,
        } => {
            let config = WindFieldConfig {
                zero_quadrant_floor_nm,
                fudge_divisor,
                containment_margin_km,
            };
            load::run_load(&file, &db, drop, &config)
        }
        Command::Track {
            name,
            year,
            db,
            output,
            landfall_rings,
        } => track::run_track(&name, year, &db, output.as_deref(), landfall_rings),
    }
}
