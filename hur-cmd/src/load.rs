//! Loading a HURDAT2 file into a track store.

use anyhow::Context;
use hur_db::Database;
use hur_track::config::WindFieldConfig;
use hur_track::hurdat::TrackReader;
use hur_track::track::{Track, TrackStore};
use log::info;
use std::io::Read;

/// Progress is logged each time this many storms have been stored.
pub const PROGRESS_EVERY: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub storms: usize,
    pub observations: usize,
}

/// Derive and store every storm the reader yields, then build the geo
/// indexes. Stops at the first parse or storage error; storms stored before
/// it stay stored.
pub fn load_tracks<S, R>(
    store: &S,
    reader: TrackReader<R>,
    config: &WindFieldConfig,
) -> anyhow::Result<LoadSummary>
where
    S: TrackStore,
    R: Read,
{
    let mut summary = LoadSummary::default();
    for raw in reader {
        let raw = raw.with_context(|| {
            format!("Failed to read storm #{} from HURDAT2 input", summary.storms + 1)
        })?;
        let track = Track::from_raw(raw, config);
        summary.observations += store
            .store_track(&track)
            .with_context(|| format!("Failed to store {}", track.storm()))?;
        summary.storms += 1;
        if summary.storms % PROGRESS_EVERY == 0 {
            info!("loader: {} storms loaded", summary.storms);
        }
    }
    info!(
        "loader: total events loaded: {} ({} storms)",
        summary.observations, summary.storms
    );
    store.ensure_geo_indexes()?;
    Ok(summary)
}

/// Run the `load` command against a database file.
pub fn run_load(
    file: &str,
    db_path: &str,
    drop: bool,
    config: &WindFieldConfig,
) -> anyhow::Result<()> {
    config
        .validate()
        .context("Invalid wind-field calibration")?;
    let db = Database::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path))?;
    if drop {
        db.drop_observations()?;
    }
    let reader = TrackReader::from_path(file)
        .with_context(|| format!("Failed to open HURDAT2 file {}", file))?;
    info!("Loading {} into {}", file, db_path);
    let summary = load_tracks(&db, reader, config)?;
    info!(
        "Load complete: {} storms, {} observations",
        summary.storms, summary.observations
    );
    Ok(())
}
