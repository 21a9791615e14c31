//! Storm-track core: HURDAT2 records in, wind-field geometry and track
//! kinematics out.
//!
//! Each fix carries four per-quadrant radii for the 34, 50 and 64 knot
//! thresholds. [`wind_field::assemble`] turns those twelve integers into a
//! nested set of closed rings, and [`kinematics::derive_kinematics`] adds
//! bearing and average speed between consecutive fixes of one storm.
//!
//! Storage is not part of this crate; implementors of [`track::TrackStore`]
//! receive the derived observations.

pub mod config;
pub mod geodesy;
pub mod geojson;
pub mod hurdat;
pub mod kinematics;
pub mod observation;
pub mod quadrant;
pub mod ring;
pub mod track;
pub mod wind_field;

/// Embedded HURDAT2 excerpt used by tests across the workspace.
pub static SAMPLE_HURDAT2: &str = include_str!("../../fixtures/hurdat2-sample.txt");
