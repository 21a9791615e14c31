use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::WindFieldConfig;
use crate::hurdat::RawTrack;
use crate::kinematics::derive_kinematics;
use crate::observation::Observation;

/// Identity of one storm in one season.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StormId {
    /// Two-letter basin code, e.g. `AL` or `EP`.
    pub basin: String,
    /// ATCF cyclone number within the basin and season.
    #[serde(rename = "nth")]
    pub cyclone_number: u8,
    pub season: i32,
    pub name: String,
}

impl StormId {
    /// ATCF identifier such as `AL122005`.
    pub fn atcf_id(&self) -> String {
        format!("{}{:02}{}", self.basin, self.cyclone_number, self.season)
    }
}

impl fmt::Display for StormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.atcf_id(), self.name)
    }
}

/// A storm's fixes in source order, with wind fields and motion derived.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    storm: StormId,
    observations: Vec<Observation>,
}

impl Track {
    /// Build a track from its complete fix list. Kinematics are derived
    /// here, over the whole sequence, before anything can read it.
    pub fn new(storm: StormId, mut observations: Vec<Observation>) -> Self {
        derive_kinematics(&mut observations);
        Self {
            storm,
            observations,
        }
    }

    pub fn from_raw(raw: RawTrack, config: &WindFieldConfig) -> Self {
        let observations = raw
            .fixes
            .into_iter()
            .map(|fix| Observation::from_fix(fix, config))
            .collect();
        Self::new(raw.storm, observations)
    }

    pub fn storm(&self) -> &StormId {
        &self.storm
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Destination for derived observations.
///
/// Implementations own the storage technology; the core only hands over
/// finished observations and asks for spatial indexes once loading is done.
pub trait TrackStore {
    /// Persist one observation, `seq` being its position within the storm.
    fn store(&self, storm: &StormId, seq: usize, observation: &Observation) -> anyhow::Result<()>;

    /// Create the spatial indexes over centers and wind rings, if missing.
    fn ensure_geo_indexes(&self) -> anyhow::Result<()>;

    /// Store every observation of a track in order; returns how many.
    fn store_track(&self, track: &Track) -> anyhow::Result<usize> {
        for (seq, observation) in track.observations().iter().enumerate() {
            self.store(track.storm(), seq, observation)?;
        }
        Ok(track.len())
    }
}
