//! Reader for the NHC HURDAT2 best-track format.
//!
//! A file is a sequence of storms. Each storm opens with a header line
//!
//! ```text
//! AL122005,            KATRINA,      6,
//! ```
//!
//! (basin, ATCF cyclone number, season; name; fix count) followed by exactly
//! that many fix lines:
//!
//! ```text
//! 20050825, 2230, L, HU, 26.0N,  80.1W,  70,  984,   70,   60,   40,   50,   30, ...
//! ```
//!
//! date, time, record identifier, status, latitude, longitude, max wind (kt),
//! min pressure (mb), then the 34/50/64 kt radii in NE, SE, SW, NW order.
//! Newer files append a radius of maximum wind, which is ignored here.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};
use thiserror::Error;

use crate::geodesy::GeoPoint;
use crate::observation::REGULAR_FIX_CODE;
use crate::quadrant::{QuadrantRadii, ThresholdSet, MISSING_VALUE};
use crate::track::StormId;

/// Date and time columns joined: "YYYYMMDDHHMM".
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";

/// Columns up to and including the 64 kt NW radius.
pub const FIX_MIN_FIELDS: usize = 20;

/// Name HURDAT2 uses, and that blank names are given.
pub const UNNAMED: &str = "UNNAMED";

#[derive(Debug, Error)]
pub enum HurdatError {
    #[error("Failed to read HURDAT2 data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed storm header on line {line}: {reason}")]
    MalformedHeader { line: u64, reason: String },

    #[error("Malformed fix on line {line}: {reason}")]
    MalformedFix { line: u64, reason: String },

    #[error("Storm {storm} ends after {found} of {expected} fixes")]
    TruncatedTrack {
        storm: String,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, HurdatError>;

/// One fix as recorded, before any derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFix {
    pub timestamp: NaiveDateTime,
    pub code: String,
    pub status: String,
    pub center: GeoPoint,
    pub max_wind: i32,
    pub min_pressure: i32,
    /// Nautical miles; negative values mean missing.
    pub radii: ThresholdSet,
}

/// A storm header and its fixes in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTrack {
    pub storm: StormId,
    pub fixes: Vec<RawFix>,
}

/// Iterates storms in a HURDAT2 stream, one [`RawTrack`] at a time.
pub struct TrackReader<R: Read> {
    records: StringRecordsIntoIter<R>,
}

impl<R: Read> TrackReader<R> {
    pub fn new(reader: R) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader)
            .into_records();
        Self { records }
    }

    fn read_track(&mut self, header: &StringRecord) -> Result<RawTrack> {
        let (storm, expected) = parse_header(header)?;
        let mut fixes = Vec::with_capacity(expected);
        while fixes.len() < expected {
            match self.records.next() {
                Some(record) => fixes.push(parse_fix(&record?)?),
                None => {
                    return Err(HurdatError::TruncatedTrack {
                        storm: storm.to_string(),
                        expected,
                        found: fixes.len(),
                    })
                }
            }
        }
        Ok(RawTrack { storm, fixes })
    }
}

impl TrackReader<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(File::open(path).map_err(csv::Error::from)?))
    }
}

impl<R: Read> Iterator for TrackReader<R> {
    type Item = Result<RawTrack>;

    fn next(&mut self) -> Option<Self::Item> {
        let header = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };
        Some(self.read_track(&header))
    }
}

/// Parse a whole HURDAT2 document held in memory.
pub fn parse_tracks(text: &str) -> Result<Vec<RawTrack>> {
    TrackReader::new(text.as_bytes()).collect()
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn parse_header(record: &StringRecord) -> Result<(StormId, usize)> {
    let line = line_of(record);
    let malformed = |reason: String| HurdatError::MalformedHeader { line, reason };

    let id = record.get(0).unwrap_or("");
    if id.len() != 8 || !id.is_ascii() {
        return Err(malformed(format!("storm id {:?} is not BBNNYYYY", id)));
    }
    let basin = &id[0..2];
    if !basin.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(malformed(format!("basin {:?} is not alphabetic", basin)));
    }
    let cyclone_number = id[2..4]
        .parse::<u8>()
        .map_err(|e| malformed(format!("cyclone number {:?}: {}", &id[2..4], e)))?;
    let season = id[4..8]
        .parse::<i32>()
        .map_err(|e| malformed(format!("season {:?}: {}", &id[4..8], e)))?;

    let name = match record.get(1).unwrap_or("") {
        "" => UNNAMED.to_string(),
        name => name.to_string(),
    };

    let count_field = record.get(2).unwrap_or("");
    let count = count_field
        .parse::<usize>()
        .map_err(|e| malformed(format!("fix count {:?}: {}", count_field, e)))?;

    Ok((
        StormId {
            basin: basin.to_string(),
            cyclone_number,
            season,
            name,
        },
        count,
    ))
}

fn parse_fix(record: &StringRecord) -> Result<RawFix> {
    let line = line_of(record);
    parse_fix_fields(record).map_err(|reason| HurdatError::MalformedFix { line, reason })
}

fn parse_fix_fields(record: &StringRecord) -> std::result::Result<RawFix, String> {
    if record.len() < FIX_MIN_FIELDS {
        return Err(format!(
            "expected at least {} fields, found {}",
            FIX_MIN_FIELDS,
            record.len()
        ));
    }
    let field = |i: usize| record.get(i).unwrap_or("");

    let stamp = format!("{}{}", field(0), field(1));
    let timestamp = NaiveDateTime::parse_from_str(&stamp, TIMESTAMP_FORMAT)
        .map_err(|e| format!("timestamp {:?}: {}", stamp, e))?;

    let code = match field(2) {
        "" => REGULAR_FIX_CODE.to_string(),
        code => code.to_string(),
    };
    let status = field(3).to_string();

    let lat = parse_coordinate(field(4), 'N', 'S', 90.0)?;
    let lon = parse_coordinate(field(5), 'E', 'W', 180.0)?;

    let max_wind = parse_int(field(6), "max wind")?;
    let min_pressure = parse_int(field(7), "min pressure")?;

    let quadrants = |start: usize| -> std::result::Result<QuadrantRadii, String> {
        let mut values = [0i32; 4];
        for (k, value) in values.iter_mut().enumerate() {
            *value = parse_radius(field(start + k))?;
        }
        Ok(QuadrantRadii::from_raw(values))
    };
    let radii = ThresholdSet::new(quadrants(8)?, quadrants(12)?, quadrants(16)?);

    Ok(RawFix {
        timestamp,
        code,
        status,
        center: GeoPoint::new(lon, lat),
        max_wind,
        min_pressure,
        radii,
    })
}

/// `23.1N` to `23.1`, `75.1W` to `-75.1`.
fn parse_coordinate(
    text: &str,
    positive: char,
    negative: char,
    limit: f64,
) -> std::result::Result<f64, String> {
    let hemisphere = text
        .chars()
        .last()
        .ok_or_else(|| "empty coordinate".to_string())?;
    let sign = if hemisphere == positive {
        1.0
    } else if hemisphere == negative {
        -1.0
    } else {
        return Err(format!(
            "coordinate {:?} must end in {} or {}",
            text, positive, negative
        ));
    };
    let magnitude = text[..text.len() - hemisphere.len_utf8()]
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("coordinate {:?}: {}", text, e))?;
    if !magnitude.is_finite() || !(0.0..=limit).contains(&magnitude) {
        return Err(format!("coordinate {:?} is out of range", text));
    }
    Ok(sign * magnitude)
}

fn parse_int(text: &str, what: &str) -> std::result::Result<i32, String> {
    text.parse::<i32>()
        .map_err(|e| format!("{} {:?}: {}", what, text, e))
}

fn parse_radius(text: &str) -> std::result::Result<i32, String> {
    let value = parse_int(text, "radius")?;
    if value < MISSING_VALUE {
        return Err(format!("radius {} is below the missing flag", value));
    }
    Ok(value)
}
