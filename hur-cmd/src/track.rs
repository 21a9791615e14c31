//! GeoJSON export of one stored storm track.
//!
//! Each fix becomes a styled `Point` feature (simplestyle `marker-*`
//! properties keyed to the Saffir-Simpson bands), followed by a single
//! `LineString` through every center.

use anyhow::Context;
use hur_db::models::TrackFix;
use hur_db::Database;
use hur_track::geojson::{Feature, FeatureCollection, Geometry};
use hur_track::observation::REGULAR_FIX_CODE;
use log::info;
use serde_json::{json, Map, Value};

/// Timestamp format of the `ts` feature property.
pub const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Value of the `bearing` property on fixes without one.
pub const NO_BEARING: i32 = -1;

/// Marker colors by minimum max wind (kt), strongest first.
const WIND_COLORS: [(i32, &str); 6] = [
    (157, "#ff605f"),
    (130, "#ff8f20"),
    (111, "#ffc140"),
    (96, "#ffe775"),
    (74, "#ffffcc"),
    (39, "#01faf4"),
];

const CALM_COLOR: &str = "#5ebaff";

pub fn marker_color(max_wind: i32) -> &'static str {
    WIND_COLORS
        .iter()
        .find(|(floor, _)| max_wind >= *floor)
        .map_or(CALM_COLOR, |&(_, color)| color)
}

/// Description of a HURDAT2 record identifier.
pub fn record_info(code: &str) -> Option<&'static str> {
    let info = match code {
        "C" => "Closest approach to a coast, not followed by a landfall",
        "G" => "Genesis",
        "I" => "An intensity peak in terms of both pressure and wind",
        "L" => "Landfall (center of system crossing a coastline)",
        "P" => "Minimum in central pressure",
        "R" => "Provides additional detail on the intensity of the cyclone when rapid changes are underway",
        "S" => "Change of status of the system",
        "T" => "Provides additional detail on the track (position) of the cyclone",
        "W" => "Maximum sustained wind speed",
        _ => return None,
    };
    Some(info)
}

fn fix_properties(n: usize, fix: &TrackFix) -> Map<String, Value> {
    let mut props = Map::new();
    props.insert("n".into(), json!(n));
    props.insert("ts".into(), json!(fix.ts.format(TS_FORMAT).to_string()));
    props.insert(
        "bearing".into(),
        json!(fix.bearing.map_or(NO_BEARING, i32::from)),
    );
    props.insert("windSpeed".into(), json!(fix.max_wind));
    props.insert("pressure".into(), json!(fix.min_pressure));
    props.insert("marker-color".into(), json!(marker_color(fix.max_wind)));
    props.insert("marker-size".into(), json!("small"));

    if fix.code != REGULAR_FIX_CODE {
        props.insert("code".into(), json!(fix.code));
        if let Some(info) = record_info(&fix.code) {
            props.insert("info".into(), json!(info));
        }
        props.insert("marker-symbol".into(), json!("circle"));
    }
    props
}

/// Build the feature collection for a storm's fixes, in the order given.
///
/// With `landfall_rings`, every landfall fix that has an active wind field
/// is followed by a feature holding its `MultiPolygon`.
pub fn track_features(fixes: &[TrackFix], landfall_rings: bool) -> FeatureCollection {
    let mut features = Vec::with_capacity(fixes.len() + 1);
    for (i, fix) in fixes.iter().enumerate() {
        features.push(Feature {
            properties: fix_properties(i + 1, fix),
            geometry: Geometry::Point {
                coordinates: fix.center,
            },
        });
        if landfall_rings && fix.code == "L" {
            if let Some(rings) = fix.wind_rings.multi_polygon() {
                let mut props = Map::new();
                props.insert("n".into(), json!(i + 1));
                let labels = fix.wind_rings.labels();
                props.insert("labels".into(), json!(&labels[1..]));
                features.push(Feature {
                    properties: props,
                    geometry: rings,
                });
            }
        }
    }
    features.push(Feature {
        properties: Map::new(),
        geometry: Geometry::LineString {
            coordinates: fixes.iter().map(|f| f.center).collect(),
        },
    });
    FeatureCollection { features }
}

/// Run the `track` command: export `name`/`year` to a file or stdout.
pub fn run_track(
    name: &str,
    year: i32,
    db_path: &str,
    output: Option<&str>,
    landfall_rings: bool,
) -> anyhow::Result<()> {
    let db = Database::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path))?;
    let fixes = db.query_track(name, year)?;
    if fixes.is_empty() {
        anyhow::bail!("No storm named {} in {}", name.to_uppercase(), year);
    }

    let collection = track_features(&fixes, landfall_rings);
    let json = serde_json::to_string_pretty(&collection)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path))?;
            info!(
                "track: wrote {} features for {} {} to {}",
                collection.features.len(),
                name,
                year,
                path
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}
