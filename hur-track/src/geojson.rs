//! The slice of GeoJSON this project reads and writes.

use serde::{Deserialize, Serialize};

use crate::geodesy::GeoPoint;
use crate::ring::Ring;

/// A geometry object. Polygons are always lists of closed [`Ring`]s: the
/// outer boundary first, then an optional hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: GeoPoint },
    LineString { coordinates: Vec<GeoPoint> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
}

/// `GeometryCollection` with a parallel `properties` list naming each member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "GeometryCollection")]
pub struct GeometryCollection {
    pub geometries: Vec<Geometry>,
    pub properties: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub properties: serde_json::Map<String, serde_json::Value>,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}
