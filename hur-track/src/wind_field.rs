//! Nested wind-field geometry for one fix.
//!
//! The assembled geometry is a point plus, when any threshold is active, one
//! multi-polygon whose parts run from the innermost ring outward:
//!
//! | highest | parts                               |
//! |---------|-------------------------------------|
//! | none    | (center only)                       |
//! | 34      | `[r34]`                             |
//! | 50      | `[r50]`, `[r34, r50]`               |
//! | 64      | `[r64]`, `[r50, r64]`, `[r34, r50]` |
//!
//! Every part after the first is an annulus: the threshold's ring with the
//! next stronger ring as its hole. Containment during grooming keeps each
//! hole strictly inside its outer ring.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::WindFieldConfig;
use crate::geodesy::{BoundingBox, GeoPoint};
use crate::geojson::{Geometry, GeometryCollection};
use crate::quadrant::{classify_and_groom, Threshold, ThresholdSet};
use crate::ring::{build_ring, Ring};

/// Label of the center point in the part label list.
pub const CENTER_LABEL: &str = "center";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "GeometryCollection", try_from = "GeometryCollection")]
pub enum WindFieldGeometry {
    /// No threshold reported.
    CenterOnly { center: GeoPoint },
    /// 34 kt only.
    GaleForce { center: GeoPoint, r34: Ring },
    /// 34 and 50 kt.
    StormForce { center: GeoPoint, r50: Ring, r34: Ring },
    /// All three thresholds.
    HurricaneForce {
        center: GeoPoint,
        r64: Ring,
        r50: Ring,
        r34: Ring,
    },
}

impl WindFieldGeometry {
    pub fn center(&self) -> GeoPoint {
        match self {
            Self::CenterOnly { center }
            | Self::GaleForce { center, .. }
            | Self::StormForce { center, .. }
            | Self::HurricaneForce { center, .. } => *center,
        }
    }

    pub fn highest_active(&self) -> Option<Threshold> {
        match self {
            Self::CenterOnly { .. } => None,
            Self::GaleForce { .. } => Some(Threshold::Kt34),
            Self::StormForce { .. } => Some(Threshold::Kt50),
            Self::HurricaneForce { .. } => Some(Threshold::Kt64),
        }
    }

    /// Active rings, innermost (strongest threshold) first.
    pub fn rings(&self) -> Vec<(Threshold, Ring)> {
        match self {
            Self::CenterOnly { .. } => vec![],
            Self::GaleForce { r34, .. } => vec![(Threshold::Kt34, *r34)],
            Self::StormForce { r50, r34, .. } => {
                vec![(Threshold::Kt50, *r50), (Threshold::Kt34, *r34)]
            }
            Self::HurricaneForce { r64, r50, r34, .. } => vec![
                (Threshold::Kt64, *r64),
                (Threshold::Kt50, *r50),
                (Threshold::Kt34, *r34),
            ],
        }
    }

    /// Multi-polygon parts: the innermost disc, then one annulus per ring out.
    pub fn parts(&self) -> Vec<Vec<Ring>> {
        let rings = self.rings();
        rings
            .iter()
            .enumerate()
            .map(|(i, (_, ring))| match i.checked_sub(1) {
                Some(hole) => vec![*ring, rings[hole].1],
                None => vec![*ring],
            })
            .collect()
    }

    /// Labels aligned with `center` followed by each part.
    pub fn labels(&self) -> Vec<&'static str> {
        std::iter::once(CENTER_LABEL)
            .chain(self.rings().iter().map(|(t, _)| t.label()))
            .collect()
    }

    /// Outermost ring, the 34 kt extent when anything is active.
    pub fn outer_ring(&self) -> Option<Ring> {
        self.rings().last().map(|(_, ring)| *ring)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.outer_ring().map(|ring| ring.bounding_box())
    }

    /// The multi-polygon member on its own, if there is one.
    pub fn multi_polygon(&self) -> Option<Geometry> {
        let parts = self.parts();
        if parts.is_empty() {
            None
        } else {
            Some(Geometry::MultiPolygon { coordinates: parts })
        }
    }
}

/// Groom the three radius sets of a fix and build its nested rings.
pub fn assemble(center: GeoPoint, radii: &ThresholdSet, config: &WindFieldConfig) -> WindFieldGeometry {
    let groomed = classify_and_groom(radii, config);
    let ring = |threshold: Threshold| build_ring(center, &groomed.radii[threshold], config);

    match groomed.highest {
        None => WindFieldGeometry::CenterOnly { center },
        Some(Threshold::Kt34) => WindFieldGeometry::GaleForce {
            center,
            r34: ring(Threshold::Kt34),
        },
        Some(Threshold::Kt50) => WindFieldGeometry::StormForce {
            center,
            r50: ring(Threshold::Kt50),
            r34: ring(Threshold::Kt34),
        },
        Some(Threshold::Kt64) => WindFieldGeometry::HurricaneForce {
            center,
            r64: ring(Threshold::Kt64),
            r50: ring(Threshold::Kt50),
            r34: ring(Threshold::Kt34),
        },
    }
}

impl From<WindFieldGeometry> for GeometryCollection {
    fn from(field: WindFieldGeometry) -> Self {
        let mut geometries = vec![Geometry::Point {
            coordinates: field.center(),
        }];
        geometries.extend(field.multi_polygon());
        GeometryCollection {
            geometries,
            properties: field.labels().into_iter().map(String::from).collect(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("wind field must start with a center point")]
    MissingCenter,

    #[error("wind field has {0} parts, expected 1 to 3")]
    PartCount(usize),

    #[error("wind field part {0} has no rings")]
    EmptyPart(usize),

    #[error("unexpected geometry member in wind field")]
    UnexpectedGeometry,
}

impl TryFrom<GeometryCollection> for WindFieldGeometry {
    type Error = GeometryError;

    fn try_from(collection: GeometryCollection) -> Result<Self, Self::Error> {
        let mut geometries = collection.geometries.into_iter();
        let center = match geometries.next() {
            Some(Geometry::Point { coordinates }) => coordinates,
            _ => return Err(GeometryError::MissingCenter),
        };
        let parts = match (geometries.next(), geometries.next()) {
            (None, _) => return Ok(Self::CenterOnly { center }),
            (Some(Geometry::MultiPolygon { coordinates }), None) => coordinates,
            _ => return Err(GeometryError::UnexpectedGeometry),
        };

        let outers = parts
            .iter()
            .enumerate()
            .map(|(i, part)| part.first().copied().ok_or(GeometryError::EmptyPart(i)))
            .collect::<Result<Vec<Ring>, _>>()?;

        match outers.as_slice() {
            [r34] => Ok(Self::GaleForce { center, r34: *r34 }),
            [r50, r34] => Ok(Self::StormForce {
                center,
                r50: *r50,
                r34: *r34,
            }),
            [r64, r50, r34] => Ok(Self::HurricaneForce {
                center,
                r64: *r64,
                r50: *r50,
                r34: *r34,
            }),
            other => Err(GeometryError::PartCount(other.len())),
        }
    }
}
