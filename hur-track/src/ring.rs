//! Eight-sided approximation of one threshold's wind extent.
//!
//! Four radii are all the data there is, so the ring is deliberately coarse:
//!
//! ```text
//!              N = avg(NE, NW)
//!         NW .....|..... NE
//!           .     |     .
//!   W ------------+------------ E = avg(NE, SE)
//!           .     |     .
//!         SW .....|..... SE
//!              S = avg(SE, SW)
//! ```
//!
//! Diagonal vertices sit at the quadrant's own radius. The cardinal vertices
//! between them take the average of the two quadrants they separate, which
//! leaves visible corners at the quadrant boundaries instead of pretending
//! to a smoother curve than the record supports.

use serde::{Deserialize, Serialize};

use crate::config::WindFieldConfig;
use crate::geodesy::{destination_point, wrap_longitude, BoundingBox, GeoPoint};
use crate::quadrant::QuadrantRadii;

/// Eight vertices plus the repeated closing vertex.
pub const RING_POINTS: usize = 9;

/// A closed ring: `points()[0] == points()[8]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring([GeoPoint; RING_POINTS]);

impl Ring {
    pub fn points(&self) -> &[GeoPoint; RING_POINTS] {
        &self.0
    }

    pub fn is_closed(&self) -> bool {
        self.0[0] == self.0[RING_POINTS - 1]
    }

    /// Extent of the ring. A ring straddling the antimeridian gets a
    /// wrapped box (`min_lon > max_lon`) instead of one spanning the globe.
    pub fn bounding_box(&self) -> BoundingBox {
        let bbox = self.0[1..]
            .iter()
            .fold(BoundingBox::point(self.0[0]), |acc, p| acc.including(*p));
        if bbox.max_lon - bbox.min_lon <= 180.0 {
            return bbox;
        }
        let shifted = |p: &GeoPoint| {
            let lon = if p.lon < 0.0 { p.lon + 360.0 } else { p.lon };
            GeoPoint::new(lon, p.lat)
        };
        let east = self.0[1..]
            .iter()
            .fold(BoundingBox::point(shifted(&self.0[0])), |acc, p| {
                acc.including(shifted(p))
            });
        BoundingBox {
            min_lon: wrap_longitude(east.min_lon),
            max_lon: wrap_longitude(east.max_lon),
            ..east
        }
    }
}

/// Project the eight compass vertices of `radii` (kilometers) around `center`.
pub fn build_ring(center: GeoPoint, radii: &QuadrantRadii, config: &WindFieldConfig) -> Ring {
    let north = (radii.ne + radii.nw) / 2.0;
    let east = (radii.ne + radii.se) / 2.0;
    let south = (radii.se + radii.sw) / 2.0;
    let west = (radii.sw + radii.nw) / 2.0;

    let diagonal = |own: f64, a: f64, b: f64| {
        if own > 0.0 {
            own
        } else {
            (a + b) / config.fudge_divisor
        }
    };

    let vertices = [
        (0.0, north),
        (45.0, diagonal(radii.ne, north, east)),
        (90.0, east),
        (135.0, diagonal(radii.se, east, south)),
        (180.0, south),
        (225.0, diagonal(radii.sw, south, west)),
        (270.0, west),
        (315.0, diagonal(radii.nw, west, north)),
        (0.0, north),
    ];

    Ring(vertices.map(|(bearing, distance)| destination_point(center, distance, bearing)))
}
