//! Per-quadrant wind radii and the grooming pass that makes them renderable.
//!
//! HURDAT2 reports "no coverage" either as a true zero or as the `-999`
//! missing flag, and an active threshold may still leave a quadrant at zero.
//! Grooming folds both cases into one shape: an inactive threshold is four
//! zeros, an active one is four strictly positive kilometer values, and each
//! threshold's ring sits at least a margin outside the next one in.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::config::{WindFieldConfig, NM_TO_KM};

/// Sentinel HURDAT2 uses for a missing value.
pub const MISSING_VALUE: i32 = -999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    NE,
    SE,
    SW,
    NW,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::NE, Quadrant::SE, Quadrant::SW, Quadrant::NW];
}

/// Radial extent of one wind threshold in each quadrant.
///
/// Raw values are nautical miles straight from the record; groomed values
/// of an active threshold are kilometers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct QuadrantRadii {
    pub ne: f64,
    pub se: f64,
    pub sw: f64,
    pub nw: f64,
}

impl QuadrantRadii {
    pub const fn new(ne: f64, se: f64, sw: f64, nw: f64) -> Self {
        Self { ne, se, sw, nw }
    }

    /// Build from the four signed integers of a record, in NE, SE, SW, NW order.
    pub fn from_raw([ne, se, sw, nw]: [i32; 4]) -> Self {
        Self::new(ne.into(), se.into(), sw.into(), nw.into())
    }

    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.ne), f(self.se), f(self.sw), f(self.nw))
    }

    pub fn values(&self) -> [f64; 4] {
        [self.ne, self.se, self.sw, self.nw]
    }

    pub fn is_zero(&self) -> bool {
        self.values().iter().all(|v| *v == 0.0)
    }
}

impl Index<Quadrant> for QuadrantRadii {
    type Output = f64;

    fn index(&self, quadrant: Quadrant) -> &f64 {
        match quadrant {
            Quadrant::NE => &self.ne,
            Quadrant::SE => &self.se,
            Quadrant::SW => &self.sw,
            Quadrant::NW => &self.nw,
        }
    }
}

impl IndexMut<Quadrant> for QuadrantRadii {
    fn index_mut(&mut self, quadrant: Quadrant) -> &mut f64 {
        match quadrant {
            Quadrant::NE => &mut self.ne,
            Quadrant::SE => &mut self.se,
            Quadrant::SW => &mut self.sw,
            Quadrant::NW => &mut self.nw,
        }
    }
}

/// Wind-speed level at which radii are reported. Ordered weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Threshold {
    Kt34,
    Kt50,
    Kt64,
}

impl Threshold {
    /// Innermost (strongest) threshold first.
    pub const DESCENDING: [Threshold; 3] = [Threshold::Kt64, Threshold::Kt50, Threshold::Kt34];

    pub fn knots(self) -> u8 {
        match self {
            Threshold::Kt34 => 34,
            Threshold::Kt50 => 50,
            Threshold::Kt64 => 64,
        }
    }

    /// Name used in the geometry label list.
    pub fn label(self) -> &'static str {
        match self {
            Threshold::Kt34 => "34knot winds",
            Threshold::Kt50 => "50knot winds",
            Threshold::Kt64 => "64knot winds",
        }
    }

    pub fn from_knots(knots: u8) -> Option<Self> {
        match knots {
            34 => Some(Threshold::Kt34),
            50 => Some(Threshold::Kt50),
            64 => Some(Threshold::Kt64),
            _ => None,
        }
    }
}

/// The three radius sets reported with every fix.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThresholdSet {
    #[serde(rename = "R34")]
    pub r34: QuadrantRadii,
    #[serde(rename = "R50")]
    pub r50: QuadrantRadii,
    #[serde(rename = "R64")]
    pub r64: QuadrantRadii,
}

impl ThresholdSet {
    pub fn new(r34: QuadrantRadii, r50: QuadrantRadii, r64: QuadrantRadii) -> Self {
        Self { r34, r50, r64 }
    }

    pub fn map(self, f: impl Fn(QuadrantRadii) -> QuadrantRadii) -> Self {
        Self::new(f(self.r34), f(self.r50), f(self.r64))
    }
}

impl Index<Threshold> for ThresholdSet {
    type Output = QuadrantRadii;

    fn index(&self, threshold: Threshold) -> &QuadrantRadii {
        match threshold {
            Threshold::Kt34 => &self.r34,
            Threshold::Kt50 => &self.r50,
            Threshold::Kt64 => &self.r64,
        }
    }
}

impl IndexMut<Threshold> for ThresholdSet {
    fn index_mut(&mut self, threshold: Threshold) -> &mut QuadrantRadii {
        match threshold {
            Threshold::Kt34 => &mut self.r34,
            Threshold::Kt50 => &mut self.r50,
            Threshold::Kt64 => &mut self.r64,
        }
    }
}

/// Normalize one raw radius set.
///
/// Returns whether the threshold is active and the groomed radii. Negative
/// values (the missing flag included) count as zero. An inactive set comes
/// back as unconverted zeros; an active set has its zero quadrants raised to
/// the configured floor and every value converted to kilometers.
pub fn groom(radii: &QuadrantRadii, config: &WindFieldConfig) -> (bool, QuadrantRadii) {
    let clamped = radii.map(|v| if v > 0.0 { v } else { 0.0 });
    let active = clamped.values().iter().any(|v| *v > 0.0);
    if !active {
        return (false, clamped);
    }
    let groomed = clamped.map(|v| {
        let nm = if v > 0.0 { v } else { config.zero_quadrant_floor_nm };
        nm * NM_TO_KM
    });
    (true, groomed)
}

/// Push `outer` out so each quadrant clears `inner` by at least `margin_km`.
pub fn enforce_containment(outer: &mut QuadrantRadii, inner: &QuadrantRadii, margin_km: f64) {
    for q in Quadrant::ALL {
        if outer[q] - inner[q] < margin_km {
            outer[q] = inner[q] + margin_km;
        }
    }
}

/// Outcome of grooming all three thresholds of one fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroomedThresholds {
    /// Strongest threshold with any coverage, `None` when all three are silent.
    pub highest: Option<Threshold>,
    pub radii: ThresholdSet,
}

impl GroomedThresholds {
    /// Highest active threshold in knots, 0 when none is active.
    pub fn highest_knots(&self) -> u8 {
        self.highest.map_or(0, Threshold::knots)
    }
}

/// Classify the strongest active threshold and groom the ladder below it.
///
/// Thresholds above the strongest active one are silent, so grooming them
/// only clamps them to zero. Containment then runs as a fold from the
/// highest active threshold outward, each step widening the next ring
/// against the already settled one inside it.
pub fn classify_and_groom(raw: &ThresholdSet, config: &WindFieldConfig) -> GroomedThresholds {
    let mut radii = *raw;
    let mut highest = None;
    for threshold in Threshold::DESCENDING {
        let (active, groomed) = groom(&raw[threshold], config);
        radii[threshold] = groomed;
        if active && highest.is_none() {
            highest = Some(threshold);
        }
    }

    Threshold::DESCENDING
        .into_iter()
        .skip_while(|t| Some(*t) != highest)
        .fold(None::<QuadrantRadii>, |inner, threshold| {
            let outer = &mut radii[threshold];
            if let Some(inner) = inner {
                enforce_containment(outer, &inner, config.containment_margin_km);
            }
            Some(*outer)
        });

    GroomedThresholds { highest, radii }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WindFieldConfig {
        WindFieldConfig::default()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn silent_radii_stay_inactive_zero() {
        for raw in [[0, 0, 0, 0], [-999, -999, -999, -999], [0, -999, 0, -5]] {
            let (active, groomed) = groom(&QuadrantRadii::from_raw(raw), &config());
            assert!(!active, "{:?} should be inactive", raw);
            assert!(groomed.is_zero(), "{:?} groomed to {:?}", raw, groomed);
        }
    }

    #[test]
    fn active_radii_are_floored_and_converted() {
        let (active, groomed) = groom(&QuadrantRadii::from_raw([30, 0, -999, 10]), &config());
        assert!(active);
        assert!(close(groomed.ne, 30.0 * NM_TO_KM));
        assert!(close(groomed.se, 0.5 * NM_TO_KM));
        assert!(close(groomed.sw, 0.5 * NM_TO_KM));
        assert!(close(groomed.nw, 10.0 * NM_TO_KM));
        assert!(groomed.values().iter().all(|v| *v > 0.0));
    }

    #[test]
    fn missing_flag_after_first_active_quadrant_is_clamped() {
        let (_, groomed) = groom(&QuadrantRadii::from_raw([40, -999, -999, -999]), &config());
        assert!(groomed.values().iter().all(|v| *v > 0.0));
    }

    #[test]
    fn floor_is_configurable() {
        let config = WindFieldConfig {
            zero_quadrant_floor_nm: 2.0,
            ..WindFieldConfig::default()
        };
        let (_, groomed) = groom(&QuadrantRadii::from_raw([10, 0, 0, 0]), &config);
        assert!(close(groomed.sw, 2.0 * NM_TO_KM));
    }

    #[test]
    fn containment_pushes_outer_past_inner() {
        let inner = QuadrantRadii::new(10.0, 10.0, 10.0, 10.0);
        let mut outer = QuadrantRadii::new(30.0, 10.2, 5.0, 10.5);
        enforce_containment(&mut outer, &inner, 0.5);
        assert_eq!(outer.ne, 30.0);
        assert_eq!(outer.se, 10.5);
        assert_eq!(outer.sw, 10.5);
        assert_eq!(outer.nw, 10.5);
    }

    #[test]
    fn nothing_active_classifies_as_zero() {
        let raw = ThresholdSet::default();
        let groomed = classify_and_groom(&raw, &config());
        assert_eq!(groomed.highest, None);
        assert_eq!(groomed.highest_knots(), 0);
        assert!(groomed.radii.r34.is_zero());
    }

    #[test]
    fn only_34_active() {
        let raw = ThresholdSet::new(
            QuadrantRadii::from_raw([30, 30, 30, 30]),
            QuadrantRadii::default(),
            QuadrantRadii::from_raw([-999, -999, -999, -999]),
        );
        let groomed = classify_and_groom(&raw, &config());
        assert_eq!(groomed.highest, Some(Threshold::Kt34));
        assert!(close(groomed.radii.r34.ne, 55.56));
        assert!(groomed.radii.r50.is_zero());
        assert!(groomed.radii.r64.is_zero());
    }

    #[test]
    fn highest_64_floors_and_nests_all_thresholds() {
        let raw = ThresholdSet::new(
            QuadrantRadii::from_raw([60, 50, 40, 0]),
            QuadrantRadii::from_raw([40, 30, 0, 0]),
            QuadrantRadii::from_raw([20, 0, 0, 0]),
        );
        let config = config();
        let groomed = classify_and_groom(&raw, &config);
        assert_eq!(groomed.highest, Some(Threshold::Kt64));

        let r = groomed.radii;
        // r64 silent quadrants are floored before conversion.
        assert!(close(r.r64.se, 0.5 * NM_TO_KM));
        // r50 SW was floored to the same value as r64 SW, so it is pushed out.
        assert!(close(r.r50.sw, 0.5 * NM_TO_KM + config.containment_margin_km));
        // r34 NW follows the pushed r50 NW.
        assert!(close(r.r34.nw, r.r50.nw + config.containment_margin_km));
        // Untouched quadrants keep their converted values.
        assert!(close(r.r34.ne, 60.0 * NM_TO_KM));

        for q in Quadrant::ALL {
            assert!(r.r50[q] - r.r64[q] >= config.containment_margin_km - 1e-9);
            assert!(r.r34[q] - r.r50[q] >= config.containment_margin_km - 1e-9);
        }
    }

    #[test]
    fn silent_50_under_active_64_is_rebuilt_from_containment() {
        let raw = ThresholdSet::new(
            QuadrantRadii::from_raw([50, 50, 50, 50]),
            QuadrantRadii::default(),
            QuadrantRadii::from_raw([10, 10, 10, 10]),
        );
        let groomed = classify_and_groom(&raw, &config());
        assert_eq!(groomed.highest, Some(Threshold::Kt64));
        for q in Quadrant::ALL {
            assert!(close(groomed.radii.r50[q], 10.0 * NM_TO_KM + 0.5));
        }
    }

    #[test]
    fn highest_50_ignores_silent_64() {
        let raw = ThresholdSet::new(
            QuadrantRadii::from_raw([20, 20, 20, 20]),
            QuadrantRadii::from_raw([25, 0, 0, 0]),
            QuadrantRadii::from_raw([-999, 0, 0, 0]),
        );
        let groomed = classify_and_groom(&raw, &config());
        assert_eq!(groomed.highest_knots(), 50);
        assert!(groomed.radii.r64.is_zero());
        // 34 NE (37.04 km) sits inside 50 NE (46.3 km) and must be pushed out.
        assert!(close(groomed.radii.r34.ne, 25.0 * NM_TO_KM + 0.5));
    }

    #[test]
    fn wider_margin_is_honoured() {
        let config = WindFieldConfig {
            containment_margin_km: 10.0,
            ..WindFieldConfig::default()
        };
        let raw = ThresholdSet::new(
            QuadrantRadii::from_raw([30, 30, 30, 30]),
            QuadrantRadii::from_raw([28, 28, 28, 28]),
            QuadrantRadii::default(),
        );
        let groomed = classify_and_groom(&raw, &config);
        for q in Quadrant::ALL {
            assert!(close(groomed.radii.r34[q], 28.0 * NM_TO_KM + 10.0));
        }
    }

    #[test]
    fn threshold_knots_round_trip() {
        for t in Threshold::DESCENDING {
            assert_eq!(Threshold::from_knots(t.knots()), Some(t));
        }
        assert_eq!(Threshold::from_knots(0), None);
    }

    #[test]
    fn radii_serialize_with_compass_keys() {
        let json = serde_json::to_value(QuadrantRadii::from_raw([1, 2, 3, 4])).unwrap();
        assert_eq!(json["NE"], 1.0);
        assert_eq!(json["NW"], 4.0);
    }
}
