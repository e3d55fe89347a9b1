//! Anchor-point rescaling onto the RN-cM scale
//!
//! A submitted genetic map and the calibration table each have three
//! anchors: the map start, the centromere and the map end. Each arm is
//! stretched linearly so the submitted anchors land on the calibration
//! anchors.

use crate::calibration::CalibrationAnchors;
use crate::locus::InputMapSummary;
use serde::{Deserialize, Serialize};

/// Start, centromere and end of one map scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapAnchors {
    pub min: f64,
    pub centromere: f64,
    pub max: f64,
}

impl MapAnchors {
    pub const fn new(min: f64, centromere: f64, max: f64) -> Self {
        Self {
            min,
            centromere,
            max,
        }
    }
}

impl From<&InputMapSummary> for MapAnchors {
    fn from(summary: &InputMapSummary) -> Self {
        Self::new(
            summary.min_coord,
            summary.centromere_coord,
            summary.max_coord,
        )
    }
}

impl From<&CalibrationAnchors> for MapAnchors {
    fn from(anchors: &CalibrationAnchors) -> Self {
        Self::new(
            anchors.min_genetic,
            anchors.centromere_genetic,
            anchors.max_genetic,
        )
    }
}

/// A rescaled position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rescaled {
    /// Position on the RN-cM scale
    pub rn_position: f64,
    /// Position as a fraction of the arm on the submitted map
    pub fraction: f64,
}

/// Two-segment linear transform from a submitted map onto the calibration scale.
///
/// The anchors must be distinct; see [`InputMapSummary::validate_anchors`].
/// With coincident anchors the results are not finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorRescaler {
    input: MapAnchors,
    calibration: MapAnchors,
}

impl AnchorRescaler {
    pub fn new(input: MapAnchors, calibration: MapAnchors) -> Self {
        Self { input, calibration }
    }

    /// Build a rescaler from a map summary and table anchors.
    pub fn from_summary(summary: &InputMapSummary, anchors: &CalibrationAnchors) -> Self {
        Self::new(summary.into(), anchors.into())
    }

    pub fn input(&self) -> MapAnchors {
        self.input
    }

    pub fn calibration(&self) -> MapAnchors {
        self.calibration
    }

    /// Rescale one raw position.
    ///
    /// Positions below the input centromere use the short-arm segment. The
    /// short-arm result is measured from 0, not from the calibration start.
    pub fn rescale(&self, raw: f64) -> Rescaled {
        let input = self.input;
        let cal = self.calibration;

        if raw < input.centromere {
            let span = input.centromere - input.min;
            Rescaled {
                rn_position: (raw - input.min) * (cal.centromere - cal.min) / span,
                fraction: (raw - input.min) / span,
            }
        } else {
            let fraction = (raw - input.centromere) / (input.max - input.centromere);
            Rescaled {
                rn_position: fraction * (cal.max - cal.centromere) + cal.centromere,
                fraction,
            }
        }
    }
}

/// Rescale a raw position given both sets of anchors.
///
/// # Examples
///
/// ```
/// use ferro_m2mc::convert::{rescale, MapAnchors};
///
/// let input = MapAnchors::new(0.0, 50.0, 100.0);
/// let calibration = MapAnchors::new(0.0, 10.0, 100.0);
/// let r = rescale(25.0, input, calibration);
/// assert_eq!(r.rn_position, 5.0);
/// assert_eq!(r.fraction, 0.5);
/// ```
pub fn rescale(raw: f64, input: MapAnchors, calibration: MapAnchors) -> Rescaled {
    AnchorRescaler::new(input, calibration).rescale(raw)
}
