use serde::{Deserialize, Serialize};

use trackkit_core::constants::{
    DEFAULT_ARC_ANGLE, DEFAULT_ARC_RADIUS, DEFAULT_STRAIGHT_LENGTH,
};

use super::TurnDirection;

/// A segment as requested by a caller, before any geometry is derived.
///
/// This is the interchange format of segment scripts and generated track
/// parameters: `{"type": "straight", "length": 120}` or
/// `{"type": "curve", "direction": "left", "angle": 90, "radius": 40}`.
/// Fields omitted on input take [`SegmentDefaults::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", from = "SegmentDraft")]
pub enum SegmentRequest {
    Straight {
        length: f64,
    },
    Curve {
        direction: TurnDirection,
        angle: f64,
        radius: f64,
    },
}

impl SegmentRequest {
    pub fn straight(length: f64) -> Self {
        SegmentRequest::Straight { length }
    }

    pub fn curve(direction: TurnDirection, angle: f64, radius: f64) -> Self {
        SegmentRequest::Curve {
            direction,
            angle,
            radius,
        }
    }

    pub fn is_straight(&self) -> bool {
        matches!(self, SegmentRequest::Straight { .. })
    }
}

/// Values filled into a [`SegmentDraft`] for the fields it leaves out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentDefaults {
    pub straight_length: f64,
    pub arc_angle: f64,
    pub arc_radius: f64,
    pub direction: TurnDirection,
}

impl Default for SegmentDefaults {
    fn default() -> Self {
        Self {
            straight_length: DEFAULT_STRAIGHT_LENGTH,
            arc_angle: DEFAULT_ARC_ANGLE,
            arc_radius: DEFAULT_ARC_RADIUS,
            direction: TurnDirection::default(),
        }
    }
}

/// A segment request as written in a script, where any field may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SegmentDraft {
    Straight {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length: Option<f64>,
    },
    Curve {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        direction: Option<TurnDirection>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        angle: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        radius: Option<f64>,
    },
}

impl SegmentDraft {
    /// Completes the draft, taking omitted fields from `defaults`.
    pub fn resolve(&self, defaults: &SegmentDefaults) -> SegmentRequest {
        match *self {
            SegmentDraft::Straight { length } => {
                SegmentRequest::straight(length.unwrap_or(defaults.straight_length))
            }
            SegmentDraft::Curve {
                direction,
                angle,
                radius,
            } => SegmentRequest::curve(
                direction.unwrap_or(defaults.direction),
                angle.unwrap_or(defaults.arc_angle),
                radius.unwrap_or(defaults.arc_radius),
            ),
        }
    }
}

impl From<SegmentDraft> for SegmentRequest {
    fn from(draft: SegmentDraft) -> Self {
        draft.resolve(&SegmentDefaults::default())
    }
}

impl From<SegmentRequest> for SegmentDraft {
    fn from(request: SegmentRequest) -> Self {
        match request {
            SegmentRequest::Straight { length } => SegmentDraft::Straight {
                length: Some(length),
            },
            SegmentRequest::Curve {
                direction,
                angle,
                radius,
            } => SegmentDraft::Curve {
                direction: Some(direction),
                angle: Some(angle),
                radius: Some(radius),
            },
        }
    }
}
