//! Immutable pose snapshot consumed by renderers.
//!
//! A [`PoseSnapshot`] is a point-in-time copy of every drawable part of a
//! skeleton: absolute positions and final angles, with no references into
//! live simulation state. It is produced by
//! [`snapshot`](crate::systems::snapshot::snapshot), freely clonable and
//! comparable, and serializes to JSON for out-of-process renderers.

use serde::Serialize;

use crate::components::limb::LimbId;
use crate::components::skeleton::LocomotionState;
use crate::math::Vec2;

/// Body outline reference: center position, dimensions and heading.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BodyPose {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    /// Heading in degrees; 0 points along +x, angles increase toward +y.
    pub heading: f32,
}

/// One limb, fully resolved into world space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LimbPose {
    pub id: LimbId,
    /// Attachment point on the body.
    pub base: Vec2,
    /// Halfway point along the limb, for thick-limb rendering.
    pub mid: Vec2,
    /// Paw position.
    pub end: Vec2,
    /// Absolute limb angle in degrees.
    pub angle: f32,
}

/// One tail segment as a world-space line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TailSegmentPose {
    pub start: Vec2,
    pub end: Vec2,
    /// Absolute segment angle in degrees.
    pub angle: f32,
}

/// Head position and orientation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HeadPose {
    pub position: Vec2,
    /// Absolute head angle in degrees.
    pub angle: f32,
}

/// Everything a renderer needs to draw one skeleton, with zero further
/// computation. Equal snapshots compare equal, so repeated captures of an
/// unchanged skeleton are indistinguishable.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PoseSnapshot {
    pub body: BodyPose,
    pub head: HeadPose,
    pub limbs: Vec<LimbPose>,
    pub tail: Vec<TailSegmentPose>,
    pub state: LocomotionState,
    /// True while the eyes should be drawn closed.
    pub blink: bool,
    /// True while the ears should be drawn displaced.
    pub ear_twitch: bool,
}
