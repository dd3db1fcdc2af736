//! A single articulated limb with joint constraints.
//!
//! A [`Limb`] stores its attachment offset in the body frame, its length,
//! and a current/target angle pair. [`Limb::set_target`] records any
//! caller-supplied angle; [`Limb::update`] smooths the current angle toward
//! it and clamps the result into the joint-limit range, so the current
//! angle can never leave `[min, max]` no matter what was requested.
//!
//! Limbs are owned by the [`Skeleton`](super::skeleton::Skeleton)
//! component, keyed by [`LimbId`].

use serde::Serialize;

use crate::math::{self, Vec2};

/// Identifies one of the four legs.
///
/// The diagonal pairs `{FrontLeft, BackRight}` and `{FrontRight, BackLeft}`
/// swing half a walk cycle apart, which is what makes the gait read as
/// walking instead of hopping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LimbId {
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
}

impl LimbId {
    /// All limbs in a fixed order, for deterministic iteration.
    pub const ALL: [LimbId; 4] = [
        LimbId::FrontLeft,
        LimbId::FrontRight,
        LimbId::BackLeft,
        LimbId::BackRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LimbId::FrontLeft => "front_left",
            LimbId::FrontRight => "front_right",
            LimbId::BackLeft => "back_left",
            LimbId::BackRight => "back_right",
        }
    }

    /// True for the limbs on the left side of the body.
    pub fn is_left(self) -> bool {
        matches!(self, LimbId::FrontLeft | LimbId::BackLeft)
    }

    /// Walk-cycle phase offset in radians. One diagonal pair leads, the
    /// other trails by half a cycle.
    pub fn swing_offset(self) -> f32 {
        match self {
            LimbId::FrontLeft | LimbId::BackRight => 0.0,
            LimbId::FrontRight | LimbId::BackLeft => std::f32::consts::PI,
        }
    }
}

/// One leg: attachment offset, length, angles and joint limits.
///
/// Angles are in degrees, relative to the body heading. The limb points
/// along `heading + angle` from its attachment point.
#[derive(Clone, Debug)]
pub struct Limb {
    /// Attachment offset from the body center, in the body frame
    /// (+x forward, +y left-to-right across the body).
    pub offset: Vec2,
    /// Length from attachment to paw. Always > 0.
    pub length: f32,
    /// Current angle in degrees. Always within `[min_angle, max_angle]`.
    pub angle: f32,
    /// Desired angle. May be outside the joint limits; the clamp applies
    /// to the current angle on update.
    pub target_angle: f32,
    /// Inclusive lower joint limit in degrees.
    pub min_angle: f32,
    /// Inclusive upper joint limit in degrees.
    pub max_angle: f32,
    /// Exponential smoothing rate in 1/s.
    pub smoothing: f32,
}

impl Limb {
    /// Create a limb at its neutral (zero) angle.
    ///
    /// Fails if the joint-limit range is inverted, the length is not
    /// positive, the smoothing rate is not positive, or zero lies outside
    /// the joint limits (the neutral pose must be reachable).
    pub fn new(
        offset: Vec2,
        length: f32,
        limits: (f32, f32),
        smoothing: f32,
    ) -> Result<Self, String> {
        let (min_angle, max_angle) = limits;
        if min_angle > max_angle {
            return Err(format!(
                "inverted joint limits: min {} > max {}",
                min_angle, max_angle
            ));
        }
        if length <= 0.0 {
            return Err(format!("limb length must be positive, got {}", length));
        }
        if smoothing <= 0.0 {
            return Err(format!(
                "limb smoothing rate must be positive, got {}",
                smoothing
            ));
        }
        if min_angle > 0.0 || max_angle < 0.0 {
            return Err(format!(
                "joint limits [{}, {}] exclude the neutral angle",
                min_angle, max_angle
            ));
        }
        Ok(Limb {
            offset,
            length,
            angle: 0.0,
            target_angle: 0.0,
            min_angle,
            max_angle,
            smoothing,
        })
    }

    /// Record a desired angle. Any value is accepted; the joint limits are
    /// enforced on the current angle during [`Limb::update`].
    pub fn set_target(&mut self, angle: f32) {
        self.target_angle = angle;
    }

    /// Smooth the current angle toward the target and clamp it into the
    /// joint-limit range.
    pub fn update(&mut self, dt: f32) {
        let next = math::approach(self.angle, self.target_angle, self.smoothing, dt);
        self.angle = next.clamp(self.min_angle, self.max_angle);
    }

    /// World-space attachment point for a body at `body_pos` facing
    /// `heading` degrees.
    pub fn base_point(&self, body_pos: Vec2, heading: f32) -> Vec2 {
        body_pos + self.offset.rotated_deg(heading)
    }

    /// World-space paw position.
    pub fn endpoint(&self, body_pos: Vec2, heading: f32) -> Vec2 {
        let dir = Vec2::from_angle_deg(heading + self.angle);
        self.base_point(body_pos, heading) + dir.scale_by(self.length)
    }

    /// World-space halfway point, for thick-limb rendering.
    pub fn midpoint(&self, body_pos: Vec2, heading: f32) -> Vec2 {
        let base = self.base_point(body_pos, heading);
        let end = self.endpoint(body_pos, heading);
        (base + end).scale_by(0.5)
    }
}
