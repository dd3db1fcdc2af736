//! 2D vector and angle helpers shared by the simulation core.
//!
//! The simulation never touches a rendering backend, so it carries its own
//! minimal [`Vec2`] instead of a graphics library type. Angles are stored in
//! degrees throughout the crate; the walk-cycle phase is the one exception
//! and lives in radians (see [`wrap_phase`]).

use serde::Serialize;
use std::ops::{Add, Sub};

/// A 2D vector in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Distance to another point.
    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Unit vector in the same direction. Returns [`Vec2::ZERO`] for the
    /// zero vector, so callers never divide by zero.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len > f32::EPSILON {
            Vec2 {
                x: self.x / len,
                y: self.y / len,
            }
        } else {
            Vec2::ZERO
        }
    }

    pub fn scale_by(self, factor: f32) -> Vec2 {
        Vec2 {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Rotate counter-clockwise by `degrees` around the origin.
    pub fn rotated_deg(self, degrees: f32) -> Vec2 {
        let rad = degrees.to_radians();
        let (sin, cos) = rad.sin_cos();
        Vec2 {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Unit vector pointing along `degrees`.
    pub fn from_angle_deg(degrees: f32) -> Vec2 {
        let rad = degrees.to_radians();
        Vec2 {
            x: rad.cos(),
            y: rad.sin(),
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// Wrap an angle in degrees into `(-180, 180]`.
pub fn normalize_deg(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}

/// Wrap a phase in radians into `[0, 2π)`.
pub fn wrap_phase(phase: f32) -> f32 {
    phase.rem_euclid(std::f32::consts::TAU)
}

/// Fraction of the remaining distance covered in `dt` seconds at `rate`.
///
/// `1 - exp(-rate * dt)` is monotone in `dt` and never exceeds 1, so a
/// smoothed value approaches its target without overshooting no matter how
/// large the step is.
pub fn smoothing_alpha(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

/// Move `current` toward `target` by the exponential smoothing fraction.
pub fn approach(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * smoothing_alpha(rate, dt)
}

/// Like [`approach`], but takes the shortest arc between two angles in
/// degrees, so smoothing never unwinds through a full turn.
pub fn approach_deg(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let diff = normalize_deg(target - current);
    current + diff * smoothing_alpha(rate, dt)
}
