//! Head model with periodic idle look-around.
//!
//! The head tracks the body heading plus a small random offset. The offset
//! is re-rolled only when an internal timer elapses, not every frame, so
//! the head holds a glance for a while and then drifts to a new one. The
//! random source is injected by the owning skeleton.

use fastrand::Rng;

use crate::math::{self, Vec2};

/// A single rotational element mounted ahead of the body center.
#[derive(Clone, Debug)]
pub struct Head {
    /// Forward distance from the body center to the head center.
    pub offset: f32,
    /// Current absolute angle in degrees.
    pub angle: f32,
    /// Angle the head is relaxing toward.
    pub target_angle: f32,
    /// Maximum random deviation from the body heading, in degrees.
    pub jitter: f32,
    /// Exponential smoothing rate in 1/s.
    pub smoothing: f32,
    /// Seconds since the target was last re-rolled.
    resample_timer: f32,
    /// Seconds until the next re-roll.
    resample_after: f32,
    /// Bounds for sampling the next re-roll delay.
    interval: (f32, f32),
}

impl Head {
    /// Create a head looking straight along `initial_heading`.
    ///
    /// Fails on a non-positive offset or smoothing rate, a negative
    /// jitter, or an empty/inverted re-sample interval.
    pub fn new(
        offset: f32,
        jitter: f32,
        interval: (f32, f32),
        smoothing: f32,
        initial_heading: f32,
    ) -> Result<Self, String> {
        if offset <= 0.0 {
            return Err(format!("head offset must be positive, got {}", offset));
        }
        if jitter < 0.0 {
            return Err(format!("head jitter must be non-negative, got {}", jitter));
        }
        if interval.0 <= 0.0 || interval.0 > interval.1 {
            return Err(format!(
                "head re-sample interval must satisfy 0 < min <= max, got [{}, {}]",
                interval.0, interval.1
            ));
        }
        if smoothing <= 0.0 {
            return Err(format!(
                "head smoothing rate must be positive, got {}",
                smoothing
            ));
        }
        Ok(Head {
            offset,
            angle: initial_heading,
            target_angle: initial_heading,
            jitter,
            smoothing,
            resample_timer: 0.0,
            // First re-roll after the minimum delay; subsequent delays are
            // drawn from the interval.
            resample_after: interval.0,
            interval,
        })
    }

    /// Advance the look-around timer and relax toward the target.
    ///
    /// `heading` is the current body heading; `rng` is the skeleton's
    /// injected random source.
    pub fn update(&mut self, heading: f32, dt: f32, rng: &mut Rng) {
        self.resample_timer += dt;
        if self.resample_timer >= self.resample_after {
            self.resample_timer = 0.0;
            self.resample_after = sample_range(rng, self.interval.0, self.interval.1);
            let jitter = sample_range(rng, -self.jitter, self.jitter);
            self.target_angle = heading + jitter;
        }
        self.angle = math::approach_deg(self.angle, self.target_angle, self.smoothing, dt);
    }

    /// World-space head center for a body at `body_pos` facing `heading`.
    pub fn position(&self, body_pos: Vec2, heading: f32) -> Vec2 {
        body_pos + Vec2::from_angle_deg(heading).scale_by(self.offset)
    }
}

/// Sample a uniform f32 in `[min, max]`. Collapses to `min` when the range
/// is degenerate.
pub(crate) fn sample_range(rng: &mut Rng, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range < f32::EPSILON {
        return min;
    }
    min + rng.f32() * range
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn test_head() -> Head {
        Head::new(35.0, 10.0, (1.5, 4.0), 4.0, 0.0).unwrap()
    }

    #[test]
    fn test_new_looks_along_heading() {
        let head = Head::new(35.0, 10.0, (1.5, 4.0), 4.0, 45.0).unwrap();
        assert!(approx_eq(head.angle, 45.0));
        assert!(approx_eq(head.target_angle, 45.0));
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert!(Head::new(0.0, 10.0, (1.5, 4.0), 4.0, 0.0).is_err());
        assert!(Head::new(35.0, -1.0, (1.5, 4.0), 4.0, 0.0).is_err());
        assert!(Head::new(35.0, 10.0, (4.0, 1.5), 4.0, 0.0).is_err());
        assert!(Head::new(35.0, 10.0, (0.0, 4.0), 4.0, 0.0).is_err());
        assert!(Head::new(35.0, 10.0, (1.5, 4.0), 0.0, 0.0).is_err());
    }

    #[test]
    fn test_target_not_rerolled_every_frame() {
        let mut head = test_head();
        let mut rng = Rng::with_seed(7);
        // Well inside the first interval: the target must stay put.
        for _ in 0..30 {
            head.update(0.0, 1.0 / 60.0, &mut rng);
            assert!(approx_eq(head.target_angle, 0.0));
        }
    }

    #[test]
    fn test_target_rerolled_after_interval() {
        let mut head = test_head();
        let mut rng = Rng::with_seed(7);
        let mut rerolled = false;
        // 10 simulated seconds cover several re-sample intervals.
        for _ in 0..600 {
            head.update(0.0, 1.0 / 60.0, &mut rng);
            if !approx_eq(head.target_angle, 0.0) {
                rerolled = true;
            }
        }
        assert!(rerolled);
    }

    #[test]
    fn test_target_stays_within_jitter_of_heading() {
        let mut head = Head::new(35.0, 10.0, (1.5, 4.0), 4.0, 30.0).unwrap();
        let mut rng = Rng::with_seed(42);
        for _ in 0..3000 {
            head.update(30.0, 1.0 / 60.0, &mut rng);
            assert!((head.target_angle - 30.0).abs() <= 10.0 + EPSILON);
        }
    }

    #[test]
    fn test_angle_relaxes_toward_target() {
        let mut head = test_head();
        head.target_angle = 20.0;
        let mut rng = Rng::with_seed(1);
        let before = head.angle;
        // One short step, no re-roll yet.
        head.update(0.0, 1.0 / 60.0, &mut rng);
        assert!(head.angle > before);
        assert!(head.angle < 20.0);
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let mut a = test_head();
        let mut b = test_head();
        let mut rng_a = Rng::with_seed(99);
        let mut rng_b = Rng::with_seed(99);
        for _ in 0..600 {
            a.update(0.0, 1.0 / 60.0, &mut rng_a);
            b.update(0.0, 1.0 / 60.0, &mut rng_b);
        }
        assert!(approx_eq(a.angle, b.angle));
        assert!(approx_eq(a.target_angle, b.target_angle));
    }

    #[test]
    fn test_position_is_offset_along_heading() {
        let head = test_head();
        let pos = head.position(Vec2::new(100.0, 100.0), 0.0);
        assert!(approx_eq(pos.x, 135.0));
        assert!(approx_eq(pos.y, 100.0));
        let pos = head.position(Vec2::new(100.0, 100.0), 90.0);
        assert!(approx_eq(pos.x, 100.0));
        assert!(approx_eq(pos.y, 135.0));
    }
}
