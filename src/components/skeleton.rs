//! The skeleton: body state, locomotion state machine and owned sub-models.
//!
//! A [`Skeleton`] exclusively owns its four [`Limb`]s, its [`TailChain`]
//! and its [`Head`] (composition, never shared references). It carries the
//! locomotion state machine, the walk-cycle phase, the wander/blink/
//! ear-twitch timers and the injected random source. All of it is advanced
//! by [`step`](crate::systems::locomotion::step); rendering reads it only
//! through [`snapshot`](crate::systems::snapshot::snapshot).

use bevy_ecs::prelude::Component;
use fastrand::Rng;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::components::head::{Head, sample_range};
use crate::components::limb::{Limb, LimbId};
use crate::components::tail::{TailChain, TailParams};
use crate::math::Vec2;

/// Locomotion state machine.
///
/// `Seeking` while a target is set and farther than the arrival epsilon.
/// `Arrived` for exactly one step when the target is reached, then the
/// machine collapses back to `Idle`, where the wander timer runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum LocomotionState {
    #[default]
    Idle,
    Seeking,
    Arrived,
}

/// Construction-time configuration for a [`Skeleton`].
///
/// All tuning lives here so independently-configured skeletons can coexist;
/// nothing is read from module-level state. Validation is fail-fast: a
/// skeleton cannot be built from an invalid configuration.
#[derive(Clone, Copy, Debug)]
pub struct SkeletonConfig {
    /// Starting position.
    pub position: Vec2,
    /// Starting heading in degrees.
    pub heading: f32,
    /// Body ellipse width (along the heading).
    pub body_width: f32,
    /// Body ellipse height (across the heading).
    pub body_height: f32,

    /// Forward distance from the body center to the front/back limb roots.
    pub limb_forward_offset: f32,
    /// Sideways distance from the body center to the limb roots.
    pub limb_side_offset: f32,
    /// Limb length.
    pub limb_length: f32,
    /// Joint limits applied to every limb, in degrees.
    pub limb_limits: (f32, f32),
    /// Limb smoothing rate in 1/s.
    pub limb_smoothing: f32,
    /// Peak walk-cycle swing in degrees, reached at cruise speed.
    pub swing_amplitude: f32,
    /// Idle sway amplitude in degrees.
    pub idle_sway_amplitude: f32,
    /// Idle sway frequency in radians per second.
    pub idle_sway_frequency: f32,

    /// Cruise speed in world units per second.
    pub speed: f32,
    /// Upper bound the cruise speed must respect.
    pub max_speed: f32,
    /// Walk-cycle phase advance per world unit traveled, in radians.
    pub walk_cycle_coefficient: f32,
    /// Heading smoothing rate in 1/s.
    pub turn_rate: f32,
    /// Distance at which a target counts as reached.
    pub arrival_epsilon: f32,

    /// Tail chain parameters.
    pub tail: TailParams,

    /// Forward distance from the body center to the head center.
    pub head_offset: f32,
    /// Maximum random head deviation from the heading, in degrees.
    pub head_jitter: f32,
    /// Bounds for the head's look-around re-sample delay, in seconds.
    pub head_interval: (f32, f32),
    /// Head smoothing rate in 1/s.
    pub head_smoothing: f32,

    /// Bounds for the idle-wander delay, in seconds.
    pub wander_interval: (f32, f32),
    /// Half-extent of the square around the current position that wander
    /// targets are drawn from.
    pub wander_radius: f32,

    /// Bounds for the delay between blinks, in seconds.
    pub blink_interval: (f32, f32),
    /// How long the eyes stay closed.
    pub blink_duration: f32,
    /// Bounds for the delay between ear twitches, in seconds.
    pub twitch_interval: (f32, f32),
    /// How long a twitch lasts.
    pub twitch_duration: f32,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        SkeletonConfig {
            position: Vec2::ZERO,
            heading: 0.0,
            body_width: 60.0,
            body_height: 40.0,
            limb_forward_offset: 18.0,
            limb_side_offset: 14.0,
            limb_length: 25.0,
            limb_limits: (-30.0, 30.0),
            limb_smoothing: 10.0,
            swing_amplitude: 20.0,
            idle_sway_amplitude: 5.0,
            idle_sway_frequency: 0.5,
            speed: 80.0,
            max_speed: 240.0,
            walk_cycle_coefficient: 0.1,
            turn_rate: 6.0,
            arrival_epsilon: 5.0,
            tail: TailParams::default(),
            head_offset: 35.0,
            head_jitter: 10.0,
            head_interval: (1.5, 4.0),
            head_smoothing: 4.0,
            wander_interval: (3.0, 8.0),
            wander_radius: 120.0,
            blink_interval: (2.0, 6.0),
            blink_duration: 0.12,
            twitch_interval: (4.0, 9.0),
            twitch_duration: 0.08,
        }
    }
}

fn check_interval(name: &str, interval: (f32, f32)) -> Result<(), String> {
    if interval.0 <= 0.0 || interval.0 > interval.1 {
        return Err(format!(
            "{} interval must satisfy 0 < min <= max, got [{}, {}]",
            name, interval.0, interval.1
        ));
    }
    Ok(())
}

impl SkeletonConfig {
    /// Check everything that is not already validated by the sub-model
    /// constructors. Called by [`Skeleton::new`].
    pub fn validate(&self) -> Result<(), String> {
        if !(self.position.x.is_finite() && self.position.y.is_finite()) {
            return Err("starting position must be finite".to_string());
        }
        if self.body_width <= 0.0 || self.body_height <= 0.0 {
            return Err(format!(
                "body dimensions must be positive, got {}x{}",
                self.body_width, self.body_height
            ));
        }
        if self.limb_forward_offset < 0.0 || self.limb_side_offset < 0.0 {
            return Err("limb offsets must be non-negative".to_string());
        }
        if self.speed < 0.0 {
            return Err(format!("speed must be non-negative, got {}", self.speed));
        }
        if self.max_speed <= 0.0 {
            return Err(format!(
                "max speed must be positive, got {}",
                self.max_speed
            ));
        }
        if self.speed > self.max_speed {
            return Err(format!(
                "speed {} exceeds max speed {}",
                self.speed, self.max_speed
            ));
        }
        if self.walk_cycle_coefficient <= 0.0 {
            return Err("walk cycle coefficient must be positive".to_string());
        }
        if self.turn_rate <= 0.0 {
            return Err("turn rate must be positive".to_string());
        }
        if self.arrival_epsilon <= 0.0 {
            return Err("arrival epsilon must be positive".to_string());
        }
        if self.swing_amplitude < 0.0 || self.idle_sway_amplitude < 0.0 {
            return Err("swing amplitudes must be non-negative".to_string());
        }
        if self.idle_sway_frequency <= 0.0 {
            return Err("idle sway frequency must be positive".to_string());
        }
        if self.wander_radius <= 0.0 {
            return Err("wander radius must be positive".to_string());
        }
        check_interval("wander", self.wander_interval)?;
        check_interval("blink", self.blink_interval)?;
        check_interval("ear twitch", self.twitch_interval)?;
        if self.blink_duration <= 0.0 || self.twitch_duration <= 0.0 {
            return Err("blink/twitch durations must be positive".to_string());
        }
        Ok(())
    }
}

/// The simulated quadruped. One entity, one skeleton, one logical timeline.
#[derive(Component, Clone, Debug)]
pub struct Skeleton {
    /// Validated construction parameters.
    pub config: SkeletonConfig,
    /// Body center position.
    pub position: Vec2,
    /// Body heading in degrees.
    pub heading: f32,
    /// Current movement target, if any.
    pub target: Option<Vec2>,
    /// Locomotion state machine.
    pub locomotion: LocomotionState,
    /// Walk-cycle phase in radians, wrapped to `[0, 2π)`.
    pub walk_phase: f32,
    /// Accumulated simulation seconds; drives idle sway and the tail wave.
    pub clock: f32,
    /// The four legs, keyed by [`LimbId`]. Iterate via [`LimbId::ALL`]
    /// for deterministic order.
    pub limbs: FxHashMap<LimbId, Limb>,
    pub tail: TailChain,
    pub head: Head,
    /// True while the eyes are closed.
    pub blink: bool,
    /// True while an ear twitch is playing.
    pub ear_twitch: bool,

    pub(crate) wander_timer: f32,
    pub(crate) wander_after: f32,
    pub(crate) blink_timer: f32,
    pub(crate) blink_after: f32,
    pub(crate) twitch_timer: f32,
    pub(crate) twitch_after: f32,
    pub(crate) rng: Rng,
}

impl Skeleton {
    /// Build a skeleton from a validated configuration and an injected
    /// random source. All configuration errors surface here; a skeleton
    /// can never exist in an invalid state.
    pub fn new(config: SkeletonConfig, mut rng: Rng) -> Result<Self, String> {
        config.validate()?;

        let mut limbs = FxHashMap::default();
        for id in LimbId::ALL {
            let forward = match id {
                LimbId::FrontLeft | LimbId::FrontRight => config.limb_forward_offset,
                LimbId::BackLeft | LimbId::BackRight => -config.limb_forward_offset,
            };
            let side = if id.is_left() {
                -config.limb_side_offset
            } else {
                config.limb_side_offset
            };
            let limb = Limb::new(
                Vec2::new(forward, side),
                config.limb_length,
                config.limb_limits,
                config.limb_smoothing,
            )
            .map_err(|e| format!("{}: {}", id.name(), e))?;
            limbs.insert(id, limb);
        }

        let tail = TailChain::new(config.tail, config.heading)?;
        let head = Head::new(
            config.head_offset,
            config.head_jitter,
            config.head_interval,
            config.head_smoothing,
            config.heading,
        )?;

        let wander_after = sample_range(&mut rng, config.wander_interval.0, config.wander_interval.1);
        let blink_after = sample_range(&mut rng, config.blink_interval.0, config.blink_interval.1);
        let twitch_after =
            sample_range(&mut rng, config.twitch_interval.0, config.twitch_interval.1);

        Ok(Skeleton {
            position: config.position,
            heading: config.heading,
            target: None,
            locomotion: LocomotionState::Idle,
            walk_phase: 0.0,
            clock: 0.0,
            limbs,
            tail,
            head,
            blink: false,
            ear_twitch: false,
            wander_timer: 0.0,
            wander_after,
            blink_timer: 0.0,
            blink_after,
            twitch_timer: 0.0,
            twitch_after,
            rng,
            config,
        })
    }

    /// Build a skeleton with default configuration at a position.
    pub fn at(x: f32, y: f32, rng: Rng) -> Result<Self, String> {
        let config = SkeletonConfig {
            position: Vec2::new(x, y),
            ..SkeletonConfig::default()
        };
        Skeleton::new(config, rng)
    }

    /// Set the movement target. A pure state overwrite: current position
    /// and angles are untouched, so motion blends toward the new target on
    /// the next step instead of jumping. Resets the idle-wander timer.
    pub fn set_target(&mut self, x: f32, y: f32) {
        self.target = Some(Vec2::new(x, y));
        self.wander_timer = 0.0;
    }

    /// Drop the current target; the skeleton settles into idle.
    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// Look up one limb.
    pub fn limb(&self, id: LimbId) -> Option<&Limb> {
        self.limbs.get(&id)
    }

    /// Distance to the current target, if one is set.
    pub fn distance_to_target(&self) -> Option<f32> {
        self.target.map(|t| self.position.distance(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> Skeleton {
        Skeleton::new(SkeletonConfig::default(), Rng::with_seed(1)).unwrap()
    }

    // ==================== CONSTRUCTION TESTS ====================

    #[test]
    fn test_new_with_defaults() {
        let skeleton = build();
        assert_eq!(skeleton.locomotion, LocomotionState::Idle);
        assert!(skeleton.target.is_none());
        assert_eq!(skeleton.limbs.len(), 4);
        assert_eq!(skeleton.tail.len(), 5);
        assert!(!skeleton.blink);
        assert!(!skeleton.ear_twitch);
    }

    #[test]
    fn test_limb_offsets_mirror() {
        let skeleton = build();
        let fl = skeleton.limb(LimbId::FrontLeft).unwrap();
        let br = skeleton.limb(LimbId::BackRight).unwrap();
        assert_eq!(fl.offset.x, -br.offset.x);
        assert_eq!(fl.offset.y, -br.offset.y);
    }

    #[test]
    fn test_new_rejects_negative_speed() {
        let config = SkeletonConfig {
            speed: -1.0,
            ..SkeletonConfig::default()
        };
        assert!(Skeleton::new(config, Rng::with_seed(1)).is_err());
    }

    #[test]
    fn test_new_rejects_speed_above_max() {
        let config = SkeletonConfig {
            speed: 300.0,
            max_speed: 240.0,
            ..SkeletonConfig::default()
        };
        assert!(Skeleton::new(config, Rng::with_seed(1)).is_err());
    }

    #[test]
    fn test_new_rejects_inverted_joint_limits() {
        let config = SkeletonConfig {
            limb_limits: (30.0, -30.0),
            ..SkeletonConfig::default()
        };
        let err = Skeleton::new(config, Rng::with_seed(1)).unwrap_err();
        assert!(err.contains("inverted joint limits"));
    }

    #[test]
    fn test_new_rejects_empty_tail() {
        let config = SkeletonConfig {
            tail: TailParams {
                segments: 0,
                ..TailParams::default()
            },
            ..SkeletonConfig::default()
        };
        assert!(Skeleton::new(config, Rng::with_seed(1)).is_err());
    }

    #[test]
    fn test_new_rejects_non_positive_limb_length() {
        let config = SkeletonConfig {
            limb_length: 0.0,
            ..SkeletonConfig::default()
        };
        assert!(Skeleton::new(config, Rng::with_seed(1)).is_err());
    }

    #[test]
    fn test_new_rejects_inverted_wander_interval() {
        let config = SkeletonConfig {
            wander_interval: (8.0, 3.0),
            ..SkeletonConfig::default()
        };
        assert!(Skeleton::new(config, Rng::with_seed(1)).is_err());
    }

    // ==================== TARGET TESTS ====================

    #[test]
    fn test_set_target_stores_and_resets_wander() {
        let mut skeleton = build();
        skeleton.wander_timer = 2.5;
        skeleton.set_target(100.0, 50.0);
        assert_eq!(skeleton.target, Some(Vec2::new(100.0, 50.0)));
        assert_eq!(skeleton.wander_timer, 0.0);
    }

    #[test]
    fn test_set_target_does_not_move_body() {
        let mut skeleton = build();
        let before = skeleton.position;
        skeleton.set_target(500.0, 500.0);
        assert_eq!(skeleton.position, before);
    }

    #[test]
    fn test_clear_target() {
        let mut skeleton = build();
        skeleton.set_target(10.0, 10.0);
        skeleton.clear_target();
        assert!(skeleton.target.is_none());
        assert!(skeleton.distance_to_target().is_none());
    }

    #[test]
    fn test_distance_to_target() {
        let mut skeleton = build();
        skeleton.set_target(3.0, 4.0);
        let d = skeleton.distance_to_target().unwrap();
        assert!((d - 5.0).abs() < 1e-5);
    }
}
