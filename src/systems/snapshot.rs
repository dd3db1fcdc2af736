//! Render data adapter.
//!
//! [`snapshot`] is a pure read: it converts the current skeleton state into
//! an immutable [`PoseSnapshot`] and never touches the simulation. Calling
//! it twice with no intervening step returns equal values.
//! [`publish_pose_system`] pushes the snapshot through the
//! [`PoseBridge`](crate::resources::posebridge::PoseBridge) after each
//! simulation step.

use bevy_ecs::prelude::*;

use crate::components::limb::LimbId;
use crate::components::skeleton::Skeleton;
use crate::math::Vec2;
use crate::pose::{BodyPose, HeadPose, LimbPose, PoseSnapshot, TailSegmentPose};
use crate::resources::posebridge::PoseBridge;

/// Capture the current pose of a skeleton.
///
/// Everything a renderer needs, with zero further computation: limb base/
/// mid/end points and absolute angles, chained tail segment lines, head
/// position/angle, and the transient blink/ear-twitch flags.
pub fn snapshot(skeleton: &Skeleton) -> PoseSnapshot {
    let position = skeleton.position;
    let heading = skeleton.heading;

    let mut limbs = Vec::with_capacity(LimbId::ALL.len());
    for id in LimbId::ALL {
        if let Some(limb) = skeleton.limb(id) {
            limbs.push(LimbPose {
                id,
                base: limb.base_point(position, heading),
                mid: limb.midpoint(position, heading),
                end: limb.endpoint(position, heading),
                angle: heading + limb.angle,
            });
        }
    }

    // The tail chains outward from the rear edge of the body ellipse; each
    // segment starts where its parent ended.
    let mut tail = Vec::with_capacity(skeleton.tail.len());
    let mut joint = position
        + Vec2::from_angle_deg(heading).scale_by(-skeleton.config.body_width / 2.0);
    for segment in &skeleton.tail.segments {
        let end = joint + Vec2::from_angle_deg(segment.angle).scale_by(segment.length);
        tail.push(TailSegmentPose {
            start: joint,
            end,
            angle: segment.angle,
        });
        joint = end;
    }

    PoseSnapshot {
        body: BodyPose {
            position,
            width: skeleton.config.body_width,
            height: skeleton.config.body_height,
            heading,
        },
        head: HeadPose {
            position: skeleton.head.position(position, heading),
            angle: skeleton.head.angle,
        },
        limbs,
        tail,
        state: skeleton.locomotion,
        blink: skeleton.blink,
        ear_twitch: skeleton.ear_twitch,
    }
}

/// Publish the latest pose of every skeleton through the bridge.
///
/// Runs after [`locomotion_system`](crate::systems::locomotion::
/// locomotion_system) so readers always see the state the current step
/// produced.
pub fn publish_pose_system(query: Query<&Skeleton>, bridge: Res<PoseBridge>) {
    for skeleton in query.iter() {
        bridge.publish(snapshot(skeleton));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::skeleton::{LocomotionState, SkeletonConfig};
    use crate::systems::locomotion::step;
    use fastrand::Rng;

    fn build() -> Skeleton {
        Skeleton::new(SkeletonConfig::default(), Rng::with_seed(1)).unwrap()
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let mut skeleton = build();
        skeleton.set_target(100.0, 50.0);
        for _ in 0..30 {
            step(&mut skeleton, 1.0 / 60.0).unwrap();
        }
        let a = snapshot(&skeleton);
        let b = snapshot(&skeleton);
        assert_eq!(a, b);
    }

    #[test]
    fn test_snapshot_does_not_perturb_simulation() {
        let mut with_snapshots = build();
        let mut without = build();
        for _ in 0..120 {
            step(&mut with_snapshots, 1.0 / 60.0).unwrap();
            let _ = snapshot(&with_snapshots);
            let _ = snapshot(&with_snapshots);
            step(&mut without, 1.0 / 60.0).unwrap();
        }
        assert_eq!(snapshot(&with_snapshots), snapshot(&without));
    }

    #[test]
    fn test_snapshot_has_all_parts() {
        let skeleton = build();
        let pose = snapshot(&skeleton);
        assert_eq!(pose.limbs.len(), 4);
        assert_eq!(pose.tail.len(), skeleton.tail.len());
        assert_eq!(pose.state, LocomotionState::Idle);
    }

    #[test]
    fn test_tail_segments_chain() {
        let mut skeleton = build();
        for _ in 0..60 {
            step(&mut skeleton, 1.0 / 60.0).unwrap();
        }
        let pose = snapshot(&skeleton);
        for pair in pose.tail.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_tail_attaches_at_rear() {
        let skeleton = build();
        let pose = snapshot(&skeleton);
        let root = pose.tail[0].start;
        // Heading 0: the rear edge is half the body width toward -x.
        assert!((root.x - (skeleton.position.x - 30.0)).abs() < 1e-4);
        assert!((root.y - skeleton.position.y).abs() < 1e-4);
    }

    #[test]
    fn test_limb_endpoints_are_limb_length_from_base() {
        let mut skeleton = build();
        skeleton.set_target(200.0, 200.0);
        for _ in 0..120 {
            step(&mut skeleton, 1.0 / 60.0).unwrap();
        }
        let pose = snapshot(&skeleton);
        for limb in &pose.limbs {
            let length = limb.base.distance(limb.end);
            assert!((length - skeleton.config.limb_length).abs() < 1e-3);
        }
    }

    #[test]
    fn test_head_sits_ahead_of_body() {
        let skeleton = build();
        let pose = snapshot(&skeleton);
        // Heading 0: head is offset along +x.
        assert!(pose.head.position.x > pose.body.position.x);
    }

    #[test]
    fn test_snapshot_serializes() {
        let skeleton = build();
        let pose = snapshot(&skeleton);
        let json = serde_json::to_string(&pose).unwrap();
        assert!(json.contains("\"limbs\""));
        assert!(json.contains("\"tail\""));
    }
}
