//! Demo scene setup.
//!
//! Builds the ECS world for the demo hosts: one configured skeleton, the
//! shared clock, the pose bridge, and the update schedule. Input routing
//! lives here too so the windowed and headless hosts share it.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;

use crate::components::skeleton::Skeleton;
use crate::events::locomotion::observe_locomotion_change;
use crate::resources::appconfig::CatConfig;
use crate::resources::posebridge::{PoseReceiver, pose_bridge};
use crate::resources::worldtime::WorldTime;
use crate::systems::locomotion::locomotion_system;
use crate::systems::snapshot::publish_pose_system;

/// Build a world with one skeleton spawned at the window center, plus the
/// update schedule and the render-side pose receiver.
///
/// A `seed` makes every wander/look-around/blink decision reproducible;
/// without one the random source is freshly seeded.
pub fn build_world(
    config: CatConfig,
    seed: Option<u64>,
) -> Result<(World, Schedule, PoseReceiver), String> {
    let rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let skeleton = Skeleton::new(config.skeleton_config(), rng)?;

    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    let (bridge, receiver) = pose_bridge();
    world.insert_resource(bridge);
    world.insert_resource(config);
    world.spawn(skeleton);
    world.spawn(Observer::new(observe_locomotion_change));
    world.flush();

    let mut schedule = Schedule::default();
    // Publish after stepping so readers always see the freshest pose.
    schedule.add_systems((locomotion_system, publish_pose_system).chain());

    Ok((world, schedule, receiver))
}

/// Route a pointer target to every skeleton.
///
/// Callers are the boundary layer: they clamp coordinates to their canvas
/// before handing them over. The core accepts anything finite.
pub fn request_target(world: &mut World, x: f32, y: f32) {
    let mut query = world.query::<&mut Skeleton>();
    for mut skeleton in query.iter_mut(world) {
        skeleton.set_target(x, y);
    }
    log::info!("target set to ({:.0}, {:.0})", x, y);
}
