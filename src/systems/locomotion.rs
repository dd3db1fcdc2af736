//! Locomotion and gait synthesis.
//!
//! [`step`] advances one skeleton by one simulation step: it runs the
//! `Idle`/`Seeking`/`Arrived` state machine, moves and turns the body,
//! advances the walk-cycle phase, writes limb targets for the diagonal
//! gait (or the idle sway), and updates the tail, head and blink/ear-twitch
//! timers. [`locomotion_system`] is the ECS wrapper that feeds it the frame
//! delta and broadcasts state transitions.
//!
//! # Gait
//!
//! While seeking, the diagonal pair {front-left, back-right} swings with
//! `sin(phase)` and {front-right, back-left} with `sin(phase + π)`, so two
//! legs always support the body while the other two swing. The swing
//! amplitude scales with the speed actually traveled this step, so the
//! gait dies out exactly as the body stops.

use bevy_ecs::prelude::*;

use crate::components::head::sample_range;
use crate::components::limb::LimbId;
use crate::components::skeleton::{LocomotionState, Skeleton};
use crate::events::locomotion::LocomotionChangedEvent;
use crate::math::{self, Vec2};
use crate::resources::worldtime::WorldTime;

/// Advance a skeleton by `dt` seconds.
///
/// `dt = 0` is a state-preserving no-op. A negative `dt` is a caller
/// error: silently absorbing it could mask scheduler bugs.
pub fn step(skeleton: &mut Skeleton, dt: f32) -> Result<(), String> {
    if dt < 0.0 {
        return Err(format!("time delta must be non-negative, got {}", dt));
    }
    if dt == 0.0 {
        return Ok(());
    }

    let config = skeleton.config;
    skeleton.clock += dt;

    // Speed actually traveled this step; drives phase advance and swing.
    let mut effective_speed = 0.0;

    match skeleton.target {
        Some(target) => {
            let to_target = target - skeleton.position;
            let distance = to_target.length();
            if distance <= config.arrival_epsilon {
                // Target consumed; Arrived collapses to Idle next step.
                skeleton.target = None;
                skeleton.locomotion = LocomotionState::Arrived;
            } else {
                skeleton.locomotion = LocomotionState::Seeking;

                let desired = to_target.y.atan2(to_target.x).to_degrees();
                skeleton.heading = math::normalize_deg(math::approach_deg(
                    skeleton.heading,
                    desired,
                    config.turn_rate,
                    dt,
                ));

                // Advance along the direction to the target, never past it.
                let step_length = (config.speed * dt).min(distance);
                skeleton.position =
                    skeleton.position + to_target.normalized().scale_by(step_length);
                effective_speed = step_length / dt;

                skeleton.walk_phase = math::wrap_phase(
                    skeleton.walk_phase
                        + effective_speed * config.walk_cycle_coefficient * dt,
                );
            }
        }
        None => {
            if skeleton.locomotion != LocomotionState::Idle {
                skeleton.locomotion = LocomotionState::Idle;
            }

            // Idle wander: after a while, pick a nearby point and go.
            skeleton.wander_timer += dt;
            if skeleton.wander_timer >= skeleton.wander_after {
                let radius = config.wander_radius;
                let dx = sample_range(&mut skeleton.rng, -radius, radius);
                let dy = sample_range(&mut skeleton.rng, -radius, radius);
                skeleton.target = Some(skeleton.position + Vec2::new(dx, dy));
                skeleton.wander_timer = 0.0;
                skeleton.wander_after = sample_range(
                    &mut skeleton.rng,
                    config.wander_interval.0,
                    config.wander_interval.1,
                );
            }
        }
    }

    write_limb_targets(skeleton, effective_speed);
    for id in LimbId::ALL {
        if let Some(limb) = skeleton.limbs.get_mut(&id) {
            limb.update(dt);
        }
    }

    let tail_base = skeleton.heading + 180.0;
    let clock = skeleton.clock;
    skeleton.tail.update(tail_base, clock, dt);

    let heading = skeleton.heading;
    let Skeleton { head, rng, .. } = skeleton;
    head.update(heading, dt, rng);

    update_visual_tics(skeleton, dt);

    Ok(())
}

/// Set every limb's target angle: walk cycle while moving, mirrored sway
/// otherwise.
fn write_limb_targets(skeleton: &mut Skeleton, effective_speed: f32) {
    let config = skeleton.config;
    if skeleton.locomotion == LocomotionState::Seeking && effective_speed > 0.0 {
        let swing = config.swing_amplitude * (effective_speed / config.speed).min(1.0);
        let phase = skeleton.walk_phase;
        for id in LimbId::ALL {
            if let Some(limb) = skeleton.limbs.get_mut(&id) {
                limb.set_target((phase + id.swing_offset()).sin() * swing);
            }
        }
    } else {
        let sway =
            (skeleton.clock * config.idle_sway_frequency).sin() * config.idle_sway_amplitude;
        for id in LimbId::ALL {
            if let Some(limb) = skeleton.limbs.get_mut(&id) {
                limb.set_target(if id.is_left() { sway } else { -sway });
            }
        }
    }
}

/// Advance the blink and ear-twitch timers.
///
/// Each flag is false for a randomized interval, true for a fixed short
/// duration, then the interval is re-rolled.
fn update_visual_tics(skeleton: &mut Skeleton, dt: f32) {
    let config = skeleton.config;

    skeleton.blink_timer += dt;
    if skeleton.blink_timer >= skeleton.blink_after + config.blink_duration {
        skeleton.blink_timer = 0.0;
        skeleton.blink_after = sample_range(
            &mut skeleton.rng,
            config.blink_interval.0,
            config.blink_interval.1,
        );
    }
    skeleton.blink = skeleton.blink_timer >= skeleton.blink_after;

    skeleton.twitch_timer += dt;
    if skeleton.twitch_timer >= skeleton.twitch_after + config.twitch_duration {
        skeleton.twitch_timer = 0.0;
        skeleton.twitch_after = sample_range(
            &mut skeleton.rng,
            config.twitch_interval.0,
            config.twitch_interval.1,
        );
    }
    skeleton.ear_twitch = skeleton.twitch_timer >= skeleton.twitch_after;
}

/// Step every skeleton and broadcast state transitions.
pub fn locomotion_system(
    mut query: Query<(Entity, &mut Skeleton)>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    let dt = time.delta;
    for (entity, mut skeleton) in query.iter_mut() {
        let before = skeleton.locomotion;
        if let Err(e) = step(&mut *skeleton, dt) {
            log::error!("skeleton step failed for {:?}: {}", entity, e);
            continue;
        }
        let after = skeleton.locomotion;
        if before != after {
            commands.trigger(LocomotionChangedEvent {
                entity,
                from: before,
                to: after,
            });
        }
    }
}
