//! Locomotion state transition event.
//!
//! Triggered by
//! [`locomotion_system`](crate::systems::locomotion::locomotion_system)
//! whenever a skeleton's state machine changes state, so hosts can react
//! (play a sound, update UI) without polling the component.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::skeleton::LocomotionState;

/// Event emitted when a skeleton's locomotion state changes.
#[derive(Event, Debug, Clone, Copy)]
pub struct LocomotionChangedEvent {
    /// The entity whose skeleton transitioned.
    pub entity: Entity,
    pub from: LocomotionState,
    pub to: LocomotionState,
}

/// Global observer that logs transitions.
///
/// Registered by the demo host; a real host would replace or extend this
/// with its own reactions.
pub fn observe_locomotion_change(trigger: On<LocomotionChangedEvent>) {
    let event = trigger.event();
    log::debug!(
        "{:?} locomotion: {:?} -> {:?}",
        event.entity,
        event.from,
        event.to
    );
}
