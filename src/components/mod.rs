//! ECS components for the simulated quadruped.
//!
//! The only component attached to an entity is [`skeleton::Skeleton`]; the
//! other modules define the sub-models it exclusively owns.
//!
//! Submodules overview:
//! - [`limb`] – a single articulated limb with joint limits and smoothing
//! - [`tail`] – the wave-propagating tail chain
//! - [`head`] – the head with periodic idle look-around
//! - [`skeleton`] – the body: position, heading, locomotion state machine,
//!   walk cycle, wander/blink/ear-twitch timers, and the owned sub-models

pub mod head;
pub mod limb;
pub mod skeleton;
pub mod tail;
