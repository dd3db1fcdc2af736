//! ECS systems: the behavior that advances and reads the simulation.
//!
//! Submodules overview:
//! - [`locomotion`] – the per-step algorithm: state machine, movement,
//!   gait synthesis, tail/head/timers
//! - [`snapshot`] – the pure render data adapter and pose publishing
//! - [`time`] – updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! - [`render`] – raylib demo renderer (feature `render`)

pub mod locomotion;
#[cfg(feature = "render")]
pub mod render;
pub mod snapshot;
pub mod time;
