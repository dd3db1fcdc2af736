//! ECS resources: world-level state shared by the systems.
//!
//! Submodules:
//! - [`appconfig`] – INI-backed tuning with safe defaults
//! - [`posebridge`] – single-writer/multiple-reader pose publishing
//! - [`worldtime`] – the shared simulation clock

pub mod appconfig;
pub mod posebridge;
pub mod worldtime;
