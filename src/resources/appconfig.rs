//! Application configuration resource.
//!
//! Manages tuning loaded from an INI configuration file. Provides defaults
//! for safe startup; missing keys keep their defaults, so a partial file is
//! fine and no file at all is fine too.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 600
//! target_fps = 60
//!
//! [movement]
//! speed = 80.0
//! max_speed = 240.0
//! walk_cycle_coefficient = 0.1
//! turn_rate = 6.0
//! arrival_epsilon = 5.0
//!
//! [limbs]
//! length = 25.0
//! min_angle = -30.0
//! max_angle = 30.0
//! smoothing = 10.0
//! swing_amplitude = 20.0
//!
//! [tail]
//! segments = 5
//! amplitude = 15.0
//! amplitude_falloff = 2.5
//! frequency = 2.0
//! smoothing = 6.0
//!
//! [head]
//! jitter = 10.0
//! smoothing = 4.0
//!
//! [wander]
//! min_interval = 3.0
//! max_interval = 8.0
//! radius = 120.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::skeleton::SkeletonConfig;
use crate::math::Vec2;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_CONFIG_PATH: &str = "./catmotion.ini";

/// Application configuration resource.
///
/// Window settings plus every skeleton tuning knob exposed through the INI
/// file. [`CatConfig::skeleton_config`] maps the loaded values onto a
/// [`SkeletonConfig`]; validation happens when the skeleton is built.
#[derive(Resource, Debug, Clone)]
pub struct CatConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second for the windowed demo.
    pub target_fps: u32,
    /// Skeleton tuning; starts at [`SkeletonConfig::default`] and is
    /// overridden key by key from the file.
    pub skeleton: SkeletonConfig,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for CatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CatConfig {
    /// Create a configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            skeleton: SkeletonConfig::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [movement] section
        let float = |section: &str, key: &str, slot: &mut f32| {
            if let Some(value) = config.getfloat(section, key).ok().flatten() {
                *slot = value as f32;
            }
        };
        float("movement", "speed", &mut self.skeleton.speed);
        float("movement", "max_speed", &mut self.skeleton.max_speed);
        float(
            "movement",
            "walk_cycle_coefficient",
            &mut self.skeleton.walk_cycle_coefficient,
        );
        float("movement", "turn_rate", &mut self.skeleton.turn_rate);
        float(
            "movement",
            "arrival_epsilon",
            &mut self.skeleton.arrival_epsilon,
        );

        // [limbs] section
        float("limbs", "length", &mut self.skeleton.limb_length);
        float("limbs", "min_angle", &mut self.skeleton.limb_limits.0);
        float("limbs", "max_angle", &mut self.skeleton.limb_limits.1);
        float("limbs", "smoothing", &mut self.skeleton.limb_smoothing);
        float(
            "limbs",
            "swing_amplitude",
            &mut self.skeleton.swing_amplitude,
        );

        // [tail] section
        if let Some(segments) = config.getuint("tail", "segments").ok().flatten() {
            self.skeleton.tail.segments = segments as usize;
        }
        float("tail", "amplitude", &mut self.skeleton.tail.amplitude);
        float(
            "tail",
            "amplitude_falloff",
            &mut self.skeleton.tail.amplitude_falloff,
        );
        float("tail", "frequency", &mut self.skeleton.tail.frequency);
        float("tail", "smoothing", &mut self.skeleton.tail.smoothing);

        // [head] section
        float("head", "jitter", &mut self.skeleton.head_jitter);
        float("head", "smoothing", &mut self.skeleton.head_smoothing);

        // [wander] section
        float("wander", "min_interval", &mut self.skeleton.wander_interval.0);
        float("wander", "max_interval", &mut self.skeleton.wander_interval.1);
        float("wander", "radius", &mut self.skeleton.wander_radius);

        info!(
            "Loaded config: {}x{} window, fps={}, speed={}, tail segments={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.skeleton.speed,
            self.skeleton.tail.segments
        );

        Ok(())
    }

    /// Skeleton configuration, spawned at the window center.
    ///
    /// Validation happens in `Skeleton::new`, not here, so a bad file
    /// surfaces as a construction error with a precise message.
    pub fn skeleton_config(&self) -> SkeletonConfig {
        SkeletonConfig {
            position: Vec2::new(
                self.window_width as f32 / 2.0,
                self.window_height as f32 / 2.0,
            ),
            ..self.skeleton
        }
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::tail::TailParams;

    #[test]
    fn test_defaults_match_skeleton_defaults() {
        let config = CatConfig::new();
        assert_eq!(config.window_width, 800);
        assert_eq!(config.window_height, 600);
        assert_eq!(config.skeleton.tail.segments, TailParams::default().segments);
    }

    #[test]
    fn test_missing_file_is_an_error_but_defaults_survive() {
        let mut config = CatConfig::with_path("/nonexistent/catmotion.ini");
        assert!(config.load_from_file().is_err());
        // Values untouched by the failed load.
        assert_eq!(config.window_width, 800);
        assert!((config.skeleton.speed - 80.0).abs() < 1e-6);
    }

    #[test]
    fn test_skeleton_config_centers_on_window() {
        let config = CatConfig::new();
        let sk = config.skeleton_config();
        assert!((sk.position.x - 400.0).abs() < 1e-6);
        assert!((sk.position.y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_load_overrides_present_keys() {
        let dir = std::env::temp_dir().join("catmotion_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catmotion.ini");
        std::fs::write(
            &path,
            "[window]\nwidth = 1024\n[movement]\nspeed = 120.0\n[tail]\nsegments = 7\n",
        )
        .unwrap();

        let mut config = CatConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.window_width, 1024);
        // Untouched keys keep defaults.
        assert_eq!(config.window_height, 600);
        assert!((config.skeleton.speed - 120.0).abs() < 1e-6);
        assert_eq!(config.skeleton.tail.segments, 7);
    }
}
