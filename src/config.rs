//! Scenario configuration loaded once at startup.
//!
//! ```json
//! {
//!   "gravity_const": 6.67e-11,
//!   "tick_interval": 3600.0,
//!   "time_scale": 216000.0,
//!   "trails": true,
//!   "camera": { "x": 0.0, "y": 0.0, "zoom": 1e-6 },
//!   "bodies": [
//!     { "mass": 5.97e24, "density": 5520.0,
//!       "position": { "x": 0.0, "y": 0.0 },
//!       "velocity": { "dx": 0.0, "dy": 0.0 },
//!       "color": "#3B82F6" }
//!   ]
//! }
//! ```
//!
//! `tick_interval` is the simulated time per tick; ticks happen every
//! `tick_interval / time_scale` seconds of wall-clock time.
//!
//! Older scenario files are also accepted:
//!
//! ```json
//! {
//!   "other": { "frame rate": 10, "gravity const": 6.67e-11 },
//!   "camera_position": { "x": 0, "y": 0, "zoom": 1e-6 },
//!   "planets": [
//!     { "mass": 5.97e24, "pos": { "x": 0, "y": 0 },
//!       "vel": { "dx": 0, "dy": 0 }, "color": "#3B82F6" }
//!   ]
//! }
//! ```
//!
//! They advance one unit of simulated time every `frame rate` milliseconds,
//! and bodies without a `density` get [`LEGACY_DENSITY`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy::math::DVec2;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
/// Density given to bodies from older scenario files.
pub const LEGACY_DENSITY: f64 = 1.0;
/// Tick period, in milliseconds, of older scenario files without a `frame rate`.
pub const LEGACY_FRAME_RATE_MS: f64 = 10.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no config.json in {}", .0.display())]
    NotFound(PathBuf),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub gravity_const: f64,
    pub tick_interval: f64,
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    #[serde(default)]
    pub trails: bool,
    #[serde(default)]
    pub camera: CameraConfig,
    pub bodies: Vec<BodyConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: default_zoom(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BodyConfig {
    pub mass: f64,
    pub density: f64,
    pub position: PointConfig,
    #[serde(default)]
    pub velocity: VelocityConfig,
    /// Hex color such as `"#FFAA00"`; a random hue is used when absent.
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PointConfig {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct VelocityConfig {
    pub dx: f64,
    pub dy: f64,
}

/// Scenario layout with an `other` section and a `planets` list.
#[derive(Debug, Clone, Deserialize)]
struct LegacyConfig {
    other: LegacyOther,
    #[serde(default)]
    camera_position: CameraConfig,
    planets: Vec<LegacyPlanet>,
}

#[derive(Debug, Clone, Deserialize)]
struct LegacyOther {
    #[serde(rename = "gravity const")]
    gravity_const: f64,
    #[serde(rename = "frame rate", default)]
    frame_rate: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct LegacyPlanet {
    mass: f64,
    #[serde(default = "legacy_density")]
    density: f64,
    pos: PointConfig,
    #[serde(default)]
    vel: VelocityConfig,
    #[serde(default)]
    color: Option<String>,
}

impl From<LegacyConfig> for SimulationConfig {
    fn from(legacy: LegacyConfig) -> Self {
        let frame_rate_ms = legacy.other.frame_rate.unwrap_or(LEGACY_FRAME_RATE_MS);
        Self {
            gravity_const: legacy.other.gravity_const,
            tick_interval: 1.0,
            time_scale: 1000.0 / frame_rate_ms,
            trails: false,
            camera: legacy.camera_position,
            bodies: legacy
                .planets
                .into_iter()
                .map(|planet| BodyConfig {
                    mass: planet.mass,
                    density: planet.density,
                    position: planet.pos,
                    velocity: planet.vel,
                    color: planet.color,
                })
                .collect(),
        }
    }
}

fn legacy_density() -> f64 {
    LEGACY_DENSITY
}

fn default_time_scale() -> f64 {
    1.0
}

fn default_zoom() -> f64 {
    1.0
}

impl SimulationConfig {
    /// Loads `path` directly, or `path/config.json` when `path` is a directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = if path.is_dir() {
            let candidate = path.join(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            candidate
        } else {
            path.to_path_buf()
        };
        let contents = std::fs::read_to_string(file)?;
        Self::from_json(&contents)
    }

    /// Parses either scenario layout and validates the result.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(contents)?;
        let config: SimulationConfig = if value.get("planets").is_some() {
            serde_json::from_value::<LegacyConfig>(value)?.into()
        } else {
            serde_json::from_value(value)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gravity_const.is_finite() && self.gravity_const >= 0.0) {
            return Err(invalid("gravity_const must be finite and non-negative"));
        }
        require_positive("tick_interval", self.tick_interval)?;
        require_positive("time_scale", self.time_scale)?;
        require_positive("camera.zoom", self.camera.zoom)?;
        require_finite("camera.x", self.camera.x)?;
        require_finite("camera.y", self.camera.y)?;
        if Duration::try_from_secs_f64(self.tick_interval / self.time_scale).is_err() {
            return Err(invalid("tick_interval / time_scale is not a usable wall-clock interval"));
        }

        for (i, body) in self.bodies.iter().enumerate() {
            require_positive(&format!("bodies[{i}].mass"), body.mass)?;
            require_positive(&format!("bodies[{i}].density"), body.density)?;
            require_finite(&format!("bodies[{i}].position.x"), body.position.x)?;
            require_finite(&format!("bodies[{i}].position.y"), body.position.y)?;
            require_finite(&format!("bodies[{i}].velocity.dx"), body.velocity.dx)?;
            require_finite(&format!("bodies[{i}].velocity.dy"), body.velocity.dy)?;
        }
        Ok(())
    }

    /// Wall-clock time between two physics ticks.
    pub fn wall_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.tick_interval / self.time_scale).unwrap_or(Duration::MAX)
    }
}

impl BodyConfig {
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.position.x, self.position.y)
    }

    pub fn velocity(&self) -> DVec2 {
        DVec2::new(self.velocity.dx, self.velocity.dy)
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

fn require_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be finite and positive, got {value}")))
    }
}

fn require_finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be finite, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const EARTH_MOON: &str = r##"{
        "gravity_const": 6.67e-11,
        "tick_interval": 3600.0,
        "time_scale": 7200.0,
        "camera": { "x": 10.0, "y": -5.0, "zoom": 1e-6 },
        "bodies": [
            { "mass": 5.97e24, "density": 5520.0,
              "position": { "x": 0.0, "y": 0.0 },
              "color": "#3B82F6" },
            { "mass": 7.35e22, "density": 3340.0,
              "position": { "x": 3.84e8, "y": 0.0 },
              "velocity": { "dx": 0.0, "dy": 1022.0 } }
        ]
    }"##;

    #[test]
    fn parses_full_scenario() {
        let config = SimulationConfig::from_json(EARTH_MOON).expect("valid scenario");
        assert_eq!(config.bodies.len(), 2);
        assert_eq!(config.gravity_const, 6.67e-11);
        assert_eq!(config.camera.zoom, 1e-6);
        assert_eq!(config.bodies[0].color.as_deref(), Some("#3B82F6"));
        assert_eq!(config.bodies[1].color, None);
        assert_eq!(config.bodies[0].velocity(), DVec2::ZERO);
        assert_eq!(config.bodies[1].velocity(), DVec2::new(0.0, 1022.0));
        assert_eq!(config.bodies[1].position(), DVec2::new(3.84e8, 0.0));
        assert_eq!(config.wall_interval(), Duration::from_millis(500));
        assert!(!config.trails);
    }

    #[test]
    fn optional_sections_use_defaults() {
        let config = SimulationConfig::from_json(
            r#"{ "gravity_const": 1.0, "tick_interval": 0.02, "bodies": [] }"#,
        )
        .expect("minimal scenario");
        assert_eq!(config.time_scale, 1.0);
        assert_eq!(config.camera.zoom, 1.0);
        assert_eq!((config.camera.x, config.camera.y), (0.0, 0.0));
        assert_eq!(config.wall_interval(), Duration::from_millis(20));
    }

    #[test]
    fn rejects_non_positive_mass() {
        let err = SimulationConfig::from_json(
            r#"{ "gravity_const": 1.0, "tick_interval": 1.0,
                 "bodies": [ { "mass": 0.0, "density": 1.0, "position": { "x": 0, "y": 0 } } ] }"#,
        )
        .unwrap_err();
        match err {
            ConfigError::Invalid(message) => assert!(message.contains("bodies[0].mass")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_timing() {
        for json in [
            r#"{ "gravity_const": 1.0, "tick_interval": 0.0, "bodies": [] }"#,
            r#"{ "gravity_const": 1.0, "tick_interval": 1.0, "time_scale": -2.0, "bodies": [] }"#,
            r#"{ "gravity_const": -1.0, "tick_interval": 1.0, "bodies": [] }"#,
            r#"{ "gravity_const": 1.0, "tick_interval": 1e300, "time_scale": 1e-300, "bodies": [] }"#,
        ] {
            assert!(matches!(
                SimulationConfig::from_json(json),
                Err(ConfigError::Invalid(_))
            ));
        }
    }

    #[test]
    fn reads_older_scenario_layout() {
        let config = SimulationConfig::from_json(
            r##"{
                "other": { "frame rate": 20, "gravity const": 6.67e-11 },
                "camera_position": { "x": 1.5, "y": -2.0, "zoom": 0.001 },
                "planets": [
                    { "mass": 5.97e24, "pos": { "x": 0, "y": 0 },
                      "vel": { "dx": 0, "dy": 0 }, "color": "#3B82F6" },
                    { "mass": 7.35e22, "pos": { "x": 3.84e8, "y": 0 },
                      "vel": { "dx": -1022, "dy": 0 }, "color": "#FFFFFF" }
                ]
            }"##,
        )
        .expect("older scenario");

        assert_eq!(config.gravity_const, 6.67e-11);
        assert_eq!((config.camera.x, config.camera.y, config.camera.zoom), (1.5, -2.0, 0.001));
        assert_eq!(config.bodies.len(), 2);
        assert_eq!(config.bodies[1].position(), DVec2::new(3.84e8, 0.0));
        assert_eq!(config.bodies[1].velocity(), DVec2::new(-1022.0, 0.0));
        assert_eq!(config.bodies[1].density, LEGACY_DENSITY);
        assert_eq!(config.bodies[0].color.as_deref(), Some("#3B82F6"));
        assert_eq!(config.tick_interval, 1.0);
        assert_eq!(config.wall_interval(), Duration::from_millis(20));
    }

    #[test]
    fn older_layout_defaults_frame_rate_and_is_validated() {
        let config = SimulationConfig::from_json(
            r#"{ "other": { "gravity const": 1.0 }, "planets": [] }"#,
        )
        .expect("minimal older scenario");
        assert_eq!(config.wall_interval(), Duration::from_millis(10));
        assert_eq!(config.camera.zoom, 1.0);

        assert!(matches!(
            SimulationConfig::from_json(
                r#"{ "other": { "gravity const": 1.0 },
                     "planets": [ { "mass": -5.0, "pos": { "x": 0, "y": 0 } } ] }"#,
            ),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn reports_malformed_json() {
        assert!(matches!(
            SimulationConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_file_or_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&file, EARTH_MOON).expect("write config");

        let from_file = SimulationConfig::load(&file).expect("load file");
        let from_dir = SimulationConfig::load(dir.path()).expect("load dir");
        assert_eq!(from_file.bodies.len(), from_dir.bodies.len());
    }

    #[test]
    fn directory_without_config_is_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(matches!(
            SimulationConfig::load(dir.path()),
            Err(ConfigError::NotFound(_))
        ));
        assert!(matches!(
            SimulationConfig::load(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
