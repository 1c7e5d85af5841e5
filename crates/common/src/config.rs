use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a simulation config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Constants that drive the falling-cube simulation.
///
/// Every field has a default, so a YAML file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Number of cubes created at startup.
    pub cube_count: usize,
    /// Edge length shared by every cube.
    pub cube_size: f32,
    /// Added to vertical velocity once per frame.
    pub gravity: f32,
    /// No cube's lower face may pass below this y.
    pub floor_y: f32,
    /// Displacement applied per directional key event.
    pub move_step: f32,
    /// Lower bound (inclusive) of the spawn range on every axis.
    pub spawn_min: f32,
    /// Upper bound (exclusive) of the spawn range on every axis.
    pub spawn_max: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cube_count: 2,
            cube_size: 0.2,
            gravity: -0.001,
            floor_y: -1.0,
            move_step: 0.01,
            spawn_min: -1.0,
            spawn_max: 1.0,
        }
    }
}

impl SimConfig {
    /// Parse a config from YAML and validate it.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cube_count == 0 {
            return Err(ConfigError::Invalid("cube_count must be at least 1".into()));
        }
        if !(self.cube_size.is_finite() && self.cube_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "cube_size must be positive, got {}",
                self.cube_size
            )));
        }
        let finite = [
            ("gravity", self.gravity),
            ("floor_y", self.floor_y),
            ("move_step", self.move_step),
            ("spawn_min", self.spawn_min),
            ("spawn_max", self.spawn_max),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")));
        }
        if self.spawn_min >= self.spawn_max {
            return Err(ConfigError::Invalid(format!(
                "spawn range is empty: [{}, {})",
                self.spawn_min, self.spawn_max
            )));
        }
        Ok(())
    }

    /// Half the cube edge length; distance from center to lower face.
    pub fn half_size(&self) -> f32 {
        self.cube_size / 2.0
    }

    /// Center y of a cube resting on the floor.
    pub fn rest_y(&self) -> f32 {
        self.floor_y + self.half_size()
    }
}
