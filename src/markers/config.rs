// Spawner configuration.
// Every option has a default so a config file only needs the fields it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

// ============================================================================
// DEFAULTS
// ============================================================================

pub const DEFAULT_CAPACITY: usize = 10;
/// Upper bound on `capacity`.
pub const MAX_CAPACITY: usize = 4096;
pub const DEFAULT_REVEAL_DISTANCE: f32 = 1000.0;
pub const DEFAULT_MINIMAL_SPACING: f32 = 100.0;
pub const DEFAULT_SHARP_TURN_ANGLE_DEG: f32 = 30.0;
pub const DEFAULT_HAZARD_AHEAD_DISTANCE: f32 = 300.0;
/// Raw path positions dropped at each end before they become candidates.
pub const DEFAULT_TRIM_MARGIN: usize = 7;
/// Lateral distance of each guide from the path centre line.
pub const DEFAULT_GUIDE_RADIUS: f32 = 120.0;
pub const DEFAULT_GUIDE_HEIGHT: f32 = 45.0;
/// Outward roll of each guide around the path's forward axis.
pub const DEFAULT_GUIDE_TILT_DEG: f32 = 60.0;
pub const DEFAULT_HAZARD_HEIGHT: f32 = 45.0;

// ============================================================================
// CONFIG
// ============================================================================

/// Tuning for [`MarkerScheduler`](super::MarkerScheduler).
///
/// Distances are in world units and measured along the path (arc length),
/// not in a straight line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpawnerConfig {
    /// Max concurrently active marker groups.
    pub capacity: usize,
    /// Max distance at which a new candidate may be admitted.
    pub reveal_distance: f32,
    /// Min distance between consecutively spawned candidates.
    pub minimal_spacing: f32,
    /// Turns at or above this angle get a hazard marker.
    pub sharp_turn_angle_deg: f32,
    /// How far along the forward axis the hazard is pushed.
    pub hazard_ahead_distance: f32,
    pub trim_margin: usize,
    pub guide_radius: f32,
    pub guide_height: f32,
    pub guide_tilt_deg: f32,
    pub hazard_height: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            reveal_distance: DEFAULT_REVEAL_DISTANCE,
            minimal_spacing: DEFAULT_MINIMAL_SPACING,
            sharp_turn_angle_deg: DEFAULT_SHARP_TURN_ANGLE_DEG,
            hazard_ahead_distance: DEFAULT_HAZARD_AHEAD_DISTANCE,
            trim_margin: DEFAULT_TRIM_MARGIN,
            guide_radius: DEFAULT_GUIDE_RADIUS,
            guide_height: DEFAULT_GUIDE_HEIGHT,
            guide_tilt_deg: DEFAULT_GUIDE_TILT_DEG,
            hazard_height: DEFAULT_HAZARD_HEIGHT,
        }
    }
}

impl SpawnerConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(invalid("capacity", "must be at least 1"));
        }
        if self.capacity > MAX_CAPACITY {
            return Err(invalid(
                "capacity",
                format!("must be at most {MAX_CAPACITY}, got {}", self.capacity),
            ));
        }
        for (field, value) in [
            ("reveal_distance", self.reveal_distance),
            ("minimal_spacing", self.minimal_spacing),
            ("hazard_ahead_distance", self.hazard_ahead_distance),
            ("guide_radius", self.guide_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("must be finite and >= 0, got {value}")));
            }
        }
        for (field, value) in [
            ("guide_height", self.guide_height),
            ("guide_tilt_deg", self.guide_tilt_deg),
            ("hazard_height", self.hazard_height),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, format!("must be finite, got {value}")));
            }
        }
        if !(0.0..=180.0).contains(&self.sharp_turn_angle_deg) {
            return Err(invalid(
                "sharp_turn_angle_deg",
                format!("must be within [0, 180], got {}", self.sharp_turn_angle_deg),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}
