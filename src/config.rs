// config.rs - Scene configuration, loading and validation
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::GridSpec;
use crate::math::hex_to_rgb;
use crate::tween::Easing;
use crate::wave::WaveState;

/// Configuration problems are fatal: nothing is built from an invalid config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-negative, got {columns} columns x {rows} rows")]
    NegativeDimensions { columns: i64, rows: i64 },

    #[error("grid of {columns} columns x {rows} rows has more tiles than can be addressed")]
    TooManyTiles { columns: i64, rows: i64 },

    #[error("tile spacing must be a positive finite number, got {0}")]
    InvalidSpacing(f32),

    #[error("tile radius must be a positive finite number, got {0}")]
    InvalidRadius(f32),

    #[error("tile height must be a positive finite number, got {0}")]
    InvalidTileHeight(f32),

    #[error("floor half-size must be a positive finite number, got {0}")]
    InvalidFloorSize(f32),

    #[error("stagger timing must be finite, non-negative and have durations of at least 1ms")]
    InvalidTiming,

    #[error("invalid colour {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Which of the two animation behaviours a scene runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    Wave,
    Staggered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: i64,
    pub rows: i64,
    pub spacing: f32,
    pub tile_radius: f32,
    pub tile_height: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 12,
            rows: 5,
            spacing: 1.4,
            tile_radius: 0.6,
            tile_height: 4.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    /// Half the side length of the square outer boundary
    pub half_size: f32,
    pub depth: f32,
    pub curve_segments: u32,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            half_size: 100.0,
            depth: 4.0,
            curve_segments: 32,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            intensity: 0.3,
            position: Vec3::new(0.0, 1.0, 0.0),
            target: Vec3::new(-50.0, -82.0, -24.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub max_polar_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 25.0,
            near: 1.0,
            far: 1000.0,
            position: Vec3::new(-30.0, 30.0, 30.0),
            max_polar_degrees: 50.0,
        }
    }
}

/// Shortest accepted rise or fall, in seconds
pub const MIN_LEG_DURATION: f32 = 1e-3;

/// Timing of the staggered rise/fall cycle, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerTiming {
    pub stagger: f32,
    pub rise_duration: f32,
    pub fall_duration: f32,
    pub rise_easing: Easing,
    pub fall_easing: Easing,
}

impl Default for StaggerTiming {
    fn default() -> Self {
        Self {
            stagger: 0.03,
            rise_duration: 0.5,
            fall_duration: 0.8,
            rise_easing: Easing::ExpoOut,
            fall_easing: Easing::ElasticOut {
                amplitude: 2.0,
                period: 2.0,
            },
        }
    }
}

impl StaggerTiming {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [self.stagger, self.rise_duration, self.fall_duration]
            .iter()
            .all(|v| v.is_finite());
        if !finite
            || self.stagger < 0.0
            || self.rise_duration < MIN_LEG_DURATION
            || self.fall_duration < MIN_LEG_DURATION
        {
            return Err(ConfigError::InvalidTiming);
        }
        Ok(())
    }
}

/// Full scene configuration; every field falls back to the stock scene
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub grid: GridConfig,
    pub floor: FloorConfig,
    pub color: String,
    pub light: LightConfig,
    pub camera: CameraConfig,
    pub mode: ModeKind,
    pub wave: WaveState,
    pub timing: StaggerTiming,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            floor: FloorConfig::default(),
            color: "#fed244".to_string(),
            light: LightConfig::default(),
            camera: CameraConfig::default(),
            mode: ModeKind::Staggered,
            wave: WaveState::default(),
            timing: StaggerTiming::default(),
        }
    }
}

impl SceneConfig {
    /// Read a JSON config file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validated grid description
    pub fn grid_spec(&self) -> Result<GridSpec, ConfigError> {
        GridSpec::new(
            self.grid.columns,
            self.grid.rows,
            self.grid.spacing,
            self.grid.tile_radius,
        )
    }

    /// Material colour as linear RGB
    pub fn color_rgb(&self) -> Result<[f32; 3], ConfigError> {
        hex_to_rgb(&self.color).ok_or_else(|| ConfigError::InvalidColor(self.color.clone()))
    }

    /// Checks everything a scene build depends on
    pub fn validate(&self) -> Result<GridSpec, ConfigError> {
        let spec = self.grid_spec()?;

        if !(self.grid.tile_height.is_finite() && self.grid.tile_height > 0.0) {
            return Err(ConfigError::InvalidTileHeight(self.grid.tile_height));
        }
        if !(self.floor.half_size.is_finite() && self.floor.half_size > 0.0) {
            return Err(ConfigError::InvalidFloorSize(self.floor.half_size));
        }
        self.color_rgb()?;
        self.timing.validate()?;

        Ok(spec)
    }
}
