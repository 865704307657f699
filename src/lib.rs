pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod layout;
pub mod light;
pub mod math;
pub mod render;
pub mod scene;
pub mod sequencer;
pub mod tile_grid;
pub mod tween;
pub mod types;
pub mod ui;
pub mod wave;

pub use config::{ConfigError, ModeKind, SceneConfig};
pub use scene::{AnimationMode, PanelChange, Scene};
