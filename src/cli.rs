// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigError, ModeKind, SceneConfig};

#[derive(Parser, Debug, Clone)]
#[command(name = "cone-grid")]
#[command(about = "Animated cone grid over a floor with holes", long_about = None)]
pub struct Cli {
    /// JSON scene configuration; missing fields use the stock scene
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Animation mode, overrides the config file
    #[arg(long, value_enum)]
    pub mode: Option<ModeKind>,

    /// Grid columns, overrides the config file
    #[arg(long, allow_negative_numbers = true)]
    pub columns: Option<i64>,

    /// Grid rows, overrides the config file
    #[arg(long, allow_negative_numbers = true)]
    pub rows: Option<i64>,

    /// Run the simulation without opening a window
    #[arg(long)]
    pub headless: bool,

    /// Fixed 60 Hz steps to simulate in headless mode
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Hide the control panel
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied
    pub fn scene_config(&self) -> Result<SceneConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::load(path)?,
            None => SceneConfig::default(),
        };

        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(columns) = self.columns {
            config.grid.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.grid.rows = rows;
        }

        Ok(config)
    }
}
