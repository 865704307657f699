// scene.rs - Scene assembly and per-tick dispatch on the animation mode
use glam::Vec3;
use log::{debug, info};

use crate::camera::{CameraFlipController, CameraRig, OrbitCamera};
use crate::config::{ConfigError, FloorConfig, ModeKind, SceneConfig};
use crate::layout::{GridSpec, ShapeOutline};
use crate::light::LightRig;
use crate::sequencer::{CycleReport, Sequencer};
use crate::tile_grid::TileGrid;
use crate::wave::{self, WaveState};

/// The two mutually exclusive ways tiles move, chosen once per scene
#[derive(Debug, Clone)]
pub enum AnimationMode {
    Wave(WaveState),
    Staggered(Sequencer),
}

impl AnimationMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            AnimationMode::Wave(_) => ModeKind::Wave,
            AnimationMode::Staggered(_) => ModeKind::Staggered,
        }
    }
}

/// Live edit coming from the control panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelChange {
    Amplitude(f32),
    Wavelength(f32),
    Frequency(f32),
    Color([f32; 3]),
    LightTarget(Vec3),
}

#[derive(Debug, Clone)]
pub struct Scene {
    spec: GridSpec,
    tiles: TileGrid,
    outline: ShapeOutline,
    floor: FloorConfig,
    mode: AnimationMode,
    rig: CameraRig,
    light: LightRig,
    color: [f32; 3],
    ticks: u64,
    cycles: u64,
}

impl Scene {
    /// Validates `config` and builds every scene object; nothing is built on error
    pub fn build(config: &SceneConfig, aspect: f32) -> Result<Self, ConfigError> {
        let spec = config.validate()?;
        let color = config.color_rgb()?;

        let mut tiles = TileGrid::new(spec, config.grid.tile_height)?;
        let outline = ShapeOutline::build(&spec, config.floor.half_size);

        let mode = match config.mode {
            ModeKind::Wave => AnimationMode::Wave(config.wave),
            ModeKind::Staggered => {
                let mut sequencer = Sequencer::new(config.timing)?;
                sequencer.start(&mut tiles);
                AnimationMode::Staggered(sequencer)
            }
        };

        let camera = OrbitCamera::new(&config.camera, aspect);
        let rig = CameraRig::new(camera, CameraFlipController::default());
        let light = LightRig::new(&config.light, color);

        info!(
            "Scene built: {}x{} grid, {} tiles, {} holes, {:?} mode",
            spec.columns,
            spec.rows,
            tiles.len(),
            outline.holes.len(),
            mode.kind()
        );

        Ok(Self {
            spec,
            tiles,
            outline,
            floor: config.floor.clone(),
            mode,
            rig,
            light,
            color,
            ticks: 0,
            cycles: 0,
        })
    }

    /// One simulation step of `delta` seconds
    pub fn tick(&mut self, delta: f32) -> Vec<CycleReport> {
        self.ticks += 1;
        match &mut self.mode {
            AnimationMode::Wave(state) => {
                wave::apply(state, &mut self.tiles);
                Vec::new()
            }
            AnimationMode::Staggered(sequencer) => {
                let reports = sequencer.tick(delta, &mut self.tiles, &mut self.rig);
                self.cycles += reports.len() as u64;
                reports
            }
        }
    }

    pub fn apply(&mut self, change: PanelChange) {
        match change {
            PanelChange::Color(rgb) => {
                self.color = rgb;
                self.light.ambient = rgb;
            }
            PanelChange::LightTarget(target) => self.light.set_target(target),
            PanelChange::Amplitude(_) | PanelChange::Wavelength(_) | PanelChange::Frequency(_) => {
                let AnimationMode::Wave(state) = &mut self.mode else {
                    debug!("Wave control {:?} ignored in staggered mode", change);
                    return;
                };
                match change {
                    PanelChange::Amplitude(v) => state.amplitude = v,
                    PanelChange::Wavelength(v) => state.wavelength = v,
                    PanelChange::Frequency(v) => state.frequency = v,
                    _ => {}
                }
            }
        }
    }

    /// Viewport resize hook
    pub fn resize(&mut self, width: u32, height: u32) {
        self.rig.camera.resize(width, height);
    }

    /// Cancels pending animation and releases the tiles
    pub fn teardown(&mut self) {
        let dropped = match &mut self.mode {
            AnimationMode::Staggered(sequencer) => sequencer.cancel(),
            AnimationMode::Wave(_) => 0,
        };
        self.tiles.clear();
        info!(
            "Scene torn down after {} ticks, {} cycles, {} pending legs dropped",
            self.ticks, self.cycles, dropped
        );
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    pub fn outline(&self) -> &ShapeOutline {
        &self.outline
    }

    pub fn floor(&self) -> &FloorConfig {
        &self.floor
    }

    pub fn mode(&self) -> &AnimationMode {
        &self.mode
    }

    pub fn wave_state(&self) -> Option<&WaveState> {
        match &self.mode {
            AnimationMode::Wave(state) => Some(state),
            AnimationMode::Staggered(_) => None,
        }
    }

    pub fn sequencer(&self) -> Option<&Sequencer> {
        match &self.mode {
            AnimationMode::Staggered(sequencer) => Some(sequencer),
            AnimationMode::Wave(_) => None,
        }
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    pub fn light(&self) -> &LightRig {
        &self.light
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}
