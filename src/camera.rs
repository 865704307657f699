use glam::{Mat4, Vec3, Vec4};

use crate::config::CameraConfig;
use crate::math::radians;
use crate::sequencer::{CycleHook, SequencerState};

pub const ORBIT_SENSITIVITY: f32 = 0.005;
const MIN_POLAR: f32 = 0.01;

/// Perspective camera orbiting a target, polar angle measured from +Y
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    target: Vec3,
    radius: f32,
    azimuth: f32,
    polar: f32,
    max_polar: f32,
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl OrbitCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self {
            target: Vec3::ZERO,
            radius: 1.0,
            azimuth: 0.0,
            polar: 0.0,
            max_polar: config.max_polar_degrees.to_radians(),
            fov_y: config.fov_degrees.to_radians(),
            aspect,
            near: config.near,
            far: config.far,
        };
        camera.set_position(config.position);
        camera
    }

    pub fn position(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.target + self.radius * Vec3::new(sin_polar * sin_az, cos_polar, sin_polar * cos_az)
    }

    /// Place the camera without applying the orbit limits
    pub fn set_position(&mut self, position: Vec3) {
        let offset = position - self.target;
        self.radius = offset.length().max(f32::EPSILON);
        self.polar = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
        self.azimuth = offset.x.atan2(offset.z);
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Re-aim at `target`, keeping the camera where it is
    pub fn look_at(&mut self, target: Vec3) {
        let position = self.position();
        self.target = target;
        self.set_position(position);
    }

    /// Orbit drag; the polar angle stays inside the orbit limit
    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        self.azimuth += delta_azimuth;
        self.polar = (self.polar + delta_polar).clamp(MIN_POLAR, self.max_polar.max(MIN_POLAR));
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World point to pixel coordinates plus NDC depth; `None` behind the camera
    pub fn project(&self, point: Vec3, width: u32, height: u32) -> Option<Vec3> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= self.near * 0.5 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec3::new(
            (ndc.x * 0.5 + 0.5) * width as f32,
            (0.5 - ndc.y * 0.5) * height as f32,
            ndc.z,
        ))
    }

    /// Ray through the centre of pixel (px, py) as (origin, unit direction)
    pub fn ray(&self, px: f32, py: f32, width: u32, height: u32) -> (Vec3, Vec3) {
        pixel_ray(&self.view_projection().inverse(), self.position(), px, py, width, height)
    }
}

/// Pixel ray for a precomputed inverse view-projection, so per-pixel loops
/// invert the matrix once per frame
pub fn pixel_ray(inverse: &Mat4, eye: Vec3, px: f32, py: f32, width: u32, height: u32) -> (Vec3, Vec3) {
    let ndc_x = (px + 0.5) / width as f32 * 2.0 - 1.0;
    let ndc_y = 1.0 - (py + 0.5) / height as f32 * 2.0;

    let near = *inverse * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
    let far = *inverse * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let near = near.truncate() / near.w;
    let far = far.truncate() / far.w;

    (eye, (far - near).normalize_or_zero())
}

/// Placement of the tile group and floor inside the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePose {
    pub group_position: Vec3,
    pub group_yaw: f32,
    pub scene_rotation_x: f32,
}

impl ScenePose {
    pub fn rest() -> Self {
        Self {
            group_position: Vec3::new(-6.0, 0.0, 4.0),
            group_yaw: radians(-90.0),
            scene_rotation_x: 0.0,
        }
    }

    pub fn flipped() -> Self {
        Self {
            group_position: Vec3::new(-4.0, 0.0, 12.0),
            group_yaw: radians(-90.0),
            scene_rotation_x: radians(-180.0),
        }
    }

    /// Group-local space to world space
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.scene_rotation_x)
            * Mat4::from_translation(self.group_position)
            * Mat4::from_rotation_y(self.group_yaw)
    }

    pub fn approx_eq(&self, other: &ScenePose, epsilon: f32) -> bool {
        self.group_position.abs_diff_eq(other.group_position, epsilon)
            && (self.group_yaw - other.group_yaw).abs() <= epsilon
            && (self.scene_rotation_x - other.scene_rotation_x).abs() <= epsilon
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigState {
    pub flipped: bool,
    pub pose: ScenePose,
}

impl Default for RigState {
    fn default() -> Self {
        Self {
            flipped: false,
            pose: ScenePose::rest(),
        }
    }
}

/// Toggles between two fixed scene orientations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFlipController {
    rest: ScenePose,
    flipped: ScenePose,
}

impl CameraFlipController {
    pub fn new(rest: ScenePose, flipped: ScenePose) -> Self {
        Self { rest, flipped }
    }

    /// Pure in the flag: flipping twice returns the starting pose
    pub fn flip(&self, state: RigState) -> RigState {
        let flipped = !state.flipped;
        RigState {
            flipped,
            pose: if flipped { self.flipped } else { self.rest },
        }
    }
}

impl Default for CameraFlipController {
    fn default() -> Self {
        Self::new(ScenePose::rest(), ScenePose::flipped())
    }
}

/// Camera plus current scene orientation; receives the end-of-cycle flip
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub camera: OrbitCamera,
    controller: CameraFlipController,
    state: RigState,
}

impl CameraRig {
    pub fn new(camera: OrbitCamera, controller: CameraFlipController) -> Self {
        Self {
            camera,
            controller,
            state: RigState::default(),
        }
    }

    pub fn state(&self) -> &RigState {
        &self.state
    }

    pub fn pose(&self) -> &ScenePose {
        &self.state.pose
    }

    pub fn flip(&mut self) -> bool {
        self.state = self.controller.flip(self.state);
        // The scene itself never moves, only the group inside it
        self.camera.look_at(Vec3::ZERO);
        self.state.flipped
    }
}

impl CycleHook for CameraRig {
    fn cycle_complete(&mut self, _state: &SequencerState) -> bool {
        self.flip()
    }
}
