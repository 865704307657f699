use glam::{Vec2, Vec3};

use crate::config::LightConfig;

/// GUI limit for each axis of the light target
pub const TARGET_RANGE: f32 = 100.0;
const AMBIENT_LEVEL: f32 = 0.75;

/// Ambient light tinted by the material colour plus one directional light
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub ambient: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
    target: Vec3,
}

impl LightRig {
    pub fn new(config: &LightConfig, ambient: [f32; 3]) -> Self {
        let mut rig = Self {
            ambient,
            intensity: config.intensity,
            position: config.position,
            target: Vec3::ZERO,
        };
        rig.set_target(config.target);
        rig
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target.clamp(Vec3::splat(-TARGET_RANGE), Vec3::splat(TARGET_RANGE));
    }

    /// Unit vector the light travels along
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Lambert shading of `base` for a surface facing `normal` (world space)
    pub fn shade(&self, base: [f32; 3], normal: Vec3) -> [f32; 3] {
        let lambert = normal.dot(-self.direction()).max(0.0);
        let direct = self.intensity * lambert;
        [
            (base[0] * (self.ambient[0] * AMBIENT_LEVEL + direct)).min(1.0),
            (base[1] * (self.ambient[1] * AMBIENT_LEVEL + direct)).min(1.0),
            (base[2] * (self.ambient[2] * AMBIENT_LEVEL + direct)).min(1.0),
        ]
    }

    /// Horizontal displacement of the shadow cast by a point `height` above
    /// the floor, for a light direction `local` expressed in floor space
    pub fn shadow_offset(local: Vec3, height: f32) -> Option<Vec2> {
        if local.y.abs() < 1e-4 {
            return None;
        }
        let travel = -height / local.y;
        if travel < 0.0 {
            return None;
        }
        Some(Vec2::new(local.x, local.z) * travel)
    }
}
