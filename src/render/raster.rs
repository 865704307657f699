// raster.rs - CPU rendering of the floor, its holes, the cones and their shadows
use glam::{Mat4, Vec2, Vec3};

use super::canvas::{Canvas, DrawOp};
use crate::camera::{pixel_ray, OrbitCamera};
use crate::light::LightRig;
use crate::math::rgb_to_u8;
use crate::scene::Scene;

/// Discs stacked from base to tip per cone
const CONE_SLICES: u32 = 24;
const SHADOW_FACTOR: f32 = 0.72;
/// Samples down each hole wall, from the floor surface to the slab bottom
const WALL_SAMPLES: u32 = 8;

/// Camera plus the group transform the scene pose puts tiles and floor in
struct View<'a> {
    camera: &'a OrbitCamera,
    model: Mat4,
    inverse: Mat4,
    unproject: Mat4,
    eye: Vec3,
    width: u32,
    height: u32,
    focal: f32,
}

impl<'a> View<'a> {
    fn new(camera: &'a OrbitCamera, model: Mat4, width: u32, height: u32) -> Self {
        Self {
            camera,
            model,
            inverse: model.inverse(),
            unproject: camera.view_projection().inverse(),
            eye: camera.position(),
            width,
            height,
            focal: height as f32 * 0.5 / (camera.fov_y() * 0.5).tan(),
        }
    }
}

/// Capsule on the floor covered by one tile's shadow, in group space
struct Shadow {
    from: Vec2,
    to: Vec2,
    radius: f32,
}

impl Shadow {
    fn covers(&self, point: Vec2) -> bool {
        let span = self.to - self.from;
        let length_sq = span.length_squared();
        let t = if length_sq > 0.0 {
            ((point - self.from).dot(span) / length_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        point.distance_squared(self.from + span * t) <= self.radius * self.radius
    }
}

/// Render one frame of `scene` into `canvas`
pub fn draw_scene(scene: &Scene, canvas: &mut Canvas) {
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    canvas.execute(&DrawOp::Clear(rgb_to_u8(scene.color())));

    let view = View::new(&scene.rig().camera, scene.rig().pose().model_matrix(), width, height);
    draw_floor(scene, &view, canvas);
    draw_hole_walls(scene, &view, canvas);
    draw_tiles(scene, &view, canvas);
}

fn shadows(scene: &Scene, view: &View) -> Vec<Shadow> {
    let local_light = view.inverse.transform_vector3(scene.light().direction());
    let radius = scene.spec().tile_radius;

    scene
        .tiles()
        .iter()
        .filter(|tile| tile.shadow_visible)
        .filter_map(|tile| {
            let half = (tile.raised_height - tile.rest_height) * 0.5;
            let tip = tile.height + half;
            if tip <= 0.0 {
                return None;
            }
            let offset = LightRig::shadow_offset(local_light, tip)?;
            let from = Vec2::new(tile.position.x, tile.position.z);
            Some(Shadow {
                from,
                to: from + offset,
                radius,
            })
        })
        .collect()
}

/// Ray-cast every pixel against the floor plane `y = 0` in group space
fn draw_floor(scene: &Scene, view: &View, canvas: &mut Canvas) {
    let outline = scene.outline();
    let normal = view.model.transform_vector3(Vec3::Y).normalize_or_zero();
    let lit = rgb_to_u8(scene.light().shade(scene.color(), normal));
    let shadows = shadows(scene, view);

    for py in 0..view.height {
        for px in 0..view.width {
            let (origin, direction) =
                pixel_ray(&view.unproject, view.eye, px as f32, py as f32, view.width, view.height);
            let origin = view.inverse.transform_point3(origin);
            let direction = view.inverse.transform_vector3(direction);

            if direction.y.abs() < 1e-6 {
                continue;
            }
            let t = -origin.y / direction.y;
            if t <= 0.0 {
                continue;
            }

            let hit = origin + direction * t;
            let point = Vec2::new(hit.x, hit.z);
            if !outline.contains(point) {
                continue;
            }

            let (x, y) = (px as i32, py as i32);
            canvas.execute(&DrawOp::Pixel { x, y, depth: t, rgb: lit });
            if shadows.iter().any(|shadow| shadow.covers(point)) {
                canvas.execute(&DrawOp::Darken { x, y, factor: SHADOW_FACTOR });
            }
        }
    }
}

/// Inner walls of the floor slab, seen through each hole
fn draw_hole_walls(scene: &Scene, view: &View, canvas: &mut Canvas) {
    let floor = scene.floor();
    let color = scene.color();

    for hole in &scene.outline().holes {
        for rim in hole.points(floor.curve_segments) {
            let inward = (hole.center - rim).normalize_or_zero();
            let normal = view.model.transform_vector3(Vec3::new(inward.x, 0.0, inward.y));
            let rgb = rgb_to_u8(scene.light().shade(color, normal));

            for sample in 0..=WALL_SAMPLES {
                let y = -floor.depth * sample as f32 / WALL_SAMPLES as f32;
                let world = view.model.transform_point3(Vec3::new(rim.x, y, rim.y));
                let Some(screen) = view.camera.project(world, view.width, view.height) else {
                    continue;
                };
                canvas.execute(&DrawOp::Pixel {
                    x: screen.x as i32,
                    y: screen.y as i32,
                    depth: (world - view.eye).length(),
                    rgb,
                });
            }
        }
    }
}

/// Cones as stacked depth-tested discs, shaded on the side facing the camera
fn draw_tiles(scene: &Scene, view: &View, canvas: &mut Canvas) {
    let radius = scene.spec().tile_radius;
    let color = scene.color();
    let local_eye = view.inverse.transform_point3(view.eye);

    for tile in scene.tiles().iter() {
        let tile_height = tile.raised_height - tile.rest_height;
        let base = tile.height - tile_height * 0.5;
        let centre = Vec3::new(tile.position.x, 0.0, tile.position.z);

        let facing = Vec2::new(local_eye.x - centre.x, local_eye.z - centre.z).normalize_or_zero();
        let side = Vec3::new(facing.x * tile_height, radius, facing.y * tile_height).normalize_or_zero();
        let normal = view.model.transform_vector3(side).normalize_or_zero();
        let rgb = rgb_to_u8(scene.light().shade(color, normal));

        for slice in 0..CONE_SLICES {
            let f = (slice as f32 + 0.5) / CONE_SLICES as f32;
            let slice_radius = radius * (1.0 - f);
            let local = Vec3::new(centre.x, base + f * tile_height, centre.z);
            let world = view.model.transform_point3(local);

            let Some(screen) = view.camera.project(world, view.width, view.height) else {
                continue;
            };
            let distance = (world - view.eye).length();

            canvas.execute(&DrawOp::FilledCircle {
                cx: screen.x,
                cy: screen.y,
                radius: slice_radius * view.focal / distance,
                depth: distance - slice_radius,
                rgb,
            });
        }
    }
}
