use glam::Vec2;

use super::grid::{position, GridSpec};

/// Closed circular hole in the floor outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HolePath {
    /// Centre in the outline's plane, `(x, z)` of the tile footprint
    pub center: Vec2,
    pub radius: f32,
}

impl HolePath {
    /// Closed polyline approximation; the first point is repeated at the end
    pub fn points(&self, segments: u32) -> Vec<Vec2> {
        let segments = segments.max(3);
        (0..=segments)
            .map(|s| {
                let angle = s as f32 / segments as f32 * std::f32::consts::TAU;
                self.center + Vec2::new(angle.cos(), angle.sin()) * self.radius
            })
            .collect()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

/// Floor outline: square boundary plus one hole per tile, in tile order
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeOutline {
    pub boundary: Vec<Vec2>,
    pub holes: Vec<HolePath>,
}

impl ShapeOutline {
    /// Builds the outline for `spec`; holes are inserted row-major so hole `k`
    /// belongs to tile `k`
    pub fn build(spec: &GridSpec, half_size: f32) -> Self {
        let boundary = vec![
            Vec2::new(-half_size, half_size),
            Vec2::new(-half_size, -half_size),
            Vec2::new(half_size, -half_size),
            Vec2::new(half_size, half_size),
        ];

        let holes = spec
            .cells()
            .map(|(i, j)| {
                let p = position(spec, i, j, 0.0);
                HolePath {
                    center: Vec2::new(p.x, p.z),
                    radius: spec.tile_radius,
                }
            })
            .collect();

        Self { boundary, holes }
    }

    /// True when `point` lies on solid floor: inside the boundary and outside every hole
    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = self.bounds();
        let inside = point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y;
        inside && !self.holes.iter().any(|hole| hole.contains(point))
    }

    /// Axis-aligned bounds of the outer boundary
    pub fn bounds(&self) -> (Vec2, Vec2) {
        self.boundary.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        )
    }
}
