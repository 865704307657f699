use crate::layout::TilePosition;

/// Which leg of the staggered cycle a tile is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    #[default]
    Resting,
    Rising,
    Falling,
}

/// One cone tile: footprint, animation bounds and live render state
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub position: TilePosition,
    pub rest_height: f32,
    pub raised_height: f32,
    /// Current vertical centre of the tile mesh
    pub height: f32,
    pub phase: AnimationPhase,
    pub shadow_visible: bool,
}

impl Tile {
    pub fn new(position: TilePosition, rest_height: f32, raised_height: f32) -> Self {
        Self {
            position,
            rest_height,
            raised_height,
            height: rest_height,
            phase: AnimationPhase::Resting,
            shadow_visible: false,
        }
    }
}

