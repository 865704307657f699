mod grid;
mod shape;

pub use grid::{position, GridSpec, TilePosition};
pub use shape::{HolePath, ShapeOutline};
