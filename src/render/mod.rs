pub mod canvas;
pub mod raster;
pub mod viewer;

pub use canvas::{Canvas, DrawOp};
pub use raster::draw_scene;
pub use viewer::Viewer;
