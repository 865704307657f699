mod color;
mod remap;

pub use color::{hex_to_rgb, rgb_to_u8, u8_to_rgb};
pub use remap::{distance, radians, remap};
