pub mod clock;
pub mod timer;

pub use clock::FrameClock;
pub use timer::{FixedStep, FpsCounter};
