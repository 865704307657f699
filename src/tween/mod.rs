//! Timed interpolations sampled once per frame tick.
//!
//! Tasks are anchored to absolute scheduler time, so a tween chained off
//! another tween's completion starts exactly where the first one ended no
//! matter how coarse the frame steps are.
mod easing;
mod tweener;

pub use easing::Easing;
pub use tweener::{TweenEvent, TweenId, TweenSpec, Tweener};
