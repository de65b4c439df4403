//! sm-multitrack: the Multi-Track Strategy (C3, §4.3) and the Transform
//! Pipeline (C4, §4.4) that sits between a Model's raw `calculate()` and
//! the position a track actually ends up at.

mod strategy;
mod transform;

pub use strategy::{compute_strategy, get_track_time, golden_angle_offset, StrategyResult, TransformContext};
pub use transform::apply_transform;
