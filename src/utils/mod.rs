mod maths_utils;
mod perf;

pub use maths_utils::{axis_range, series_bounds, stack_layers};
