//! Configuration module for the DEX simulation chart renderer.

// Can all be private now because we have a public re-export.
mod debug;
mod persistence;

// Public
pub mod constants;

// Can't be private because we don't re-export it
pub mod plot;

// Re-export commonly used items
pub use constants::{FIXED_POINT, FixedPointConfig};
pub use debug::DF;
pub use persistence::{PERSISTENCE, individual_chart_filename};
