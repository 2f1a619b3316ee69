// Domain types and value objects
mod chart_kind;
mod fixed_point;
mod series;

// Re-export commonly used types to the world
pub use chart_kind::ChartKind;
pub use fixed_point::{FixedPointScale, FixedPointValue};
pub use series::{Alignment, SlippageSample, SnapshotMatrix, TimeSeries};
