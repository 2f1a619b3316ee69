// Fixed-point normalization, dataset construction and run summaries
pub mod dataset;
pub mod normalizer;
pub mod summary;

pub use dataset::{FieldReport, SimulationDataset, SpotPriceSeries};
pub use normalizer::{
    ConversionError, align_series, to_decimal, to_optional_decimal, try_to_decimal,
};
pub use summary::SimulationSummary;
