mod simulation_file;

pub use simulation_file::{
    LoadError, PriceQuote, SimulationDocument, SpotPriceField, load_simulation_document, raw_text,
};
