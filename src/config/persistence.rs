//! File locations for the input document and rendered charts

/// Where the simulation document is read from
pub struct InputConfig {
    /// Default path of the recorded simulation document
    pub simulation_path: &'static str,
}

/// Where rendered charts are written to
pub struct OutputConfig {
    /// Directory for all rendered charts (created on demand)
    pub directory: &'static str,
    /// Filename of the 3x2 overview figure
    pub combined_filename: &'static str,
    /// Extension for every rendered chart (must match the bitmap encoder)
    pub extension: &'static str,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    input: InputConfig {
        simulation_path: "simulation_data.json",
    },
    output: OutputConfig {
        directory: "dex_plots",
        combined_filename: "dex_simulation_combined.png",
        extension: "png",
    },
};

/// Generate the filename of a single chart from its stem
/// Example: "slippage" -> "slippage.png"
pub fn individual_chart_filename(stem: &str) -> String {
    format!("{}.{}", stem, PERSISTENCE.output.extension)
}
