//! Debugging feature flags.

pub struct LogFlags {
    /// Log every value that failed to parse, not just the per-field totals.
    pub log_conversion_failures: bool,

    /// Activate trace_time macro (for scope-level timing of load/normalize/render)
    pub log_performance: bool,

    /// Log each figure as it is saved.
    pub log_figures: bool,

    /// Per-snapshot LP widths when the matrix is ragged.
    pub log_lp_widths: bool,
}

pub const DF: LogFlags = LogFlags {
    log_figures: true,
    log_lp_widths: true,

    log_conversion_failures: false,
    log_performance: false,
};
