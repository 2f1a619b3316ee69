// Top Level Constants

/// Fixed-point conventions of the recorded simulation data.
pub struct FixedPointConfig {
    /// Every on-chain amount is an integer scaled by 10^decimals ("Wei" for 18).
    pub decimals: u32,
    /// Literal some recorders write instead of a JSON null for "no value".
    pub null_literal: &'static str,
    /// Largest decimal exponent (either sign) a converted value may carry. Anything
    /// beyond is rejected as out of range; "1e100000000" would otherwise expand into
    /// a hundred million digits as soon as it is added to another value.
    pub max_exponent: u64,
}

pub const FIXED_POINT: FixedPointConfig = FixedPointConfig {
    decimals: 18,
    null_literal: "null",
    max_exponent: 10_000,
};

/// Required top-level fields of the simulation document, in the order they are reported.
pub mod fields {
    pub const TIMESTAMPS: &str = "timestamps";
    pub const RESERVE_RATIOS: &str = "reserveRatios";
    pub const SPOT_PRICES_A: &str = "spotPricesA";
    pub const SPOT_PRICES_B: &str = "spotPricesB";
    pub const TVL_A: &str = "totalValuesLockedA";
    pub const TVL_B: &str = "totalValuesLockedB";
    pub const SWAP_VOLUME_A: &str = "cumulativeSwapVolumeA";
    pub const SWAP_VOLUME_B: &str = "cumulativeSwapVolumeB";
    pub const SLIPPAGES: &str = "slippages";
    pub const FEES_A: &str = "cumulativeFeesA";
    pub const FEES_B: &str = "cumulativeFeesB";
    pub const LP_SNAPSHOTS: &str = "lpDistributionSnapshots";

    /// Fields that must always be present. The spot price pair is checked separately
    /// because either side is enough.
    pub const REQUIRED: &[&str] = &[
        TIMESTAMPS,
        RESERVE_RATIOS,
        TVL_A,
        TVL_B,
        SWAP_VOLUME_A,
        SWAP_VOLUME_B,
        SLIPPAGES,
        FEES_A,
        FEES_B,
        LP_SNAPSHOTS,
    ];
}
