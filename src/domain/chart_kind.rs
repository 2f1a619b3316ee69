use strum_macros::{Display, EnumIter};

/// The fixed set of diagnostic charts, in overview-grid order (row-major, 3x2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ChartKind {
    #[strum(to_string = "Token Reserves Over Time")]
    Reserves,
    #[strum(to_string = "Reserve Ratio / Spot Price")]
    RatioPrice,
    #[strum(to_string = "Cumulative Swap Volume (Tokens Swapped IN)")]
    Volume,
    #[strum(to_string = "Slippage per Swap Transaction")]
    Slippage,
    #[strum(to_string = "Cumulative Fee Accumulation")]
    Fees,
    #[strum(to_string = "LP Token Distribution Over Time")]
    LpDistribution,
}

impl ChartKind {
    /// Output filename without extension
    pub fn file_stem(&self) -> &'static str {
        match self {
            ChartKind::Reserves => "reserves",
            ChartKind::RatioPrice => "reserve_ratio_spot_price",
            ChartKind::Volume => "swap_volume",
            ChartKind::Slippage => "slippage",
            ChartKind::Fees => "fee_accumulation",
            ChartKind::LpDistribution => "lp_distribution",
        }
    }

    pub fn x_label(&self) -> &'static str {
        match self {
            ChartKind::Slippage => "Transaction Index of Swap",
            _ => "Transaction Index",
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            ChartKind::Reserves => "Reserve Amount",
            ChartKind::RatioPrice => "Ratio / Price (B per A)",
            ChartKind::Volume => "Cumulative Volume",
            ChartKind::Slippage => "Slippage (%)",
            ChartKind::Fees => "Cumulative Fees",
            ChartKind::LpDistribution => "LP Token Holdings",
        }
    }

    /// Message shown instead of data when the chart cannot be drawn
    pub fn placeholder_text(&self) -> &'static str {
        match self {
            ChartKind::Slippage => "No valid slippage data recorded",
            ChartKind::LpDistribution => "LP Distribution data not available or inconsistent",
            _ => "Series length does not match the transaction axis",
        }
    }
}
