//! End-of-simulation snapshot: final reserves, totals and LP ownership.

use bigdecimal::{BigDecimal, Zero};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::analysis::SimulationDataset;
use crate::domain::{FixedPointValue, TimeSeries};

const NOT_AVAILABLE: &str = "n/a";
const MEAN_DIGITS: i64 = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct LpBalanceRow {
    #[tabled(rename = "LP")]
    pub lp: String,
    #[tabled(rename = "Balance")]
    pub balance: String,
    #[tabled(rename = "Share")]
    pub share: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub metrics: Vec<SummaryRow>,
    /// Empty when the LP snapshots are missing or ragged
    pub lp_balances: Vec<LpBalanceRow>,
}

impl SimulationSummary {
    pub fn from_dataset(ds: &SimulationDataset) -> Self {
        let mut metrics = Vec::new();
        let mut push = |metric: &str, value: String| {
            metrics.push(SummaryRow {
                metric: metric.to_string(),
                value,
            })
        };

        push("Transactions", ds.n.to_string());
        push("Final Reserve A", final_value(&ds.reserves_a));
        push("Final Reserve B", final_value(&ds.reserves_b));
        push("Final Reserve Ratio (B per A)", final_value(&ds.reserve_ratios));
        push(
            &format!("Final {}", ds.spot_prices.quote.label()),
            final_value(&ds.spot_prices.series),
        );
        push("Cumulative Volume A IN", final_value(&ds.volume_a));
        push("Cumulative Volume B IN", final_value(&ds.volume_b));
        push("Cumulative Fees A", final_value(&ds.fees_a));
        push("Cumulative Fees B", final_value(&ds.fees_b));

        push("Swaps With Slippage", ds.slippages.len().to_string());
        let slippages: Vec<&BigDecimal> = ds.slippages.iter().map(|s| s.value.as_decimal()).collect();
        push("Mean Slippage (%)", mean(&slippages));
        push(
            "Max Slippage (%)",
            slippages
                .iter()
                .max()
                .map(|v| v.normalized().to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        );
        push("Unparseable Values", ds.conversion_failures().to_string());

        Self {
            metrics,
            lp_balances: lp_balances(ds),
        }
    }

    /// Both tables as printable text.
    pub fn render_tables(&self) -> String {
        let mut out = Table::new(&self.metrics).with(Style::rounded()).to_string();
        if !self.lp_balances.is_empty() {
            out.push('\n');
            out.push_str(&Table::new(&self.lp_balances).with(Style::rounded()).to_string());
        }
        out
    }
}

fn final_value(series: &TimeSeries<FixedPointValue>) -> String {
    series
        .last()
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn mean(values: &[&BigDecimal]) -> String {
    if values.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    let sum = values.iter().fold(BigDecimal::zero(), |acc, v| acc + *v);
    let mean = sum / BigDecimal::from(values.len() as u64);
    mean.round(MEAN_DIGITS).normalized().to_string()
}

fn lp_balances(ds: &SimulationDataset) -> Vec<LpBalanceRow> {
    let lp = &ds.lp_distribution;
    let Some(last) = lp.last_row().filter(|_| lp.is_aligned()) else {
        return Vec::new();
    };

    let total = last
        .iter()
        .fold(BigDecimal::zero(), |acc, v| acc + v.as_decimal());

    last.iter()
        .enumerate()
        .map(|(i, balance)| {
            let share = if total.is_zero() {
                NOT_AVAILABLE.to_string()
            } else {
                let pct = balance.as_decimal().clone() * BigDecimal::from(100) / total.clone();
                format!("{:.2}%", FixedPointValue::from_decimal(pct).to_f64())
            };
            LpBalanceRow {
                lp: format!("User {}", i + 1),
                balance: balance.to_string(),
                share,
            }
        })
        .collect()
}
