//! Turns the raw simulation document into aligned, exact time series.

use serde_json::Value;

use crate::analysis::normalizer::try_to_decimal;
use crate::config::DF;
use crate::config::constants::fields;
use crate::data::{PriceQuote, SimulationDocument, raw_text};
use crate::domain::{
    ChartKind, FixedPointScale, FixedPointValue, SlippageSample, SnapshotMatrix, TimeSeries,
};

/// Conversion bookkeeping for one document field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    pub field: &'static str,
    /// Number of raw elements
    pub len: usize,
    /// Elements that were null (or the literal "null")
    pub absent: usize,
    /// Elements that failed to parse and were substituted
    pub failures: usize,
}

impl FieldReport {
    fn new(field: &'static str) -> Self {
        Self {
            field,
            len: 0,
            absent: 0,
            failures: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpotPriceSeries {
    pub quote: PriceQuote,
    pub series: TimeSeries<FixedPointValue>,
}

// ============================================================================
// SimulationDataset: every chartable quantity, normalized once per run
// ============================================================================

#[derive(Debug, Clone)]
pub struct SimulationDataset {
    /// Length of the transaction axis (number of timestamps)
    pub n: usize,
    pub scale: FixedPointScale,

    pub reserves_a: TimeSeries<FixedPointValue>,
    pub reserves_b: TimeSeries<FixedPointValue>,
    pub reserve_ratios: TimeSeries<FixedPointValue>,
    pub spot_prices: SpotPriceSeries,

    pub volume_a: TimeSeries<FixedPointValue>,
    pub volume_b: TimeSeries<FixedPointValue>,
    pub fees_a: TimeSeries<FixedPointValue>,
    pub fees_b: TimeSeries<FixedPointValue>,

    /// Only swaps that recorded a slippage, at their original transaction index
    pub slippages: Vec<SlippageSample>,
    pub lp_distribution: SnapshotMatrix,

    pub conversion: Vec<FieldReport>,
}

impl SimulationDataset {
    pub fn from_document(doc: &SimulationDocument, scale: FixedPointScale) -> Self {
        log::info!("Processing data...");
        let mut conversion = Vec::new();

        let mut series = |field: &'static str, raw: &[Value]| {
            let (series, report) = convert_series(field, raw, scale);
            conversion.push(report);
            series
        };

        let reserves_a = series(fields::TVL_A, &doc.total_values_locked_a);
        let reserves_b = series(fields::TVL_B, &doc.total_values_locked_b);
        let reserve_ratios = series(fields::RESERVE_RATIOS, &doc.reserve_ratios);
        let spot_prices = SpotPriceSeries {
            quote: doc.spot_prices.quote,
            series: series(doc.spot_prices.quote.field(), &doc.spot_prices.values),
        };
        let volume_a = series(fields::SWAP_VOLUME_A, &doc.cumulative_swap_volume_a);
        let volume_b = series(fields::SWAP_VOLUME_B, &doc.cumulative_swap_volume_b);
        let fees_a = series(fields::FEES_A, &doc.cumulative_fees_a);
        let fees_b = series(fields::FEES_B, &doc.cumulative_fees_b);

        let (slippages, slippage_report) = convert_slippages(&doc.slippages, scale);
        conversion.push(slippage_report);

        let (lp_distribution, lp_report) = convert_snapshots(&doc.lp_distribution_snapshots, scale);
        conversion.push(lp_report);

        let dataset = Self {
            n: doc.transaction_count(),
            scale,
            reserves_a,
            reserves_b,
            reserve_ratios,
            spot_prices,
            volume_a,
            volume_b,
            fees_a,
            fees_b,
            slippages,
            lp_distribution,
            conversion,
        };

        dataset.log_conversion_report();
        dataset.log_alignment_report();
        log::info!("Data processed successfully.");
        dataset
    }

    /// True iff every given series has exactly one entry per transaction.
    pub fn series_aligned(&self, series: &[&TimeSeries<FixedPointValue>]) -> bool {
        series.iter().all(|s| s.is_aligned_to(self.n))
    }

    /// The LP chart needs a rectangular matrix with at least one LP and one row per
    /// transaction.
    pub fn lp_renderable(&self) -> bool {
        let lp = &self.lp_distribution;
        lp.is_aligned() && lp.width() > 0 && lp.snapshot_count() == self.n
    }

    /// Whether `kind` has data to draw; otherwise its chart shows a placeholder.
    pub fn chart_ready(&self, kind: ChartKind) -> bool {
        let lines = |series: &[&TimeSeries<FixedPointValue>]| {
            self.n > 0 && self.series_aligned(series)
        };
        match kind {
            ChartKind::Reserves => lines(&[&self.reserves_a, &self.reserves_b]),
            ChartKind::RatioPrice => lines(&[&self.reserve_ratios]),
            ChartKind::Volume => lines(&[&self.volume_a, &self.volume_b]),
            ChartKind::Fees => lines(&[&self.fees_a, &self.fees_b]),
            ChartKind::Slippage => !self.slippages.is_empty(),
            ChartKind::LpDistribution => self.lp_renderable(),
        }
    }

    /// Names of the per-transaction fields whose length differs from the time axis.
    pub fn misaligned_fields(&self) -> Vec<&'static str> {
        [
            (fields::TVL_A, &self.reserves_a),
            (fields::TVL_B, &self.reserves_b),
            (fields::RESERVE_RATIOS, &self.reserve_ratios),
            (self.spot_prices.quote.field(), &self.spot_prices.series),
            (fields::SWAP_VOLUME_A, &self.volume_a),
            (fields::SWAP_VOLUME_B, &self.volume_b),
            (fields::FEES_A, &self.fees_a),
            (fields::FEES_B, &self.fees_b),
        ]
        .into_iter()
        .filter(|(_, series)| !series.is_aligned_to(self.n))
        .map(|(field, _)| field)
        .collect()
    }

    pub fn conversion_failures(&self) -> usize {
        self.conversion.iter().map(|r| r.failures).sum()
    }

    fn log_conversion_report(&self) {
        for report in self.conversion.iter().filter(|r| r.failures > 0) {
            log::warn!(
                "{}: {} of {} values could not be parsed and were substituted",
                report.field,
                report.failures,
                report.len
            );
        }
    }

    fn log_alignment_report(&self) {
        for field in self.misaligned_fields() {
            log::warn!(
                "{} does not match the {} transactions in '{}'; its chart will show a placeholder",
                field,
                self.n,
                fields::TIMESTAMPS
            );
        }

        let lp = &self.lp_distribution;
        if lp.snapshot_count() == 0 {
            log::info!("LP distribution data is empty.");
        } else if !lp.is_aligned() {
            log::warn!(
                "LP distribution snapshots have inconsistent widths; treating as 0 users"
            );
            if DF.log_lp_widths {
                let widths: Vec<usize> = lp.rows().iter().map(Vec::len).collect();
                log::warn!("LP snapshot widths: {:?}", widths);
            }
        } else {
            log::info!(
                "Processed LP distribution data for {} users across {} snapshots.",
                lp.width(),
                lp.snapshot_count()
            );
            if lp.snapshot_count() != self.n {
                log::warn!(
                    "{} LP snapshots recorded for {} transactions",
                    lp.snapshot_count(),
                    self.n
                );
            }
        }
    }
}

fn convert_value(
    field: &'static str,
    index: usize,
    raw: &Value,
    scale: FixedPointScale,
    report: &mut FieldReport,
) -> Option<FixedPointValue> {
    report.len += 1;
    let text = raw_text(raw);
    match try_to_decimal(text.as_deref(), scale) {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            report.absent += 1;
            None
        }
        Err(e) => {
            report.failures += 1;
            if DF.log_conversion_failures {
                log::warn!("{}[{}]: {}", field, index, e);
            }
            None
        }
    }
}

/// Lossy per-element conversion: absent and unparseable values become 0.
fn convert_series(
    field: &'static str,
    raw: &[Value],
    scale: FixedPointScale,
) -> (TimeSeries<FixedPointValue>, FieldReport) {
    let mut report = FieldReport::new(field);
    let series = raw
        .iter()
        .enumerate()
        .map(|(i, v)| convert_value(field, i, v, scale, &mut report).unwrap_or_default())
        .collect();
    (series, report)
}

/// Keeps only present, parseable slippage values (the `to_optional_decimal` rule).
fn convert_slippages(raw: &[Value], scale: FixedPointScale) -> (Vec<SlippageSample>, FieldReport) {
    let mut report = FieldReport::new(fields::SLIPPAGES);
    let samples = raw
        .iter()
        .enumerate()
        .filter_map(|(index, v)| {
            convert_value(fields::SLIPPAGES, index, v, scale, &mut report)
                .map(|value| SlippageSample { index, value })
        })
        .collect();
    (samples, report)
}

/// Row-by-row conversion. A snapshot that is not an array is kept as an empty row so
/// that the width check flags it.
fn convert_snapshots(raw: &[Value], scale: FixedPointScale) -> (SnapshotMatrix, FieldReport) {
    let mut report = FieldReport::new(fields::LP_SNAPSHOTS);
    let rows = raw
        .iter()
        .enumerate()
        .map(|(index, snapshot)| match snapshot {
            Value::Array(balances) => balances
                .iter()
                .map(|b| {
                    convert_value(fields::LP_SNAPSHOTS, index, b, scale, &mut report)
                        .unwrap_or_default()
                })
                .collect(),
            other => {
                log::warn!(
                    "{}[{}] is not an array ({}); snapshot ignored",
                    fields::LP_SNAPSHOTS,
                    index,
                    other
                );
                Vec::new()
            }
        })
        .collect();
    (SnapshotMatrix::from_rows(rows), report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(s: &str) -> FixedPointValue {
        FixedPointValue::from_decimal(BigDecimal::from_str(s).unwrap())
    }

    fn base_document() -> serde_json::Value {
        json!({
            "timestamps": ["0", "1", "2"],
            "reserveRatios": ["1000000000000000000", "1000000000000000000", "1000000000000000000"],
            "spotPricesA": ["1000000000000000000", "1000000000000000000", "1000000000000000000"],
            "totalValuesLockedA": ["1000000000000000000", "2000000000000000000", "3000000000000000000"],
            "totalValuesLockedB": ["0", "0", "0"],
            "cumulativeSwapVolumeA": ["0", "0", "0"],
            "cumulativeSwapVolumeB": ["0", "0", "0"],
            "slippages": [null, "10000000000000000", "null"],
            "cumulativeFeesA": ["0", "0", "0"],
            "cumulativeFeesB": ["0", "0", "0"],
            "lpDistributionSnapshots": [
                ["1000000000000000000", "2000000000000000000"],
                ["1000000000000000000", "2000000000000000000"],
                ["1000000000000000000", "2000000000000000000"]
            ]
        })
    }

    fn dataset(value: serde_json::Value) -> SimulationDataset {
        let doc = SimulationDocument::from_value(value).unwrap();
        SimulationDataset::from_document(&doc, FixedPointScale::WEI)
    }

    #[test]
    fn reserves_are_exact() {
        let ds = dataset(base_document());
        assert_eq!(ds.n, 3);
        assert_eq!(ds.reserves_a.values(), &[dec("1"), dec("2"), dec("3")]);
        assert!(ds.misaligned_fields().is_empty());
    }

    #[test]
    fn only_present_slippage_is_kept() {
        let ds = dataset(base_document());
        assert_eq!(
            ds.slippages,
            vec![SlippageSample {
                index: 1,
                value: dec("0.01")
            }]
        );
        let report = ds.conversion.iter().find(|r| r.field == "slippages").unwrap();
        assert_eq!((report.len, report.absent, report.failures), (3, 2, 0));
    }

    #[test]
    fn ragged_lp_snapshots_are_not_renderable() {
        let mut value = base_document();
        value["timestamps"] = json!(["0", "1"]);
        value["lpDistributionSnapshots"] = json!([
            ["1000000000000000000", "2000000000000000000"],
            ["1000000000000000000"]
        ]);
        let ds = dataset(value);
        let alignment = ds.lp_distribution.alignment();
        assert!(!alignment.ok);
        assert_eq!(alignment.width, 0);
        assert!(!ds.lp_renderable());
    }

    #[test]
    fn lp_snapshot_count_must_match_axis() {
        let mut value = base_document();
        value["lpDistributionSnapshots"] = json!([["1"], ["2"]]);
        let ds = dataset(value);
        assert!(ds.lp_distribution.is_aligned());
        assert!(!ds.lp_renderable());
    }

    #[test]
    fn aligned_lp_snapshots_are_renderable() {
        let ds = dataset(base_document());
        assert!(ds.lp_renderable());
        assert_eq!(ds.lp_distribution.width(), 2);
    }

    #[test]
    fn null_lp_balances_become_zero() {
        let mut value = base_document();
        value["lpDistributionSnapshots"][2] = json!([null, null]);
        let ds = dataset(value);
        assert!(ds.lp_renderable());
        assert_eq!(ds.lp_distribution.rows()[2], vec![dec("0"), dec("0")]);
    }

    #[test]
    fn non_array_snapshot_breaks_alignment() {
        let mut value = base_document();
        value["lpDistributionSnapshots"][1] = json!(null);
        let ds = dataset(value);
        assert!(!ds.lp_renderable());
    }

    #[test]
    fn malformed_values_are_counted_and_zeroed() {
        let mut value = base_document();
        value["cumulativeFeesA"] = json!(["0", "oops", true]);
        let ds = dataset(value);
        assert_eq!(ds.fees_a.values(), &[dec("0"), dec("0"), dec("0")]);
        assert_eq!(ds.conversion_failures(), 2);
    }

    #[test]
    fn conversion_matches_lossy_converters() {
        use crate::analysis::{to_decimal, to_optional_decimal};

        let raw = json!(["5000000000000000000", null, "null", "bad", " 0 ", "1e100000000"]);
        let mut value = base_document();
        value["timestamps"] = json!([0, 1, 2, 3, 4, 5]);
        value["cumulativeFeesA"] = raw.clone();
        value["slippages"] = raw.clone();
        let ds = dataset(value);

        let texts: Vec<Option<String>> = raw
            .as_array()
            .unwrap()
            .iter()
            .map(|v| raw_text(v).map(|t| t.into_owned()))
            .collect();

        let expected_fees: Vec<FixedPointValue> = texts
            .iter()
            .map(|t| to_decimal(t.as_deref(), FixedPointScale::WEI))
            .collect();
        assert_eq!(ds.fees_a.values(), expected_fees.as_slice());

        let expected_slippage: Vec<SlippageSample> = texts
            .iter()
            .enumerate()
            .filter_map(|(index, t)| {
                to_optional_decimal(t.as_deref(), FixedPointScale::WEI)
                    .map(|value| SlippageSample { index, value })
            })
            .collect();
        assert_eq!(ds.slippages, expected_slippage);
        assert_eq!(ds.slippages.len(), 2);
    }

    #[test]
    fn chart_readiness_follows_alignment() {
        let mut value = base_document();
        value["cumulativeFeesB"] = json!(["0"]);
        value["slippages"] = json!([null, null, "null"]);
        let ds = dataset(value);
        assert!(ds.chart_ready(ChartKind::Reserves));
        assert!(ds.chart_ready(ChartKind::LpDistribution));
        assert!(!ds.chart_ready(ChartKind::Fees));
        assert!(!ds.chart_ready(ChartKind::Slippage));
    }

    #[test]
    fn short_series_is_reported() {
        let mut value = base_document();
        value["cumulativeSwapVolumeB"] = json!(["0", "0"]);
        let ds = dataset(value);
        assert_eq!(ds.misaligned_fields(), vec!["cumulativeSwapVolumeB"]);
        assert!(!ds.series_aligned(&[&ds.volume_a, &ds.volume_b]));
        assert!(ds.series_aligned(&[&ds.fees_a, &ds.fees_b]));
    }
}
