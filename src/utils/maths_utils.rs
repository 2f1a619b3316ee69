use argminmax::ArgMinMax;
use std::ops::Range;

/// (min, max) of the finite values in `values`, or `None` if there are none.
pub fn series_bounds(values: &[f64]) -> Option<(f64, f64)> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    let (min_index, max_index) = finite.argminmax();
    Some((finite[min_index], finite[max_index]))
}

/// Turns (min, max) into a plottable range padded by `pad_pct` of its span on both
/// sides. A zero-width span (flat series, single point) is widened so the axis never
/// collapses.
pub fn axis_range(min: f64, max: f64, pad_pct: f64) -> Range<f64> {
    let span = max - min;
    if span <= f64::EPSILON {
        let half = if min.abs() > f64::EPSILON { min.abs() * 0.5 } else { 1.0 };
        return (min - half)..(max + half);
    }
    let pad = span * pad_pct;
    (min - pad)..(max + pad)
}

/// Cumulative sums for a stacked area chart.
///
/// `columns[k][t]` is the value of layer `k` at time `t`. The result has one extra
/// leading layer of zeros so that layer `k` spans `result[k]..result[k + 1]`.
pub fn stack_layers(columns: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let len = columns.first().map_or(0, Vec::len);
    let mut layers = Vec::with_capacity(columns.len() + 1);
    layers.push(vec![0.0; len]);
    for column in columns {
        let below = &layers[layers.len() - 1];
        let next: Vec<f64> = below.iter().zip(column).map(|(b, v)| b + v).collect();
        layers.push(next);
    }
    layers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_skip_non_finite() {
        assert_eq!(series_bounds(&[3.0, f64::NAN, -1.0, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(series_bounds(&[]), None);
        assert_eq!(series_bounds(&[f64::INFINITY]), None);
    }

    #[test]
    fn flat_range_is_widened() {
        let r = axis_range(0.0, 0.0, 0.05);
        assert!(r.start < 0.0 && r.end > 0.0);
        let r = axis_range(4.0, 4.0, 0.05);
        assert_eq!(r, 2.0..6.0);
    }

    #[test]
    fn padded_range() {
        assert_eq!(axis_range(0.0, 10.0, 0.1), -1.0..11.0);
    }

    #[test]
    fn stacks_accumulate() {
        let layers = stack_layers(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(layers, vec![vec![0.0, 0.0], vec![1.0, 2.0], vec![4.0, 6.0]]);
    }
}
