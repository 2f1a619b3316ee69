use crate::analysis::align_series;
use crate::domain::FixedPointValue;

// ============================================================================
// TimeSeries: one value per transaction index
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<T> {
    values: Vec<T>,
}

impl<T> TimeSeries<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    pub fn last(&self) -> Option<&T> {
        self.values.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// True when this series has exactly one entry per transaction on an `n`-long axis.
    pub fn is_aligned_to(&self, n: usize) -> bool {
        self.values.len() == n
    }
}

impl<T> Default for TimeSeries<T> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<T> FromIterator<T> for TimeSeries<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl TimeSeries<FixedPointValue> {
    /// (transaction index, value) pairs ready for plotting.
    pub fn to_points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, v.to_f64()))
            .collect()
    }
}

// ============================================================================
// Alignment of ragged rows
// ============================================================================

/// Outcome of checking that every row of a matrix has the same width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    pub width: usize,
    pub ok: bool,
}

impl Alignment {
    pub const fn aligned(width: usize) -> Self {
        Self { width, ok: true }
    }

    /// The "no data" sentinel: rows disagree, so there is no usable width.
    pub const fn misaligned() -> Self {
        Self { width: 0, ok: false }
    }
}

// ============================================================================
// SnapshotMatrix: per-entity balances, one row per snapshot
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotMatrix {
    rows: Vec<Vec<FixedPointValue>>,
    alignment: Alignment,
}

impl SnapshotMatrix {
    pub fn from_rows(rows: Vec<Vec<FixedPointValue>>) -> Self {
        let alignment = align_series(&rows);
        Self { rows, alignment }
    }

    pub fn rows(&self) -> &[Vec<FixedPointValue>] {
        &self.rows
    }

    pub fn snapshot_count(&self) -> usize {
        self.rows.len()
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn is_aligned(&self) -> bool {
        self.alignment.ok
    }

    /// Number of entities per snapshot, 0 when the rows disagree.
    pub fn width(&self) -> usize {
        self.alignment.width
    }

    /// Balances of a single entity across all snapshots. `None` when the matrix is
    /// ragged or the entity does not exist.
    pub fn entity_series(&self, entity: usize) -> Option<TimeSeries<FixedPointValue>> {
        if !self.alignment.ok || entity >= self.alignment.width {
            return None;
        }
        Some(self.rows.iter().map(|row| row[entity].clone()).collect())
    }

    pub fn last_row(&self) -> Option<&[FixedPointValue]> {
        self.rows.last().map(Vec::as_slice)
    }
}

// ============================================================================
// SlippageSample: only swaps that actually recorded a slippage
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SlippageSample {
    /// Transaction index the sample belongs to
    pub index: usize,
    /// Slippage in percent
    pub value: FixedPointValue,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn v(n: i64) -> FixedPointValue {
        FixedPointValue::from_decimal(BigDecimal::from(n))
    }

    #[test]
    fn entity_series_reads_a_column() {
        let m = SnapshotMatrix::from_rows(vec![vec![v(1), v(2)], vec![v(3), v(4)]]);
        assert_eq!(m.width(), 2);
        let second = m.entity_series(1).unwrap();
        assert_eq!(second.values(), &[v(2), v(4)]);
        assert!(m.entity_series(2).is_none());
    }

    #[test]
    fn ragged_matrix_has_no_width() {
        let m = SnapshotMatrix::from_rows(vec![vec![v(1), v(2)], vec![v(3)]]);
        assert!(!m.is_aligned());
        assert_eq!(m.width(), 0);
        assert!(m.entity_series(0).is_none());
        assert_eq!(m.snapshot_count(), 2);
    }

    #[test]
    fn points_use_transaction_index_as_x() {
        let s: TimeSeries<FixedPointValue> = vec![v(5), v(7)].into_iter().collect();
        assert_eq!(s.to_points(), vec![(0.0, 5.0), (1.0, 7.0)]);
        assert!(s.is_aligned_to(2));
        assert!(!s.is_aligned_to(3));
    }
}
