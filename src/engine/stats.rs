//! Per-column statistical accumulation.
//!
//! Each tokenized field updates one [`ColumnStats`]: observation counters,
//! a byte-length histogram, numeric parseability with min/max/scale, and
//! date/timestamp pattern match counts. Histograms are sparse value→count
//! maps; a sample never holds more distinct lengths than lines.

use crate::engine::patterns::{is_date, is_null_marker, is_timestamp, parse_numeric};
use crate::metadata::DistStats;
use foldhash::{HashMap, HashMapExt};

/// Sparse histogram over non-negative integer observations.
#[derive(Debug, Clone, Default)]
pub struct Histogram {
    buckets: HashMap<u64, u64>,
    total: u64,
}

impl Histogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self {
            buckets: HashMap::new(),
            total: 0,
        }
    }

    /// Record one observation of `value`.
    pub fn record(&mut self, value: u64) {
        *self.buckets.entry(value).or_insert(0) += 1;
        self.total += 1;
    }

    /// Number of observations recorded.
    #[inline]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns true if nothing has been recorded.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Smallest observed value; 0 when empty.
    pub fn min(&self) -> u64 {
        self.buckets.keys().copied().min().unwrap_or(0)
    }

    /// Largest observed value; 0 when empty.
    pub fn max(&self) -> u64 {
        self.buckets.keys().copied().max().unwrap_or(0)
    }

    /// Arithmetic mean; 0 when empty.
    pub fn mean(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let sum: f64 = self
            .buckets
            .iter()
            .map(|(&v, &c)| v as f64 * c as f64)
            .sum();
        sum / self.total as f64
    }

    /// Population standard deviation around the arithmetic mean; 0 when empty.
    pub fn std_dev(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let sum_sq: f64 = self
            .buckets
            .iter()
            .map(|(&v, &c)| {
                let d = v as f64 - mean;
                d * d * c as f64
            })
            .sum();
        (sum_sq / self.total as f64).sqrt()
    }

    /// Sample median, walking the histogram until half the observations are
    /// consumed. Ties between the two middle values break toward the higher.
    pub fn median_tie_high(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let mut keys: Vec<u64> = self.buckets.keys().copied().collect();
        keys.sort_unstable();

        let rank = self.total() / 2 + 1;
        let mut consumed = 0;
        for key in keys {
            consumed += self.buckets[&key];
            if consumed >= rank {
                return key;
            }
        }
        0
    }

    /// Summarize as distribution statistics.
    pub fn dist_stats(&self) -> DistStats {
        DistStats {
            avg: self.mean(),
            min: self.min(),
            max: self.max(),
            std_dev: self.std_dev(),
        }
    }
}

/// Accumulated statistics for one column position.
#[derive(Debug, Clone, Default)]
pub struct ColumnStats {
    /// Fields delivered to this column, nulls included.
    pub count: u64,
    /// Null markers observed (empty, `""`, `NULL`).
    pub null_count: u64,
    /// Fields that parsed as signed decimal numbers.
    pub num_count: u64,
    /// Fields that matched the date pattern.
    pub date_count: u64,
    /// Fields that matched the timestamp pattern.
    pub timestamp_count: u64,
    /// Raw field byte-length distribution, nulls included.
    pub lengths: Histogram,
    /// Digits-after-`.` distribution over numeric fields.
    pub scales: Histogram,
    /// Smallest numeric value observed.
    pub min: Option<f64>,
    /// Largest numeric value observed.
    pub max: Option<f64>,
}

impl ColumnStats {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one raw field into the statistics.
    pub fn observe(&mut self, raw: &str) {
        self.count += 1;
        self.lengths.record(raw.len() as u64);

        if is_null_marker(raw) {
            self.null_count += 1;
            return;
        }

        if let Some(n) = parse_numeric(raw) {
            self.num_count += 1;
            self.scales.record(u64::from(n.scale));
            self.min = Some(self.min.map_or(n.value, |m| m.min(n.value)));
            self.max = Some(self.max.map_or(n.value, |m| m.max(n.value)));
        } else if is_date(raw) {
            self.date_count += 1;
        } else if is_timestamp(raw) {
            self.timestamp_count += 1;
        }
    }

    /// Non-null observations.
    #[inline]
    pub const fn non_null(&self) -> u64 {
        self.count - self.null_count
    }

    /// Fraction of observations that were null, in [0, 1].
    pub fn null_pct(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.null_count as f64 / self.count as f64
        }
    }

    /// True when every non-null observation parsed as numeric and at least
    /// one did.
    #[inline]
    pub const fn is_numeric(&self) -> bool {
        self.num_count > 0 && self.num_count == self.non_null()
    }
}

/// Ordered column accumulators, grown on demand as wider lines appear.
#[derive(Debug, Default)]
pub struct ColumnTable {
    columns: Vec<ColumnStats>,
}

impl ColumnTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one tokenized line into the table.
    pub fn observe_fields<S: AsRef<str>>(&mut self, fields: &[S]) {
        if fields.len() > self.columns.len() {
            self.columns.resize_with(fields.len(), ColumnStats::new);
        }
        for (stats, field) in self.columns.iter_mut().zip(fields) {
            stats.observe(field.as_ref());
        }
    }

    /// Number of column positions observed so far.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Iterate the accumulators in column order.
    pub fn iter(&self) -> std::slice::Iter<'_, ColumnStats> {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_summary() {
        let mut h = Histogram::new();
        for v in [2u64, 4, 4, 6] {
            h.record(v);
        }
        assert_eq!(h.total(), 4);
        assert_eq!(h.min(), 2);
        assert_eq!(h.max(), 6);
        assert!((h.mean() - 4.0).abs() < f64::EPSILON);
        // Population variance of [2,4,4,6] is 2.
        assert!((h.std_dev() - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_median_tie_high() {
        let mut h = Histogram::new();
        for v in [1u64, 2, 3, 4] {
            h.record(v);
        }
        // Even count: the higher middle value wins.
        assert_eq!(h.median_tie_high(), 3);

        h.record(1);
        assert_eq!(h.median_tie_high(), 2);
    }

    #[test]
    fn test_histogram_empty() {
        let h = Histogram::new();
        assert_eq!(h.min(), 0);
        assert_eq!(h.max(), 0);
        assert_eq!(h.median_tie_high(), 0);
        assert_eq!(h.std_dev(), 0.0);
    }

    #[test]
    fn test_observe_numeric_column() {
        let mut stats = ColumnStats::new();
        for v in ["10", "-2.5", "3"] {
            stats.observe(v);
        }
        assert_eq!(stats.count, 3);
        assert_eq!(stats.num_count, 3);
        assert_eq!(stats.null_count, 0);
        assert_eq!(stats.min, Some(-2.5));
        assert_eq!(stats.max, Some(10.0));
        assert_eq!(stats.scales.max(), 1);
        assert!(stats.is_numeric());
    }

    #[test]
    fn test_observe_nulls_counted_but_not_classified() {
        let mut stats = ColumnStats::new();
        for v in ["5", "", "NULL", "\"\""] {
            stats.observe(v);
        }
        assert_eq!(stats.count, 4);
        assert_eq!(stats.null_count, 3);
        assert_eq!(stats.non_null(), 1);
        assert_eq!(stats.num_count, 1);
        assert!((stats.null_pct() - 0.75).abs() < f64::EPSILON);
        // Null lengths still feed the length distribution.
        assert_eq!(stats.lengths.total(), 4);
        assert_eq!(stats.lengths.max(), 4);
    }

    #[test]
    fn test_observe_dates_and_timestamps() {
        let mut stats = ColumnStats::new();
        stats.observe("2024-02-15");
        stats.observe("2024-02-15 10:00:00");
        assert_eq!(stats.date_count, 1);
        assert_eq!(stats.timestamp_count, 1);
        assert_eq!(stats.num_count, 0);
    }

    #[test]
    fn test_column_table_grows_on_demand() {
        let mut table = ColumnTable::new();
        table.observe_fields(&["a", "b"]);
        table.observe_fields(&["c", "d", "e"]);
        table.observe_fields(&["f"]);

        assert_eq!(table.width(), 3);
        let counts: Vec<u64> = table.iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![3, 2, 1]);
    }
}
