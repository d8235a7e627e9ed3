use std::collections::BTreeMap;
use std::ops::{AddAssign, Sub};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{CounterUpdate, VariantType};
use crate::stats::binning::LengthBinner;
use crate::stats::summary::{BinRecord, CounterSummary, RatioRecord, TypeSummary};

/// Helper function to convert a count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MergeError {
    #[error("Cannot merge counters with different bin breaks: {left:?} vs {right:?}")]
    BinBreaksDiffer { left: Vec<u64>, right: Vec<u64> },

    #[error("Cannot merge counters with different SV length cutoffs: {left} vs {right}")]
    SvLengthDiffers { left: u64, right: u64 },
}

/// Stored counters for one (type, bucket) cell.
///
/// There is no false-negative counter: FN is always `t - tp`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinCounts {
    pub tp: u64,
    pub fp: u64,
    pub t: u64,
}

impl BinCounts {
    /// Derived false negatives, `T - TP`
    #[must_use]
    pub fn false_negatives(&self) -> u64 {
        self.t.saturating_sub(self.tp)
    }

    #[must_use]
    pub fn ratios(&self) -> Ratios {
        let called = self.tp + self.fp;
        let precision = if called == 0 {
            0.0
        } else {
            count_to_f64(self.tp) / count_to_f64(called)
        };
        let recall = if self.t == 0 {
            0.0
        } else {
            count_to_f64(self.tp) / count_to_f64(self.t)
        };
        Ratios { precision, recall }
    }
}

impl AddAssign for BinCounts {
    fn add_assign(&mut self, other: Self) {
        self.tp += other.tp;
        self.fp += other.fp;
        self.t += other.t;
    }
}

impl Sub for BinCounts {
    type Output = BinCounts;

    fn sub(self, other: Self) -> Self {
        Self {
            tp: self.tp.saturating_sub(other.tp),
            fp: self.fp.saturating_sub(other.fp),
            t: self.t.saturating_sub(other.t),
        }
    }
}

/// Precision and recall for one cell; both are 0 when their denominator is 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratios {
    pub precision: f64,
    pub recall: f64,
}

impl Ratios {
    /// Harmonic mean of precision and recall
    #[must_use]
    pub fn f1(&self) -> f64 {
        let sum = self.precision + self.recall;
        if sum == 0.0 {
            0.0
        } else {
            2.0 * self.precision * self.recall / sum
        }
    }
}

/// Per-type, per-bucket TP/FP/T counters.
///
/// Laid out as a dense `VariantType::COUNT x bucket_count` table. Counters only ever
/// grow. A separate per-type tally covers variants at or above the SV length cutoff,
/// independent of the bucket boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationCounter {
    binner: LengthBinner,
    sv_length: u64,
    cells: Vec<BinCounts>,
    sv_cells: Vec<BinCounts>,
}

impl ClassificationCounter {
    #[must_use]
    pub fn new(binner: LengthBinner, sv_length: u64) -> Self {
        let cells = vec![BinCounts::default(); VariantType::COUNT * binner.bucket_count()];
        Self {
            binner,
            sv_length,
            cells,
            sv_cells: vec![BinCounts::default(); VariantType::COUNT],
        }
    }

    #[must_use]
    pub fn binner(&self) -> &LengthBinner {
        &self.binner
    }

    #[must_use]
    pub fn sv_length(&self) -> u64 {
        self.sv_length
    }

    /// Increment FP for `(variant_type, bucket_of(length))`
    pub fn increment_false_positive(&mut self, variant_type: VariantType, length: u64) {
        self.update(variant_type, length, |c| c.fp += 1);
    }

    /// Increment both TP and T; a true positive is also a member of the truth set
    pub fn increment_true_positive(&mut self, variant_type: VariantType, length: u64) {
        self.update(variant_type, length, |c| {
            c.tp += 1;
            c.t += 1;
        });
    }

    /// Increment only T, for a truth variant that was not called
    pub fn increment_truth_only(&mut self, variant_type: VariantType, length: u64) {
        self.update(variant_type, length, |c| c.t += 1);
    }

    /// Apply the counter operation selected for a record's category
    pub fn apply(&mut self, update: CounterUpdate, variant_type: VariantType, length: u64) {
        match update {
            CounterUpdate::FalsePositive => self.increment_false_positive(variant_type, length),
            CounterUpdate::TruePositive => self.increment_true_positive(variant_type, length),
            CounterUpdate::TruthOnly => self.increment_truth_only(variant_type, length),
            CounterUpdate::None => {}
        }
    }

    fn update<F>(&mut self, variant_type: VariantType, length: u64, f: F)
    where
        F: Fn(&mut BinCounts),
    {
        let slot = self.slot(variant_type, self.binner.bucket_of(length));
        f(&mut self.cells[slot]);
        if length >= self.sv_length {
            f(&mut self.sv_cells[variant_type.index()]);
        }
    }

    fn slot(&self, variant_type: VariantType, bucket: usize) -> usize {
        variant_type.index() * self.binner.bucket_count() + bucket
    }

    /// Counters for one cell; out-of-range buckets read as zero
    #[must_use]
    pub fn counts(&self, variant_type: VariantType, bucket: usize) -> BinCounts {
        if bucket >= self.binner.bucket_count() {
            return BinCounts::default();
        }
        self.cells[self.slot(variant_type, bucket)]
    }

    #[must_use]
    pub fn ratios(&self, variant_type: VariantType, bucket: usize) -> Ratios {
        self.counts(variant_type, bucket).ratios()
    }

    /// Counters for a type summed over all buckets
    #[must_use]
    pub fn type_total(&self, variant_type: VariantType) -> BinCounts {
        let start = self.slot(variant_type, 0);
        let mut total = BinCounts::default();
        for cell in &self.cells[start..start + self.binner.bucket_count()] {
            total += *cell;
        }
        total
    }

    /// Counters for a type restricted to lengths at or above the SV cutoff
    #[must_use]
    pub fn sv_total(&self, variant_type: VariantType) -> BinCounts {
        self.sv_cells[variant_type.index()]
    }

    /// Whether no counter has been touched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| *c == BinCounts::default())
    }

    /// Add another counter's cells into this one.
    ///
    /// Counters filled independently (for example one per input stream) combine into
    /// the same totals a single sequential pass would produce.
    ///
    /// # Errors
    ///
    /// Returns `MergeError` if the two counters use different bucket layouts or SV cutoffs.
    pub fn merge(&mut self, other: &ClassificationCounter) -> Result<(), MergeError> {
        if self.binner != other.binner {
            return Err(MergeError::BinBreaksDiffer {
                left: self.binner.breaks().to_vec(),
                right: other.binner.breaks().to_vec(),
            });
        }
        if self.sv_length != other.sv_length {
            return Err(MergeError::SvLengthDiffers {
                left: self.sv_length,
                right: other.sv_length,
            });
        }

        for (mine, theirs) in self.cells.iter_mut().zip(&other.cells) {
            *mine += *theirs;
        }
        for (mine, theirs) in self.sv_cells.iter_mut().zip(&other.sv_cells) {
            *mine += *theirs;
        }
        Ok(())
    }

    /// Serializable snapshot with derived FN and ratios filled in
    #[must_use]
    pub fn summary(&self) -> CounterSummary {
        let bucket_count = self.binner.bucket_count();
        let mut data = BTreeMap::new();
        let mut all_bins = vec![BinCounts::default(); bucket_count];
        let mut all_total = BinCounts::default();
        let mut all_sv = BinCounts::default();

        for variant_type in VariantType::ALL {
            let bins: Vec<BinCounts> = (0..bucket_count)
                .map(|b| self.counts(variant_type, b))
                .collect();
            for (acc, cell) in all_bins.iter_mut().zip(&bins) {
                *acc += *cell;
            }
            let total = self.type_total(variant_type);
            let sv = self.sv_total(variant_type);
            all_total += total;
            all_sv += sv;

            data.insert(variant_type, self.type_summary(total, sv, &bins));
        }

        CounterSummary {
            sv_length: self.sv_length,
            bin_breaks: self.binner.breaks().to_vec(),
            all_data: self.type_summary(all_total, all_sv, &all_bins),
            data,
        }
    }

    fn type_summary(&self, total: BinCounts, sv: BinCounts, bins: &[BinCounts]) -> TypeSummary {
        TypeSummary {
            sum_count: RatioRecord::from(total),
            sv_sum_count: RatioRecord::from(sv),
            bin_counts: bins
                .iter()
                .enumerate()
                .map(|(bucket, counts)| {
                    let (lower, upper) = self.binner.bounds(bucket);
                    BinRecord {
                        lower,
                        upper,
                        counts: RatioRecord::from(*counts),
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(breaks: Vec<u64>) -> ClassificationCounter {
        ClassificationCounter::new(LengthBinner::new(breaks).unwrap(), 100)
    }

    #[test]
    fn test_increments() {
        let mut c = counter(vec![100]);
        c.increment_true_positive(VariantType::Snp, 1);
        c.increment_truth_only(VariantType::Snp, 1);
        c.increment_false_positive(VariantType::Deletion, 120);

        let snp = c.counts(VariantType::Snp, 0);
        assert_eq!(snp, BinCounts { tp: 1, fp: 0, t: 2 });
        assert_eq!(snp.false_negatives(), 1);
        assert_eq!(c.ratios(VariantType::Snp, 0).recall, 0.5);
        assert_eq!(c.ratios(VariantType::Snp, 0).precision, 1.0);

        let del = c.counts(VariantType::Deletion, 1);
        assert_eq!(del, BinCounts { tp: 0, fp: 1, t: 0 });
        assert_eq!(c.counts(VariantType::Deletion, 0), BinCounts::default());
    }

    #[test]
    fn test_apply_dispatch() {
        let mut c = counter(vec![]);
        c.apply(CounterUpdate::TruePositive, VariantType::Insertion, 5);
        c.apply(CounterUpdate::TruthOnly, VariantType::Insertion, 5);
        c.apply(CounterUpdate::FalsePositive, VariantType::Insertion, 5);
        c.apply(CounterUpdate::None, VariantType::Insertion, 5);
        assert_eq!(
            c.counts(VariantType::Insertion, 0),
            BinCounts { tp: 1, fp: 1, t: 2 }
        );
    }

    #[test]
    fn test_zero_denominators() {
        let c = counter(vec![10]);
        let ratios = c.ratios(VariantType::Complex, 1);
        assert_eq!(ratios.precision, 0.0);
        assert_eq!(ratios.recall, 0.0);
        assert_eq!(ratios.f1(), 0.0);
    }

    #[test]
    fn test_out_of_range_bucket_reads_zero() {
        let c = counter(vec![10]);
        assert_eq!(c.counts(VariantType::Snp, 5), BinCounts::default());
    }

    #[test]
    fn test_bucket_sums_equal_type_total() {
        let mut c = counter(vec![10, 100, 1000]);
        for length in [0, 5, 10, 50, 99, 100, 999, 1000, 5000] {
            c.increment_true_positive(VariantType::Deletion, length);
            c.increment_false_positive(VariantType::Deletion, length);
        }
        let mut summed = BinCounts::default();
        for bucket in 0..c.binner().bucket_count() {
            summed += c.counts(VariantType::Deletion, bucket);
        }
        assert_eq!(summed, c.type_total(VariantType::Deletion));
        assert_eq!(summed.tp, 9);
        assert_eq!(summed.fp, 9);
    }

    #[test]
    fn test_sv_cutoff() {
        let mut c = counter(vec![]);
        c.increment_true_positive(VariantType::Deletion, 99);
        c.increment_true_positive(VariantType::Deletion, 100);
        c.increment_truth_only(VariantType::Deletion, 300);
        assert_eq!(
            c.sv_total(VariantType::Deletion),
            BinCounts { tp: 1, fp: 0, t: 2 }
        );
        assert_eq!(c.type_total(VariantType::Deletion).t, 3);
    }

    #[test]
    fn test_merge_matches_sequential() {
        let mut sequential = counter(vec![100]);
        let mut left = counter(vec![100]);
        let mut right = counter(vec![100]);

        sequential.increment_true_positive(VariantType::Snp, 1);
        left.increment_true_positive(VariantType::Snp, 1);
        sequential.increment_truth_only(VariantType::Snp, 1);
        right.increment_truth_only(VariantType::Snp, 1);
        sequential.increment_false_positive(VariantType::Inversion, 500);
        right.increment_false_positive(VariantType::Inversion, 500);

        left.merge(&right).unwrap();
        assert_eq!(left, sequential);
    }

    #[test]
    fn test_merge_rejects_different_layout() {
        let mut a = counter(vec![100]);
        let b = counter(vec![50]);
        assert!(matches!(a.merge(&b), Err(MergeError::BinBreaksDiffer { .. })));

        let c = ClassificationCounter::new(LengthBinner::new(vec![100]).unwrap(), 50);
        assert!(matches!(a.merge(&c), Err(MergeError::SvLengthDiffers { .. })));
    }

    #[test]
    fn test_summary_derives_fn_and_totals() {
        let mut c = counter(vec![100]);
        c.increment_true_positive(VariantType::Snp, 1);
        c.increment_truth_only(VariantType::Snp, 1);
        c.increment_false_positive(VariantType::Deletion, 120);

        let summary = c.summary();
        assert_eq!(summary.bin_breaks, vec![100]);
        assert_eq!(summary.data.len(), VariantType::COUNT);

        let snp = &summary.data[&VariantType::Snp];
        assert_eq!(snp.sum_count.tp, 1);
        assert_eq!(snp.sum_count.t, 2);
        assert_eq!(snp.sum_count.fn_count, 1);
        assert_eq!(snp.sum_count.recall, 0.5);
        assert_eq!(snp.bin_counts.len(), 2);
        assert_eq!(snp.bin_counts[0].upper, Some(100));
        assert_eq!(snp.bin_counts[1].lower, 100);

        let del = &summary.data[&VariantType::Deletion];
        assert_eq!(del.sv_sum_count.fp, 1);
        assert_eq!(del.bin_counts[1].counts.fp, 1);

        assert_eq!(summary.all_data.sum_count.tp, 1);
        assert_eq!(summary.all_data.sum_count.fp, 1);
        assert_eq!(summary.all_data.sum_count.t, 2);
        assert_eq!(summary.all_data.bin_counts[0].counts.t, 2);
    }
}
