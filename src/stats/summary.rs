use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::VariantType;
use crate::stats::counter::BinCounts;

/// Counts and derived ratios for one cell, as written to the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioRecord {
    pub tp: u64,
    pub fp: u64,
    pub t: u64,
    #[serde(rename = "fn")]
    pub fn_count: u64,
    #[serde(default)]
    pub precision: f64,
    #[serde(default)]
    pub recall: f64,
    #[serde(default)]
    pub f1: f64,
}

impl RatioRecord {
    /// The stored counters this record was derived from
    #[must_use]
    pub fn counts(&self) -> BinCounts {
        BinCounts {
            tp: self.tp,
            fp: self.fp,
            t: self.t,
        }
    }
}

impl From<BinCounts> for RatioRecord {
    fn from(counts: BinCounts) -> Self {
        let ratios = counts.ratios();
        Self {
            tp: counts.tp,
            fp: counts.fp,
            t: counts.t,
            fn_count: counts.false_negatives(),
            precision: ratios.precision,
            recall: ratios.recall,
            f1: ratios.f1(),
        }
    }
}

/// One length bucket; `upper` is `None` for the final unbounded bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinRecord {
    pub lower: u64,
    pub upper: Option<u64>,
    #[serde(flatten)]
    pub counts: RatioRecord,
}

/// All statistics for one variant type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSummary {
    /// Every length
    pub sum_count: RatioRecord,

    /// Lengths at or above the SV cutoff only
    #[serde(rename = "svSumCount")]
    pub sv_sum_count: RatioRecord,

    pub bin_counts: Vec<BinRecord>,
}

impl TypeSummary {
    /// Lengths below the SV cutoff
    #[must_use]
    pub fn non_sv_counts(&self) -> BinCounts {
        self.sum_count.counts() - self.sv_sum_count.counts()
    }
}

/// Snapshot of a [`ClassificationCounter`](crate::stats::counter::ClassificationCounter)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterSummary {
    pub sv_length: u64,
    pub bin_breaks: Vec<u64>,
    pub data: BTreeMap<VariantType, TypeSummary>,

    /// Aggregate over every variant type
    pub all_data: TypeSummary,
}

impl CounterSummary {
    /// Stored counters for `(variant_type, bucket)`, if present
    #[must_use]
    pub fn counts(&self, variant_type: VariantType, bucket: usize) -> Option<BinCounts> {
        self.data
            .get(&variant_type)?
            .bin_counts
            .get(bucket)
            .map(|b| b.counts.counts())
    }
}
