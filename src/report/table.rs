use serde::Serialize;

use crate::core::types::VariantType;
use crate::stats::counter::BinCounts;
use crate::stats::summary::{CounterSummary, TypeSummary};

/// Which length range a summary table covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryView {
    /// Variants shorter than the SV cutoff
    NonSv,
    /// Variants at or above the SV cutoff
    Sv,
    /// Every variant
    Overall,
}

impl SummaryView {
    pub const ALL: [SummaryView; 3] = [SummaryView::NonSv, SummaryView::Sv, SummaryView::Overall];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::NonSv => "Non-SV stats",
            Self::Sv => "SV stats",
            Self::Overall => "Overall stats",
        }
    }

    fn select(self, summary: &TypeSummary) -> BinCounts {
        match self {
            Self::NonSv => summary.non_sv_counts(),
            Self::Sv => summary.sv_sum_count.counts(),
            Self::Overall => summary.sum_count.counts(),
        }
    }
}

/// One line of a summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub variant_type: String,
    pub recall: f64,
    pub precision: f64,
    pub f1: f64,
    pub tp: u64,
    pub t: u64,
    pub fp: u64,
}

impl SummaryRow {
    fn new(label: &str, counts: BinCounts) -> Self {
        let ratios = counts.ratios();
        Self {
            variant_type: label.to_string(),
            recall: ratios.recall,
            precision: ratios.precision,
            f1: ratios.f1(),
            tp: counts.tp,
            t: counts.t,
            fp: counts.fp,
        }
    }
}

/// Rows for every variant type with any activity, followed by an `All` row
#[must_use]
pub fn summary_rows(summary: &CounterSummary, view: SummaryView) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = VariantType::ALL
        .iter()
        .filter_map(|vt| {
            let counts = view.select(summary.data.get(vt)?);
            (counts != BinCounts::default()).then(|| SummaryRow::new(vt.label(), counts))
        })
        .collect();
    rows.push(SummaryRow::new("All", view.select(&summary.all_data)));
    rows
}
