//! Length-binned concordance statistics.
//!
//! - [`binning`]: maps variant lengths to size buckets
//! - [`counter`]: per-type, per-bucket TP/FP/T counters with derived FN and ratios
//! - [`summary`]: the serializable snapshot written into the report
//!
//! ## Invariant
//!
//! False negatives are never counted directly. Every true positive also increments the
//! truth total, every false negative increments only the truth total, so for each cell
//! `FN = T - TP` and `T >= TP` hold by construction.

pub mod binning;
pub mod counter;
pub mod summary;

pub use binning::LengthBinner;
pub use counter::{BinCounts, ClassificationCounter, Ratios};
pub use summary::CounterSummary;
