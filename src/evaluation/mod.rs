//! Classification of categorized variant streams.
//!
//! The [`ComparisonDriver`](driver::ComparisonDriver) reads the false-positive,
//! true-positive, false-negative and truth streams in turn. Every record passes through
//! the [`RegionFilter`](filter::RegionFilter); retained records are copied to a per-category
//! passthrough file and counted in a
//! [`ClassificationCounter`](crate::stats::counter::ClassificationCounter).
//!
//! | Category        | Counter update |
//! |-----------------|----------------|
//! | False positive  | FP += 1        |
//! | True positive   | TP += 1, T += 1 |
//! | False negative  | T += 1         |
//! | Truth           | none           |

pub mod driver;
pub mod filter;
