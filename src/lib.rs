//! # varcomp-stats
//!
//! Concordance statistics for variant-calling benchmarks.
//!
//! A variant comparison tool sorts calls into four VCFs: true positives, false
//! positives, false negatives and the truth set. `varcomp-stats` reads those four
//! streams, optionally restricts them to a BED region set, and counts them by variant
//! type and length bucket into a reproducible JSON report.
//!
//! ## Features
//!
//! - **Region filtering**: keep variants fully inside a region, or with either breakend inside
//! - **Length binning**: user-defined bucket boundaries plus a separate SV length cutoff
//! - **Derived false negatives**: FN is always `T - TP`, never counted independently
//! - **Audit trail**: filtered copies of each input record exactly what was counted
//! - **HTML reports**: splice the JSON report into a template
//!
//! ## Example
//!
//! ```rust,no_run
//! use varcomp_stats::evaluation::driver::{ComparisonDriver, ComparisonInputs};
//! use varcomp_stats::evaluation::filter::RegionFilter;
//! use varcomp_stats::parsing::vcf::ParseOptions;
//! use varcomp_stats::stats::{ClassificationCounter, LengthBinner};
//! use varcomp_stats::VariantType;
//!
//! let inputs = ComparisonInputs {
//!     true_positives: "tp.vcf".into(),
//!     false_positives: "fp.vcf".into(),
//!     false_negatives: "fn.vcf".into(),
//!     truth: "truth.vcf".into(),
//! };
//!
//! let filter = RegionFilter::disabled();
//! let mut counter = ClassificationCounter::new(LengthBinner::new(vec![100]).unwrap(), 100);
//! ComparisonDriver::new(&filter, ParseOptions::default())
//!     .run(&inputs, "out/sample", &mut counter)
//!     .unwrap();
//!
//! let snp = counter.counts(VariantType::Snp, 0);
//! println!("SNP <100bp: TP={} FN={} FP={}", snp.tp, snp.false_negatives(), snp.fp);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Variant records, intervals, region sets and classification enums
//! - [`parsing`]: VCF and BED readers
//! - [`stats`]: Length binning and the classification counter
//! - [`evaluation`]: Region filter and the comparison driver
//! - [`report`]: Report assembly, JSON/HTML emission and summary tables
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod evaluation;
pub mod parsing;
pub mod report;
pub mod stats;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::interval::Interval;
pub use core::regions::RegionSet;
pub use core::types::*;
pub use core::variant::VariantRecord;
pub use evaluation::driver::{ComparisonDriver, ComparisonInputs};
pub use evaluation::filter::RegionFilter;
pub use report::Report;
pub use stats::{ClassificationCounter, LengthBinner};
