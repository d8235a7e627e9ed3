//! Command-line interface for varcomp-stats.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **count**: Classify TP/FP/FN/truth VCFs into a binned concordance report
//! - **summarize**: Print recall/precision tables from an existing report
//!
//! ## Usage
//!
//! ```text
//! # Count variants, restricted to high-confidence regions
//! varcomp-stats count --tp tp.vcf --fp fp.vcf --fn fn.vcf --truth truth.vcf \
//!     --prefix out/sample --bed highconf.bed
//!
//! # Custom length bins: 0-500, 500-1000, >=1000
//! varcomp-stats count ... --bin-breaks 500,1000
//!
//! # Re-print the tables of a finished run as TSV
//! varcomp-stats summarize out/sample_report.json --format tsv
//! ```

use clap::{Parser, Subcommand};

use crate::evaluation::driver::CompareError;
use crate::parsing::vcf::ParseError;
use crate::report::ReportError;
use crate::utils::validation::ConfigError;

pub mod count;
pub mod summarize;

#[derive(Parser)]
#[command(name = "varcomp-stats")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Type- and length-stratified concordance statistics for variant calls")]
#[command(
    long_about = "varcomp-stats counts the true positive, false positive, false negative and truth VCFs produced by a variant comparison.\n\nIt reports, per variant type and length bucket:\n- TP, FP, T and derived FN counts\n- Precision, recall and F1\n- Filtered copies of each input restricted to an optional BED region set"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for summary tables
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count categorized VCFs and write a concordance report
    Count(count::CountArgs),

    /// Print summary tables from an existing report
    Summarize(summarize::SummarizeArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Exit status for a failed command.
///
/// Failures before a report exists (bad configuration, unreadable inputs or outputs)
/// exit with 2; failures while emitting or reading a report exit with 1.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if err.chain().any(|e| e.is::<ReportError>()) {
        1
    } else if err
        .chain()
        .any(|e| e.is::<ConfigError>() || e.is::<CompareError>() || e.is::<ParseError>())
    {
        2
    } else {
        1
    }
}
