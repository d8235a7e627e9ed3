use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use crate::cli::summarize::print_summary;
use crate::cli::OutputFormat;
use crate::core::types::MatchMode;
use crate::evaluation::driver::{ComparisonDriver, ComparisonInputs};
use crate::evaluation::filter::RegionFilter;
use crate::parsing;
use crate::parsing::vcf::ParseOptions;
use crate::report::{self, InputFiles, Report, RunParams};
use crate::stats::binning::LengthBinner;
use crate::stats::counter::ClassificationCounter;
use crate::utils::validation::{parse_bin_breaks, validate_overlap_ratio};

/// Default length at or above which a variant counts as structural
pub const DEFAULT_SV_LENGTH: u64 = 100;

#[derive(Args)]
pub struct CountArgs {
    /// True positive VCF file
    #[arg(long = "tp", value_name = "FILE")]
    pub true_positives: PathBuf,

    /// False positive VCF file
    #[arg(long = "fp", value_name = "FILE")]
    pub false_positives: PathBuf,

    /// False negative VCF file
    #[arg(long = "fn", value_name = "FILE")]
    pub false_negatives: PathBuf,

    /// Truth VCF file
    #[arg(long, value_name = "FILE")]
    pub truth: PathBuf,

    /// Prefix for output files (<prefix>_report.json, <prefix>_tp.vcf, ...)
    #[arg(long)]
    pub prefix: String,

    /// HTML template; the report JSON replaces its <!--VARCOMP_JSON--> marker
    #[arg(long, value_name = "HTML_FILE")]
    pub html: Option<PathBuf>,

    /// Length cutoff at or above which a variant counts as an SV
    #[arg(long, value_name = "SVLEN", default_value_t = DEFAULT_SV_LENGTH)]
    pub sv_length: u64,

    /// Ignore insertion length when classifying (insertions count as length 0)
    #[arg(long)]
    pub ignore_ins_len: bool,

    /// BED file restricting the analysis
    #[arg(long, value_name = "BED_FILE")]
    pub bed: Option<PathBuf>,

    /// Keep variants with either breakend in a region instead of requiring both
    #[arg(long)]
    pub bed_either: bool,

    /// Ascending bin breaks, e.g. '500,1000' gives bins [0,500), [500,1000), [1000,inf)
    #[arg(long, value_name = "BREAKS")]
    pub bin_breaks: Option<String>,

    /// Position tolerance used by the upstream comparison (recorded in the report)
    #[arg(long)]
    pub wiggle: Option<u64>,

    /// Overlap ratio used by the upstream comparison, 0-1 (recorded in the report)
    #[arg(long)]
    pub overlap_ratio: Option<f64>,
}

/// Execute count subcommand
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an input or output cannot be
/// opened, or the primary report cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CountArgs, format: OutputFormat) -> anyhow::Result<()> {
    // Validate everything up front; nothing is read or written on a bad option
    let breaks = parse_bin_breaks(args.bin_breaks.as_deref().unwrap_or(""))
        .context("Invalid --bin-breaks")?;
    let binner = LengthBinner::new(breaks)?;
    let overlap_ratio = args
        .overlap_ratio
        .map(validate_overlap_ratio)
        .transpose()
        .context("Invalid --overlap-ratio")?;
    let match_mode = if args.bed_either {
        MatchMode::Either
    } else {
        MatchMode::Both
    };

    let filter = match &args.bed {
        Some(path) => {
            info!("Using {} to intersect", path.display());
            let regions = parsing::bed::parse_bed_file(path)
                .with_context(|| format!("Failed to load regions from {}", path.display()))?;
            let (region_count, chromosome_count) =
                (regions.region_count(), regions.chromosome_count());
            let filter = RegionFilter::new(regions, match_mode);
            info!(
                "Loaded {} regions on {} chromosomes ({:?} mode)",
                region_count,
                chromosome_count,
                filter.mode()
            );
            filter
        }
        None => {
            if args.bed_either {
                warn!("--bed-either has no effect without --bed");
            }
            RegionFilter::disabled()
        }
    };

    let inputs = ComparisonInputs {
        true_positives: args.true_positives.clone(),
        false_positives: args.false_positives.clone(),
        false_negatives: args.false_negatives.clone(),
        truth: args.truth.clone(),
    };
    let options = ParseOptions {
        ignore_insertion_length: args.ignore_ins_len,
    };

    let mut counter = ClassificationCounter::new(binner, args.sv_length);
    let records = ComparisonDriver::new(&filter, options).run(&inputs, &args.prefix, &mut counter)?;

    let params = RunParams {
        inputs: InputFiles {
            tp_vcf_filename: args.true_positives.display().to_string(),
            fp_vcf_filename: args.false_positives.display().to_string(),
            fn_vcf_filename: args.false_negatives.display().to_string(),
            t_vcf_filename: args.truth.display().to_string(),
        },
        bed_filename: args.bed.as_ref().map(|p| p.display().to_string()),
        match_mode,
        ignore_insertion_length: args.ignore_ins_len,
        wiggle: args.wiggle,
        overlap_ratio,
    };
    let report = Report::assemble(params, &counter, records);

    let (report_path, json) =
        report::emit(&report, &args.prefix).context("Failed to write report")?;
    info!("Wrote report to {}", report_path.display());

    // HTML failures are logged only; the JSON report is kept
    if let Some(template) = &args.html {
        match report::emit_html(template, &json, &args.prefix) {
            Ok(path) => info!("Wrote HTML report to {}", path.display()),
            Err(e) => warn!("Failed to write HTML report: {e}"),
        }
    }

    print_summary(&report.counts, format)?;
    info!("Done!");
    Ok(())
}
