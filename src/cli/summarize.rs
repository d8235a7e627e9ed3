use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::report::table::{summary_rows, SummaryRow, SummaryView};
use crate::report::Report;
use crate::stats::summary::CounterSummary;

#[derive(Args)]
pub struct SummarizeArgs {
    /// Report JSON written by `count`
    #[arg(required = true)]
    pub report: PathBuf,
}

/// Execute summarize subcommand
///
/// # Errors
///
/// Returns an error if the report cannot be read or parsed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SummarizeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let report = Report::load(&args.report)?;
    print_summary(&report.counts, format)
}

/// Print Non-SV, SV and overall tables to stdout
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_summary(summary: &CounterSummary, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print_text_summary(summary),
        OutputFormat::Json => print_json_summary(summary)?,
        OutputFormat::Tsv => print_tsv_summary(summary),
    }
    Ok(())
}

fn print_text_summary(summary: &CounterSummary) {
    println!("SV length cutoff: {}", summary.sv_length);
    for view in SummaryView::ALL {
        println!("\n{}", view.title());
        println!(
            "{:<15}\t{:<10}\t{:<10}\t{:<10}\t{:<5}\t{:<5}\t{:<5}",
            "VarType", "Recall", "Precision", "F1", "TP", "T", "FP"
        );
        for row in summary_rows(summary, view) {
            println!(
                "{:<15}\t{:.5}%\t{:.5}%\t{:.5}%\t{:<5}\t{:<5}\t{:<5}",
                row.variant_type,
                row.recall * 100.0,
                row.precision * 100.0,
                row.f1 * 100.0,
                row.tp,
                row.t,
                row.fp,
            );
        }
    }
}

fn print_json_summary(summary: &CounterSummary) -> anyhow::Result<()> {
    let rows = |view| -> Vec<SummaryRow> { summary_rows(summary, view) };
    let output = serde_json::json!({
        "sv_length": summary.sv_length,
        "bin_breaks": summary.bin_breaks,
        "non_sv": rows(SummaryView::NonSv),
        "sv": rows(SummaryView::Sv),
        "overall": rows(SummaryView::Overall),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(summary: &CounterSummary) {
    println!("view\tvariant_type\trecall\tprecision\tf1\ttp\tt\tfp");
    for view in SummaryView::ALL {
        let tag = match view {
            SummaryView::NonSv => "non_sv",
            SummaryView::Sv => "sv",
            SummaryView::Overall => "overall",
        };
        for row in summary_rows(summary, view) {
            println!(
                "{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{}\t{}\t{}",
                tag, row.variant_type, row.recall, row.precision, row.f1, row.tp, row.t, row.fp,
            );
        }
    }
}
