use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use varcomp_stats::cli;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("varcomp_stats=debug,info")
    } else {
        EnvFilter::new("varcomp_stats=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        cli::Commands::Count(args) => cli::count::run(args, cli.format),
        cli::Commands::Summarize(args) => cli::summarize::run(args, cli.format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(cli::exit_code(&e))
        }
    }
}
