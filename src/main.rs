use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;
use window_knob::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout is reserved for the --json report
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let report = cli::run(&cli).into_diagnostic()?;
    if cli.json {
        println!("{}", report.to_json().into_diagnostic()?);
    } else {
        report.log();
    }
    Ok(())
}
