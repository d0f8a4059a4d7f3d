use clap::Parser;
use sec_insights::{Cli, JsonReporter, OutputFormat, Reporter, TerminalReporter};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let outcome = match sec_insights::run::run(&cli.report_paths(), &cli.output_path()) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let reporter: Box<dyn Reporter> = match cli.format {
        OutputFormat::Terminal => Box::new(TerminalReporter::new(cli.verbose)),
        OutputFormat::Json => Box::new(JsonReporter::new()),
    };
    println!("{}", reporter.report(&outcome));
    ExitCode::SUCCESS
}
