use anyhow::{Context, Result};
use clap::Parser;
use linkage_reducer::cli::{Cli, OutputFormat};
use linkage_reducer::pipeline;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = args.reduce_config();
    let summary = pipeline::reduce_file(&args.input, &args.output, &config)
        .with_context(|| format!("Failed to reduce {}", args.input.display()))?;

    match args.format {
        OutputFormat::Text => println!("{}", summary.to_text()),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
        ),
    }

    Ok(())
}
