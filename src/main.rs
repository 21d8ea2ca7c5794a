use clap::Parser;
use interaction_profiler::cli::commands::{cmd_capture, cmd_compress, cmd_resolve, cmd_synthesize};
use interaction_profiler::cli::config::{Cli, Commands, load_config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Resolve { document, node } => {
            cmd_resolve(&config, &document, node)?;
        }
        Commands::Capture {
            before,
            after,
            node,
            event,
            timestamp,
        } => {
            cmd_capture(&config, &before, &after, node, &event, timestamp)?;
        }
        Commands::Compress { batch } => {
            cmd_compress(&batch)?;
        }
        Commands::Synthesize { records } => {
            cmd_synthesize(&records)?;
        }
    }

    Ok(())
}

/// RUST_LOG wins; otherwise -v, -vv, -vvv raise the level from warn.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
