use clap::Parser;
use storefront_e2e::cli::commands::{RunArgs, cmd_list, cmd_run};
use storefront_e2e::cli::config::{Cli, Commands, RunOverrides, load_config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Run {
            category,
            filter,
            format,
            output,
            headless,
            base_url,
            settle_scale,
            node,
            script,
            trace,
        } => {
            let args = RunArgs {
                category,
                filter,
                format,
                output,
                trace,
                overrides: RunOverrides {
                    headless,
                    base_url,
                    settle_scale,
                    node,
                    script,
                },
            };
            let all_passed = cmd_run(&args, &config, cli.verbose)?;
            if !all_passed {
                std::process::exit(1);
            }
        }
        Commands::List { category, filter } => {
            cmd_list(category.as_deref(), filter.as_deref())?;
        }
    }

    Ok(())
}

/// RUST_LOG wins; otherwise -v raises the level from info.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
