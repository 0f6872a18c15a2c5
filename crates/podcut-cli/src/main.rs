//! podcut binary.

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use podcut_cli::{commands, metrics_export, Cli, CliConfig};

fn init_tracing(verbose: bool) {
    // Colored output for terminals, JSON for log collectors
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let level = if verbose { "debug" } else { "info" };
    let mut env_filter = EnvFilter::from_default_env();
    for directive in [format!("podcut={level}"), format!("podcut_media={level}"), format!("podcut_cli={level}")] {
        if let Ok(d) = directive.parse() {
            env_filter = env_filter.add_directive(d);
        }
    }

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(verbose)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load environment variables
    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    let config = CliConfig::from_env();
    debug!("CLI config: {:?}", config);

    let metrics = match &cli.metrics_out {
        Some(_) => match metrics_export::install() {
            Ok(handle) => Some(handle),
            Err(e) => {
                error!("Failed to install metrics recorder: {}", e);
                std::process::exit(1);
            }
        },
        None => None,
    };
    let metrics_out = cli.metrics_out.clone();

    let result = commands::run(cli, config).await;

    if let (Some(handle), Some(path)) = (&metrics, &metrics_out) {
        if let Err(e) = metrics_export::write(handle, path).await {
            error!("{}", e);
        }
    }

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
