use clap::Parser;
use flexiplan_core::storage::config::Config;
use flexiplan_core::utils::error_helpers::display_message;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::dispatcher::Dispatcher;
use cli::main_types::Cli;

const LOG_ENV_VAR: &str = "FLEXIPLAN_LOG";

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level));

    // `log` records from flexiplan-core are bridged by the subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_dir = match cli.config_dir.clone() {
        Some(dir) => dir,
        None => match Config::default_dir() {
            Ok(dir) => dir,
            Err(err) => {
                eprintln!("Error locating config directory: {}", err);
                std::process::exit(1);
            }
        },
    };

    // Load Config
    let config = match Config::load(Some(Config::config_file_in(&config_dir))) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    if cli.verbose {
        println!("Verbose mode is enabled");
        println!("Using config directory: {}", config_dir.display());
    }

    let dispatcher = Dispatcher::new(config, config_dir, cli.verbose, cli.url.clone());

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!(
            "{} {}",
            e.severity().emoji(),
            display_message(&e, "Something went wrong")
        );
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("💡 {}", hint);
        }
        std::process::exit(1);
    }
}
