use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tasklist::cli::commands::Cli;
use tasklist::cli::handlers;
use tasklist::io::config_io;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let config = config_io::read_config();
            let data_dir =
                config_io::resolve_data_dir(&config, cli.data_dir.as_deref().map(Path::new));
            init_tui_logging(cli.verbose, &data_dir);
            if let Err(e) = tasklist::tui::run(config, data_dir) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            init_logging(cli.verbose);
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "tasklist=debug" } else { "tasklist=warn" };
    EnvFilter::try_from_env("TASKLIST_LOG").unwrap_or_else(|_| EnvFilter::new(default))
}

/// CLI commands log to stderr
fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// The TUI owns the terminal, so logs go to a file in the data dir.
/// If the file cannot be opened logging stays off.
fn init_tui_logging(verbose: bool, data_dir: &Path) {
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("tasklist.log"))
    else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}
