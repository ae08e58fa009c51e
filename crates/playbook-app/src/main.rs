//! Playbook CLI entry point.

use clap::Parser;
use playbook_app::Cli;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
    log::info!("Starting playbook");

    if let Err(e) = playbook_app::run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
