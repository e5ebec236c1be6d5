//! Relia CLI - reliability prediction and allocation from the command line.

use anyhow::Context;
use clap::Parser;
use relia_cli::commands;
use relia_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `-v` overrides `RELIA_LOG`, which defaults to `info`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("RELIA_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let output = match cli.command {
        Command::Calculate(args) => commands::execute_calculate(args, &config, &formatter)?,
        Command::Allocate(args) => commands::execute_allocate(args, &formatter)?,
        Command::Derate(args) => commands::execute_derate(args, &config, &formatter)?,
        Command::Hri(args) => commands::execute_hri(args, &formatter)?,
        Command::Config(args) => commands::execute_config(args, &config, &config_path, &formatter)?,
    };
    println!("{}", output);
    Ok(())
}
