mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{blocks, init, replay, themes, InitArgs, ReplayArgs};
use tracing_subscriber::EnvFilter;

/// Linq CLI - drive the page builder from mutation scripts
#[derive(Parser, Debug)]
#[command(name = "linq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Linq project
    Init(InitArgs),

    /// Apply a mutation script and write the resulting snapshot
    Replay(ReplayArgs),

    /// List block types
    Blocks,

    /// List theme presets
    Themes,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match cli.command {
        Command::Init(args) => init(args, &cwd).map(|_| ()),
        Command::Replay(args) => replay(args, &cwd),
        Command::Blocks => blocks(),
        Command::Themes => themes(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
