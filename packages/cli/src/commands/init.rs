use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Theme preset new pages start with
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

/// Writes a default config; returns whether a file was written
pub fn init(args: InitArgs, cwd: &str) -> Result<bool> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(false);
    }

    println!("{}", "📝 Initializing Linq project...".bright_blue().bold());

    let mut config = Config::default();
    if let Some(theme) = args.theme {
        if linq_builder::find_preset(&theme).is_none() {
            anyhow::bail!("Unknown theme: {}", theme);
        }
        config.default_theme = theme;
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Write a mutation script, e.g. edits.json");
    println!("  2. Run: linq replay edits.json");
    println!("  3. Check output in {}", config.out_file);

    Ok(true)
}
