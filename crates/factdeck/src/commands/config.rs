use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::{Config, Overrides, Settings};

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = if path.exists() {
        Config::load_from(&path)?
    } else {
        Config::default()
    };

    println!("{} {}", "Config file:".bold(), path.display());
    if !path.exists() {
        println!("{}", "  (not created yet, showing defaults)".dimmed());
    }
    println!();

    let settings = Settings::resolve(&config, &Overrides::default());
    println!("{}", "Effective settings".bold());
    println!("  {:<18} {}", "theme", settings.theme);
    println!("  {:<18} {}", "mode", settings.mode.name());
    println!(
        "  {:<18} {}",
        "auto_interval_ms",
        settings.auto_interval.as_millis()
    );
    println!("  {:<18} {}", "data_dir", settings.data_dir.display());
    println!("  {:<18} {}", "extension", settings.extension);
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {} = {} ({})",
        "Set".green().bold(),
        key,
        value,
        path.display().to_string().dimmed()
    );
    Ok(())
}
