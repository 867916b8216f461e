use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::catalog::Category;
use crate::config::{Config, Overrides, Settings};
use crate::pager::PagerMode;

#[derive(Parser)]
#[command(name = "factdeck")]
#[command(author, version, about)]
#[command(long_about = "Browse categorized trivia facts as sliding cards.\n\n\
    Each category reads `<Category>.csv` from the data directory; every row is one card.\n\n\
    Examples:\n  \
    factdeck                          Open the category picker\n  \
    factdeck --category music         Jump straight to the Music cards\n  \
    factdeck --category space --auto  Auto-advance through Space facts\n  \
    factdeck list                     Show how many facts each category has")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Open this category directly instead of the home screen
    #[arg(long, value_enum)]
    pub category: Option<Category>,

    /// Start pagers in auto-advance mode
    #[arg(long, conflicts_with = "manual")]
    pub auto: bool,

    /// Start pagers in manual mode
    #[arg(long)]
    pub manual: bool,

    /// Auto-advance interval in milliseconds
    #[arg(long, value_name = "MS")]
    pub interval: Option<u64>,

    /// Directory containing the category data files
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_parser = ["light", "dark"])]
    pub theme: Option<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List categories and how many facts each one has
    List,

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.mode, defaults.data_dir)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        let mode = if self.auto {
            Some(PagerMode::Auto)
        } else if self.manual {
            Some(PagerMode::Manual)
        } else {
            None
        };
        Overrides {
            theme: self.theme.clone(),
            mode,
            auto_interval_ms: self.interval,
            data_dir: self.data_dir.clone(),
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        let overrides = self.overrides();
        match self.command {
            Some(Commands::List) => {
                let settings = Settings::resolve(&Config::load_or_default(), &overrides);
                crate::commands::list::run(&settings)
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::version::run();
                Ok(())
            }
            None => {
                let settings = Settings::resolve(&Config::load_or_default(), &overrides);
                if !settings.data_dir.is_dir() {
                    anyhow::bail!("Data directory not found: {}", settings.data_dir.display());
                }
                crate::app::run(settings, self.category)
            }
        }
    }
}
