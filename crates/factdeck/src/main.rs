mod app;
mod catalog;
mod cli;
mod commands;
mod config;
mod entries;
mod fit;
mod logging;
mod pager;
mod theme;

use clap::Parser;
use colored::Colorize;

fn main() {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = logging::init(cli.verbose, cli.quiet) {
        eprintln!("{} {e}", "warning:".yellow().bold());
    }

    if let Err(e) = cli.run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
