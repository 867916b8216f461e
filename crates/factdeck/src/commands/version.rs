use colored::Colorize;

pub fn run() {
    println!(
        "{} {}",
        "factdeck".bold(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
}
