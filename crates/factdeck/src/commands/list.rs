use anyhow::Result;
use colored::Colorize;

use crate::catalog::Category;
use crate::config::Settings;
use crate::entries::EntrySource;

pub fn run(settings: &Settings) -> Result<()> {
    let source = EntrySource::new(&settings.data_dir, settings.extension.as_str());
    println!(
        "{} {}",
        "Data directory:".bold(),
        source.data_dir().display()
    );
    println!();
    for line in summary_lines(&source) {
        println!("{line}");
    }
    Ok(())
}

fn summary_lines(source: &EntrySource) -> Vec<String> {
    Category::ALL
        .iter()
        .map(|category| {
            let status = match source.count(category.name()) {
                Some(1) => "1 fact".to_string(),
                Some(n) => format!("{n} facts"),
                None => format!("missing {}", source.file_name(category.name()))
                    .yellow()
                    .to_string(),
            };
            format!("  {:<14} {status}", category.name())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_and_missing() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Music.csv"), "a\nb\nc\n").unwrap();
        std::fs::write(dir.path().join("Space.csv"), "only one\n").unwrap();
        let source = EntrySource::new(dir.path(), "csv");

        let lines = summary_lines(&source);
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[6], format!("  {:<14} 3 facts", "Music"));
        assert_eq!(lines[8], format!("  {:<14} 1 fact", "Space"));
        assert_eq!(
            lines[0],
            format!("  {:<14} missing Animals.csv", "Animals")
        );
    }
}
