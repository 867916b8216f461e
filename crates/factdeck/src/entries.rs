use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_EXTENSION: &str = "csv";
const FIELD_DELIMITER: char = ',';
const FIELD_SEPARATOR: &str = ", ";

#[derive(Debug, Error)]
pub enum EntryError {
    #[error("No data file at {path:?}")]
    Missing { path: PathBuf },

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads category entries from `<data_dir>/<category>.<extension>`.
///
/// Nothing is cached: every call goes back to disk, so each pager page sees
/// the file as it is when the page opens.
#[derive(Debug, Clone)]
pub struct EntrySource {
    data_dir: PathBuf,
    extension: String,
}

impl Default for EntrySource {
    fn default() -> Self {
        Self::new(".", DEFAULT_EXTENSION)
    }
}

impl EntrySource {
    pub fn new(data_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn file_name(&self, category: &str) -> String {
        format!("{category}.{}", self.extension)
    }

    pub fn path_for(&self, category: &str) -> PathBuf {
        self.data_dir.join(self.file_name(category))
    }

    /// Load the entries for `category`. Never empty and never an error:
    /// missing or unreadable files become a single placeholder entry.
    pub fn load(&self, category: &str) -> Vec<String> {
        match self.try_load(category) {
            Ok(entries) if entries.is_empty() => {
                vec![format!("No entries in {}", self.file_name(category))]
            }
            Ok(entries) => entries,
            Err(EntryError::Missing { path }) => {
                debug!(?path, "data file missing, using placeholder");
                vec![format!("Missing file: {}", self.file_name(category))]
            }
            Err(e) => {
                warn!(error = %e, "could not read data file");
                vec![format!("Could not read {}", self.file_name(category))]
            }
        }
    }

    /// Load the raw rows for `category`, surfacing why nothing was found.
    pub fn try_load(&self, category: &str) -> Result<Vec<String>, EntryError> {
        let path = self.path_for(category);
        let bytes = std::fs::read(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                EntryError::Missing { path: path.clone() }
            } else {
                EntryError::Read {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        // Stray bytes become U+FFFD; the rest of the file stays readable.
        let contents = String::from_utf8_lossy(&bytes);
        let entries = parse_rows(&contents);
        debug!(?path, count = entries.len(), "loaded entries");
        Ok(entries)
    }

    /// Number of rows backing `category`, or `None` when there is no file.
    pub fn count(&self, category: &str) -> Option<usize> {
        self.try_load(category).ok().map(|rows| rows.len())
    }
}

/// Turn delimited text into display strings, one per non-blank row.
pub fn parse_rows(contents: &str) -> Vec<String> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| split_fields(line).join(FIELD_SEPARATOR))
        .filter(|row| !row.is_empty())
        .collect()
}

/// Split one row into trimmed fields, keeping empty ones. Double quotes group
/// a field so it may contain the delimiter; `""` inside quotes is a literal
/// quote.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
            }
            c if c == FIELD_DELIMITER && !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    fields.push(current);

    fields.into_iter().map(|f| f.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn source_with(files: &[(&str, &str)]) -> (tempfile::TempDir, EntrySource) {
        let dir = tempfile::tempdir().unwrap();
        for (name, contents) in files {
            std::fs::write(dir.path().join(name), contents).unwrap();
        }
        let source = EntrySource::new(dir.path(), "csv");
        (dir, source)
    }

    #[test]
    fn test_missing_file_yields_placeholder() {
        let (_dir, source) = source_with(&[]);
        assert_eq!(source.load("Foo"), vec!["Missing file: Foo.csv".to_string()]);
    }

    #[test]
    fn test_every_missing_category_yields_one_placeholder() {
        let (_dir, source) = source_with(&[]);
        for category in Category::ALL {
            let entries = source.load(category.name());
            assert_eq!(
                entries,
                vec![format!("Missing file: {}.csv", category.name())]
            );
        }
    }

    #[test]
    fn test_try_load_reports_missing() {
        let (_dir, source) = source_with(&[]);
        assert!(matches!(
            source.try_load("Space"),
            Err(EntryError::Missing { .. })
        ));
        assert_eq!(source.count("Space"), None);
    }

    #[test]
    fn test_rows_become_entries() {
        let (_dir, source) = source_with(&[(
            "Music.csv",
            "Beethoven,was deaf\nMozart wrote 600 works\nThe piano,has 88 keys\n",
        )]);
        let entries = source.load("Music");
        assert_eq!(
            entries,
            vec![
                "Beethoven, was deaf".to_string(),
                "Mozart wrote 600 works".to_string(),
                "The piano, has 88 keys".to_string(),
            ]
        );
        assert_eq!(source.count("Music"), Some(3));
    }

    #[test]
    fn test_empty_file_is_never_an_empty_list() {
        let (_dir, source) = source_with(&[("Energy.csv", "\n\n  \n")]);
        assert_eq!(source.load("Energy"), vec!["No entries in Energy.csv".to_string()]);
    }

    #[test]
    fn test_reload_sees_new_contents() {
        let (dir, source) = source_with(&[("Health.csv", "one\n")]);
        assert_eq!(source.load("Health").len(), 1);
        std::fs::write(dir.path().join("Health.csv"), "one\ntwo\n").unwrap();
        assert_eq!(source.load("Health").len(), 2);
    }

    #[test]
    fn test_extension_is_normalized() {
        let source = EntrySource::new("data", ".txt");
        assert_eq!(source.file_name("Space"), "Space.txt");
    }

    #[test]
    fn test_quoted_fields() {
        let rows = parse_rows("\"Water, at sea level\",boils at 100 C\n\"He said \"\"hi\"\"\"\n");
        assert_eq!(
            rows,
            vec![
                "Water, at sea level, boils at 100 C".to_string(),
                "He said \"hi\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_fields_kept_and_bom_dropped() {
        let rows = parse_rows("\u{feff}Light ,, travels fast\r\n\r\nSecond\r\na,b,\r\n");
        assert_eq!(
            rows,
            vec![
                "Light, , travels fast".to_string(),
                "Second".to_string(),
                "a, b, ".to_string(),
            ]
        );
    }

    #[test]
    fn test_unreadable_file_yields_placeholder() {
        let (dir, source) = source_with(&[]);
        std::fs::create_dir(dir.path().join("Music.csv")).unwrap();
        assert!(matches!(
            source.try_load("Music"),
            Err(EntryError::Read { .. })
        ));
        assert_eq!(
            source.load("Music"),
            vec!["Could not read Music.csv".to_string()]
        );
        assert_eq!(source.count("Music"), None);
    }

    #[test]
    fn test_invalid_utf8_keeps_readable_rows() {
        let (dir, source) = source_with(&[]);
        std::fs::write(dir.path().join("Space.csv"), b"\xffa\nMars,is red\n").unwrap();
        assert_eq!(
            source.load("Space"),
            vec!["\u{fffd}a".to_string(), "Mars, is red".to_string()]
        );
    }
}
