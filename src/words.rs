use include_dir::{include_dir, Dir};
use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

static CATEGORY_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/categories");

/// Supplies the word list for a category. A category file is a JSON array of
/// strings.
pub trait WordSource {
    fn categories(&self) -> Vec<String>;
    fn fetch(&self, category: &str) -> Result<Vec<String>, WordSourceError>;
}

#[derive(Debug)]
pub enum WordSourceError {
    UnknownCategory(String),
    Io { category: String, source: io::Error },
    Malformed { category: String, source: serde_json::Error },
    Empty(String),
}

impl fmt::Display for WordSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordSourceError::UnknownCategory(category) => {
                write!(f, "unknown category '{category}'")
            }
            WordSourceError::Io { category, source } => {
                write!(f, "could not read category '{category}': {source}")
            }
            WordSourceError::Malformed { category, source } => {
                write!(f, "category '{category}' is not a list of words: {source}")
            }
            WordSourceError::Empty(category) => write!(f, "category '{category}' has no words"),
        }
    }
}

impl Error for WordSourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WordSourceError::Io { source, .. } => Some(source),
            WordSourceError::Malformed { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub fn parse_words(category: &str, bytes: &[u8]) -> Result<Vec<String>, WordSourceError> {
    let words: Vec<String> =
        serde_json::from_slice(bytes).map_err(|source| WordSourceError::Malformed {
            category: category.to_string(),
            source,
        })?;

    let words: Vec<String> = words
        .into_iter()
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        return Err(WordSourceError::Empty(category.to_string()));
    }

    Ok(words)
}

fn json_stem(path: &Path) -> Option<String> {
    if path.extension()? != "json" {
        return None;
    }
    path.file_stem()?.to_str().map(str::to_string)
}

/// Categories bundled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedWords;

impl WordSource for EmbeddedWords {
    fn categories(&self) -> Vec<String> {
        let mut names: Vec<String> = CATEGORY_DIR
            .files()
            .filter_map(|file| json_stem(file.path()))
            .collect();
        names.sort();
        names
    }

    fn fetch(&self, category: &str) -> Result<Vec<String>, WordSourceError> {
        let file = CATEGORY_DIR
            .get_file(format!("{category}.json"))
            .ok_or_else(|| WordSourceError::UnknownCategory(category.to_string()))?;

        parse_words(category, file.contents())
    }
}

/// Categories read from `<dir>/<category>.json` at fetch time.
#[derive(Debug, Clone)]
pub struct DirWordSource {
    dir: PathBuf,
}

impl DirWordSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl WordSource for DirWordSource {
    fn categories(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("cannot list categories in {}: {e}", self.dir.display());
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| json_stem(&entry.path()))
            .collect();
        names.sort();
        names
    }

    fn fetch(&self, category: &str) -> Result<Vec<String>, WordSourceError> {
        let path = self.dir.join(format!("{category}.json"));
        let bytes = fs::read(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                WordSourceError::UnknownCategory(category.to_string())
            } else {
                WordSourceError::Io {
                    category: category.to_string(),
                    source,
                }
            }
        })?;

        parse_words(category, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_embedded_categories_listed() {
        let categories = EmbeddedWords.categories();
        assert!(categories.contains(&"animals".to_string()));
        assert!(categories.contains(&"food".to_string()));
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
    }

    #[test]
    fn test_embedded_categories_all_load() {
        for category in EmbeddedWords.categories() {
            let words = EmbeddedWords.fetch(&category).unwrap();
            assert!(!words.is_empty(), "{category} is empty");
        }
    }

    #[test]
    fn test_embedded_unknown_category() {
        assert_matches!(
            EmbeddedWords.fetch("nope"),
            Err(WordSourceError::UnknownCategory(c)) if c == "nope"
        );
    }

    #[test]
    fn test_parse_words() {
        let words = parse_words("t", br#"["cat", " dog ", "", "fox"]"#).unwrap();
        assert_eq!(words, vec!["cat", "dog", "fox"]);
    }

    #[test]
    fn test_parse_words_malformed() {
        assert_matches!(
            parse_words("t", br#"{"words": ["cat"]}"#),
            Err(WordSourceError::Malformed { .. })
        );
        assert_matches!(
            parse_words("t", b"not json"),
            Err(WordSourceError::Malformed { .. })
        );
    }

    #[test]
    fn test_parse_words_empty() {
        assert_matches!(parse_words("t", b"[]"), Err(WordSourceError::Empty(_)));
        assert_matches!(parse_words("t", br#"["  "]"#), Err(WordSourceError::Empty(_)));
    }

    #[test]
    fn test_dir_source() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("colors.json"), r#"["red", "blue"]"#).unwrap();
        fs::write(dir.path().join("broken.json"), "[1, 2]").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let source = DirWordSource::new(dir.path());
        assert_eq!(source.categories(), vec!["broken", "colors"]);
        assert_eq!(source.fetch("colors").unwrap(), vec!["red", "blue"]);
        assert_matches!(source.fetch("broken"), Err(WordSourceError::Malformed { .. }));
        assert_matches!(source.fetch("shapes"), Err(WordSourceError::UnknownCategory(_)));
    }

    #[test]
    fn test_dir_source_missing_dir() {
        let source = DirWordSource::new("/definitely/not/here");
        assert!(source.categories().is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = WordSourceError::Empty("food".into());
        assert_eq!(err.to_string(), "category 'food' has no words");
        assert!(err.source().is_none());
    }
}
