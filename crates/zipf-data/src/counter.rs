//! Word counting for plain text.

use std::io::Read;
use std::path::Path;

use tracing::debug;
use zipf_core::models::WordCounts;
use zipf_core::{Result, ZipfError};

/// Split `text` into normalized words.
///
/// Chunks are separated by whitespace, stripped of leading and trailing ASCII
/// punctuation, and lower-cased. Chunks that are pure punctuation vanish.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|chunk| chunk.trim_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}

/// Count every word in `text`.
pub fn count_text(text: &str) -> Result<WordCounts> {
    let mut counts = WordCounts::new();
    for word in tokenize(text) {
        counts.increment(&word)?;
    }
    Ok(counts)
}

/// Read all of `reader` and count its words.
///
/// `source` labels errors; pass `"-"` for stdin.
pub fn count_words<R: Read>(mut reader: R, source: &Path) -> Result<WordCounts> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| ZipfError::from_io(source, e))?;
    let counts = count_text(&text)?;
    debug!(
        "{}: {} words, {} distinct",
        source.display(),
        counts.total(),
        counts.len()
    );
    Ok(counts)
}

/// Count the words of a file, or of stdin when `path` is `None` or `"-"`.
pub fn count_input(path: Option<&Path>) -> Result<WordCounts> {
    match path {
        Some(p) if p != Path::new("-") => {
            let file = std::fs::File::open(p).map_err(|e| ZipfError::from_io(p, e))?;
            count_words(file, p)
        }
        _ => count_words(std::io::stdin().lock(), Path::new("-")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_tokenize_strips_punctuation_and_lowercases() {
        let words: Vec<String> = tokenize("\"Hello,\" she said. HELLO!").collect();
        assert_eq!(words, vec!["hello", "she", "said", "hello"]);
    }

    #[test]
    fn test_tokenize_keeps_inner_punctuation() {
        let words: Vec<String> = tokenize("don't re-enter -- ... ").collect();
        assert_eq!(words, vec!["don't", "re-enter"]);
    }

    #[test]
    fn test_tokenize_non_ascii_letters_untouched() {
        let words: Vec<String> = tokenize("¿Qué? Él").collect();
        assert_eq!(words, vec!["¿qué", "él"]);
    }

    #[test]
    fn test_count_text() {
        let counts = count_text("the cat and the hat. The end").unwrap();
        assert_eq!(counts.get("the"), 3);
        assert_eq!(counts.get("cat"), 1);
        assert_eq!(counts.len(), 5);
        assert_eq!(counts.total(), 7);
    }

    #[test]
    fn test_count_words_empty_text() {
        let counts = count_words("   \n\t".as_bytes(), Path::new("-")).unwrap();
        assert!(counts.is_empty());
    }

    #[test]
    fn test_count_words_invalid_utf8() {
        let data: &[u8] = b"ok \xff\xfe";
        let err = count_words(data, Path::new("bad.txt")).unwrap_err();
        assert!(matches!(err, ZipfError::FileRead { .. }));
    }

    #[test]
    fn test_count_input_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.txt");
        std::fs::write(&path, "Call me Ishmael. Call me!").unwrap();

        let counts = count_input(Some(&path)).unwrap();
        assert_eq!(counts.get("call"), 2);
        assert_eq!(counts.get("me"), 2);
        assert_eq!(counts.get("ishmael"), 1);
    }

    #[test]
    fn test_count_input_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = count_input(Some(&dir.path().join("nope.txt"))).unwrap_err();
        assert!(matches!(err, ZipfError::FileNotFound(_)));
    }
}
