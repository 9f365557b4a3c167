use std::{
    collections::HashSet,
    fs,
    path::Path,
};

use super::LexicardError;

/// Built-in vocabulary used when no word list file is configured.
pub const DEFAULT_WORDS: &[&str] = &[
    "abate",
    "benevolent",
    "brook",
    "candid",
    "concur",
    "copious",
    "debilitate",
    "eloquent",
    "ephemeral",
    "exacerbate",
    "frugal",
    "gregarious",
    "hinder",
    "immaculate",
    "impartial",
    "intrepid",
    "lucid",
    "meticulous",
    "mitigate",
    "notorious",
    "obsolete",
    "pragmatic",
    "prolific",
    "prudent",
    "quell",
    "resilient",
    "scrutinize",
    "substantiate",
    "tenacious",
    "ubiquitous",
    "venerate",
    "viable",
    "vindicate",
    "volatile",
    "wane",
    "zealous",
];

/// Ordered, fixed sequence of distinct words. Read-only once built; every
/// session position is an index into this list.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn new(words: Vec<String>) -> Result<Self, LexicardError> {
        let mut seen = HashSet::new();
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .filter(|w| seen.insert(w.clone()))
            .collect();

        if words.is_empty() {
            return Err(LexicardError::EmptyWordList);
        }

        Ok(Self { words })
    }

    pub fn default_list() -> Self {
        Self { words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect() }
    }

    /// Loads one word per line, skipping blanks. Order and first occurrence
    /// win, as with `new`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LexicardError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            LexicardError::Custom(format!(
                "Failed to read word list {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::new(content.lines().map(|line| line.to_string()).collect())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(|w| w.as_str())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.words.len()
    }
}

impl Default for WordList {
    fn default() -> Self {
        Self::default_list()
    }
}
