use anyhow::{Context, Result};
use fst::Set;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Immutable set of lowercase words.
///
/// Lookups go through an FST. The sorted word list is kept alongside so
/// suggestion scoring can walk it without rebuilding strings, always in
/// lexicographic order.
pub struct Dictionary {
    set: Set<Vec<u8>>,
    words: Vec<String>,
}

impl Dictionary {
    /// Build a dictionary from arbitrary words. Words are trimmed, lowercased
    /// and deduplicated; blank entries are dropped.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sorted: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        sorted.sort();
        sorted.dedup();

        let set = Set::from_iter(&sorted).context("Failed to build dictionary")?;
        Ok(Self { set, words: sorted })
    }

    pub fn empty() -> Self {
        Self {
            set: Set::default(),
            words: Vec::new(),
        }
    }

    /// Load a newline-delimited word list
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;

        Self::from_words(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    /// Load a word list, degrading to an empty dictionary when the file is
    /// missing or unreadable.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load_from_path(path) {
            Ok(dict) => {
                tracing::info!(path = %path.display(), words = dict.len(), "dictionary loaded");
                dict
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "dictionary unavailable, using empty word set: {:#}", e);
                Self::empty()
            }
        }
    }

    /// Check if word exists in dictionary. Callers pass the lowercase form.
    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// All words in lexicographic order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Write words as a sorted, newline-delimited list
    pub fn write_word_list<I, S>(words: I, output_path: &Path) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dict = Self::from_words(words)?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        let file = fs::File::create(output_path)
            .with_context(|| format!("Failed to create word list: {}", output_path.display()))?;
        let mut writer = std::io::BufWriter::new(file);
        for word in dict.words() {
            writeln!(writer, "{}", word)?;
        }
        writer.flush()?;

        Ok(dict.len())
    }
}
