pub mod dictionary;
pub mod suggestions;
pub mod tokenizer;

use crate::{CheckResult, Config, SpellError};
use dictionary::Dictionary;
use std::collections::HashSet;

pub struct SpellChecker {
    dictionary: Dictionary,
    max_suggestions: usize,
}

impl SpellChecker {
    /// Build a checker over the corrector word list named in the config.
    /// A missing list yields a checker that flags every word.
    pub fn new(config: &Config) -> Self {
        let dictionary = Dictionary::load_or_empty(&config.corrector_dictionary);
        Self::with_dictionary(dictionary, config.max_suggestions)
    }

    pub fn with_dictionary(dictionary: Dictionary, max_suggestions: usize) -> Self {
        Self {
            dictionary,
            max_suggestions,
        }
    }

    pub fn is_correct(&self, word: &str) -> bool {
        self.dictionary.contains(&word.to_lowercase())
    }

    pub fn suggest_corrections(&self, word: &str, limit: usize) -> Vec<String> {
        suggestions::generate(&word.to_lowercase(), &self.dictionary, limit)
    }

    /// Scan `text` and report each unknown word once, at its first occurrence.
    pub fn spell_check_text(&self, text: &str) -> CheckResult {
        let mut seen = HashSet::new();
        let mut errors = Vec::new();

        for span in tokenizer::words(text) {
            let word_lower = span.text.to_lowercase();

            if self.dictionary.contains(&word_lower) {
                continue;
            }

            if !seen.insert(word_lower.clone()) {
                continue;
            }

            let suggestions =
                suggestions::generate(&word_lower, &self.dictionary, self.max_suggestions);

            errors.push(SpellError {
                length: span.text.chars().count(),
                word: span.text,
                index: span.start,
                suggestions,
            });
        }

        tracing::debug!(errors = errors.len(), "spell check finished");

        CheckResult { errors }
    }
}
