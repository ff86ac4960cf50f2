pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod lemmatizer;
pub mod server;
pub mod wikipedia;

use serde::{Deserialize, Serialize};

pub use checker::SpellChecker;
pub use config::Config;

/// Result of one spell-check scan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub errors: Vec<SpellError>,
}

impl CheckResult {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// An unknown word at its first occurrence.
///
/// `index` is a UTF-8 byte offset into the checked text while `length`
/// counts characters. The two only line up for ASCII text: clients that
/// address text by character position, such as rich-text editors, must
/// convert `index` before highlighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellError {
    pub word: String,
    pub index: usize,
    pub length: usize,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TextSpan {
    pub text: String,
    pub start: usize, // Byte offset where the span starts
}
