use crate::TextSpan;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\b\w+\b").unwrap();
}

/// Split text into word spans. Anything outside a run of word characters
/// (punctuation, whitespace) is a separator.
pub fn words(text: &str) -> Vec<TextSpan> {
    WORD.find_iter(text)
        .map(|m| TextSpan {
            text: m.as_str().to_string(),
            start: m.start(),
        })
        .collect()
}
