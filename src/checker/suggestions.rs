use crate::checker::dictionary::Dictionary;
use rayon::prelude::*;

/// Rank every dictionary word against `word` and return the `limit` best.
///
/// Scores come from [`ratio`]. Equal scores keep dictionary order, so the
/// output is stable for a given word list.
pub fn generate(word: &str, dictionary: &Dictionary, limit: usize) -> Vec<String> {
    if limit == 0 || dictionary.is_empty() {
        return Vec::new();
    }

    let query: Vec<char> = word.chars().collect();

    let mut scored: Vec<(f64, &String)> = dictionary
        .words()
        .par_iter()
        .map(|candidate| {
            let score = ratio_chars(&query, &candidate.chars().collect::<Vec<_>>());
            (score, candidate)
        })
        .collect();

    // stable: ties stay in lexicographic order
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(limit);

    scored.into_iter().map(|(_, w)| w.clone()).collect()
}

/// Normalized similarity in `0.0..=100.0`.
///
/// `100 * 2 * lcs(a, b) / (len(a) + len(b))`, with lengths in characters.
/// Equivalent to one minus the insertion/deletion distance over the combined
/// length. Two empty strings are identical (100).
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }

    100.0 * (2 * lcs_len(a, b)) as f64 / total as f64
}

/// Longest common subsequence length, two rolling rows
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for a_char in a {
        for (j, b_char) in b.iter().enumerate() {
            curr[j + 1] = if a_char == b_char {
                prev[j] + 1
            } else {
                std::cmp::max(prev[j + 1], curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
