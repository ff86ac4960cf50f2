//! Prefix-based stem derivation for Malagasy verbs.
//!
//! Active verbs are built from a root with a prefix such as `man-` or `mi-`,
//! and some prefixes mutate the root's first consonant (`man` + `tasa` gives
//! `manasa`). Stripping the prefix and restoring the consonant gives the
//! stem.

/// Prefix and the consonant restorations it applies to the stem onset.
pub struct PrefixRule {
    pub prefix: &'static str,
    pub onsets: &'static [(&'static str, &'static str)],
}

/// Tried in order, first match wins. Longer prefixes come before the
/// shorter prefixes they extend.
pub const PREFIX_RULES: &[PrefixRule] = &[
    PrefixRule {
        prefix: "mang",
        onsets: &[("ng", "k")],
    },
    PrefixRule {
        prefix: "mam",
        onsets: &[("m", "p")],
    },
    PrefixRule {
        prefix: "man",
        onsets: &[("ng", "k"), ("n", "t"), ("m", "p")],
    },
    PrefixRule {
        prefix: "mi",
        onsets: &[],
    },
    PrefixRule {
        prefix: "ma",
        onsets: &[],
    },
];

const DIGRAPH: &str = "ng";

/// Derive the stem of `word`. Unknown shapes come back lowercased but
/// otherwise unchanged.
pub fn lemmatize(word: &str) -> String {
    let word = word.trim().to_lowercase();

    for rule in PREFIX_RULES {
        let Some(stem) = word.strip_prefix(rule.prefix) else {
            continue;
        };
        if stem.is_empty() {
            continue;
        }

        return rule.apply(stem);
    }

    word
}

impl PrefixRule {
    fn apply(&self, stem: &str) -> String {
        if let Some(rest) = stem.strip_prefix(DIGRAPH) {
            if let Some(replacement) = self.replacement(DIGRAPH) {
                return format!("{}{}", replacement, rest);
            }
        }

        let mut chars = stem.chars();
        if let Some(first) = chars.next() {
            let mut buf = [0u8; 4];
            if let Some(replacement) = self.replacement(first.encode_utf8(&mut buf)) {
                return format!("{}{}", replacement, chars.as_str());
            }
        }

        stem.to_string()
    }

    fn replacement(&self, onset: &str) -> Option<&'static str> {
        self.onsets
            .iter()
            .find(|(from, _)| *from == onset)
            .map(|(_, to)| *to)
    }
}
