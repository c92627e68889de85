//! Token-level spell correction against the domain vocabulary.
//!
//! A bounded edit-distance index suggests corrections for misspelled
//! tokens; transpositions count as a single edit, so "invocie" lands on
//! "invoice" within the default threshold. Correction is a pure function
//! of (index, text) and is
//! idempotent: every vocabulary term is its own best suggestion at
//! distance 0, so an already-corrected sentence passes through unchanged.

use std::collections::HashSet;

use rapidfuzz::distance::damerau_levenshtein;

/// Punctuation trimmed from token edges before lookup.
const TOKEN_PUNCT: &[char] = &[',', '.', '!', '?', ';', ':'];

/// Bounded edit-distance lookup structure over the vocabulary.
///
/// Read-only after training; safe to share across threads without locking.
pub struct FuzzyIndex {
    terms: Vec<String>,
    exact: HashSet<String>,
    /// Maximum edit distance for a suggestion (default 1).
    threshold: usize,
    /// Prefix window used for candidate pruning (default 2 characters).
    depth: usize,
}

impl FuzzyIndex {
    /// Build an index from vocabulary terms with explicit bounds.
    pub fn train<I, S>(terms: I, threshold: usize, depth: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut stored = Vec::new();
        for term in terms {
            let lower = term.as_ref().to_lowercase();
            if seen.insert(lower.clone()) {
                stored.push(lower);
            }
        }
        Self {
            terms: stored,
            exact: seen,
            threshold,
            depth,
        }
    }

    /// Build an index with the default bounds (distance 1, depth 2).
    pub fn with_defaults<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::train(terms, 1, 2)
    }

    /// Number of distinct trained terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Best suggestion for a cleaned, lowercased token.
    ///
    /// An exact vocabulary term always suggests itself. Otherwise the
    /// lowest-distance term within the threshold wins, ties broken by
    /// training order.
    pub fn suggest(&self, token: &str) -> Option<&str> {
        if token.is_empty() {
            return None;
        }
        if let Some(term) = self.exact.get(token) {
            return Some(term.as_str());
        }

        let token_chars: Vec<char> = token.chars().collect();
        let mut best: Option<(usize, &str)> = None;

        for term in &self.terms {
            if term.chars().count().abs_diff(token_chars.len()) > self.threshold {
                continue;
            }
            if !self.prefix_overlap(term, &token_chars) {
                continue;
            }
            let dist = damerau_levenshtein::distance(token_chars.iter().copied(), term.chars());
            if dist <= self.threshold {
                match best {
                    Some((best_dist, _)) if dist >= best_dist => {}
                    _ => best = Some((dist, term.as_str())),
                }
            }
        }

        best.map(|(_, term)| term)
    }

    /// Cheap pruning: the first `depth` characters of token and term must
    /// share at least one character, so a single-character slip near the
    /// start still matches while wholly unrelated words are skipped.
    fn prefix_overlap(&self, term: &str, token_chars: &[char]) -> bool {
        let term_head: Vec<char> = term.chars().take(self.depth).collect();
        token_chars
            .iter()
            .take(self.depth)
            .any(|c| term_head.contains(c))
    }
}

/// Spell corrector over a trained fuzzy index.
pub struct SpellCorrector {
    index: FuzzyIndex,
}

impl SpellCorrector {
    pub fn new(index: FuzzyIndex) -> Self {
        Self { index }
    }

    /// Corrector trained on the built-in ERP vocabulary.
    pub fn with_defaults() -> Self {
        Self::new(FuzzyIndex::with_defaults(
            crate::services::vocabulary::ERP_VOCABULARY.iter().copied(),
        ))
    }

    /// Correct likely misspellings token by token.
    ///
    /// Tokens are split on whitespace; edge punctuation is preserved around
    /// the substituted core. Corrected cores are lowercase; tokens without
    /// a suggestion pass through unchanged.
    pub fn correct(&self, text: &str) -> String {
        let corrected: Vec<String> = text
            .split_whitespace()
            .map(|token| self.correct_token(token))
            .collect();
        corrected.join(" ")
    }

    fn correct_token(&self, token: &str) -> String {
        let stripped = token.trim_start_matches(TOKEN_PUNCT);
        let lead = &token[..token.len() - stripped.len()];
        let core = stripped.trim_end_matches(TOKEN_PUNCT);
        if core.is_empty() {
            return token.to_string();
        }
        let trail = &stripped[core.len()..];

        let cleaned = core.to_lowercase();
        match self.index.suggest(&cleaned) {
            Some(suggestion) if suggestion != cleaned => {
                format!("{}{}{}", lead, suggestion, trail)
            }
            _ => token.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector() -> SpellCorrector {
        SpellCorrector::new(FuzzyIndex::with_defaults(
            crate::services::vocabulary::ERP_VOCABULARY.iter().copied(),
        ))
    }

    #[test]
    fn corrects_single_character_slips() {
        let c = corrector();
        assert_eq!(c.correct("invocie"), "invoice");
        assert_eq!(c.correct("crate new invoce"), "create new invoice");
    }

    #[test]
    fn preserves_edge_punctuation() {
        let c = corrector();
        assert_eq!(c.correct("invoce?"), "invoice?");
        assert_eq!(c.correct("aproval!!"), "approval!!");
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let c = corrector();
        assert_eq!(c.correct("xyzzy flibber"), "xyzzy flibber");
    }

    #[test]
    fn vocabulary_terms_are_their_own_suggestion() {
        let c = corrector();
        assert_eq!(c.correct("invoice report help"), "invoice report help");
    }

    #[test]
    fn correction_is_idempotent() {
        let c = corrector();
        let once = c.correct("pls crate new invocie for vnedor");
        assert_eq!(c.correct(&once), once);
    }

    #[test]
    fn case_is_normalized_only_on_substitution() {
        let c = corrector();
        // "Invocie" is corrected, so the core lowercases.
        assert_eq!(c.correct("Invocie"), "invoice");
        // "Invoice" cleans to an exact term, so the original survives.
        assert_eq!(c.correct("Invoice"), "Invoice");
    }

    #[test]
    fn pure_punctuation_tokens_survive() {
        let c = corrector();
        assert_eq!(c.correct("?"), "?");
        assert_eq!(c.correct("!!! ..."), "!!! ...");
    }
}
