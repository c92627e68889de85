//! Property and example tests for the spell-correction pipeline.

use ledgerbot::services::{FuzzyIndex, SpellCorrector};
use proptest::prelude::*;

fn corrector() -> SpellCorrector {
    SpellCorrector::with_defaults()
}

#[test]
fn common_misspellings_are_fixed() {
    let c = corrector();
    for (input, expected) in [
        ("invocie", "invoice"),
        ("aproval", "approval"),
        ("atendance", "attendance"),
        ("inventry", "inventory"),
        ("vnedor", "vendor"),
        ("purchse order", "purchase order"),
    ] {
        assert_eq!(c.correct(input), expected);
    }
}

#[test]
fn sentence_structure_survives_correction() {
    let c = corrector();
    assert_eq!(
        c.correct("how do i crate an invocie?"),
        "how do i create an invoice?"
    );
}

#[test]
fn custom_threshold_widens_matching() {
    // Distance 2 slips only correct with a wider threshold.
    let strict = SpellCorrector::new(FuzzyIndex::train(["invoice"], 1, 2));
    let loose = SpellCorrector::new(FuzzyIndex::train(["invoice"], 2, 2));
    assert_eq!(strict.correct("invce"), "invce");
    assert_eq!(loose.correct("invce"), "invoice");
}

proptest! {
    /// Correcting already-corrected text changes nothing.
    #[test]
    fn correction_is_idempotent(text in "[a-zA-Z ,.!?]{0,60}") {
        let c = corrector();
        let once = c.correct(&text);
        prop_assert_eq!(c.correct(&once), once.clone());
    }

    /// Token count is preserved: correction substitutes, never splits or
    /// merges words.
    #[test]
    fn token_count_is_preserved(text in "[a-z ]{0,60}") {
        let c = corrector();
        let corrected = c.correct(&text);
        prop_assert_eq!(
            corrected.split_whitespace().count(),
            text.split_whitespace().count()
        );
    }

    /// Vocabulary terms are fixed points.
    #[test]
    fn vocabulary_terms_never_change(
        idx in 0..ledgerbot::services::vocabulary::ERP_VOCABULARY.len()
    ) {
        let term = ledgerbot::services::vocabulary::ERP_VOCABULARY[idx];
        let c = corrector();
        prop_assert_eq!(c.correct(term), term);
    }
}
