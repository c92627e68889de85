//! Entity extraction and intent classification over corrected text.
//!
//! Pure pattern-table lookups: static alias tables produce at most one
//! entity per kind, and an ordered rule table classifies the intent. The
//! rule order is load-bearing: a message containing several trigger words
//! classifies by the earliest rule.

use crate::models::{Entity, EntityKind, Intent, IntentAnalysis};

/// Canonical ERP modules with their alias substrings.
///
/// First alias match wins within a key; at most one module entity per pass.
const MODULE_ALIASES: &[(&str, &[&str])] = &[
    ("finance", &["finance", "billing", "accounting", "payment", "invoice", "ledger"]),
    ("procurement", &["procurement", "purchase", "vendor", "supplier"]),
    ("hr", &["hr", "payroll", "salary", "employee", "leave", "attendance"]),
    ("inventory", &["inventory", "stock", "warehouse", "grn"]),
    ("workflow", &["workflow", "approval", "approve"]),
    ("reports", &["report", "dashboard", "analytics"]),
];

/// Canonical document types with their alias substrings.
const DOCUMENT_ALIASES: &[(&str, &[&str])] = &[
    ("invoice", &["invoice", "bill"]),
    ("purchase_order", &["purchase order", "purchase-order"]),
    ("leave", &["leave", "vacation", "time off"]),
    ("attendance", &["attendance", "timesheet"]),
    ("receipt", &["receipt", "goods received", "grn"]),
    ("quotation", &["quotation", "quote", "estimate"]),
];

/// Action verbs, scanned in list order; first match wins.
const ACTION_VERBS: &[&str] = &[
    "create", "view", "edit", "delete", "update", "search", "approve", "reject",
];

/// One classification rule: any trigger substring selects the intent.
struct IntentRule {
    intent: Intent,
    triggers: &'static [&'static str],
}

/// Priority-ordered classification table. Evaluated top to bottom; the
/// first rule with a matching trigger wins.
const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Create,
        triggers: &["create", "make", "add"],
    },
    IntentRule {
        intent: Intent::View,
        triggers: &["view", "show", "see"],
    },
    IntentRule {
        intent: Intent::Edit,
        triggers: &["edit", "update", "change"],
    },
    IntentRule {
        intent: Intent::Delete,
        triggers: &["delete", "remove"],
    },
    IntentRule {
        intent: Intent::Approve,
        triggers: &["approve", "approval"],
    },
    IntentRule {
        intent: Intent::Report,
        triggers: &["report", "dashboard"],
    },
    IntentRule {
        intent: Intent::Help,
        triggers: &["help", "how"],
    },
];

/// Pattern-table extractor. Stateless and immutable after construction.
#[derive(Default)]
pub struct Extractor;

impl Extractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract entities and classify intent for one message.
    pub fn extract(&self, text: &str) -> IntentAnalysis {
        let lower = text.to_lowercase();

        let mut entities = Vec::new();
        if let Some(module) = first_alias_match(&lower, MODULE_ALIASES) {
            entities.push(Entity::new(EntityKind::Module, module));
        }
        if let Some(document) = first_alias_match(&lower, DOCUMENT_ALIASES) {
            entities.push(Entity::new(EntityKind::Document, document));
        }
        if let Some(verb) = ACTION_VERBS.iter().find(|v| lower.contains(*v)) {
            entities.push(Entity::new(EntityKind::Action, *verb));
        }

        let intent = classify(&lower);
        let confidence = score_confidence(&lower, intent, entities.len());

        IntentAnalysis {
            intent,
            entities,
            confidence,
        }
    }
}

/// First canonical key whose alias list matches the lowercased message.
fn first_alias_match(
    lower: &str,
    table: &[(&'static str, &'static [&'static str])],
) -> Option<&'static str> {
    for (canonical, aliases) in table {
        if aliases.iter().any(|alias| lower.contains(alias)) {
            return Some(canonical);
        }
    }
    None
}

/// Evaluate the ordered rule table; fall back to `General`.
fn classify(lower: &str) -> Intent {
    INTENT_RULES
        .iter()
        .find(|rule| rule.triggers.iter().any(|t| lower.contains(t)))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::General)
}

/// Heuristic confidence: base 0.5, +0.2 for any entity, +0.1 more for two
/// or more, +0.2 when the canonical intent keyword itself appears. Clamped
/// to 1.0.
fn score_confidence(lower: &str, intent: Intent, entity_count: usize) -> f32 {
    let mut score: f32 = 0.5;
    if entity_count >= 1 {
        score += 0.2;
    }
    if entity_count >= 2 {
        score += 0.1;
    }
    if let Some(keyword) = intent.keyword() {
        if lower.contains(keyword) {
            score += 0.2;
        }
    }
    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_module_alias_yields_one_module_entity() {
        let analysis = Extractor::new().extract("where is the warehouse?");
        let modules: Vec<_> = analysis
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::Module)
            .collect();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].value, "inventory");
    }

    #[test]
    fn no_duplicate_entities_per_kind() {
        // "invoice" and "billing" are both finance aliases.
        let analysis = Extractor::new().extract("billing invoice question");
        let modules = analysis
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::Module)
            .count();
        assert_eq!(modules, 1);
    }

    #[test]
    fn classification_is_priority_ordered() {
        // Contains both "create" and "view"; the earlier rule wins.
        let analysis = Extractor::new().extract("create and view an invoice");
        assert_eq!(analysis.intent, Intent::Create);

        let analysis = Extractor::new().extract("view then delete");
        assert_eq!(analysis.intent, Intent::View);
    }

    #[test]
    fn unmatched_text_is_general() {
        let analysis = Extractor::new().extract("?");
        assert_eq!(analysis.intent, Intent::General);
        assert!(analysis.entities.is_empty());
        assert_eq!(analysis.confidence, 0.5);
    }

    #[test]
    fn confidence_accumulates_and_clamps() {
        // "create new invoice": module (finance) + document (invoice) +
        // action (create) entities, plus the literal keyword "create".
        let analysis = Extractor::new().extract("create new invoice");
        assert_eq!(analysis.intent, Intent::Create);
        assert!((analysis.confidence - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn confidence_without_keyword_bonus() {
        // "make" triggers Create but the canonical "create" is absent;
        // "make a quotation" has a document entity only.
        let analysis = Extractor::new().extract("make a quotation");
        assert_eq!(analysis.intent, Intent::Create);
        assert!((analysis.confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn action_verb_first_match_wins() {
        let analysis = Extractor::new().extract("update or delete the record");
        let action = analysis.entity(EntityKind::Action).unwrap();
        // "delete" precedes "update" in the verb list.
        assert_eq!(action.value, "delete");
    }
}
