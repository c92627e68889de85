//! Templated reply synthesis.
//!
//! One opener and one closer are drawn uniformly at random from fixed
//! banks; the body depends on the intent and on which entities were
//! extracted. The random source is injected (seedable) so tests are
//! reproducible; no ambient global RNG.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{DetailLevel, EntityKind, Intent, IntentAnalysis, UserPreferences};

const OPENERS: &[&str] = &[
    "Sure thing! 😊",
    "Got it!",
    "Happy to help! 🎯",
    "Right away —",
    "Let me help you with that!",
    "No problem!",
    "Absolutely!",
    "Of course! ✨",
];

const OPENERS_PLAIN: &[&str] = &[
    "Sure thing!",
    "Got it!",
    "Happy to help!",
    "Right away —",
    "Let me help you with that!",
    "No problem!",
    "Absolutely!",
    "Of course!",
];

const CLOSERS: &[&str] = &[
    "Anything else I can help with?",
    "Want me to show you the details?",
    "Need a link to that page?",
    "Would you like a quick walkthrough?",
    "Let me know if you need more info! 📝",
    "Feel free to ask if you get stuck!",
    "Just ping me anytime! 💬",
];

const CLOSERS_PLAIN: &[&str] = &[
    "Anything else I can help with?",
    "Want me to show you the details?",
    "Need a link to that page?",
    "Would you like a quick walkthrough?",
    "Let me know if you need more info!",
    "Feel free to ask if you get stuck!",
    "Just ping me anytime!",
];

/// Generates the final reply text for a classified message.
pub struct ReplyGenerator {
    rng: Mutex<StdRng>,
}

impl ReplyGenerator {
    /// Entropy-seeded generator for production use.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic generator for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Build the reply: opener, blank line, body, blank line, closer.
    ///
    /// `Brief` preference drops the opener and closer entirely. `Help`
    /// omits the closer; its body already ends with a call to action.
    pub fn generate(&self, analysis: &IntentAnalysis, prefs: &UserPreferences) -> String {
        let body = self.body(analysis);
        if prefs.detail == DetailLevel::Brief {
            return body;
        }

        let opener = self.pick(if prefs.emoji { OPENERS } else { OPENERS_PLAIN });

        if analysis.intent == Intent::Help {
            return format!("{}\n\n{}", opener, body);
        }

        let closer = self.pick(if prefs.emoji { CLOSERS } else { CLOSERS_PLAIN });
        format!("{}\n\n{}\n\n{}", opener, body, closer)
    }

    fn pick<'a>(&self, bank: &[&'a str]) -> &'a str {
        let mut rng = self.rng.lock().expect("reply rng poisoned");
        bank[rng.gen_range(0..bank.len())]
    }

    fn body(&self, analysis: &IntentAnalysis) -> String {
        let module = analysis
            .entity(EntityKind::Module)
            .map(|e| display_module(&e.value));
        let document = analysis
            .entity(EntityKind::Document)
            .map(|e| display_document(&e.value));

        match analysis.intent {
            Intent::Create => self.action_body(
                module,
                document,
                &[
                    "To create a {doc}, head to **{module}** and hit **New {Doc}**. Fill in the required fields and save!",
                    "Creating a {doc} is easy: open the **{module}** module, choose **New {Doc}**, and add your line items.",
                ],
                &[
                    "You can create new records from the **{module}** module — look for the **New** button in the list view.",
                    "Head to **{module}** and use **New** to start a fresh record.",
                ],
                "I can help you create records! Try telling me what kind — for example:\n\
                 - \"create an invoice\"\n\
                 - \"create a purchase order\"\n\
                 - \"create a leave request\"",
            ),
            Intent::View => self.action_body(
                module,
                document,
                &[
                    "You'll find your {doc}s under **{module}** — the list view supports filters and search.",
                    "Open **{module}** and pick the {doc} list; filters are in the toolbar.",
                ],
                &[
                    "Everything in **{module}** is browsable from its list view — use the filters to narrow down.",
                    "Head to **{module}**; the list view shows recent records first.",
                ],
                "Tell me what you'd like to see — for example \"show my invoices\" or \"view pending approvals\".",
            ),
            Intent::Edit => self.action_body(
                module,
                document,
                &[
                    "Open the {doc} in **{module}** and hit **Edit**. Submitted records must be recalled first.",
                    "To change a {doc}, find it in **{module}**, open it, and choose **Edit**.",
                ],
                &[
                    "Records in **{module}** are edited from their detail page — open one and hit **Edit**.",
                    "Open the record in **{module}** and choose **Edit**; changes are versioned.",
                ],
                "Tell me which record you want to change — for example \"edit invoice INV-123\".",
            ),
            Intent::Delete => self.action_body(
                module,
                document,
                &[
                    "To delete a {doc}, open it in **{module}** and choose **Delete** from the **⋯** menu. Deletion is soft for 30 days.",
                ],
                &[
                    "Deletion in **{module}** is on each record's **⋯** menu; admins can restore within 30 days.",
                ],
                "Tell me what you'd like to delete — for example \"delete quotation Q-42\".",
            ),
            Intent::Approve => {
                "Your approval queue is at **Workflow → Approvals**. Review pending items, approve or reject, and add a comment if needed."
                    .to_string()
            }
            Intent::Report => self.action_body(
                module,
                document,
                &[
                    "Reports for **{module}** live under **Reports** — pick the {doc} report, set a date range, and generate.",
                ],
                &[
                    "Go to **Reports**, select **{module}**, choose a report type and date range, then generate. Export as CSV, Excel, or PDF.",
                ],
                "Reports live under **Reports** — pick a module, choose a report type, set the date range, and generate.",
            ),
            Intent::Help => "I'm here to help with all things ERP! Ask me about:\n\n\
                 💰 **Finance**: invoices, payments, billing\n\
                 📦 **Procurement**: purchase orders, vendors\n\
                 👥 **HR**: leave, attendance, payroll\n\
                 📊 **Inventory**: stock, warehouse\n\
                 🔄 **Workflow**: approvals\n\
                 📈 **Reports**: analytics, dashboards\n\n\
                 Just type your question naturally — I understand typos!"
                .to_string(),
            Intent::General => self
                .pick(&[
                    "Hmm, I'm not quite sure about that one. Could you rephrase? Mentioning a module helps (Finance, HR, Inventory...).",
                    "I didn't quite catch that! Try asking about invoices, leave, inventory, or reports.",
                    "Not sure I understood. Are you asking about invoices, purchase orders, attendance, or something else?",
                ])
                .to_string(),
        }
    }

    /// Pick and parametrize a body variant by available entities:
    /// both module and document → `both` bank, module only → `module_only`
    /// bank, otherwise the generic menu.
    fn action_body(
        &self,
        module: Option<String>,
        document: Option<String>,
        both: &[&str],
        module_only: &[&str],
        generic: &str,
    ) -> String {
        match (module, document) {
            (Some(m), Some(d)) => fill(self.pick(both), &m, Some(&d)),
            (Some(m), None) => fill(self.pick(module_only), &m, None),
            _ => generic.to_string(),
        }
    }
}

impl Default for ReplyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Substitute `{module}`, `{doc}`, and `{Doc}` (title case) placeholders.
fn fill(template: &str, module: &str, document: Option<&str>) -> String {
    let mut out = template.replace("{module}", module);
    if let Some(doc) = document {
        out = out.replace("{doc}", doc).replace("{Doc}", &title_case(doc));
    }
    out
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn display_module(canonical: &str) -> String {
    match canonical {
        "hr" => "HR".to_string(),
        other => title_case(other),
    }
}

fn display_document(canonical: &str) -> String {
    canonical.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entity;

    fn analysis(intent: Intent, entities: Vec<Entity>) -> IntentAnalysis {
        IntentAnalysis {
            intent,
            entities,
            confidence: 0.9,
        }
    }

    #[test]
    fn help_omits_the_closer() {
        let gen = ReplyGenerator::seeded(7);
        let reply = gen.generate(&analysis(Intent::Help, vec![]), &UserPreferences::default());
        // The body's call to action is the final line; no closer follows.
        assert!(reply.ends_with("I understand typos!"));
        assert!(reply.contains("Finance"));
    }

    #[test]
    fn other_intents_have_opener_body_closer() {
        let gen = ReplyGenerator::seeded(7);
        let reply = gen.generate(
            &analysis(Intent::General, vec![]),
            &UserPreferences::default(),
        );
        assert_eq!(reply.matches("\n\n").count(), 2);
    }

    #[test]
    fn body_is_parametrized_with_module_and_document() {
        let gen = ReplyGenerator::seeded(1);
        let a = analysis(
            Intent::Create,
            vec![
                Entity::new(EntityKind::Module, "finance"),
                Entity::new(EntityKind::Document, "invoice"),
            ],
        );
        let reply = gen.generate(&a, &UserPreferences::default());
        assert!(reply.contains("Finance"), "reply was: {reply}");
        assert!(reply.contains("invoice"), "reply was: {reply}");
        assert!(!reply.contains("{doc}"));
        assert!(!reply.contains("{module}"));
    }

    #[test]
    fn module_only_variant_used_without_document() {
        let gen = ReplyGenerator::seeded(1);
        let a = analysis(
            Intent::View,
            vec![Entity::new(EntityKind::Module, "inventory")],
        );
        let reply = gen.generate(&a, &UserPreferences::default());
        assert!(reply.contains("Inventory"));
    }

    #[test]
    fn generic_menu_without_entities() {
        let gen = ReplyGenerator::seeded(1);
        let reply = gen.generate(
            &analysis(Intent::Create, vec![]),
            &UserPreferences::default(),
        );
        assert!(reply.contains("create an invoice"));
    }

    #[test]
    fn brief_preference_drops_opener_and_closer() {
        let gen = ReplyGenerator::seeded(5);
        let prefs = UserPreferences {
            detail: DetailLevel::Brief,
            ..Default::default()
        };
        let a = analysis(
            Intent::View,
            vec![Entity::new(EntityKind::Module, "finance")],
        );
        let reply = gen.generate(&a, &prefs);
        // Body only: no blank-line separators around it.
        assert!(!reply.contains("\n\n"), "got: {reply}");
        assert!(reply.contains("Finance"));
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = analysis(Intent::General, vec![]);
        let one = ReplyGenerator::seeded(42).generate(&a, &UserPreferences::default());
        let two = ReplyGenerator::seeded(42).generate(&a, &UserPreferences::default());
        assert_eq!(one, two);
    }

    #[test]
    fn emoji_preference_switches_banks() {
        let prefs = UserPreferences {
            emoji: false,
            ..Default::default()
        };
        // Every draw from the plain banks is emoji-free; check a handful.
        let gen = ReplyGenerator::seeded(3);
        for _ in 0..16 {
            let reply = gen.generate(&analysis(Intent::View, vec![]), &prefs);
            let (opener, _) = reply.split_once("\n\n").unwrap();
            assert!(opener.is_ascii(), "opener had emoji: {opener}");
        }
    }
}
