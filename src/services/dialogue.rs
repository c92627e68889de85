//! Scripted dialogue flows: greeting detection, yes/no confirmation
//! answers, follow-up cues, and the long-form topic explanations served
//! when a user asks for more.
//!
//! Everything here is a total function over text plus session context; the
//! engine owns the side effects (key-value reads/writes, history).

use rapidfuzz::distance::levenshtein;

use crate::models::Intent;

/// Greeting lexicon. Close misspellings are tolerated for longer words.
const GREETINGS: &[&str] = &["hi", "hello", "hey"];

/// Affirmative answers to a pending yes/no question.
const AFFIRMATIVES: &[&str] = &[
    "yes", "y", "yeah", "yep", "sure", "ok", "okay", "confirm", "go ahead", "please do",
];

/// Phrases that cue a follow-up on the previous topic.
const FOLLOW_UP_PHRASES: &[&str] = &[
    "tell me more",
    "more",
    "explain",
    "elaborate",
    "continue",
    "go on",
    "also",
    "what about",
];

/// Thank-you cues, answered with a short scripted acknowledgement.
const THANKS: &[&str] = &["thank", "thanks", "thanku", "thx"];

/// A short message (at most this many tokens) with a known last topic is
/// treated as a follow-up even without an explicit cue phrase.
const SHORT_MESSAGE_TOKENS: usize = 3;

/// Is the message a greeting?
///
/// The first token must match the lexicon: exactly for words of up to
/// three characters, within edit distance 1 otherwise. Longer sentences
/// ("hi, how do I create an invoice") are left to normal classification,
/// so only short messages count.
pub fn is_greeting(text: &str) -> bool {
    let mut tokens = text.split_whitespace();
    let first = match tokens.next() {
        Some(t) => t.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase(),
        None => return false,
    };
    if first.is_empty() || tokens.count() + 1 > SHORT_MESSAGE_TOKENS {
        return false;
    }
    GREETINGS.iter().any(|g| {
        if g.len() <= 3 {
            first == *g
        } else {
            levenshtein::distance(first.chars(), g.chars()) <= 1
        }
    })
}

/// Word-boundary-safe affirmative test.
///
/// Matches a lexicon phrase exactly, or as a prefix/suffix/infix delimited
/// by whitespace: "ok then" is affirmative, "brok en" is not.
pub fn is_affirmative(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    AFFIRMATIVES.iter().any(|phrase| {
        lower == *phrase
            || lower.starts_with(&format!("{} ", phrase))
            || lower.ends_with(&format!(" {}", phrase))
            || lower.contains(&format!(" {} ", phrase))
    })
}

/// Does the message thank the bot?
pub fn is_thanks(text: &str) -> bool {
    let lower = text.to_lowercase();
    THANKS.iter().any(|t| lower.contains(t))
}

/// Should the message be treated as a follow-up to `last_topic`?
pub fn is_follow_up(text: &str, has_last_topic: bool) -> bool {
    let lower = text.trim().to_lowercase();
    if lower.is_empty() {
        return false;
    }
    let short = lower.split_whitespace().count() <= SHORT_MESSAGE_TOKENS;
    if short && has_last_topic {
        return true;
    }
    // A leading "and" continues the previous thought; an infix "and" is an
    // ordinary conjunction and must not cue a follow-up.
    if lower == "and" || lower.starts_with("and ") {
        return true;
    }
    FOLLOW_UP_PHRASES.iter().any(|phrase| {
        lower == *phrase
            || lower.starts_with(&format!("{} ", phrase))
            || lower.ends_with(&format!(" {}", phrase))
            || lower.contains(&format!(" {} ", phrase))
    })
}

/// Long-form explanation for a previously classified topic.
///
/// Returned verbatim for follow-ups, bypassing classification.
pub fn topic_detail(topic: Intent) -> Option<&'static str> {
    let detail = match topic {
        Intent::Create => {
            "Here's the longer version on creating records:\n\
             - Every module has a **New** button in its list view (e.g. Finance → Invoices → New Invoice).\n\
             - Required fields are marked with an asterisk; drafts can be saved at any point.\n\
             - Saving routes the record into the module's approval workflow if one is configured.\n\
             - You can duplicate an existing record from its **⋯** menu to skip repetitive data entry."
        }
        Intent::View => {
            "More on finding and viewing records:\n\
             - Each module's list view supports column filters and full-text search.\n\
             - Saved filters live under the funnel icon; your five most recent searches are kept.\n\
             - Record pages show an activity timeline with every change and who made it."
        }
        Intent::Edit => {
            "More on editing:\n\
             - Open the record and hit **Edit**; fields lock while a colleague is editing.\n\
             - Submitted records need to be recalled before they can change.\n\
             - Every edit is versioned — the history tab can restore any earlier state."
        }
        Intent::Delete => {
            "More on deleting:\n\
             - Deletion is soft for thirty days; admins can restore from the recycle view.\n\
             - Records referenced elsewhere (e.g. an invoice on a payment) refuse deletion until unlinked.\n\
             - Bulk delete lives in the list view under the checkbox menu."
        }
        Intent::Approve => {
            "More on approvals:\n\
             - Your queue is at Workflow → Approvals, newest first.\n\
             - Approving or rejecting asks for an optional comment that is stored on the record.\n\
             - Chains with several approvers move to the next person automatically.\n\
             - Out-of-office delegation is under your profile's workflow settings."
        }
        Intent::Report => {
            "More on reports:\n\
             - Reports → Builder lets you pick a module, columns, filters, and a date range.\n\
             - Any report can be scheduled for e-mail delivery (daily, weekly, monthly).\n\
             - Exports come out as CSV, Excel, or PDF.\n\
             - Dashboards are collections of saved reports; drag tiles to rearrange."
        }
        Intent::Help => {
            "A quick map of what I can help with:\n\
             - **Finance**: invoices, payments, billing\n\
             - **Procurement**: purchase orders, vendors\n\
             - **HR**: leave, attendance, payroll\n\
             - **Inventory**: stock, warehouse\n\
             - **Workflow**: approvals\n\
             - **Reports**: analytics, dashboards\n\
             Ask naturally — typos are fine."
        }
        Intent::General => return None,
    };
    Some(detail)
}

/// Personalized greeting. First-time users also get the scripted
/// attendance question; the caller transitions the state accordingly.
pub fn greeting_reply(first_time: bool, emoji: bool) -> String {
    let wave = if emoji { " 👋" } else { "" };
    if first_time {
        format!(
            "Hey there!{wave} Great to see you! I'm your ERP assistant — \
             invoices, leave, approvals, reports, you name it.\n\n\
             By the way, shall I mark you present for today? (yes/no)"
        )
    } else {
        format!(
            "Welcome back!{wave} What can I help you with today?\n\n\
             Ask about invoices, leave, approvals, or reports — typos welcome."
        )
    }
}

/// Confirmation after an affirmative attendance answer.
pub fn attendance_confirmed_reply(emoji: bool) -> String {
    if emoji {
        "Done — you're marked present for today. ✅".to_string()
    } else {
        "Done — you're marked present for today.".to_string()
    }
}

/// Neutral reply when a pending question is declined (or the answer was
/// anything but affirmative).
pub fn question_declined_reply() -> String {
    "No problem, I haven't changed anything. Let me know if you need anything else.".to_string()
}

/// Scripted acknowledgement for a thank-you.
pub fn thanks_reply(emoji: bool) -> String {
    if emoji {
        "You're very welcome! 😊 Happy to help anytime — just ping me if you need anything else."
            .to_string()
    } else {
        "You're very welcome! Happy to help anytime — just ping me if you need anything else."
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greetings_match_exactly_and_with_slips() {
        assert!(is_greeting("hi"));
        assert!(is_greeting("Hello!"));
        assert!(is_greeting("hey there"));
        // One slip in a longer word is tolerated.
        assert!(is_greeting("helo"));
        assert!(is_greeting("hullo"));
    }

    #[test]
    fn short_words_require_exact_greeting() {
        // "his"/"is" must not greet via distance-1 on "hi".
        assert!(!is_greeting("his invoice"));
        assert!(!is_greeting("is"));
    }

    #[test]
    fn long_sentences_are_not_greetings() {
        assert!(!is_greeting("hi how do i create an invoice"));
        assert!(!is_greeting("show pending approvals"));
    }

    #[test]
    fn affirmatives_are_word_boundary_safe() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("Yes please"));
        assert!(is_affirmative("ok then"));
        assert!(is_affirmative("go ahead"));
        // "okay" matches as its own lexicon entry, not inside other words.
        assert!(is_affirmative("okay"));
        assert!(!is_affirmative("broken"));
        assert!(!is_affirmative("nope"));
        assert!(!is_affirmative("not yet decided no"));
    }

    #[test]
    fn follow_up_via_phrase_or_short_message() {
        assert!(is_follow_up("tell me more", false));
        assert!(is_follow_up("can you elaborate on that", false));
        assert!(is_follow_up("and reports?", true));
        // Short but no prior topic, no cue phrase.
        assert!(!is_follow_up("invoices?", false));
        assert!(!is_follow_up("", true));
    }

    #[test]
    fn leading_and_cues_a_follow_up_infix_does_not() {
        assert!(is_follow_up("and what about inventory reports", false));
        assert!(is_follow_up("and the approvals side of it please", true));
        // "and" in the middle of a fresh request is just a conjunction.
        assert!(!is_follow_up("create an invoice and a quotation today", true));
    }

    #[test]
    fn every_classified_topic_has_detail_except_general() {
        for intent in [
            Intent::Create,
            Intent::View,
            Intent::Edit,
            Intent::Delete,
            Intent::Approve,
            Intent::Report,
            Intent::Help,
        ] {
            assert!(topic_detail(intent).is_some(), "missing detail for {intent}");
        }
        assert!(topic_detail(Intent::General).is_none());
    }

    #[test]
    fn thanks_detection() {
        assert!(is_thanks("thanks a lot"));
        assert!(is_thanks("thanku"));
        assert!(!is_thanks("that tank is full"));
    }
}
