use serde::{Deserialize, Serialize};

use crate::models::Intent;
use crate::services::history::HistoryLog;

/// A scripted yes/no question the bot is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingQuestion {
    /// "Shall I mark you present for today?"
    AttendanceConfirm,
}

/// How much detail the user wants in replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    /// Body only: no opener or closer around classified replies.
    Brief,
    #[default]
    Standard,
    /// Append the long-form topic explanation to classified replies.
    Full,
}

/// Per-user reply preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    pub detail: DetailLevel,
    pub emoji: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            detail: DetailLevel::default(),
            emoji: true,
        }
    }
}

/// Dialogue position within scripted flows.
///
/// A question is pending iff `pending_question` is `Some`; the awaiting
/// flag of older designs is structural here. The methods below are the only
/// mutation path; the engine never pokes fields directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationState {
    pub topic: Option<String>,
    pub sub_topic: Option<String>,
    pending_question: Option<PendingQuestion>,
    pub follow_up_count: u32,
}

impl ConversationState {
    /// Enter a scripted yes/no gate.
    pub fn begin_question(
        &mut self,
        question: PendingQuestion,
        topic: impl Into<String>,
        sub_topic: impl Into<String>,
    ) {
        self.topic = Some(topic.into());
        self.sub_topic = Some(sub_topic.into());
        self.pending_question = Some(question);
    }

    /// Clear any pending question, returning it. Either answer branch of a
    /// confirmation flow ends up back in the idle state.
    pub fn resolve_question(&mut self) -> Option<PendingQuestion> {
        self.sub_topic = None;
        self.pending_question.take()
    }

    /// The question currently awaiting an answer, if any.
    pub fn pending_question(&self) -> Option<PendingQuestion> {
        self.pending_question
    }

    /// Record that a follow-up was served for the current topic.
    pub fn note_follow_up(&mut self) {
        self.follow_up_count += 1;
    }

    /// Record a freshly classified topic.
    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = Some(topic.into());
        self.sub_topic = None;
    }
}

/// Accumulated conversational state for one user.
///
/// Created lazily on the user's first message; owned exclusively by the
/// engine through the session store's per-session lock.
#[derive(Debug)]
pub struct UserSession {
    pub user_id: String,
    pub history: HistoryLog,
    /// Last classified intent, used for follow-up resolution.
    pub last_topic: Option<Intent>,
    pub state: ConversationState,
    pub preferences: UserPreferences,
}

impl UserSession {
    pub fn new(user_id: impl Into<String>, history_cap: usize) -> Self {
        Self {
            user_id: user_id.into(),
            history: HistoryLog::new(history_cap),
            last_topic: None,
            state: ConversationState::default(),
            preferences: UserPreferences::default(),
        }
    }
}
