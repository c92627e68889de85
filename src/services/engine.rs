//! The chat engine: one inbound message in, one reply (or silence) out.
//!
//! Pipeline per turn: spell correction → scripted dialogue flows →
//! entity/intent extraction → reply synthesis, with history recorded for
//! both sides at the end of the turn. The per-session lock is held for the
//! whole turn, so a single user's messages are processed in arrival order
//! while different users proceed concurrently. If the turn's future is
//! dropped mid-pipeline, no history has been written yet.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::connector::backend::BackendClient;
use crate::models::{DetailLevel, Intent, PendingQuestion, Role, UserSession};
use crate::services::dialogue;
use crate::services::extract::Extractor;
use crate::services::reply::ReplyGenerator;
use crate::services::spelling::SpellCorrector;
use crate::store::{KvStore, SessionStore};
use crate::LedgerbotError;

pub struct ChatEngine {
    corrector: SpellCorrector,
    extractor: Extractor,
    replies: ReplyGenerator,
    sessions: SessionStore,
    kv: Arc<dyn KvStore>,
    backend: Option<BackendClient>,
    /// User turns of history consulted when a message classifies as
    /// nothing on its own.
    context_turns: usize,
}

impl ChatEngine {
    pub fn new(
        corrector: SpellCorrector,
        extractor: Extractor,
        replies: ReplyGenerator,
        sessions: SessionStore,
        kv: Arc<dyn KvStore>,
        backend: Option<BackendClient>,
        context_turns: usize,
    ) -> Self {
        Self {
            corrector,
            extractor,
            replies,
            sessions,
            kv,
            backend,
            context_turns,
        }
    }

    /// The session store, mainly for eviction and inspection.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one inbound message for `user_id`.
    ///
    /// Returns `Ok(None)` for input that warrants no reply at all
    /// (empty/whitespace-only after cleanup). Collaborator failures are
    /// logged and degrade to local behavior; they never abort the turn.
    pub async fn handle_message(
        &self,
        user_id: &str,
        text: &str,
    ) -> Result<Option<String>, LedgerbotError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let corrected = self.corrector.correct(trimmed);
        if corrected != trimmed {
            debug!(%user_id, from = %trimmed, to = %corrected, "spell corrected");
        }

        let handle = self.sessions.get_or_create(user_id).await;
        let mut session = handle.lock().await;

        let reply = if let Some(question) = session.state.pending_question() {
            self.resolve_question(&mut session, question, &corrected)
                .await
        } else if dialogue::is_greeting(&corrected) {
            self.greet(&mut session).await
        } else if dialogue::is_thanks(&corrected) {
            dialogue::thanks_reply(session.preferences.emoji)
        } else if let Some(detail) = self.follow_up_detail(&mut session, &corrected) {
            detail
        } else {
            self.classify_and_reply(&mut session, user_id, &corrected)
                .await
        };

        session.history.append(Role::User, corrected);
        session.history.append(Role::Assistant, reply.clone());
        Ok(Some(reply))
    }

    /// Resolve a pending yes/no gate. Either branch returns to idle.
    async fn resolve_question(
        &self,
        session: &mut UserSession,
        question: PendingQuestion,
        corrected: &str,
    ) -> String {
        let _ = session.state.resolve_question();
        match question {
            PendingQuestion::AttendanceConfirm => {
                if dialogue::is_affirmative(corrected) {
                    let key = attendance_key(&session.user_id, &Utc::now().date_naive().to_string());
                    if let Err(e) = self.kv.set(&key, b"present").await {
                        warn!(error = %e, "attendance marker not persisted");
                    }
                    dialogue::attendance_confirmed_reply(session.preferences.emoji)
                } else {
                    dialogue::question_declined_reply()
                }
            }
        }
    }

    /// Greeting flow. First-ever interaction (per the persisted flag) adds
    /// the scripted attendance question and arms the confirmation gate. A
    /// failing key-value store means "not first time"; the reply must
    /// never block on persistence.
    async fn greet(&self, session: &mut UserSession) -> String {
        let key = first_seen_key(&session.user_id);
        let first_time = match self.kv.get(&key).await {
            Ok(None) => true,
            Ok(Some(_)) => false,
            Err(e) => {
                warn!(error = %e, "first-seen lookup failed, assuming returning user");
                false
            }
        };

        if first_time {
            if let Err(e) = self.kv.set(&key, b"1").await {
                warn!(error = %e, "first-seen flag not persisted");
            }
            session
                .state
                .begin_question(PendingQuestion::AttendanceConfirm, "greeting", "attendance");
        } else {
            session.state.set_topic("greeting");
        }

        dialogue::greeting_reply(first_time, session.preferences.emoji)
    }

    /// Serve the long-form explanation for the previous topic when the
    /// message reads as a follow-up. Returns `None` to fall through to
    /// normal classification.
    fn follow_up_detail(&self, session: &mut UserSession, corrected: &str) -> Option<String> {
        if !dialogue::is_follow_up(corrected, session.last_topic.is_some()) {
            return None;
        }
        let detail = dialogue::topic_detail(session.last_topic?)?;
        session.state.note_follow_up();
        Some(detail.to_string())
    }

    async fn classify_and_reply(
        &self,
        session: &mut UserSession,
        user_id: &str,
        corrected: &str,
    ) -> String {
        let mut analysis = self.extractor.extract(corrected);

        // A message that classifies as nothing on its own may still make
        // sense against what the user was just talking about. Re-extract
        // over recent user turns as a soft signal.
        if analysis.intent == Intent::General && analysis.entities.is_empty() {
            let context = session.history.recent_context(self.context_turns);
            if !context.is_empty() {
                let contextual = self.extractor.extract(&context);
                if contextual.intent != Intent::General {
                    debug!(%user_id, intent = %contextual.intent, "intent borrowed from context");
                    analysis.intent = contextual.intent;
                    analysis.entities = contextual.entities;
                }
            }
        }

        debug!(
            %user_id,
            intent = %analysis.intent,
            entities = analysis.entities.len(),
            confidence = analysis.confidence,
            "classified"
        );

        session.last_topic = Some(analysis.intent);
        session.state.set_topic(analysis.intent.as_str());

        let mut reply = match &self.backend {
            Some(backend) if analysis.intent != Intent::General => {
                match backend.query(analysis.intent, user_id).await {
                    Ok(remote) => remote,
                    Err(e) => {
                        warn!(error = %e, "backend unavailable, using local reply");
                        self.replies.generate(&analysis, &session.preferences)
                    }
                }
            }
            _ => self.replies.generate(&analysis, &session.preferences),
        };

        if session.preferences.detail == DetailLevel::Full {
            if let Some(detail) = dialogue::topic_detail(analysis.intent) {
                reply.push_str("\n\n");
                reply.push_str(detail);
            }
        }

        reply
    }
}

/// Key for the per-user "ever seen" flag.
pub fn first_seen_key(user_id: &str) -> String {
    format!("first_seen:{}", user_id)
}

/// Key for the same-day attendance marker.
pub fn attendance_key(user_id: &str, iso_date: &str) -> String {
    format!("attendance:{}:{}", user_id, iso_date)
}
