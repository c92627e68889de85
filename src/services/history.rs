//! Bounded per-user message log.

use std::collections::VecDeque;

use crate::models::{Message, Role};

/// Default number of user turns included in `recent_context`.
pub const DEFAULT_CONTEXT_TURNS: usize = 10;

/// FIFO message log with a fixed capacity; oldest entries evict first.
#[derive(Debug)]
pub struct HistoryLog {
    entries: VecDeque<Message>,
    cap: usize,
}

impl HistoryLog {
    /// Create a log holding at most `cap` messages (both roles combined).
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap.min(128)),
            cap,
        }
    }

    /// Append one message, evicting the oldest entry when full.
    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        if self.entries.len() == self.cap {
            self.entries.pop_front();
        }
        self.entries.push_back(Message::now(role, content));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }

    /// Concatenated content of the last `max_user_turns` user-authored
    /// messages, oldest first. A soft context signal only.
    pub fn recent_context(&self, max_user_turns: usize) -> String {
        let mut recent: Vec<&str> = self
            .entries
            .iter()
            .rev()
            .filter(|m| m.role == Role::User)
            .take(max_user_turns)
            .map(|m| m.content.as_str())
            .collect();
        recent.reverse();
        recent.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_is_enforced_fifo() {
        let mut log = HistoryLog::new(3);
        for i in 0..5 {
            log.append(Role::User, format!("msg {i}"));
        }
        assert_eq!(log.len(), 3);
        let contents: Vec<_> = log.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["msg 2", "msg 3", "msg 4"]);
    }

    #[test]
    fn recent_context_is_user_only_and_chronological() {
        let mut log = HistoryLog::new(10);
        log.append(Role::User, "first");
        log.append(Role::Assistant, "reply one");
        log.append(Role::User, "second");
        log.append(Role::Assistant, "reply two");

        assert_eq!(log.recent_context(10), "first\nsecond");
        assert_eq!(log.recent_context(1), "second");
    }

    #[test]
    fn empty_log_gives_empty_context() {
        let log = HistoryLog::new(4);
        assert_eq!(log.recent_context(10), "");
        assert!(log.is_empty());
    }
}
