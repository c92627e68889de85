//! The pipeline services: spelling, extraction, dialogue, replies, and the
//! engine that strings them together.

pub mod dialogue;
pub mod engine;
pub mod extract;
pub mod history;
pub mod reply;
pub mod spelling;
pub mod vocabulary;

pub use engine::ChatEngine;
pub use extract::Extractor;
pub use history::HistoryLog;
pub use reply::ReplyGenerator;
pub use spelling::{FuzzyIndex, SpellCorrector};
