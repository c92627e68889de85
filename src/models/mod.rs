//! Value types shared across the pipeline.

pub mod intent;
pub mod message;
pub mod session;

pub use intent::{Entity, EntityKind, Intent, IntentAnalysis};
pub use message::{Message, Role};
pub use session::{
    ConversationState, DetailLevel, PendingQuestion, UserPreferences, UserSession,
};
