//! Outward-facing collaborators: the chat platform, the ERP backend, and
//! the connector that bridges platform events to the engine.

pub mod backend;
pub mod inbound;
pub mod platform;

pub use backend::BackendClient;
pub use inbound::{ChannelKind, Connector, InboundMessage};
pub use platform::{BotIdentity, ChatPlatform, HttpPlatform};
