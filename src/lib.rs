//! Ledgerbot - a rule-based conversational assistant for ERP workflows.
//!
//! Pipeline: spell correction against a domain vocabulary, entity/intent
//! extraction over pattern tables, scripted dialogue flows with per-user
//! session state, and templated reply synthesis. Collaborators (chat
//! platform, ERP backend, key-value store) sit behind narrow traits.

pub mod cli;
pub mod config;
pub mod connector;
pub mod error;
pub mod init;
pub mod models;
pub mod services;
pub mod store;

pub use error::LedgerbotError;
