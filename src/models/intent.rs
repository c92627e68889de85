use serde::{Deserialize, Serialize};

/// Coarse category of a user request.
///
/// Classification is an ordered cascade (see `services::extract`); the
/// variant order here mirrors the rule priority for readability only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Create,
    View,
    Edit,
    Delete,
    Approve,
    Report,
    Help,
    General,
}

impl Intent {
    /// Wire/display name of the intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Create => "create",
            Intent::View => "view",
            Intent::Edit => "edit",
            Intent::Delete => "delete",
            Intent::Approve => "approve",
            Intent::Report => "report",
            Intent::Help => "help",
            Intent::General => "general",
        }
    }

    /// The canonical keyword for the confidence bonus check.
    ///
    /// `General` has no trigger keyword of its own.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Intent::General => None,
            other => Some(other.as_str()),
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of structured fact an entity represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// ERP module (finance, procurement, hr, ...)
    Module,
    /// Document type (invoice, purchase_order, ...)
    Document,
    /// Action verb (create, approve, ...)
    Action,
}

/// A structured fact detected in free text via alias matching.
///
/// An extraction pass yields at most one entity per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub value: String,
}

impl Entity {
    pub fn new(kind: EntityKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Result of one extraction pass over a message.
///
/// Built fresh per message and never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentAnalysis {
    pub intent: Intent,
    pub entities: Vec<Entity>,
    /// Heuristic signal in [0, 1], surfaced for observability. Not a
    /// probability.
    pub confidence: f32,
}

impl IntentAnalysis {
    /// First extracted entity of the given kind, if any.
    pub fn entity(&self, kind: EntityKind) -> Option<&Entity> {
        self.entities.iter().find(|e| e.kind == kind)
    }
}
