//! Grievance domain records

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status given to newly filed grievances
pub const STATUS_UNDER_REVIEW: &str = "Under Review";

/// Status some records carry instead of the completed flag
pub const STATUS_COMPLETED: &str = "Completed";

/// Severity of a filed grievance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Minor,
    Major,
    Critical,
}

impl Severity {
    /// Wire name of the severity
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Major => "major",
            Severity::Critical => "critical",
        }
    }

    /// Display label shown in the portal
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Minor => "Minor Annoyance",
            Severity::Major => "Major Issue",
            Severity::Critical => "CRITICAL OFFENSE",
        }
    }

    /// Parse a wire name, `None` for anything unknown
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "minor" => Some(Severity::Minor),
            "major" => Some(Severity::Major),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }
}

/// A filed grievance as stored remotely
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grievance {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    /// Free string owned by the remote schema
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub completed: bool,
    /// Creation timestamp as reported by the store (RFC 3339)
    #[serde(default)]
    pub created_at: String,
}

impl Grievance {
    /// True while the grievance awaits resolution
    pub fn is_active(&self) -> bool {
        !self.completed && self.status != STATUS_COMPLETED
    }
}

/// Fields sent to the store when filing a grievance.
///
/// The store assigns `id`, `created_at`, and the completed flag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewGrievance {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub status: String,
}

impl NewGrievance {
    /// Build a record in the initial review state
    pub fn under_review(title: String, description: String, severity: Severity) -> Self {
        Self {
            title,
            description,
            severity,
            status: STATUS_UNDER_REVIEW.to_string(),
        }
    }
}

/// Kind of chat notification relayed to the other party
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyKind {
    #[default]
    Notify,
    Attention,
}

impl NotifyKind {
    /// Wire name of the notification kind
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyKind::Notify => "notify",
            NotifyKind::Attention => "attention",
        }
    }
}
