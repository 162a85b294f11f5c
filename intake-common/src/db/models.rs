//! Database models and form domain types

use serde::{Deserialize, Serialize};

/// Review lifecycle of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Draft,
    Filled,
    Reviewed,
    Closed,
}

impl FormStatus {
    /// Stored string form of the status
    pub fn as_str(self) -> &'static str {
        match self {
            FormStatus::Draft => "draft",
            FormStatus::Filled => "filled",
            FormStatus::Reviewed => "reviewed",
            FormStatus::Closed => "closed",
        }
    }

    /// Parse a stored or requested status string; None for unknown values
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(FormStatus::Draft),
            "filled" => Some(FormStatus::Filled),
            "reviewed" => Some(FormStatus::Reviewed),
            "closed" => Some(FormStatus::Closed),
            _ => None,
        }
    }

    /// Statuses this one may directly become
    ///
    /// No implicit self-loops: a status is never in its own edge set.
    pub fn allowed_transitions(self) -> &'static [FormStatus] {
        match self {
            FormStatus::Draft => &[FormStatus::Closed, FormStatus::Filled],
            FormStatus::Filled => &[FormStatus::Closed, FormStatus::Reviewed],
            FormStatus::Reviewed => &[FormStatus::Closed],
            FormStatus::Closed => &[FormStatus::Draft],
        }
    }

    /// Whether the transition table permits `self -> next`
    pub fn can_transition_to(self, next: FormStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }
}

/// String-level transition check used at the persistence boundary
///
/// Unknown current or requested values have no edges and are denied.
pub fn transition_allowed(current: &str, requested: &str) -> bool {
    match (FormStatus::parse(current), FormStatus::parse(requested)) {
        (Some(current), Some(requested)) => current.can_transition_to(requested),
        _ => false,
    }
}

/// Urgency rating derived from answer sentiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    /// Stored string form of the urgency
    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }

    /// Parse a stored urgency string; None for unknown values
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Urgency::Low),
            "medium" => Some(Urgency::Medium),
            "high" => Some(Urgency::High),
            _ => None,
        }
    }
}

/// A form row as stored in the forms table
///
/// Timestamps are RFC 3339 TEXT so lexicographic ordering matches
/// chronological ordering.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Form {
    pub id: String,
    pub question: String,
    pub answer: Option<String>,
    pub urgency: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}
