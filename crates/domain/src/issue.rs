//! Issue domain types.

use std::str::FromStr;

use punchlist_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an issue record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueId(Uuid);

impl IssueId {
    /// Creates a new random issue identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an issue identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for IssueId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for IssueId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Workflow state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Newly filed, not yet picked up.
    Open,
    /// Actively being worked on.
    InProgress,
    /// Work finished, awaiting confirmation.
    Resolved,
    /// Confirmed done or rejected.
    Closed,
}

impl IssueStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    /// Returns all known issue statuses.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[IssueStatus] = &[
            IssueStatus::Open,
            IssueStatus::InProgress,
            IssueStatus::Resolved,
            IssueStatus::Closed,
        ];

        ALL
    }
}

impl FromStr for IssueStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            _ => Err(AppError::Validation(format!(
                "unknown issue status '{value}'"
            ))),
        }
    }
}

/// Urgency assigned to an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuePriority {
    /// Can wait indefinitely.
    Low,
    /// Normal scheduling.
    Medium,
    /// Should be addressed soon.
    High,
    /// Blocks work or affects production.
    Critical,
}

impl IssuePriority {
    /// Returns a stable storage value for this priority.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Returns all known issue priorities.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[IssuePriority] = &[
            IssuePriority::Low,
            IssuePriority::Medium,
            IssuePriority::High,
            IssuePriority::Critical,
        ];

        ALL
    }
}

impl FromStr for IssuePriority {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(AppError::Validation(format!(
                "unknown issue priority '{value}'"
            ))),
        }
    }
}

/// Maximum issue title length.
pub const ISSUE_TITLE_MAX_LENGTH: usize = 200;

/// Validates an issue title: non-empty and within the length cap.
pub fn validate_issue_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation(
            "issue title must not be empty".to_owned(),
        ));
    }

    if title.chars().count() > ISSUE_TITLE_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "issue title must not exceed {ISSUE_TITLE_MAX_LENGTH} characters"
        )));
    }

    Ok(())
}
