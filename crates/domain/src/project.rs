//! Project domain types.

use std::str::FromStr;

use punchlist_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a project record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Creates a new random project identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a project identifier from an existing UUID value.
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

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Membership role held by a user within one project.
///
/// At most one role exists per (user, project) pair. The same user may hold
/// different roles in different projects simultaneously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
    /// Full control of the project, including deletion and membership.
    Owner,
    /// Day-to-day project management; may add members but not remove them.
    Maintainer,
    /// Works on issues inside the project.
    Developer,
    /// Files and triages issues.
    Reporter,
    /// Baseline read-and-participate membership.
    Member,
}

impl ProjectRole {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Maintainer => "maintainer",
            Self::Developer => "developer",
            Self::Reporter => "reporter",
            Self::Member => "member",
        }
    }

    /// Returns all known project roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ProjectRole] = &[
            ProjectRole::Owner,
            ProjectRole::Maintainer,
            ProjectRole::Developer,
            ProjectRole::Reporter,
            ProjectRole::Member,
        ];

        ALL
    }
}

impl FromStr for ProjectRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "owner" => Ok(Self::Owner),
            "maintainer" => Ok(Self::Maintainer),
            "developer" => Ok(Self::Developer),
            "reporter" => Ok(Self::Reporter),
            "member" => Ok(Self::Member),
            _ => Err(AppError::Validation(format!(
                "unknown project role '{value}'"
            ))),
        }
    }
}

/// Maximum project name length.
pub const PROJECT_NAME_MAX_LENGTH: usize = 120;

/// Validates a project name: non-empty and within the length cap.
pub fn validate_project_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation(
            "project name must not be empty".to_owned(),
        ));
    }

    if name.chars().count() > PROJECT_NAME_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "project name must not exceed {PROJECT_NAME_MAX_LENGTH} characters"
        )));
    }

    Ok(())
}
