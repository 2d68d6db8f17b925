//! Comment domain types.

use punchlist_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a comment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(Uuid);

impl CommentId {
    /// Creates a new random comment identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a comment identifier from an existing UUID value.
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

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Maximum comment body length.
pub const COMMENT_BODY_MAX_LENGTH: usize = 4000;

/// Validates a comment body: non-empty and within the length cap.
pub fn validate_comment_body(body: &str) -> AppResult<()> {
    if body.trim().is_empty() {
        return Err(AppError::Validation(
            "comment body must not be empty".to_owned(),
        ));
    }

    if body.chars().count() > COMMENT_BODY_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "comment body must not exceed {COMMENT_BODY_MAX_LENGTH} characters"
        )));
    }

    Ok(())
}
