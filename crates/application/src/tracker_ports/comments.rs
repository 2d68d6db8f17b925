use async_trait::async_trait;
use chrono::{DateTime, Utc};

use punchlist_core::AppResult;
use punchlist_domain::{CommentId, IssueId, UserId};

/// Comment record returned by repository queries.
#[derive(Debug, Clone)]
pub struct CommentRecord {
    /// Unique comment identifier.
    pub id: CommentId,
    /// Issue the comment belongs to.
    pub issue_id: IssueId,
    /// User who wrote the comment. Immutable after creation.
    pub author_id: UserId,
    /// Comment text.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Repository port for comment persistence.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Creates a comment on an issue.
    async fn create(
        &self,
        issue_id: IssueId,
        author_id: UserId,
        body: &str,
    ) -> AppResult<CommentRecord>;

    /// Finds a comment by its unique identifier.
    async fn find_by_id(&self, comment_id: CommentId) -> AppResult<Option<CommentRecord>>;

    /// Lists comments on an issue ordered by creation time.
    async fn list_for_issue(&self, issue_id: IssueId) -> AppResult<Vec<CommentRecord>>;

    /// Replaces the comment body.
    async fn update_body(&self, comment_id: CommentId, body: &str) -> AppResult<CommentRecord>;

    /// Deletes a comment.
    async fn delete(&self, comment_id: CommentId) -> AppResult<()>;
}
