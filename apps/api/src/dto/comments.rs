use chrono::{DateTime, Utc};
use punchlist_application::CommentRecord;
use punchlist_domain::{CommentId, IssueId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: CommentId,
    pub issue_id: IssueId,
    pub author_id: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CommentRecord> for CommentResponse {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            issue_id: record.issue_id,
            author_id: record.author_id,
            body: record.body,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub body: String,
}
