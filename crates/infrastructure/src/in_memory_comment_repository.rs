//! In-memory comment repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use punchlist_application::{CommentRecord, CommentRepository};
use punchlist_core::{AppError, AppResult};
use punchlist_domain::{CommentId, IssueId, UserId};

/// In-memory comment repository for tests and local development.
#[derive(Debug, Default)]
pub struct InMemoryCommentRepository {
    comments: RwLock<HashMap<CommentId, CommentRecord>>,
}

impl InMemoryCommentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            comments: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(
        &self,
        issue_id: IssueId,
        author_id: UserId,
        body: &str,
    ) -> AppResult<CommentRecord> {
        let now = Utc::now();
        let record = CommentRecord {
            id: CommentId::new(),
            issue_id,
            author_id,
            body: body.to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.comments
            .write()
            .await
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, comment_id: CommentId) -> AppResult<Option<CommentRecord>> {
        Ok(self.comments.read().await.get(&comment_id).cloned())
    }

    async fn list_for_issue(&self, issue_id: IssueId) -> AppResult<Vec<CommentRecord>> {
        let mut records: Vec<CommentRecord> = self
            .comments
            .read()
            .await
            .values()
            .filter(|record| record.issue_id == issue_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.created_at);
        Ok(records)
    }

    async fn update_body(&self, comment_id: CommentId, body: &str) -> AppResult<CommentRecord> {
        let mut comments = self.comments.write().await;
        let record = comments
            .get_mut(&comment_id)
            .ok_or_else(|| AppError::NotFound("comment not found".to_owned()))?;
        record.body = body.to_owned();
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, comment_id: CommentId) -> AppResult<()> {
        self.comments
            .write()
            .await
            .remove(&comment_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("comment not found".to_owned()))
    }
}
