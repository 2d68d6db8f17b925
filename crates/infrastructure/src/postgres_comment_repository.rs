//! PostgreSQL-backed comment repository.

use async_trait::async_trait;
use sqlx::PgPool;

use punchlist_application::{CommentRecord, CommentRepository};
use punchlist_core::{AppError, AppResult};
use punchlist_domain::{CommentId, IssueId, UserId};

/// PostgreSQL implementation of the comment repository port.
#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: uuid::Uuid,
    issue_id: uuid::Uuid,
    author_id: uuid::Uuid,
    body: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CommentRow> for CommentRecord {
    fn from(row: CommentRow) -> Self {
        Self {
            id: CommentId::from_uuid(row.id),
            issue_id: IssueId::from_uuid(row.issue_id),
            author_id: UserId::from_uuid(row.author_id),
            body: row.body,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(
        &self,
        issue_id: IssueId,
        author_id: UserId,
        body: &str,
    ) -> AppResult<CommentRecord> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (issue_id, author_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, issue_id, author_id, body, created_at, updated_at
            "#,
        )
        .bind(issue_id.as_uuid())
        .bind(author_id.as_uuid())
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create comment: {error}")))?;

        Ok(CommentRecord::from(row))
    }

    async fn find_by_id(&self, comment_id: CommentId) -> AppResult<Option<CommentRecord>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, issue_id, author_id, body, created_at, updated_at
            FROM comments
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(comment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find comment by id: {error}")))?;

        Ok(row.map(CommentRecord::from))
    }

    async fn list_for_issue(&self, issue_id: IssueId) -> AppResult<Vec<CommentRecord>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, issue_id, author_id, body, created_at, updated_at
            FROM comments
            WHERE issue_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(issue_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list comments: {error}")))?;

        Ok(rows.into_iter().map(CommentRecord::from).collect())
    }

    async fn update_body(&self, comment_id: CommentId, body: &str) -> AppResult<CommentRecord> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comments
            SET body = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, issue_id, author_id, body, created_at, updated_at
            "#,
        )
        .bind(comment_id.as_uuid())
        .bind(body)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update comment: {error}")))?;

        row.map(CommentRecord::from)
            .ok_or_else(|| AppError::NotFound("comment not found".to_owned()))
    }

    async fn delete(&self, comment_id: CommentId) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE id = $1
            "#,
        )
        .bind(comment_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete comment: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("comment not found".to_owned()));
        }

        Ok(())
    }
}
