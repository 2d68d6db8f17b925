//! PostgreSQL-backed issue repository.

use async_trait::async_trait;
use sqlx::PgPool;

use punchlist_application::{
    IssueFilter, IssueRecord, IssueRepository, NewIssueRecord, UpdateIssueInput,
};
use punchlist_core::{AppError, AppResult};
use punchlist_domain::{IssueId, IssuePriority, IssueStatus, ProjectId, UserId};

/// PostgreSQL implementation of the issue repository port.
#[derive(Clone)]
pub struct PostgresIssueRepository {
    pool: PgPool,
}

impl PostgresIssueRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct IssueRow {
    id: uuid::Uuid,
    project_id: uuid::Uuid,
    title: String,
    description: Option<String>,
    status: String,
    priority: String,
    reporter_id: uuid::Uuid,
    assignee_id: Option<uuid::Uuid>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<IssueRow> for IssueRecord {
    type Error = AppError;

    fn try_from(row: IssueRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: IssueId::from_uuid(row.id),
            project_id: ProjectId::from_uuid(row.project_id),
            title: row.title,
            description: row.description,
            status: row.status.parse::<IssueStatus>()?,
            priority: row.priority.parse::<IssuePriority>()?,
            reporter_id: UserId::from_uuid(row.reporter_id),
            assignee_id: row.assignee_id.map(UserId::from_uuid),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

mod queries;
mod writes;

#[cfg(test)]
mod tests;

#[async_trait]
impl IssueRepository for PostgresIssueRepository {
    async fn create(&self, issue: NewIssueRecord) -> AppResult<IssueRecord> {
        self.create_impl(issue).await
    }

    async fn find_by_id(&self, issue_id: IssueId) -> AppResult<Option<IssueRecord>> {
        self.find_by_id_impl(issue_id).await
    }

    async fn list(&self, filter: &IssueFilter) -> AppResult<Vec<IssueRecord>> {
        self.list_impl(filter).await
    }

    async fn list_visible_to(
        &self,
        user_id: UserId,
        project_ids: &[ProjectId],
        filter: &IssueFilter,
    ) -> AppResult<Vec<IssueRecord>> {
        self.list_visible_to_impl(user_id, project_ids, filter)
            .await
    }

    async fn update(&self, issue_id: IssueId, update: UpdateIssueInput) -> AppResult<IssueRecord> {
        self.update_impl(issue_id, update).await
    }

    async fn set_assignee(
        &self,
        issue_id: IssueId,
        assignee_id: Option<UserId>,
    ) -> AppResult<IssueRecord> {
        self.set_assignee_impl(issue_id, assignee_id).await
    }

    async fn delete(&self, issue_id: IssueId) -> AppResult<()> {
        self.delete_impl(issue_id).await
    }
}
