//! PostgreSQL-backed project and membership repository.
//!
//! One adapter serves both ports: projects and their membership rows live
//! in the same schema neighborhood, and project creation must write to both
//! tables in a single transaction.

use async_trait::async_trait;
use sqlx::PgPool;

use punchlist_application::{
    MembershipRecord, MembershipRepository, ProjectRecord, ProjectRepository, UpdateProjectInput,
};
use punchlist_core::{AppError, AppResult};
use punchlist_domain::{ProjectId, ProjectRole, UserId};

/// PostgreSQL implementation of the project and membership ports.
#[derive(Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: uuid::Uuid,
    name: String,
    description: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProjectRow> for ProjectRecord {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: ProjectId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    project_id: uuid::Uuid,
    user_id: uuid::Uuid,
    role: String,
    added_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<MembershipRow> for MembershipRecord {
    type Error = AppError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        Ok(Self {
            project_id: ProjectId::from_uuid(row.project_id),
            user_id: UserId::from_uuid(row.user_id),
            role: row.role.parse::<ProjectRole>()?,
            added_at: row.added_at,
        })
    }
}

mod memberships;
mod projects;


#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        creator_id: UserId,
    ) -> AppResult<ProjectRecord> {
        self.create_impl(name, description, creator_id).await
    }

    async fn find_by_id(&self, project_id: ProjectId) -> AppResult<Option<ProjectRecord>> {
        self.find_by_id_impl(project_id).await
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<ProjectRecord>> {
        self.find_by_name_impl(name).await
    }

    async fn list_all(&self) -> AppResult<Vec<ProjectRecord>> {
        self.list_all_impl().await
    }

    async fn list_for_member(&self, user_id: UserId) -> AppResult<Vec<ProjectRecord>> {
        self.list_for_member_impl(user_id).await
    }

    async fn update(
        &self,
        project_id: ProjectId,
        update: UpdateProjectInput,
    ) -> AppResult<ProjectRecord> {
        self.update_impl(project_id, update).await
    }

    async fn delete(&self, project_id: ProjectId) -> AppResult<()> {
        self.delete_impl(project_id).await
    }
}

#[async_trait]
impl MembershipRepository for PostgresProjectRepository {
    async fn find(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> AppResult<Option<MembershipRecord>> {
        self.find_membership_impl(user_id, project_id).await
    }

    async fn list_for_project(&self, project_id: ProjectId) -> AppResult<Vec<MembershipRecord>> {
        self.list_for_project_impl(project_id).await
    }

    async fn list_project_ids_for_user(&self, user_id: UserId) -> AppResult<Vec<ProjectId>> {
        self.list_project_ids_for_user_impl(user_id).await
    }

    async fn insert(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        role: ProjectRole,
    ) -> AppResult<MembershipRecord> {
        self.insert_membership_impl(project_id, user_id, role).await
    }

    async fn update_role(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        role: ProjectRole,
    ) -> AppResult<MembershipRecord> {
        self.update_role_impl(project_id, user_id, role).await
    }

    async fn remove(&self, project_id: ProjectId, user_id: UserId) -> AppResult<()> {
        self.remove_membership_impl(project_id, user_id).await
    }
}
