use async_trait::async_trait;
use chrono::{DateTime, Utc};

use punchlist_core::AppResult;
use punchlist_domain::{ProjectId, UserId};

/// Project record returned by repository queries.
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    /// Unique project identifier.
    pub id: ProjectId,
    /// Unique project name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Partial update applied to a project. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProjectInput {
    /// Replacement project name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
}

/// Repository port for project persistence.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Creates a project and adds the creator as its first `owner` member.
    async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        creator_id: UserId,
    ) -> AppResult<ProjectRecord>;

    /// Finds a project by its unique identifier.
    async fn find_by_id(&self, project_id: ProjectId) -> AppResult<Option<ProjectRecord>>;

    /// Finds a project by its unique name.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<ProjectRecord>>;

    /// Lists all projects ordered by creation time.
    async fn list_all(&self) -> AppResult<Vec<ProjectRecord>>;

    /// Lists projects where the user holds any membership role.
    async fn list_for_member(&self, user_id: UserId) -> AppResult<Vec<ProjectRecord>>;

    /// Applies a partial update to a project.
    async fn update(
        &self,
        project_id: ProjectId,
        update: UpdateProjectInput,
    ) -> AppResult<ProjectRecord>;

    /// Deletes a project together with its memberships, issues, and comments.
    async fn delete(&self, project_id: ProjectId) -> AppResult<()>;
}
