use async_trait::async_trait;
use chrono::{DateTime, Utc};

use punchlist_core::AppResult;
use punchlist_domain::{ProjectId, ProjectRole, UserId};

/// Membership record for one (user, project) pair.
#[derive(Debug, Clone)]
pub struct MembershipRecord {
    /// Project the membership belongs to.
    pub project_id: ProjectId,
    /// Member user identifier.
    pub user_id: UserId,
    /// Role held within this project.
    pub role: ProjectRole,
    /// Timestamp the member was added.
    pub added_at: DateTime<Utc>,
}

/// Repository port for project membership persistence.
///
/// At most one membership row exists per (user, project) pair.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Finds the unique membership for a (user, project) pair.
    async fn find(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> AppResult<Option<MembershipRecord>>;

    /// Lists memberships of a project ordered by join time.
    async fn list_for_project(&self, project_id: ProjectId) -> AppResult<Vec<MembershipRecord>>;

    /// Lists identifiers of all projects the user belongs to.
    async fn list_project_ids_for_user(&self, user_id: UserId) -> AppResult<Vec<ProjectId>>;

    /// Inserts a membership. Fails with a conflict if the pair already exists.
    async fn insert(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        role: ProjectRole,
    ) -> AppResult<MembershipRecord>;

    /// Replaces the role on an existing membership.
    async fn update_role(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        role: ProjectRole,
    ) -> AppResult<MembershipRecord>;

    /// Removes a membership. Fails with not-found if the pair does not exist.
    async fn remove(&self, project_id: ProjectId, user_id: UserId) -> AppResult<()>;
}
