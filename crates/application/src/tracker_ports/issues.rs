use async_trait::async_trait;
use chrono::{DateTime, Utc};

use punchlist_core::AppResult;
use punchlist_domain::{IssueId, IssuePriority, IssueStatus, ProjectId, UserId};

/// Issue record returned by repository queries.
#[derive(Debug, Clone)]
pub struct IssueRecord {
    /// Unique issue identifier.
    pub id: IssueId,
    /// Project the issue belongs to.
    pub project_id: ProjectId,
    /// Short summary line.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Current workflow state.
    pub status: IssueStatus,
    /// Current urgency.
    pub priority: IssuePriority,
    /// User who filed the issue. Immutable after creation.
    pub reporter_id: UserId,
    /// User currently assigned, if any.
    pub assignee_id: Option<UserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create an issue record.
#[derive(Debug, Clone)]
pub struct NewIssueRecord {
    /// Project the issue belongs to.
    pub project_id: ProjectId,
    /// Short summary line.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Initial urgency.
    pub priority: IssuePriority,
    /// User filing the issue.
    pub reporter_id: UserId,
    /// Initial assignee, if any.
    pub assignee_id: Option<UserId>,
}

/// Partial update applied to an issue. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateIssueInput {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement workflow state.
    pub status: Option<IssueStatus>,
    /// Replacement urgency.
    pub priority: Option<IssuePriority>,
}

/// Caller-supplied constraints on an issue list query.
///
/// The filter narrows results within whatever visibility scope the caller
/// has already been granted. It never widens access.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    /// Restrict to one project.
    pub project_id: Option<ProjectId>,
    /// Restrict to one workflow state.
    pub status: Option<IssueStatus>,
    /// Restrict to one assignee.
    pub assignee_id: Option<UserId>,
}

/// Repository port for issue persistence.
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Creates an issue in the `open` state.
    async fn create(&self, issue: NewIssueRecord) -> AppResult<IssueRecord>;

    /// Finds an issue by its unique identifier.
    async fn find_by_id(&self, issue_id: IssueId) -> AppResult<Option<IssueRecord>>;

    /// Lists issues matching the filter, ordered by creation time descending.
    async fn list(&self, filter: &IssueFilter) -> AppResult<Vec<IssueRecord>>;

    /// Lists issues visible through membership or ownership: issues in any of
    /// `project_ids` plus issues where the user is reporter or assignee, all
    /// further narrowed by the filter.
    async fn list_visible_to(
        &self,
        user_id: UserId,
        project_ids: &[ProjectId],
        filter: &IssueFilter,
    ) -> AppResult<Vec<IssueRecord>>;

    /// Applies a partial update to an issue.
    async fn update(&self, issue_id: IssueId, update: UpdateIssueInput) -> AppResult<IssueRecord>;

    /// Replaces the assignee. `None` clears the assignment.
    async fn set_assignee(
        &self,
        issue_id: IssueId,
        assignee_id: Option<UserId>,
    ) -> AppResult<IssueRecord>;

    /// Deletes an issue together with its comments.
    async fn delete(&self, issue_id: IssueId) -> AppResult<()>;
}
