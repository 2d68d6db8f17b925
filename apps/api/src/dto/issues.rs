use chrono::{DateTime, Utc};
use punchlist_application::IssueRecord;
use punchlist_domain::{IssueId, IssuePriority, IssueStatus, ProjectId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct IssueResponse {
    pub id: IssueId,
    pub project_id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub reporter_id: UserId,
    pub assignee_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<IssueRecord> for IssueResponse {
    fn from(record: IssueRecord) -> Self {
        Self {
            id: record.id,
            project_id: record.project_id,
            title: record.title,
            description: record.description,
            status: record.status,
            priority: record.priority,
            reporter_id: record.reporter_id,
            assignee_id: record.assignee_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateIssueRequest {
    pub project_id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<IssuePriority>,
    pub assignee_id: Option<UserId>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateIssueRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
}

/// A null or omitted assignee clears the assignment.
#[derive(Debug, Deserialize)]
pub struct SetAssigneeRequest {
    #[serde(default)]
    pub assignee_id: Option<UserId>,
}

/// Query filters accepted by the issue list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct IssueListQuery {
    pub project_id: Option<ProjectId>,
    pub status: Option<IssueStatus>,
    pub assignee_id: Option<UserId>,
}
