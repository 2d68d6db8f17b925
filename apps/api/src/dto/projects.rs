use chrono::{DateTime, Utc};
use punchlist_application::{MembershipRecord, ProjectRecord};
use punchlist_domain::{ProjectId, ProjectRole, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ProjectRecord> for ProjectResponse {
    fn from(record: ProjectRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MembershipResponse {
    pub project_id: ProjectId,
    pub user_id: UserId,
    pub role: ProjectRole,
    pub added_at: DateTime<Utc>,
}

impl From<MembershipRecord> for MembershipResponse {
    fn from(record: MembershipRecord) -> Self {
        Self {
            project_id: record.project_id,
            user_id: record.user_id,
            role: record.role,
            added_at: record.added_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: UserId,
    pub role: ProjectRole,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMemberRoleRequest {
    pub role: ProjectRole,
}
