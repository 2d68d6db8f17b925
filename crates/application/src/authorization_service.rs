//! Authorization decision engine.
//!
//! Access is evaluated across three tiers: global role, project membership
//! role, and resource ownership (issue reporter/assignee, comment author).
//! Each protected operation family has one named composite policy here built
//! as a disjunction of those grant paths, so a rule is defined and tested in
//! exactly one place. List queries go through visibility scopes instead of
//! allow/deny so results narrow per caller.
//!
//! Membership lookups are read fresh on every decision. A role or membership
//! change is visible to the very next check without reissuing tokens.

use std::sync::Arc;

use punchlist_core::{AppError, AppResult};
use punchlist_domain::{GlobalRole, Principal, ProjectId, ProjectRole, UserId};

use crate::tracker_ports::MembershipRepository;

mod issues;
mod projects;
mod users;
mod visibility;

/// Global roles that pass nearly every check regardless of project
/// membership.
pub const ELEVATED_GLOBAL_ROLES: &[GlobalRole] = &[GlobalRole::Admin, GlobalRole::Manager];

const DEFAULT_FORBIDDEN_MESSAGE: &str = "you do not have permission to perform this action";

/// Returns whether the principal is active and holds one of the allowed
/// global roles.
///
/// Pure check over the principal alone, usable without the service.
#[must_use]
pub fn has_global_role(principal: &Principal, allowed_roles: &[GlobalRole]) -> bool {
    principal.is_active() && allowed_roles.contains(&principal.global_role())
}

/// Visibility scope for project list queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectListScope {
    /// Elevated caller: every project is visible.
    Unrestricted,
    /// Only projects where the caller holds a membership are visible.
    MemberProjects,
}

/// Visibility scope for issue list queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueListScope {
    /// Elevated caller: every issue is visible.
    Unrestricted,
    /// Explicit project filter passed the access gate for that project.
    SingleProject(ProjectId),
    /// Issues in the caller's projects plus issues the caller reported or
    /// is assigned to. The project set may be empty, which legitimately
    /// yields an empty result rather than an error.
    MemberOrOwned(Vec<ProjectId>),
}

/// Application service for authorization decisions.
#[derive(Clone)]
pub struct AuthorizationService {
    memberships: Arc<dyn MembershipRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a membership repository.
    #[must_use]
    pub fn new(memberships: Arc<dyn MembershipRepository>) -> Self {
        Self { memberships }
    }

    /// Returns whether the user holds one of the allowed roles in the
    /// project.
    ///
    /// Fails closed: an unknown user, unknown project, or missing membership
    /// row yields `false`, never an error. Only a storage failure surfaces
    /// as an error.
    pub async fn has_project_role(
        &self,
        user_id: UserId,
        project_id: ProjectId,
        allowed_roles: &[ProjectRole],
    ) -> AppResult<bool> {
        let membership = self.memberships.find(user_id, project_id).await?;

        Ok(membership.is_some_and(|record| allowed_roles.contains(&record.role)))
    }

    /// Ensures the principal holds one of the allowed global roles.
    ///
    /// Raises `Forbidden` with the caller-supplied message, or a generic
    /// default, when the check fails.
    pub fn require_global_role(
        &self,
        principal: &Principal,
        allowed_roles: &[GlobalRole],
        message: Option<&str>,
    ) -> AppResult<()> {
        if has_global_role(principal, allowed_roles) {
            return Ok(());
        }

        Err(forbidden(message))
    }

    /// Ensures the user holds one of the allowed roles in the project.
    ///
    /// Raises `Forbidden` with the caller-supplied message, or a generic
    /// default, when the check fails.
    pub async fn require_project_role(
        &self,
        user_id: UserId,
        project_id: ProjectId,
        allowed_roles: &[ProjectRole],
        message: Option<&str>,
    ) -> AppResult<()> {
        if self
            .has_project_role(user_id, project_id, allowed_roles)
            .await?
        {
            return Ok(());
        }

        Err(forbidden(message))
    }
}

fn forbidden(message: Option<&str>) -> AppError {
    AppError::Forbidden(message.unwrap_or(DEFAULT_FORBIDDEN_MESSAGE).to_owned())
}
