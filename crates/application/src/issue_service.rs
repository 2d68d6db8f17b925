//! Issue lifecycle service.

use std::sync::Arc;

use punchlist_core::{AppError, AppResult};
use punchlist_domain::{
    IssueId, IssuePriority, Principal, ProjectId, UserId, validate_issue_title,
};

use crate::authorization_service::{AuthorizationService, IssueListScope};
use crate::identity_ports::UserRepository;
use crate::tracker_ports::{
    IssueFilter, IssueRecord, IssueRepository, NewIssueRecord, ProjectRepository, UpdateIssueInput,
};

/// Parameters for filing an issue.
#[derive(Debug, Clone)]
pub struct CreateIssueInput {
    /// Project the issue belongs to.
    pub project_id: ProjectId,
    /// Short summary line.
    pub title: String,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Initial urgency. Defaults to `medium`.
    pub priority: Option<IssuePriority>,
    /// Initial assignee. Setting one requires assignment rights.
    pub assignee_id: Option<UserId>,
}

/// Application service for issues.
#[derive(Clone)]
pub struct IssueService {
    issues: Arc<dyn IssueRepository>,
    projects: Arc<dyn ProjectRepository>,
    users: Arc<dyn UserRepository>,
    authorization: AuthorizationService,
}

impl IssueService {
    /// Creates a new issue service.
    #[must_use]
    pub fn new(
        issues: Arc<dyn IssueRepository>,
        projects: Arc<dyn ProjectRepository>,
        users: Arc<dyn UserRepository>,
        authorization: AuthorizationService,
    ) -> Self {
        Self {
            issues,
            projects,
            users,
            authorization,
        }
    }

    /// Files a new issue. The principal becomes its reporter.
    ///
    /// Any project member may file; supplying an initial assignee
    /// additionally requires assignment rights in the project.
    pub async fn create_issue(
        &self,
        principal: &Principal,
        input: CreateIssueInput,
    ) -> AppResult<IssueRecord> {
        if self.projects.find_by_id(input.project_id).await?.is_none() {
            return Err(AppError::NotFound("project not found".to_owned()));
        }

        if !self
            .authorization
            .can_create_issue(principal, input.project_id)
            .await?
        {
            return Err(AppError::Forbidden(
                "you must be a project member to create issues".to_owned(),
            ));
        }

        let title = input.title.trim().to_owned();
        validate_issue_title(&title)?;

        if let Some(assignee_id) = input.assignee_id {
            if !self
                .authorization
                .can_assign_issues(principal, input.project_id)
                .await?
            {
                return Err(AppError::Forbidden(
                    "only project owners and maintainers can assign issues".to_owned(),
                ));
            }
            self.check_assignee(assignee_id).await?;
        }

        self.issues
            .create(NewIssueRecord {
                project_id: input.project_id,
                title,
                description: input.description,
                priority: input.priority.unwrap_or(IssuePriority::Medium),
                reporter_id: principal.user_id(),
                assignee_id: input.assignee_id,
            })
            .await
    }

    /// Returns an issue visible to the principal.
    pub async fn get_issue(&self, principal: &Principal, issue_id: IssueId) -> AppResult<IssueRecord> {
        let issue = self.find_issue(issue_id).await?;

        if !self.authorization.can_view_issue(principal, &issue).await? {
            return Err(AppError::Forbidden(
                "you do not have access to this issue".to_owned(),
            ));
        }

        Ok(issue)
    }

    /// Lists issues within the principal's visibility scope.
    ///
    /// With an explicit project filter the caller must have access to that
    /// project or the whole query fails. Without one, the scope is the
    /// caller's member projects plus issues they reported or are assigned
    /// to, and matching nothing yields an empty list.
    pub async fn list_issues(
        &self,
        principal: &Principal,
        filter: IssueFilter,
    ) -> AppResult<Vec<IssueRecord>> {
        let scope = self
            .authorization
            .issue_list_scope(principal, filter.project_id)
            .await?;

        match scope {
            IssueListScope::Unrestricted | IssueListScope::SingleProject(_) => {
                self.issues.list(&filter).await
            }
            IssueListScope::MemberOrOwned(project_ids) => {
                self.issues
                    .list_visible_to(principal.user_id(), &project_ids, &filter)
                    .await
            }
        }
    }

    /// Applies a partial update to an issue.
    ///
    /// Open to the issue's reporter and assignee, elevated global roles,
    /// and project owners and maintainers.
    pub async fn update_issue(
        &self,
        principal: &Principal,
        issue_id: IssueId,
        update: UpdateIssueInput,
    ) -> AppResult<IssueRecord> {
        let issue = self.find_issue(issue_id).await?;

        if !self.authorization.can_edit_issue(principal, &issue).await? {
            return Err(AppError::Forbidden(
                "you do not have permission to edit this issue".to_owned(),
            ));
        }

        let update = UpdateIssueInput {
            title: match update.title {
                Some(title) => {
                    let title = title.trim().to_owned();
                    validate_issue_title(&title)?;
                    Some(title)
                }
                None => None,
            },
            ..update
        };

        self.issues.update(issue_id, update).await
    }

    /// Replaces the issue's assignee. `None` clears the assignment.
    pub async fn set_assignee(
        &self,
        principal: &Principal,
        issue_id: IssueId,
        assignee_id: Option<UserId>,
    ) -> AppResult<IssueRecord> {
        let issue = self.find_issue(issue_id).await?;

        if !self
            .authorization
            .can_assign_issues(principal, issue.project_id)
            .await?
        {
            return Err(AppError::Forbidden(
                "only project owners and maintainers can assign issues".to_owned(),
            ));
        }

        if let Some(assignee_id) = assignee_id {
            self.check_assignee(assignee_id).await?;
        }

        self.issues.set_assignee(issue_id, assignee_id).await
    }

    /// Deletes an issue together with its comments.
    ///
    /// Ownership grants nothing here: a reporter may edit their own issue
    /// but not delete it.
    pub async fn delete_issue(&self, principal: &Principal, issue_id: IssueId) -> AppResult<()> {
        let issue = self.find_issue(issue_id).await?;

        if !self
            .authorization
            .can_delete_issue(principal, &issue)
            .await?
        {
            return Err(AppError::Forbidden(
                "only project owners and maintainers can delete issues".to_owned(),
            ));
        }

        self.issues.delete(issue_id).await
    }

    async fn find_issue(&self, issue_id: IssueId) -> AppResult<IssueRecord> {
        self.issues
            .find_by_id(issue_id)
            .await?
            .ok_or_else(|| AppError::NotFound("issue not found".to_owned()))
    }

    /// The assignee must exist and be active; project membership is not
    /// required.
    async fn check_assignee(&self, assignee_id: UserId) -> AppResult<()> {
        let assignee = self
            .users
            .find_by_id(assignee_id)
            .await?
            .ok_or_else(|| AppError::NotFound("assignee not found".to_owned()))?;

        if !assignee.is_active {
            return Err(AppError::Validation(
                "assignee account is inactive".to_owned(),
            ));
        }

        Ok(())
    }
}
