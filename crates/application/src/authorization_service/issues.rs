use crate::tracker_ports::{CommentRecord, IssueRecord};

use super::*;

impl AuthorizationService {
    /// Whether the principal may create an issue in the project.
    ///
    /// Grant paths: global `admin` or `manager`, or any membership role in
    /// the project.
    pub async fn can_create_issue(
        &self,
        principal: &Principal,
        project_id: ProjectId,
    ) -> AppResult<bool> {
        if has_global_role(principal, ELEVATED_GLOBAL_ROLES) {
            return Ok(true);
        }

        if !principal.is_active() {
            return Ok(false);
        }

        self.has_project_role(principal.user_id(), project_id, ProjectRole::all())
            .await
    }

    /// Whether the principal may view the issue.
    ///
    /// Grant paths: global `admin` or `manager`, any membership role in the
    /// issue's project, or being its reporter or assignee.
    pub async fn can_view_issue(
        &self,
        principal: &Principal,
        issue: &IssueRecord,
    ) -> AppResult<bool> {
        if !principal.is_active() {
            return Ok(false);
        }

        if is_reporter_or_assignee(principal, issue) {
            return Ok(true);
        }

        if has_global_role(principal, ELEVATED_GLOBAL_ROLES) {
            return Ok(true);
        }

        self.has_project_role(principal.user_id(), issue.project_id, ProjectRole::all())
            .await
    }

    /// Whether the principal may edit the issue's fields.
    ///
    /// Grant paths: being its reporter or assignee, global `admin` or
    /// `manager`, or project `owner` or `maintainer`. A plain member with no
    /// ownership relation and no elevated project role cannot edit.
    pub async fn can_edit_issue(
        &self,
        principal: &Principal,
        issue: &IssueRecord,
    ) -> AppResult<bool> {
        if !principal.is_active() {
            return Ok(false);
        }

        if is_reporter_or_assignee(principal, issue) {
            return Ok(true);
        }

        if has_global_role(principal, ELEVATED_GLOBAL_ROLES) {
            return Ok(true);
        }

        self.has_project_role(
            principal.user_id(),
            issue.project_id,
            &[ProjectRole::Owner, ProjectRole::Maintainer],
        )
        .await
    }

    /// Whether the principal may delete the issue.
    ///
    /// Grant paths: global `admin` or `manager`, or project `owner` or
    /// `maintainer`. Ownership deliberately grants nothing here: a reporter
    /// may edit their own issue but not delete it.
    pub async fn can_delete_issue(
        &self,
        principal: &Principal,
        issue: &IssueRecord,
    ) -> AppResult<bool> {
        if has_global_role(principal, ELEVATED_GLOBAL_ROLES) {
            return Ok(true);
        }

        if !principal.is_active() {
            return Ok(false);
        }

        self.has_project_role(
            principal.user_id(),
            issue.project_id,
            &[ProjectRole::Owner, ProjectRole::Maintainer],
        )
        .await
    }

    /// Whether the principal may change the issue's assignee.
    ///
    /// Grant paths: global `admin` or `manager`, or project `owner` or
    /// `maintainer`.
    pub async fn can_assign_issues(
        &self,
        principal: &Principal,
        project_id: ProjectId,
    ) -> AppResult<bool> {
        if has_global_role(principal, ELEVATED_GLOBAL_ROLES) {
            return Ok(true);
        }

        if !principal.is_active() {
            return Ok(false);
        }

        self.has_project_role(
            principal.user_id(),
            project_id,
            &[ProjectRole::Owner, ProjectRole::Maintainer],
        )
        .await
    }

    /// Whether the principal may comment on the issue.
    ///
    /// Same grant paths as viewing: anyone who can see an issue can
    /// participate in its discussion.
    pub async fn can_comment_on_issue(
        &self,
        principal: &Principal,
        issue: &IssueRecord,
    ) -> AppResult<bool> {
        self.can_view_issue(principal, issue).await
    }

    /// Whether the principal may edit or delete the comment.
    ///
    /// Grant paths: being its author, global `admin`, or project `owner` or
    /// `maintainer` in the project of the comment's issue.
    pub async fn can_moderate_comment(
        &self,
        principal: &Principal,
        comment: &CommentRecord,
        project_id: ProjectId,
    ) -> AppResult<bool> {
        if !principal.is_active() {
            return Ok(false);
        }

        if comment.author_id == principal.user_id() {
            return Ok(true);
        }

        if has_global_role(principal, &[GlobalRole::Admin]) {
            return Ok(true);
        }

        self.has_project_role(
            principal.user_id(),
            project_id,
            &[ProjectRole::Owner, ProjectRole::Maintainer],
        )
        .await
    }
}

fn is_reporter_or_assignee(principal: &Principal, issue: &IssueRecord) -> bool {
    issue.reporter_id == principal.user_id() || issue.assignee_id == Some(principal.user_id())
}
