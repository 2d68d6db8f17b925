//! Issue discussion service.

use std::sync::Arc;

use punchlist_core::{AppError, AppResult};
use punchlist_domain::{CommentId, IssueId, Principal, validate_comment_body};

use crate::authorization_service::AuthorizationService;
use crate::tracker_ports::{CommentRecord, CommentRepository, IssueRecord, IssueRepository};

/// Application service for issue comments.
#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    issues: Arc<dyn IssueRepository>,
    authorization: AuthorizationService,
}

impl CommentService {
    /// Creates a new comment service.
    #[must_use]
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        issues: Arc<dyn IssueRepository>,
        authorization: AuthorizationService,
    ) -> Self {
        Self {
            comments,
            issues,
            authorization,
        }
    }

    /// Adds a comment to an issue. The principal becomes its author.
    ///
    /// Anyone who can view an issue can join its discussion.
    pub async fn add_comment(
        &self,
        principal: &Principal,
        issue_id: IssueId,
        body: &str,
    ) -> AppResult<CommentRecord> {
        let issue = self.find_issue(issue_id).await?;

        if !self
            .authorization
            .can_comment_on_issue(principal, &issue)
            .await?
        {
            return Err(AppError::Forbidden(
                "you do not have access to this issue".to_owned(),
            ));
        }

        let body = body.trim().to_owned();
        validate_comment_body(&body)?;

        self.comments
            .create(issue_id, principal.user_id(), &body)
            .await
    }

    /// Lists an issue's comments in creation order.
    pub async fn list_comments(
        &self,
        principal: &Principal,
        issue_id: IssueId,
    ) -> AppResult<Vec<CommentRecord>> {
        let issue = self.find_issue(issue_id).await?;

        if !self.authorization.can_view_issue(principal, &issue).await? {
            return Err(AppError::Forbidden(
                "you do not have access to this issue".to_owned(),
            ));
        }

        self.comments.list_for_issue(issue_id).await
    }

    /// Replaces a comment's body.
    ///
    /// Open to the author, global admins, and owners or maintainers of the
    /// project the comment's issue belongs to.
    pub async fn update_comment(
        &self,
        principal: &Principal,
        comment_id: CommentId,
        body: &str,
    ) -> AppResult<CommentRecord> {
        let comment = self.find_comment(comment_id).await?;
        self.require_moderation(principal, &comment).await?;

        let body = body.trim().to_owned();
        validate_comment_body(&body)?;

        self.comments.update_body(comment_id, &body).await
    }

    /// Deletes a comment. Same grant paths as editing.
    pub async fn delete_comment(
        &self,
        principal: &Principal,
        comment_id: CommentId,
    ) -> AppResult<()> {
        let comment = self.find_comment(comment_id).await?;
        self.require_moderation(principal, &comment).await?;

        self.comments.delete(comment_id).await
    }

    async fn require_moderation(
        &self,
        principal: &Principal,
        comment: &CommentRecord,
    ) -> AppResult<()> {
        let issue = self.find_issue(comment.issue_id).await?;

        if !self
            .authorization
            .can_moderate_comment(principal, comment, issue.project_id)
            .await?
        {
            return Err(AppError::Forbidden(
                "you do not have permission to modify this comment".to_owned(),
            ));
        }

        Ok(())
    }

    async fn find_issue(&self, issue_id: IssueId) -> AppResult<IssueRecord> {
        self.issues
            .find_by_id(issue_id)
            .await?
            .ok_or_else(|| AppError::NotFound("issue not found".to_owned()))
    }

    async fn find_comment(&self, comment_id: CommentId) -> AppResult<CommentRecord> {
        self.comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("comment not found".to_owned()))
    }
}
