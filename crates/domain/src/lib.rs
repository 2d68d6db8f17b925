//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod comment;
mod issue;
mod principal;
mod project;
mod user;

pub use comment::{COMMENT_BODY_MAX_LENGTH, CommentId, validate_comment_body};
pub use issue::{
    ISSUE_TITLE_MAX_LENGTH, IssueId, IssuePriority, IssueStatus, validate_issue_title,
};
pub use principal::Principal;
pub use project::{PROJECT_NAME_MAX_LENGTH, ProjectId, ProjectRole, validate_project_name};
pub use user::{
    EmailAddress, GlobalRole, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, USERNAME_MAX_LENGTH,
    USERNAME_MIN_LENGTH, UserId, Username, validate_password,
};
