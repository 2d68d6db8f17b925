//! Ports for project, membership, issue, and comment persistence.

mod comments;
mod issues;
mod memberships;
mod projects;

pub use comments::{CommentRecord, CommentRepository};
pub use issues::{IssueFilter, IssueRecord, IssueRepository, NewIssueRecord, UpdateIssueInput};
pub use memberships::{MembershipRecord, MembershipRepository};
pub use projects::{ProjectRecord, ProjectRepository, UpdateProjectInput};
