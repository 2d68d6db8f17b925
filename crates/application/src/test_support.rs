//! Shared in-memory fakes for service tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;

use punchlist_core::{AppError, AppResult};
use punchlist_domain::{
    CommentId, GlobalRole, IssueId, IssueStatus, Principal, ProjectId, ProjectRole, UserId,
};

use crate::identity_ports::{
    NewUserRecord, PasswordHasher, SESSION_TOKEN_TTL_DAYS, SessionClaims, SessionTokenCodec,
    UserRecord, UserRepository,
};
use crate::tracker_ports::{
    CommentRecord, CommentRepository, IssueFilter, IssueRecord, IssueRepository, MembershipRecord,
    MembershipRepository, NewIssueRecord, ProjectRecord, ProjectRepository, UpdateIssueInput,
    UpdateProjectInput,
};

/// Password used by every seeded test account.
pub(crate) const TEST_PASSWORD: &str = "horse-battery-staple";

pub(crate) fn principal_for(user: &UserRecord) -> Principal {
    Principal::new(user.id, user.global_role, user.is_active)
}

#[derive(Default)]
pub(crate) struct FakeUserRepository {
    rows: Mutex<HashMap<UserId, UserRecord>>,
}

impl FakeUserRepository {
    /// Inserts an active account with the shared test password.
    pub(crate) async fn seed_user(&self, username: &str, role: GlobalRole) -> UserRecord {
        let record = UserRecord {
            id: UserId::new(),
            username: username.to_owned(),
            email: format!("{username}@example.com"),
            password_hash: format!("fake$seed${TEST_PASSWORD}"),
            global_role: role,
            is_active: true,
            created_at: Utc::now(),
        };
        self.rows.lock().await.insert(record.id, record.clone());
        record
    }
}

#[async_trait]
impl UserRepository for FakeUserRepository {
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self.rows.lock().await.get(&user_id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<UserRecord>> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .find(|record| record.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .find(|record| record.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, user: NewUserRecord) -> AppResult<UserRecord> {
        let record = UserRecord {
            id: UserId::new(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            global_role: user.global_role,
            is_active: true,
            created_at: Utc::now(),
        };
        self.rows.lock().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list(&self) -> AppResult<Vec<UserRecord>> {
        let mut users: Vec<UserRecord> = self.rows.lock().await.values().cloned().collect();
        users.sort_by_key(|record| record.created_at);
        Ok(users)
    }

    async fn update_email(&self, user_id: UserId, email: &str) -> AppResult<UserRecord> {
        let mut rows = self.rows.lock().await;
        let record = rows
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;
        record.email = email.to_owned();
        Ok(record.clone())
    }

    async fn update_password(&self, user_id: UserId, password_hash: &str) -> AppResult<()> {
        let mut rows = self.rows.lock().await;
        let record = rows
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;
        record.password_hash = password_hash.to_owned();
        Ok(())
    }

    async fn set_global_role(&self, user_id: UserId, role: GlobalRole) -> AppResult<UserRecord> {
        let mut rows = self.rows.lock().await;
        let record = rows
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;
        record.global_role = role;
        Ok(record.clone())
    }

    async fn set_active(&self, user_id: UserId, is_active: bool) -> AppResult<UserRecord> {
        let mut rows = self.rows.lock().await;
        let record = rows
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;
        record.is_active = is_active;
        Ok(record.clone())
    }
}

/// Deterministic stand-in hasher: encodes the password and a counter so two
/// digests of the same password differ, like real salted hashing.
#[derive(Default)]
pub(crate) struct FakePasswordHasher {
    calls: AtomicU64,
}

impl PasswordHasher for FakePasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(format!("fake${salt}${password}"))
    }

    fn verify_password(&self, password: &str, digest: &str) -> bool {
        digest
            .rsplit_once('$')
            .is_some_and(|(_, stored)| stored == password)
    }
}

#[derive(Default)]
pub(crate) struct FakeSessionTokenCodec {
    issued: std::sync::Mutex<HashMap<String, SessionClaims>>,
    counter: AtomicU64,
}

impl SessionTokenCodec for FakeSessionTokenCodec {
    fn issue(&self, subject_id: UserId, global_role: GlobalRole) -> AppResult<String> {
        let serial = self.counter.fetch_add(1, Ordering::Relaxed);
        let token = format!("session-{serial}");
        let issued_at = Utc::now();
        let claims = SessionClaims {
            subject_id,
            global_role,
            issued_at,
            expires_at: issued_at + Duration::days(SESSION_TOKEN_TTL_DAYS),
        };
        self.issued
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(token.clone(), claims);
        Ok(token)
    }

    fn verify(&self, token: &str) -> AppResult<SessionClaims> {
        self.issued
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(token)
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}

#[derive(Default)]
pub(crate) struct FakeMembershipRepository {
    rows: Mutex<HashMap<(UserId, ProjectId), MembershipRecord>>,
}

impl FakeMembershipRepository {
    /// Inserts or replaces a membership without conflict checks.
    pub(crate) async fn grant(&self, user_id: UserId, project_id: ProjectId, role: ProjectRole) {
        let record = MembershipRecord {
            project_id,
            user_id,
            role,
            added_at: Utc::now(),
        };
        self.rows.lock().await.insert((user_id, project_id), record);
    }
}

#[async_trait]
impl MembershipRepository for FakeMembershipRepository {
    async fn find(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> AppResult<Option<MembershipRecord>> {
        Ok(self.rows.lock().await.get(&(user_id, project_id)).cloned())
    }

    async fn list_for_project(&self, project_id: ProjectId) -> AppResult<Vec<MembershipRecord>> {
        let mut members: Vec<MembershipRecord> = self
            .rows
            .lock()
            .await
            .values()
            .filter(|record| record.project_id == project_id)
            .cloned()
            .collect();
        members.sort_by_key(|record| record.added_at);
        Ok(members)
    }

    async fn list_project_ids_for_user(&self, user_id: UserId) -> AppResult<Vec<ProjectId>> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .filter(|record| record.user_id == user_id)
            .map(|record| record.project_id)
            .collect())
    }

    async fn insert(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        role: ProjectRole,
    ) -> AppResult<MembershipRecord> {
        let mut rows = self.rows.lock().await;
        if rows.contains_key(&(user_id, project_id)) {
            return Err(AppError::Conflict(
                "user is already a member of this project".to_owned(),
            ));
        }
        let record = MembershipRecord {
            project_id,
            user_id,
            role,
            added_at: Utc::now(),
        };
        rows.insert((user_id, project_id), record.clone());
        Ok(record)
    }

    async fn update_role(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        role: ProjectRole,
    ) -> AppResult<MembershipRecord> {
        let mut rows = self.rows.lock().await;
        let record = rows
            .get_mut(&(user_id, project_id))
            .ok_or_else(|| AppError::NotFound("membership not found".to_owned()))?;
        record.role = role;
        Ok(record.clone())
    }

    async fn remove(&self, project_id: ProjectId, user_id: UserId) -> AppResult<()> {
        self.rows
            .lock()
            .await
            .remove(&(user_id, project_id))
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("membership not found".to_owned()))
    }
}

pub(crate) struct FakeProjectRepository {
    rows: Mutex<HashMap<ProjectId, ProjectRecord>>,
    memberships: Arc<FakeMembershipRepository>,
}

impl FakeProjectRepository {
    pub(crate) fn new(memberships: Arc<FakeMembershipRepository>) -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            memberships,
        }
    }
}

#[async_trait]
impl ProjectRepository for FakeProjectRepository {
    async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        creator_id: UserId,
    ) -> AppResult<ProjectRecord> {
        let record = ProjectRecord {
            id: ProjectId::new(),
            name: name.to_owned(),
            description: description.map(ToOwned::to_owned),
            created_at: Utc::now(),
        };
        self.rows.lock().await.insert(record.id, record.clone());
        self.memberships
            .insert(record.id, creator_id, ProjectRole::Owner)
            .await?;
        Ok(record)
    }

    async fn find_by_id(&self, project_id: ProjectId) -> AppResult<Option<ProjectRecord>> {
        Ok(self.rows.lock().await.get(&project_id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<ProjectRecord>> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .find(|record| record.name == name)
            .cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<ProjectRecord>> {
        let mut projects: Vec<ProjectRecord> = self.rows.lock().await.values().cloned().collect();
        projects.sort_by_key(|record| record.created_at);
        Ok(projects)
    }

    async fn list_for_member(&self, user_id: UserId) -> AppResult<Vec<ProjectRecord>> {
        let project_ids = self.memberships.list_project_ids_for_user(user_id).await?;
        let rows = self.rows.lock().await;
        let mut projects: Vec<ProjectRecord> = project_ids
            .iter()
            .filter_map(|project_id| rows.get(project_id).cloned())
            .collect();
        projects.sort_by_key(|record| record.created_at);
        Ok(projects)
    }

    async fn update(
        &self,
        project_id: ProjectId,
        update: UpdateProjectInput,
    ) -> AppResult<ProjectRecord> {
        let mut rows = self.rows.lock().await;
        let record = rows
            .get_mut(&project_id)
            .ok_or_else(|| AppError::NotFound("project not found".to_owned()))?;
        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(description) = update.description {
            record.description = Some(description);
        }
        Ok(record.clone())
    }

    async fn delete(&self, project_id: ProjectId) -> AppResult<()> {
        self.rows
            .lock()
            .await
            .remove(&project_id)
            .ok_or_else(|| AppError::NotFound("project not found".to_owned()))?;
        let mut memberships = self.memberships.rows.lock().await;
        memberships.retain(|_, record| record.project_id != project_id);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeIssueRepository {
    rows: Mutex<HashMap<IssueId, IssueRecord>>,
}

fn matches_filter(record: &IssueRecord, filter: &IssueFilter) -> bool {
    filter
        .project_id
        .is_none_or(|project_id| record.project_id == project_id)
        && filter.status.is_none_or(|status| record.status == status)
        && filter
            .assignee_id
            .is_none_or(|assignee_id| record.assignee_id == Some(assignee_id))
}

#[async_trait]
impl IssueRepository for FakeIssueRepository {
    async fn create(&self, issue: NewIssueRecord) -> AppResult<IssueRecord> {
        let now = Utc::now();
        let record = IssueRecord {
            id: IssueId::new(),
            project_id: issue.project_id,
            title: issue.title,
            description: issue.description,
            status: IssueStatus::Open,
            priority: issue.priority,
            reporter_id: issue.reporter_id,
            assignee_id: issue.assignee_id,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, issue_id: IssueId) -> AppResult<Option<IssueRecord>> {
        Ok(self.rows.lock().await.get(&issue_id).cloned())
    }

    async fn list(&self, filter: &IssueFilter) -> AppResult<Vec<IssueRecord>> {
        let mut issues: Vec<IssueRecord> = self
            .rows
            .lock()
            .await
            .values()
            .filter(|record| matches_filter(record, filter))
            .cloned()
            .collect();
        issues.sort_by_key(|record| std::cmp::Reverse(record.created_at));
        Ok(issues)
    }

    async fn list_visible_to(
        &self,
        user_id: UserId,
        project_ids: &[ProjectId],
        filter: &IssueFilter,
    ) -> AppResult<Vec<IssueRecord>> {
        let mut issues: Vec<IssueRecord> = self
            .rows
            .lock()
            .await
            .values()
            .filter(|record| {
                project_ids.contains(&record.project_id)
                    || record.reporter_id == user_id
                    || record.assignee_id == Some(user_id)
            })
            .filter(|record| matches_filter(record, filter))
            .cloned()
            .collect();
        issues.sort_by_key(|record| std::cmp::Reverse(record.created_at));
        Ok(issues)
    }

    async fn update(&self, issue_id: IssueId, update: UpdateIssueInput) -> AppResult<IssueRecord> {
        let mut rows = self.rows.lock().await;
        let record = rows
            .get_mut(&issue_id)
            .ok_or_else(|| AppError::NotFound("issue not found".to_owned()))?;
        if let Some(title) = update.title {
            record.title = title;
        }
        if let Some(description) = update.description {
            record.description = Some(description);
        }
        if let Some(status) = update.status {
            record.status = status;
        }
        if let Some(priority) = update.priority {
            record.priority = priority;
        }
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn set_assignee(
        &self,
        issue_id: IssueId,
        assignee_id: Option<UserId>,
    ) -> AppResult<IssueRecord> {
        let mut rows = self.rows.lock().await;
        let record = rows
            .get_mut(&issue_id)
            .ok_or_else(|| AppError::NotFound("issue not found".to_owned()))?;
        record.assignee_id = assignee_id;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, issue_id: IssueId) -> AppResult<()> {
        self.rows
            .lock()
            .await
            .remove(&issue_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("issue not found".to_owned()))
    }
}

#[derive(Default)]
pub(crate) struct FakeCommentRepository {
    rows: Mutex<HashMap<CommentId, CommentRecord>>,
}

#[async_trait]
impl CommentRepository for FakeCommentRepository {
    async fn create(
        &self,
        issue_id: IssueId,
        author_id: UserId,
        body: &str,
    ) -> AppResult<CommentRecord> {
        let now = Utc::now();
        let record = CommentRecord {
            id: CommentId::new(),
            issue_id,
            author_id,
            body: body.to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, comment_id: CommentId) -> AppResult<Option<CommentRecord>> {
        Ok(self.rows.lock().await.get(&comment_id).cloned())
    }

    async fn list_for_issue(&self, issue_id: IssueId) -> AppResult<Vec<CommentRecord>> {
        let mut comments: Vec<CommentRecord> = self
            .rows
            .lock()
            .await
            .values()
            .filter(|record| record.issue_id == issue_id)
            .cloned()
            .collect();
        comments.sort_by_key(|record| record.created_at);
        Ok(comments)
    }

    async fn update_body(&self, comment_id: CommentId, body: &str) -> AppResult<CommentRecord> {
        let mut rows = self.rows.lock().await;
        let record = rows
            .get_mut(&comment_id)
            .ok_or_else(|| AppError::NotFound("comment not found".to_owned()))?;
        record.body = body.to_owned();
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, comment_id: CommentId) -> AppResult<()> {
        self.rows
            .lock()
            .await
            .remove(&comment_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("comment not found".to_owned()))
    }
}
