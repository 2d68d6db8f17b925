//! In-memory issue repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use punchlist_application::{
    IssueFilter, IssueRecord, IssueRepository, NewIssueRecord, UpdateIssueInput,
};
use punchlist_core::{AppError, AppResult};
use punchlist_domain::{IssueId, IssueStatus, ProjectId, UserId};

/// In-memory issue repository for tests and local development.
#[derive(Debug, Default)]
pub struct InMemoryIssueRepository {
    issues: RwLock<HashMap<IssueId, IssueRecord>>,
}

impl InMemoryIssueRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            issues: RwLock::new(HashMap::new()),
        }
    }
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
impl IssueRepository for InMemoryIssueRepository {
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
        self.issues.write().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, issue_id: IssueId) -> AppResult<Option<IssueRecord>> {
        Ok(self.issues.read().await.get(&issue_id).cloned())
    }

    async fn list(&self, filter: &IssueFilter) -> AppResult<Vec<IssueRecord>> {
        let mut records: Vec<IssueRecord> = self
            .issues
            .read()
            .await
            .values()
            .filter(|record| matches_filter(record, filter))
            .cloned()
            .collect();
        records.sort_by_key(|record| std::cmp::Reverse(record.created_at));
        Ok(records)
    }

    async fn list_visible_to(
        &self,
        user_id: UserId,
        project_ids: &[ProjectId],
        filter: &IssueFilter,
    ) -> AppResult<Vec<IssueRecord>> {
        let mut records: Vec<IssueRecord> = self
            .issues
            .read()
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
        records.sort_by_key(|record| std::cmp::Reverse(record.created_at));
        Ok(records)
    }

    async fn update(&self, issue_id: IssueId, update: UpdateIssueInput) -> AppResult<IssueRecord> {
        let mut issues = self.issues.write().await;
        let record = issues
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
        let mut issues = self.issues.write().await;
        let record = issues
            .get_mut(&issue_id)
            .ok_or_else(|| AppError::NotFound("issue not found".to_owned()))?;
        record.assignee_id = assignee_id;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, issue_id: IssueId) -> AppResult<()> {
        self.issues
            .write()
            .await
            .remove(&issue_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("issue not found".to_owned()))
    }
}
