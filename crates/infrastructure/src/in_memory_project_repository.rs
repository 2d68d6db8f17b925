//! In-memory project and membership repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use punchlist_application::{
    MembershipRecord, MembershipRepository, ProjectRecord, ProjectRepository, UpdateProjectInput,
};
use punchlist_core::{AppError, AppResult};
use punchlist_domain::{ProjectId, ProjectRole, UserId};

/// In-memory implementation of the project and membership ports.
///
/// Serves both ports from one store so project creation can seed the
/// creator's owner membership, mirroring the transactional behavior of the
/// PostgreSQL adapter.
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    projects: RwLock<HashMap<ProjectId, ProjectRecord>>,
    memberships: RwLock<HashMap<(UserId, ProjectId), MembershipRecord>>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            projects: RwLock::new(HashMap::new()),
            memberships: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        creator_id: UserId,
    ) -> AppResult<ProjectRecord> {
        let mut projects = self.projects.write().await;

        if projects.values().any(|record| record.name == name) {
            return Err(AppError::Conflict(
                "a project with this name already exists".to_owned(),
            ));
        }

        let record = ProjectRecord {
            id: ProjectId::new(),
            name: name.to_owned(),
            description: description.map(ToOwned::to_owned),
            created_at: Utc::now(),
        };
        projects.insert(record.id, record.clone());

        self.memberships.write().await.insert(
            (creator_id, record.id),
            MembershipRecord {
                project_id: record.id,
                user_id: creator_id,
                role: ProjectRole::Owner,
                added_at: Utc::now(),
            },
        );

        Ok(record)
    }

    async fn find_by_id(&self, project_id: ProjectId) -> AppResult<Option<ProjectRecord>> {
        Ok(self.projects.read().await.get(&project_id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<ProjectRecord>> {
        Ok(self
            .projects
            .read()
            .await
            .values()
            .find(|record| record.name == name)
            .cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<ProjectRecord>> {
        let mut records: Vec<ProjectRecord> =
            self.projects.read().await.values().cloned().collect();
        records.sort_by_key(|record| record.created_at);
        Ok(records)
    }

    async fn list_for_member(&self, user_id: UserId) -> AppResult<Vec<ProjectRecord>> {
        let member_of: Vec<ProjectId> = self
            .memberships
            .read()
            .await
            .values()
            .filter(|record| record.user_id == user_id)
            .map(|record| record.project_id)
            .collect();

        let projects = self.projects.read().await;
        let mut records: Vec<ProjectRecord> = member_of
            .iter()
            .filter_map(|project_id| projects.get(project_id).cloned())
            .collect();
        records.sort_by_key(|record| record.created_at);
        Ok(records)
    }

    async fn update(
        &self,
        project_id: ProjectId,
        update: UpdateProjectInput,
    ) -> AppResult<ProjectRecord> {
        let mut projects = self.projects.write().await;

        if let Some(name) = update.name.as_deref()
            && projects
                .values()
                .any(|record| record.id != project_id && record.name == name)
        {
            return Err(AppError::Conflict(
                "a project with this name already exists".to_owned(),
            ));
        }

        let record = projects
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
        self.projects
            .write()
            .await
            .remove(&project_id)
            .ok_or_else(|| AppError::NotFound("project not found".to_owned()))?;

        self.memberships
            .write()
            .await
            .retain(|_, record| record.project_id != project_id);
        Ok(())
    }
}

#[async_trait]
impl MembershipRepository for InMemoryProjectRepository {
    async fn find(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> AppResult<Option<MembershipRecord>> {
        Ok(self
            .memberships
            .read()
            .await
            .get(&(user_id, project_id))
            .cloned())
    }

    async fn list_for_project(&self, project_id: ProjectId) -> AppResult<Vec<MembershipRecord>> {
        let mut records: Vec<MembershipRecord> = self
            .memberships
            .read()
            .await
            .values()
            .filter(|record| record.project_id == project_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.added_at);
        Ok(records)
    }

    async fn list_project_ids_for_user(&self, user_id: UserId) -> AppResult<Vec<ProjectId>> {
        Ok(self
            .memberships
            .read()
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
        let mut memberships = self.memberships.write().await;

        if memberships.contains_key(&(user_id, project_id)) {
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
        memberships.insert((user_id, project_id), record.clone());
        Ok(record)
    }

    async fn update_role(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        role: ProjectRole,
    ) -> AppResult<MembershipRecord> {
        let mut memberships = self.memberships.write().await;
        let record = memberships
            .get_mut(&(user_id, project_id))
            .ok_or_else(|| AppError::NotFound("membership not found".to_owned()))?;
        record.role = role;
        Ok(record.clone())
    }

    async fn remove(&self, project_id: ProjectId, user_id: UserId) -> AppResult<()> {
        self.memberships
            .write()
            .await
            .remove(&(user_id, project_id))
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("membership not found".to_owned()))
    }
}
