//! Project lifecycle and membership service.

use std::sync::Arc;

use punchlist_core::{AppError, AppResult};
use punchlist_domain::{Principal, ProjectId, ProjectRole, UserId, validate_project_name};

use crate::authorization_service::{AuthorizationService, ProjectListScope};
use crate::identity_ports::UserRepository;
use crate::tracker_ports::{
    MembershipRecord, MembershipRepository, ProjectRecord, ProjectRepository, UpdateProjectInput,
};

mod members;

/// Application service for projects and their memberships.
#[derive(Clone)]
pub struct ProjectService {
    projects: Arc<dyn ProjectRepository>,
    memberships: Arc<dyn MembershipRepository>,
    users: Arc<dyn UserRepository>,
    authorization: AuthorizationService,
}

impl ProjectService {
    /// Creates a new project service.
    #[must_use]
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        memberships: Arc<dyn MembershipRepository>,
        users: Arc<dyn UserRepository>,
        authorization: AuthorizationService,
    ) -> Self {
        Self {
            projects,
            memberships,
            users,
            authorization,
        }
    }

    /// Creates a project. The creator becomes its first `owner` member.
    ///
    /// Restricted to global `admin` callers.
    pub async fn create_project(
        &self,
        principal: &Principal,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<ProjectRecord> {
        if !self.authorization.can_create_project(principal) {
            return Err(AppError::Forbidden(
                "only administrators can create projects".to_owned(),
            ));
        }

        let name = name.trim();
        validate_project_name(name)?;

        if self.projects.find_by_name(name).await?.is_some() {
            return Err(AppError::Conflict(
                "a project with this name already exists".to_owned(),
            ));
        }

        self.projects
            .create(name, description, principal.user_id())
            .await
    }

    /// Returns a project visible to the principal.
    pub async fn get_project(
        &self,
        principal: &Principal,
        project_id: ProjectId,
    ) -> AppResult<ProjectRecord> {
        let project = self.find_project(project_id).await?;

        if !self
            .authorization
            .can_view_project(principal, project_id)
            .await?
        {
            return Err(AppError::Forbidden(
                "you do not have access to this project".to_owned(),
            ));
        }

        Ok(project)
    }

    /// Lists projects within the principal's visibility scope.
    ///
    /// Elevated callers see everything; everyone else sees the projects
    /// they belong to. An empty result is a valid answer, not an error.
    pub async fn list_projects(&self, principal: &Principal) -> AppResult<Vec<ProjectRecord>> {
        match self.authorization.project_list_scope(principal) {
            ProjectListScope::Unrestricted => self.projects.list_all().await,
            ProjectListScope::MemberProjects => {
                self.projects.list_for_member(principal.user_id()).await
            }
        }
    }

    /// Applies a partial update to a project.
    pub async fn update_project(
        &self,
        principal: &Principal,
        project_id: ProjectId,
        update: UpdateProjectInput,
    ) -> AppResult<ProjectRecord> {
        self.find_project(project_id).await?;

        if !self
            .authorization
            .can_manage_project(principal, project_id)
            .await?
        {
            return Err(AppError::Forbidden(
                "only project owners and maintainers can update this project".to_owned(),
            ));
        }

        let update = UpdateProjectInput {
            name: match update.name {
                Some(name) => {
                    let name = name.trim().to_owned();
                    validate_project_name(&name)?;
                    if let Some(existing) = self.projects.find_by_name(&name).await?
                        && existing.id != project_id
                    {
                        return Err(AppError::Conflict(
                            "a project with this name already exists".to_owned(),
                        ));
                    }
                    Some(name)
                }
                None => None,
            },
            description: update.description,
        };

        self.projects.update(project_id, update).await
    }

    /// Deletes a project together with its memberships, issues, and
    /// comments.
    pub async fn delete_project(
        &self,
        principal: &Principal,
        project_id: ProjectId,
    ) -> AppResult<()> {
        self.find_project(project_id).await?;

        if !self
            .authorization
            .can_delete_project(principal, project_id)
            .await?
        {
            return Err(AppError::Forbidden(
                "only project owners can delete projects".to_owned(),
            ));
        }

        self.projects.delete(project_id).await
    }

    async fn find_project(&self, project_id: ProjectId) -> AppResult<ProjectRecord> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("project not found".to_owned()))
    }
}

#[cfg(test)]
mod tests;
