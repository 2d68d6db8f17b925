use super::*;

impl AuthorizationService {
    /// Whether the principal may create projects.
    ///
    /// Grant paths: global `admin` only.
    #[must_use]
    pub fn can_create_project(&self, principal: &Principal) -> bool {
        has_global_role(principal, &[GlobalRole::Admin])
    }

    /// Whether the principal may view the project and its member list.
    ///
    /// Grant paths: global `admin` or `manager`, or any membership role in
    /// the project.
    pub async fn can_view_project(
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

    /// Whether the principal may rename or re-describe the project.
    ///
    /// Grant paths: global `admin` or `manager`, or project `owner` or
    /// `maintainer`.
    pub async fn can_manage_project(
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

    /// Whether the principal may delete the project.
    ///
    /// Grant paths: global `admin` or `manager`, or project `owner`.
    /// Stricter than managing: maintainers may edit but not delete.
    pub async fn can_delete_project(
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

        self.has_project_role(principal.user_id(), project_id, &[ProjectRole::Owner])
            .await
    }

    /// Whether the principal may add a member to the project.
    ///
    /// Grant paths: global `admin`, or project `owner` or `maintainer`.
    /// Looser than removal and role changes: maintainers can grow a team
    /// but not reshuffle or shrink it.
    pub async fn can_add_project_member(
        &self,
        principal: &Principal,
        project_id: ProjectId,
    ) -> AppResult<bool> {
        if has_global_role(principal, &[GlobalRole::Admin]) {
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

    /// Whether the principal may remove a member or change a member's role.
    ///
    /// Grant paths: global `admin`, or project `owner`. Callers must deny
    /// self-modification before consulting this policy.
    pub async fn can_administer_project_members(
        &self,
        principal: &Principal,
        project_id: ProjectId,
    ) -> AppResult<bool> {
        if has_global_role(principal, &[GlobalRole::Admin]) {
            return Ok(true);
        }

        if !principal.is_active() {
            return Ok(false);
        }

        self.has_project_role(principal.user_id(), project_id, &[ProjectRole::Owner])
            .await
    }
}
