use super::*;

impl ProjectService {
    /// Lists the members of a project visible to the principal.
    pub async fn list_members(
        &self,
        principal: &Principal,
        project_id: ProjectId,
    ) -> AppResult<Vec<MembershipRecord>> {
        self.find_project(project_id).await?;

        if !self
            .authorization
            .can_view_project(principal, project_id)
            .await?
        {
            return Err(AppError::Forbidden(
                "you do not have access to this project".to_owned(),
            ));
        }

        self.memberships.list_for_project(project_id).await
    }

    /// Adds a user to a project with the given role.
    ///
    /// Owners and maintainers may add members; removal and role changes
    /// are stricter and stay with owners and global administrators.
    pub async fn add_member(
        &self,
        principal: &Principal,
        project_id: ProjectId,
        user_id: UserId,
        role: ProjectRole,
    ) -> AppResult<MembershipRecord> {
        self.find_project(project_id).await?;

        if !self
            .authorization
            .can_add_project_member(principal, project_id)
            .await?
        {
            return Err(AppError::Forbidden(
                "only project owners and maintainers can add members".to_owned(),
            ));
        }

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("user not found".to_owned()));
        }

        if self.memberships.find(user_id, project_id).await?.is_some() {
            return Err(AppError::Conflict(
                "user is already a member of this project".to_owned(),
            ));
        }

        self.memberships.insert(project_id, user_id, role).await
    }

    /// Replaces a member's role.
    ///
    /// Self-modification is denied outright, before any role check, so an
    /// owner cannot escalate or reshuffle their own membership.
    pub async fn update_member_role(
        &self,
        principal: &Principal,
        project_id: ProjectId,
        user_id: UserId,
        role: ProjectRole,
    ) -> AppResult<MembershipRecord> {
        if principal.user_id() == user_id {
            return Err(AppError::Forbidden(
                "you cannot change or remove your own project membership".to_owned(),
            ));
        }

        self.find_project(project_id).await?;

        if !self
            .authorization
            .can_administer_project_members(principal, project_id)
            .await?
        {
            return Err(AppError::Forbidden(
                "only project owners can change member roles".to_owned(),
            ));
        }

        if self.memberships.find(user_id, project_id).await?.is_none() {
            return Err(AppError::NotFound("membership not found".to_owned()));
        }

        self.memberships.update_role(project_id, user_id, role).await
    }

    /// Removes a member from a project.
    ///
    /// Self-removal is denied outright, before any role check.
    pub async fn remove_member(
        &self,
        principal: &Principal,
        project_id: ProjectId,
        user_id: UserId,
    ) -> AppResult<()> {
        if principal.user_id() == user_id {
            return Err(AppError::Forbidden(
                "you cannot change or remove your own project membership".to_owned(),
            ));
        }

        self.find_project(project_id).await?;

        if !self
            .authorization
            .can_administer_project_members(principal, project_id)
            .await?
        {
            return Err(AppError::Forbidden(
                "only project owners can remove members".to_owned(),
            ));
        }

        if self.memberships.find(user_id, project_id).await?.is_none() {
            return Err(AppError::NotFound("membership not found".to_owned()));
        }

        self.memberships.remove(project_id, user_id).await
    }
}
