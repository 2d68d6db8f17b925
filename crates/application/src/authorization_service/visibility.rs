use super::*;

impl AuthorizationService {
    /// Resolves the project list scope for the principal.
    ///
    /// Elevated callers see every project; everyone else sees only projects
    /// where they hold a membership.
    #[must_use]
    pub fn project_list_scope(&self, principal: &Principal) -> ProjectListScope {
        if has_global_role(principal, ELEVATED_GLOBAL_ROLES) {
            ProjectListScope::Unrestricted
        } else {
            ProjectListScope::MemberProjects
        }
    }

    /// Resolves the issue list scope for the principal.
    ///
    /// An explicit project filter degrades to a single access gate for that
    /// project applied once, not a per-row filter: a caller without access
    /// gets `Forbidden` for the whole query. Without a project filter the
    /// scope is the union of the caller's member projects and issues they
    /// reported or are assigned to; when that union matches nothing the
    /// query legitimately returns an empty list. The two outcomes must stay
    /// distinct.
    pub async fn issue_list_scope(
        &self,
        principal: &Principal,
        project_filter: Option<ProjectId>,
    ) -> AppResult<IssueListScope> {
        if has_global_role(principal, ELEVATED_GLOBAL_ROLES) {
            return Ok(IssueListScope::Unrestricted);
        }

        if let Some(project_id) = project_filter {
            if self
                .has_project_role(principal.user_id(), project_id, ProjectRole::all())
                .await?
            {
                return Ok(IssueListScope::SingleProject(project_id));
            }

            return Err(AppError::Forbidden(
                "you do not have access to this project".to_owned(),
            ));
        }

        let project_ids = self
            .memberships
            .list_project_ids_for_user(principal.user_id())
            .await?;

        Ok(IssueListScope::MemberOrOwned(project_ids))
    }
}
