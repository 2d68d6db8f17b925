use super::*;

impl PostgresProjectRepository {
    pub(super) async fn find_membership_impl(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> AppResult<Option<MembershipRecord>> {
        let row = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT project_id, user_id, role, added_at
            FROM project_memberships
            WHERE user_id = $1 AND project_id = $2
            LIMIT 1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(project_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find membership: {error}")))?;

        row.map(MembershipRecord::try_from).transpose()
    }

    pub(super) async fn list_for_project_impl(
        &self,
        project_id: ProjectId,
    ) -> AppResult<Vec<MembershipRecord>> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT project_id, user_id, role, added_at
            FROM project_memberships
            WHERE project_id = $1
            ORDER BY added_at
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list project memberships: {error}"))
        })?;

        rows.into_iter().map(MembershipRecord::try_from).collect()
    }

    pub(super) async fn list_project_ids_for_user_impl(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<ProjectId>> {
        let ids = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            SELECT project_id
            FROM project_memberships
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list project ids for user: {error}"))
        })?;

        Ok(ids.into_iter().map(ProjectId::from_uuid).collect())
    }

    pub(super) async fn insert_membership_impl(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        role: ProjectRole,
    ) -> AppResult<MembershipRecord> {
        let row = sqlx::query_as::<_, MembershipRow>(
            r#"
            INSERT INTO project_memberships (project_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING project_id, user_id, role, added_at
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(membership_conflict_or_internal)?;

        MembershipRecord::try_from(row)
    }

    pub(super) async fn update_role_impl(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        role: ProjectRole,
    ) -> AppResult<MembershipRecord> {
        let row = sqlx::query_as::<_, MembershipRow>(
            r#"
            UPDATE project_memberships
            SET role = $3
            WHERE project_id = $1 AND user_id = $2
            RETURNING project_id, user_id, role, added_at
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update membership role: {error}")))?;

        row.map(MembershipRecord::try_from)
            .transpose()?
            .ok_or_else(|| AppError::NotFound("membership not found".to_owned()))
    }

    pub(super) async fn remove_membership_impl(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM project_memberships
            WHERE project_id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to remove membership: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("membership not found".to_owned()));
        }

        Ok(())
    }
}

fn membership_conflict_or_internal(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("user is already a member of this project".to_owned());
    }

    AppError::Internal(format!("failed to insert membership: {error}"))
}
