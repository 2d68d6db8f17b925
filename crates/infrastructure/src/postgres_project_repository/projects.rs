use super::*;

impl PostgresProjectRepository {
    pub(super) async fn create_impl(
        &self,
        name: &str,
        description: Option<&str>,
        creator_id: UserId,
    ) -> AppResult<ProjectRecord> {
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to begin transaction: {error}"))
        })?;

        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(&mut *transaction)
        .await
        .map_err(|error| name_conflict_or_internal(error, "create project"))?;

        sqlx::query(
            r#"
            INSERT INTO project_memberships (project_id, user_id, role)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(row.id)
        .bind(creator_id.as_uuid())
        .bind(ProjectRole::Owner.as_str())
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to add creator as project owner: {error}"))
        })?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(ProjectRecord::from(row))
    }

    pub(super) async fn find_by_id_impl(
        &self,
        project_id: ProjectId,
    ) -> AppResult<Option<ProjectRecord>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, name, description, created_at
            FROM projects
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find project by id: {error}")))?;

        Ok(row.map(ProjectRecord::from))
    }

    pub(super) async fn find_by_name_impl(&self, name: &str) -> AppResult<Option<ProjectRecord>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, name, description, created_at
            FROM projects
            WHERE name = $1
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find project by name: {error}")))?;

        Ok(row.map(ProjectRecord::from))
    }

    pub(super) async fn list_all_impl(&self) -> AppResult<Vec<ProjectRecord>> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, name, description, created_at
            FROM projects
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list projects: {error}")))?;

        Ok(rows.into_iter().map(ProjectRecord::from).collect())
    }

    pub(super) async fn list_for_member_impl(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<ProjectRecord>> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT p.id, p.name, p.description, p.created_at
            FROM projects p
            INNER JOIN project_memberships m ON m.project_id = p.id
            WHERE m.user_id = $1
            ORDER BY p.created_at
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list projects for member: {error}"))
        })?;

        Ok(rows.into_iter().map(ProjectRecord::from).collect())
    }

    pub(super) async fn update_impl(
        &self,
        project_id: ProjectId,
        update: UpdateProjectInput,
    ) -> AppResult<ProjectRecord> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            UPDATE projects
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(update.name)
        .bind(update.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| name_conflict_or_internal(error, "update project"))?;

        row.map(ProjectRecord::from)
            .ok_or_else(|| AppError::NotFound("project not found".to_owned()))
    }

    pub(super) async fn delete_impl(&self, project_id: ProjectId) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM projects
            WHERE id = $1
            "#,
        )
        .bind(project_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete project: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("project not found".to_owned()));
        }

        Ok(())
    }
}

fn name_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("a project with this name already exists".to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
