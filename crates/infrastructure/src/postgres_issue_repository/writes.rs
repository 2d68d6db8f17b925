use super::*;

impl PostgresIssueRepository {
    pub(super) async fn create_impl(&self, issue: NewIssueRecord) -> AppResult<IssueRecord> {
        let row = sqlx::query_as::<_, IssueRow>(
            r#"
            INSERT INTO issues (project_id, title, description, priority, reporter_id, assignee_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, project_id, title, description, status, priority,
                      reporter_id, assignee_id, created_at, updated_at
            "#,
        )
        .bind(issue.project_id.as_uuid())
        .bind(&issue.title)
        .bind(&issue.description)
        .bind(issue.priority.as_str())
        .bind(issue.reporter_id.as_uuid())
        .bind(issue.assignee_id.map(|id| id.as_uuid()))
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create issue: {error}")))?;

        IssueRecord::try_from(row)
    }

    pub(super) async fn update_impl(
        &self,
        issue_id: IssueId,
        update: UpdateIssueInput,
    ) -> AppResult<IssueRecord> {
        let row = sqlx::query_as::<_, IssueRow>(
            r#"
            UPDATE issues
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                priority = COALESCE($5, priority),
                updated_at = now()
            WHERE id = $1
            RETURNING id, project_id, title, description, status, priority,
                      reporter_id, assignee_id, created_at, updated_at
            "#,
        )
        .bind(issue_id.as_uuid())
        .bind(update.title)
        .bind(update.description)
        .bind(update.status.map(|status| status.as_str()))
        .bind(update.priority.map(|priority| priority.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update issue: {error}")))?;

        row.map(IssueRecord::try_from)
            .transpose()?
            .ok_or_else(|| AppError::NotFound("issue not found".to_owned()))
    }

    pub(super) async fn set_assignee_impl(
        &self,
        issue_id: IssueId,
        assignee_id: Option<UserId>,
    ) -> AppResult<IssueRecord> {
        let row = sqlx::query_as::<_, IssueRow>(
            r#"
            UPDATE issues
            SET assignee_id = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, project_id, title, description, status, priority,
                      reporter_id, assignee_id, created_at, updated_at
            "#,
        )
        .bind(issue_id.as_uuid())
        .bind(assignee_id.map(|id| id.as_uuid()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to set issue assignee: {error}")))?;

        row.map(IssueRecord::try_from)
            .transpose()?
            .ok_or_else(|| AppError::NotFound("issue not found".to_owned()))
    }

    pub(super) async fn delete_impl(&self, issue_id: IssueId) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM issues
            WHERE id = $1
            "#,
        )
        .bind(issue_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete issue: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("issue not found".to_owned()));
        }

        Ok(())
    }
}
