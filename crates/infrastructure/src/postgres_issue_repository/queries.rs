use super::*;

impl PostgresIssueRepository {
    pub(super) async fn find_by_id_impl(&self, issue_id: IssueId) -> AppResult<Option<IssueRecord>> {
        let row = sqlx::query_as::<_, IssueRow>(
            r#"
            SELECT id, project_id, title, description, status, priority,
                   reporter_id, assignee_id, created_at, updated_at
            FROM issues
            WHERE id = $1
            LIMIT 1
            "#,
        )
        .bind(issue_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find issue by id: {error}")))?;

        row.map(IssueRecord::try_from).transpose()
    }

    pub(super) async fn list_impl(&self, filter: &IssueFilter) -> AppResult<Vec<IssueRecord>> {
        let rows = sqlx::query_as::<_, IssueRow>(
            r#"
            SELECT id, project_id, title, description, status, priority,
                   reporter_id, assignee_id, created_at, updated_at
            FROM issues
            WHERE ($1::UUID IS NULL OR project_id = $1)
                AND ($2::TEXT IS NULL OR status = $2)
                AND ($3::UUID IS NULL OR assignee_id = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.project_id.map(|id| id.as_uuid()))
        .bind(filter.status.map(|status| status.as_str()))
        .bind(filter.assignee_id.map(|id| id.as_uuid()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list issues: {error}")))?;

        rows.into_iter().map(IssueRecord::try_from).collect()
    }

    pub(super) async fn list_visible_to_impl(
        &self,
        user_id: UserId,
        project_ids: &[ProjectId],
        filter: &IssueFilter,
    ) -> AppResult<Vec<IssueRecord>> {
        let project_uuids: Vec<uuid::Uuid> =
            project_ids.iter().map(|id| id.as_uuid()).collect();

        let rows = sqlx::query_as::<_, IssueRow>(
            r#"
            SELECT id, project_id, title, description, status, priority,
                   reporter_id, assignee_id, created_at, updated_at
            FROM issues
            WHERE (project_id = ANY($1) OR reporter_id = $2 OR assignee_id = $2)
                AND ($3::UUID IS NULL OR project_id = $3)
                AND ($4::TEXT IS NULL OR status = $4)
                AND ($5::UUID IS NULL OR assignee_id = $5)
            ORDER BY created_at DESC
            "#,
        )
        .bind(project_uuids)
        .bind(user_id.as_uuid())
        .bind(filter.project_id.map(|id| id.as_uuid()))
        .bind(filter.status.map(|status| status.as_str()))
        .bind(filter.assignee_id.map(|id| id.as_uuid()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list visible issues: {error}")))?;

        rows.into_iter().map(IssueRecord::try_from).collect()
    }
}
