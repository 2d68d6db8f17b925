use super::*;

impl PostgresUserRepository {
    pub(super) async fn create_impl(&self, user: NewUserRecord) -> AppResult<UserRecord> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, password_hash, global_role)
            VALUES ($1, LOWER($2), $3, $4)
            RETURNING id, username, email, password_hash, global_role, is_active, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.global_role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| unique_conflict_or_internal(error, "create user"))?;

        UserRecord::try_from(row)
    }

    pub(super) async fn update_email_impl(
        &self,
        user_id: UserId,
        email: &str,
    ) -> AppResult<UserRecord> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET email = LOWER($2), updated_at = now()
            WHERE id = $1
            RETURNING id, username, email, password_hash, global_role, is_active, created_at
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| unique_conflict_or_internal(error, "update email"))?;

        row.map(UserRecord::try_from)
            .transpose()?
            .ok_or_else(|| AppError::NotFound("user not found".to_owned()))
    }

    pub(super) async fn update_password_impl(
        &self,
        user_id: UserId,
        password_hash: &str,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update password: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("user not found".to_owned()));
        }

        Ok(())
    }

    pub(super) async fn set_global_role_impl(
        &self,
        user_id: UserId,
        role: GlobalRole,
    ) -> AppResult<UserRecord> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET global_role = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, username, email, password_hash, global_role, is_active, created_at
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to set global role: {error}")))?;

        row.map(UserRecord::try_from)
            .transpose()?
            .ok_or_else(|| AppError::NotFound("user not found".to_owned()))
    }

    pub(super) async fn set_active_impl(
        &self,
        user_id: UserId,
        is_active: bool,
    ) -> AppResult<UserRecord> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET is_active = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, username, email, password_hash, global_role, is_active, created_at
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to set active flag: {error}")))?;

        row.map(UserRecord::try_from)
            .transpose()?
            .ok_or_else(|| AppError::NotFound("user not found".to_owned()))
    }
}
