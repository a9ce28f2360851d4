//! PostgreSQL Repository Implementation

use account::domain::value_object::{PublicId, UserGroupId, UserId};
use chrono::{DateTime, Utc};
use kernel::row_state::RowState;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{GroupSummary, ManagedUser};
use crate::domain::policy::check_group_change;
use crate::domain::repository::UserAdminRepository;
use crate::error::{AdminError, AdminResult};

const ACTIVE: i16 = RowState::Active.flag();
const DELETED: i16 = RowState::Deleted.flag();

/// Tables whose rows belong to a user and go with them
const OWNED_TABLES: [&str; 5] = [
    "sessions",
    "user_details",
    "password_reset_tokens",
    "email_verification_tokens",
    "two_factor_tokens",
];

const MANAGED_USER_SELECT: &str = r#"
    SELECT
        u.user_id,
        u.public_id,
        u.user_name,
        u.email,
        u.created_at,
        g.user_group_id,
        g.name AS group_name,
        g.display_name AS group_display_name
    FROM users u
    JOIN user_groups g ON g.user_group_id = u.user_group_id
"#;

/// PostgreSQL-backed user management repository
#[derive(Clone)]
pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserAdminRepository for PgAdminRepository {
    async fn list_users(&self) -> AdminResult<Vec<ManagedUser>> {
        let rows = sqlx::query_as::<_, ManagedUserRow>(&format!(
            "{MANAGED_USER_SELECT} WHERE u.is_deleted = $1 ORDER BY u.created_at, u.user_name"
        ))
        .bind(ACTIVE)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ManagedUserRow::into_managed_user).collect()
    }

    async fn list_groups(&self) -> AdminResult<Vec<GroupSummary>> {
        let rows = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT user_group_id, name, display_name
            FROM user_groups
            WHERE is_deleted = $1
            ORDER BY user_group_id
            "#,
        )
        .bind(ACTIVE)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GroupRow::into_summary).collect())
    }

    async fn find_user(&self, public_id: &PublicId) -> AdminResult<Option<ManagedUser>> {
        let row = sqlx::query_as::<_, ManagedUserRow>(&format!(
            "{MANAGED_USER_SELECT} WHERE u.public_id = $1 AND u.is_deleted = $2"
        ))
        .bind(public_id.as_str())
        .bind(ACTIVE)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ManagedUserRow::into_managed_user).transpose()
    }

    async fn find_user_by_name(&self, canonical: &str) -> AdminResult<Option<ManagedUser>> {
        let row = sqlx::query_as::<_, ManagedUserRow>(&format!(
            "{MANAGED_USER_SELECT} WHERE u.user_name_canonical = $1 AND u.is_deleted = $2"
        ))
        .bind(canonical)
        .bind(ACTIVE)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ManagedUserRow::into_managed_user).transpose()
    }

    async fn find_group(&self, id: UserGroupId) -> AdminResult<Option<GroupSummary>> {
        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT user_group_id, name, display_name
            FROM user_groups
            WHERE user_group_id = $1 AND is_deleted = $2
            "#,
        )
        .bind(id.value())
        .bind(ACTIVE)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GroupRow::into_summary))
    }

    async fn change_group(&self, target: &ManagedUser, group: &GroupSummary) -> AdminResult<()> {
        let mut transaction = self.pool.begin().await?;

        // Serializes changes that leave the same group
        sqlx::query("SELECT user_group_id FROM user_groups WHERE user_group_id = $1 FOR UPDATE")
            .bind(target.group.id.value())
            .fetch_optional(&mut *transaction)
            .await?;

        let members = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM users
            WHERE user_group_id = $1 AND is_deleted = $2
            "#,
        )
        .bind(target.group.id.value())
        .bind(ACTIVE)
        .fetch_one(&mut *transaction)
        .await?;

        check_group_change(target, group, members)?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET user_group_id = $1, updated_at = $2
            WHERE user_id = $3 AND is_deleted = $4
            "#,
        )
        .bind(group.id.value())
        .bind(Utc::now())
        .bind(target.user_id.as_uuid())
        .bind(ACTIVE)
        .execute(&mut *transaction)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AdminError::UserNotFound);
        }

        transaction.commit().await?;
        Ok(())
    }

    async fn soft_delete_user(&self, user_id: &UserId) -> AdminResult<()> {
        let now = Utc::now();
        let mut transaction = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_deleted = $1, updated_at = $2
            WHERE user_id = $3 AND is_deleted = $4
            "#,
        )
        .bind(DELETED)
        .bind(now)
        .bind(user_id.as_uuid())
        .bind(ACTIVE)
        .execute(&mut *transaction)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AdminError::UserNotFound);
        }

        for table in OWNED_TABLES {
            sqlx::query(&format!(
                "UPDATE {table} SET is_deleted = $1, updated_at = $2 \
                 WHERE user_id = $3 AND is_deleted = $4"
            ))
            .bind(DELETED)
            .bind(now)
            .bind(user_id.as_uuid())
            .bind(ACTIVE)
            .execute(&mut *transaction)
            .await?;
        }

        transaction.commit().await?;
        Ok(())
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ManagedUserRow {
    user_id: Uuid,
    public_id: String,
    user_name: String,
    email: Option<String>,
    created_at: DateTime<Utc>,
    user_group_id: i16,
    group_name: String,
    group_display_name: String,
}

impl ManagedUserRow {
    fn into_managed_user(self) -> AdminResult<ManagedUser> {
        let public_id = PublicId::parse_str(&self.public_id)
            .map_err(|e| AdminError::Internal(format!("Invalid public_id: {}", e)))?;

        Ok(ManagedUser {
            user_id: UserId::from_uuid(self.user_id),
            public_id,
            user_name: self.user_name,
            email: self.email,
            group: GroupSummary {
                id: UserGroupId::new(self.user_group_id),
                name: self.group_name,
                display_name: self.group_display_name,
            },
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct GroupRow {
    user_group_id: i16,
    name: String,
    display_name: String,
}

impl GroupRow {
    fn into_summary(self) -> GroupSummary {
        GroupSummary {
            id: UserGroupId::new(self.user_group_id),
            name: self.name,
            display_name: self.display_name,
        }
    }
}
