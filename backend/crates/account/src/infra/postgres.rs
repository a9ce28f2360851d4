//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::row_state::RowState;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    EmailVerificationToken, PasswordResetToken, Session, User, UserDetails, UserGroup,
};
use crate::domain::repository::{
    EmailVerificationTokenRepository, PasswordResetTokenRepository, SessionRepository,
    UserDetailsRepository, UserGroupRepository, UserRepository,
};
use crate::domain::value_object::{
    Email, PasswordHash, PublicId, SessionId, TokenHash, UserGroupId, UserId, UserName,
};
use crate::error::{AccountError, AccountResult};

const ACTIVE: i16 = RowState::Active.flag();
const DELETED: i16 = RowState::Deleted.flag();

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Soft-delete expired sessions and mailed tokens
    pub async fn cleanup_expired(&self) -> AccountResult<u64> {
        let now = Utc::now();
        let mut total = 0;

        for table in ["sessions", "password_reset_tokens", "email_verification_tokens"] {
            let deleted = sqlx::query(&format!(
                "UPDATE {table} SET is_deleted = $1, updated_at = $2 \
                 WHERE is_deleted = $3 AND expires_at <= $2"
            ))
            .bind(DELETED)
            .bind(now)
            .bind(ACTIVE)
            .execute(&self.pool)
            .await?
            .rows_affected();

            tracing::info!(table = table, deleted = deleted, "Cleaned up expired rows");
            total += deleted;
        }

        Ok(total)
    }
}

/// Turn a unique violation on `users` into the matching domain conflict
fn map_user_write_error(err: sqlx::Error) -> AccountError {
    if is_unique_violation(&err) {
        let on_email = match &err {
            sqlx::Error::Database(db_err) => db_err
                .constraint()
                .is_some_and(|name| name.contains("email")),
            _ => false,
        };
        if on_email {
            AccountError::EmailTaken
        } else {
            AccountError::UserNameTaken
        }
    } else {
        AccountError::Database(err)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAccountRepository {
    async fn create(&self, user: &User) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                public_id,
                user_name,
                user_name_canonical,
                email,
                email_verified,
                password_hash,
                user_group_id,
                created_at,
                updated_at,
                is_deleted
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.public_id.as_str())
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.email.as_ref().map(Email::as_str))
        .bind(user.email_verified)
        .bind(user.password_hash.as_phc())
        .bind(user.user_group_id.value())
        .bind(user.created_at)
        .bind(user.updated_at)
        .bind(ACTIVE)
        .execute(&self.pool)
        .await
        .map_err(map_user_write_error)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                public_id,
                user_name,
                email,
                email_verified,
                password_hash,
                user_group_id,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1 AND is_deleted = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(ACTIVE)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_user_name(&self, canonical: &str) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                public_id,
                user_name,
                email,
                email_verified,
                password_hash,
                user_group_id,
                created_at,
                updated_at
            FROM users
            WHERE user_name_canonical = $1 AND is_deleted = $2
            "#,
        )
        .bind(canonical)
        .bind(ACTIVE)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                public_id,
                user_name,
                email,
                email_verified,
                password_hash,
                user_group_id,
                created_at,
                updated_at
            FROM users
            WHERE lower(email) = $1 AND is_deleted = $2
            "#,
        )
        .bind(email.as_str())
        .bind(ACTIVE)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_user_name(
        &self,
        canonical: &str,
        except: Option<&UserId>,
    ) -> AccountResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE user_name_canonical = $1
                  AND is_deleted = $2
                  AND ($3::uuid IS NULL OR user_id <> $3)
            )
            "#,
        )
        .bind(canonical)
        .bind(ACTIVE)
        .bind(except.map(UserId::as_uuid))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_email(
        &self,
        email: &Email,
        except: Option<&UserId>,
    ) -> AccountResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE lower(email) = $1
                  AND is_deleted = $2
                  AND ($3::uuid IS NULL OR user_id <> $3)
            )
            "#,
        )
        .bind(email.as_str())
        .bind(ACTIVE)
        .bind(except.map(UserId::as_uuid))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AccountResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                user_name = $2,
                user_name_canonical = $3,
                email = $4,
                email_verified = $5,
                password_hash = $6,
                updated_at = $7
            WHERE user_id = $1 AND is_deleted = $8
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.email.as_ref().map(Email::as_str))
        .bind(user.email_verified)
        .bind(user.password_hash.as_phc())
        .bind(user.updated_at)
        .bind(ACTIVE)
        .execute(&self.pool)
        .await
        .map_err(map_user_write_error)?;

        Ok(())
    }
}

// ============================================================================
// User Group Repository Implementation
// ============================================================================

impl UserGroupRepository for PgAccountRepository {
    async fn find_by_id(&self, id: UserGroupId) -> AccountResult<Option<UserGroup>> {
        let row = sqlx::query_as::<_, UserGroupRow>(
            r#"
            SELECT user_group_id, name, display_name, description
            FROM user_groups
            WHERE user_group_id = $1 AND is_deleted = $2
            "#,
        )
        .bind(id.value())
        .bind(ACTIVE)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserGroupRow::into_group))
    }

    async fn list(&self) -> AccountResult<Vec<UserGroup>> {
        let rows = sqlx::query_as::<_, UserGroupRow>(
            r#"
            SELECT user_group_id, name, display_name, description
            FROM user_groups
            WHERE is_deleted = $1
            ORDER BY user_group_id
            "#,
        )
        .bind(ACTIVE)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserGroupRow::into_group).collect())
    }

    async fn insert_if_missing(&self, group: &UserGroup) -> AccountResult<bool> {
        let now = Utc::now();
        let inserted = sqlx::query(
            r#"
            INSERT INTO user_groups (
                user_group_id,
                name,
                display_name,
                description,
                created_at,
                updated_at,
                is_deleted
            ) VALUES ($1, $2, $3, $4, $5, $5, $6)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(group.user_group_id.value())
        .bind(&group.name)
        .bind(&group.display_name)
        .bind(&group.description)
        .bind(now)
        .bind(ACTIVE)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted > 0)
    }
}

// ============================================================================
// User Details Repository Implementation
// ============================================================================

impl UserDetailsRepository for PgAccountRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AccountResult<Option<UserDetails>> {
        let row = sqlx::query_as::<_, UserDetailsRow>(
            r#"
            SELECT user_id, nickname, phone
            FROM user_details
            WHERE user_id = $1 AND is_deleted = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(ACTIVE)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserDetailsRow::into_details))
    }

    async fn upsert(&self, details: &UserDetails) -> AccountResult<()> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO user_details (user_id, nickname, phone, created_at, updated_at, is_deleted)
            VALUES ($1, $2, $3, $4, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                nickname = EXCLUDED.nickname,
                phone = EXCLUDED.phone,
                updated_at = EXCLUDED.updated_at,
                is_deleted = EXCLUDED.is_deleted
            "#,
        )
        .bind(details.user_id.as_uuid())
        .bind(details.nickname.as_deref())
        .bind(details.phone.as_deref())
        .bind(now)
        .bind(ACTIVE)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAccountRepository {
    async fn create(&self, session: &Session) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                session_id,
                user_id,
                expires_at,
                remember_me,
                created_at,
                updated_at,
                is_deleted
            ) VALUES ($1, $2, $3, $4, $5, $5, $6)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.expires_at)
        .bind(session.remember_me)
        .bind(session.created_at)
        .bind(ACTIVE)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: &SessionId) -> AccountResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT session_id, user_id, expires_at, remember_me, created_at
            FROM sessions
            WHERE session_id = $1 AND is_deleted = $2
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(ACTIVE)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn delete(&self, session_id: &SessionId) -> AccountResult<()> {
        sqlx::query(
            "UPDATE sessions SET is_deleted = $2, updated_at = $3 WHERE session_id = $1 AND is_deleted = $4",
        )
        .bind(session_id.as_uuid())
        .bind(DELETED)
        .bind(Utc::now())
        .bind(ACTIVE)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> AccountResult<u64> {
        let result = sqlx::query(
            "UPDATE sessions SET is_deleted = $2, updated_at = $3 WHERE user_id = $1 AND is_deleted = $4",
        )
        .bind(user_id.as_uuid())
        .bind(DELETED)
        .bind(Utc::now())
        .bind(ACTIVE)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

// ============================================================================
// Token Repository Implementations
// ============================================================================

impl PasswordResetTokenRepository for PgAccountRepository {
    async fn create(&self, token: &PasswordResetToken) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO password_reset_tokens (
                token_hash,
                user_id,
                expires_at,
                created_at,
                updated_at,
                is_deleted
            ) VALUES ($1, $2, $3, $4, $4, $5)
            "#,
        )
        .bind(token.token_hash.as_bytes().as_slice())
        .bind(token.user_id.as_uuid())
        .bind(token.expires_at)
        .bind(token.created_at)
        .bind(ACTIVE)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_hash(&self, hash: &TokenHash) -> AccountResult<Option<PasswordResetToken>> {
        let row = sqlx::query_as::<_, PasswordResetTokenRow>(
            r#"
            SELECT token_hash, user_id, expires_at, created_at
            FROM password_reset_tokens
            WHERE token_hash = $1 AND is_deleted = $2
            "#,
        )
        .bind(hash.as_bytes().as_slice())
        .bind(ACTIVE)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PasswordResetTokenRow::into_token).transpose()
    }

    async fn delete(&self, hash: &TokenHash) -> AccountResult<bool> {
        let result = sqlx::query(
            "UPDATE password_reset_tokens SET is_deleted = $2, updated_at = $3 WHERE token_hash = $1 AND is_deleted = $4",
        )
        .bind(hash.as_bytes().as_slice())
        .bind(DELETED)
        .bind(Utc::now())
        .bind(ACTIVE)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> AccountResult<u64> {
        let result = sqlx::query(
            "UPDATE password_reset_tokens SET is_deleted = $2, updated_at = $3 WHERE user_id = $1 AND is_deleted = $4",
        )
        .bind(user_id.as_uuid())
        .bind(DELETED)
        .bind(Utc::now())
        .bind(ACTIVE)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

impl EmailVerificationTokenRepository for PgAccountRepository {
    async fn create(&self, token: &EmailVerificationToken) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO email_verification_tokens (
                token_hash,
                user_id,
                email,
                expires_at,
                created_at,
                updated_at,
                is_deleted
            ) VALUES ($1, $2, $3, $4, $5, $5, $6)
            "#,
        )
        .bind(token.token_hash.as_bytes().as_slice())
        .bind(token.user_id.as_uuid())
        .bind(token.email.as_str())
        .bind(token.expires_at)
        .bind(token.created_at)
        .bind(ACTIVE)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_hash(
        &self,
        hash: &TokenHash,
    ) -> AccountResult<Option<EmailVerificationToken>> {
        let row = sqlx::query_as::<_, EmailVerificationTokenRow>(
            r#"
            SELECT token_hash, user_id, email, expires_at, created_at
            FROM email_verification_tokens
            WHERE token_hash = $1 AND is_deleted = $2
            "#,
        )
        .bind(hash.as_bytes().as_slice())
        .bind(ACTIVE)
        .fetch_optional(&self.pool)
        .await?;

        row.map(EmailVerificationTokenRow::into_token).transpose()
    }

    async fn delete(&self, hash: &TokenHash) -> AccountResult<bool> {
        let result = sqlx::query(
            "UPDATE email_verification_tokens SET is_deleted = $2, updated_at = $3 WHERE token_hash = $1 AND is_deleted = $4",
        )
        .bind(hash.as_bytes().as_slice())
        .bind(DELETED)
        .bind(Utc::now())
        .bind(ACTIVE)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> AccountResult<u64> {
        let result = sqlx::query(
            "UPDATE email_verification_tokens SET is_deleted = $2, updated_at = $3 WHERE user_id = $1 AND is_deleted = $4",
        )
        .bind(user_id.as_uuid())
        .bind(DELETED)
        .bind(Utc::now())
        .bind(ACTIVE)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    public_id: String,
    user_name: String,
    email: Option<String>,
    email_verified: bool,
    password_hash: String,
    user_group_id: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AccountResult<User> {
        let public_id = PublicId::parse_str(&self.public_id)
            .map_err(|e| AccountError::Internal(format!("Invalid public_id: {}", e)))?;

        let password_hash = PasswordHash::from_phc(self.password_hash)
            .map_err(|e| AccountError::Internal(format!("Invalid password_hash: {}", e)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            public_id,
            user_name: UserName::from_db(&self.user_name),
            email: self.email.map(Email::from_db),
            email_verified: self.email_verified,
            password_hash,
            user_group_id: UserGroupId::new(self.user_group_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserGroupRow {
    user_group_id: i16,
    name: String,
    display_name: String,
    description: Option<String>,
}

impl UserGroupRow {
    fn into_group(self) -> UserGroup {
        UserGroup {
            user_group_id: UserGroupId::new(self.user_group_id),
            name: self.name,
            display_name: self.display_name,
            description: self.description.unwrap_or_default(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserDetailsRow {
    user_id: Uuid,
    nickname: Option<String>,
    phone: Option<String>,
}

impl UserDetailsRow {
    fn into_details(self) -> UserDetails {
        UserDetails {
            user_id: UserId::from_uuid(self.user_id),
            nickname: self.nickname,
            phone: self.phone,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    remember_me: bool,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_id: SessionId::from_uuid(self.session_id),
            user_id: UserId::from_uuid(self.user_id),
            expires_at: self.expires_at,
            remember_me: self.remember_me,
            created_at: self.created_at,
        }
    }
}

fn token_hash(bytes: &[u8]) -> AccountResult<TokenHash> {
    TokenHash::from_bytes(bytes)
        .ok_or_else(|| AccountError::Internal(format!("Invalid token_hash length: {}", bytes.len())))
}

#[derive(sqlx::FromRow)]
struct PasswordResetTokenRow {
    token_hash: Vec<u8>,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl PasswordResetTokenRow {
    fn into_token(self) -> AccountResult<PasswordResetToken> {
        Ok(PasswordResetToken {
            token_hash: token_hash(&self.token_hash)?,
            user_id: UserId::from_uuid(self.user_id),
            expires_at: self.expires_at,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct EmailVerificationTokenRow {
    token_hash: Vec<u8>,
    user_id: Uuid,
    email: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl EmailVerificationTokenRow {
    fn into_token(self) -> AccountResult<EmailVerificationToken> {
        Ok(EmailVerificationToken {
            token_hash: token_hash(&self.token_hash)?,
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            expires_at: self.expires_at,
            created_at: self.created_at,
        })
    }
}
