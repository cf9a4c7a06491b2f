//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{group::Group, membership::Membership, user::User};
use crate::domain::repository::{GroupRepository, MembershipRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, group_id::GroupId, user_id::UserId, user_name::UserName,
    user_password::UserPassword,
};
use crate::error::DirectoryResult;

/// PostgreSQL-backed directory repository
///
/// One `PgPool` per process; each method borrows a connection for a
/// single statement. Uniqueness violations propagate as database errors
/// and are classified by the kernel conversion table (23505 → 406).
#[derive(Clone)]
pub struct PgDirectoryRepository {
    pool: PgPool,
}

impl PgDirectoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgDirectoryRepository {
    async fn create(&self, user: &User) -> DirectoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_user (
                user_id,
                username,
                username_canonical,
                email,
                first_name,
                last_name,
                password_hash,
                is_superuser,
                is_staff,
                is_active,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.email.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.password.as_phc_string())
        .bind(user.is_superuser)
        .bind(user.is_staff)
        .bind(user.is_active)
        .bind(user.last_login_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> DirectoryResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id, username, username_canonical, email,
                first_name, last_name, password_hash,
                is_superuser, is_staff, is_active,
                last_login_at, created_at, updated_at
            FROM auth_user
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> DirectoryResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id, username, username_canonical, email,
                first_name, last_name, password_hash,
                is_superuser, is_staff, is_active,
                last_login_at, created_at, updated_at
            FROM auth_user
            WHERE username_canonical = $1
            "#,
        )
        .bind(user_name.canonical())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> DirectoryResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id, username, username_canonical, email,
                first_name, last_name, password_hash,
                is_superuser, is_staff, is_active,
                last_login_at, created_at, updated_at
            FROM auth_user
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn list(&self) -> DirectoryResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id, username, username_canonical, email,
                first_name, last_name, password_hash,
                is_superuser, is_staff, is_active,
                last_login_at, created_at, updated_at
            FROM auth_user
            ORDER BY first_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }

    async fn update(&self, user: &User) -> DirectoryResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_user SET
                username = $2,
                username_canonical = $3,
                email = $4,
                first_name = $5,
                last_name = $6,
                password_hash = $7,
                is_superuser = $8,
                is_staff = $9,
                is_active = $10,
                last_login_at = $11,
                updated_at = $12
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.email.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.password.as_phc_string())
        .bind(user.is_superuser)
        .bind(user.is_staff)
        .bind(user.is_active)
        .bind(user.last_login_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn record_login(&self, user_id: &UserId, at: DateTime<Utc>) -> DirectoryResult<()> {
        sqlx::query(
            "UPDATE auth_user SET last_login_at = $2, updated_at = $2 WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> DirectoryResult<bool> {
        let deleted = sqlx::query("DELETE FROM auth_user WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Group Repository Implementation
// ============================================================================

impl GroupRepository for PgDirectoryRepository {
    async fn create(&self, group: &Group) -> DirectoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_group (group_id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(group.group_id.as_uuid())
        .bind(&group.name)
        .bind(group.created_at)
        .bind(group.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, group_id: &GroupId) -> DirectoryResult<Option<Group>> {
        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT group_id, name, created_at, updated_at
            FROM auth_group
            WHERE group_id = $1
            "#,
        )
        .bind(group_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_group()))
    }

    async fn list(&self) -> DirectoryResult<Vec<Group>> {
        let rows = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT group_id, name, created_at, updated_at
            FROM auth_group
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_group()).collect())
    }

    async fn update(&self, group: &Group) -> DirectoryResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_group SET name = $2, updated_at = $3
            WHERE group_id = $1
            "#,
        )
        .bind(group.group_id.as_uuid())
        .bind(&group.name)
        .bind(group.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, group_id: &GroupId) -> DirectoryResult<bool> {
        let deleted = sqlx::query("DELETE FROM auth_group WHERE group_id = $1")
            .bind(group_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Membership Repository Implementation
// ============================================================================

impl MembershipRepository for PgDirectoryRepository {
    async fn upsert(&self, membership: &Membership) -> DirectoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_users_groups (user_id, group_id, extra_data, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, group_id)
            DO UPDATE SET extra_data = EXCLUDED.extra_data
            "#,
        )
        .bind(membership.user_id.as_uuid())
        .bind(membership.group_id.as_uuid())
        .bind(&membership.extra_data)
        .bind(membership.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, user_id: &UserId, group_id: &GroupId) -> DirectoryResult<bool> {
        let removed = sqlx::query(
            "DELETE FROM auth_users_groups WHERE user_id = $1 AND group_id = $2",
        )
        .bind(user_id.as_uuid())
        .bind(group_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(removed > 0)
    }

    async fn groups_of_user(&self, user_id: &UserId) -> DirectoryResult<Vec<Group>> {
        let rows = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT g.group_id, g.name, g.created_at, g.updated_at
            FROM auth_group g
            JOIN auth_users_groups m ON m.group_id = g.group_id
            WHERE m.user_id = $1
            ORDER BY g.name
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_group()).collect())
    }

    async fn users_in_group(&self, group_id: &GroupId) -> DirectoryResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                u.user_id, u.username, u.username_canonical, u.email,
                u.first_name, u.last_name, u.password_hash,
                u.is_superuser, u.is_staff, u.is_active,
                u.last_login_at, u.created_at, u.updated_at
            FROM auth_user u
            JOIN auth_users_groups m ON m.user_id = u.user_id
            WHERE m.group_id = $1
            ORDER BY u.first_name
            "#,
        )
        .bind(group_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    username: String,
    username_canonical: String,
    email: String,
    first_name: String,
    last_name: String,
    password_hash: String,
    is_superuser: bool,
    is_staff: bool,
    is_active: bool,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> DirectoryResult<User> {
        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            user_name: UserName::from_db(self.username, self.username_canonical),
            email: Email::from_db(self.email),
            first_name: self.first_name,
            last_name: self.last_name,
            password: UserPassword::from_phc_string(self.password_hash)?,
            is_superuser: self.is_superuser,
            is_staff: self.is_staff,
            is_active: self.is_active,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct GroupRow {
    group_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GroupRow {
    fn into_group(self) -> Group {
        Group {
            group_id: GroupId::from_uuid(self.group_id),
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
