//! Member and profile repository implementation.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::debug;

use clubhub_core::error::{AppError, ErrorKind};
use clubhub_core::result::AppResult;
use clubhub_core::types::{MemberId, ProfileId};
use clubhub_entity::member::{
    CreateMember, CreateProfile, Member, MemberRole, Profile, UpdateProfile,
};

use super::{begin_error, commit_error, map_write_error};
use crate::store::MemberStore;

/// Repository for members and their profiles.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Create a new member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insert a member row on an open connection (used inside transactions).
pub(crate) async fn insert_member(conn: &mut PgConnection, data: &CreateMember) -> AppResult<Member> {
    sqlx::query_as::<_, Member>(
        "INSERT INTO members (id, email, password_hash, role, invited_by) \
         VALUES ($1, LOWER($2), $3, $4, $5) \
         RETURNING *",
    )
    .bind(MemberId::new())
    .bind(&data.email)
    .bind(&data.password_hash)
    .bind(data.role)
    .bind(data.invited_by)
    .fetch_one(conn)
    .await
    .map_err(|e| {
        map_write_error(
            e,
            "Failed to create member",
            &format!("Email '{}' is already registered", data.email),
        )
    })
}

/// Insert a profile row on an open connection (used inside transactions).
pub(crate) async fn insert_profile(
    conn: &mut PgConnection,
    member_id: MemberId,
    data: &CreateProfile,
) -> AppResult<Profile> {
    sqlx::query_as::<_, Profile>(
        "INSERT INTO profiles (id, member_id, first_name, last_name) \
         VALUES ($1, $2, $3, $4) \
         RETURNING *",
    )
    .bind(ProfileId::new())
    .bind(member_id)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .fetch_one(conn)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create profile", e))
}

#[async_trait]
impl MemberStore for MemberRepository {
    async fn find_by_id(&self, id: MemberId) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find member by id", e)
            })
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>("SELECT * FROM members WHERE email = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find member by email", e)
            })
    }

    async fn list(&self) -> AppResult<Vec<Member>> {
        sqlx::query_as::<_, Member>("SELECT * FROM members ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list members", e))
    }

    async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count members", e))
    }

    async fn create(
        &self,
        member: &CreateMember,
        profile: &CreateProfile,
    ) -> AppResult<(Member, Profile)> {
        let mut tx = self.pool.begin().await.map_err(begin_error)?;
        let created = insert_member(&mut tx, member).await?;
        let created_profile = insert_profile(&mut tx, created.id, profile).await?;
        tx.commit().await.map_err(commit_error)?;

        debug!(member_id = %created.id, role = %created.role, "Member created");
        Ok((created, created_profile))
    }

    async fn update_role(&self, id: MemberId, role: MemberRole) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            "UPDATE members SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update role", e))?
        .ok_or_else(|| AppError::not_found(format!("Member {id} not found")))
    }

    async fn find_profile(&self, member_id: MemberId) -> AppResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE member_id = $1")
            .bind(member_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find profile", e))
    }

    async fn update_profile(
        &self,
        member_id: MemberId,
        data: &UpdateProfile,
    ) -> AppResult<Profile> {
        let mut tx = self.pool.begin().await.map_err(begin_error)?;

        let profile = sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET first_name = COALESCE($2, first_name), \
                                 last_name = COALESCE($3, last_name), \
                                 bio = COALESCE($4, bio), \
                                 avatar_url = COALESCE($5, avatar_url), \
                                 updated_at = NOW() \
             WHERE member_id = $1 RETURNING *",
        )
        .bind(member_id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.bio)
        .bind(&data.avatar_url)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update profile", e))?
        .ok_or_else(|| AppError::not_found(format!("Profile for member {member_id} not found")))?;

        sqlx::query("UPDATE members SET profile_completed = $2, updated_at = NOW() WHERE id = $1")
            .bind(member_id)
            .bind(profile.is_complete())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update member", e)
            })?;

        tx.commit().await.map_err(commit_error)?;
        Ok(profile)
    }

    async fn delete(&self, id: MemberId) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(begin_error)?;

        sqlx::query("DELETE FROM sessions WHERE member_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete sessions", e)
            })?;

        sqlx::query("DELETE FROM profiles WHERE member_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete profile", e)
            })?;

        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete member", e)
            })?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls back the dependent deletes.
            return Err(AppError::not_found(format!("Member {id} not found")));
        }

        tx.commit().await.map_err(commit_error)?;
        debug!(member_id = %id, "Member deleted");
        Ok(())
    }
}
