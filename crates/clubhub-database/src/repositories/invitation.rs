//! Invitation repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};

use clubhub_core::error::{AppError, ErrorKind};
use clubhub_core::result::AppResult;
use clubhub_core::types::InvitationId;
use clubhub_entity::invitation::{CreateInvitation, Invitation, Redemption};
use clubhub_entity::member::{Member, Profile};

use super::member::{insert_member, insert_profile};
use super::{begin_error, commit_error};
use crate::store::InvitationStore;

/// Repository for invitations and their redemption.
#[derive(Debug, Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Create a new invitation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationStore for InvitationRepository {
    async fn create(&self, data: &CreateInvitation) -> AppResult<Invitation> {
        sqlx::query_as::<_, Invitation>(
            "INSERT INTO invitations (id, email, role, invited_by, token_hash, expires_at) \
             VALUES ($1, LOWER($2), $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(InvitationId::new())
        .bind(&data.email)
        .bind(data.role)
        .bind(data.invited_by)
        .bind(&data.token_hash)
        .bind(data.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create invitation", e))
    }

    async fn find_by_id(&self, id: InvitationId) -> AppResult<Option<Invitation>> {
        sqlx::query_as::<_, Invitation>("SELECT * FROM invitations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find invitation", e)
            })
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<Invitation>> {
        sqlx::query_as::<_, Invitation>("SELECT * FROM invitations WHERE token_hash = $1")
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find invitation by token", e)
            })
    }

    async fn list(&self) -> AppResult<Vec<Invitation>> {
        sqlx::query_as::<_, Invitation>("SELECT * FROM invitations ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list invitations", e)
            })
    }

    async fn delete(&self, id: InvitationId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM invitations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete invitation", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Invitation {id} not found")));
        }
        Ok(())
    }

    async fn redeem(&self, redemption: &Redemption) -> AppResult<(Member, Profile)> {
        let mut tx = self.pool.begin().await.map_err(begin_error)?;

        // The row lock taken by this UPDATE serializes concurrent redemptions
        // of the same token; the loser sees zero affected rows.
        let claimed = sqlx::query(
            "UPDATE invitations SET used = TRUE, used_at = NOW() \
             WHERE id = $1 AND used = FALSE AND expires_at > NOW()",
        )
        .bind(redemption.invitation_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to claim invitation", e))?
        .rows_affected();

        if claimed == 0 {
            warn!(invitation_id = %redemption.invitation_id, "Invitation claimed concurrently");
            return Err(AppError::token_already_used(
                "This invitation has already been used",
            ));
        }

        let member = insert_member(&mut tx, &redemption.member).await?;
        let profile = insert_profile(&mut tx, member.id, &redemption.profile).await?;
        tx.commit().await.map_err(commit_error)?;

        debug!(
            invitation_id = %redemption.invitation_id,
            member_id = %member.id,
            "Invitation redeemed"
        );
        Ok((member, profile))
    }
}
