// db/profiledb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::DBClient;
use crate::models::profilemodel::*;

#[async_trait]
pub trait ProfileExt {
    async fn get_client_profile(&self, user_id: Uuid) -> Result<Option<ClientProfile>, Error>;

    async fn get_freelancer_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<FreelancerProfile>, Error>;

    /// Update-or-create the client profile owned by `user_id`.
    async fn upsert_client_profile(
        &self,
        user_id: Uuid,
        update: ClientProfileUpdate,
    ) -> Result<ClientProfileWithUser, Error>;

    /// Update-or-create the freelancer profile owned by `user_id`.
    async fn upsert_freelancer_profile(
        &self,
        user_id: Uuid,
        update: FreelancerProfileUpdate,
    ) -> Result<FreelancerProfileWithUser, Error>;

    async fn get_client_profiles(&self) -> Result<Vec<ClientProfileWithUser>, Error>;

    async fn get_freelancer_profiles(&self) -> Result<Vec<FreelancerProfileWithUser>, Error>;
}

#[async_trait]
impl ProfileExt for DBClient {
    async fn get_client_profile(&self, user_id: Uuid) -> Result<Option<ClientProfile>, Error> {
        sqlx::query_as::<_, ClientProfile>(
            r#"
            SELECT id, user_id, company_name, bio, website, profile_image, created_at, updated_at
            FROM client_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_freelancer_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<FreelancerProfile>, Error> {
        sqlx::query_as::<_, FreelancerProfile>(
            r#"
            SELECT id, user_id, bio, hourly_rate, skills, portfolio, profile_image,
                   created_at, updated_at
            FROM freelancer_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn upsert_client_profile(
        &self,
        user_id: Uuid,
        update: ClientProfileUpdate,
    ) -> Result<ClientProfileWithUser, Error> {
        sqlx::query_as::<_, ClientProfileWithUser>(
            r#"
            WITH upserted AS (
                INSERT INTO client_profiles (user_id, company_name, bio, website, profile_image)
                VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), COALESCE($4, ''), COALESCE($5, ''))
                ON CONFLICT (user_id) DO UPDATE SET
                    company_name = COALESCE($2, client_profiles.company_name),
                    bio = COALESCE($3, client_profiles.bio),
                    website = COALESCE($4, client_profiles.website),
                    profile_image = COALESCE($5, client_profiles.profile_image),
                    updated_at = NOW()
                RETURNING *
            )
            SELECT p.id, p.user_id, p.company_name, p.bio, p.website, p.profile_image,
                   p.created_at, p.updated_at,
                   u.name AS user_name, u.email AS user_email, u.role AS user_role
            FROM upserted p
            JOIN users u ON u.id = p.user_id
            "#,
        )
        .bind(user_id)
        .bind(update.company_name)
        .bind(update.bio)
        .bind(update.website)
        .bind(update.profile_image)
        .fetch_one(&self.pool)
        .await
    }

    async fn upsert_freelancer_profile(
        &self,
        user_id: Uuid,
        update: FreelancerProfileUpdate,
    ) -> Result<FreelancerProfileWithUser, Error> {
        sqlx::query_as::<_, FreelancerProfileWithUser>(
            r#"
            WITH upserted AS (
                INSERT INTO freelancer_profiles
                    (user_id, bio, hourly_rate, skills, portfolio, profile_image)
                VALUES ($1, COALESCE($2, ''), COALESCE($3, 0), COALESCE($4, '{}'::TEXT[]),
                        COALESCE($5, ''), COALESCE($6, ''))
                ON CONFLICT (user_id) DO UPDATE SET
                    bio = COALESCE($2, freelancer_profiles.bio),
                    hourly_rate = COALESCE($3, freelancer_profiles.hourly_rate),
                    skills = COALESCE($4, freelancer_profiles.skills),
                    portfolio = COALESCE($5, freelancer_profiles.portfolio),
                    profile_image = COALESCE($6, freelancer_profiles.profile_image),
                    updated_at = NOW()
                RETURNING *
            )
            SELECT p.id, p.user_id, p.bio, p.hourly_rate, p.skills, p.portfolio,
                   p.profile_image, p.created_at, p.updated_at,
                   u.name AS user_name, u.email AS user_email, u.role AS user_role
            FROM upserted p
            JOIN users u ON u.id = p.user_id
            "#,
        )
        .bind(user_id)
        .bind(update.bio)
        .bind(update.hourly_rate)
        .bind(update.skills)
        .bind(update.portfolio)
        .bind(update.profile_image)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_client_profiles(&self) -> Result<Vec<ClientProfileWithUser>, Error> {
        sqlx::query_as::<_, ClientProfileWithUser>(
            r#"
            SELECT p.id, p.user_id, p.company_name, p.bio, p.website, p.profile_image,
                   p.created_at, p.updated_at,
                   u.name AS user_name, u.email AS user_email, u.role AS user_role
            FROM client_profiles p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_freelancer_profiles(&self) -> Result<Vec<FreelancerProfileWithUser>, Error> {
        sqlx::query_as::<_, FreelancerProfileWithUser>(
            r#"
            SELECT p.id, p.user_id, p.bio, p.hourly_rate, p.skills, p.portfolio,
                   p.profile_image, p.created_at, p.updated_at,
                   u.name AS user_name, u.email AS user_email, u.role AS user_role
            FROM freelancer_profiles p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
