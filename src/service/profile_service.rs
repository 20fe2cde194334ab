// service/profile_service.rs
use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    db::Store,
    dtos::{UpdateClientProfileDto, UpdateFreelancerProfileDto},
    models::profilemodel::*,
    service::{
        authorization::{authorize, Action},
        error::ServiceError,
        identity::Caller,
    },
};

#[derive(Debug, Clone)]
pub struct ProfileService {
    db_client: Arc<dyn Store>,
}

impl ProfileService {
    pub fn new(db_client: Arc<dyn Store>) -> Self {
        Self { db_client }
    }

    pub async fn update_client_profile(
        &self,
        caller: &Caller,
        body: UpdateClientProfileDto,
    ) -> Result<ClientProfileWithUser, ServiceError> {
        authorize(caller, Action::UpdateClientProfile, None)?;
        body.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        let profile = self
            .db_client
            .upsert_client_profile(caller.user_id, body.into())
            .await?;

        tracing::info!("client profile {} saved for user {}", profile.profile.id, caller.user_id);
        Ok(profile)
    }

    pub async fn update_freelancer_profile(
        &self,
        caller: &Caller,
        body: UpdateFreelancerProfileDto,
    ) -> Result<FreelancerProfileWithUser, ServiceError> {
        authorize(caller, Action::UpdateFreelancerProfile, None)?;
        body.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        let profile = self
            .db_client
            .upsert_freelancer_profile(caller.user_id, body.into())
            .await?;

        tracing::info!(
            "freelancer profile {} saved for user {}",
            profile.profile.id,
            caller.user_id
        );
        Ok(profile)
    }

    pub async fn list_client_profiles(&self) -> Result<Vec<ClientProfileWithUser>, ServiceError> {
        Ok(self.db_client.get_client_profiles().await?)
    }

    pub async fn list_freelancer_profiles(
        &self,
    ) -> Result<Vec<FreelancerProfileWithUser>, ServiceError> {
        Ok(self.db_client.get_freelancer_profiles().await?)
    }

    /// Returns the caller's client profile id, creating an empty profile on first use.
    pub async fn ensure_client_profile(&self, caller: &Caller) -> Result<Uuid, ServiceError> {
        if let Some(profile_id) = caller.client_profile_id {
            return Ok(profile_id);
        }

        let profile = self
            .db_client
            .upsert_client_profile(caller.user_id, ClientProfileUpdate::default())
            .await?;
        tracing::debug!("created client profile {} on first use", profile.profile.id);
        Ok(profile.profile.id)
    }

    /// Returns the caller's freelancer profile id, creating an empty profile on first use.
    pub async fn ensure_freelancer_profile(&self, caller: &Caller) -> Result<Uuid, ServiceError> {
        if let Some(profile_id) = caller.freelancer_profile_id {
            return Ok(profile_id);
        }

        let profile = self
            .db_client
            .upsert_freelancer_profile(caller.user_id, FreelancerProfileUpdate::default())
            .await?;
        tracing::debug!("created freelancer profile {} on first use", profile.profile.id);
        Ok(profile.profile.id)
    }
}
