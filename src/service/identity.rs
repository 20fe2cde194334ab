// service/identity.rs
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::Store,
    error::ErrorMessage,
    models::usermodel::UserRole,
    service::error::ServiceError,
};

/// The authenticated party behind a request, with its role-specific profile
/// resolved. Job ownership is always compared against `client_profile_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Caller {
    pub user_id: Uuid,
    pub name: String,
    pub role: UserRole,
    pub client_profile_id: Option<Uuid>,
    pub freelancer_profile_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct IdentityService {
    db_client: Arc<dyn Store>,
}

impl IdentityService {
    pub fn new(db_client: Arc<dyn Store>) -> Self {
        Self { db_client }
    }

    pub async fn resolve_caller(&self, user_id: Uuid) -> Result<Caller, ServiceError> {
        let user = self
            .db_client
            .get_user(Some(user_id), None)
            .await?
            .ok_or(ServiceError::Unauthenticated(
                ErrorMessage::UserNoLongerExist.to_string(),
            ))?;

        let (client_profile_id, freelancer_profile_id) = match user.role {
            UserRole::Client => (
                self.db_client
                    .get_client_profile(user.id)
                    .await?
                    .map(|profile| profile.id),
                None,
            ),
            UserRole::Freelancer => (
                None,
                self.db_client
                    .get_freelancer_profile(user.id)
                    .await?
                    .map(|profile| profile.id),
            ),
        };

        Ok(Caller {
            user_id: user.id,
            name: user.name,
            role: user.role,
            client_profile_id,
            freelancer_profile_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::TestContext;

    #[tokio::test]
    async fn test_resolves_client_with_profile() {
        let ctx = TestContext::new();
        let client = ctx.client("Acme").await;

        let caller = ctx.identity.resolve_caller(client.user_id).await.unwrap();
        assert_eq!(caller.role, UserRole::Client);
        assert_eq!(caller.client_profile_id, client.client_profile_id);
        assert!(caller.freelancer_profile_id.is_none());
    }

    #[tokio::test]
    async fn test_freelancer_without_profile_resolves_none() {
        let ctx = TestContext::new();
        let user = ctx.register("fresh@example.com", UserRole::Freelancer).await;

        let caller = ctx.identity.resolve_caller(user.id).await.unwrap();
        assert_eq!(caller.role, UserRole::Freelancer);
        assert!(caller.freelancer_profile_id.is_none());
    }

    #[tokio::test]
    async fn test_unknown_user_is_unauthenticated() {
        let ctx = TestContext::new();
        let err = ctx.identity.resolve_caller(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthenticated(_)));
    }
}
