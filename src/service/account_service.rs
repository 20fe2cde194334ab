// service/account_service.rs
use std::sync::Arc;

use validator::Validate;

use crate::{
    db::{is_unique_violation, Store},
    dtos::{LoginUserDto, RegisterUserDto},
    error::ErrorMessage,
    models::usermodel::User,
    service::error::ServiceError,
    utils::{password, token},
};

/// A user together with a freshly issued token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct AccountService {
    db_client: Arc<dyn Store>,
    jwt_secret: String,
    jwt_maxage: i64,
}

impl AccountService {
    pub fn new(db_client: Arc<dyn Store>, jwt_secret: String, jwt_maxage: i64) -> Self {
        Self {
            db_client,
            jwt_secret,
            jwt_maxage,
        }
    }

    pub async fn register(&self, body: RegisterUserDto) -> Result<AuthSession, ServiceError> {
        body.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        let email = body.email.trim().to_lowercase();

        let existing_user = self.db_client.get_user(None, Some(&email)).await?;
        if existing_user.is_some() {
            return Err(ErrorMessage::EmailExist.into());
        }

        let hashed_password = password::hash(&body.password)?;

        let user = self
            .db_client
            .save_user(
                body.name.trim().to_string(),
                email,
                hashed_password,
                body.role.unwrap_or_default(),
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ErrorMessage::EmailExist.into()
                } else {
                    ServiceError::Database(e)
                }
            })?;

        tracing::info!("👤 registered {} as {}", user.id, user.role.to_str());

        let token = self.issue_token(&user)?;
        Ok(AuthSession { user, token })
    }

    pub async fn login(&self, body: LoginUserDto) -> Result<AuthSession, ServiceError> {
        body.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        let email = body.email.trim().to_lowercase();

        let user = self
            .db_client
            .get_user(None, Some(&email))
            .await?
            .ok_or(ErrorMessage::WrongCredentials)?;

        let password_matched = password::compare(&body.password, &user.password)
            .map_err(|_| ErrorMessage::WrongCredentials)?;

        if !password_matched {
            return Err(ErrorMessage::WrongCredentials.into());
        }

        let token = self.issue_token(&user)?;
        Ok(AuthSession { user, token })
    }

    fn issue_token(&self, user: &User) -> Result<String, ServiceError> {
        token::create_token(
            &user.id.to_string(),
            self.jwt_secret.as_bytes(),
            self.jwt_maxage,
        )
        .map_err(|e| ServiceError::Internal(e.to_string()))
    }
}
