use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub bio: String,
    pub website: String,
    pub profile_image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: String,
    pub hourly_rate: f64,
    pub skills: Vec<String>,
    pub portfolio: String,
    pub profile_image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of the owning user that are exposed next to a profile.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
pub struct ProfileOwner {
    #[sqlx(rename = "user_name")]
    pub name: String,
    #[sqlx(rename = "user_email")]
    pub email: String,
    #[sqlx(rename = "user_role")]
    pub role: crate::models::usermodel::UserRole,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct ClientProfileWithUser {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub profile: ClientProfile,
    #[sqlx(flatten)]
    pub user: ProfileOwner,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct FreelancerProfileWithUser {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub profile: FreelancerProfile,
    #[sqlx(flatten)]
    pub user: ProfileOwner,
}

#[derive(Debug, Clone, Default)]
pub struct ClientProfileUpdate {
    pub company_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FreelancerProfileUpdate {
    pub bio: Option<String>,
    pub hourly_rate: Option<f64>,
    pub skills: Option<Vec<String>>,
    pub portfolio: Option<String>,
    pub profile_image: Option<String>,
}
