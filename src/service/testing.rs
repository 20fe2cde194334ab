// service/testing.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    config::Config,
    db::{memorydb::MemoryStore, ProfileExt, Store, UserExt},
    dtos::{ApplyDto, CreateJobDto},
    models::{
        jobmodel::{Application, Job},
        profilemodel::{ClientProfileUpdate, FreelancerProfileUpdate},
        usermodel::{User, UserRole},
    },
    service::{
        account_service::AccountService, application_service::ApplicationService,
        identity::{Caller, IdentityService}, job_service::JobService,
        profile_service::ProfileService,
    },
};

/// Services wired to a fresh in-memory store.
pub struct TestContext {
    pub config: Config,
    pub store: Arc<MemoryStore>,
    pub identity: Arc<IdentityService>,
    pub accounts: Arc<AccountService>,
    pub profiles: Arc<ProfileService>,
    pub jobs: Arc<JobService>,
    pub applications: Arc<ApplicationService>,
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/skillbridge_test".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_maxage: 60,
        port: 8000,
        database_max_connections: 1,
        cors_origins: vec!["http://localhost:5173".to_string()],
    }
}

pub fn job_payload(title: &str) -> CreateJobDto {
    CreateJobDto {
        title: Some(title.to_string()),
        description: Some(format!("{} for a small business", title)),
        category: Some("web".to_string()),
        required_skills: Some(vec!["html".to_string(), "css".to_string()]),
        hourly_rate: Some(35.0),
        duration: Some("3 weeks".to_string()),
        experience_level: Some("intermediate".to_string()),
    }
}

impl TestContext {
    pub fn new() -> Self {
        let config = test_config();
        let store = Arc::new(MemoryStore::new());
        let db_client: Arc<dyn Store> = store.clone();

        let profiles = Arc::new(ProfileService::new(db_client.clone()));
        Self {
            identity: Arc::new(IdentityService::new(db_client.clone())),
            accounts: Arc::new(AccountService::new(
                db_client.clone(),
                config.jwt_secret.clone(),
                config.jwt_maxage,
            )),
            jobs: Arc::new(JobService::new(db_client.clone(), profiles.clone())),
            applications: Arc::new(ApplicationService::new(db_client, profiles.clone())),
            profiles,
            store,
            config,
        }
    }

    /// Inserts a user directly; the password is not a valid hash.
    pub async fn register(&self, email: &str, role: UserRole) -> User {
        self.store
            .save_user(
                email.split('@').next().unwrap_or(email).to_string(),
                email.to_string(),
                "not-a-hash".to_string(),
                role,
            )
            .await
            .unwrap()
    }

    pub async fn client(&self, company_name: &str) -> Caller {
        let email = format!("{}-{}@example.com", company_name.to_lowercase(), Uuid::new_v4());
        let user = self.register(&email, UserRole::Client).await;
        self.store
            .upsert_client_profile(
                user.id,
                ClientProfileUpdate {
                    company_name: Some(company_name.to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        self.identity.resolve_caller(user.id).await.unwrap()
    }

    pub async fn freelancer(&self, name: &str) -> Caller {
        let email = format!("{}-{}@example.com", name.to_lowercase(), Uuid::new_v4());
        let user = self
            .store
            .save_user(name.to_string(), email, "not-a-hash".to_string(), UserRole::Freelancer)
            .await
            .unwrap();
        self.store
            .upsert_freelancer_profile(
                user.id,
                FreelancerProfileUpdate {
                    bio: Some(format!("{} writes software", name)),
                    hourly_rate: Some(50.0),
                    skills: Some(vec!["rust".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        self.identity.resolve_caller(user.id).await.unwrap()
    }

    pub async fn post_job(&self, owner: &Caller, title: &str) -> Job {
        self.jobs.create_job(owner, job_payload(title)).await.unwrap()
    }

    pub async fn apply(&self, freelancer: &Caller, job_id: Uuid, cover_letter: &str) -> Application {
        self.applications
            .apply(
                freelancer,
                job_id,
                ApplyDto {
                    cover_letter: Some(cover_letter.to_string()),
                },
            )
            .await
            .unwrap()
    }
}
