// service/application_service.rs
use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    db::Store,
    dtos::{ApplicantDto, ApplyDto, AppliedJobDto},
    models::jobmodel::*,
    service::{
        authorization::{authorize, Action},
        error::ServiceError,
        identity::Caller,
        profile_service::ProfileService,
    },
};

#[derive(Debug, Clone)]
pub struct ApplicationService {
    db_client: Arc<dyn Store>,
    profile_service: Arc<ProfileService>,
}

impl ApplicationService {
    pub fn new(db_client: Arc<dyn Store>, profile_service: Arc<ProfileService>) -> Self {
        Self {
            db_client,
            profile_service,
        }
    }

    pub async fn apply(
        &self,
        caller: &Caller,
        job_id: Uuid,
        body: ApplyDto,
    ) -> Result<Application, ServiceError> {
        authorize(caller, Action::Apply, None)?;
        body.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        let freelancer_id = self.profile_service.ensure_freelancer_profile(caller).await?;
        let cover_letter = body.cover_letter.unwrap_or_default();

        match self
            .db_client
            .apply_to_job(job_id, freelancer_id, cover_letter)
            .await?
        {
            ApplyOutcome::Applied(application) => {
                tracing::info!("📨 freelancer {} applied to job {}", freelancer_id, job_id);
                Ok(application)
            }
            ApplyOutcome::AlreadyApplied => Err(ServiceError::AlreadyApplied(job_id)),
            ApplyOutcome::JobNotFound => Err(ServiceError::JobNotFound(job_id)),
        }
    }

    pub async fn list_applicants(
        &self,
        caller: &Caller,
        job_id: Uuid,
    ) -> Result<Vec<ApplicantDto>, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        authorize(caller, Action::ViewApplicants, Some(&job))?;

        let applicants = self.db_client.get_job_applicants(job_id).await?;
        Ok(applicants.into_iter().map(ApplicantDto::from).collect())
    }

    /// Accepts or rejects a pending application on a job the caller owns.
    pub async fn decide(
        &self,
        caller: &Caller,
        job_id: Uuid,
        application_id: Uuid,
        decision: &str,
    ) -> Result<Application, ServiceError> {
        let decision =
            ApplicationStatus::from_decision(decision).map_err(ServiceError::Validation)?;

        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        authorize(caller, Action::DecideApplication, Some(&job))?;

        let application = self
            .db_client
            .get_job_application(job_id, application_id)
            .await?
            .ok_or(ServiceError::ApplicationNotFound(application_id))?;

        if application.status != ApplicationStatus::Pending {
            return Err(already_decided(&application));
        }

        // The store only transitions rows that are still pending.
        let decided = self
            .db_client
            .decide_application(job_id, application_id, decision)
            .await?
            .ok_or_else(|| already_decided(&application))?;

        tracing::info!(
            "✅ application {} on job {} {}",
            application_id,
            job_id,
            decided.status.to_str()
        );
        Ok(decided)
    }

    pub async fn list_applied_jobs(&self, caller: &Caller) -> Result<Vec<AppliedJobDto>, ServiceError> {
        authorize(caller, Action::ListAppliedJobs, None)?;

        let Some(freelancer_id) = caller.freelancer_profile_id else {
            return Ok(Vec::new());
        };

        let applied = self.db_client.get_applied_jobs(freelancer_id).await?;
        Ok(applied.into_iter().map(AppliedJobDto::from).collect())
    }
}

fn already_decided(application: &Application) -> ServiceError {
    ServiceError::Conflict(format!(
        "Application {} has already been decided",
        application.id
    ))
}
