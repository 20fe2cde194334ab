// service/job_service.rs
use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    db::Store,
    dtos::{ApplicantDto, CreateJobDto, JobResponseDto, JobStatusUpdateDto, UpdateJobDto},
    models::jobmodel::*,
    service::{
        authorization::{authorize, Action},
        error::ServiceError,
        identity::Caller,
        profile_service::ProfileService,
    },
};

#[derive(Debug, Clone)]
pub struct JobService {
    db_client: Arc<dyn Store>,
    profile_service: Arc<ProfileService>,
}

impl JobService {
    pub fn new(db_client: Arc<dyn Store>, profile_service: Arc<ProfileService>) -> Self {
        Self {
            db_client,
            profile_service,
        }
    }

    pub async fn create_job(&self, caller: &Caller, body: CreateJobDto) -> Result<Job, ServiceError> {
        authorize(caller, Action::CreateJob, None)?;

        body.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;
        let new_job = body.into_new_job().map_err(ServiceError::Validation)?;

        let client_id = self.profile_service.ensure_client_profile(caller).await?;
        let job = self.db_client.create_job(client_id, new_job).await?;

        tracing::info!("📌 job {} posted by client {}", job.id, client_id);
        Ok(job)
    }

    pub async fn list_jobs(&self) -> Result<Vec<JobResponseDto>, ServiceError> {
        let jobs = self.db_client.get_jobs().await?;
        Ok(jobs.into_iter().map(JobResponseDto::from).collect())
    }

    /// Public read. Applicant details are only attached for the owning client;
    /// everyone else gets the applicant count.
    pub async fn get_job(
        &self,
        caller: Option<&Caller>,
        job_id: Uuid,
    ) -> Result<JobResponseDto, ServiceError> {
        let record = self
            .db_client
            .get_job_with_client(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        let is_owner = caller
            .and_then(|c| c.client_profile_id)
            .map_or(false, |profile_id| profile_id == record.job.client_id);

        let applicants: Vec<ApplicantDto> = self
            .db_client
            .get_job_applicants(job_id)
            .await?
            .into_iter()
            .map(ApplicantDto::from)
            .collect();

        let mut response = JobResponseDto::from(record);
        if is_owner {
            response.applicants = Some(applicants);
        } else {
            response.applicant_count = Some(applicants.len());
        }

        Ok(response)
    }

    pub async fn update_job(
        &self,
        caller: &Caller,
        job_id: Uuid,
        body: UpdateJobDto,
    ) -> Result<Job, ServiceError> {
        let job = self
            .db_client
            .get_job_by_id(job_id)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        authorize(caller, Action::UpdateJob, Some(&job))?;

        body.validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;
        let patch = body.into_patch().map_err(ServiceError::Validation)?;

        // Filtered by owner as well, so a concurrent delete surfaces as not found.
        let updated = self
            .db_client
            .update_job(job_id, job.client_id, patch)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        tracing::info!("✏️ job {} updated", job_id);
        Ok(updated)
    }

    pub async fn delete_job(&self, caller: &Caller, job_id: Uuid) -> Result<Job, ServiceError> {
        let owner = self.owner_scope(caller, Action::DeleteJob, job_id).await?;

        let deleted = self
            .db_client
            .delete_job(job_id, owner)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        tracing::info!("🗑️ job {} deleted by client {}", job_id, owner);
        Ok(deleted)
    }

    /// Sets the status and returns the job together with all of the owner's
    /// jobs in status order.
    pub async fn set_job_status(
        &self,
        caller: &Caller,
        job_id: Uuid,
        status: &str,
    ) -> Result<JobStatusUpdateDto, ServiceError> {
        let status = status.parse::<JobStatus>().map_err(ServiceError::Validation)?;
        let owner = self.owner_scope(caller, Action::SetJobStatus, job_id).await?;

        let job = self
            .db_client
            .update_job_status(job_id, owner, status)
            .await?
            .ok_or(ServiceError::JobNotFound(job_id))?;

        let mut jobs = self.db_client.get_client_jobs(owner).await?;
        sort_by_status_priority(&mut jobs);

        tracing::info!("🔄 job {} moved to {}", job_id, status.to_str());
        Ok(JobStatusUpdateDto { job, jobs })
    }

    /// Resolves the owner filter for a write that is scoped by id and owner in
    /// a single statement. A caller who cannot own jobs gets `Forbidden`, unless
    /// the job does not exist at all.
    pub(crate) async fn owner_scope(
        &self,
        caller: &Caller,
        action: Action,
        job_id: Uuid,
    ) -> Result<Uuid, ServiceError> {
        match (authorize(caller, action, None), caller.client_profile_id) {
            (Ok(()), Some(owner)) => Ok(owner),
            (denied, _) => {
                if self.db_client.get_job_by_id(job_id).await?.is_none() {
                    return Err(ServiceError::JobNotFound(job_id));
                }
                denied?;
                Err(ServiceError::Forbidden(
                    "Only the client who posted this job can do that".to_string(),
                ))
            }
        }
    }
}

/// Orders jobs open, in-progress, completed, closed; newest first within a status.
pub fn sort_by_status_priority(jobs: &mut [Job]) {
    jobs.sort_by(|a, b| {
        a.status
            .priority()
            .cmp(&b.status.priority())
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
