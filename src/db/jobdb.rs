// db/jobdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::DBClient;
use crate::models::jobmodel::*;

const JOB_COLUMNS: &str = "j.id, j.client_id, j.title, j.description, j.category, \
     j.required_skills, j.hourly_rate, j.duration, j.experience_level, j.status, j.created_at";

const APPLICANT_COLUMNS: &str = "a.id, a.job_id, a.freelancer_id, a.cover_letter, a.status, \
     a.applied_at, f.id AS freelancer_profile_id, u.name AS freelancer_name, \
     f.bio AS freelancer_bio, f.skills AS freelancer_skills, \
     f.hourly_rate AS freelancer_hourly_rate";

#[async_trait]
pub trait JobExt {
    async fn create_job(&self, client_id: Uuid, job: NewJob) -> Result<Job, Error>;

    /// All jobs, newest first, each joined with its owner's public fields.
    async fn get_jobs(&self) -> Result<Vec<JobWithClient>, Error>;

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error>;

    async fn get_job_with_client(&self, job_id: Uuid) -> Result<Option<JobWithClient>, Error>;

    async fn get_client_jobs(&self, client_id: Uuid) -> Result<Vec<Job>, Error>;

    /// Applies the patch only when the job is owned by `client_id`.
    async fn update_job(
        &self,
        job_id: Uuid,
        client_id: Uuid,
        patch: JobPatch,
    ) -> Result<Option<Job>, Error>;

    /// Deletes only when the job is owned by `client_id`.
    async fn delete_job(&self, job_id: Uuid, client_id: Uuid) -> Result<Option<Job>, Error>;

    /// Sets the status only when the job is owned by `client_id`.
    async fn update_job_status(
        &self,
        job_id: Uuid,
        client_id: Uuid,
        status: JobStatus,
    ) -> Result<Option<Job>, Error>;

    /// Appends an application unless this freelancer already has one on the job.
    /// The check and the append must be a single atomic step.
    async fn apply_to_job(
        &self,
        job_id: Uuid,
        freelancer_id: Uuid,
        cover_letter: String,
    ) -> Result<ApplyOutcome, Error>;

    /// Applicants in submission order.
    async fn get_job_applicants(&self, job_id: Uuid) -> Result<Vec<ApplicantDetails>, Error>;

    async fn get_job_application(
        &self,
        job_id: Uuid,
        application_id: Uuid,
    ) -> Result<Option<Application>, Error>;

    /// Moves a pending application to `decision`. Returns `None` when the
    /// application is not pending (or not on this job).
    async fn decide_application(
        &self,
        job_id: Uuid,
        application_id: Uuid,
        decision: ApplicationStatus,
    ) -> Result<Option<Application>, Error>;

    async fn get_applied_jobs(&self, freelancer_id: Uuid) -> Result<Vec<AppliedJob>, Error>;
}

#[async_trait]
impl JobExt for DBClient {
    async fn create_job(&self, client_id: Uuid, job: NewJob) -> Result<Job, Error> {
        sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs
            (client_id, title, description, category, required_skills, hourly_rate,
             duration, experience_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, client_id, title, description, category, required_skills,
                      hourly_rate, duration, experience_level, status, created_at
            "#,
        )
        .bind(client_id)
        .bind(job.title)
        .bind(job.description)
        .bind(job.category)
        .bind(job.required_skills)
        .bind(job.hourly_rate)
        .bind(job.duration)
        .bind(job.experience_level)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_jobs(&self) -> Result<Vec<JobWithClient>, Error> {
        let query = format!(
            r#"
            SELECT {JOB_COLUMNS},
                   c.id AS client_profile_id, c.company_name, c.website
            FROM jobs j
            JOIN client_profiles c ON c.id = j.client_id
            ORDER BY j.created_at DESC
            "#
        );

        sqlx::query_as::<_, JobWithClient>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error> {
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs j WHERE j.id = $1");

        sqlx::query_as::<_, Job>(&query)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_job_with_client(&self, job_id: Uuid) -> Result<Option<JobWithClient>, Error> {
        let query = format!(
            r#"
            SELECT {JOB_COLUMNS},
                   c.id AS client_profile_id, c.company_name, c.website
            FROM jobs j
            JOIN client_profiles c ON c.id = j.client_id
            WHERE j.id = $1
            "#
        );

        sqlx::query_as::<_, JobWithClient>(&query)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_client_jobs(&self, client_id: Uuid) -> Result<Vec<Job>, Error> {
        let query = format!(
            "SELECT {JOB_COLUMNS} FROM jobs j WHERE j.client_id = $1 ORDER BY j.created_at DESC"
        );

        sqlx::query_as::<_, Job>(&query)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn update_job(
        &self,
        job_id: Uuid,
        client_id: Uuid,
        patch: JobPatch,
    ) -> Result<Option<Job>, Error> {
        sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET title = COALESCE($3, title),
                description = COALESCE($4, description),
                category = COALESCE($5, category),
                required_skills = COALESCE($6, required_skills),
                hourly_rate = COALESCE($7, hourly_rate),
                duration = COALESCE($8, duration),
                experience_level = COALESCE($9, experience_level)
            WHERE id = $1 AND client_id = $2
            RETURNING id, client_id, title, description, category, required_skills,
                      hourly_rate, duration, experience_level, status, created_at
            "#,
        )
        .bind(job_id)
        .bind(client_id)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.category)
        .bind(patch.required_skills)
        .bind(patch.hourly_rate)
        .bind(patch.duration)
        .bind(patch.experience_level)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_job(&self, job_id: Uuid, client_id: Uuid) -> Result<Option<Job>, Error> {
        sqlx::query_as::<_, Job>(
            r#"
            DELETE FROM jobs
            WHERE id = $1 AND client_id = $2
            RETURNING id, client_id, title, description, category, required_skills,
                      hourly_rate, duration, experience_level, status, created_at
            "#,
        )
        .bind(job_id)
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_job_status(
        &self,
        job_id: Uuid,
        client_id: Uuid,
        status: JobStatus,
    ) -> Result<Option<Job>, Error> {
        sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET status = $3
            WHERE id = $1 AND client_id = $2
            RETURNING id, client_id, title, description, category, required_skills,
                      hourly_rate, duration, experience_level, status, created_at
            "#,
        )
        .bind(job_id)
        .bind(client_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn apply_to_job(
        &self,
        job_id: Uuid,
        freelancer_id: Uuid,
        cover_letter: String,
    ) -> Result<ApplyOutcome, Error> {
        let mut tx = self.pool.begin().await?;

        // Share lock keeps the job from being deleted until the insert commits.
        let job_exists = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM jobs WHERE id = $1 FOR SHARE",
        )
        .bind(job_id)
        .fetch_optional(&mut *tx)
        .await?;

        if job_exists.is_none() {
            tx.rollback().await?;
            return Ok(ApplyOutcome::JobNotFound);
        }

        let inserted = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO job_applications (job_id, freelancer_id, cover_letter)
            VALUES ($1, $2, $3)
            ON CONFLICT (job_id, freelancer_id) DO NOTHING
            RETURNING id, job_id, freelancer_id, cover_letter, status, applied_at
            "#,
        )
        .bind(job_id)
        .bind(freelancer_id)
        .bind(cover_letter)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(match inserted {
            Some(application) => ApplyOutcome::Applied(application),
            None => ApplyOutcome::AlreadyApplied,
        })
    }

    async fn get_job_applicants(&self, job_id: Uuid) -> Result<Vec<ApplicantDetails>, Error> {
        let query = format!(
            r#"
            SELECT {APPLICANT_COLUMNS}
            FROM job_applications a
            JOIN freelancer_profiles f ON f.id = a.freelancer_id
            JOIN users u ON u.id = f.user_id
            WHERE a.job_id = $1
            ORDER BY a.applied_at ASC
            "#
        );

        sqlx::query_as::<_, ApplicantDetails>(&query)
            .bind(job_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_job_application(
        &self,
        job_id: Uuid,
        application_id: Uuid,
    ) -> Result<Option<Application>, Error> {
        sqlx::query_as::<_, Application>(
            r#"
            SELECT id, job_id, freelancer_id, cover_letter, status, applied_at
            FROM job_applications
            WHERE id = $1 AND job_id = $2
            "#,
        )
        .bind(application_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn decide_application(
        &self,
        job_id: Uuid,
        application_id: Uuid,
        decision: ApplicationStatus,
    ) -> Result<Option<Application>, Error> {
        sqlx::query_as::<_, Application>(
            r#"
            UPDATE job_applications
            SET status = $3
            WHERE id = $1 AND job_id = $2 AND status = 'pending'::application_status
            RETURNING id, job_id, freelancer_id, cover_letter, status, applied_at
            "#,
        )
        .bind(application_id)
        .bind(job_id)
        .bind(decision)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_applied_jobs(&self, freelancer_id: Uuid) -> Result<Vec<AppliedJob>, Error> {
        sqlx::query_as::<_, AppliedJob>(
            r#"
            SELECT j.id AS job_id, j.title, j.category, j.status, j.hourly_rate,
                   a.cover_letter, a.applied_at, a.status AS application_status
            FROM job_applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.freelancer_id = $1
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(freelancer_id)
        .fetch_all(&self.pool)
        .await
    }
}
