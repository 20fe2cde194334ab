use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "experience_level", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Expert,
}

impl ExperienceLevel {
    pub fn to_str(&self) -> &str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Expert => "expert",
        }
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "beginner" => Ok(ExperienceLevel::Beginner),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            "expert" => Ok(ExperienceLevel::Expert),
            other => Err(format!(
                "experienceLevel must be one of beginner, intermediate, expert (got '{}')",
                other
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "job_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Open,
    InProgress,
    Completed,
    Closed,
}

impl JobStatus {
    pub fn to_str(&self) -> &str {
        match self {
            JobStatus::Open => "open",
            JobStatus::InProgress => "in-progress",
            JobStatus::Completed => "completed",
            JobStatus::Closed => "closed",
        }
    }

    /// Position of the status in owner listings; lower sorts first.
    pub fn priority(&self) -> u8 {
        match self {
            JobStatus::Open => 1,
            JobStatus::InProgress => 2,
            JobStatus::Completed => 3,
            JobStatus::Closed => 4,
        }
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(JobStatus::Open),
            "in-progress" => Ok(JobStatus::InProgress),
            "completed" => Ok(JobStatus::Completed),
            "closed" => Ok(JobStatus::Closed),
            other => Err(format!(
                "status must be one of open, in-progress, completed, closed (got '{}')",
                other
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Parses a client decision. `pending` is a starting state, not a decision.
    pub fn from_decision(value: &str) -> Result<Self, String> {
        match value {
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(format!(
                "decision must be either accepted or rejected (got '{}')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    #[serde(rename = "client")]
    pub client_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub required_skills: Vec<String>,
    pub hourly_rate: f64,
    pub duration: String,
    pub experience_level: ExperienceLevel,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

/// Job fields accepted at creation; owner and status are set by the store.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub category: String,
    pub required_skills: Vec<String>,
    pub hourly_rate: f64,
    pub duration: String,
    pub experience_level: ExperienceLevel,
}

/// Partial job update. Ownership is fixed at creation, so there is no owner field.
#[derive(Debug, Clone, Default)]
pub struct JobPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub hourly_rate: Option<f64>,
    pub duration: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
}

impl JobPatch {
    pub fn apply_to(&self, job: &mut Job) {
        if let Some(title) = &self.title {
            job.title = title.clone();
        }
        if let Some(description) = &self.description {
            job.description = description.clone();
        }
        if let Some(category) = &self.category {
            job.category = category.clone();
        }
        if let Some(skills) = &self.required_skills {
            job.required_skills = skills.clone();
        }
        if let Some(rate) = self.hourly_rate {
            job.hourly_rate = rate;
        }
        if let Some(duration) = &self.duration {
            job.duration = duration.clone();
        }
        if let Some(level) = self.experience_level {
            job.experience_level = level;
        }
    }
}

/// Public fields of the owning client, as shown next to a job.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    #[sqlx(rename = "client_profile_id")]
    pub id: Uuid,
    pub company_name: String,
    pub website: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JobWithClient {
    #[sqlx(flatten)]
    pub job: Job,
    #[sqlx(flatten)]
    pub client: ClientSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    #[serde(rename = "freelancer")]
    pub freelancer_id: Uuid,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Result of the conditional "append if not already applied" write.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    Applied(Application),
    AlreadyApplied,
    JobNotFound,
}

/// Public fields of an applicant's freelancer profile plus the user's display name.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerSummary {
    #[sqlx(rename = "freelancer_profile_id")]
    pub id: Uuid,
    #[sqlx(rename = "freelancer_name")]
    pub name: String,
    #[sqlx(rename = "freelancer_bio")]
    pub bio: String,
    #[sqlx(rename = "freelancer_skills")]
    pub skills: Vec<String>,
    #[sqlx(rename = "freelancer_hourly_rate")]
    pub hourly_rate: f64,
}

#[derive(Debug, Clone, sqlx::FromRow, PartialEq)]
pub struct ApplicantDetails {
    #[sqlx(flatten)]
    pub application: Application,
    #[sqlx(flatten)]
    pub freelancer: FreelancerSummary,
}

/// A job seen from the applying freelancer's side.
#[derive(Debug, Clone, sqlx::FromRow, PartialEq)]
pub struct AppliedJob {
    #[sqlx(rename = "job_id")]
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub status: JobStatus,
    pub hourly_rate: f64,
    pub cover_letter: String,
    pub applied_at: DateTime<Utc>,
    pub application_status: ApplicationStatus,
}
