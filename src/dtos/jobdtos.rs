// dtos/jobdtos.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::jobmodel::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobDto {
    #[validate(
        required(message = "title is required"),
        length(max = 200, message = "title must not exceed 200 characters"),
        custom = "not_blank"
    )]
    pub title: Option<String>,

    #[validate(required(message = "description is required"), custom = "not_blank")]
    pub description: Option<String>,

    #[validate(required(message = "category is required"), custom = "not_blank")]
    pub category: Option<String>,

    #[validate(
        required(message = "requiredSkills is required"),
        length(min = 1, message = "requiredSkills must contain at least one skill"),
        custom = "skills_not_blank"
    )]
    pub required_skills: Option<Vec<String>>,

    #[validate(
        required(message = "hourlyRate is required"),
        range(min = 0.0, message = "hourlyRate must not be negative")
    )]
    pub hourly_rate: Option<f64>,

    #[validate(required(message = "duration is required"), custom = "not_blank")]
    pub duration: Option<String>,

    #[validate(
        required(message = "experienceLevel is required"),
        custom = "valid_experience_level"
    )]
    pub experience_level: Option<String>,
}

impl CreateJobDto {
    /// Converts a validated payload into the fields the store persists.
    pub fn into_new_job(self) -> Result<NewJob, String> {
        let experience_level = present(self.experience_level, "experienceLevel")?
            .parse::<ExperienceLevel>()?;

        Ok(NewJob {
            title: present(self.title, "title")?.trim().to_string(),
            description: present(self.description, "description")?,
            category: present(self.category, "category")?.trim().to_string(),
            required_skills: normalize_skills(present(self.required_skills, "requiredSkills")?),
            hourly_rate: present(self.hourly_rate, "hourlyRate")?,
            duration: present(self.duration, "duration")?,
            experience_level,
        })
    }
}

/// Partial update. A `client` key in the body is not a field here and is
/// dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobDto {
    #[validate(
        length(max = 200, message = "title must not exceed 200 characters"),
        custom = "not_blank"
    )]
    pub title: Option<String>,

    #[validate(custom = "not_blank")]
    pub description: Option<String>,

    #[validate(custom = "not_blank")]
    pub category: Option<String>,

    #[validate(
        length(min = 1, message = "requiredSkills must contain at least one skill"),
        custom = "skills_not_blank"
    )]
    pub required_skills: Option<Vec<String>>,

    #[validate(range(min = 0.0, message = "hourlyRate must not be negative"))]
    pub hourly_rate: Option<f64>,

    #[validate(custom = "not_blank")]
    pub duration: Option<String>,

    #[validate(custom = "valid_experience_level")]
    pub experience_level: Option<String>,
}

impl UpdateJobDto {
    pub fn into_patch(self) -> Result<JobPatch, String> {
        let experience_level = match self.experience_level {
            Some(level) => Some(level.parse::<ExperienceLevel>()?),
            None => None,
        };

        Ok(JobPatch {
            title: self.title.map(|t| t.trim().to_string()),
            description: self.description,
            category: self.category.map(|c| c.trim().to_string()),
            required_skills: self.required_skills.map(normalize_skills),
            hourly_rate: self.hourly_rate,
            duration: self.duration,
            experience_level,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetJobStatusDto {
    #[validate(length(min = 1, message = "status is required"))]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DecisionDto {
    #[validate(length(min = 1, message = "decision is required"))]
    pub decision: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplyDto {
    #[validate(length(max = 5000, message = "coverLetter must not exceed 5000 characters"))]
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantDto {
    pub id: Uuid,
    pub freelancer: FreelancerSummary,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

impl From<ApplicantDetails> for ApplicantDto {
    fn from(details: ApplicantDetails) -> Self {
        ApplicantDto {
            id: details.application.id,
            freelancer: details.freelancer,
            cover_letter: details.application.cover_letter,
            status: details.application.status,
            applied_at: details.application.applied_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponseDto {
    pub id: Uuid,
    pub client: ClientSummary,
    pub title: String,
    pub description: String,
    pub category: String,
    pub required_skills: Vec<String>,
    pub hourly_rate: f64,
    pub duration: String,
    pub experience_level: ExperienceLevel,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicants: Option<Vec<ApplicantDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_count: Option<usize>,
}

impl From<JobWithClient> for JobResponseDto {
    fn from(record: JobWithClient) -> Self {
        let JobWithClient { job, client } = record;
        JobResponseDto {
            id: job.id,
            client,
            title: job.title,
            description: job.description,
            category: job.category,
            required_skills: job.required_skills,
            hourly_rate: job.hourly_rate,
            duration: job.duration,
            experience_level: job.experience_level,
            status: job.status,
            created_at: job.created_at,
            applicants: None,
            applicant_count: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppliedApplicationDto {
    pub cover_letter: String,
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppliedJobDto {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub status: JobStatus,
    pub hourly_rate: f64,
    pub application: AppliedApplicationDto,
}

impl From<AppliedJob> for AppliedJobDto {
    fn from(applied: AppliedJob) -> Self {
        AppliedJobDto {
            id: applied.id,
            title: applied.title,
            category: applied.category,
            status: applied.status,
            hourly_rate: applied.hourly_rate,
            application: AppliedApplicationDto {
                cover_letter: applied.cover_letter,
                applied_at: applied.applied_at,
                status: applied.application_status,
            },
        }
    }
}

/// The updated job followed by all of the owner's jobs in status order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusUpdateDto {
    pub job: Job,
    pub jobs: Vec<Job>,
}

fn present<T>(value: Option<T>, field: &str) -> Result<T, String> {
    value.ok_or_else(|| format!("{} is required", field))
}

fn normalize_skills(skills: Vec<String>) -> Vec<String> {
    skills.into_iter().map(|s| s.trim().to_string()).collect()
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

fn skills_not_blank(skills: &[String]) -> Result<(), ValidationError> {
    if skills.iter().any(|s| s.trim().is_empty()) {
        let mut error = ValidationError::new("blank_skill");
        error.message = Some("requiredSkills must not contain blank entries".into());
        return Err(error);
    }
    Ok(())
}

fn valid_experience_level(value: &str) -> Result<(), ValidationError> {
    value.parse::<ExperienceLevel>().map(|_| ()).map_err(|message| {
        let mut error = ValidationError::new("experience_level");
        error.message = Some(message.into());
        error
    })
}
