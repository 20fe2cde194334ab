// db/memorydb.rs
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{JobExt, ProfileExt, UserExt};
use crate::models::{jobmodel::*, profilemodel::*, usermodel::*};

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    client_profiles: Vec<ClientProfile>,
    freelancer_profiles: Vec<FreelancerProfile>,
    jobs: Vec<Job>,
    applications: Vec<Application>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl MemoryState {
    /// Strictly increasing timestamps, so ordering by time is deterministic.
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::milliseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(next);
        next
    }

    fn owner_of(&self, user_id: Uuid) -> Option<ProfileOwner> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| ProfileOwner {
                name: u.name.clone(),
                email: u.email.clone(),
                role: u.role,
            })
    }

    fn client_summary(&self, client_id: Uuid) -> Option<ClientSummary> {
        self.client_profiles
            .iter()
            .find(|c| c.id == client_id)
            .map(|c| ClientSummary {
                id: c.id,
                company_name: c.company_name.clone(),
                website: c.website.clone(),
            })
    }

    fn with_client(&self, job: &Job) -> Option<JobWithClient> {
        self.client_summary(job.client_id).map(|client| JobWithClient {
            job: job.clone(),
            client,
        })
    }
}

/// Store backed by plain vectors behind one lock. Counts every call so tests
/// can assert that a request never reached persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn application_count(&self, job_id: Uuid, freelancer_id: Uuid) -> usize {
        self.state
            .read()
            .await
            .applications
            .iter()
            .filter(|a| a.job_id == job_id && a.freelancer_id == freelancer_id)
            .count()
    }
}

#[async_trait]
impl UserExt for MemoryStore {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, Error> {
        self.touch();
        let state = self.state.read().await;

        let user = if let Some(user_id) = user_id {
            state.users.iter().find(|u| u.id == user_id).cloned()
        } else if let Some(email) = email {
            state.users.iter().find(|u| u.email == email).cloned()
        } else {
            None
        };

        Ok(user)
    }

    async fn save_user(
        &self,
        name: String,
        email: String,
        password: String,
        role: UserRole,
    ) -> Result<User, Error> {
        self.touch();
        let mut state = self.state.write().await;

        if state.users.iter().any(|u| u.email == email) {
            return Err(Error::Protocol(format!("duplicate email {}", email)));
        }

        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            password,
            role,
            created_at: state.tick(),
        };
        state.users.push(user.clone());

        Ok(user)
    }
}

#[async_trait]
impl ProfileExt for MemoryStore {
    async fn get_client_profile(&self, user_id: Uuid) -> Result<Option<ClientProfile>, Error> {
        self.touch();
        let state = self.state.read().await;
        Ok(state
            .client_profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn get_freelancer_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<FreelancerProfile>, Error> {
        self.touch();
        let state = self.state.read().await;
        Ok(state
            .freelancer_profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn upsert_client_profile(
        &self,
        user_id: Uuid,
        update: ClientProfileUpdate,
    ) -> Result<ClientProfileWithUser, Error> {
        self.touch();
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let user = state.owner_of(user_id).ok_or(Error::RowNotFound)?;
        let now = state.tick();

        let profile = match state
            .client_profiles
            .iter_mut()
            .find(|p| p.user_id == user_id)
        {
            Some(existing) => {
                if let Some(company_name) = update.company_name {
                    existing.company_name = company_name;
                }
                if let Some(bio) = update.bio {
                    existing.bio = bio;
                }
                if let Some(website) = update.website {
                    existing.website = website;
                }
                if let Some(profile_image) = update.profile_image {
                    existing.profile_image = profile_image;
                }
                existing.updated_at = now;
                existing.clone()
            }
            None => {
                let created = ClientProfile {
                    id: Uuid::new_v4(),
                    user_id,
                    company_name: update.company_name.unwrap_or_default(),
                    bio: update.bio.unwrap_or_default(),
                    website: update.website.unwrap_or_default(),
                    profile_image: update.profile_image.unwrap_or_default(),
                    created_at: now,
                    updated_at: now,
                };
                state.client_profiles.push(created.clone());
                created
            }
        };

        Ok(ClientProfileWithUser { profile, user })
    }

    async fn upsert_freelancer_profile(
        &self,
        user_id: Uuid,
        update: FreelancerProfileUpdate,
    ) -> Result<FreelancerProfileWithUser, Error> {
        self.touch();
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let user = state.owner_of(user_id).ok_or(Error::RowNotFound)?;
        let now = state.tick();

        let profile = match state
            .freelancer_profiles
            .iter_mut()
            .find(|p| p.user_id == user_id)
        {
            Some(existing) => {
                if let Some(bio) = update.bio {
                    existing.bio = bio;
                }
                if let Some(hourly_rate) = update.hourly_rate {
                    existing.hourly_rate = hourly_rate;
                }
                if let Some(skills) = update.skills {
                    existing.skills = skills;
                }
                if let Some(portfolio) = update.portfolio {
                    existing.portfolio = portfolio;
                }
                if let Some(profile_image) = update.profile_image {
                    existing.profile_image = profile_image;
                }
                existing.updated_at = now;
                existing.clone()
            }
            None => {
                let created = FreelancerProfile {
                    id: Uuid::new_v4(),
                    user_id,
                    bio: update.bio.unwrap_or_default(),
                    hourly_rate: update.hourly_rate.unwrap_or_default(),
                    skills: update.skills.unwrap_or_default(),
                    portfolio: update.portfolio.unwrap_or_default(),
                    profile_image: update.profile_image.unwrap_or_default(),
                    created_at: now,
                    updated_at: now,
                };
                state.freelancer_profiles.push(created.clone());
                created
            }
        };

        Ok(FreelancerProfileWithUser { profile, user })
    }

    async fn get_client_profiles(&self) -> Result<Vec<ClientProfileWithUser>, Error> {
        self.touch();
        let state = self.state.read().await;
        let mut profiles: Vec<ClientProfileWithUser> = state
            .client_profiles
            .iter()
            .filter_map(|p| {
                state.owner_of(p.user_id).map(|user| ClientProfileWithUser {
                    profile: p.clone(),
                    user,
                })
            })
            .collect();
        profiles.sort_by(|a, b| b.profile.created_at.cmp(&a.profile.created_at));
        Ok(profiles)
    }

    async fn get_freelancer_profiles(&self) -> Result<Vec<FreelancerProfileWithUser>, Error> {
        self.touch();
        let state = self.state.read().await;
        let mut profiles: Vec<FreelancerProfileWithUser> = state
            .freelancer_profiles
            .iter()
            .filter_map(|p| {
                state.owner_of(p.user_id).map(|user| FreelancerProfileWithUser {
                    profile: p.clone(),
                    user,
                })
            })
            .collect();
        profiles.sort_by(|a, b| b.profile.created_at.cmp(&a.profile.created_at));
        Ok(profiles)
    }
}

#[async_trait]
impl JobExt for MemoryStore {
    async fn create_job(&self, client_id: Uuid, job: NewJob) -> Result<Job, Error> {
        self.touch();
        let mut state = self.state.write().await;

        if !state.client_profiles.iter().any(|c| c.id == client_id) {
            return Err(Error::RowNotFound);
        }

        let job = Job {
            id: Uuid::new_v4(),
            client_id,
            title: job.title,
            description: job.description,
            category: job.category,
            required_skills: job.required_skills,
            hourly_rate: job.hourly_rate,
            duration: job.duration,
            experience_level: job.experience_level,
            status: JobStatus::Open,
            created_at: state.tick(),
        };
        state.jobs.push(job.clone());

        Ok(job)
    }

    async fn get_jobs(&self) -> Result<Vec<JobWithClient>, Error> {
        self.touch();
        let state = self.state.read().await;
        let mut jobs: Vec<JobWithClient> =
            state.jobs.iter().filter_map(|j| state.with_client(j)).collect();
        jobs.sort_by(|a, b| b.job.created_at.cmp(&a.job.created_at));
        Ok(jobs)
    }

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error> {
        self.touch();
        let state = self.state.read().await;
        Ok(state.jobs.iter().find(|j| j.id == job_id).cloned())
    }

    async fn get_job_with_client(&self, job_id: Uuid) -> Result<Option<JobWithClient>, Error> {
        self.touch();
        let state = self.state.read().await;
        Ok(state
            .jobs
            .iter()
            .find(|j| j.id == job_id)
            .and_then(|j| state.with_client(j)))
    }

    async fn get_client_jobs(&self, client_id: Uuid) -> Result<Vec<Job>, Error> {
        self.touch();
        let state = self.state.read().await;
        let mut jobs: Vec<Job> = state
            .jobs
            .iter()
            .filter(|j| j.client_id == client_id)
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    async fn update_job(
        &self,
        job_id: Uuid,
        client_id: Uuid,
        patch: JobPatch,
    ) -> Result<Option<Job>, Error> {
        self.touch();
        let mut state = self.state.write().await;
        Ok(state
            .jobs
            .iter_mut()
            .find(|j| j.id == job_id && j.client_id == client_id)
            .map(|job| {
                patch.apply_to(job);
                job.clone()
            }))
    }

    async fn delete_job(&self, job_id: Uuid, client_id: Uuid) -> Result<Option<Job>, Error> {
        self.touch();
        let mut state = self.state.write().await;

        let position = state
            .jobs
            .iter()
            .position(|j| j.id == job_id && j.client_id == client_id);

        Ok(position.map(|index| {
            let removed = state.jobs.remove(index);
            state.applications.retain(|a| a.job_id != job_id);
            removed
        }))
    }

    async fn update_job_status(
        &self,
        job_id: Uuid,
        client_id: Uuid,
        status: JobStatus,
    ) -> Result<Option<Job>, Error> {
        self.touch();
        let mut state = self.state.write().await;
        Ok(state
            .jobs
            .iter_mut()
            .find(|j| j.id == job_id && j.client_id == client_id)
            .map(|job| {
                job.status = status;
                job.clone()
            }))
    }

    async fn apply_to_job(
        &self,
        job_id: Uuid,
        freelancer_id: Uuid,
        cover_letter: String,
    ) -> Result<ApplyOutcome, Error> {
        self.touch();
        // Existence check, duplicate check and append all happen under this guard.
        let mut state = self.state.write().await;

        if !state.jobs.iter().any(|j| j.id == job_id) {
            return Ok(ApplyOutcome::JobNotFound);
        }

        if state
            .applications
            .iter()
            .any(|a| a.job_id == job_id && a.freelancer_id == freelancer_id)
        {
            return Ok(ApplyOutcome::AlreadyApplied);
        }

        let application = Application {
            id: Uuid::new_v4(),
            job_id,
            freelancer_id,
            cover_letter,
            status: ApplicationStatus::Pending,
            applied_at: state.tick(),
        };
        state.applications.push(application.clone());

        Ok(ApplyOutcome::Applied(application))
    }

    async fn get_job_applicants(&self, job_id: Uuid) -> Result<Vec<ApplicantDetails>, Error> {
        self.touch();
        let state = self.state.read().await;

        let mut applicants: Vec<ApplicantDetails> = state
            .applications
            .iter()
            .filter(|a| a.job_id == job_id)
            .filter_map(|a| {
                let profile = state
                    .freelancer_profiles
                    .iter()
                    .find(|f| f.id == a.freelancer_id)?;
                let owner = state.owner_of(profile.user_id)?;
                Some(ApplicantDetails {
                    application: a.clone(),
                    freelancer: FreelancerSummary {
                        id: profile.id,
                        name: owner.name,
                        bio: profile.bio.clone(),
                        skills: profile.skills.clone(),
                        hourly_rate: profile.hourly_rate,
                    },
                })
            })
            .collect();
        applicants.sort_by(|a, b| a.application.applied_at.cmp(&b.application.applied_at));

        Ok(applicants)
    }

    async fn get_job_application(
        &self,
        job_id: Uuid,
        application_id: Uuid,
    ) -> Result<Option<Application>, Error> {
        self.touch();
        let state = self.state.read().await;
        Ok(state
            .applications
            .iter()
            .find(|a| a.id == application_id && a.job_id == job_id)
            .cloned())
    }

    async fn decide_application(
        &self,
        job_id: Uuid,
        application_id: Uuid,
        decision: ApplicationStatus,
    ) -> Result<Option<Application>, Error> {
        self.touch();
        let mut state = self.state.write().await;
        Ok(state
            .applications
            .iter_mut()
            .find(|a| {
                a.id == application_id
                    && a.job_id == job_id
                    && a.status == ApplicationStatus::Pending
            })
            .map(|application| {
                application.status = decision;
                application.clone()
            }))
    }

    async fn get_applied_jobs(&self, freelancer_id: Uuid) -> Result<Vec<AppliedJob>, Error> {
        self.touch();
        let state = self.state.read().await;

        let mut applied: Vec<AppliedJob> = state
            .applications
            .iter()
            .filter(|a| a.freelancer_id == freelancer_id)
            .filter_map(|a| {
                let job = state.jobs.iter().find(|j| j.id == a.job_id)?;
                Some(AppliedJob {
                    id: job.id,
                    title: job.title.clone(),
                    category: job.category.clone(),
                    status: job.status,
                    hourly_rate: job.hourly_rate,
                    cover_letter: a.cover_letter.clone(),
                    applied_at: a.applied_at,
                    application_status: a.status,
                })
            })
            .collect();
        applied.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));

        Ok(applied)
    }
}
