// service/authorization.rs
use crate::{
    models::{jobmodel::Job, usermodel::UserRole},
    service::{error::ServiceError, identity::Caller},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateJob,
    UpdateJob,
    DeleteJob,
    SetJobStatus,
    ViewApplicants,
    DecideApplication,
    Apply,
    ListAppliedJobs,
    UpdateClientProfile,
    UpdateFreelancerProfile,
}

impl Action {
    /// Actions that only the owning client may perform on a job.
    pub fn is_owner_scoped(&self) -> bool {
        matches!(
            self,
            Action::UpdateJob
                | Action::DeleteJob
                | Action::SetJobStatus
                | Action::ViewApplicants
                | Action::DecideApplication
        )
    }

    fn describe(&self) -> &'static str {
        match self {
            Action::CreateJob => "post jobs",
            Action::UpdateJob => "edit this job",
            Action::DeleteJob => "delete this job",
            Action::SetJobStatus => "change the status of this job",
            Action::ViewApplicants => "view applicants of this job",
            Action::DecideApplication => "decide applications on this job",
            Action::Apply => "apply to jobs",
            Action::ListAppliedJobs => "list applied jobs",
            Action::UpdateClientProfile => "update a client profile",
            Action::UpdateFreelancerProfile => "update a freelancer profile",
        }
    }
}

/// Role and ownership gate. Performs no I/O.
///
/// `job` is the target of an owner-scoped action when it has been loaded.
/// Without it only the role and the presence of a client profile are
/// checked, and the caller is expected to filter the write by owner.
pub fn authorize(caller: &Caller, action: Action, job: Option<&Job>) -> Result<(), ServiceError> {
    let allowed = match (caller.role, action) {
        (UserRole::Client, Action::CreateJob) => true,
        (UserRole::Client, Action::UpdateClientProfile) => true,
        (UserRole::Client, action) if action.is_owner_scoped() => {
            match (caller.client_profile_id, job) {
                (Some(owner), Some(job)) => job.client_id == owner,
                (Some(_), None) => true,
                (None, _) => false,
            }
        }
        (UserRole::Client, _) => false,

        (UserRole::Freelancer, Action::Apply) => true,
        (UserRole::Freelancer, Action::ListAppliedJobs) => true,
        (UserRole::Freelancer, Action::UpdateFreelancerProfile) => true,
        (UserRole::Freelancer, _) => false,
    };

    if allowed {
        Ok(())
    } else {
        tracing::warn!(
            "⛔ {} {} denied: {:?}",
            caller.role.to_str(),
            caller.user_id,
            action
        );
        Err(ServiceError::Forbidden(format!(
            "You are not allowed to {}",
            action.describe()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::jobmodel::{ExperienceLevel, JobStatus};
    use chrono::Utc;
    use uuid::Uuid;

    const ALL_ACTIONS: [Action; 10] = [
        Action::CreateJob,
        Action::UpdateJob,
        Action::DeleteJob,
        Action::SetJobStatus,
        Action::ViewApplicants,
        Action::DecideApplication,
        Action::Apply,
        Action::ListAppliedJobs,
        Action::UpdateClientProfile,
        Action::UpdateFreelancerProfile,
    ];

    fn caller(role: UserRole, client_profile_id: Option<Uuid>) -> Caller {
        Caller {
            user_id: Uuid::new_v4(),
            name: "Test".to_string(),
            role,
            client_profile_id,
            freelancer_profile_id: None,
        }
    }

    fn job_owned_by(client_id: Uuid) -> Job {
        Job {
            id: Uuid::new_v4(),
            client_id,
            title: "Job".to_string(),
            description: "Description".to_string(),
            category: "web".to_string(),
            required_skills: vec!["rust".to_string()],
            hourly_rate: 30.0,
            duration: "1 month".to_string(),
            experience_level: ExperienceLevel::Expert,
            status: JobStatus::Open,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_may_manage_own_job() {
        let profile_id = Uuid::new_v4();
        let owner = caller(UserRole::Client, Some(profile_id));
        let job = job_owned_by(profile_id);

        for action in ALL_ACTIONS.iter().filter(|a| a.is_owner_scoped()) {
            assert!(authorize(&owner, *action, Some(&job)).is_ok(), "{:?}", action);
        }
    }

    #[test]
    fn test_other_client_is_forbidden() {
        let intruder = caller(UserRole::Client, Some(Uuid::new_v4()));
        let job = job_owned_by(Uuid::new_v4());

        for action in ALL_ACTIONS.iter().filter(|a| a.is_owner_scoped()) {
            let err = authorize(&intruder, *action, Some(&job)).unwrap_err();
            assert!(matches!(err, ServiceError::Forbidden(_)), "{:?}", action);
        }
    }

    #[test]
    fn test_ownership_uses_profile_id_not_user_id() {
        let owner = caller(UserRole::Client, Some(Uuid::new_v4()));
        // A job whose owner field happens to hold the caller's user id.
        let job = job_owned_by(owner.user_id);

        assert!(authorize(&owner, Action::UpdateJob, Some(&job)).is_err());
    }

    #[test]
    fn test_client_without_profile_cannot_manage_jobs() {
        let client = caller(UserRole::Client, None);
        assert!(authorize(&client, Action::DeleteJob, None).is_err());
        assert!(authorize(&client, Action::CreateJob, None).is_ok());
    }

    #[test]
    fn test_role_table_is_total() {
        let client = caller(UserRole::Client, Some(Uuid::new_v4()));
        let freelancer = caller(UserRole::Freelancer, None);

        for action in ALL_ACTIONS {
            let client_allowed = authorize(&client, action, None).is_ok();
            let freelancer_allowed = authorize(&freelancer, action, None).is_ok();

            let expected_client = !matches!(
                action,
                Action::Apply | Action::ListAppliedJobs | Action::UpdateFreelancerProfile
            );
            assert_eq!(client_allowed, expected_client, "client {:?}", action);
            assert_eq!(freelancer_allowed, !expected_client, "freelancer {:?}", action);
        }
    }
}
