// dtos/profiledtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::profilemodel::{ClientProfileUpdate, FreelancerProfileUpdate};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientProfileDto {
    #[validate(length(max = 200, message = "companyName must not exceed 200 characters"))]
    pub company_name: Option<String>,

    #[validate(length(max = 2000, message = "bio must not exceed 2000 characters"))]
    pub bio: Option<String>,

    pub website: Option<String>,

    pub profile_image: Option<String>,
}

impl From<UpdateClientProfileDto> for ClientProfileUpdate {
    fn from(dto: UpdateClientProfileDto) -> Self {
        ClientProfileUpdate {
            company_name: dto.company_name.map(|v| v.trim().to_string()),
            bio: dto.bio.map(|v| v.trim().to_string()),
            website: dto.website.map(|v| v.trim().to_string()),
            profile_image: dto.profile_image,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFreelancerProfileDto {
    #[validate(length(max = 2000, message = "bio must not exceed 2000 characters"))]
    pub bio: Option<String>,

    #[validate(range(min = 0.0, message = "hourlyRate must not be negative"))]
    pub hourly_rate: Option<f64>,

    pub skills: Option<Vec<String>>,

    pub portfolio: Option<String>,

    pub profile_image: Option<String>,
}

impl From<UpdateFreelancerProfileDto> for FreelancerProfileUpdate {
    fn from(dto: UpdateFreelancerProfileDto) -> Self {
        FreelancerProfileUpdate {
            bio: dto.bio.map(|v| v.trim().to_string()),
            hourly_rate: dto.hourly_rate,
            skills: dto.skills.map(dedupe_skills),
            portfolio: dto.portfolio.map(|v| v.trim().to_string()),
            profile_image: dto.profile_image,
        }
    }
}

/// Skills behave as a set: trimmed, blanks dropped, first occurrence kept.
fn dedupe_skills(skills: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(skills.len());
    for skill in skills {
        let skill = skill.trim().to_string();
        if !skill.is_empty() && !unique.contains(&skill) {
            unique.push(skill);
        }
    }
    unique
}
