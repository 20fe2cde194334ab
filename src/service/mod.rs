pub mod account_service;
pub mod application_service;
pub mod authorization;
pub mod error;
pub mod identity;
pub mod job_service;
pub mod profile_service;

#[cfg(test)]
pub mod testing;
