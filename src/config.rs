// config.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in minutes.
    pub jwt_maxage: i64,
    pub port: u16,
    pub database_max_connections: u32,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn init() -> Result<Config, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET_KEY")?;
        let jwt_maxage = parsed("JWT_MAXAGE", 10080)?;
        let port = parsed("PORT", 8000)?;
        let database_max_connections = parsed("DATABASE_MAX_CONNECTIONS", 10)?;

        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Config {
            database_url,
            jwt_secret,
            jwt_maxage,
            port,
            database_max_connections,
            cors_origins,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_falls_back_to_default() {
        let value: i64 = parsed("SKILLBRIDGE_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_required_reports_missing_name() {
        let err = required("SKILLBRIDGE_TEST_UNSET_REQUIRED").unwrap_err();
        assert_eq!(err.to_string(), "SKILLBRIDGE_TEST_UNSET_REQUIRED must be set");
    }
}
