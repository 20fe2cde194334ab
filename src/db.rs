// db.rs
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::usermodel::{User, UserRole};

pub mod jobdb;
pub mod profiledb;

#[cfg(test)]
pub mod memorydb;

pub use jobdb::JobExt;
pub use profiledb::ProfileExt;

#[derive(Debug, Clone)]
pub struct DBClient {
    pub pool: Pool<Postgres>,
}

impl DBClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        DBClient { pool }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Everything the services need from persistence. Implemented by the
/// Postgres client and, in tests, by the in-memory store.
pub trait Store: UserExt + ProfileExt + JobExt + Send + Sync + std::fmt::Debug {}

impl<T> Store for T where T: UserExt + ProfileExt + JobExt + Send + Sync + std::fmt::Debug {}

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn save_user(
        &self,
        name: String,
        email: String,
        password: String,
        role: UserRole,
    ) -> Result<User, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut user: Option<User> = None;

        if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, name, email, password, role, created_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT id, name, email, password, role, created_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn save_user(
        &self,
        name: String,
        email: String,
        password: String,
        role: UserRole,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password, role, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password)
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }
}

/// True when the error is a unique-constraint violation (SQLSTATE 23505).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
