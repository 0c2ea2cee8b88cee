//! User Directory
//!
//! Storage port for user records plus the PostgreSQL adapter. The core only
//! needs `find_by_email` and `save`; email uniqueness is enforced by storage,
//! which stays the final authority for registration races.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::User;

#[derive(Debug, Clone, thiserror::Error)]
pub enum DirectoryError {
    /// Storage-level uniqueness rejected the record's email.
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Storage error: {0}")]
    Backend(String),
}

/// Lookup/persist interface over user records
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError>;

    /// Create or update a record (most-recent-write-wins).
    async fn save(&self, user: User) -> Result<User, DirectoryError>;
}

/// PostgreSQL-backed directory
pub struct PgUserDirectory {
    db: PgPool,
}

impl PgUserDirectory {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Bootstrap the schema
    pub async fn migrate(&self) -> Result<(), DirectoryError> {
        tracing::info!("Running user directory migrations");

        sqlx::query(
            r#"
            DO $$ BEGIN
                CREATE TYPE user_role AS ENUM ('admin', 'user');
            EXCEPTION
                WHEN duplicate_object THEN null;
            END $$;
            "#,
        )
        .execute(&self.db)
        .await
        .map_err(backend)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                email VARCHAR(255) NOT NULL UNIQUE,
                email_validated BOOLEAN NOT NULL DEFAULT FALSE,
                password_hash VARCHAR(255) NOT NULL,
                roles user_role[] NOT NULL DEFAULT '{user}',
                avatar VARCHAR(500),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            "#,
        )
        .execute(&self.db)
        .await
        .map_err(backend)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);")
            .execute(&self.db)
            .await
            .map_err(backend)?;

        tracing::info!("User directory migrations completed");
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError> {
        let user = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await
            .map_err(backend)?;

        Ok(user)
    }

    async fn save(&self, user: User) -> Result<User, DirectoryError> {
        let saved = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, email_validated, password_hash, roles, avatar, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                email_validated = EXCLUDED.email_validated,
                password_hash = EXCLUDED.password_hash,
                roles = EXCLUDED.roles,
                avatar = EXCLUDED.avatar,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.email_validated)
        .bind(&user.password_hash)
        .bind(&user.roles)
        .bind(&user.avatar)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.db)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                DirectoryError::DuplicateEmail
            }
            _ => backend(err),
        })?;

        Ok(saved)
    }
}

fn backend(err: sqlx::Error) -> DirectoryError {
    tracing::error!("Database error: {:?}", err);
    DirectoryError::Backend(err.to_string())
}
