pub mod config;
pub mod words;

use std::str::FromStr;

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};
use thiserror::Error;

use crate::db::config::{StoreConfig, StoreConfigError};

const PG_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS translations (
    id SERIAL PRIMARY KEY,
    italian_word VARCHAR(255) NOT NULL,
    english_word VARCHAR(255) NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#;

const SQLITE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS translations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    italian_word TEXT NOT NULL,
    english_word TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Explicitly constructed store handle around the `translations` table.
///
/// The backing engine is selected by the `DATABASE_URL` scheme: PostgreSQL
/// for the deployed server, SQLite for local runs and tests.
#[derive(Clone)]
pub struct WordStore {
    pool: StorePool,
}

#[derive(Clone)]
pub(crate) enum StorePool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl WordStore {
    pub async fn from_env() -> Result<Self, StoreError> {
        let config = StoreConfig::from_env()?;
        Self::open(config).await
    }

    /// Connects and runs the schema bootstrap, so a fresh database is
    /// usable without a separate migration step.
    pub async fn open(config: StoreConfig) -> Result<Self, StoreError> {
        let pool = if config.database_url.starts_with("postgres:")
            || config.database_url.starts_with("postgresql:")
        {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(config.acquire_timeout)
                .connect(&config.database_url)
                .await?;
            StorePool::Postgres(pool)
        } else if config.database_url.starts_with("sqlite:") {
            let options = SqliteConnectOptions::from_str(&config.database_url)?
                .create_if_missing(true);
            let pool = SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(config.acquire_timeout)
                .connect_with(options)
                .await?;
            StorePool::Sqlite(pool)
        } else {
            return Err(StoreError::Config(StoreConfigError::UnsupportedScheme {
                url: config.database_url,
            }));
        };

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    pub(crate) fn pool(&self) -> &StorePool {
        &self.pool
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        match &self.pool {
            StorePool::Postgres(pool) => {
                sqlx::query(PG_SCHEMA).execute(pool).await?;
            }
            StorePool::Sqlite(pool) => {
                sqlx::query(SQLITE_SCHEMA).execute(pool).await?;
            }
        }
        Ok(())
    }

    pub async fn close(&self) {
        match &self.pool {
            StorePool::Postgres(pool) => pool.close().await,
            StorePool::Sqlite(pool) => pool.close().await,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Config(#[from] StoreConfigError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
