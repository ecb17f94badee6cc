use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::{StoreError, StorePool, WordStore};

/// One row of the `translations` table as served by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    pub italian_word: String,
    pub english_word: String,
    pub created_at: String,
}

/// Every word pair, ordered by ascending id.
pub async fn list_all(store: &WordStore) -> Result<Vec<Word>, StoreError> {
    match store.pool() {
        StorePool::Postgres(pool) => {
            let rows = sqlx::query("SELECT * FROM translations ORDER BY id")
                .fetch_all(pool)
                .await?;
            Ok(rows.iter().map(map_pg_word).collect())
        }
        StorePool::Sqlite(pool) => {
            let rows = sqlx::query("SELECT * FROM translations ORDER BY id")
                .fetch_all(pool)
                .await?;
            Ok(rows.iter().map(map_sqlite_word).collect())
        }
    }
}

/// Inserts one word pair and returns the stored row, including the
/// assigned id and creation timestamp.
pub async fn insert(store: &WordStore, italian: &str, english: &str) -> Result<Word, StoreError> {
    match store.pool() {
        StorePool::Postgres(pool) => {
            let row = sqlx::query(
                "INSERT INTO translations (italian_word, english_word) VALUES ($1, $2) RETURNING *",
            )
            .bind(italian)
            .bind(english)
            .fetch_one(pool)
            .await?;
            Ok(map_pg_word(&row))
        }
        StorePool::Sqlite(pool) => {
            let row = sqlx::query(
                "INSERT INTO translations (italian_word, english_word) VALUES (?, ?) RETURNING *",
            )
            .bind(italian)
            .bind(english)
            .fetch_one(pool)
            .await?;
            Ok(map_sqlite_word(&row))
        }
    }
}

/// Bulk-seeds word pairs inside a single transaction, skipping pairs whose
/// Italian word is already present. Returns the number of inserted rows.
pub async fn seed_pairs(store: &WordStore, pairs: &[(&str, &str)]) -> Result<u64, StoreError> {
    let mut inserted = 0u64;

    match store.pool() {
        StorePool::Postgres(pool) => {
            let mut tx = pool.begin().await?;
            for &(italian, english) in pairs {
                let existing: Option<i32> =
                    sqlx::query_scalar("SELECT id FROM translations WHERE italian_word = $1 LIMIT 1")
                        .bind(italian)
                        .fetch_optional(&mut *tx)
                        .await?;
                if existing.is_none() {
                    sqlx::query("INSERT INTO translations (italian_word, english_word) VALUES ($1, $2)")
                        .bind(italian)
                        .bind(english)
                        .execute(&mut *tx)
                        .await?;
                    inserted += 1;
                }
            }
            tx.commit().await?;
        }
        StorePool::Sqlite(pool) => {
            let mut tx = pool.begin().await?;
            for &(italian, english) in pairs {
                let existing: Option<i64> =
                    sqlx::query_scalar("SELECT id FROM translations WHERE italian_word = ? LIMIT 1")
                        .bind(italian)
                        .fetch_optional(&mut *tx)
                        .await?;
                if existing.is_none() {
                    sqlx::query("INSERT INTO translations (italian_word, english_word) VALUES (?, ?)")
                        .bind(italian)
                        .bind(english)
                        .execute(&mut *tx)
                        .await?;
                    inserted += 1;
                }
            }
            tx.commit().await?;
        }
    }

    Ok(inserted)
}

fn map_pg_word(row: &PgRow) -> Word {
    let created_at: NaiveDateTime = row
        .try_get("created_at")
        .unwrap_or_else(|_| Utc::now().naive_utc());
    Word {
        id: row.try_get::<i32, _>("id").unwrap_or_default() as i64,
        italian_word: row.try_get("italian_word").unwrap_or_default(),
        english_word: row.try_get("english_word").unwrap_or_default(),
        created_at: format_naive_iso(created_at),
    }
}

fn map_sqlite_word(row: &SqliteRow) -> Word {
    let created_at: NaiveDateTime = row
        .try_get("created_at")
        .unwrap_or_else(|_| Utc::now().naive_utc());
    Word {
        id: row.try_get("id").unwrap_or_default(),
        italian_word: row.try_get("italian_word").unwrap_or_default(),
        english_word: row.try_get("english_word").unwrap_or_default(),
        created_at: format_naive_iso(created_at),
    }
}

fn format_naive_iso(value: NaiveDateTime) -> String {
    DateTime::<Utc>::from_naive_utc_and_offset(value, Utc).to_rfc3339_opts(SecondsFormat::Millis, true)
}
