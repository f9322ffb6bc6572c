//! Local user-data store.
//!
//! A per-profile SQLite database holding the three collections the app keeps
//! on the device: cached word records, recent searches, and favorites. This
//! is what makes lookups work offline and what survives restarts.
//!
//! Design points:
//!
//! - **Handle, not singleton.** [`UserDataStore`] is constructed from a
//!   database path and passed by reference to whoever needs it; tests build
//!   isolated stores against temp directories.
//! - **Scoped connections.** Every operation opens a fresh connection, runs
//!   one transaction over the collections it touches, and closes the pool on
//!   every exit path. Nothing is held across operations.
//! - **Versioned schema.** The schema version lives in SQLite's
//!   `PRAGMA user_version`. Opening a database with an older version runs the
//!   additive migration; a newer version is a [`StorageError::VersionConflict`].
//! - **Absence is not an error.** Lookups return `Ok(None)` / `Ok(false)`;
//!   `StorageError` is reserved for engine-level failures.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use tracing::debug;

use crate::models::Word;

/// Current schema version, persisted in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i32 = 1;

/// Maximum number of logical (distinct-word) recent-search entries.
pub const RECENT_SEARCHES_CAP: usize = 20;

/// SQLite extended result code for a full database or filesystem.
const SQLITE_FULL: &str = "13";

/// Failures surfaced by the store.
///
/// Callers are expected to degrade gracefully: a store failure only costs
/// offline availability or a convenience feature, never a word lookup.
#[derive(Debug, Error)]
pub enum StorageError {
    /// `cache_word` was handed a record with an empty word text.
    #[error("word record has an empty word text")]
    EmptyKey,

    /// Write rejected because the database or filesystem is full.
    #[error("storage quota exceeded")]
    QuotaExceeded(#[source] sqlx::Error),

    /// The database was created by a newer build of the app.
    #[error("database schema version {found} is newer than supported version {supported}")]
    VersionConflict { found: i32, supported: i32 },

    /// Could not open the database at all (missing directory permissions,
    /// locked file, unreadable path).
    #[error("storage engine unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// Could not create the database's parent directory.
    #[error("storage path unusable: {0}")]
    Path(#[from] std::io::Error),

    /// A cached payload failed to encode or decode.
    #[error("cached record is not valid JSON: {0}")]
    Codec(#[from] serde_json::Error),

    /// Any other engine failure.
    #[error("storage engine error: {0}")]
    Engine(#[from] sqlx::Error),
}

/// Classify a write failure, promoting SQLITE_FULL to `QuotaExceeded`.
fn classify_write(err: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(SQLITE_FULL) {
            return StorageError::QuotaExceeded(err);
        }
    }
    StorageError::Engine(err)
}

/// Handle to the per-profile user-data database.
///
/// Cheap to clone conceptually (it only holds the path); each operation
/// acquires and releases its own connection.
pub struct UserDataStore {
    path: PathBuf,
}

impl UserDataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the database and make sure the schema is current. Used by
    /// `fsr init`; every operation performs the same steps internally, so
    /// calling this up front is optional and idempotent.
    pub async fn init(&self) -> Result<(), StorageError> {
        let pool = self.open().await?;
        pool.close().await;
        Ok(())
    }

    /// Upsert a full word record into the word cache, stamping the current
    /// time. Overwrites any existing record for the same word text.
    pub async fn cache_word(&self, word: &Word) -> Result<(), StorageError> {
        if word.word.is_empty() {
            return Err(StorageError::EmptyKey);
        }
        let data = serde_json::to_string(word)?;

        let pool = self.open().await?;
        let result = sqlx::query(
            "INSERT OR REPLACE INTO word_cache (word, data, cached_at) VALUES (?, ?, ?)",
        )
        .bind(&word.word)
        .bind(&data)
        .bind(Utc::now().timestamp_millis())
        .execute(&pool)
        .await
        .map(|_| ())
        .map_err(classify_write);
        pool.close().await;

        if result.is_ok() {
            debug!(word = %word.word, "cached word record");
        }
        result
    }

    /// Look up a cached word record. Absence is `Ok(None)`.
    pub async fn cached_word(&self, text: &str) -> Result<Option<Word>, StorageError> {
        let pool = self.open().await?;
        let result = sqlx::query_scalar::<_, String>("SELECT data FROM word_cache WHERE word = ?")
            .bind(text)
            .fetch_optional(&pool)
            .await
            .map_err(StorageError::Engine);
        pool.close().await;

        match result? {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    /// Mark a word as favorite. Idempotent: favoriting an already-favorited
    /// word overwrites the record (and refreshes its added-at time).
    pub async fn add_favorite(&self, word: &str) -> Result<(), StorageError> {
        let pool = self.open().await?;
        let result = sqlx::query("INSERT OR REPLACE INTO favorites (word, added_at) VALUES (?, ?)")
            .bind(word)
            .bind(Utc::now().timestamp_millis())
            .execute(&pool)
            .await
            .map(|_| ())
            .map_err(classify_write);
        pool.close().await;
        result
    }

    /// Remove a word from favorites. Succeeds even if it was never added.
    pub async fn remove_favorite(&self, word: &str) -> Result<(), StorageError> {
        let pool = self.open().await?;
        let result = sqlx::query("DELETE FROM favorites WHERE word = ?")
            .bind(word)
            .execute(&pool)
            .await
            .map(|_| ())
            .map_err(StorageError::Engine);
        pool.close().await;
        result
    }

    /// Membership test for the favorites collection.
    pub async fn is_favorite(&self, word: &str) -> Result<bool, StorageError> {
        let pool = self.open().await?;
        let result =
            sqlx::query_scalar::<_, bool>("SELECT COUNT(*) > 0 FROM favorites WHERE word = ?")
                .bind(word)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::Engine);
        pool.close().await;
        result
    }

    /// All favorited word texts. Order is whatever the engine returns.
    pub async fn favorites(&self) -> Result<Vec<String>, StorageError> {
        let pool = self.open().await?;
        let result = sqlx::query_scalar::<_, String>("SELECT word FROM favorites")
            .fetch_all(&pool)
            .await
            .map_err(StorageError::Engine);
        pool.close().await;
        result
    }

    /// Record a search for `word`, deduplicating by word text and pruning the
    /// collection to [`RECENT_SEARCHES_CAP`] logical entries.
    ///
    /// All reads and writes happen in a single read-write transaction:
    ///
    /// 1. snapshot the full collection;
    /// 2. if the word is already present, delete its old row (the re-insert
    ///    below moves it to most-recent);
    /// 3. insert a fresh row with a store-assigned id and the current time;
    /// 4. if the snapshot already held `CAP` or more rows, delete every
    ///    snapshot row past the `CAP - 1` most recent ones.
    ///
    /// The prune in step 4 deliberately operates on the pre-insert snapshot,
    /// so the stored count can transiently reach `CAP + 1` at the exact
    /// boundary; the next insert corrects it. This mirrors the documented
    /// eventually-consistent cap rather than enforcing a strict one.
    pub async fn add_recent_search(&self, word: &str) -> Result<(), StorageError> {
        let pool = self.open().await?;
        let result = add_recent_search_tx(&pool, word).await;
        pool.close().await;
        result
    }

    /// Recent search words, most recent first.
    pub async fn recent_searches(&self) -> Result<Vec<String>, StorageError> {
        let pool = self.open().await?;
        // Timestamps can tie under rapid inserts; the auto-assigned id is
        // monotonic, so it serves as the recency tie-break.
        let result = sqlx::query_scalar::<_, String>(
            "SELECT word FROM recent_searches ORDER BY searched_at DESC, id DESC",
        )
        .fetch_all(&pool)
        .await
        .map_err(StorageError::Engine);
        pool.close().await;
        result
    }

    /// Delete every recent-search record.
    pub async fn clear_recent_searches(&self) -> Result<(), StorageError> {
        let pool = self.open().await?;
        let result = sqlx::query("DELETE FROM recent_searches")
            .execute(&pool)
            .await
            .map(|_| ())
            .map_err(StorageError::Engine);
        pool.close().await;
        result
    }

    /// Open a fresh connection for one operation and ensure the schema is
    /// current. The caller must close the returned pool on every exit path.
    async fn open(&self) -> Result<SqlitePool, StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", self.path.display()))
            .map_err(StorageError::Unavailable)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(StorageError::Unavailable)?;

        if let Err(e) = ensure_schema(&pool).await {
            pool.close().await;
            return Err(e);
        }

        Ok(pool)
    }
}

/// Run the additive migration if the stored schema version is behind, and
/// refuse to touch databases from a newer build.
async fn ensure_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    let found: i32 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;

    if found > SCHEMA_VERSION {
        return Err(StorageError::VersionConflict {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    debug!(found, wanted = SCHEMA_VERSION, "migrating user-data schema");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS word_cache (
            word TEXT PRIMARY KEY,
            data TEXT NOT NULL,
            cached_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recent_searches (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            word TEXT NOT NULL,
            searched_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS favorites (
            word TEXT PRIMARY KEY,
            added_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // PRAGMA does not support bind parameters.
    sqlx::query(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
        .execute(pool)
        .await?;

    Ok(())
}

async fn add_recent_search_tx(pool: &SqlitePool, word: &str) -> Result<(), StorageError> {
    let mut tx = pool.begin().await?;

    // (id, word, searched_at) snapshot of the whole collection.
    let snapshot: Vec<(i64, String, i64)> =
        sqlx::query_as("SELECT id, word, searched_at FROM recent_searches")
            .fetch_all(&mut *tx)
            .await?;

    if let Some((existing_id, _, _)) = snapshot.iter().find(|(_, w, _)| w == word) {
        sqlx::query("DELETE FROM recent_searches WHERE id = ?")
            .bind(existing_id)
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query("INSERT INTO recent_searches (word, searched_at) VALUES (?, ?)")
        .bind(word)
        .bind(Utc::now().timestamp_millis())
        .execute(&mut *tx)
        .await
        .map_err(classify_write)?;

    if snapshot.len() >= RECENT_SEARCHES_CAP {
        let mut ordered = snapshot;
        // Timestamp descending, id as the tie-break (ids are monotonic).
        ordered.sort_by(|a, b| (b.2, b.0).cmp(&(a.2, a.0)));
        // Keep the CAP - 1 most recent snapshot rows; together with the row
        // just inserted that makes CAP. Deleting an id that step 2 already
        // removed is a no-op.
        for (id, _, _) in ordered.iter().skip(RECENT_SEARCHES_CAP - 1) {
            sqlx::query("DELETE FROM recent_searches WHERE id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;
    Ok(())
}
