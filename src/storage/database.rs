//! SQLite Database
//!
//! Embedded database for interview summaries and case context, using rusqlite
//! with r2d2 connection pooling.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::case::Case;
use crate::models::interview::{
    normalize_timestamp, now_timestamp, InterviewSummary, InterviewTags, MAX_RATING,
};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{database_path, ensure_dir};

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

const SUMMARY_COLUMNS: &str =
    "id, expert_id, script, transcript, notes, created_at, tags_json, interview_rating";

/// Database service for managing SQLite operations
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Serializes upserts; readers go straight to the pool
    write_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("pool_size", &self.pool.max_size())
            .finish()
    }
}

impl Database {
    /// Create a database from an existing connection pool and initialize the schema
    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        let db = Self {
            pool,
            write_lock: Arc::new(Mutex::new(())),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Create an in-memory database for testing.
    ///
    /// The pool holds a single connection so every operation sees the same
    /// in-memory database.
    pub fn new_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::storage(format!("Failed to create connection pool: {}", e)))?;
        Self::from_pool(pool)
    }

    /// Open (or create) the database at the default location
    pub fn new() -> AppResult<Self> {
        Self::open(&database_path()?)
    }

    /// Open (or create) a database file, creating parent directories as needed
    pub fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_dir(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder()
            .max_size(4)
            .build(manager)
            .map_err(|e| AppError::storage(format!("Failed to create connection pool: {}", e)))?;

        tracing::info!(path = %path.display(), "Opened interview database");
        Self::from_pool(pool)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self.get_connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS interview_summaries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                expert_id TEXT NOT NULL,
                script TEXT NOT NULL,
                transcript TEXT NOT NULL,
                notes TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                tags_json TEXT NOT NULL DEFAULT '{}',
                interview_rating INTEGER
            )",
            [],
        )?;

        // Migration: databases created before tags and ratings were stored
        if !Self::table_has_column(&conn, "interview_summaries", "tags_json") {
            conn.execute_batch(
                "ALTER TABLE interview_summaries ADD COLUMN tags_json TEXT NOT NULL DEFAULT '{}';
                 ALTER TABLE interview_summaries ADD COLUMN interview_rating INTEGER;",
            )?;
        }

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_interview_summaries_created_at
             ON interview_summaries(created_at)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS cases (
                case_code TEXT PRIMARY KEY,
                objective TEXT NOT NULL DEFAULT '',
                scope TEXT NOT NULL DEFAULT '',
                notes TEXT NOT NULL DEFAULT '',
                industry TEXT NOT NULL DEFAULT '',
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Check whether a table has a given column (via PRAGMA table_info).
    fn table_has_column(conn: &Connection, table: &str, column: &str) -> bool {
        let sql = format!("PRAGMA table_info({})", table);
        if let Ok(mut stmt) = conn.prepare(&sql) {
            if let Ok(rows) = stmt.query_map([], |row| row.get::<_, String>(1)) {
                for row in rows.flatten() {
                    if row == column {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> AppResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| AppError::storage(format!("Failed to get connection: {}", e)))
    }

    /// Check if the database is healthy
    pub fn is_healthy(&self) -> bool {
        if let Ok(conn) = self.pool.get() {
            conn.query_row("SELECT 1", [], |_| Ok(())).is_ok()
        } else {
            false
        }
    }

    fn lock_writes(&self) -> AppResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| AppError::storage("Write lock poisoned"))
    }

    // ========================================================================
    // Cases
    // ========================================================================

    /// Insert or replace a case, keyed by case code
    pub fn save_case(&self, case: &Case) -> AppResult<()> {
        let _guard = self.lock_writes()?;
        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO cases (case_code, objective, scope, notes, industry, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(case_code) DO UPDATE SET
                objective = excluded.objective,
                scope = excluded.scope,
                notes = excluded.notes,
                industry = excluded.industry,
                updated_at = excluded.updated_at",
            params![
                case.case_code,
                case.objective,
                case.scope,
                case.notes,
                case.industry,
                now_timestamp()
            ],
        )?;
        tracing::debug!(case_code = %case.case_code, "Saved case");
        Ok(())
    }

    /// Load a case by code
    pub fn load_case(&self, case_code: &str) -> AppResult<Option<Case>> {
        let conn = self.get_connection()?;
        let case = conn
            .query_row(
                "SELECT case_code, objective, scope, notes, industry
                 FROM cases WHERE case_code = ?1",
                params![case_code],
                |row| {
                    Ok(Case {
                        case_code: row.get(0)?,
                        objective: row.get(1)?,
                        scope: row.get(2)?,
                        notes: row.get(3)?,
                        industry: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(case)
    }

    // ========================================================================
    // Interview summaries
    // ========================================================================

    /// Insert a summary, or overwrite the row with the same id when one is set.
    ///
    /// `created_at` is stored in UTC with microseconds so listing order is
    /// chronological; a blank value is stamped with the current time.
    /// Returns the row id.
    pub fn save_summary(&self, summary: &InterviewSummary) -> AppResult<i64> {
        let created_at = if summary.created_at.trim().is_empty() {
            now_timestamp()
        } else {
            normalize_timestamp(&summary.created_at).map_err(|e| {
                AppError::invalid_input(format!(
                    "created_at '{}' is not an RFC 3339 timestamp: {}",
                    summary.created_at, e
                ))
            })?
        };
        if let Some(rating) = summary.rating {
            if rating > MAX_RATING {
                return Err(AppError::invalid_input(format!(
                    "interview rating must be 0-{}, got {}",
                    MAX_RATING, rating
                )));
            }
        }
        let tags_json = serde_json::to_string(&summary.tags)?;

        let _guard = self.lock_writes()?;
        let conn = self.get_connection()?;
        let id = match summary.id {
            Some(id) => {
                conn.execute(
                    "INSERT INTO interview_summaries
                        (id, expert_id, script, transcript, notes, created_at, tags_json, interview_rating)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                     ON CONFLICT(id) DO UPDATE SET
                        expert_id = excluded.expert_id,
                        script = excluded.script,
                        transcript = excluded.transcript,
                        notes = excluded.notes,
                        created_at = excluded.created_at,
                        tags_json = excluded.tags_json,
                        interview_rating = excluded.interview_rating",
                    params![
                        id,
                        summary.expert_id,
                        summary.script,
                        summary.transcript,
                        summary.notes,
                        created_at,
                        tags_json,
                        summary.rating
                    ],
                )?;
                id
            }
            None => {
                conn.execute(
                    "INSERT INTO interview_summaries
                        (expert_id, script, transcript, notes, created_at, tags_json, interview_rating)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        summary.expert_id,
                        summary.script,
                        summary.transcript,
                        summary.notes,
                        created_at,
                        tags_json,
                        summary.rating
                    ],
                )?;
                conn.last_insert_rowid()
            }
        };
        tracing::debug!(id, expert_id = %summary.expert_id, "Saved interview summary");
        Ok(id)
    }

    /// Every summary, newest first
    pub fn list_summaries(&self) -> AppResult<Vec<InterviewSummary>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM interview_summaries ORDER BY created_at DESC, id DESC",
            SUMMARY_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], row_to_summary)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// The `limit` newest summaries
    pub fn list_recent_summaries(&self, limit: u32) -> AppResult<Vec<InterviewSummary>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM interview_summaries ORDER BY created_at DESC, id DESC LIMIT ?1",
            SUMMARY_COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![limit], row_to_summary)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Load a summary by id
    pub fn load_summary(&self, id: i64) -> AppResult<Option<InterviewSummary>> {
        let conn = self.get_connection()?;
        let summary = conn
            .query_row(
                &format!(
                    "SELECT {} FROM interview_summaries WHERE id = ?1",
                    SUMMARY_COLUMNS
                ),
                params![id],
                row_to_summary,
            )
            .optional()?;
        Ok(summary)
    }
}

fn row_to_summary(row: &Row) -> rusqlite::Result<InterviewSummary> {
    let tags_json: String = row.get(6)?;
    let tags: InterviewTags = serde_json::from_str(&tags_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;
    Ok(InterviewSummary {
        id: Some(row.get(0)?),
        expert_id: row.get(1)?,
        script: row.get(2)?,
        transcript: row.get(3)?,
        notes: row.get(4)?,
        created_at: row.get(5)?,
        tags,
        rating: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_db() -> Database {
        Database::new_in_memory().unwrap()
    }

    fn summary_at(expert_id: &str, created_at: &str) -> InterviewSummary {
        InterviewSummary {
            created_at: created_at.to_string(),
            ..InterviewSummary::new(expert_id, "script", "transcript", "notes")
        }
    }

    #[test]
    fn test_database_health() {
        let db = create_test_db();
        assert!(db.is_healthy());
    }

    #[test]
    fn test_schema_init_is_idempotent() {
        let db = create_test_db();
        db.init_schema().unwrap();
        db.init_schema().unwrap();
        assert!(db.list_summaries().unwrap().is_empty());
    }

    #[test]
    fn test_case_round_trip_and_overwrite() {
        let db = create_test_db();
        assert!(db.load_case("CASE-001").unwrap().is_none());

        let mut case = Case::new("CASE-001", "market sizing");
        case.scope = "North America".to_string();
        db.save_case(&case).unwrap();
        assert_eq!(db.load_case("CASE-001").unwrap(), Some(case.clone()));

        case.objective = "pricing review".to_string();
        db.save_case(&case).unwrap();
        let loaded = db.load_case("CASE-001").unwrap().unwrap();
        assert_eq!(loaded.objective, "pricing review");

        let count: i64 = db
            .get_connection()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM cases", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_summary_round_trip() {
        let db = create_test_db();
        let summary = InterviewSummary::new("E1", "s", "t", "n");
        let id = db.save_summary(&summary).unwrap();

        let loaded = db.load_summary(id).unwrap().unwrap();
        assert_eq!(loaded.id, Some(id));
        assert_eq!(loaded.expert_id, "E1");
        assert_eq!(loaded.created_at, summary.created_at);
        assert!(db.load_summary(id + 100).unwrap().is_none());
    }

    #[test]
    fn test_save_summary_with_id_overwrites() {
        let db = create_test_db();
        let id = db.save_summary(&InterviewSummary::new("E1", "s", "t", "")).unwrap();

        let mut updated = db.load_summary(id).unwrap().unwrap();
        updated.notes = "revised".to_string();
        assert_eq!(db.save_summary(&updated).unwrap(), id);

        let all = db.list_summaries().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].notes, "revised");

        // An explicit id that does not exist yet is inserted as-is
        let fresh = InterviewSummary {
            id: Some(42),
            ..InterviewSummary::new("E2", "s", "t", "")
        };
        assert_eq!(db.save_summary(&fresh).unwrap(), 42);
        assert!(db.load_summary(42).unwrap().is_some());
    }

    #[test]
    fn test_blank_created_at_is_stamped() {
        let db = create_test_db();
        let id = db.save_summary(&summary_at("E1", "")).unwrap();
        let loaded = db.load_summary(id).unwrap().unwrap();
        assert!(!loaded.created_at.is_empty());
    }

    #[test]
    fn test_list_newest_first() {
        let db = create_test_db();
        let old = db
            .save_summary(&summary_at("E1", "2024-01-01T00:00:00.000000Z"))
            .unwrap();
        let new = db
            .save_summary(&summary_at("E2", "2024-06-01T00:00:00.000000Z"))
            .unwrap();
        let tie = db
            .save_summary(&summary_at("E3", "2024-06-01T00:00:00.000000Z"))
            .unwrap();

        let ids: Vec<i64> = db
            .list_summaries()
            .unwrap()
            .iter()
            .filter_map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![tie, new, old]);

        let recent = db.list_recent_summaries(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, Some(tie));
    }

    #[test]
    fn test_offset_timestamps_are_normalized_before_ordering() {
        let db = create_test_db();
        // 08:00Z written with an offset, then 09:00Z
        let older = db
            .save_summary(&summary_at("E1", "2025-03-01T10:00:00+02:00"))
            .unwrap();
        let newer = db
            .save_summary(&summary_at("E2", "2025-03-01T09:00:00.000000Z"))
            .unwrap();

        let listed = db.list_summaries().unwrap();
        let ids: Vec<i64> = listed.iter().filter_map(|s| s.id).collect();
        assert_eq!(ids, vec![newer, older]);
        assert_eq!(listed[1].created_at, "2025-03-01T08:00:00.000000Z");
    }

    #[test]
    fn test_unparsable_created_at_is_rejected() {
        let db = create_test_db();
        let err = db.save_summary(&summary_at("E1", "last tuesday")).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(db.list_summaries().unwrap().is_empty());
    }

    #[test]
    fn test_tags_and_rating_round_trip() {
        let db = create_test_db();
        let tags = InterviewTags {
            industries: vec!["Automation".to_string()],
            functions: vec!["Operations".to_string()],
            levels: vec!["C-suite".to_string()],
            topics: vec!["capex".to_string()],
        };
        let summary = InterviewSummary::new("E1", "s", "t", "n")
            .with_tags(tags.clone())
            .with_rating(8);
        let id = db.save_summary(&summary).unwrap();

        let loaded = db.load_summary(id).unwrap().unwrap();
        assert_eq!(loaded.tags, tags);
        assert_eq!(loaded.rating, Some(8));

        let unrated = db.save_summary(&InterviewSummary::new("E2", "s", "t", "")).unwrap();
        let loaded = db.load_summary(unrated).unwrap().unwrap();
        assert!(loaded.tags.is_empty());
        assert_eq!(loaded.rating, None);
    }

    #[test]
    fn test_rating_above_scale_is_rejected() {
        let db = create_test_db();
        let summary = InterviewSummary::new("E1", "s", "t", "n").with_rating(MAX_RATING + 1);
        assert!(matches!(
            db.save_summary(&summary),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_schema_migrates_legacy_summary_table() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("legacy.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TABLE interview_summaries (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    expert_id TEXT NOT NULL,
                    script TEXT NOT NULL,
                    transcript TEXT NOT NULL,
                    notes TEXT NOT NULL DEFAULT '',
                    created_at TEXT NOT NULL
                );
                INSERT INTO interview_summaries (expert_id, script, transcript, notes, created_at)
                VALUES ('E1', 's', 't', 'n', '2024-01-01T00:00:00.000000Z');",
            )
            .unwrap();
        }

        let db = Database::open(&path).unwrap();
        let legacy = db.list_summaries().unwrap();
        assert_eq!(legacy.len(), 1);
        assert!(legacy[0].tags.is_empty());
        assert_eq!(legacy[0].rating, None);
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, "plain file").unwrap();

        let err = Database::open(&blocker.join("et_interviews.db")).unwrap_err();
        assert!(err.is_storage_error(), "unexpected error: {err}");
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("et_interviews.db");
        {
            let db = Database::open(&path).unwrap();
            db.save_case(&Case::new("CASE-9", "persisted")).unwrap();
        }
        assert!(path.exists());

        let reopened = Database::open(&path).unwrap();
        let case = reopened.load_case("CASE-9").unwrap().unwrap();
        assert_eq!(case.objective, "persisted");
    }
}
