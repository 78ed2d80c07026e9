use chrono::{SecondsFormat, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::core::error::{AppError, AppResult};

/// A single posted status. Immutable once written; there is no update or
/// delete path anywhere in the application.
#[derive(Debug, Clone)]
pub struct StatusRecord {
    /// Server-generated record id (UUID v4)
    pub id: String,
    /// Identifier of the posting user, supplied by the client as-is
    pub user_id: String,
    /// Display name, supplied by the client as-is
    pub name: String,
    /// Free-text status body
    pub status: String,
    /// Server-assigned RFC 3339 UTC timestamp
    pub created_at: String,
}

/// A user document. Unrelated to statuses; create and fetch-by-id only.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub role: String,
    pub created_at: String,
}

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Create a new database connection pool
///
/// Initializes a connection pool with up to 10 connections and ensures the
/// schema exists on the first connection.
///
/// # Arguments
///
/// * `database_path` - Path to SQLite database file
pub fn create_pool(database_path: &str) -> AppResult<DbPool> {
    let manager = SqliteConnectionManager::file(database_path);
    let pool = Pool::builder().max_size(10).build(manager)?;

    let conn = pool.get()?;
    migrate_schema(&conn)?;

    Ok(pool)
}

/// Get a connection from the pool
///
/// The connection is automatically returned to the pool when dropped.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, r2d2::Error> {
    pool.get()
}

/// Ensure the statuses and users tables exist.
///
/// `CREATE TABLE IF NOT EXISTS` keeps this idempotent, so it is safe to run
/// on every startup.
pub fn migrate_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS statuses (
             id         TEXT PRIMARY KEY,
             user_id    TEXT NOT NULL,
             name       TEXT NOT NULL,
             status     TEXT NOT NULL,
             created_at TEXT NOT NULL
         );
         CREATE INDEX IF NOT EXISTS idx_statuses_user_created
             ON statuses (user_id, created_at DESC);
         CREATE INDEX IF NOT EXISTS idx_statuses_created
             ON statuses (created_at DESC);
         CREATE TABLE IF NOT EXISTS users (
             id         TEXT PRIMARY KEY,
             name       TEXT NOT NULL,
             role       TEXT NOT NULL,
             created_at TEXT NOT NULL
         );",
    )?;
    Ok(())
}

/// Server-assigned timestamp for new records.
///
/// A fixed-width RFC 3339 UTC rendering, so lexicographic order in SQL equals
/// chronological order.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Insert a new status record.
///
/// Validates the store-level invariant that `user_id`, `name` and `status`
/// are all non-empty after trimming. Records are append-only: every call
/// produces a fresh UUID id, earlier posts by the same user are untouched.
pub fn insert_status(conn: &Connection, user_id: &str, name: &str, status: &str) -> AppResult<StatusRecord> {
    let user_id = user_id.trim();
    let name = name.trim();
    let status = status.trim();

    if user_id.is_empty() || name.is_empty() || status.is_empty() {
        return Err(AppError::Validation("id, name and status are required".to_string()));
    }

    let record = StatusRecord {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        name: name.to_string(),
        status: status.to_string(),
        created_at: now_timestamp(),
    };

    conn.execute(
        "INSERT INTO statuses (id, user_id, name, status, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![record.id, record.user_id, record.name, record.status, record.created_at],
    )?;

    Ok(record)
}

fn status_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StatusRecord> {
    Ok(StatusRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        status: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// The most recent statuses across all users, newest first.
///
/// `rowid` breaks ties between equal timestamps so insertion order survives.
pub fn latest_statuses(conn: &Connection, limit: usize) -> AppResult<Vec<StatusRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, status, created_at FROM statuses
         ORDER BY created_at DESC, rowid DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit as i64], status_from_row)?;
    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

/// One user's most recent statuses, newest first. Empty vec when the user
/// has never posted.
pub fn statuses_by_user(conn: &Connection, user_id: &str, limit: usize) -> AppResult<Vec<StatusRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, status, created_at FROM statuses
         WHERE user_id = ?1
         ORDER BY created_at DESC, rowid DESC LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![user_id, limit as i64], status_from_row)?;
    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

/// Create or replace a user document keyed by the client-supplied id.
///
/// Upsert semantics mirror the original document store: a repeated POST for
/// the same id overwrites the document, timestamp included.
pub fn upsert_user(conn: &Connection, id: &str, name: &str, role: &str) -> AppResult<UserRecord> {
    let id = id.trim();
    let name = name.trim();
    let role = role.trim();

    if id.is_empty() || name.is_empty() || role.is_empty() {
        return Err(AppError::Validation("id, name and role are required".to_string()));
    }

    let record = UserRecord {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        created_at: now_timestamp(),
    };

    conn.execute(
        "INSERT INTO users (id, name, role, created_at) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
             name = excluded.name,
             role = excluded.role,
             created_at = excluded.created_at",
        params![record.id, record.name, record.role, record.created_at],
    )?;

    Ok(record)
}

/// Fetch a user document by id. `Ok(None)` when it does not exist.
pub fn get_user(conn: &Connection, id: &str) -> AppResult<Option<UserRecord>> {
    let user = conn
        .query_row(
            "SELECT id, name, role, created_at FROM users WHERE id = ?1",
            params![id],
            |row| {
                Ok(UserRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    role: row.get(2)?,
                    created_at: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        migrate_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn insert_then_list_by_user_returns_record_first() {
        let conn = test_conn();

        insert_status(&conn, "u1", "Ann", "older post").unwrap();
        let created = insert_status(&conn, "u1", "Ann", "hi").unwrap();

        let records = statuses_by_user(&conn, "u1", 3).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, created.id);
        assert_eq!(records[0].status, "hi");
    }

    #[test]
    fn latest_is_capped_and_descending() {
        let conn = test_conn();
        for i in 1..=5 {
            insert_status(&conn, &format!("u{i}"), "User", &format!("status {i}")).unwrap();
        }

        let records = latest_statuses(&conn, 3).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].status, "status 5");
        assert_eq!(records[1].status, "status 4");
        assert_eq!(records[2].status, "status 3");

        let timestamps: Vec<&str> = records.iter().map(|r| r.created_at.as_str()).collect();
        let mut sorted = timestamps.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(timestamps, sorted);
    }

    #[test]
    fn latest_on_empty_store_is_empty_not_error() {
        let conn = test_conn();
        let records = latest_statuses(&conn, 3).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn empty_fields_are_rejected_and_nothing_is_persisted() {
        let conn = test_conn();

        for (user_id, name, status) in [("", "Ann", "hi"), ("u1", "", "hi"), ("u1", "Ann", ""), ("u1", "Ann", "   ")] {
            let err = insert_status(&conn, user_id, name, status).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }

        assert!(latest_statuses(&conn, 3).unwrap().is_empty());
    }

    #[test]
    fn statuses_are_filtered_to_the_requested_user() {
        let conn = test_conn();
        insert_status(&conn, "u1", "Ann", "mine").unwrap();
        insert_status(&conn, "u2", "Ben", "theirs").unwrap();

        let records = statuses_by_user(&conn, "u1", 3).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, "mine");

        assert!(statuses_by_user(&conn, "u3", 3).unwrap().is_empty());
    }

    #[test]
    fn user_upsert_overwrites_previous_document() {
        let conn = test_conn();

        upsert_user(&conn, "u1", "Ann", "admin").unwrap();
        upsert_user(&conn, "u1", "Ann B", "member").unwrap();

        let user = get_user(&conn, "u1").unwrap().unwrap();
        assert_eq!(user.name, "Ann B");
        assert_eq!(user.role, "member");

        assert!(get_user(&conn, "missing").unwrap().is_none());
    }

    #[test]
    fn user_upsert_requires_all_fields() {
        let conn = test_conn();
        let err = upsert_user(&conn, "u1", "Ann", "").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
