//! Database connection manager backed by an r2d2 SQLite pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection};
use slotwise_domain::{DatabaseConfig, Result};
use tracing::{info, instrument};

use crate::errors::conversions::to_domain;

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

pub type SqlitePool = Pool<SqliteConnectionManager>;
pub type SqliteConnection = PooledConnection<SqliteConnectionManager>;

/// Owns the connection pool for one database file.
///
/// Every process that opens the same file shares its write lock, so
/// `BEGIN IMMEDIATE` transactions are serialized across all of them.
pub struct DbManager {
    pool: SqlitePool,
    path: PathBuf,
}

impl DbManager {
    /// Opens (creating if needed) the database at `db_path`.
    #[instrument(skip_all, fields(db_path = %db_path.as_ref().display()))]
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32, busy_timeout: Duration) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();

        let manager = SqliteConnectionManager::file(&path)
            .with_init(move |conn| apply_connection_pragmas(conn, busy_timeout));

        let pool = Pool::builder()
            .max_size(pool_size.max(1))
            .connection_timeout(CONNECTION_TIMEOUT)
            .build(manager)
            .map_err(to_domain)?;

        info!(max_connections = pool.max_size(), "sqlite pool initialised");

        Ok(Self { pool, path })
    }

    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::new(&config.path, config.pool_size, Duration::from_millis(config.busy_timeout_ms))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn get_connection(&self) -> Result<SqliteConnection> {
        self.pool.get().map_err(to_domain)
    }

    /// Runs `work` with a pooled connection on the blocking thread pool.
    pub async fn run<F, T>(self: &Arc<Self>, work: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            let mut conn = db.get_connection()?;
            work(&mut conn)
        })
        .await
        .map_err(to_domain)?
    }

    /// Ensure the full schema exists on the current database.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.execute_batch(SCHEMA_SQL).map_err(to_domain)?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, CAST(strftime('%s','now') AS INTEGER))",
            params![SCHEMA_VERSION],
        )
        .map_err(to_domain)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquires a connection and runs a trivial query.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", params![], |row| row.get::<_, i32>(0)).map_err(to_domain)?;
        Ok(())
    }
}

/// Busy timeout first, so the remaining pragmas wait out a concurrent opener.
fn apply_connection_pragmas(conn: &mut Connection, busy_timeout: Duration) -> rusqlite::Result<()> {
    conn.busy_timeout(busy_timeout)?;
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn manager(dir: &TempDir) -> DbManager {
        DbManager::new(dir.path().join("test.db"), 4, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn migrations_create_schema_version() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);
        manager.run_migrations().unwrap();
        manager.run_migrations().unwrap();

        let conn = manager.get_connection().unwrap();
        let version: i32 =
            conn.query_row("SELECT version FROM schema_version", [], |row| row.get(0)).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn connections_use_wal_journal() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);

        let conn = manager.get_connection().unwrap();
        let mode: String =
            conn.pragma_query_value(None, "journal_mode", |row| row.get(0)).unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn health_check_succeeds_for_valid_database() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir);
        manager.run_migrations().unwrap();
        manager.health_check().unwrap();
        assert!(manager.path().ends_with("test.db"));
    }
}
