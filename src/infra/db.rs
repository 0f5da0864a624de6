//! SQLite connection, migrations and scoped transactions.

use crate::error::AppError;
use rusqlite::{Connection, Transaction};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub struct DbPool(pub Mutex<Connection>);

/// Initialize DB at path, run migrations, return managed pool.
pub fn init_db(db_path: &Path) -> Result<DbPool, AppError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    log::info!("DB path: {:?}", db_path);
    let mut conn = Connection::open(db_path)?;
    run_migrations(&mut conn)?;
    Ok(DbPool(Mutex::new(conn)))
}

/// In-memory database with the full schema, for tests.
pub fn init_test_db() -> DbPool {
    let mut conn = Connection::open_in_memory().expect("open in-memory db");
    run_migrations(&mut conn).expect("run migrations");
    DbPool(Mutex::new(conn))
}

fn run_migrations(conn: &mut Connection) -> Result<(), AppError> {
    let tx = conn.transaction()?;

    // Ensure schema_migrations exists (first run)
    tx.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL DEFAULT (datetime('now')))",
        [],
    )?;

    let applied: Vec<i32> = tx
        .prepare("SELECT version FROM schema_migrations ORDER BY version")?
        .query_map([], |r| r.get(0))?
        .collect::<Result<Vec<_>, _>>()?;

    const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("../../migrations/0001_init.sql"))];

    for (version, sql) in MIGRATIONS {
        if applied.contains(version) {
            continue;
        }
        // The script's own bookkeeping INSERT is replaced by ours below
        let statements = sql
            .split(';')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && !s.contains("INSERT INTO schema_migrations"));
        for stmt in statements {
            tx.execute(stmt, [])?;
        }
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, datetime('now'))",
            [version],
        )?;
        log::info!("applied migration {}", version);
    }

    tx.commit()?;
    Ok(())
}

/// Lock the shared connection.
pub fn get_connection(pool: &DbPool) -> Result<MutexGuard<'_, Connection>, AppError> {
    pool.0
        .lock()
        .map_err(|_| AppError::Db("database connection lock poisoned".into()))
}

/// Run `f` inside one transaction: commit on `Ok`, roll back on `Err`.
///
/// The connection stays locked for the whole unit of work, so each call is
/// one scoped session against the store. Dropping the transaction without
/// committing (error return or unwind) rolls it back.
pub fn with_transaction<T, F>(pool: &DbPool, f: F) -> Result<T, AppError>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, AppError>,
{
    let mut conn = get_connection(pool)?;
    let tx = conn.transaction()?;
    let out = f(&tx)?;
    tx.commit()?;
    Ok(out)
}
