pub mod todo_model;

use std::time::Duration;

use diesel::{
    connection::SimpleConnection,
    r2d2::{ConnectionManager, CustomizeConnection},
    SqliteConnection,
};

use crate::api::errors::TodoApiError;

pub type Pool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

const CREATE_TODOS_TABLE: &str = "CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    to_do_name TEXT NOT NULL DEFAULT ''
)";

/// Applied to every connection handed out by the pool
#[derive(Debug)]
struct SqlitePragmas {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA foreign_keys = ON;",
            self.busy_timeout.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Build a connection pool for the sqlite database at `database_url`
///
/// # Arguments
/// * `database_url` path of the database file, or `:memory:`
/// * `max_size` max number of open connections
pub fn build_pool(database_url: &str, max_size: u32) -> Result<Pool, r2d2::Error> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(SqlitePragmas {
            busy_timeout: Duration::from_secs(5),
        }))
        .build(manager)
}

/// Create the `todos` table if it does not exist yet
pub fn run_migrations(pool: &Pool) -> Result<(), TodoApiError> {
    let conn = pool.get()?;

    conn.batch_execute(CREATE_TODOS_TABLE)?;

    Ok(())
}

#[cfg(test)]
pub(crate) fn test_pool() -> Pool {
    // every in-memory connection is its own database, so tests share a single one
    let pool = build_pool(":memory:", 1).unwrap();

    run_migrations(&pool).unwrap();

    pool
}

#[cfg(test)]
pub(crate) fn file_pool(dir: &tempfile::TempDir, max_size: u32) -> Pool {
    let path = dir.path().join("todos.sqlite");
    let pool = build_pool(path.to_str().unwrap(), max_size).unwrap();

    run_migrations(&pool).unwrap();

    pool
}
