//! SQLite storage for the history of processed images.
//!
//! The connection pool lives inside a [`Database`] value that callers create
//! once and pass to every operation, so several databases can be open in the
//! same process (tests rely on this).
//!
//! # Examples
//! ```no_run
//! use sqldb::{Database, history};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let db = Database::create("/path/to/imagefx.db").await?;
//!     history::new(&db).await?;
//!
//!     let record = history::NewRecord::new("a1b2.png", "c3d4.png", "sepia");
//!     let id = history::insert(&db, &record).await?;
//!     println!("saved record {id}");
//!
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result, bail};
use sqlx::{
    Pool,
    migrate::MigrateDatabase,
    sqlite::{Sqlite, SqlitePoolOptions},
};

pub mod history;

/// Maximum number of concurrent database connections in the pool
const MAX_CONNECTIONS: u32 = 3;

/// Handle to an open SQLite database.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create the database file if it doesn't exist and open a pool on it.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or the pool cannot
    /// connect.
    pub async fn create(db_path: impl AsRef<str>) -> Result<Self> {
        let db_path = db_path.as_ref();

        if !Sqlite::database_exists(db_path).await.unwrap_or(false) {
            Sqlite::create_database(db_path)
                .await
                .with_context(|| format!("create database {db_path} failed"))?;
            log::info!("created database {db_path}");
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(&format!("sqlite:{}", db_path))
            .await
            .with_context(|| format!("connect to {db_path} failed"))?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Check if a table exists in the database
    ///
    /// # Errors
    /// Returns an error if the query fails or the table does not exist.
    pub async fn is_table_exist(&self, table_name: &str) -> Result<()> {
        let found: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name=?")
                .bind(table_name)
                .fetch_optional(&self.pool)
                .await?;

        if found.is_none() {
            bail!("table {table_name} does not exist");
        }

        Ok(())
    }

    /// Drop a table from the database
    ///
    /// # Warning
    /// This operation is destructive and cannot be undone.
    pub async fn drop_table(&self, table_name: &str) -> Result<()> {
        sqlx::query(&format!("DROP TABLE {}", table_name))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
