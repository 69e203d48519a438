//! SQLite connection pool and schema bootstrap.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::StoreResult;

/// Path understood as "in-memory database" instead of a file.
pub const IN_MEMORY_PATH: &str = ":memory:";

pub(crate) const USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    complete_name VARCHAR(63) NOT NULL,
    sex           BOOLEAN NOT NULL,
    birth_day     TEXT NOT NULL,
    password      CHAR(255) NOT NULL
)
"#;

pub(crate) const CARS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS cars (
    id           INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    number_plate VARCHAR(31) NOT NULL,
    color        VARCHAR(15) NOT NULL,
    vin          VARCHAR(31) NOT NULL,
    owner_id     INTEGER NOT NULL,
    CONSTRAINT cars_vin_unique UNIQUE (vin),
    CONSTRAINT cars_number_plate_unique UNIQUE (number_plate),
    FOREIGN KEY (owner_id) REFERENCES users (id) ON DELETE CASCADE ON UPDATE CASCADE
)
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// File path of the database, or `:memory:`.
    pub path: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            max_connections: 5,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: IN_MEMORY_PATH.to_string(),
            max_connections: 1,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_PATH
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::file("fleetreg.db")
    }
}

/// Open a pool with foreign keys enforced on every connection.
///
/// An in-memory database lives as long as its connection, so it is pinned to
/// a single connection that never idles out.
pub async fn connect(config: &DatabaseConfig) -> StoreResult<SqlitePool> {
    let base = if config.is_in_memory() {
        SqliteConnectOptions::from_str("sqlite::memory:")?
    } else {
        SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
    };
    let options = base.foreign_keys(true);

    let pool_options = if config.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections.max(1))
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::info!(path = %config.path, "database pool opened");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_config_is_single_connection() {
        let config = DatabaseConfig::in_memory();
        assert!(config.is_in_memory());
        assert_eq!(config.max_connections, 1);
        assert!(!DatabaseConfig::default().is_in_memory());
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced_on_pooled_connections() {
        let pool = connect(&DatabaseConfig::in_memory()).await.unwrap();
        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
