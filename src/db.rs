//! MySQL collaborator: connection bootstrap, users-table DDL, and the
//! classified insert used by the ingestion loop.

use anyhow::{Context, Result};
use log::debug;
use sqlx::{
    Connection, Executor,
    mysql::{MySqlConnectOptions, MySqlConnection},
};

use crate::{cli::Credentials, row::NormalizedUser, sink::IngestResult};

const USERS_TABLE_DDL: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id INT AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    surname VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci";

/// A single open MySQL session. The whole run shares one connection; rows
/// are inserted sequentially through it.
pub struct Database {
    conn: MySqlConnection,
}

impl Database {
    /// Opens a server-level connection (no database selected yet).
    pub async fn connect(creds: &Credentials) -> Result<Self> {
        let options = MySqlConnectOptions::new()
            .host(&creds.host)
            .username(&creds.user)
            .password(&creds.password);
        let conn = MySqlConnection::connect_with(&options)
            .await
            .with_context(|| format!("Connecting to MySQL at '{}'", creds.host))?;
        Ok(Self { conn })
    }

    /// Creates the `users` database when absent and selects it.
    pub async fn ensure_database(&mut self) -> Result<()> {
        self.conn
            .execute("CREATE DATABASE IF NOT EXISTS users")
            .await
            .context("Creating database 'users'")?;
        self.conn
            .execute("USE users")
            .await
            .context("Selecting database 'users'")?;
        Ok(())
    }

    /// Drops any existing `users` table and creates it fresh.
    pub async fn recreate_users_table(&mut self) -> Result<()> {
        self.conn
            .execute("DROP TABLE IF EXISTS users")
            .await
            .context("Dropping existing users table")?;
        self.conn
            .execute(USERS_TABLE_DDL)
            .await
            .context("Creating users table")?;
        Ok(())
    }

    /// Inserts one user, classifying the outcome instead of propagating it:
    /// a unique-key violation on email is a duplicate, anything else a
    /// generic database error. The insert statement is prepared once and
    /// reused across rows through the connection's statement cache.
    pub async fn insert_user(&mut self, user: &NormalizedUser) -> IngestResult {
        let result = sqlx::query("INSERT INTO users (name, surname, email) VALUES (?, ?, ?)")
            .bind(&user.name)
            .bind(&user.surname)
            .bind(&user.email)
            .execute(&mut self.conn)
            .await;
        match result {
            Ok(_) => IngestResult::Inserted,
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                debug!("unique violation for '{}'", user.email);
                IngestResult::DuplicateSkipped
            }
            Err(err) => IngestResult::DatabaseError(err.to_string()),
        }
    }
}
