//! `todos` table definition and the row type read from it

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// Todo record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: i64,
    pub complete: bool,
}

/// AUTOINCREMENT keeps ids of deleted rows from being handed out again.
/// The CHECK constraints mirror `NewTodo` validation.
const CREATE_TODOS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL CHECK (length(title) >= 3),
    description TEXT NOT NULL CHECK (length(description) BETWEEN 1 AND 100),
    priority INTEGER NOT NULL CHECK (priority BETWEEN 1 AND 5),
    complete BOOLEAN NOT NULL DEFAULT FALSE
)
"#;

/// Create the `todos` table if it does not exist yet.
pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring todos table exists");

    sqlx::query(CREATE_TODOS_TABLE).execute(pool).await?;

    Ok(())
}
