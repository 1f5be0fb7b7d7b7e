//! Todo repository
//!
//! - list: all rows, ascending id
//! - get: single row or NotFound
//! - create/update/delete: one statement in a transaction, committed on success

use sqlx::{Connection, SqliteConnection};

use crate::db::schema::Todo;
use crate::models::NewTodo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    fn todo_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "todo",
            id: id.to_string(),
        }
    }
}

/// Todo repository over a request-scoped connection
pub struct TodoRepo<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> TodoRepo<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// List every todo in insertion order.
    pub async fn list(&mut self) -> Result<Vec<Todo>, DbError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, priority, complete FROM todos ORDER BY id ASC",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(todos)
    }

    /// Get a single todo by id.
    pub async fn get(&mut self, id: i64) -> Result<Todo, DbError> {
        sqlx::query_as::<_, Todo>(
            "SELECT id, title, description, priority, complete FROM todos WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| DbError::todo_not_found(id))
    }

    /// Insert a todo, returning the id assigned by the database.
    pub async fn create(&mut self, todo: &NewTodo) -> Result<i64, DbError> {
        let mut tx = self.conn.begin().await?;

        let id = sqlx::query(
            "INSERT INTO todos (title, description, priority, complete) VALUES (?, ?, ?, ?)",
        )
        .bind(todo.title())
        .bind(todo.description())
        .bind(todo.priority())
        .bind(todo.complete())
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        tx.commit().await?;
        tracing::debug!(id, "todo created");

        Ok(id)
    }

    /// Overwrite all mutable fields of an existing todo.
    ///
    /// A missing id is NotFound and leaves the table untouched.
    pub async fn update(&mut self, id: i64, todo: &NewTodo) -> Result<(), DbError> {
        let mut tx = self.conn.begin().await?;

        let affected = sqlx::query(
            r#"
            UPDATE todos
            SET title = ?, description = ?, priority = ?, complete = ?
            WHERE id = ?
            "#,
        )
        .bind(todo.title())
        .bind(todo.description())
        .bind(todo.priority())
        .bind(todo.complete())
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if affected == 0 {
            // Dropping the transaction rolls it back
            return Err(DbError::todo_not_found(id));
        }

        tx.commit().await?;
        tracing::debug!(id, "todo updated");

        Ok(())
    }

    /// Delete a todo. A missing id is NotFound.
    pub async fn delete(&mut self, id: i64) -> Result<(), DbError> {
        let mut tx = self.conn.begin().await?;

        let affected = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(DbError::todo_not_found(id));
        }

        tx.commit().await?;
        tracing::debug!(id, "todo deleted");

        Ok(())
    }
}
