//! Todo endpoints
//!
//! | Method | Path         | Success             |
//! |--------|--------------|---------------------|
//! | GET    | `/`          | 200, all todos      |
//! | GET    | `/todo/{id}` | 200, one todo       |
//! | POST   | `/todo`      | 201, empty body     |
//! | PUT    | `/todo/{id}` | 204, empty body     |
//! | DELETE | `/todo/{id}` | 204, empty body     |

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};

use crate::db::{Todo, TodoRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{DbConn, TodoId, ValidTodo};
use crate::http::server::AppState;

/// GET / - list all todos
async fn read_all(DbConn(mut conn): DbConn) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = TodoRepo::new(&mut conn).list().await?;
    Ok(Json(todos))
}

/// GET /todo/{id} - get a single todo
async fn read_todo(
    TodoId(id): TodoId,
    DbConn(mut conn): DbConn,
) -> Result<Json<Todo>, ApiError> {
    let todo = TodoRepo::new(&mut conn).get(id).await?;
    Ok(Json(todo))
}

/// POST /todo - create a todo
async fn create_todo(
    State(state): State<Arc<AppState>>,
    ValidTodo(todo): ValidTodo,
) -> Result<StatusCode, ApiError> {
    let mut conn = state.acquire().await?;
    TodoRepo::new(&mut conn).create(&todo).await?;
    Ok(StatusCode::CREATED)
}

/// PUT /todo/{id} - replace every field of a todo
async fn update_todo(
    TodoId(id): TodoId,
    State(state): State<Arc<AppState>>,
    ValidTodo(todo): ValidTodo,
) -> Result<StatusCode, ApiError> {
    let mut conn = state.acquire().await?;
    TodoRepo::new(&mut conn).update(id, &todo).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /todo/{id} - delete a todo
async fn delete_todo(
    TodoId(id): TodoId,
    DbConn(mut conn): DbConn,
) -> Result<StatusCode, ApiError> {
    TodoRepo::new(&mut conn).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Todo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(read_all))
        .route("/todo", post(create_todo))
        .route(
            "/todo/{id}",
            get(read_todo).put(update_todo).delete(delete_todo),
        )
}
