//! Custom Axum extractors
//!
//! Path ids and request bodies are validated here, so handlers only ever see
//! well-formed input.

use std::num::IntErrorKind;
use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use sqlx::pool::PoolConnection;
use sqlx::Sqlite;

use super::error::ApiError;
use super::server::AppState;
use crate::models::{NewTodo, TodoRequest, ValidationError};

/// Extract and validate a todo id (integer >= 1) from path
pub struct TodoId(pub i64);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ValidationError::Malformed {
                field: "id",
                reason: rejection.body_text(),
            })?;

        let id: i64 = match raw.parse() {
            Ok(id) => id,
            // Well-formed but larger than any id the table can hold
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                return Err(ApiError::NotFound {
                    resource: "todo",
                    id: raw,
                });
            }
            Err(e) if *e.kind() == IntErrorKind::NegOverflow => {
                return Err(ValidationError::BelowMinimum { field: "id", min: 1 }.into());
            }
            Err(_) => {
                return Err(ValidationError::Malformed {
                    field: "id",
                    reason: "must be an integer".into(),
                }
                .into());
            }
        };

        if id < 1 {
            return Err(ValidationError::BelowMinimum { field: "id", min: 1 }.into());
        }

        Ok(Self(id))
    }
}

/// Extract a JSON body and validate it into a `NewTodo`
///
/// Bad JSON, wrong field types and a missing content type all surface as
/// validation errors instead of axum's default rejections.
pub struct ValidTodo(pub NewTodo);

impl<S> FromRequest<S> for ValidTodo
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<TodoRequest>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::Malformed {
                field: "body",
                reason: rejection.body_text(),
            })?;

        Ok(Self(NewTodo::try_from(body)?))
    }
}

/// Request-scoped database connection for routes without a body
///
/// Acquired from the pool when the handler runs and handed back when the
/// request finishes, on success and error paths alike. Routes that take a
/// body acquire through `AppState::acquire` once `ValidTodo` has succeeded,
/// so a slow upload never holds a connection.
pub struct DbConn(pub PoolConnection<Sqlite>);

impl FromRequestParts<Arc<AppState>> for DbConn {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(state.acquire().await?))
    }
}
