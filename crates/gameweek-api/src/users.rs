//! Handlers for user-centric endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/users` | Storage order |
//! | `GET`  | `/standings` | By points, highest first |
//! | `GET`  | `/user/:id/history` | Team attached; empty for unknown users |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use gameweek_core::{
  model::{Prediction, User},
  store::GameStore,
};

use crate::{error::ApiError, parse_key};

/// `GET /users`
pub async fn list<S: GameStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<User>>, ApiError> {
  let users = store.list_users().await.map_err(ApiError::store)?;
  Ok(Json(users))
}

/// `GET /standings`
pub async fn standings<S: GameStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<User>>, ApiError> {
  let users = store.standings().await.map_err(ApiError::store)?;
  Ok(Json(users))
}

/// `GET /user/:id/history`
pub async fn history<S: GameStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Vec<Prediction>>, ApiError> {
  let Some(user_id) = parse_key::<i64>(&id) else {
    return Ok(Json(Vec::new()));
  };

  let history = store.user_history(user_id).await.map_err(ApiError::store)?;
  Ok(Json(history))
}
