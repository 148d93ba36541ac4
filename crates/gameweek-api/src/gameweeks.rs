//! Handler for `POST /endgameweek/:gameweek`.
//!
//! Closing a gameweek only flags its predictions as checked. Scoring happens
//! elsewhere.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use gameweek_core::store::GameStore;
use serde::Serialize;
use tracing::info;

use crate::{error::ApiError, parse_key};

#[derive(Debug, Serialize)]
pub struct EndResponse {
  pub message: &'static str,
}

/// `POST /endgameweek/:gameweek`
pub async fn end<S: GameStore>(
  State(store): State<Arc<S>>,
  Path(gameweek): Path<String>,
) -> Result<Json<EndResponse>, ApiError> {
  let gameweek = parse_key::<i64>(&gameweek).ok_or(ApiError::BadRequest("invalid gameweek"))?;

  let checked = store
    .mark_gameweek_checked(gameweek)
    .await
    .map_err(ApiError::store)?;
  info!(gameweek, checked, "gameweek marked as completed");

  Ok(Json(EndResponse { message: "gameweek marked as completed" }))
}
