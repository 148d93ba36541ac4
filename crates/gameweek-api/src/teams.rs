//! Handler for `GET /teams/:user_id/available`.
//!
//! A team is available to a user until they pick it in any gameweek. The
//! rule is advisory: [`crate::predictions::submit`] does not enforce it.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use gameweek_core::{model::Team, store::GameStore};

use crate::{error::ApiError, parse_key};

/// `GET /teams/:user_id/available`
pub async fn available<S: GameStore>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<String>,
) -> Result<Json<Vec<Team>>, ApiError> {
  // A user we cannot name has no picks, so every team is open to them.
  let teams = match parse_key::<i64>(&user_id) {
    Some(id) => store.available_teams(id).await,
    None => store.list_teams().await,
  }
  .map_err(ApiError::store)?;

  Ok(Json(teams))
}
