//! Handlers for `/predictions` and `/predict`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/predictions/:gameweek` | User and team attached, by `user_id` |
//! | `POST` | `/predict` | Body: [`NewPrediction`]; upsert on `(user_id, gameweek)` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use gameweek_core::{
  Error as CoreError,
  model::{NewPrediction, Prediction, SubmitOutcome},
  store::GameStore,
};
use tracing::{debug, info};

use crate::{error::ApiError, parse_key};

/// `GET /predictions/:gameweek`
pub async fn for_gameweek<S: GameStore>(
  State(store): State<Arc<S>>,
  Path(gameweek): Path<String>,
) -> Result<Json<Vec<Prediction>>, ApiError> {
  let Some(gameweek) = parse_key::<i64>(&gameweek) else {
    return Ok(Json(Vec::new()));
  };

  let predictions = store
    .predictions_for_gameweek(gameweek)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(predictions))
}

/// `POST /predict` — body:
/// `{"user_id":1,"team_id":5,"opponent":"Arsenal","scoreline":"2-1","gameweek":1}`
///
/// Returns the stored prediction whether it was created or overwritten.
pub async fn submit<S: GameStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewPrediction>, JsonRejection>,
) -> Result<Json<Prediction>, ApiError> {
  let Json(input) = body.map_err(|e| {
    debug!(error = %e, "rejected prediction body");
    ApiError::BadRequest("invalid input")
  })?;

  let (user_id, gameweek) = (input.user_id, input.gameweek);
  let outcome = store
    .submit_prediction(input)
    .await
    .map_err(ApiError::store)?;

  match outcome {
    SubmitOutcome::Created(p) => {
      info!(user_id, gameweek, team_id = p.team_id, "prediction created");
      Ok(Json(p))
    }
    SubmitOutcome::Updated(p) => {
      info!(user_id, gameweek, team_id = p.team_id, "prediction updated");
      Ok(Json(p))
    }
    SubmitOutcome::Rejected(CoreError::UserNotFound(_)) => {
      Err(ApiError::BadRequest("invalid user"))
    }
    SubmitOutcome::Rejected(CoreError::TeamNotFound(_)) => {
      Err(ApiError::BadRequest("invalid team"))
    }
  }
}
