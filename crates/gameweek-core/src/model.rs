//! Rows of the game: players, clubs and weekly predictions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A player on the leaderboard.
///
/// `points` is maintained outside this system; nothing here writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:     i64,
  pub name:   String,
  pub points: i64,
}

/// A club that can be backed in a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
  pub id:   i64,
  pub name: String,
}

/// One user's pick for one gameweek.
///
/// At most one row exists per `(user_id, gameweek)`. The related `user` and
/// `team` rows are only present when the query that produced the prediction
/// joined them in, and are left out of the JSON otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
  pub id:             i64,
  pub user_id:        i64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user:           Option<User>,
  pub team_id:        i64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub team:           Option<Team>,
  pub opponent:       String,
  pub scoreline:      String,
  pub gameweek:       i64,
  pub submitted_at:   DateTime<Utc>,
  pub points_earned:  i64,
  pub result_checked: bool,
}

/// Input for [`GameStore::submit_prediction`](crate::store::GameStore::submit_prediction).
///
/// `opponent` and `scoreline` are free text and are stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPrediction {
  pub user_id:   i64,
  pub team_id:   i64,
  pub opponent:  String,
  pub scoreline: String,
  pub gameweek:  i64,
}

/// Result of an upsert keyed on `(user_id, gameweek)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
  /// No prediction existed for the pair; a new row was inserted.
  Created(Prediction),
  /// The existing row had its pick and `submitted_at` overwritten.
  Updated(Prediction),
  /// Nothing was written.
  Rejected(crate::Error),
}
