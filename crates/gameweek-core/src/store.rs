//! The `GameStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `gameweek-store-sqlite`).
//! Higher layers (`gameweek-api`, `gameweek-server`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::model::{NewPrediction, Prediction, SubmitOutcome, Team, User};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a prediction-game store backend.
///
/// Users and teams are reference data: they are only ever inserted by the
/// seeding methods. Predictions are upserted per `(user_id, gameweek)` and
/// never deleted.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait GameStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Seeding ───────────────────────────────────────────────────────────

  /// Insert every name in `names` that is not already a user, with zero
  /// points. Returns how many rows were inserted.
  fn seed_users<'a>(
    &'a self,
    names: &'a [&'a str],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Insert every name in `names` that is not already a team. Returns how
  /// many rows were inserted.
  fn seed_teams<'a>(
    &'a self,
    names: &'a [&'a str],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// All users in storage order.
  fn list_users(&self) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  /// All users ordered by `points` descending; ties keep storage order.
  fn standings(&self) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  /// All teams in storage order.
  fn list_teams(&self) -> impl Future<Output = Result<Vec<Team>, Self::Error>> + Send + '_;

  /// Every prediction for `gameweek` with its user and team attached,
  /// ordered by `user_id`.
  fn predictions_for_gameweek(
    &self,
    gameweek: i64,
  ) -> impl Future<Output = Result<Vec<Prediction>, Self::Error>> + Send + '_;

  /// Every prediction made by `user_id` with its team attached, ordered by
  /// gameweek. An unknown user yields an empty list.
  fn user_history(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Vec<Prediction>, Self::Error>> + Send + '_;

  /// Teams `user_id` has not picked in any gameweek so far.
  fn available_teams(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Vec<Team>, Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Create or overwrite the prediction for `(input.user_id, input.gameweek)`
  /// in a single atomic step.
  ///
  /// On overwrite only `team_id`, `opponent`, `scoreline` and `submitted_at`
  /// change; `points_earned` and `result_checked` are preserved. Unknown
  /// users and teams are reported as [`SubmitOutcome::Rejected`].
  fn submit_prediction(
    &self,
    input: NewPrediction,
  ) -> impl Future<Output = Result<SubmitOutcome, Self::Error>> + Send + '_;

  /// Set `result_checked` on every prediction of `gameweek`, all or nothing.
  /// Returns the number of rows touched.
  fn mark_gameweek_checked(
    &self,
    gameweek: i64,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}
