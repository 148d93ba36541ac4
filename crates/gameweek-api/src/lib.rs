//! JSON REST API for the gameweek prediction game.
//!
//! Exposes an axum [`Router`] backed by any [`gameweek_core::store::GameStore`].
//! CORS, tracing, and transport concerns are the caller's responsibility.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET`  | `/users` | [`users::list`] |
//! | `GET`  | `/standings` | [`users::standings`] |
//! | `GET`  | `/user/{id}/history` | [`users::history`] |
//! | `GET`  | `/teams/{user_id}/available` | [`teams::available`] |
//! | `GET`  | `/predictions/{gameweek}` | [`predictions::for_gameweek`] |
//! | `POST` | `/predict` | [`predictions::submit`] |
//! | `POST` | `/endgameweek/{gameweek}` | [`gameweeks::end`] |

pub mod error;
pub mod gameweeks;
pub mod predictions;
pub mod teams;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use gameweek_core::store::GameStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: GameStore + 'static,
{
  Router::new()
    // Users
    .route("/users", get(users::list::<S>))
    .route("/standings", get(users::standings::<S>))
    .route("/user/{id}/history", get(users::history::<S>))
    // Teams
    .route("/teams/{user_id}/available", get(teams::available::<S>))
    // Predictions
    .route("/predictions/{gameweek}", get(predictions::for_gameweek::<S>))
    .route("/predict", post(predictions::submit::<S>))
    // Gameweeks
    .route("/endgameweek/{gameweek}", post(gameweeks::end::<S>))
    .with_state(store)
}

/// Parse a path segment as a numeric key.
///
/// Path keys are not validated on read routes: a segment that is not a number
/// simply matches nothing, the same as a number that matches no rows.
pub(crate) fn parse_key<T: std::str::FromStr>(raw: &str) -> Option<T> { raw.parse().ok() }
