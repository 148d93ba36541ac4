//! HTTP server wiring for the gameweek API.
//!
//! Loads [`ServerConfig`], and wraps [`gameweek_api::api_router`] with the
//! cross-origin and request-tracing layers the browser frontend relies on.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use gameweek_core::store::GameStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file,
/// `GAMEWEEK_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 3001)?
      .set_default("store_path", "game.db")?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("GAMEWEEK"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// `store_path` with a leading `~/` expanded to the user's home directory.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The complete application: API routes, any-origin CORS, request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: GameStore + 'static,
{
  gameweek_api::api_router(store)
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
  };
  use gameweek_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  #[test]
  fn defaults_apply_without_a_file() {
    let cfg = ServerConfig::load(Path::new("does-not-exist.toml")).unwrap();
    assert_eq!(cfg.port, 3001);
    assert_eq!(cfg.store_path, PathBuf::from("game.db"));
    assert_eq!(cfg.address(), format!("{}:3001", cfg.host));
  }

  #[test]
  fn file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");
    std::fs::write(&file, "port = 8080\nstore_path = \"~/league/game.db\"\n").unwrap();

    let cfg = ServerConfig::load(&file).unwrap();
    assert_eq!(cfg.port, 8080);
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(cfg.resolved_store_path(), PathBuf::from(home).join("league/game.db"));
    }
  }

  #[test]
  fn plain_paths_are_left_alone() {
    assert_eq!(expand_tilde(Path::new("data/game.db")), PathBuf::from("data/game.db"));
  }

  #[tokio::test]
  async fn responses_allow_any_origin() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let app = app(Arc::new(store));

    let req = Request::builder()
      .method(Method::GET)
      .uri("/users")
      .header(header::ORIGIN, "http://localhost:5173")
      .body(Body::empty())
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
      "*"
    );

    let preflight = Request::builder()
      .method(Method::OPTIONS)
      .uri("/predict")
      .header(header::ORIGIN, "http://localhost:5173")
      .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
      .body(Body::empty())
      .unwrap();
    let resp = app.oneshot(preflight).await.unwrap();
    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
  }
}
