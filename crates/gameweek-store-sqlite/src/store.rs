//! [`SqliteStore`] — the SQLite implementation of [`GameStore`].

use std::{path::Path, time::Duration};

use chrono::Utc;
use rusqlite::{OptionalExtension as _, TransactionBehavior};

use gameweek_core::{
  model::{NewPrediction, Prediction, SubmitOutcome, Team, User},
  store::GameStore,
};

use crate::{
  encode::{
    encode_dt, team_from_row, user_from_row, Attach, RawPrediction, PREDICTION_COLUMNS,
    RETURNING_COLUMNS,
  },
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// How long a connection waits on another connection's write lock before
/// giving up with `SQLITE_BUSY`.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// A prediction-game store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// What happened inside the upsert transaction.
enum Upsert {
  Written { created: bool, raw: RawPrediction },
  Rejected(gameweek_core::Error),
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert each name into `table` unless already present, in one
  /// transaction. `table` is always one of our own literals.
  async fn insert_names(&self, table: &'static str, names: &[&str]) -> Result<usize> {
    let names: Vec<String> = names.iter().map(|n| (*n).to_owned()).collect();

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
          let mut stmt = tx.prepare(&format!(
            "INSERT INTO {table} (name) VALUES (?1) ON CONFLICT (name) DO NOTHING"
          ))?;
          for name in &names {
            inserted += stmt.execute(rusqlite::params![name])?;
          }
        }
        tx.commit()?;
        Ok(inserted)
      })
      .await?;

    Ok(inserted)
  }

  /// Overwrite a user's points. Points are otherwise maintained by hand.
  #[cfg(test)]
  pub(crate) async fn set_points(&self, user_id: i64, points: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE users SET points = ?2 WHERE id = ?1",
          rusqlite::params![user_id, points],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Number of stored predictions for `(user_id, gameweek)`.
  #[cfg(test)]
  pub(crate) async fn count_predictions(&self, user_id: i64, gameweek: i64) -> Result<i64> {
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(conn.query_row(
            "SELECT COUNT(*) FROM predictions WHERE user_id = ?1 AND gameweek = ?2",
            rusqlite::params![user_id, gameweek],
            |r| r.get::<_, i64>(0),
          )?)
        })
        .await?,
    )
  }
}

// ─── GameStore impl ──────────────────────────────────────────────────────────

impl GameStore for SqliteStore {
  type Error = crate::Error;

  // ── Seeding ───────────────────────────────────────────────────────────────

  async fn seed_users(&self, names: &[&str]) -> Result<usize> {
    self.insert_names("users", names).await
  }

  async fn seed_teams(&self, names: &[&str]) -> Result<usize> {
    self.insert_names("teams", names).await
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn list_users(&self) -> Result<Vec<User>> {
    let users = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name, points FROM users ORDER BY id")?;
        let rows = stmt
          .query_map([], user_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(users)
  }

  async fn standings(&self) -> Result<Vec<User>> {
    let users = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT id, name, points FROM users ORDER BY points DESC, id ASC")?;
        let rows = stmt
          .query_map([], user_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(users)
  }

  async fn list_teams(&self) -> Result<Vec<Team>> {
    let teams = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name FROM teams ORDER BY id")?;
        let rows = stmt
          .query_map([], team_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(teams)
  }

  async fn predictions_for_gameweek(&self, gameweek: i64) -> Result<Vec<Prediction>> {
    let raws: Vec<RawPrediction> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PREDICTION_COLUMNS},
                  u.id, u.name, u.points,
                  t.id, t.name
           FROM predictions p
           LEFT JOIN users u ON u.id = p.user_id
           LEFT JOIN teams t ON t.id = p.team_id
           WHERE p.gameweek = ?1
           ORDER BY p.user_id, p.id"
        ))?;

        let rows = stmt
          .query_map(rusqlite::params![gameweek], |row| {
            RawPrediction::from_row(row, Attach::UserAndTeam)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPrediction::into_prediction).collect()
  }

  async fn user_history(&self, user_id: i64) -> Result<Vec<Prediction>> {
    let raws: Vec<RawPrediction> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PREDICTION_COLUMNS},
                  t.id, t.name
           FROM predictions p
           LEFT JOIN teams t ON t.id = p.team_id
           WHERE p.user_id = ?1
           ORDER BY p.gameweek, p.id"
        ))?;

        let rows = stmt
          .query_map(rusqlite::params![user_id], |row| {
            RawPrediction::from_row(row, Attach::Team)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPrediction::into_prediction).collect()
  }

  async fn available_teams(&self, user_id: i64) -> Result<Vec<Team>> {
    let teams = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name FROM teams
           WHERE id NOT IN (SELECT team_id FROM predictions WHERE user_id = ?1)
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![user_id], team_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(teams)
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn submit_prediction(&self, input: NewPrediction) -> Result<SubmitOutcome> {
    let submitted_at = encode_dt(Utc::now());

    let upsert = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let user_exists = tx
          .query_row(
            "SELECT 1 FROM users WHERE id = ?1",
            rusqlite::params![input.user_id],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !user_exists {
          return Ok(Upsert::Rejected(gameweek_core::Error::UserNotFound(input.user_id)));
        }

        let team_exists = tx
          .query_row(
            "SELECT 1 FROM teams WHERE id = ?1",
            rusqlite::params![input.team_id],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !team_exists {
          return Ok(Upsert::Rejected(gameweek_core::Error::TeamNotFound(input.team_id)));
        }

        let existed = tx
          .query_row(
            "SELECT 1 FROM predictions WHERE user_id = ?1 AND gameweek = ?2",
            rusqlite::params![input.user_id, input.gameweek],
            |_| Ok(()),
          )
          .optional()?
          .is_some();

        let raw = tx.query_row(
          &format!(
            "INSERT INTO predictions (
               user_id, team_id, opponent, scoreline, gameweek, submitted_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (user_id, gameweek) DO UPDATE SET
               team_id      = excluded.team_id,
               opponent     = excluded.opponent,
               scoreline    = excluded.scoreline,
               submitted_at = excluded.submitted_at
             RETURNING {RETURNING_COLUMNS}"
          ),
          rusqlite::params![
            input.user_id,
            input.team_id,
            input.opponent,
            input.scoreline,
            input.gameweek,
            submitted_at,
          ],
          |row| RawPrediction::from_row(row, Attach::None),
        )?;

        tx.commit()?;
        Ok(Upsert::Written { created: !existed, raw })
      })
      .await?;

    Ok(match upsert {
      Upsert::Written { created: true, raw } => SubmitOutcome::Created(raw.into_prediction()?),
      Upsert::Written { created: false, raw } => SubmitOutcome::Updated(raw.into_prediction()?),
      Upsert::Rejected(reason) => SubmitOutcome::Rejected(reason),
    })
  }

  async fn mark_gameweek_checked(&self, gameweek: i64) -> Result<usize> {
    let touched = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let touched = tx.execute(
          "UPDATE predictions SET result_checked = 1 WHERE gameweek = ?1",
          rusqlite::params![gameweek],
        )?;
        tx.commit()?;
        Ok(touched)
      })
      .await?;
    Ok(touched)
  }
}
