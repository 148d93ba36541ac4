//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Everything else maps onto a
//! native SQLite type.

use chrono::{DateTime, Utc};
use gameweek_core::model::{Prediction, Team, User};

use crate::{Error, Result};

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Columns selected for every prediction query, in the order
/// [`RawPrediction::from_row`] reads them. Joined user and team columns
/// follow when the query attaches them.
pub const PREDICTION_COLUMNS: &str = "p.id, p.user_id, p.team_id, p.opponent, p.scoreline, \
   p.gameweek, p.submitted_at, p.points_earned, p.result_checked";

/// [`PREDICTION_COLUMNS`] without the table alias, for `RETURNING` clauses.
pub const RETURNING_COLUMNS: &str = "id, user_id, team_id, opponent, scoreline, \
   gameweek, submitted_at, points_earned, result_checked";

pub fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
  Ok(User {
    id:     row.get(0)?,
    name:   row.get(1)?,
    points: row.get(2)?,
  })
}

pub fn team_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Team> {
  Ok(Team {
    id:   row.get(0)?,
    name: row.get(1)?,
  })
}

/// Raw values read directly from a `predictions` row, optionally joined
/// with its `users` and `teams` rows.
pub struct RawPrediction {
  // predictions columns
  pub id:             i64,
  pub user_id:        i64,
  pub team_id:        i64,
  pub opponent:       String,
  pub scoreline:      String,
  pub gameweek:       i64,
  pub submitted_at:   String,
  pub points_earned:  i64,
  pub result_checked: bool,
  // joins
  pub user:           Option<User>,
  pub team:           Option<Team>,
}

/// Which related rows follow [`PREDICTION_COLUMNS`] in a result row.
#[derive(Debug, Clone, Copy)]
pub enum Attach {
  None,
  Team,
  UserAndTeam,
}

impl RawPrediction {
  pub fn from_row(row: &rusqlite::Row<'_>, attach: Attach) -> rusqlite::Result<Self> {
    let (user, team) = match attach {
      Attach::None => (None, None),
      // Joined columns start after the nine prediction columns.
      Attach::Team => (None, joined_team(row, 9)?),
      Attach::UserAndTeam => (joined_user(row, 9)?, joined_team(row, 12)?),
    };

    Ok(Self {
      id: row.get(0)?,
      user_id: row.get(1)?,
      team_id: row.get(2)?,
      opponent: row.get(3)?,
      scoreline: row.get(4)?,
      gameweek: row.get(5)?,
      submitted_at: row.get(6)?,
      points_earned: row.get(7)?,
      result_checked: row.get(8)?,
      user,
      team,
    })
  }

  pub fn into_prediction(self) -> Result<Prediction> {
    Ok(Prediction {
      id:             self.id,
      user_id:        self.user_id,
      user:           self.user,
      team_id:        self.team_id,
      team:           self.team,
      opponent:       self.opponent,
      scoreline:      self.scoreline,
      gameweek:       self.gameweek,
      submitted_at:   decode_dt(&self.submitted_at)?,
      points_earned:  self.points_earned,
      result_checked: self.result_checked,
    })
  }
}

fn joined_user(row: &rusqlite::Row<'_>, at: usize) -> rusqlite::Result<Option<User>> {
  let id: Option<i64> = row.get(at)?;
  let Some(id) = id else { return Ok(None) };
  Ok(Some(User {
    id,
    name:   row.get(at + 1)?,
    points: row.get(at + 2)?,
  }))
}

fn joined_team(row: &rusqlite::Row<'_>, at: usize) -> rusqlite::Result<Option<Team>> {
  let id: Option<i64> = row.get(at)?;
  let Some(id) = id else { return Ok(None) };
  Ok(Some(Team {
    id,
    name: row.get(at + 1)?,
  }))
}
