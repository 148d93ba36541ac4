//! SQL schema for the gameweek SQLite store.
//!
//! Executed once at connection startup. There is no migration tooling; the
//! version is recorded in `PRAGMA user_version` for whenever one is needed.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT    NOT NULL UNIQUE,
    points  INTEGER NOT NULL DEFAULT 0   -- maintained by hand, never by the API
);

CREATE TABLE IF NOT EXISTS teams (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT    NOT NULL UNIQUE
);

-- One pick per user per gameweek. Resubmission updates the row in place.
CREATE TABLE IF NOT EXISTS predictions (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id         INTEGER NOT NULL REFERENCES users(id),
    team_id         INTEGER NOT NULL REFERENCES teams(id),
    opponent        TEXT    NOT NULL,
    scoreline       TEXT    NOT NULL,
    gameweek        INTEGER NOT NULL,
    submitted_at    TEXT    NOT NULL,   -- ISO 8601 UTC; server-assigned
    points_earned   INTEGER NOT NULL DEFAULT 0,
    result_checked  INTEGER NOT NULL DEFAULT 0,
    UNIQUE (user_id, gameweek)
);

CREATE INDEX IF NOT EXISTS predictions_gameweek_idx ON predictions(gameweek);

PRAGMA user_version = 1;
";
