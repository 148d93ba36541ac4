//! Fixed reference data inserted on startup.

use tracing::info;

use crate::store::GameStore;

/// Players seeded on startup.
pub const DEFAULT_USERS: &[&str] = &["Akshay", "Rohan", "Ashwin", "Mihir", "Hoe-Jin"];

/// Premier League clubs seeded on startup.
pub const DEFAULT_TEAMS: &[&str] = &[
  "AFC Bournemouth",
  "Arsenal",
  "Aston Villa",
  "Brentford",
  "Brighton & Hove Albion",
  "Burnley",
  "Chelsea",
  "Crystal Palace",
  "Everton",
  "Fulham",
  "Leeds United",
  "Liverpool",
  "Manchester City",
  "Manchester United",
  "Newcastle United",
  "Nottingham Forest",
  "Sunderland",
  "Tottenham Hotspur",
  "West Ham United",
  "Wolverhampton Wanderers",
];

/// Ensure every default user and team exists. Safe to run on every start.
pub async fn seed_defaults<S: GameStore>(store: &S) -> Result<(), S::Error> {
  let users = store.seed_users(DEFAULT_USERS).await?;
  if users > 0 {
    info!("Seeded {users} new users");
  }

  let teams = store.seed_teams(DEFAULT_TEAMS).await?;
  if teams > 0 {
    info!("Seeded {teams} new teams");
  }

  Ok(())
}
