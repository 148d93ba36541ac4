//! Integration tests for `SqliteStore`, mostly against an in-memory database.

use gameweek_core::{
  Error as CoreError,
  model::{NewPrediction, Prediction, SubmitOutcome},
  seed::{DEFAULT_TEAMS, DEFAULT_USERS, seed_defaults},
  store::GameStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  let s = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  seed_defaults(&s).await.expect("seed");
  s
}

fn pick(user_id: i64, team_id: i64, gameweek: i64, scoreline: &str) -> NewPrediction {
  NewPrediction {
    user_id,
    team_id,
    opponent: "Arsenal".into(),
    scoreline: scoreline.into(),
    gameweek,
  }
}

fn saved(outcome: SubmitOutcome) -> Prediction {
  match outcome {
    SubmitOutcome::Created(p) | SubmitOutcome::Updated(p) => p,
    SubmitOutcome::Rejected(e) => panic!("unexpected rejection: {e}"),
  }
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seeding_populates_users_and_teams() {
  let s = store().await;

  let users = s.list_users().await.unwrap();
  assert_eq!(users.len(), 5);
  assert_eq!(users[0].name, "Akshay");
  assert!(users.iter().all(|u| u.points == 0));

  let teams = s.list_teams().await.unwrap();
  assert_eq!(teams.len(), 20);
  assert_eq!(teams[0].name, "AFC Bournemouth");
}

#[tokio::test]
async fn seeding_twice_adds_nothing() {
  let s = store().await;

  assert_eq!(s.seed_users(DEFAULT_USERS).await.unwrap(), 0);
  assert_eq!(s.seed_teams(DEFAULT_TEAMS).await.unwrap(), 0);
  seed_defaults(&s).await.unwrap();

  assert_eq!(s.list_users().await.unwrap().len(), 5);
  assert_eq!(s.list_teams().await.unwrap().len(), 20);
}

#[tokio::test]
async fn seeding_counts_only_new_names() {
  let s = store().await;
  let inserted = s.seed_users(&["Akshay", "Priya"]).await.unwrap();
  assert_eq!(inserted, 1);
  assert_eq!(s.list_users().await.unwrap().len(), 6);
}

// ─── Standings ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn standings_order_by_points_descending() {
  let s = store().await;
  s.set_points(1, 3).await.unwrap();
  s.set_points(2, 1).await.unwrap();
  s.set_points(3, 2).await.unwrap();

  let table = s.standings().await.unwrap();
  let order: Vec<i64> = table.iter().map(|u| u.id).collect();
  assert_eq!(&order[..3], &[1, 3, 2]);
}

#[tokio::test]
async fn standings_ties_keep_storage_order() {
  let s = store().await;
  s.set_points(4, 7).await.unwrap();

  let order: Vec<i64> = s.standings().await.unwrap().iter().map(|u| u.id).collect();
  assert_eq!(order, vec![4, 1, 2, 3, 5]);
}

// ─── Submission ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn first_submission_creates() {
  let s = store().await;

  let outcome = s.submit_prediction(pick(1, 5, 1, "2-1")).await.unwrap();
  let p = match outcome {
    SubmitOutcome::Created(p) => p,
    other => panic!("expected Created, got {other:?}"),
  };
  assert_eq!(p.user_id, 1);
  assert_eq!(p.team_id, 5);
  assert_eq!(p.gameweek, 1);
  assert_eq!(p.points_earned, 0);
  assert!(!p.result_checked);
  assert!(p.user.is_none() && p.team.is_none());
}

#[tokio::test]
async fn resubmission_overwrites_pick_in_place() {
  let s = store().await;

  let first = saved(s.submit_prediction(pick(1, 5, 1, "2-1")).await.unwrap());
  s.mark_gameweek_checked(1).await.unwrap();

  let outcome = s.submit_prediction(pick(1, 8, 1, "0-0")).await.unwrap();
  let second = match outcome {
    SubmitOutcome::Updated(p) => p,
    other => panic!("expected Updated, got {other:?}"),
  };

  assert_eq!(second.id, first.id);
  assert_eq!(second.team_id, 8);
  assert_eq!(second.scoreline, "0-0");
  assert!(second.submitted_at >= first.submitted_at);
  // Untouched by resubmission.
  assert!(second.result_checked);
  assert_eq!(second.points_earned, 0);

  assert_eq!(s.count_predictions(1, 1).await.unwrap(), 1);
}

#[tokio::test]
async fn unknown_user_is_rejected_without_writing() {
  let s = store().await;

  let outcome = s.submit_prediction(pick(99, 5, 1, "1-0")).await.unwrap();
  assert_eq!(outcome, SubmitOutcome::Rejected(CoreError::UserNotFound(99)));
  assert_eq!(s.count_predictions(99, 1).await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_team_is_rejected_without_writing() {
  let s = store().await;

  let outcome = s.submit_prediction(pick(1, 404, 1, "1-0")).await.unwrap();
  assert_eq!(outcome, SubmitOutcome::Rejected(CoreError::TeamNotFound(404)));
  assert_eq!(s.count_predictions(1, 1).await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_keep_one_row() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("game.db");

  let first = SqliteStore::open(&path).await.unwrap();
  seed_defaults(&first).await.unwrap();

  // Each handle owns its own SQLite connection to the same file.
  let mut stores = vec![first.clone()];
  for _ in 0..5 {
    stores.push(SqliteStore::open(&path).await.unwrap());
  }

  let mut handles = Vec::new();
  for (i, s) in stores.into_iter().enumerate() {
    let team_id = i as i64 + 1;
    handles.push(tokio::spawn(async move {
      s.submit_prediction(pick(2, team_id, 6, "1-1")).await
    }));
  }

  let mut created = 0;
  let mut updated = 0;
  for h in handles {
    match h.await.unwrap().unwrap() {
      SubmitOutcome::Created(_) => created += 1,
      SubmitOutcome::Updated(_) => updated += 1,
      other => panic!("unexpected outcome: {other:?}"),
    }
  }

  assert_eq!(created, 1);
  assert_eq!(updated, 5);
  assert_eq!(first.count_predictions(2, 6).await.unwrap(), 1);
  assert_eq!(first.predictions_for_gameweek(6).await.unwrap().len(), 1);
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn history_includes_submitted_pick() {
  let s = store().await;
  s.submit_prediction(pick(1, 5, 1, "2-1")).await.unwrap();

  let history = s.user_history(1).await.unwrap();
  assert_eq!(history.len(), 1);
  assert_eq!(history[0].gameweek, 1);
  assert_eq!(history[0].team_id, 5);
  assert_eq!(history[0].scoreline, "2-1");
  assert_eq!(history[0].team.as_ref().unwrap().name, "Brighton & Hove Albion");
  assert!(history[0].user.is_none());
}

#[tokio::test]
async fn history_is_ordered_by_gameweek() {
  let s = store().await;
  s.submit_prediction(pick(3, 1, 4, "1-0")).await.unwrap();
  s.submit_prediction(pick(3, 2, 2, "1-0")).await.unwrap();
  s.submit_prediction(pick(3, 3, 9, "1-0")).await.unwrap();

  let weeks: Vec<i64> = s.user_history(3).await.unwrap().iter().map(|p| p.gameweek).collect();
  assert_eq!(weeks, vec![2, 4, 9]);
}

#[tokio::test]
async fn history_for_unknown_user_is_empty() {
  let s = store().await;
  assert!(s.user_history(42).await.unwrap().is_empty());
}

#[tokio::test]
async fn gameweek_predictions_attach_user_and_team() {
  let s = store().await;
  s.submit_prediction(pick(3, 2, 1, "3-0")).await.unwrap();
  s.submit_prediction(pick(1, 7, 1, "1-0")).await.unwrap();
  s.submit_prediction(pick(2, 7, 2, "1-0")).await.unwrap();

  let week = s.predictions_for_gameweek(1).await.unwrap();
  assert_eq!(week.len(), 2);
  assert_eq!(week[0].user_id, 1);
  assert_eq!(week[1].user_id, 3);
  assert_eq!(week[0].user.as_ref().unwrap().name, "Akshay");
  assert_eq!(week[0].team.as_ref().unwrap().name, "Chelsea");
  assert_eq!(week[1].team.as_ref().unwrap().name, "Arsenal");

  assert!(s.predictions_for_gameweek(30).await.unwrap().is_empty());
}

#[tokio::test]
async fn available_teams_exclude_every_prior_pick() {
  let s = store().await;
  assert_eq!(s.available_teams(1).await.unwrap().len(), 20);

  s.submit_prediction(pick(1, 5, 1, "2-1")).await.unwrap();
  s.submit_prediction(pick(1, 12, 2, "2-1")).await.unwrap();
  // Another user's picks do not count.
  s.submit_prediction(pick(2, 3, 1, "2-1")).await.unwrap();

  let available = s.available_teams(1).await.unwrap();
  assert_eq!(available.len(), 18);
  assert!(available.iter().all(|t| t.id != 5 && t.id != 12));
  assert!(available.iter().any(|t| t.id == 3));
}

#[tokio::test]
async fn overwritten_pick_frees_its_team() {
  let s = store().await;
  s.submit_prediction(pick(1, 5, 1, "2-1")).await.unwrap();
  s.submit_prediction(pick(1, 6, 1, "2-1")).await.unwrap();

  let available = s.available_teams(1).await.unwrap();
  assert!(available.iter().any(|t| t.id == 5));
  assert!(available.iter().all(|t| t.id != 6));
}

// ─── End of gameweek ─────────────────────────────────────────────────────────

#[tokio::test]
async fn marking_gameweek_only_touches_that_gameweek() {
  let s = store().await;
  s.submit_prediction(pick(1, 1, 1, "1-0")).await.unwrap();
  s.submit_prediction(pick(2, 2, 1, "1-0")).await.unwrap();
  s.submit_prediction(pick(1, 3, 2, "1-0")).await.unwrap();

  assert_eq!(s.mark_gameweek_checked(1).await.unwrap(), 2);

  assert!(s.predictions_for_gameweek(1).await.unwrap().iter().all(|p| p.result_checked));
  assert!(s.predictions_for_gameweek(2).await.unwrap().iter().all(|p| !p.result_checked));
}

#[tokio::test]
async fn marking_empty_gameweek_is_a_no_op() {
  let s = store().await;
  s.submit_prediction(pick(1, 1, 1, "1-0")).await.unwrap();

  assert_eq!(s.mark_gameweek_checked(17).await.unwrap(), 0);
  assert!(!s.predictions_for_gameweek(1).await.unwrap()[0].result_checked);
}

#[tokio::test]
async fn store_survives_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("game.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    seed_defaults(&s).await.unwrap();
    s.submit_prediction(pick(1, 5, 1, "2-1")).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  seed_defaults(&s).await.unwrap();
  assert_eq!(s.list_users().await.unwrap().len(), 5);
  assert_eq!(s.user_history(1).await.unwrap().len(), 1);
}

#[tokio::test]
async fn gameweeks_beyond_i32_round_trip() {
  let s = store().await;
  let far = 3_000_000_000_i64;

  saved(s.submit_prediction(pick(1, 5, far, "2-1")).await.unwrap());
  assert_eq!(s.mark_gameweek_checked(far).await.unwrap(), 1);

  let week = s.predictions_for_gameweek(far).await.unwrap();
  assert_eq!(week.len(), 1);
  assert_eq!(week[0].gameweek, far);
  assert!(week[0].result_checked);
}
