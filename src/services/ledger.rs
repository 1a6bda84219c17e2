use anyhow::Context;
use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;

use crate::database::{self, DbConn, ScoreEvent};
use crate::domain::{validate_positions, SlotAssignment};
use crate::errors::{CoreError, CoreResult};

/// Current score of a match, derived from the latest ledger event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub team_a: i32,
    pub team_b: i32,
}

#[derive(Debug, Clone, Copy)]
pub enum ScoreAction {
    /// Credit one point to the given team.
    Increment(i64),
    /// Undo the most recent ledger event. No-op on an empty ledger.
    Stepback,
}

pub fn current_score(conn: &Connection, match_id: i64) -> CoreResult<Score> {
    let latest = database::scores::find_latest(conn, match_id)?;
    Ok(latest.map(score_of).unwrap_or_default())
}

/// Applies one ledger mutation. The whole read-modify-write runs inside an
/// immediate transaction, so concurrent increments serialize and a stepback
/// can never delete an event it did not read.
pub fn record_or_step_back(
    conn: &mut DbConn,
    match_id: i64,
    action: ScoreAction,
    positions: Option<&SlotAssignment>,
) -> CoreResult<Score> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .context("Failed to open score transaction")?;

    let score = apply_action(&tx, match_id, action, positions)?;

    tx.commit().context("Failed to commit score transaction")?;
    Ok(score)
}

fn apply_action(
    tx: &Connection,
    match_id: i64,
    action: ScoreAction,
    positions: Option<&SlotAssignment>,
) -> CoreResult<Score> {
    if database::matches::find_by_id(tx, match_id)?.is_none() {
        return Err(CoreError::NotFound("match"));
    }

    let pairings = database::pairings::list_by_match(tx, match_id)?;
    if pairings.len() < 2 {
        return Err(CoreError::TournamentPairingsIncomplete);
    }
    let team_a = pairings[0].team_id;
    let team_b = pairings[1].team_id;

    // All validation happens before any write; a rejected request leaves
    // the ledger untouched.
    if let Some(assignment) = positions {
        let memberships: Vec<(i64, i64)> =
            database::teams::list_team_players(tx, &[team_a, team_b])?
                .into_iter()
                .map(|tp| (tp.team_id, tp.player_id))
                .collect();
        validate_positions(assignment, &memberships)?;
    }

    let latest = database::scores::find_latest(tx, match_id)?;

    match action {
        ScoreAction::Stepback => {
            let Some(event) = latest else {
                return Ok(Score::default());
            };
            database::scores::delete_by_id(tx, event.id)?;
            let previous = database::scores::find_latest(tx, match_id)?;
            Ok(previous.map(score_of).unwrap_or_default())
        }
        ScoreAction::Increment(team_id) => {
            let mut score = latest.map(score_of).unwrap_or_default();
            if team_id == team_a {
                score.team_a += 1;
            } else if team_id == team_b {
                score.team_b += 1;
            } else {
                return Err(CoreError::InvalidTeamReference);
            }
            database::scores::insert_event(tx, match_id, score.team_a, score.team_b)?;
            Ok(score)
        }
    }
}

fn score_of(event: ScoreEvent) -> Score {
    Score {
        team_a: event.team_a,
        team_b: event.team_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{memory_pool, seed_match};

    fn score(team_a: i32, team_b: i32) -> Score {
        Score { team_a, team_b }
    }

    #[test]
    fn increments_and_steps_back_in_order() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();
        let fixture = seed_match(&conn);
        let m = fixture.match_id;

        record_or_step_back(&mut conn, m, ScoreAction::Increment(fixture.team_a), None).unwrap();
        assert_eq!(current_score(&conn, m).unwrap(), score(1, 0));

        record_or_step_back(&mut conn, m, ScoreAction::Increment(fixture.team_b), None).unwrap();
        assert_eq!(current_score(&conn, m).unwrap(), score(1, 1));

        record_or_step_back(&mut conn, m, ScoreAction::Stepback, None).unwrap();
        assert_eq!(current_score(&conn, m).unwrap(), score(1, 0));

        record_or_step_back(&mut conn, m, ScoreAction::Stepback, None).unwrap();
        assert_eq!(current_score(&conn, m).unwrap(), score(0, 0));

        // Stepback on an empty ledger is a defined no-op.
        let result =
            record_or_step_back(&mut conn, m, ScoreAction::Stepback, None).unwrap();
        assert_eq!(result, score(0, 0));
        assert_eq!(current_score(&conn, m).unwrap(), score(0, 0));
    }

    #[test]
    fn unknown_team_is_rejected_without_mutation() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();
        let fixture = seed_match(&conn);
        let m = fixture.match_id;

        record_or_step_back(&mut conn, m, ScoreAction::Increment(fixture.team_a), None).unwrap();

        let result = record_or_step_back(&mut conn, m, ScoreAction::Increment(9999), None);
        assert!(matches!(result, Err(CoreError::InvalidTeamReference)));
        assert_eq!(current_score(&conn, m).unwrap(), score(1, 0));
    }

    #[test]
    fn missing_match_is_not_found() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();
        seed_match(&conn);

        let result = record_or_step_back(&mut conn, 404, ScoreAction::Stepback, None);
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[test]
    fn incomplete_pairings_fail_before_mutation() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();
        let fixture = seed_match(&conn);

        let lone_match = crate::database::matches::insert_match(
            &conn,
            fixture.tournament_id,
            "1",
            None,
            "live",
        )
        .unwrap();
        crate::database::pairings::insert_pairing(&conn, lone_match, fixture.team_a).unwrap();

        let result = record_or_step_back(
            &mut conn,
            lone_match,
            ScoreAction::Increment(fixture.team_a),
            None,
        );
        assert!(matches!(result, Err(CoreError::TournamentPairingsIncomplete)));
        assert_eq!(current_score(&conn, lone_match).unwrap(), score(0, 0));
    }

    #[test]
    fn invalid_positions_leave_ledger_untouched() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();
        let fixture = seed_match(&conn);
        let m = fixture.match_id;

        let straddling = SlotAssignment {
            pos1: Some(fixture.players[0]),
            pos2: Some(fixture.players[2]),
            pos3: Some(fixture.players[1]),
            pos4: Some(fixture.players[3]),
        };
        let result = record_or_step_back(
            &mut conn,
            m,
            ScoreAction::Increment(fixture.team_a),
            Some(&straddling),
        );
        assert!(matches!(result, Err(CoreError::PositionsCrossTeam)));
        assert_eq!(current_score(&conn, m).unwrap(), score(0, 0));
    }

    #[test]
    fn valid_positions_pass_through() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();
        let fixture = seed_match(&conn);

        let aligned = SlotAssignment {
            pos1: Some(fixture.players[0]),
            pos2: Some(fixture.players[1]),
            pos3: Some(fixture.players[2]),
            pos4: Some(fixture.players[3]),
        };
        let result = record_or_step_back(
            &mut conn,
            fixture.match_id,
            ScoreAction::Increment(fixture.team_a),
            Some(&aligned),
        )
        .unwrap();
        assert_eq!(result, score(1, 0));
    }

    #[test]
    fn concurrent_increments_do_not_lose_updates() {
        let db_path = std::env::temp_dir().join(format!(
            "courtside_ledger_test_{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&db_path);

        let pool = crate::database::create_pool(db_path.to_str().unwrap()).unwrap();
        let conn = pool.get().unwrap();
        crate::database::setup::reset_database(&conn).unwrap();
        let fixture = seed_match(&conn);
        drop(conn);

        let threads = 4;
        let increments_per_thread = 5;
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let pool = pool.clone();
                let match_id = fixture.match_id;
                let team_a = fixture.team_a;
                std::thread::spawn(move || {
                    for _ in 0..increments_per_thread {
                        let mut conn = pool.get().unwrap();
                        record_or_step_back(
                            &mut conn,
                            match_id,
                            ScoreAction::Increment(team_a),
                            None,
                        )
                        .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let conn = pool.get().unwrap();
        let final_score = current_score(&conn, fixture.match_id).unwrap();
        assert_eq!(final_score.team_a, threads * increments_per_thread);
        assert_eq!(final_score.team_b, 0);

        drop(conn);
        drop(pool);
        let _ = std::fs::remove_file(&db_path);
    }
}
