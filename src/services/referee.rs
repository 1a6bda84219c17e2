use rusqlite::Connection;

use crate::database;
use crate::errors::{CoreError, CoreResult};

/// Score mutations and referee views require an assignment row for the
/// (tournament, player) pair.
pub fn ensure_referee(conn: &Connection, tournament_id: i64, player_id: i64) -> CoreResult<()> {
    match database::referees::find_assignment(conn, tournament_id, player_id)? {
        Some(_) => Ok(()),
        None => Err(CoreError::Unauthorized),
    }
}

/// Registers the player as a referee for the tournament. Idempotent.
pub fn join_as_referee(conn: &Connection, tournament_id: i64, player_id: i64) -> CoreResult<()> {
    if database::tournaments::find_by_id(conn, tournament_id)?.is_none() {
        return Err(CoreError::NotFound("tournament"));
    }

    database::referees::insert_assignment(conn, tournament_id, player_id)?;
    Ok(())
}
