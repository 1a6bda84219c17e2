use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::RefereeAssignment;

pub fn find_assignment(
    conn: &Connection,
    tournament_id: i64,
    player_id: i64,
) -> Result<Option<RefereeAssignment>> {
    let sql = "SELECT id, tournament_id, player_id FROM tournament_referees WHERE tournament_id = ?1 AND player_id = ?2";

    conn.query_row(sql, params![tournament_id, player_id], parse_assignment_row)
        .optional()
        .context("Failed to query referee assignment")
}

pub fn insert_assignment(
    conn: &Connection,
    tournament_id: i64,
    player_id: i64,
) -> Result<RefereeAssignment> {
    if let Some(existing) = find_assignment(conn, tournament_id, player_id)? {
        return Ok(existing);
    }

    let sql = "INSERT INTO tournament_referees (tournament_id, player_id) VALUES (?1, ?2) RETURNING id, tournament_id, player_id";

    conn.query_row(sql, params![tournament_id, player_id], parse_assignment_row)
        .context("Failed to insert referee assignment")
}

fn parse_assignment_row(row: &rusqlite::Row) -> rusqlite::Result<RefereeAssignment> {
    Ok(RefereeAssignment {
        id: row.get(0)?,
        tournament_id: row.get(1)?,
        player_id: row.get(2)?,
    })
}
