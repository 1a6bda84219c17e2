use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::MatchRow;

const MATCH_COLUMNS: &str = "m.id, m.tournament_id, m.round, c.court_number, m.status, m.winner_team_id, m.created_at";

/// A match is addressed by the (tournament, round, match) triple; all three
/// must agree or the match does not resolve.
pub fn find_scoped(
    conn: &Connection,
    tournament_id: i64,
    round: &str,
    match_id: i64,
) -> Result<Option<MatchRow>> {
    let sql = format!(
        "SELECT {MATCH_COLUMNS} FROM matches m LEFT JOIN courts c ON m.court_id = c.id WHERE m.id = ?1 AND m.tournament_id = ?2 AND m.round = ?3"
    );

    conn.query_row(&sql, params![match_id, tournament_id, round], parse_match_row)
        .optional()
        .context("Failed to query match by tournament, round and id")
}

pub fn find_by_id(conn: &Connection, match_id: i64) -> Result<Option<MatchRow>> {
    let sql = format!(
        "SELECT {MATCH_COLUMNS} FROM matches m LEFT JOIN courts c ON m.court_id = c.id WHERE m.id = ?1"
    );

    conn.query_row(&sql, params![match_id], parse_match_row)
        .optional()
        .context("Failed to query match by id")
}

pub fn list_by_round(
    conn: &Connection,
    tournament_id: i64,
    round: &str,
) -> Result<Vec<MatchRow>> {
    let sql = format!(
        "SELECT {MATCH_COLUMNS} FROM matches m LEFT JOIN courts c ON m.court_id = c.id WHERE m.tournament_id = ?1 AND m.round = ?2 ORDER BY m.id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![tournament_id, round], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn insert_court(conn: &Connection, court_number: i64) -> Result<i64> {
    let sql = "INSERT INTO courts (court_number) VALUES (?1)";

    conn.execute(sql, params![court_number])
        .context("Failed to insert court")?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_match(
    conn: &Connection,
    tournament_id: i64,
    round: &str,
    court_id: Option<i64>,
    status: &str,
) -> Result<i64> {
    let sql = "INSERT INTO matches (tournament_id, round, court_id, status) VALUES (?1, ?2, ?3, ?4)";

    conn.execute(sql, params![tournament_id, round, court_id, status])
        .context("Failed to insert new match")?;
    Ok(conn.last_insert_rowid())
}

pub fn set_winner(conn: &Connection, match_id: i64, winner_team_id: i64, status: &str) -> Result<()> {
    let sql = "UPDATE matches SET winner_team_id = ?1, status = ?2 WHERE id = ?3";

    conn.execute(sql, params![winner_team_id, status, match_id])
        .context("Failed to set match winner")
        .map(|_| ())
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<MatchRow> {
    Ok(MatchRow {
        id: row.get(0)?,
        tournament_id: row.get(1)?,
        round: row.get(2)?,
        court_number: row.get(3)?,
        status: row.get(4)?,
        winner_team_id: row.get(5)?,
        created_at: row.get(6)?,
    })
}
