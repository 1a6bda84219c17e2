use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use super::models::ScoreEvent;

const SCORE_COLUMNS: &str = "id, match_id, team_a, team_b, created_at";

/// Latest event wins; ties on created_at fall back to insertion order.
pub fn find_latest(conn: &Connection, match_id: i64) -> Result<Option<ScoreEvent>> {
    let sql = format!(
        "SELECT {SCORE_COLUMNS} FROM scores WHERE match_id = ?1 ORDER BY created_at DESC, id DESC LIMIT 1"
    );

    conn.query_row(&sql, params![match_id], parse_score_row)
        .optional()
        .context("Failed to query latest score event")
}

pub fn list_by_match(conn: &Connection, match_id: i64) -> Result<Vec<ScoreEvent>> {
    let sql = format!(
        "SELECT {SCORE_COLUMNS} FROM scores WHERE match_id = ?1 ORDER BY created_at, id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![match_id], parse_score_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_by_match_ids(conn: &Connection, match_ids: &[i64]) -> Result<Vec<ScoreEvent>> {
    if match_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; match_ids.len()].join(",");
    let sql = format!(
        "SELECT {SCORE_COLUMNS} FROM scores WHERE match_id IN ({placeholders}) ORDER BY created_at, id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(match_ids.iter()), parse_score_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn insert_event(
    conn: &Connection,
    match_id: i64,
    team_a: i32,
    team_b: i32,
) -> Result<ScoreEvent> {
    let sql = format!(
        "INSERT INTO scores (match_id, team_a, team_b) VALUES (?1, ?2, ?3) RETURNING {SCORE_COLUMNS}"
    );

    conn.query_row(&sql, params![match_id, team_a, team_b], parse_score_row)
        .context("Failed to insert score event")
}

/// Deletes exactly the given event. The caller must hold a write
/// transaction so the "find latest, delete it" pair cannot race.
pub fn delete_by_id(conn: &Connection, score_id: i64) -> Result<()> {
    let sql = "DELETE FROM scores WHERE id = ?1";

    conn.execute(sql, params![score_id])
        .context("Failed to delete score event")
        .map(|_| ())
}

fn parse_score_row(row: &rusqlite::Row) -> rusqlite::Result<ScoreEvent> {
    Ok(ScoreEvent {
        id: row.get(0)?,
        match_id: row.get(1)?,
        team_a: row.get(2)?,
        team_b: row.get(3)?,
        created_at: row.get(4)?,
    })
}
