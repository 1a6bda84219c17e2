use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, Connection};

use super::models::Pairing;

/// Pairings are read in pairing-id order: the first row for a match is
/// side A, the second side B. Every query here must keep that ORDER BY.
pub fn list_by_match(conn: &Connection, match_id: i64) -> Result<Vec<Pairing>> {
    let sql = "SELECT p.id, p.match_id, p.team_id, t.name FROM pairings p JOIN teams t ON p.team_id = t.id WHERE p.match_id = ?1 ORDER BY p.id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![match_id], parse_pairing_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_by_match_ids(conn: &Connection, match_ids: &[i64]) -> Result<Vec<Pairing>> {
    if match_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; match_ids.len()].join(",");
    let sql = format!(
        "SELECT p.id, p.match_id, p.team_id, t.name FROM pairings p JOIN teams t ON p.team_id = t.id WHERE p.match_id IN ({placeholders}) ORDER BY p.match_id, p.id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(match_ids.iter()), parse_pairing_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn insert_pairing(conn: &Connection, match_id: i64, team_id: i64) -> Result<i64> {
    let sql = "INSERT INTO pairings (match_id, team_id) VALUES (?1, ?2)";

    conn.execute(sql, params![match_id, team_id])
        .context("Failed to insert pairing")?;
    Ok(conn.last_insert_rowid())
}

fn parse_pairing_row(row: &rusqlite::Row) -> rusqlite::Result<Pairing> {
    Ok(Pairing {
        id: row.get(0)?,
        match_id: row.get(1)?,
        team_id: row.get(2)?,
        team_name: row.get(3)?,
    })
}
