use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::Tournament;

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Tournament>> {
    let sql = "SELECT id, name, venue_name, total_rounds, max_age, eligible_gender, metadata, created_at FROM tournaments WHERE id = ?1";

    conn.query_row(sql, params![id], parse_tournament_row)
        .optional()
        .context("Failed to query tournament by id")
}

pub fn insert_tournament(
    conn: &Connection,
    name: &str,
    venue_name: &str,
    total_rounds: i32,
    max_age: Option<i32>,
    eligible_gender: &str,
    metadata: Option<&serde_json::Value>,
) -> Result<Tournament> {
    let sql = "INSERT INTO tournaments (name, venue_name, total_rounds, max_age, eligible_gender, metadata) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id, name, venue_name, total_rounds, max_age, eligible_gender, metadata, created_at";

    conn.query_row(
        sql,
        params![
            name,
            venue_name,
            total_rounds,
            max_age,
            eligible_gender,
            metadata.map(|m| m.to_string())
        ],
        parse_tournament_row,
    )
    .context("Failed to insert new tournament")
}

fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<Tournament> {
    let metadata: Option<String> = row.get(6)?;
    Ok(Tournament {
        id: row.get(0)?,
        name: row.get(1)?,
        venue_name: row.get(2)?,
        total_rounds: row.get(3)?,
        max_age: row.get(4)?,
        eligible_gender: row.get(5)?,
        // Malformed metadata is treated as absent rather than an error.
        metadata: metadata.and_then(|m| serde_json::from_str(&m).ok()),
        created_at: row.get(7)?,
    })
}
