use std::collections::HashMap;

use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, Connection};

pub fn map_by_player_ids(conn: &Connection, player_ids: &[i64]) -> Result<HashMap<i64, f64>> {
    if player_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let placeholders = vec!["?"; player_ids.len()].join(",");
    let sql =
        format!("SELECT player_id, mu FROM ratings WHERE player_id IN ({placeholders})");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(player_ids.iter()), |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, f64>(1)?))
        })?
        .collect::<rusqlite::Result<HashMap<_, _>>>()
        .context("Failed to query player ratings")?;

    Ok(rows)
}

pub fn upsert_rating(conn: &Connection, player_id: i64, mu: f64) -> Result<()> {
    let sql = "INSERT INTO ratings (player_id, mu) VALUES (?1, ?2) ON CONFLICT(player_id) DO UPDATE SET mu = excluded.mu";

    conn.execute(sql, params![player_id, mu])
        .context("Failed to upsert rating")
        .map(|_| ())
}
