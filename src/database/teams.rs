use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, Connection};

use super::models::TeamPlayerRow;

pub fn list_team_players(conn: &Connection, team_ids: &[i64]) -> Result<Vec<TeamPlayerRow>> {
    if team_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; team_ids.len()].join(",");
    let sql = format!(
        "SELECT tp.team_id, tp.player_id, pl.username, pl.photo_url, tp.created_at FROM team_players tp JOIN players pl ON tp.player_id = pl.id WHERE tp.team_id IN ({placeholders}) ORDER BY tp.team_id, tp.player_id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(team_ids.iter()), parse_team_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn insert_team(conn: &Connection, name: &str) -> Result<i64> {
    let sql = "INSERT INTO teams (name) VALUES (?1)";

    conn.execute(sql, params![name])
        .context("Failed to insert team")?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_player(conn: &Connection, username: &str, photo_url: Option<&str>) -> Result<i64> {
    let sql = "INSERT INTO players (username, photo_url) VALUES (?1, ?2)";

    conn.execute(sql, params![username, photo_url])
        .context("Failed to insert player")?;
    Ok(conn.last_insert_rowid())
}

pub fn add_team_player(conn: &Connection, team_id: i64, player_id: i64) -> Result<()> {
    let sql = "INSERT INTO team_players (team_id, player_id) VALUES (?1, ?2)";

    conn.execute(sql, params![team_id, player_id])
        .context("Failed to add player to team")
        .map(|_| ())
}

fn parse_team_player_row(row: &rusqlite::Row) -> rusqlite::Result<TeamPlayerRow> {
    Ok(TeamPlayerRow {
        team_id: row.get(0)?,
        player_id: row.get(1)?,
        username: row.get(2)?,
        photo_url: row.get(3)?,
        joined_at: row.get(4)?,
    })
}
