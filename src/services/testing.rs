use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::database::{self, DbPool};

/// Single-connection in-memory pool with the schema applied. One connection
/// because every in-memory SQLite connection is its own database.
pub fn memory_pool() -> DbPool {
    let manager = SqliteConnectionManager::memory();
    let pool = r2d2::Pool::builder().max_size(1).build(manager).unwrap();
    let conn = pool.get().unwrap();
    database::setup::reset_database(&conn).unwrap();
    pool
}

pub struct MatchFixture {
    pub tournament_id: i64,
    pub match_id: i64,
    pub court_number: i64,
    pub team_a: i64,
    pub team_b: i64,
    /// players[0..2] belong to team A, players[2..4] to team B.
    pub players: Vec<i64>,
}

/// One live match on court 7 in round "1" with two full doubles teams.
pub fn seed_match(conn: &Connection) -> MatchFixture {
    let tournament = database::tournaments::insert_tournament(
        conn,
        "Spring Open",
        "Riverside Courts",
        3,
        None,
        "MW",
        None,
    )
    .unwrap();

    let team_a = database::teams::insert_team(conn, "Alpha").unwrap();
    let team_b = database::teams::insert_team(conn, "Beta").unwrap();

    let mut players = Vec::new();
    for (name, team) in [
        ("ana", team_a),
        ("aldo", team_a),
        ("bea", team_b),
        ("boris", team_b),
    ] {
        let player_id = database::teams::insert_player(conn, name, None).unwrap();
        database::teams::add_team_player(conn, team, player_id).unwrap();
        players.push(player_id);
    }

    let court_number = 7;
    let court_id = database::matches::insert_court(conn, court_number).unwrap();
    let match_id =
        database::matches::insert_match(conn, tournament.id, "1", Some(court_id), "live")
            .unwrap();
    database::pairings::insert_pairing(conn, match_id, team_a).unwrap();
    database::pairings::insert_pairing(conn, match_id, team_b).unwrap();

    MatchFixture {
        tournament_id: tournament.id,
        match_id,
        court_number,
        team_a,
        team_b,
        players,
    }
}
