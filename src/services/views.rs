use std::collections::HashMap;

use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::Serialize;

use crate::database::{self, Pairing, ScoreEvent, TeamPlayerRow};
use crate::errors::{CoreError, CoreResult};
use crate::services::ledger::Score;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub photo_url: Option<String>,
    pub team_id: i64,
    /// "A" for the first pairing of the match, "B" for the second.
    pub team: &'static str,
    pub rating: Option<f64>,
    pub joined_at: Option<NaiveDateTime>,
}

/// Referee view of a player: no side label or rating decoration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefereePlayerView {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub photo_url: Option<String>,
    pub team_id: i64,
    pub joined_at: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEventView {
    pub id: i64,
    pub team_a: i32,
    pub team_b: i32,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub match_id: i64,
    pub tournament_name: String,
    pub round: String,
    pub status: String,
    pub court: Option<i64>,
    pub win_rate: String,
    pub scores: Vec<ScoreEventView>,
    pub players: Vec<PlayerView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefereeMatchView {
    pub match_id: i64,
    pub tournament_name: String,
    pub round: String,
    pub status: String,
    pub court: Option<i64>,
    pub scores: Score,
    pub players: Vec<RefereePlayerView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundPairingView {
    pub match_id: i64,
    pub court: Option<i64>,
    pub status: String,
    pub players: Vec<PlayerView>,
    pub scores: Score,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player_id: i64,
    pub name: String,
    pub rating: Option<f64>,
    pub wins: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundView {
    pub tournament_id: i64,
    pub tournament_name: String,
    pub round: String,
    pub pairings: Vec<RoundPairingView>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Full public detail of one match. Read-only; repeated calls over
/// unchanged data return identical output.
pub fn build_match_view(
    conn: &Connection,
    tournament_id: i64,
    round: &str,
    match_id: i64,
) -> CoreResult<MatchView> {
    let tournament = database::tournaments::find_by_id(conn, tournament_id)?
        .ok_or(CoreError::NotFound("tournament"))?;
    let match_row = database::matches::find_scoped(conn, tournament_id, round, match_id)?
        .ok_or(CoreError::NotFound("match"))?;

    let pairings = database::pairings::list_by_match(conn, match_id)?;
    let team_ids: Vec<i64> = pairings.iter().map(|p| p.team_id).collect();
    let team_players = database::teams::list_team_players(conn, &team_ids)?;
    let player_ids: Vec<i64> = team_players.iter().map(|tp| tp.player_id).collect();
    let ratings = database::ratings::map_by_player_ids(conn, &player_ids)?;
    let events = database::scores::list_by_match(conn, match_id)?;

    Ok(MatchView {
        match_id: match_row.id,
        tournament_name: tournament.name,
        round: match_row.round,
        status: match_row.status,
        court: match_row.court_number,
        win_rate: win_rate(events.last()),
        scores: events.iter().map(event_view).collect(),
        players: tag_players(&pairings, &team_players, &ratings),
    })
}

/// Referee detail of one match: latest score totals only, undecorated
/// players.
pub fn build_referee_match_view(
    conn: &Connection,
    tournament_id: i64,
    round: &str,
    match_id: i64,
) -> CoreResult<RefereeMatchView> {
    let tournament = database::tournaments::find_by_id(conn, tournament_id)?
        .ok_or(CoreError::NotFound("tournament"))?;
    let match_row = database::matches::find_scoped(conn, tournament_id, round, match_id)?
        .ok_or(CoreError::NotFound("match"))?;

    let pairings = database::pairings::list_by_match(conn, match_id)?;
    let team_ids: Vec<i64> = pairings.iter().map(|p| p.team_id).collect();
    let team_players = database::teams::list_team_players(conn, &team_ids)?;
    let latest = database::scores::find_latest(conn, match_id)?;

    let players = pairings
        .iter()
        .flat_map(|pairing| {
            team_players
                .iter()
                .filter(move |tp| tp.team_id == pairing.team_id)
                .map(|tp| RefereePlayerView {
                    id: tp.player_id,
                    name: tp.username.clone(),
                    username: tp.username.clone(),
                    photo_url: tp.photo_url.clone(),
                    team_id: tp.team_id,
                    joined_at: tp.joined_at,
                })
        })
        .collect();

    Ok(RefereeMatchView {
        match_id: match_row.id,
        tournament_name: tournament.name,
        round: match_row.round,
        status: match_row.status,
        court: match_row.court_number,
        scores: latest
            .map(|ev| Score {
                team_a: ev.team_a,
                team_b: ev.team_b,
            })
            .unwrap_or_default(),
        players,
    })
}

/// Court-grouped pairings plus the wins leaderboard for one round. All row
/// fetches are batched across the round's matches.
pub fn build_round_view(
    conn: &Connection,
    tournament_id: i64,
    round: &str,
) -> CoreResult<RoundView> {
    let tournament = database::tournaments::find_by_id(conn, tournament_id)?
        .ok_or(CoreError::NotFound("tournament"))?;

    let matches = database::matches::list_by_round(conn, tournament_id, round)?;
    let match_ids: Vec<i64> = matches.iter().map(|m| m.id).collect();

    let pairings = database::pairings::list_by_match_ids(conn, &match_ids)?;
    let team_ids: Vec<i64> = pairings.iter().map(|p| p.team_id).collect();
    let team_players = database::teams::list_team_players(conn, &team_ids)?;
    let player_ids: Vec<i64> = team_players.iter().map(|tp| tp.player_id).collect();
    let ratings = database::ratings::map_by_player_ids(conn, &player_ids)?;
    let events = database::scores::list_by_match_ids(conn, &match_ids)?;

    // Events come back in creation order, so the last write per match is
    // its current score.
    let mut latest_by_match: HashMap<i64, Score> = HashMap::new();
    for event in &events {
        latest_by_match.insert(
            event.match_id,
            Score {
                team_a: event.team_a,
                team_b: event.team_b,
            },
        );
    }

    let round_pairings = matches
        .iter()
        .map(|m| {
            let match_pairings: Vec<Pairing> = pairings
                .iter()
                .filter(|p| p.match_id == m.id)
                .cloned()
                .collect();
            RoundPairingView {
                match_id: m.id,
                court: m.court_number,
                status: m.status.clone(),
                players: tag_players(&match_pairings, &team_players, &ratings),
                scores: latest_by_match.get(&m.id).copied().unwrap_or_default(),
            }
        })
        .collect();

    let leaderboard = build_leaderboard(&matches, &pairings, &team_players, &ratings);

    Ok(RoundView {
        tournament_id: tournament.id,
        tournament_name: tournament.name,
        round: round.to_string(),
        pairings: round_pairings,
        leaderboard,
    })
}

fn build_leaderboard(
    matches: &[database::MatchRow],
    pairings: &[Pairing],
    team_players: &[TeamPlayerRow],
    ratings: &HashMap<i64, f64>,
) -> Vec<LeaderboardEntry> {
    let mut wins_by_player: HashMap<i64, i32> = HashMap::new();
    for m in matches {
        let Some(winner) = m.winner_team_id else {
            continue;
        };
        // The winner must actually be paired into this match.
        if !pairings
            .iter()
            .any(|p| p.match_id == m.id && p.team_id == winner)
        {
            continue;
        }
        for tp in team_players.iter().filter(|tp| tp.team_id == winner) {
            *wins_by_player.entry(tp.player_id).or_insert(0) += 1;
        }
    }

    let mut leaderboard: Vec<LeaderboardEntry> = wins_by_player
        .into_iter()
        .map(|(player_id, wins)| {
            let name = team_players
                .iter()
                .find(|tp| tp.player_id == player_id)
                .map(|tp| tp.username.clone())
                .unwrap_or_default();
            LeaderboardEntry {
                player_id,
                name,
                rating: ratings.get(&player_id).copied(),
                wins,
            }
        })
        .collect();

    // Wins descending; ties broken by player id so the order is stable
    // across backends.
    leaderboard.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.player_id.cmp(&b.player_id)));
    leaderboard
}

fn tag_players(
    pairings: &[Pairing],
    team_players: &[TeamPlayerRow],
    ratings: &HashMap<i64, f64>,
) -> Vec<PlayerView> {
    pairings
        .iter()
        .enumerate()
        .flat_map(|(idx, pairing)| {
            let side = if idx == 0 { "A" } else { "B" };
            team_players
                .iter()
                .filter(move |tp| tp.team_id == pairing.team_id)
                .map(move |tp| PlayerView {
                    id: tp.player_id,
                    name: tp.username.clone(),
                    username: tp.username.clone(),
                    photo_url: tp.photo_url.clone(),
                    team_id: tp.team_id,
                    team: side,
                    rating: ratings.get(&tp.player_id).copied(),
                    joined_at: tp.joined_at,
                })
        })
        .collect()
}

fn event_view(event: &ScoreEvent) -> ScoreEventView {
    ScoreEventView {
        id: event.id,
        team_a: event.team_a,
        team_b: event.team_b,
        created_at: event.created_at,
    }
}

/// Team A's share of the latest event total, e.g. "75.0%". "0%" when there
/// is no event or the total is zero.
fn win_rate(latest: Option<&ScoreEvent>) -> String {
    let Some(event) = latest else {
        return "0%".to_string();
    };
    let total = event.team_a + event.team_b;
    if total <= 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", f64::from(event.team_a) / f64::from(total) * 100.0)
}
