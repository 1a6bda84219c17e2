use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct Tournament {
    pub id: i64,
    pub name: String,
    pub venue_name: String,
    pub total_rounds: i32,
    pub max_age: Option<i32>,
    pub eligible_gender: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct MatchRow {
    pub id: i64,
    pub tournament_id: i64,
    pub round: String,
    pub court_number: Option<i64>,
    pub status: String,
    pub winner_team_id: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
}

/// One team's slot in a match, joined with the team name.
/// Pairings are always fetched ordered by id; the first row is side A.
#[derive(Debug, Clone)]
pub struct Pairing {
    pub id: i64,
    pub match_id: i64,
    pub team_id: i64,
    pub team_name: String,
}

#[derive(Debug, Clone)]
pub struct TeamPlayerRow {
    pub team_id: i64,
    pub player_id: i64,
    pub username: String,
    pub photo_url: Option<String>,
    pub joined_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct ScoreEvent {
    pub id: i64,
    pub match_id: i64,
    pub team_a: i32,
    pub team_b: i32,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct RefereeAssignment {
    pub id: i64,
    pub tournament_id: i64,
    pub player_id: i64,
}
