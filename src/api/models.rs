use serde::{Deserialize, Serialize};

use crate::domain::SlotAssignment;
use crate::services::ledger::Score;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundLabelsResponse {
    pub tournament_id: i64,
    pub rounds: Vec<String>,
}

/// Body of a referee score update: either an increment for `new_score`'s
/// team or a stepback, optionally carrying a slot assignment to validate.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdateRequest {
    pub new_score: Option<i64>,
    pub stepback: Option<bool>,
    pub positions: Option<SlotAssignment>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdateResponse {
    pub success: bool,
    pub scores: Score,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub access: bool,
}
