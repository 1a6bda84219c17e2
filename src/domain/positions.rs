use serde::Deserialize;

use crate::errors::{CoreError, CoreResult};

/// Referee-submitted court slot assignment: slots 1 and 2 belong to one
/// team, slots 3 and 4 to the other.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotAssignment {
    pub pos1: Option<i64>,
    pub pos2: Option<i64>,
    pub pos3: Option<i64>,
    pub pos4: Option<i64>,
}

/// Validates a slot assignment against the current team memberships,
/// given as (team_id, player_id) pairs. The assignment itself is not
/// persisted; only the accept/reject outcome matters here.
pub fn validate_positions(
    assignment: &SlotAssignment,
    memberships: &[(i64, i64)],
) -> CoreResult<()> {
    let (Some(pos1), Some(pos2), Some(pos3), Some(pos4)) = (
        assignment.pos1,
        assignment.pos2,
        assignment.pos3,
        assignment.pos4,
    ) else {
        return Err(CoreError::PositionsIncomplete);
    };

    let front = team_of(pos1, memberships);
    if front.is_none() || front != team_of(pos2, memberships) {
        return Err(CoreError::PositionsCrossTeam);
    }

    let back = team_of(pos3, memberships);
    if back.is_none() || back != team_of(pos4, memberships) {
        return Err(CoreError::PositionsCrossTeam);
    }

    if front == back {
        return Err(CoreError::PositionsCrossTeam);
    }

    Ok(())
}

fn team_of(player_id: i64, memberships: &[(i64, i64)]) -> Option<i64> {
    memberships
        .iter()
        .find(|(_, member)| *member == player_id)
        .map(|(team, _)| *team)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memberships() -> Vec<(i64, i64)> {
        vec![(10, 1), (10, 2), (20, 3), (20, 4)]
    }

    fn assignment(pos1: i64, pos2: i64, pos3: i64, pos4: i64) -> SlotAssignment {
        SlotAssignment {
            pos1: Some(pos1),
            pos2: Some(pos2),
            pos3: Some(pos3),
            pos4: Some(pos4),
        }
    }

    #[test]
    fn accepts_team_aligned_slots() {
        assert!(validate_positions(&assignment(1, 2, 3, 4), &memberships()).is_ok());
        assert!(validate_positions(&assignment(4, 3, 2, 1), &memberships()).is_ok());
    }

    #[test]
    fn rejects_missing_slots() {
        let partial = SlotAssignment {
            pos1: Some(1),
            pos2: Some(2),
            pos3: Some(3),
            pos4: None,
        };
        assert!(matches!(
            validate_positions(&partial, &memberships()),
            Err(CoreError::PositionsIncomplete)
        ));
    }

    #[test]
    fn rejects_slots_straddling_teams() {
        assert!(matches!(
            validate_positions(&assignment(1, 3, 2, 4), &memberships()),
            Err(CoreError::PositionsCrossTeam)
        ));
    }

    #[test]
    fn rejects_both_pairs_on_one_team() {
        let memberships = vec![(10, 1), (10, 2), (10, 3), (10, 4)];
        assert!(matches!(
            validate_positions(&assignment(1, 2, 3, 4), &memberships),
            Err(CoreError::PositionsCrossTeam)
        ));
    }

    #[test]
    fn rejects_players_outside_the_match() {
        assert!(matches!(
            validate_positions(&assignment(1, 2, 3, 99), &memberships()),
            Err(CoreError::PositionsCrossTeam)
        ));
    }
}
