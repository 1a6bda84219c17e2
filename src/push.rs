use serde::Serialize;
use tokio::sync::broadcast;

/// Message contract for the live push transport. The transport itself is an
/// external collaborator; this core only publishes one message per
/// successful ledger mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PushMessage {
    ScoreUpdate {
        #[serde(rename = "teamA")]
        team_a: i32,
        #[serde(rename = "teamB")]
        team_b: i32,
    },
    MatchEnd {
        #[serde(rename = "winnerTeamId")]
        winner_team_id: i64,
    },
}

/// Fan-out point between the score ledger and whatever transport is
/// attached. Publishing never blocks; messages are dropped when nobody
/// listens.
#[derive(Clone)]
pub struct PushBroadcaster {
    sender: broadcast::Sender<PushMessage>,
}

impl PushBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PushMessage> {
        self.sender.subscribe()
    }

    pub fn publish(&self, message: PushMessage) {
        if let Err(err) = self.sender.send(message) {
            log::debug!("No push subscribers, dropping message: {:?}", err.0);
        }
    }
}
