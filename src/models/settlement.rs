use super::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// One transfer instruction: `from` pays `to` the given amount.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Settlement {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: f64,
}

impl Settlement {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: f64) -> Self {
        Settlement {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    pub fn involves(&self, participant_id: &str) -> bool {
        self.from == participant_id || self.to == participant_id
    }
}
