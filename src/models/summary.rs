use super::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// What a participant fronted, what they consumed, and the difference.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ParticipantSummary {
    pub participant_id: ParticipantId,
    /// `None` for ids that only appeared inside expenses.
    pub name: Option<String>,
    pub total_paid: f64,
    pub total_share: f64,
    pub balance: f64,
}

impl ParticipantSummary {
    pub fn is_known(&self) -> bool {
        self.name.is_some()
    }
}
