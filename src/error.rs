use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SettleError {
    /// Participant id appears more than once in the participant list
    #[error("Participant {0} listed more than once")]
    DuplicateParticipant(String),

    /// Expense has nobody to split between
    #[error("Expense {0} has an empty split set")]
    EmptySplit(String),

    /// Expense has no usable payer for its declared shape
    #[error("Expense {0} has no payer")]
    MissingPayer(String),

    /// Expense refers to a participant not present in the participant list
    #[error("Expense {expense_id} references unknown participant {participant_id}")]
    UnknownParticipant {
        expense_id: String,
        participant_id: String,
    },

    /// Complex expense payments do not add up to the stated amount
    #[error("Expense {expense_id} states {stated} but payments total {paid}")]
    PaymentTotalMismatch { expense_id: String, stated: f64, paid: f64 },

    /// Settlement plan left money unmatched
    #[error("Settlement left {amount} unmatched on participant {participant_id}")]
    ResidualImbalance { participant_id: String, amount: f64 },

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
