use super::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedReason {
    EmptySplit,
    MissingPayer,
    NoPositivePayment,
    InvalidAmount,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MalformedReason::EmptySplit => "split set is empty",
            MalformedReason::MissingPayer => "payer is missing",
            MalformedReason::NoPositivePayment => "no payment with a positive amount",
            MalformedReason::InvalidAmount => "amount is negative or out of range",
        };
        write!(f, "{}", s)
    }
}

/// Why one entry of a multi-payer list was left out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoredPaymentReason {
    BlankParticipant,
    NonPositiveAmount,
}

impl fmt::Display for IgnoredPaymentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IgnoredPaymentReason::BlankParticipant => "no participant id",
            IgnoredPaymentReason::NonPositiveAmount => "amount is not positive",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Non-fatal finding reported alongside balances and settlements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The expense was skipped and did not touch any balance.
    MalformedExpense {
        expense_id: String,
        reason: MalformedReason,
    },
    /// The expense mentions an id that is not in the participant list.
    UnknownParticipantReference {
        expense_id: String,
        participant_id: ParticipantId,
    },
    /// An entry in a multi-payer list was left out of the total.
    IgnoredPayment {
        expense_id: String,
        participant_id: ParticipantId,
        amount: f64,
        reason: IgnoredPaymentReason,
    },
    DuplicateParticipant { participant_id: ParticipantId },
    /// Money left unmatched after planning, beyond what rounding explains.
    ResidualImbalance {
        participant_id: ParticipantId,
        amount: f64,
    },
    /// Sub-cent leftover caused by rounding each balance to cents.
    RoundingRemainder {
        participant_id: ParticipantId,
        amount: f64,
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::MalformedExpense { .. } | Diagnostic::DuplicateParticipant { .. } => Severity::Warning,
            Diagnostic::UnknownParticipantReference { .. } | Diagnostic::IgnoredPayment { .. } => Severity::Warning,
            Diagnostic::ResidualImbalance { .. } => Severity::Error,
            Diagnostic::RoundingRemainder { .. } => Severity::Info,
        }
    }

    pub fn expense_id(&self) -> Option<&str> {
        match self {
            Diagnostic::MalformedExpense { expense_id, .. }
            | Diagnostic::UnknownParticipantReference { expense_id, .. }
            | Diagnostic::IgnoredPayment { expense_id, .. } => Some(expense_id),
            _ => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedExpense { expense_id, reason } => {
                write!(f, "expense {} skipped: {}", expense_id, reason)
            }
            Diagnostic::UnknownParticipantReference {
                expense_id,
                participant_id,
            } => write!(
                f,
                "expense {} references unknown participant {}",
                expense_id, participant_id
            ),
            Diagnostic::IgnoredPayment {
                expense_id,
                participant_id,
                amount,
                reason,
            } => match reason {
                IgnoredPaymentReason::BlankParticipant => {
                    write!(f, "expense {} ignores payment {}: {}", expense_id, amount, reason)
                }
                IgnoredPaymentReason::NonPositiveAmount => write!(
                    f,
                    "expense {} ignores payment {} by {}: {}",
                    expense_id, amount, participant_id, reason
                ),
            },
            Diagnostic::DuplicateParticipant { participant_id } => {
                write!(f, "participant {} listed more than once", participant_id)
            }
            Diagnostic::ResidualImbalance {
                participant_id,
                amount,
            } => write!(f, "{} left unmatched on participant {}", amount, participant_id),
            Diagnostic::RoundingRemainder {
                participant_id,
                amount,
            } => write!(f, "rounding remainder {} on participant {}", amount, participant_id),
        }
    }
}
