use super::participant::ParticipantId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub participant_id: ParticipantId,
    pub amount: f64,
}

impl Payment {
    pub fn new(participant_id: impl Into<String>, amount: f64) -> Self {
        Payment {
            participant_id: participant_id.into(),
            amount,
        }
    }
}

/// Who fronted the money for an expense.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payer {
    /// One participant paid the whole amount.
    Simple { paid_by: ParticipantId },
    /// Several participants each covered a portion.
    Complex { payments: Vec<Payment> },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    pub split_between: Vec<ParticipantId>,
    pub payer: Payer,
}

impl Expense {
    pub fn simple(id: impl Into<String>, amount: f64, paid_by: impl Into<String>, split_between: &[&str]) -> Self {
        Expense {
            id: id.into(),
            description: None,
            amount,
            split_between: split_between.iter().map(|s| s.to_string()).collect(),
            payer: Payer::Simple {
                paid_by: paid_by.into(),
            },
        }
    }

    /// Builds a multi-payer expense; `amount` is taken from the payment total.
    pub fn complex(id: impl Into<String>, payments: Vec<Payment>, split_between: &[&str]) -> Self {
        let amount: f64 = payments.iter().map(|p| p.amount).filter(|a| *a > 0.0).sum();
        Expense {
            id: id.into(),
            description: None,
            amount,
            split_between: split_between.iter().map(|s| s.to_string()).collect(),
            payer: Payer::Complex { payments },
        }
    }

    /// Split members with repeats removed, first occurrence kept.
    pub fn split_members(&self) -> Vec<&str> {
        let mut members: Vec<&str> = Vec::with_capacity(self.split_between.len());
        for id in &self.split_between {
            if !members.contains(&id.as_str()) {
                members.push(id);
            }
        }
        members
    }

    /// Amount actually paid: the positive payments for a complex expense,
    /// `amount` otherwise.
    pub fn effective_total(&self) -> f64 {
        match &self.payer {
            Payer::Simple { .. } => self.amount,
            Payer::Complex { payments } => payments.iter().map(|p| p.amount).filter(|a| *a > 0.0).sum(),
        }
    }

    /// Every participant id the expense mentions, payers first, in order.
    pub fn referenced_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        match &self.payer {
            Payer::Simple { paid_by } => ids.push(paid_by),
            Payer::Complex { payments } => ids.extend(payments.iter().map(|p| p.participant_id.as_str())),
        }
        for id in &self.split_between {
            ids.push(id);
        }
        let mut seen: Vec<&str> = Vec::with_capacity(ids.len());
        ids.retain(|id| {
            if id.is_empty() || seen.contains(id) {
                false
            } else {
                seen.push(*id);
                true
            }
        });
        ids
    }
}
