//! Strict checks for callers that want bad input rejected instead of skipped.

use crate::constants::{MAX_EXPENSE_AMOUNT, MAX_ID_LENGTH, MAX_NAME_LENGTH, PAYMENT_TOTAL_TOLERANCE};
use crate::error::{FieldError, SettleError};
use crate::models::*;
use log::{debug, warn};

/// Rejects the first problem found in `participants` or `expenses`.
pub fn validate(participants: &[Participant], expenses: &[Expense]) -> Result<(), SettleError> {
    debug!(
        "Validating {} participants and {} expenses",
        participants.len(),
        expenses.len()
    );
    let roster = Roster::new(participants);
    if let Some(&dup) = roster.duplicates().first() {
        warn!("Duplicate participant {}", dup);
        return Err(SettleError::DuplicateParticipant(dup.to_string()));
    }
    for participant in participants {
        validate_string_input("participant.id", &participant.id, MAX_ID_LENGTH)?;
        validate_string_input("participant.name", &participant.name, MAX_NAME_LENGTH)?;
    }
    for expense in expenses {
        validate_expense(&roster, expense)?;
    }
    Ok(())
}

pub fn validate_expense(roster: &Roster<'_>, expense: &Expense) -> Result<(), SettleError> {
    if expense.split_members().iter().all(|id| id.trim().is_empty()) {
        return Err(SettleError::EmptySplit(expense.id.clone()));
    }

    match &expense.payer {
        Payer::Simple { paid_by } => {
            if paid_by.trim().is_empty() {
                return Err(SettleError::MissingPayer(expense.id.clone()));
            }
            validate_amount_input("amount", expense.amount, true)?;
        }
        Payer::Complex { payments } => {
            if payments.is_empty() {
                return Err(SettleError::MissingPayer(expense.id.clone()));
            }
            for payment in payments {
                if payment.participant_id.trim().is_empty() {
                    return Err(SettleError::MissingPayer(expense.id.clone()));
                }
                validate_amount_input("payments.amount", payment.amount, false)?;
            }
            validate_amount_input("amount", expense.amount, true)?;
            let paid = expense.effective_total();
            if (paid - expense.amount).abs() > PAYMENT_TOTAL_TOLERANCE {
                warn!(
                    "Expense {} states {} but payments total {}",
                    expense.id, expense.amount, paid
                );
                return Err(SettleError::PaymentTotalMismatch {
                    expense_id: expense.id.clone(),
                    stated: expense.amount,
                    paid,
                });
            }
        }
    }

    for id in expense.referenced_ids() {
        if !roster.contains(id) {
            return Err(SettleError::UnknownParticipant {
                expense_id: expense.id.clone(),
                participant_id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_string_input(field: &str, value: &str, max_length: usize) -> Result<(), SettleError> {
    if value.trim().is_empty() {
        return Err(SettleError::InvalidInput(
            field.to_string(),
            FieldError::new(field, format!("Invalid {}", field), format!("{} cannot be empty", field)),
        ));
    }
    if value.len() > max_length {
        return Err(SettleError::InvalidInput(
            field.to_string(),
            FieldError::new(
                field,
                format!("{} Too Long", field),
                format!("{} cannot exceed {} characters", field, max_length),
            ),
        ));
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(SettleError::InvalidInput(
            field.to_string(),
            FieldError::new(
                field,
                format!("Invalid {}", field),
                format!("{} contains control characters", field),
            ),
        ));
    }
    Ok(())
}

fn validate_amount_input(field: &str, amount: f64, allow_zero: bool) -> Result<(), SettleError> {
    if !amount.is_finite() {
        return Err(SettleError::InvalidInput(
            field.to_string(),
            FieldError::new(field, "Invalid Amount", "Amount must be a finite number"),
        ));
    }
    if amount < 0.0 || (!allow_zero && amount == 0.0) {
        let description = if allow_zero {
            "Amount cannot be negative"
        } else {
            "Amount must be greater than 0"
        };
        return Err(SettleError::InvalidInput(
            field.to_string(),
            FieldError::new(field, "Invalid Amount", description),
        ));
    }
    if amount > MAX_EXPENSE_AMOUNT {
        return Err(SettleError::InvalidInput(
            field.to_string(),
            FieldError::new(
                field,
                "Amount Too Large",
                format!("Amount cannot exceed {}", MAX_EXPENSE_AMOUNT),
            ),
        ));
    }
    Ok(())
}
