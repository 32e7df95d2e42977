use super::participants;
use crate::error::SettleError;
use crate::models::*;
use crate::validation::validate;

#[test]
fn test_valid_input_passes() {
    let people = participants(&["A", "B", "C"]);
    let expenses = vec![
        Expense::simple("e1", 90.0, "A", &["A", "B", "C"]),
        Expense::complex(
            "e2",
            vec![Payment::new("B", 10.0), Payment::new("C", 5.5)],
            &["A", "C"],
        ),
        Expense::simple("free", 0.0, "C", &["A"]),
    ];

    assert!(validate(&people, &expenses).is_ok());
}

#[test]
fn test_duplicate_participant_is_rejected() {
    let people = vec![Participant::new("A", "Alice"), Participant::new("A", "Alias")];

    let result = validate(&people, &[]);

    assert!(matches!(result, Err(SettleError::DuplicateParticipant(id)) if id == "A"));
}

#[test]
fn test_blank_participant_name_is_rejected() {
    let people = vec![Participant::new("A", "  ")];

    let result = validate(&people, &[]);

    assert!(matches!(result, Err(SettleError::InvalidInput(field, _)) if field == "participant.name"));
}

#[test]
fn test_missing_payer_is_rejected() {
    let people = participants(&["A", "B"]);
    let expenses = vec![Expense::complex("e1", vec![], &["A", "B"])];

    let result = validate(&people, &expenses);

    assert!(matches!(result, Err(SettleError::MissingPayer(id)) if id == "e1"));
}

#[test]
fn test_negative_amount_is_rejected() {
    let people = participants(&["A", "B"]);
    let expenses = vec![Expense::simple("e1", -1.0, "A", &["A", "B"])];

    let result = validate(&people, &expenses);

    match result {
        Err(SettleError::InvalidInput(field, detail)) => {
            assert_eq!(field, "amount");
            assert_eq!(detail.description, "Amount cannot be negative");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_zero_payment_is_rejected() {
    let people = participants(&["A", "B"]);
    let expenses = vec![Expense::complex(
        "e1",
        vec![Payment::new("A", 10.0), Payment::new("B", 0.0)],
        &["A", "B"],
    )];

    let result = validate(&people, &expenses);

    assert!(matches!(result, Err(SettleError::InvalidInput(field, _)) if field == "payments.amount"));
}

#[test]
fn test_payment_total_must_match_stated_amount() {
    let people = participants(&["A", "B"]);
    let mut expense = Expense::complex(
        "e1",
        vec![Payment::new("A", 60.0), Payment::new("B", 40.0)],
        &["A", "B"],
    );
    expense.amount = 120.0;

    let result = validate(&people, &[expense]);

    assert!(matches!(
        result,
        Err(SettleError::PaymentTotalMismatch { stated, paid, .. }) if stated == 120.0 && paid == 100.0
    ));
}

#[test]
fn test_unknown_payer_is_rejected() {
    let people = participants(&["A", "B"]);
    let expenses = vec![Expense::simple("e1", 10.0, "Q", &["A", "B"])];

    let result = validate(&people, &expenses);

    assert!(matches!(
        result,
        Err(SettleError::UnknownParticipant { expense_id, participant_id })
            if expense_id == "e1" && participant_id == "Q"
    ));
}
