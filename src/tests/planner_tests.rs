use super::balances;
use crate::models::*;
use crate::planner::{SettlementPlanner, plan_settlements};

#[test]
fn test_single_creditor_is_paid_by_each_debtor() {
    let _ = env_logger::try_init();
    let plan = plan_settlements(&balances(&[("A", 60.0), ("B", -30.0), ("C", -30.0)]));

    assert_eq!(
        plan.settlements,
        vec![Settlement::new("B", "A", 30.0), Settlement::new("C", "A", 30.0)]
    );
    assert!(plan.diagnostics.is_empty());
}

#[test]
fn test_largest_debtor_pays_largest_creditor_first() {
    let _ = env_logger::try_init();
    let plan = plan_settlements(&balances(&[("A", 40.0), ("B", 30.0), ("C", -50.0), ("D", -20.0)]));

    assert_eq!(
        plan.settlements,
        vec![
            Settlement::new("C", "A", 40.0),
            Settlement::new("C", "B", 10.0),
            Settlement::new("D", "B", 20.0),
        ]
    );
}

#[test]
fn test_multi_payer_balances_need_three_transfers() {
    let _ = env_logger::try_init();
    let plan = plan_settlements(&balances(&[("A", 35.0), ("B", 15.0), ("C", -25.0), ("D", -25.0)]));

    assert_eq!(
        plan.settlements,
        vec![
            Settlement::new("C", "A", 25.0),
            Settlement::new("D", "A", 10.0),
            Settlement::new("D", "B", 15.0),
        ]
    );
}

#[test]
fn test_sorting_is_by_balance_not_input_order() {
    let _ = env_logger::try_init();
    let plan = plan_settlements(&balances(&[("D", -10.0), ("C", -20.0), ("B", -70.0), ("A", 100.0)]));

    assert_eq!(
        plan.settlements,
        vec![
            Settlement::new("B", "A", 70.0),
            Settlement::new("C", "A", 20.0),
            Settlement::new("D", "A", 10.0),
        ]
    );
}

#[test]
fn test_ties_follow_participant_order() {
    let _ = env_logger::try_init();
    let ab = plan_settlements(&balances(&[("A", 10.0), ("B", 10.0), ("C", -20.0)]));
    let ba = plan_settlements(&balances(&[("B", 10.0), ("A", 10.0), ("C", -20.0)]));

    assert_eq!(
        ab.settlements,
        vec![Settlement::new("C", "A", 10.0), Settlement::new("C", "B", 10.0)]
    );
    assert_eq!(
        ba.settlements,
        vec![Settlement::new("C", "B", 10.0), Settlement::new("C", "A", 10.0)]
    );
}

#[test]
fn test_balances_within_tolerance_are_already_settled() {
    let _ = env_logger::try_init();
    let plan = plan_settlements(&balances(&[("A", 0.005), ("B", -0.009), ("C", 0.0)]));

    assert!(plan.settlements.is_empty());
    assert!(plan.diagnostics.is_empty());
}

#[test]
fn test_empty_balances_plan_nothing() {
    let empty = Balances::new();
    assert!(empty.is_empty());

    let plan = plan_settlements(&empty);

    assert!(plan.settlements.is_empty());
    assert!(plan.diagnostics.is_empty());
}

#[test]
fn test_unmatched_credit_is_reported_as_residual() {
    let _ = env_logger::try_init();
    let plan = plan_settlements(&balances(&[("A", 50.0), ("B", -20.0)]));

    assert_eq!(plan.settlements, vec![Settlement::new("B", "A", 20.0)]);
    assert_eq!(
        plan.diagnostics,
        vec![Diagnostic::ResidualImbalance {
            participant_id: "A".to_string(),
            amount: 30.0,
        }]
    );
    assert_eq!(plan.diagnostics[0].severity(), Severity::Error);
}

#[test]
fn test_sub_cent_leftover_from_rounding_is_informational() {
    let _ = env_logger::try_init();
    let plan = plan_settlements(&balances(&[("A", 66.67), ("B", -33.33), ("C", -33.33)]));

    assert_eq!(
        plan.settlements,
        vec![Settlement::new("B", "A", 33.33), Settlement::new("C", "A", 33.33)]
    );
    assert_eq!(
        plan.diagnostics,
        vec![Diagnostic::RoundingRemainder {
            participant_id: "A".to_string(),
            amount: 0.01,
        }]
    );
    assert_eq!(plan.diagnostics[0].severity(), Severity::Info);
}

#[test]
fn test_applying_plan_zeroes_balances() {
    let _ = env_logger::try_init();
    let start = balances(&[("A", 12.5), ("B", -7.25), ("C", 3.75), ("D", -9.0)]);

    let plan = SettlementPlanner::new().plan(&start);
    let after = start.apply_settlements(&plan.settlements);

    assert!(after.iter().all(|e| e.amount.abs() < 0.009));
    assert!(plan.settlements.iter().all(|s| s.from != s.to && s.amount > 0.009));
    assert!(plan.settlements.len() <= 3);
}

#[test]
fn test_settled_participants_do_not_widen_rounding_allowance() {
    let _ = env_logger::try_init();
    let mut entries: Vec<(String, f64)> = vec![("A".to_string(), 1.5), ("B".to_string(), -0.5)];
    entries.extend((0..200).map(|n| (format!("Z{}", n), 0.0)));
    let start: Balances = entries.into_iter().collect();

    let plan = plan_settlements(&start);

    assert_eq!(plan.settlements, vec![Settlement::new("B", "A", 0.5)]);
    assert_eq!(
        plan.diagnostics,
        vec![Diagnostic::ResidualImbalance {
            participant_id: "A".to_string(),
            amount: 1.0,
        }]
    );
}

#[test]
fn test_rounded_entries_set_the_allowance() {
    let _ = env_logger::try_init();
    let start = balances(&[("A", 0.01), ("B", 0.0), ("C", 0.0)]);

    let direct = SettlementPlanner::new().plan(&start);
    let rounded = SettlementPlanner::new().plan_rounded(&start, 3);

    assert!(direct.settlements.is_empty());
    assert!(matches!(
        direct.diagnostics.as_slice(),
        [Diagnostic::ResidualImbalance { .. }]
    ));
    assert_eq!(
        rounded.diagnostics,
        vec![Diagnostic::RoundingRemainder {
            participant_id: "A".to_string(),
            amount: 0.01,
        }]
    );
}

#[test]
fn test_non_finite_balances_are_left_out_and_reported() {
    let _ = env_logger::try_init();
    let start = balances(&[
        ("A", f64::INFINITY),
        ("B", f64::NEG_INFINITY),
        ("C", 10.0),
        ("D", -10.0),
        ("E", f64::NAN),
    ]);

    let plan = plan_settlements(&start);

    assert_eq!(plan.settlements, vec![Settlement::new("D", "C", 10.0)]);
    let flagged: Vec<&str> = plan
        .diagnostics
        .iter()
        .map(|d| match d {
            Diagnostic::ResidualImbalance { participant_id, .. } => participant_id.as_str(),
            other => panic!("unexpected diagnostic {:?}", other),
        })
        .collect();
    assert_eq!(flagged, vec!["A", "B", "E"]);
}
