mod planner_tests;
mod validation_tests;

use crate::models::{Balances, Participant};

pub fn participants(ids: &[&str]) -> Vec<Participant> {
    ids.iter()
        .map(|id| Participant::new(*id, format!("Person {}", id)))
        .collect()
}

pub fn balances(entries: &[(&str, f64)]) -> Balances {
    entries.iter().map(|(id, amount)| (id.to_string(), *amount)).collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} but got {}",
        expected,
        actual
    );
}
