use super::participant::ParticipantId;
use super::settlement::Settlement;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BalanceEntry {
    pub participant_id: ParticipantId,
    /// Positive: the group owes this participant. Negative: they owe the group.
    pub amount: f64,
}

/// Net balance per participant, kept in the order participants were first seen.
///
/// Insertion order matters: the settlement planner breaks ties between equal
/// balances by it, which keeps plans reproducible.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<BalanceEntry>", into = "Vec<BalanceEntry>")]
pub struct Balances {
    entries: Vec<BalanceEntry>,
    index: HashMap<ParticipantId, usize>,
}

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id` with a zero balance unless already present.
    pub fn ensure(&mut self, id: &str) {
        if !self.index.contains_key(id) {
            self.index.insert(id.to_string(), self.entries.len());
            self.entries.push(BalanceEntry {
                participant_id: id.to_string(),
                amount: 0.0,
            });
        }
    }

    pub fn add(&mut self, id: &str, delta: f64) {
        self.ensure(id);
        if let Some(&pos) = self.index.get(id) {
            self.entries[pos].amount += delta;
        }
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.index.get(id).map(|&pos| self.entries[pos].amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BalanceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    pub fn map_amounts(&mut self, f: impl Fn(f64) -> f64) {
        for entry in &mut self.entries {
            entry.amount = f(entry.amount);
        }
    }

    /// Balances left after every settlement is paid: the payer's debt shrinks
    /// (`from += amount`) and the receiver's credit shrinks (`to -= amount`).
    pub fn apply_settlements(&self, settlements: &[Settlement]) -> Balances {
        let mut after = self.clone();
        for s in settlements {
            after.add(&s.from, s.amount);
            after.add(&s.to, -s.amount);
        }
        after
    }

    pub fn to_map(&self) -> HashMap<ParticipantId, f64> {
        self.entries
            .iter()
            .map(|e| (e.participant_id.clone(), e.amount))
            .collect()
    }
}

impl From<Vec<BalanceEntry>> for Balances {
    fn from(entries: Vec<BalanceEntry>) -> Self {
        let mut balances = Balances::new();
        for entry in entries {
            balances.add(&entry.participant_id, entry.amount);
        }
        balances
    }
}

impl From<Balances> for Vec<BalanceEntry> {
    fn from(balances: Balances) -> Self {
        balances.entries
    }
}

impl FromIterator<(ParticipantId, f64)> for Balances {
    fn from_iter<I: IntoIterator<Item = (ParticipantId, f64)>>(iter: I) -> Self {
        let mut balances = Balances::new();
        for (id, amount) in iter {
            balances.add(&id, amount);
        }
        balances
    }
}
