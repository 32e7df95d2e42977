use crate::models::*;
use crate::money::RoundingMode;
use log::{debug, info, warn};
use serde::Serialize;

/// Output of one pass over the expense list.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Accumulation {
    pub balances: Balances,
    pub summaries: Vec<ParticipantSummary>,
    pub diagnostics: Vec<Diagnostic>,
    /// How many balances rounding to cents actually changed.
    pub rounded_entries: usize,
}

/// Running totals, all three kept in the same participant order.
#[derive(Default)]
struct Tally {
    net: Balances,
    paid: Balances,
    share: Balances,
}

impl Tally {
    fn ensure(&mut self, id: &str) {
        self.net.ensure(id);
        self.paid.ensure(id);
        self.share.ensure(id);
    }

    fn credit(&mut self, id: &str, amount: f64) {
        self.ensure(id);
        self.net.add(id, amount);
        self.paid.add(id, amount);
    }

    fn debit(&mut self, id: &str, amount: f64) {
        self.ensure(id);
        self.net.add(id, -amount);
        self.share.add(id, amount);
    }

    /// Replays the credits and debits on scratch copies of the touched totals
    /// and reports whether every one of them stays finite.
    fn stays_finite(&self, contribution: &Contribution<'_>, split_amount: f64) -> bool {
        if !split_amount.is_finite() {
            return false;
        }
        let mut net = Vec::new();
        let mut paid = Vec::new();
        let mut share = Vec::new();
        for &(id, amount) in &contribution.credits {
            if !(bump(&mut net, &self.net, id, amount) && bump(&mut paid, &self.paid, id, amount)) {
                return false;
            }
        }
        for &id in &contribution.members {
            if !(bump(&mut net, &self.net, id, -split_amount) && bump(&mut share, &self.share, id, split_amount)) {
                return false;
            }
        }
        true
    }
}

fn bump<'e>(scratch: &mut Vec<(&'e str, f64)>, totals: &Balances, id: &'e str, delta: f64) -> bool {
    let value = match scratch.iter_mut().find(|(seen, _)| *seen == id) {
        Some(entry) => {
            entry.1 += delta;
            entry.1
        }
        None => {
            let value = totals.get(id).unwrap_or(0.0) + delta;
            scratch.push((id, value));
            value
        }
    };
    value.is_finite()
}

/// A well-formed expense reduced to what actually moves balances.
struct Contribution<'e> {
    credits: Vec<(&'e str, f64)>,
    members: Vec<&'e str>,
    total: f64,
}

/// Walks expenses once and nets out who is owed and who owes.
#[derive(Clone, Copy, Debug, Default)]
pub struct BalanceAccumulator {
    rounding: RoundingMode,
}

impl BalanceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rounding(rounding: RoundingMode) -> Self {
        BalanceAccumulator { rounding }
    }

    pub fn compute(&self, participants: &[Participant], expenses: &[Expense]) -> Accumulation {
        info!(
            "Computing balances for {} participants over {} expenses",
            participants.len(),
            expenses.len()
        );
        let roster = Roster::new(participants);
        let mut diagnostics = Vec::new();

        for &id in roster.duplicates() {
            warn!("Participant {} listed more than once, keeping the first entry", id);
            diagnostics.push(Diagnostic::DuplicateParticipant {
                participant_id: id.to_string(),
            });
        }

        let mut tally = Tally::default();
        for participant in roster.members() {
            tally.ensure(&participant.id);
        }

        for expense in expenses {
            let contribution = match Self::contribution(expense, &mut diagnostics) {
                Ok(c) => c,
                Err(reason) => {
                    warn!("Skipping expense {}: {}", expense.id, reason);
                    diagnostics.push(Diagnostic::MalformedExpense {
                        expense_id: expense.id.clone(),
                        reason,
                    });
                    continue;
                }
            };

            let split_amount = contribution.total / contribution.members.len() as f64;
            if !tally.stays_finite(&contribution, split_amount) {
                warn!("Skipping expense {}: balances would overflow", expense.id);
                diagnostics.push(Diagnostic::MalformedExpense {
                    expense_id: expense.id.clone(),
                    reason: MalformedReason::InvalidAmount,
                });
                continue;
            }

            let mut unknown: Vec<&str> = Vec::new();
            let touched = contribution
                .credits
                .iter()
                .map(|(id, _)| *id)
                .chain(contribution.members.iter().copied());
            for id in touched {
                if let ParticipantRef::Unknown(id) = roster.resolve(id) {
                    if !unknown.contains(&id) {
                        unknown.push(id);
                    }
                }
            }
            for id in unknown {
                warn!("Expense {} references unknown participant {}", expense.id, id);
                diagnostics.push(Diagnostic::UnknownParticipantReference {
                    expense_id: expense.id.clone(),
                    participant_id: id.to_string(),
                });
            }

            debug!(
                "Expense {}: total {} split {} ways at {}",
                expense.id,
                contribution.total,
                contribution.members.len(),
                split_amount
            );
            for (payer, paid) in &contribution.credits {
                tally.credit(payer, *paid);
            }
            for member in &contribution.members {
                tally.debit(member, split_amount);
            }
        }

        let rounding = self.rounding;
        let rounded_entries = tally
            .net
            .iter()
            .filter(|e| rounding.round2(e.amount) != e.amount)
            .count();
        tally.net.map_amounts(|v| rounding.round2(v));

        let summaries = tally
            .net
            .iter()
            .map(|entry| ParticipantSummary {
                participant_id: entry.participant_id.clone(),
                name: roster.get(&entry.participant_id).map(|p| p.name.clone()),
                total_paid: rounding.round2(tally.paid.get(&entry.participant_id).unwrap_or(0.0)),
                total_share: rounding.round2(tally.share.get(&entry.participant_id).unwrap_or(0.0)),
                balance: entry.amount,
            })
            .collect();

        debug!("Balances computed: {:?}", tally.net);
        Accumulation {
            balances: tally.net,
            summaries,
            diagnostics,
            rounded_entries,
        }
    }

    /// Checks the expense shape and extracts who gets credited and who shares.
    fn contribution<'e>(
        expense: &'e Expense,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Contribution<'e>, MalformedReason> {
        let members: Vec<&str> = expense
            .split_members()
            .into_iter()
            .filter(|id| !id.trim().is_empty())
            .collect();
        if members.is_empty() {
            return Err(MalformedReason::EmptySplit);
        }

        let credits = match &expense.payer {
            Payer::Simple { paid_by } => {
                if paid_by.trim().is_empty() {
                    return Err(MalformedReason::MissingPayer);
                }
                if !expense.amount.is_finite() || expense.amount < 0.0 {
                    return Err(MalformedReason::InvalidAmount);
                }
                vec![(paid_by.as_str(), expense.amount)]
            }
            Payer::Complex { payments } => {
                if payments.is_empty() {
                    return Err(MalformedReason::MissingPayer);
                }
                let (usable, ignored): (Vec<&Payment>, Vec<&Payment>) = payments
                    .iter()
                    .partition(|p| p.amount > 0.0 && !p.participant_id.trim().is_empty());
                if usable.is_empty() {
                    return Err(MalformedReason::NoPositivePayment);
                }
                let credits: Vec<(&str, f64)> = usable
                    .into_iter()
                    .map(|p| (p.participant_id.as_str(), p.amount))
                    .collect();
                if !credits.iter().map(|(_, a)| a).sum::<f64>().is_finite() {
                    return Err(MalformedReason::InvalidAmount);
                }
                for p in ignored {
                    let reason = if p.participant_id.trim().is_empty() {
                        IgnoredPaymentReason::BlankParticipant
                    } else {
                        IgnoredPaymentReason::NonPositiveAmount
                    };
                    warn!(
                        "Expense {} ignores payment of {} by {:?}: {}",
                        expense.id, p.amount, p.participant_id, reason
                    );
                    diagnostics.push(Diagnostic::IgnoredPayment {
                        expense_id: expense.id.clone(),
                        participant_id: p.participant_id.clone(),
                        amount: p.amount,
                        reason,
                    });
                }
                credits
            }
        };

        let total: f64 = credits.iter().map(|(_, amount)| amount).sum();
        Ok(Contribution {
            credits,
            members,
            total,
        })
    }
}

/// Nets every expense into per-participant balances using the default rounding.
pub fn compute_balances(participants: &[Participant], expenses: &[Expense]) -> Accumulation {
    BalanceAccumulator::new().compute(participants, expenses)
}
