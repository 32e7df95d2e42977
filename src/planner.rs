use crate::constants::{HALF_CENT, SETTLEMENT_TOLERANCE};
use crate::models::*;
use crate::money::RoundingMode;
use log::{debug, info, warn};
use serde::Serialize;

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct SettlementPlan {
    pub settlements: Vec<Settlement>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Greedy debt netting: the biggest debtor always pays the biggest creditor.
///
/// Not guaranteed to find the fewest transfers for every balance vector (that
/// needs a subset-sum search), but it is deterministic: ties keep the order the
/// balances were given in.
#[derive(Clone, Copy, Debug, Default)]
pub struct SettlementPlanner {
    rounding: RoundingMode,
}

impl SettlementPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rounding(rounding: RoundingMode) -> Self {
        SettlementPlanner { rounding }
    }

    /// Plans transfers for balances of unknown origin. Only the entries that
    /// are still open count towards the rounding allowance.
    pub fn plan(&self, balances: &Balances) -> SettlementPlan {
        let open = balances
            .iter()
            .filter(|e| e.amount.is_finite() && e.amount.abs() > SETTLEMENT_TOLERANCE)
            .count();
        self.plan_rounded(balances, open)
    }

    /// Plans transfers for balances produced by rounding `rounded_entries` raw
    /// values to cents. Up to half a cent per rounded entry may stay unmatched.
    pub fn plan_rounded(&self, balances: &Balances, rounded_entries: usize) -> SettlementPlan {
        debug!("Planning settlements for balances: {:?}", balances);

        let mut diagnostics = Vec::new();
        for entry in balances.iter().filter(|e| !e.amount.is_finite()) {
            warn!(
                "Balance {} of {} is not finite, leaving it out of the plan",
                entry.amount, entry.participant_id
            );
            diagnostics.push(Diagnostic::ResidualImbalance {
                participant_id: entry.participant_id.clone(),
                amount: entry.amount,
            });
        }

        let mut debtors: Vec<(&str, f64)> = balances
            .iter()
            .filter(|e| e.amount.is_finite() && e.amount < -SETTLEMENT_TOLERANCE)
            .map(|e| (e.participant_id.as_str(), e.amount))
            .collect();
        let mut creditors: Vec<(&str, f64)> = balances
            .iter()
            .filter(|e| e.amount.is_finite() && e.amount > SETTLEMENT_TOLERANCE)
            .map(|e| (e.participant_id.as_str(), e.amount))
            .collect();

        // Stable sorts: equal balances stay in participant order.
        debtors.sort_by(|a, b| a.1.total_cmp(&b.1));
        creditors.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut settlements = Vec::new();
        let mut i = 0;
        let mut j = 0;

        while i < debtors.len() && j < creditors.len() {
            let (debtor_id, debt) = debtors[i];
            let (creditor_id, credit) = creditors[j];

            if debtor_id == creditor_id {
                warn!("Participant {} is both debtor and creditor", debtor_id);
                i += 1;
                continue;
            }

            let transfer = (-debt).min(credit);
            if !transfer.is_finite() {
                warn!("Transfer from {} to {} is not finite, stopping", debtor_id, creditor_id);
                break;
            }
            if transfer > SETTLEMENT_TOLERANCE {
                let amount = self.rounding.round2(transfer);
                debug!("{} pays {} {}", debtor_id, creditor_id, amount);
                settlements.push(Settlement::new(debtor_id, creditor_id, amount));
            }

            debtors[i].1 = debt + transfer;
            creditors[j].1 = credit - transfer;

            if debtors[i].1.abs() < SETTLEMENT_TOLERANCE {
                i += 1;
            }
            if creditors[j].1.abs() < SETTLEMENT_TOLERANCE {
                j += 1;
            }
        }

        let leftovers: Vec<(&str, f64)> = debtors[i..]
            .iter()
            .chain(creditors[j..].iter())
            .filter(|(_, amount)| amount.abs() > SETTLEMENT_TOLERANCE)
            .copied()
            .collect();
        diagnostics.extend(self.report_leftovers(&leftovers, rounded_entries));

        info!(
            "Planned {} settlements across {} balances",
            settlements.len(),
            balances.len()
        );
        SettlementPlan {
            settlements,
            diagnostics,
        }
    }

    /// Every balance rounding touched may be off by half a cent, so that much
    /// can legitimately remain unmatched. Anything beyond it is an imbalance.
    fn report_leftovers(&self, leftovers: &[(&str, f64)], rounded_entries: usize) -> Vec<Diagnostic> {
        if leftovers.is_empty() {
            return Vec::new();
        }
        let unmatched: f64 = leftovers.iter().map(|(_, amount)| amount.abs()).sum();
        let slack = SETTLEMENT_TOLERANCE.max(HALF_CENT * rounded_entries as f64);
        let is_rounding = unmatched <= slack + 1e-9;

        leftovers
            .iter()
            .map(|&(id, amount)| {
                let amount = self.rounding.round2(amount);
                if is_rounding {
                    debug!("Rounding remainder {} left on {}", amount, id);
                    Diagnostic::RoundingRemainder {
                        participant_id: id.to_string(),
                        amount,
                    }
                } else {
                    warn!("Residual imbalance {} left on {}", amount, id);
                    Diagnostic::ResidualImbalance {
                        participant_id: id.to_string(),
                        amount,
                    }
                }
            })
            .collect()
    }
}

/// Plans transfers that zero out `balances` using the default rounding.
pub fn plan_settlements(balances: &Balances) -> SettlementPlan {
    SettlementPlanner::new().plan(balances)
}
