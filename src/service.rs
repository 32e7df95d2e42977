use crate::accumulator::BalanceAccumulator;
use crate::constants::CONSERVATION_TOLERANCE;
use crate::error::SettleError;
use crate::models::*;
use crate::money::RoundingMode;
use crate::planner::SettlementPlanner;
use crate::validation;
use log::{debug, info, warn};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettlementOptions {
    pub rounding: RoundingMode,
}

/// Balances, the transfers that clear them, and everything noticed on the way.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SettlementOutcome {
    pub balances: Balances,
    pub summaries: Vec<ParticipantSummary>,
    pub settlements: Vec<Settlement>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SettlementOutcome {
    /// Balances after every planned transfer has been paid.
    pub fn residuals(&self) -> Balances {
        self.balances.apply_settlements(&self.settlements)
    }

    pub fn is_settled(&self) -> bool {
        self.settlements.is_empty()
    }

    pub fn settlements_for<'a>(&'a self, participant_id: &'a str) -> impl Iterator<Item = &'a Settlement> + 'a {
        self.settlements.iter().filter(move |s| s.involves(participant_id))
    }

    pub fn summary_for(&self, participant_id: &str) -> Option<&ParticipantSummary> {
        self.summaries.iter().find(|s| s.participant_id == participant_id)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity() == Severity::Error)
    }
}

/// Single entry point for turning expenses into a settlement plan.
pub struct SettlementService {
    accumulator: BalanceAccumulator,
    planner: SettlementPlanner,
}

impl SettlementService {
    pub fn new(options: SettlementOptions) -> Self {
        info!("Initializing SettlementService with {} rounding", options.rounding);
        Self {
            accumulator: BalanceAccumulator::with_rounding(options.rounding),
            planner: SettlementPlanner::with_rounding(options.rounding),
        }
    }

    /// Runs both stages. Malformed input is skipped and reported, never fatal.
    pub fn settle(&self, participants: &[Participant], expenses: &[Expense]) -> SettlementOutcome {
        info!(
            "Settling {} expenses among {} participants",
            expenses.len(),
            participants.len()
        );
        let accumulation = self.accumulator.compute(participants, expenses);
        let total = accumulation.balances.total();
        if total.abs() > CONSERVATION_TOLERANCE {
            debug!("Balances sum to {} after rounding", total);
        }

        let plan = self
            .planner
            .plan_rounded(&accumulation.balances, accumulation.rounded_entries);

        let mut diagnostics = accumulation.diagnostics;
        diagnostics.extend(plan.diagnostics);
        if !diagnostics.is_empty() {
            warn!("Settlement produced {} diagnostics", diagnostics.len());
        }

        info!("Settlement plan has {} transfers", plan.settlements.len());
        SettlementOutcome {
            balances: accumulation.balances,
            summaries: accumulation.summaries,
            settlements: plan.settlements,
            diagnostics,
        }
    }

    /// Like [`settle`](Self::settle) but rejects malformed input up front and
    /// fails if the plan leaves money unmatched.
    pub fn settle_strict(
        &self,
        participants: &[Participant],
        expenses: &[Expense],
    ) -> Result<SettlementOutcome, SettleError> {
        validation::validate(participants, expenses)?;
        let outcome = self.settle(participants, expenses);
        if let Some(Diagnostic::ResidualImbalance { participant_id, amount }) = outcome
            .diagnostics
            .iter()
            .find(|d| matches!(d, Diagnostic::ResidualImbalance { .. }))
        {
            return Err(SettleError::ResidualImbalance {
                participant_id: participant_id.clone(),
                amount: *amount,
            });
        }
        Ok(outcome)
    }
}

impl Default for SettlementService {
    fn default() -> Self {
        Self::new(SettlementOptions::default())
    }
}
