pub mod accumulator;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod money;
pub mod planner;
pub mod service;
pub mod validation;

pub use accumulator::{Accumulation, BalanceAccumulator, compute_balances};
pub use error::SettleError;
pub use money::RoundingMode;
pub use planner::{SettlementPlan, SettlementPlanner, plan_settlements};
pub use service::{SettlementOptions, SettlementOutcome, SettlementService};

#[cfg(test)]
mod tests;
