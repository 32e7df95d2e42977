pub mod balance;
pub mod diagnostic;
pub mod expense;
pub mod participant;
pub mod settlement;
pub mod summary;

pub use balance::{BalanceEntry, Balances};
pub use diagnostic::{Diagnostic, IgnoredPaymentReason, MalformedReason, Severity};
pub use expense::{Expense, Payer, Payment};
pub use participant::{Participant, ParticipantId, ParticipantRef, Roster};
pub use settlement::Settlement;
pub use summary::ParticipantSummary;
