/// Magnitudes at or below this are treated as zero when planning settlements.
pub const SETTLEMENT_TOLERANCE: f64 = 0.009;

/// Maximum drift allowed between the sum of all balances and zero.
pub const CONSERVATION_TOLERANCE: f64 = 0.01;

/// Largest error a single 2dp rounding can introduce.
pub const HALF_CENT: f64 = 0.005;

/// Allowed gap between a complex expense's stated amount and its payment total
/// before strict validation rejects it.
pub const PAYMENT_TOTAL_TOLERANCE: f64 = 0.01;

pub const MAX_EXPENSE_AMOUNT: f64 = 1_000_000_000.0;
pub const MAX_ID_LENGTH: usize = 128;
pub const MAX_NAME_LENGTH: usize = 255;
