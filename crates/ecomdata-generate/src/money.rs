//! Exact decimal currency helpers.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits carried by every currency value.
pub const CURRENCY_SCALE: u32 = 2;

/// Round to cents with round-half-up and pin the scale to two digits.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CURRENCY_SCALE);
    rounded
}

/// Convert a sampled float to a currency amount.
///
/// Returns `None` for NaN or infinite input.
pub fn money_from_f64(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value).map(round_money)
}

/// Zero with currency scale, rendered as `0.00`.
pub fn zero() -> Decimal {
    round_money(Decimal::ZERO)
}
