use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::errors::{EngineError, EngineResult};

pub const CENT_SCALE: u32 = 2;

pub fn ensure_non_negative(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::validation(format!(
            "{field} must not be negative (got {amount})"
        )));
    }
    Ok(())
}

/// Rounds to whole cents, half to even.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(raw: &str) -> Decimal {
        raw.parse().unwrap()
    }

    #[test]
    fn zero_and_positive_amounts_pass() {
        assert!(ensure_non_negative("price", Decimal::ZERO).is_ok());
        assert!(ensure_non_negative("price", money("0.01")).is_ok());
    }

    #[test]
    fn negative_amount_is_a_validation_error() {
        let err = ensure_non_negative("plan_cost", money("-0.01")).unwrap_err();
        assert!(matches!(err, EngineError::Validation(message) if message.contains("plan_cost")));
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(round_cents(money("2.345")), money("2.34"));
        assert_eq!(round_cents(money("2.355")), money("2.36"));
    }
}
