//! Q64.64 fixed-point conversions between pool liquidity and token amounts.
//!
//! Sqrt prices arrive in Q64.64: the upper 64 bits carry the integer part,
//! the lower 64 the fraction. Intermediate products need up to 256 bits of
//! headroom (96-bit price, 96-bit price, 64-bit shift), so the conversions
//! run on `BigUint` and narrow only at the boundaries.

use num_bigint::BigUint;
use thiserror::Error;

/// Fractional bit width of a Q64.64 value.
pub const Q64_SHIFT: u32 = 64;

/// Errors raised by the fixed-point conversions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MathError {
    /// The conversion's denominator is zero: a zero lower bound for the
    /// base-token amount, or a zero-width range for the reverse pair.
    #[error("degenerate sqrt price range")]
    EmptyRange,
    /// The converted token amount does not fit in 64 bits.
    #[error("token amount overflows u64")]
    AmountOverflow,
    /// The converted liquidity does not fit in 128 bits.
    #[error("liquidity overflows u128")]
    LiquidityOverflow,
}

fn sorted_bounds(sqrt_price_0: u128, sqrt_price_1: u128) -> (u128, u128) {
    if sqrt_price_0 <= sqrt_price_1 {
        (sqrt_price_0, sqrt_price_1)
    } else {
        (sqrt_price_1, sqrt_price_0)
    }
}

fn is_zero(value: &BigUint) -> bool {
    value.bits() == 0
}

/// Base token amount for a liquidity delta over a sqrt price range.
///
/// Computes `liquidity * (upper - lower) * 2^64 / (upper * lower)`, rounding
/// up when `round_up` is set and the division leaves a remainder. Bound order
/// does not matter. A zero-width range yields zero; a zero lower bound has no
/// defined result and fails with [`MathError::EmptyRange`].
pub fn base_token_from_liquidity(
    liquidity: u128,
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    round_up: bool,
) -> Result<u64, MathError> {
    let (lower, upper) = sorted_bounds(sqrt_price_0, sqrt_price_1);
    if lower == 0 {
        return Err(MathError::EmptyRange);
    }
    let numerator = (BigUint::from(liquidity) * BigUint::from(upper - lower)) << Q64_SHIFT;
    let denominator = BigUint::from(upper) * BigUint::from(lower);
    let mut quotient = &numerator / &denominator;
    let remainder = numerator % &denominator;
    if round_up && !is_zero(&remainder) {
        quotient += 1u32;
    }
    u64::try_from(quotient).map_err(|_| MathError::AmountOverflow)
}

/// Quote token amount for a liquidity delta over a sqrt price range.
///
/// Computes `liquidity * (upper - lower) >> 64`, rounding up when `round_up`
/// is set and the pre-shift product has a nonzero residue modulo `2^64 - 1`.
/// Bound order does not matter; a zero-width range yields zero.
pub fn quote_token_from_liquidity(
    liquidity: u128,
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    round_up: bool,
) -> Result<u64, MathError> {
    let (lower, upper) = sorted_bounds(sqrt_price_0, sqrt_price_1);
    let product = BigUint::from(liquidity) * BigUint::from(upper - lower);
    // The round-up residue is taken mod 2^64 - 1, not mod 2^64.
    let residue = &product % &BigUint::from(u64::MAX);
    let mut shifted = product >> Q64_SHIFT;
    if round_up && !is_zero(&residue) {
        shifted += 1u32;
    }
    u64::try_from(shifted).map_err(|_| MathError::AmountOverflow)
}

/// Liquidity obtainable from a base token amount over a sqrt price range.
///
/// Computes `amount * lower * upper / (upper - lower)`, narrowed to 128 bits
/// before the final `>> 64`, rounding up when `round_up` is set and the
/// division leaves a remainder. Bound order does not matter.
pub fn liquidity_from_base_token(
    amount: u64,
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    round_up: bool,
) -> Result<u128, MathError> {
    let (lower, upper) = sorted_bounds(sqrt_price_0, sqrt_price_1);
    if lower == upper {
        return Err(MathError::EmptyRange);
    }
    let range = BigUint::from(upper - lower);
    let numerator = BigUint::from(amount) * BigUint::from(lower) * BigUint::from(upper);
    let quotient = &numerator / &range;
    let remainder = numerator % &range;
    let wide = u128::try_from(quotient).map_err(|_| MathError::LiquidityOverflow)?;
    let shifted = wide >> Q64_SHIFT;
    if round_up && !is_zero(&remainder) {
        Ok(shifted + 1)
    } else {
        Ok(shifted)
    }
}

/// Liquidity obtainable from a quote token amount over a sqrt price range.
///
/// Computes `(amount << 64) / (upper - lower)`, rounding up when `round_up`
/// is set and the division leaves a remainder. The shifted amount and the
/// quotient both fit in 128 bits, so this one runs on plain integers. Bound
/// order does not matter.
pub fn liquidity_from_quote_token(
    amount: u64,
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    round_up: bool,
) -> Result<u128, MathError> {
    let (lower, upper) = sorted_bounds(sqrt_price_0, sqrt_price_1);
    if lower == upper {
        return Err(MathError::EmptyRange);
    }
    let numerator = u128::from(amount) << Q64_SHIFT;
    let range = upper - lower;
    let quotient = numerator / range;
    if round_up && numerator % range > 0 {
        Ok(quotient + 1)
    } else {
        Ok(quotient)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const ONE_Q64: u128 = 1 << Q64_SHIFT;
    const TWO_Q64: u128 = 1 << (Q64_SHIFT + 1);

    // Sqrt prices taken from a mainnet SOL/USDC whirlpool snapshot.
    const LOWER_SQRT_PRICE: u128 = 2_608_763_565_066_556_442;
    const UPPER_SQRT_PRICE: u128 = 2_857_757_303_569_098_241;

    #[test]
    fn test_base_amount_golden_value() {
        // 1e6 * 2^64 * 2^64 / 2^129 divides exactly, so both modes agree.
        let amount = base_token_from_liquidity(1_000_000, ONE_Q64, TWO_Q64, false).unwrap();
        assert_eq!(amount, 500_000);
        let amount = base_token_from_liquidity(1_000_000, ONE_Q64, TWO_Q64, true).unwrap();
        assert_eq!(amount, 500_000);
    }

    #[test]
    fn test_base_amount_ceiling_on_remainder() {
        let floor = base_token_from_liquidity(1_000_001, ONE_Q64, TWO_Q64, false).unwrap();
        let ceiling = base_token_from_liquidity(1_000_001, ONE_Q64, TWO_Q64, true).unwrap();
        assert_eq!(floor, 500_000);
        assert_eq!(ceiling, 500_001);
    }

    #[test]
    fn test_quote_amount_rounds_up_on_nonzero_residue() {
        // The product 1e6 * 2^64 shifts exactly, but its residue mod
        // 2^64 - 1 is 1e6, so the round-up mode still bumps the result.
        let floor = quote_token_from_liquidity(1_000_000, ONE_Q64, TWO_Q64, false).unwrap();
        let ceiling = quote_token_from_liquidity(1_000_000, ONE_Q64, TWO_Q64, true).unwrap();
        assert_eq!(floor, 1_000_000);
        assert_eq!(ceiling, 1_000_001);
    }

    #[test]
    fn test_bound_order_is_irrelevant() {
        assert_eq!(
            base_token_from_liquidity(1_000_000, LOWER_SQRT_PRICE, UPPER_SQRT_PRICE, true),
            base_token_from_liquidity(1_000_000, UPPER_SQRT_PRICE, LOWER_SQRT_PRICE, true),
        );
        assert_eq!(
            quote_token_from_liquidity(1_000_000, LOWER_SQRT_PRICE, UPPER_SQRT_PRICE, true),
            quote_token_from_liquidity(1_000_000, UPPER_SQRT_PRICE, LOWER_SQRT_PRICE, true),
        );
        assert_eq!(
            liquidity_from_base_token(1_000_000, LOWER_SQRT_PRICE, UPPER_SQRT_PRICE, false),
            liquidity_from_base_token(1_000_000, UPPER_SQRT_PRICE, LOWER_SQRT_PRICE, false),
        );
        assert_eq!(
            liquidity_from_quote_token(1_000_000, LOWER_SQRT_PRICE, UPPER_SQRT_PRICE, false),
            liquidity_from_quote_token(1_000_000, UPPER_SQRT_PRICE, LOWER_SQRT_PRICE, false),
        );
    }

    #[test]
    fn test_degenerate_range_yields_zero_token_amounts() {
        assert_eq!(
            base_token_from_liquidity(1_000_000, ONE_Q64, ONE_Q64, true).unwrap(),
            0
        );
        assert_eq!(
            quote_token_from_liquidity(1_000_000, ONE_Q64, ONE_Q64, true).unwrap(),
            0
        );
    }

    #[test]
    fn test_zero_lower_bound_is_rejected() {
        assert_eq!(
            base_token_from_liquidity(1_000_000, 0, ONE_Q64, false),
            Err(MathError::EmptyRange)
        );
    }

    #[test]
    fn test_degenerate_range_rejects_liquidity_conversions() {
        assert_eq!(
            liquidity_from_base_token(1_000_000, ONE_Q64, ONE_Q64, false),
            Err(MathError::EmptyRange)
        );
        assert_eq!(
            liquidity_from_quote_token(1_000_000, ONE_Q64, ONE_Q64, false),
            Err(MathError::EmptyRange)
        );
    }

    #[test]
    fn test_liquidity_from_base_golden_value() {
        let liquidity =
            liquidity_from_base_token(1_000_000_000, LOWER_SQRT_PRICE, UPPER_SQRT_PRICE, false)
                .unwrap();
        assert_eq!(liquidity, 1_623_124_806);
    }

    #[test]
    fn test_liquidity_from_quote_golden_value() {
        let liquidity =
            liquidity_from_quote_token(1_000_000_000, LOWER_SQRT_PRICE, UPPER_SQRT_PRICE, false)
                .unwrap();
        assert_eq!(liquidity, 74_085_172_521);
    }

    #[test]
    fn test_liquidity_from_quote_ceiling_on_remainder() {
        // (1 << 64) / 3 leaves remainder 1.
        let floor = liquidity_from_quote_token(1, 2, 5, false).unwrap();
        let ceiling = liquidity_from_quote_token(1, 2, 5, true).unwrap();
        assert_eq!(floor, 6_148_914_691_236_517_205);
        assert_eq!(ceiling, 6_148_914_691_236_517_206);
    }

    #[test]
    fn test_token_amounts_overflow_past_u64() {
        assert_eq!(
            base_token_from_liquidity(u128::MAX, ONE_Q64, TWO_Q64, false),
            Err(MathError::AmountOverflow)
        );
        assert_eq!(
            quote_token_from_liquidity(u128::MAX, ONE_Q64, TWO_Q64, false),
            Err(MathError::AmountOverflow)
        );
    }

    #[test]
    fn test_liquidity_overflow_is_checked_before_the_shift() {
        // The quotient here is near 2^161: it would fit u128 after the
        // shift, but the narrowing happens first.
        let result = liquidity_from_base_token(u64::MAX, 1 << 96, 1 << 97, false);
        assert_eq!(result, Err(MathError::LiquidityOverflow));
    }
}
