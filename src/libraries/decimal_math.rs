use bigdecimal::BigDecimal;
use ethnum::U256;
use num_bigint::BigInt;
use num_traits::{One, Zero};

use super::constants::TWO_POW_256;
use super::safe_cast::{big_uint_to_u256, u256_to_big_decimal};

/// 10^n as an exact decimal.
pub fn exponent_to_big_decimal(n: u32) -> BigDecimal {
    let ten = BigDecimal::from(10);
    let mut result = BigDecimal::one();
    for _ in 0..n {
        result *= &ten;
    }
    result
}

/// `amount / 10^decimals`, exact.
pub fn convert_token_to_decimal(amount: U256, decimals: u32) -> BigDecimal {
    let raw = u256_to_big_decimal(amount);
    if decimals == 0 {
        return raw;
    }
    raw / exponent_to_big_decimal(decimals)
}

/// `numerator / denominator`, or zero when the denominator is zero.
pub fn safe_div(numerator: &BigDecimal, denominator: &BigDecimal) -> BigDecimal {
    if denominator.is_zero() {
        BigDecimal::zero()
    } else {
        numerator / denominator
    }
}

/// Maps a possibly negative difference of two wrapping 256-bit accumulators back
/// into `[0, 2^256)`.
pub fn corrected_wrap(value: &BigInt) -> U256 {
    let wrapped = ((value % &*TWO_POW_256) + &*TWO_POW_256) % &*TWO_POW_256;
    // always in range after the reduction above
    wrapped
        .to_biguint()
        .and_then(|v| big_uint_to_u256(v).ok())
        .unwrap_or(U256::ZERO)
}
