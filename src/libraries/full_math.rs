use ethnum::U256;
use num_bigint::BigUint;
use num_traits::Zero;

use super::safe_cast::{big_uint_to_u256, u256_to_big_uint};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FullMathError {
    DivisionByZero,
    Overflow,
}

/// floor(a * b / denominator) with a 512-bit intermediate product.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, FullMathError> {
    if denominator == U256::ZERO {
        return Err(FullMathError::DivisionByZero);
    }

    let product = u256_to_big_uint(a) * u256_to_big_uint(b);
    let quotient = product / u256_to_big_uint(denominator);

    big_uint_to_u256(quotient).map_err(|_e| FullMathError::Overflow)
}

/// ceil(a * b / denominator) with a 512-bit intermediate product.
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, FullMathError> {
    if denominator == U256::ZERO {
        return Err(FullMathError::DivisionByZero);
    }

    let product = u256_to_big_uint(a) * u256_to_big_uint(b);
    let denominator_big = u256_to_big_uint(denominator);
    let quotient = &product / &denominator_big;
    let remainder = &product % &denominator_big;
    let result = if remainder.is_zero() {
        quotient
    } else {
        quotient + BigUint::from(1u32)
    };

    big_uint_to_u256(result).map_err(|_e| FullMathError::Overflow)
}

/// Returns ceil(x / y)
/// division by 0 will return 0, and should be checked externally
pub fn div_rounding_up(x: U256, y: U256) -> U256 {
    if y == U256::ZERO {
        return U256::ZERO;
    }
    let quotient = x / y;
    let remainder = x % y;
    quotient
        + if remainder > U256::ZERO {
            U256::ONE
        } else {
            U256::ZERO
        }
}
