//! Tick to sqrt price conversion, bit-exact with the on-chain pool.
//!
//! `get_sqrt_ratio_at_tick` returns sqrt(1.0001^tick) as a Q64.96 number. The
//! position valuation depends on the exact value, so the computation uses the
//! same per-bit magic constants the pool contract uses rather than floats.

use ethnum::U256;
use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::constants::{MAX_TICK, MIN_TICK};
use super::safe_cast::big_uint_to_u256;

lazy_static! {
    static ref ODD_TICK_RATIO: BigUint =
        BigUint::parse_bytes(b"fffcb933bd6fad37aa2d162d1a594001", 16).unwrap();
    static ref TWO_POW_32: BigUint = BigUint::one() << 32_u32;
    static ref TWO_POW_128: BigUint = BigUint::one() << 128_u32;
    static ref TWO_POW_256_MINUS_1: BigUint = BigUint::from_bytes_be(&[0xff; 32]);
    // ratio multipliers for bits 1..=19 of |tick|
    static ref BIT_RATIOS: [BigUint; 19] = [
        BigUint::parse_bytes(b"fff97272373d413259a46990580e213a", 16).unwrap(),
        BigUint::parse_bytes(b"fff2e50f5f656932ef12357cf3c7fdcc", 16).unwrap(),
        BigUint::parse_bytes(b"ffe5caca7e10e4e61c3624eaa0941cd0", 16).unwrap(),
        BigUint::parse_bytes(b"ffcb9843d60f6159c9db58835c926644", 16).unwrap(),
        BigUint::parse_bytes(b"ff973b41fa98c081472e6896dfb254c0", 16).unwrap(),
        BigUint::parse_bytes(b"ff2ea16466c96a3843ec78b326b52861", 16).unwrap(),
        BigUint::parse_bytes(b"fe5dee046a99a2a811c461f1969c3053", 16).unwrap(),
        BigUint::parse_bytes(b"fcbe86c7900a88aedcffc83b479aa3a4", 16).unwrap(),
        BigUint::parse_bytes(b"f987a7253ac413176f2b074cf7815e54", 16).unwrap(),
        BigUint::parse_bytes(b"f3392b0822b70005940c7a398e4b70f3", 16).unwrap(),
        BigUint::parse_bytes(b"e7159475a2c29b7443b29c7fa6e889d9", 16).unwrap(),
        BigUint::parse_bytes(b"d097f3bdfd2022b8845ad8f792aa5825", 16).unwrap(),
        BigUint::parse_bytes(b"a9f746462d870fdf8a65dc1f90e061e5", 16).unwrap(),
        BigUint::parse_bytes(b"70d869a156d2a1b890bb3df62baf32f7", 16).unwrap(),
        BigUint::parse_bytes(b"31be135f97d08fd981231505542fcfa6", 16).unwrap(),
        BigUint::parse_bytes(b"9aa508b5b7a84e1c677de54f3e99bc9", 16).unwrap(),
        BigUint::parse_bytes(b"5d6af8dedb81196699c329225ee604", 16).unwrap(),
        BigUint::parse_bytes(b"2216e584f5fa1ea926041bedfe98", 16).unwrap(),
        BigUint::parse_bytes(b"48a170391f7dc42444e8fa2", 16).unwrap(),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickMathError {
    TickOutOfBounds,
    ArithmeticOverflow,
}

/// sqrt(1.0001^tick) * 2^96, rounded up to the next Q64.96 value.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, TickMathError> {
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(TickMathError::TickOutOfBounds);
    }

    let abs_tick = tick.unsigned_abs();
    let mut ratio = if abs_tick & 0x1 != 0 {
        ODD_TICK_RATIO.clone()
    } else {
        TWO_POW_128.clone()
    };

    for (i, multiplier) in BIT_RATIOS.iter().enumerate() {
        if abs_tick & (1 << (i + 1)) != 0 {
            ratio = (ratio * multiplier) >> 128_u32;
        }
    }

    if tick > 0 {
        ratio = &*TWO_POW_256_MINUS_1 / ratio;
    }

    // Q128.128 -> Q64.96, rounding up
    let round_up = if (&ratio % &*TWO_POW_32).is_zero() {
        BigUint::zero()
    } else {
        BigUint::one()
    };
    let sqrt_price_x96 = (ratio >> 32_u32) + round_up;

    big_uint_to_u256(sqrt_price_x96).map_err(|_e| TickMathError::ArithmeticOverflow)
}
