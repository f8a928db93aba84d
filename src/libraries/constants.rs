use alloy_primitives::B256;
use bigdecimal::BigDecimal;
use ethnum::U256;
use lazy_static::lazy_static;
use num_bigint::BigInt;
use num_traits::{One, Zero};

lazy_static! {
    pub static ref Q128: U256 = U256::from_words(1, 0); // 2^128;
    pub static ref Q96: U256 = U256::from(1u8) << 96; // 2^96 ;

    // 2^256 - 1, the largest value a wrapping fee-growth accumulator can hold
    pub static ref MAX_256: U256 = U256::MAX;
    pub static ref TWO_POW_256: BigInt = BigInt::one() << 256;

    pub static ref MIN_SQRT_RATIO: U256 = U256::from_str_radix("4295128739", 10).unwrap();
    pub static ref MAX_SQRT_RATIO: U256 =
        U256::from_str_radix("1461446703485210103287273052203988822378723970342", 10).unwrap();

    pub static ref ZERO_BD: BigDecimal = BigDecimal::zero();
    pub static ref ONE_BD: BigDecimal = BigDecimal::one();
    pub static ref Q96_BD: BigDecimal = BigDecimal::new(BigInt::one() << 96, 0);

    /// Share of a profitable withdrawal retained by the protocol on top of the manager fee.
    pub static ref PROTOCOL_FEE_RATIO: BigDecimal = BigDecimal::new(BigInt::from(5), 2); // 0.05
}

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = 887272;

pub const SECONDS_PER_DAY: u64 = 86_400;

/// Seconds into a UTC day after which the end-of-day refresh runs (last five minutes).
pub const END_OF_DAY_WINDOW_START: u64 = 86_100;

/// bytes32 value returned by tokens whose `symbol()`/`name()` is not really implemented.
pub const NULL_ETH_VALUE: B256 = B256::with_last_byte(1);

pub const DEFAULT_TOKEN_DECIMALS: u32 = 18;
pub const UNKNOWN: &str = "unknown";
