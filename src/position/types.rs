use alloy_primitives::{Address, B256};
use bigdecimal::BigDecimal;
use ethnum::U256;
use minicbor::{Decode, Encode};

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default)]
pub struct Position {
    #[cbor(n(0), with = "crate::cbor::address")]
    pub fund: Address,
    #[n(1)]
    pub pool_index: u32,
    #[n(2)]
    pub position_index: u32,
    #[n(3)]
    pub tick_lower: i32,
    #[n(4)]
    pub tick_upper: i32,
    /// Key of the fund's position inside the pool contract.
    #[cbor(n(5), with = "crate::cbor::b256")]
    pub position_key: B256,
    #[cbor(n(6), with = "crate::cbor::u128")]
    pub liquidity: u128,
    #[cbor(n(7), with = "crate::cbor::u256")]
    pub fee_growth_inside_0_last_x128: U256,
    #[cbor(n(8), with = "crate::cbor::u256")]
    pub fee_growth_inside_1_last_x128: U256,
    #[n(9)]
    pub is_empty: bool,

    #[cbor(n(10), with = "crate::cbor::big_decimal")]
    pub asset_amount: BigDecimal,
    #[cbor(n(11), with = "crate::cbor::big_decimal")]
    pub asset_amount_usd: BigDecimal,
    #[cbor(n(12), with = "crate::cbor::big_decimal")]
    pub asset_share: BigDecimal,

    #[cbor(n(13), with = "crate::cbor::big_decimal")]
    pub amount0: BigDecimal,
    #[cbor(n(14), with = "crate::cbor::big_decimal")]
    pub amount1: BigDecimal,
    #[cbor(n(15), with = "crate::cbor::big_decimal")]
    pub amount: BigDecimal,
    #[cbor(n(16), with = "crate::cbor::big_decimal")]
    pub amount_usd: BigDecimal,

    #[cbor(n(17), with = "crate::cbor::big_decimal")]
    pub fees0: BigDecimal,
    #[cbor(n(18), with = "crate::cbor::big_decimal")]
    pub fees1: BigDecimal,
    #[cbor(n(19), with = "crate::cbor::big_decimal")]
    pub fees: BigDecimal,
    #[cbor(n(20), with = "crate::cbor::big_decimal")]
    pub fees_usd: BigDecimal,
}

/// Pool-wide inputs of a valuation, read once per pool and shared by its positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolValuationParams {
    pub sqrt_price_x96: U256,
    pub tick_current: i32,
    pub fee_growth_global_0_x128: U256,
    pub fee_growth_global_1_x128: U256,
    pub fund_token_price_usd: BigDecimal,
    pub token0_price_usd: BigDecimal,
    pub token1_price_usd: BigDecimal,
    pub decimals0: u32,
    pub decimals1: u32,
}

/// Fee delta since the stored checkpoint, with the checkpoint to persist next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeltaFees {
    pub fees_usd: BigDecimal,
    pub fee_growth_inside_0_x128: U256,
    pub fee_growth_inside_1_x128: U256,
}

/// Current composition and uncollected fees of a pool position.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PositionValuation {
    pub fees0: BigDecimal,
    pub fees1: BigDecimal,
    /// Fees in fund-token units.
    pub fees: BigDecimal,
    pub fees_usd: BigDecimal,
    pub amount0: BigDecimal,
    pub amount1: BigDecimal,
    /// Composition in fund-token units.
    pub amount: BigDecimal,
    pub amount_usd: BigDecimal,
}
