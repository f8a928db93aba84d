use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use minicbor::{Decode, Encode};

/// A pool slot of a fund: one concentrated-liquidity pool and the fund's positions in it.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default)]
pub struct Pool {
    #[cbor(n(0), with = "crate::cbor::address")]
    pub fund: Address,
    #[cbor(n(1), with = "crate::cbor::address")]
    pub address: Address,
    #[cbor(n(2), with = "crate::cbor::address")]
    pub token0: Address,
    #[cbor(n(3), with = "crate::cbor::address")]
    pub token1: Address,
    #[n(4)]
    pub fee: u32,
    #[n(5)]
    pub positions_length: u32,
    /// Value of the pool slot in fund-token units.
    #[cbor(n(6), with = "crate::cbor::big_decimal")]
    pub asset_amount: BigDecimal,
    #[cbor(n(7), with = "crate::cbor::big_decimal")]
    pub asset_amount_usd: BigDecimal,
    /// Fraction of the fund's total assets.
    #[cbor(n(8), with = "crate::cbor::big_decimal")]
    pub asset_share: BigDecimal,
}
