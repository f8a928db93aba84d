use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use ethnum::U256;
use minicbor::{Decode, Encode};

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default)]
pub struct Token {
    #[cbor(n(0), with = "crate::cbor::address")]
    pub address: Address,
    #[n(1)]
    pub symbol: String,
    #[n(2)]
    pub name: String,
    #[n(3)]
    pub decimals: u32,
    #[cbor(n(4), with = "crate::cbor::u256")]
    pub total_supply: U256,
    #[n(5)]
    pub is_verified: bool,
    /// Balance of this token held by the controller.
    #[cbor(n(6), with = "crate::cbor::big_decimal")]
    pub fund_income: BigDecimal,
}
