use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use ethnum::U256;
use minicbor::{Decode, Encode};

/// End-of-day mirror of a fund, plus the fees accrued during the day.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default)]
pub struct FundDayData {
    #[cbor(n(0), with = "crate::cbor::address")]
    pub fund: Address,
    /// Start of the day, unix seconds.
    #[n(1)]
    pub date: u64,
    #[cbor(n(2), with = "crate::cbor::u256")]
    pub total_supply: U256,
    #[cbor(n(3), with = "crate::cbor::big_decimal")]
    pub total_investment: BigDecimal,
    #[cbor(n(4), with = "crate::cbor::big_decimal")]
    pub total_investment_usd: BigDecimal,
    #[cbor(n(5), with = "crate::cbor::big_decimal")]
    pub total_assets: BigDecimal,
    #[cbor(n(6), with = "crate::cbor::big_decimal")]
    pub total_assets_usd: BigDecimal,
    #[cbor(n(7), with = "crate::cbor::big_decimal")]
    pub total_deposited_amount: BigDecimal,
    #[cbor(n(8), with = "crate::cbor::big_decimal")]
    pub total_deposited_amount_usd: BigDecimal,
    #[cbor(n(9), with = "crate::cbor::big_decimal")]
    pub total_withdrew_amount: BigDecimal,
    #[cbor(n(10), with = "crate::cbor::big_decimal")]
    pub total_withdrew_amount_usd: BigDecimal,
    #[cbor(n(11), with = "crate::cbor::big_decimal")]
    pub init_settlement_price: BigDecimal,
    #[cbor(n(12), with = "crate::cbor::big_decimal")]
    pub daily_settlement_price: BigDecimal,
    #[cbor(n(13), with = "crate::cbor::big_decimal")]
    pub daily_total_fees: BigDecimal,
    #[cbor(n(14), with = "crate::cbor::big_decimal")]
    pub total_fees: BigDecimal,
    #[cbor(n(15), with = "crate::cbor::big_decimal")]
    pub total_pending_fees: BigDecimal,
    #[cbor(n(16), with = "crate::cbor::big_decimal")]
    pub total_withdrew_fees: BigDecimal,
}

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default)]
pub struct InvestorDayData {
    #[cbor(n(0), with = "crate::cbor::address")]
    pub fund: Address,
    #[cbor(n(1), with = "crate::cbor::address")]
    pub owner: Address,
    #[n(2)]
    pub date: u64,
    #[cbor(n(3), with = "crate::cbor::u256")]
    pub share: U256,
    #[cbor(n(4), with = "crate::cbor::big_decimal")]
    pub total_investment: BigDecimal,
    #[cbor(n(5), with = "crate::cbor::big_decimal")]
    pub total_investment_usd: BigDecimal,
    #[cbor(n(6), with = "crate::cbor::big_decimal")]
    pub total_deposited_amount: BigDecimal,
    #[cbor(n(7), with = "crate::cbor::big_decimal")]
    pub total_deposited_amount_usd: BigDecimal,
    #[cbor(n(8), with = "crate::cbor::big_decimal")]
    pub total_withdrew_amount: BigDecimal,
    #[cbor(n(9), with = "crate::cbor::big_decimal")]
    pub total_withdrew_amount_usd: BigDecimal,
    #[cbor(n(10), with = "crate::cbor::big_decimal")]
    pub daily_settlement_price: BigDecimal,
    #[cbor(n(11), with = "crate::cbor::big_decimal")]
    pub daily_total_fees: BigDecimal,
    #[cbor(n(12), with = "crate::cbor::big_decimal")]
    pub total_fees: BigDecimal,
    #[cbor(n(13), with = "crate::cbor::big_decimal")]
    pub total_pending_fees: BigDecimal,
    #[cbor(n(14), with = "crate::cbor::big_decimal")]
    pub total_withdrew_fees: BigDecimal,
}
