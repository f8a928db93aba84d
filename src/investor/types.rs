use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use ethnum::U256;
use minicbor::{Decode, Encode};

use crate::state::keys::InvestorId;

/// One holder's stake in one fund.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default)]
pub struct Investor {
    #[cbor(n(0), with = "crate::cbor::address")]
    pub fund: Address,
    #[cbor(n(1), with = "crate::cbor::address")]
    pub owner: Address,
    #[cbor(n(2), with = "crate::cbor::u256")]
    pub share: U256,
    #[cbor(n(3), with = "crate::cbor::big_decimal")]
    pub total_investment: BigDecimal,
    #[cbor(n(4), with = "crate::cbor::big_decimal")]
    pub total_investment_usd: BigDecimal,
    #[cbor(n(5), with = "crate::cbor::big_decimal")]
    pub total_deposited_amount: BigDecimal,
    #[cbor(n(6), with = "crate::cbor::big_decimal")]
    pub total_deposited_amount_usd: BigDecimal,
    #[cbor(n(7), with = "crate::cbor::big_decimal")]
    pub total_withdrew_amount: BigDecimal,
    #[cbor(n(8), with = "crate::cbor::big_decimal")]
    pub total_withdrew_amount_usd: BigDecimal,
    #[n(9)]
    pub last_deposit_time: u64,

    /// Fund settlement price at this investor's last settlement.
    #[cbor(n(10), with = "crate::cbor::big_decimal")]
    pub lasted_settlement_price: BigDecimal,
    #[cbor(n(11), with = "crate::cbor::big_decimal")]
    pub total_fees: BigDecimal,
    #[cbor(n(12), with = "crate::cbor::big_decimal")]
    pub total_pending_fees: BigDecimal,
    #[cbor(n(13), with = "crate::cbor::big_decimal")]
    pub total_withdrew_fees: BigDecimal,
    #[cbor(n(14), with = "crate::cbor::big_decimal")]
    pub total_protocol_fees: BigDecimal,
    #[cbor(n(15), with = "crate::cbor::big_decimal")]
    pub total_protocol_fees_usd: BigDecimal,
}

impl Investor {
    pub fn id(&self) -> InvestorId {
        InvestorId {
            fund: self.fund,
            owner: self.owner,
        }
    }
}

/// Totals of one address across all funds it invested in.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default)]
pub struct InvestorSummary {
    #[cbor(n(0), with = "crate::cbor::address")]
    pub owner: Address,
    #[cbor(n(1), with = "crate::cbor::big_decimal")]
    pub total_investment_usd: BigDecimal,
    #[cbor(n(2), with = "crate::cbor::big_decimal")]
    pub total_protocol_fees_usd: BigDecimal,
    #[n(3)]
    pub created_timestamp: u64,
    #[n(4)]
    pub created_block: u64,
}
