use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use ethnum::U256;
use minicbor::{Decode, Encode};

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default)]
pub struct Fund {
    #[cbor(n(0), with = "crate::cbor::address")]
    pub address: Address,
    #[cbor(n(1), with = "crate::cbor::address")]
    pub manager: Address,
    /// Token the fund is denominated in.
    #[cbor(n(2), with = "crate::cbor::address")]
    pub fund_token: Address,
    #[n(3)]
    pub symbol: String,
    #[n(4)]
    pub name: String,
    /// Decimals of the fund's own share token.
    #[n(5)]
    pub decimals: u32,
    #[cbor(n(6), with = "crate::cbor::u256")]
    pub lock_period: U256,
    #[cbor(n(7), with = "crate::cbor::big_decimal")]
    pub base_line: BigDecimal,
    #[cbor(n(8), with = "crate::cbor::big_decimal")]
    pub manager_fee: BigDecimal,
    #[cbor(n(9), with = "crate::cbor::u256")]
    pub deadline: U256,
    #[cbor(n(10), with = "crate::cbor::big_decimal")]
    pub balance: BigDecimal,
    #[n(11)]
    pub pools_length: u32,

    #[cbor(n(12), with = "crate::cbor::u256")]
    pub total_supply: U256,
    #[cbor(n(13), with = "crate::cbor::big_decimal")]
    pub total_investment: BigDecimal,
    #[cbor(n(14), with = "crate::cbor::big_decimal")]
    pub total_investment_usd: BigDecimal,
    #[cbor(n(15), with = "crate::cbor::big_decimal")]
    pub total_assets: BigDecimal,
    #[cbor(n(16), with = "crate::cbor::big_decimal")]
    pub total_assets_usd: BigDecimal,
    #[cbor(n(17), with = "crate::cbor::big_decimal")]
    pub total_deposited_amount: BigDecimal,
    #[cbor(n(18), with = "crate::cbor::big_decimal")]
    pub total_deposited_amount_usd: BigDecimal,
    #[cbor(n(19), with = "crate::cbor::big_decimal")]
    pub total_withdrew_amount: BigDecimal,
    #[cbor(n(20), with = "crate::cbor::big_decimal")]
    pub total_withdrew_amount_usd: BigDecimal,

    /// Cumulative USD fees per share; only ever grows.
    #[cbor(n(21), with = "crate::cbor::big_decimal")]
    pub lasted_settlement_price: BigDecimal,
    #[cbor(n(22), with = "crate::cbor::big_decimal")]
    pub total_fees: BigDecimal,
    #[cbor(n(23), with = "crate::cbor::big_decimal")]
    pub total_pending_fees: BigDecimal,
    #[cbor(n(24), with = "crate::cbor::big_decimal")]
    pub total_withdrew_fees: BigDecimal,
    #[cbor(n(25), with = "crate::cbor::big_decimal")]
    pub total_protocol_fees: BigDecimal,
    #[cbor(n(26), with = "crate::cbor::big_decimal")]
    pub total_protocol_fees_usd: BigDecimal,
}

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default)]
pub struct Manager {
    #[cbor(n(0), with = "crate::cbor::address")]
    pub address: Address,
    /// Number of funds managed.
    #[n(1)]
    pub length: u32,
    #[cbor(n(2), with = "crate::cbor::big_decimal")]
    pub total_investment_usd: BigDecimal,
    #[cbor(n(3), with = "crate::cbor::big_decimal")]
    pub total_assets_usd: BigDecimal,
    #[cbor(n(4), with = "crate::cbor::big_decimal")]
    pub total_fees: BigDecimal,
    #[cbor(n(5), with = "crate::cbor::big_decimal")]
    pub total_pending_fees: BigDecimal,
    #[cbor(n(6), with = "crate::cbor::big_decimal")]
    pub total_withdrew_fees: BigDecimal,
}

/// Protocol-wide totals across every fund.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default)]
pub struct FundSummary {
    #[n(0)]
    pub length: u32,
    #[cbor(n(1), with = "crate::cbor::address_vec")]
    pub funds: Vec<Address>,
    #[cbor(n(2), with = "crate::cbor::big_decimal")]
    pub total_fees: BigDecimal,
    #[cbor(n(3), with = "crate::cbor::big_decimal")]
    pub total_pending_fees: BigDecimal,
    #[cbor(n(4), with = "crate::cbor::big_decimal")]
    pub total_withdrew_fees: BigDecimal,
    #[cbor(n(5), with = "crate::cbor::big_decimal")]
    pub total_investment_usd: BigDecimal,
    #[cbor(n(6), with = "crate::cbor::big_decimal")]
    pub total_assets_usd: BigDecimal,
    #[cbor(n(7), with = "crate::cbor::big_decimal")]
    pub total_protocol_fees_usd: BigDecimal,
}

/// Last periodic refresh: WETH price and the block timestamp it was taken at.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default)]
pub struct Bundle {
    #[cbor(n(0), with = "crate::cbor::big_decimal")]
    pub eth_price_usd: BigDecimal,
    #[n(1)]
    pub timestamp: u64,
}

/// Fee bookkeeping shared by fund, manager and summary.
pub trait FeeTotals {
    fn total_fees_mut(&mut self) -> &mut BigDecimal;
    fn total_pending_fees_mut(&mut self) -> &mut BigDecimal;
    fn total_withdrew_fees_mut(&mut self) -> &mut BigDecimal;

    /// Books `delta` of newly accrued fees, `withdrawn` of which leave with a withdrawal.
    fn settle_fees(&mut self, delta: &BigDecimal, withdrawn: &BigDecimal) {
        *self.total_fees_mut() += delta;
        *self.total_pending_fees_mut() += delta - withdrawn;
        let total = self.total_fees_mut().clone();
        let withdrew = total - &*self.total_pending_fees_mut();
        *self.total_withdrew_fees_mut() = withdrew;
    }
}

macro_rules! impl_fee_totals {
    ($type:ty) => {
        impl FeeTotals for $type {
            fn total_fees_mut(&mut self) -> &mut BigDecimal {
                &mut self.total_fees
            }
            fn total_pending_fees_mut(&mut self) -> &mut BigDecimal {
                &mut self.total_pending_fees
            }
            fn total_withdrew_fees_mut(&mut self) -> &mut BigDecimal {
                &mut self.total_withdrew_fees
            }
        }
    };
}

impl_fee_totals!(Fund);
impl_fee_totals!(Manager);
impl_fee_totals!(FundSummary);
