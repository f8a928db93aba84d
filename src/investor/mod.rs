use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use ethnum::U256;
use ic_stable_structures::Memory;

use crate::{
    events::BlockInfo,
    libraries::{
        constants::{ONE_BD, PROTOCOL_FEE_RATIO, ZERO_BD},
        decimal_math::{convert_token_to_decimal, safe_div},
    },
    state::{State, keys::InvestorId},
};
use types::{Investor, InvestorSummary};

pub mod types;


/// Loads the investor, creating it (and the owner's summary) on first sight.
pub fn get_or_create_investor<M: Memory>(
    state: &mut State<M>,
    block: &BlockInfo,
    fund: Address,
    owner: Address,
) -> Investor {
    let id = InvestorId { fund, owner };
    if let Some(investor) = state.get_investor(&id) {
        return investor;
    }

    let investor = Investor {
        fund,
        owner,
        ..Default::default()
    };
    state.set_investor(id, investor.clone());

    if state.get_investor_summary(&owner).is_none() {
        state.set_investor_summary(InvestorSummary {
            owner,
            created_timestamp: block.timestamp,
            created_block: block.number,
            ..Default::default()
        });
    }
    investor
}

/// Settles the investor at `settlement_price` ahead of `outgoing` shares leaving.
///
/// Fees accrue on the shares held before the event. The outgoing shares take their
/// accrual plus a pro-rata part of the pending fees with them; that amount is
/// returned so the same withdrawal can be booked on the fund side. The share
/// balance itself is left to the caller.
pub fn settle_investor_fees(
    investor: &mut Investor,
    settlement_price: &BigDecimal,
    share_decimals: u32,
    outgoing: U256,
) -> BigDecimal {
    let lasted_share = convert_token_to_decimal(investor.share, share_decimals);
    let outgoing_share = convert_token_to_decimal(outgoing, share_decimals);
    let price_delta = settlement_price - &investor.lasted_settlement_price;

    let fees = &price_delta * &lasted_share;
    let withdrawn_fees = &price_delta * &outgoing_share
        + safe_div(&(&investor.total_pending_fees * &outgoing_share), &lasted_share);

    investor.lasted_settlement_price = settlement_price.clone();
    investor.total_fees += &fees;
    investor.total_pending_fees += fees - &withdrawn_fees;
    investor.total_withdrew_fees = &investor.total_fees - &investor.total_pending_fees;
    withdrawn_fees
}

/// Protocol fees charged on a withdrawal of `amount` that returned
/// `withdrawn_investment` of principal.
///
/// Nothing is charged until the amount beats the principal grown by the fund's
/// base line. Past it, the fees are the manager's and the protocol's cut of the
/// profit, grossed up since `amount` is already net of them.
pub fn protocol_fees(
    amount: &BigDecimal,
    withdrawn_investment: &BigDecimal,
    base_line: &BigDecimal,
    manager_fee: &BigDecimal,
) -> BigDecimal {
    let base_amount = withdrawn_investment + withdrawn_investment * base_line;
    if *amount <= base_amount {
        return ZERO_BD.clone();
    }

    let ratio = manager_fee + &*PROTOCOL_FEE_RATIO;
    safe_div(&((amount - withdrawn_investment) * &ratio), &(&*ONE_BD - &ratio))
}
