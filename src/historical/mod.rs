// Day buckets of funds and investors, keyed by `timestamp / 86400`.
//
// A fund bucket mirrors the fund at the last update of the day and keeps the fees
// accrued since the day started. An investor bucket does the same for one holder,
// measuring the day's fees through the move of its settlement price.

use bigdecimal::BigDecimal;
use ic_stable_structures::Memory;

use crate::{
    events::BlockInfo,
    fund::types::Fund,
    investor::types::Investor,
    libraries::constants::{SECONDS_PER_DAY, ZERO_BD},
    state::{
        State,
        keys::{FundDayId, InvestorDayId, InvestorId},
    },
};
use types::{FundDayData, InvestorDayData};

pub mod types;


pub fn day_of(timestamp: u64) -> u64 {
    timestamp / SECONDS_PER_DAY
}

pub fn update_fund_day_data<M: Memory>(
    state: &mut State<M>,
    block: &BlockInfo,
    fund: &Fund,
) -> FundDayData {
    let day = day_of(block.timestamp);
    let id = FundDayId {
        fund: fund.address,
        day,
    };

    let mut day_data = state.get_fund_day_data(&id).unwrap_or_else(|| {
        let previous = day.checked_sub(1).and_then(|previous_day| {
            state.get_fund_day_data(&FundDayId {
                fund: fund.address,
                day: previous_day,
            })
        });
        let mut fresh = FundDayData {
            fund: fund.address,
            date: day * SECONDS_PER_DAY,
            ..Default::default()
        };
        if let Some(previous) = previous {
            fresh.daily_settlement_price = previous.daily_settlement_price;
            fresh.total_fees = previous.total_fees;
            fresh.total_pending_fees = previous.total_pending_fees;
        }
        fresh.init_settlement_price = fresh.daily_settlement_price.clone();
        fresh
    });

    day_data.total_supply = fund.total_supply;
    day_data.total_investment = fund.total_investment.clone();
    day_data.total_investment_usd = fund.total_investment_usd.clone();
    day_data.total_assets = fund.total_assets.clone();
    day_data.total_assets_usd = fund.total_assets_usd.clone();
    day_data.total_deposited_amount = fund.total_deposited_amount.clone();
    day_data.total_deposited_amount_usd = fund.total_deposited_amount_usd.clone();
    day_data.total_withdrew_amount = fund.total_withdrew_amount.clone();
    day_data.total_withdrew_amount_usd = fund.total_withdrew_amount_usd.clone();

    day_data.daily_total_fees += &fund.total_fees - &day_data.total_fees;
    day_data.daily_settlement_price = fund.lasted_settlement_price.clone();
    day_data.total_fees = fund.total_fees.clone();
    day_data.total_pending_fees = fund.total_pending_fees.clone();
    day_data.total_withdrew_fees = fund.total_withdrew_fees.clone();

    state.set_fund_day_data(id, day_data.clone());
    day_data
}

/// `lasted_share` is the investor's share balance before the event, in share units.
/// The investor must already be settled at the fund's current price.
pub fn update_investor_day_data<M: Memory>(
    state: &mut State<M>,
    block: &BlockInfo,
    investor: &Investor,
    lasted_share: &BigDecimal,
) -> InvestorDayData {
    let day = day_of(block.timestamp);
    let id = InvestorDayId {
        investor: InvestorId {
            fund: investor.fund,
            owner: investor.owner,
        },
        day,
    };

    let mut day_data = state.get_investor_day_data(&id).unwrap_or_else(|| {
        let previous_fund_day = day.checked_sub(1).and_then(|previous_day| {
            state.get_fund_day_data(&FundDayId {
                fund: investor.fund,
                day: previous_day,
            })
        });
        // holders from before the day start at the fund's closing price of yesterday
        let daily_settlement_price = match previous_fund_day {
            Some(previous) if *lasted_share > *ZERO_BD => previous.daily_settlement_price,
            _ => investor.lasted_settlement_price.clone(),
        };
        InvestorDayData {
            fund: investor.fund,
            owner: investor.owner,
            date: day * SECONDS_PER_DAY,
            daily_settlement_price,
            ..Default::default()
        }
    });

    day_data.share = investor.share;
    day_data.total_investment = investor.total_investment.clone();
    day_data.total_investment_usd = investor.total_investment_usd.clone();
    day_data.total_deposited_amount = investor.total_deposited_amount.clone();
    day_data.total_deposited_amount_usd = investor.total_deposited_amount_usd.clone();
    day_data.total_withdrew_amount = investor.total_withdrew_amount.clone();
    day_data.total_withdrew_amount_usd = investor.total_withdrew_amount_usd.clone();

    let fees = (&investor.lasted_settlement_price - &day_data.daily_settlement_price) * lasted_share;
    day_data.daily_settlement_price = investor.lasted_settlement_price.clone();
    day_data.daily_total_fees += fees;

    day_data.total_fees = investor.total_fees.clone();
    day_data.total_pending_fees = investor.total_pending_fees.clone();
    day_data.total_withdrew_fees = investor.total_withdrew_fees.clone();

    state.set_investor_day_data(id, day_data.clone());
    day_data
}
