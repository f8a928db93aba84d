//! Share supply changes: deposits mint shares, withdrawals burn them, transfers move
//! them between holders. Each one settles the accrued fees against the supply that
//! earned them before any share changes hands.

use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use ethnum::U256;
use ic_canister_log::log;
use ic_stable_structures::Memory;

use crate::{
    chain::{ChainReader, FundReader, or_zero},
    config::IndexerConfig,
    events::BlockInfo,
    fund::{
        PoolsUpdate, settlement_price_increment, sync_fund_status_data,
        types::{FeeTotals, Fund, FundSummary, Manager},
        update_fund_pools,
    },
    guard::FundGuard,
    historical::{update_fund_day_data, update_investor_day_data},
    indexer::IndexerError,
    investor::{get_or_create_investor, protocol_fees, settle_investor_fees},
    libraries::{
        constants::ZERO_BD,
        decimal_math::{convert_token_to_decimal, safe_div},
    },
    logs::{DEBUG, INFO},
    price::get_token_price_usd,
    state::{State, keys::FundId},
    token::types::Token,
};

/// Owner and raw amounts of a `Deposit` or `Withdraw`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvestmentAction {
    pub owner: Address,
    /// Fund-token amount.
    pub amount: U256,
    /// Fund shares minted or burned.
    pub share: U256,
}

/// The aggregate records touched by every investment action.
struct FundBooks {
    fund: Fund,
    fund_token: Token,
    manager: Manager,
    summary: FundSummary,
}

impl FundBooks {
    fn load<M: Memory>(state: &State<M>, fund: Address) -> Result<Self, IndexerError> {
        let fund = state.fund(&FundId(fund))?;
        let fund_token = state.token(&fund.fund_token)?;
        let manager = state.manager(&fund.manager)?;
        let summary = state.fund_summary()?;
        Ok(Self {
            fund,
            fund_token,
            manager,
            summary,
        })
    }

    /// Books the pool fee delta and the fees leaving with the action.
    fn settle(&mut self, settlement_price: BigDecimal, delta: &BigDecimal, withdrawn: &BigDecimal) {
        self.fund.lasted_settlement_price = settlement_price;
        self.fund.settle_fees(delta, withdrawn);
        self.manager.settle_fees(delta, withdrawn);
        self.summary.settle_fees(delta, withdrawn);
    }

    fn save<M: Memory>(self, state: &mut State<M>, block: &BlockInfo) {
        update_fund_day_data(state, block, &self.fund);
        state.set_fund(self.fund);
        state.set_manager(self.manager);
        state.set_fund_summary(self.summary);
    }
}

/// Re-reads the share supply, keeping the stored one if the call reverts.
fn sync_total_supply<R: FundReader>(chain: &R, fund: &mut Fund) {
    match chain.fund_total_supply(fund.address) {
        Ok(total_supply) => fund.total_supply = total_supply,
        Err(err) => log!(
            DEBUG,
            "[sync_total_supply]: {err:?}, keeping {} shares",
            fund.total_supply
        ),
    }
}

fn refresh_pools<R: ChainReader, M: Memory>(
    state: &State<M>,
    config: &IndexerConfig,
    chain: &R,
    books: &FundBooks,
    fund_token_price_usd: &BigDecimal,
) -> Result<PoolsUpdate, IndexerError> {
    update_fund_pools(
        state,
        config,
        chain,
        &books.fund,
        &books.fund_token,
        fund_token_price_usd,
        None,
    )
}

pub fn handle_deposit<R: ChainReader, M: Memory>(
    state: &mut State<M>,
    config: &IndexerConfig,
    chain: &R,
    block: &BlockInfo,
    fund_address: Address,
    action: InvestmentAction,
) -> Result<(), IndexerError> {
    let _guard = FundGuard::new(fund_address)?;
    let mut books = FundBooks::load(state, fund_address)?;

    let price = get_token_price_usd(config, chain, &books.fund_token);
    let amount = convert_token_to_decimal(action.amount, books.fund_token.decimals);
    let amount_usd = &amount * &price;

    sync_fund_status_data(
        config,
        chain,
        &mut books.fund,
        &books.fund_token,
        Some(price.clone()),
        true,
    );
    let fund = &mut books.fund;
    sync_total_supply(chain, fund);
    fund.total_investment = convert_token_to_decimal(
        or_zero(chain.total_investment(fund_address), "handle_deposit"),
        books.fund_token.decimals,
    );
    fund.total_investment_usd += &amount_usd;
    fund.total_deposited_amount += &amount;
    fund.total_deposited_amount_usd += &amount_usd;

    let pools = refresh_pools(state, config, chain, &books, &price)?;
    let delta = &pools.refresh.delta_fees_usd;
    // the minted shares did not exist while the fees accrued
    let settlement_price = &books.fund.lasted_settlement_price
        + settlement_price_increment(
            delta,
            books.fund.total_supply.saturating_sub(action.share),
            books.fund.decimals,
        );

    let mut investor = get_or_create_investor(state, block, fund_address, action.owner);
    let mut investor_summary = state.investor_summary(&action.owner)?;
    let lasted_share = convert_token_to_decimal(investor.share, books.fund.decimals);
    settle_investor_fees(&mut investor, &settlement_price, books.fund.decimals, U256::ZERO);

    investor.share = investor.share.saturating_add(action.share);
    investor.total_investment += &amount;
    investor.total_investment_usd += &amount_usd;
    investor.total_deposited_amount += &amount;
    investor.total_deposited_amount_usd += &amount_usd;
    investor.last_deposit_time = block.timestamp;
    investor_summary.total_investment_usd += &amount_usd;

    books.settle(settlement_price, delta, &ZERO_BD);
    books.summary.total_investment_usd += &amount_usd;
    books.summary.total_assets_usd += &amount_usd;
    books.manager.total_investment_usd += &amount_usd;
    books.manager.total_assets_usd += &amount_usd;

    pools.commit(state);
    update_investor_day_data(state, block, &investor, &lasted_share);
    state.set_investor(investor.id(), investor);
    state.set_investor_summary(investor_summary);
    books.save(state, block);

    log!(
        INFO,
        "[handle_deposit]: {} deposited {amount} into fund {fund_address} for {} shares",
        action.owner,
        action.share
    );
    Ok(())
}

pub fn handle_withdraw<R: ChainReader, M: Memory>(
    state: &mut State<M>,
    config: &IndexerConfig,
    chain: &R,
    block: &BlockInfo,
    fund_address: Address,
    action: InvestmentAction,
) -> Result<(), IndexerError> {
    let _guard = FundGuard::new(fund_address)?;
    let mut books = FundBooks::load(state, fund_address)?;

    let price = get_token_price_usd(config, chain, &books.fund_token);
    let decimals = books.fund_token.decimals;
    let amount = convert_token_to_decimal(action.amount, decimals);
    let amount_usd = &amount * &price;

    sync_fund_status_data(
        config,
        chain,
        &mut books.fund,
        &books.fund_token,
        Some(price.clone()),
        true,
    );
    let fund = &mut books.fund;
    sync_total_supply(chain, fund);
    fund.total_investment = convert_token_to_decimal(
        or_zero(chain.total_investment(fund_address), "handle_withdraw"),
        decimals,
    );
    fund.total_withdrew_amount += &amount;

    let pools = refresh_pools(state, config, chain, &books, &price)?;
    let delta = &pools.refresh.delta_fees_usd;
    // the burned shares still earned the fees accrued up to now
    let settlement_price = &books.fund.lasted_settlement_price
        + settlement_price_increment(
            delta,
            books.fund.total_supply.saturating_add(action.share),
            books.fund.decimals,
        );

    let mut investor = get_or_create_investor(state, block, fund_address, action.owner);
    let mut investor_summary = state.investor_summary(&action.owner)?;
    let lasted_share = convert_token_to_decimal(investor.share, books.fund.decimals);
    let withdrawn_fees =
        settle_investor_fees(&mut investor, &settlement_price, books.fund.decimals, action.share);
    investor.share = investor.share.saturating_sub(action.share);

    let investment_before = investor.total_investment.clone();
    investor.total_investment = convert_token_to_decimal(
        or_zero(chain.investment_of(fund_address, action.owner), "handle_withdraw"),
        decimals,
    );
    let withdrawn_investment = &investment_before - &investor.total_investment;
    let withdrawn_investment_usd = safe_div(
        &(&withdrawn_investment * &investor.total_investment_usd),
        &investment_before,
    );

    let protocol_fees = protocol_fees(
        &amount,
        &withdrawn_investment,
        &books.fund.base_line,
        &books.fund.manager_fee,
    );
    let protocol_fees_usd = &protocol_fees * &price;

    investor.total_protocol_fees += &protocol_fees;
    investor.total_protocol_fees_usd += &protocol_fees_usd;
    investor.total_investment_usd -= &withdrawn_investment_usd;
    investor.total_withdrew_amount += &amount;
    investor.total_withdrew_amount_usd += &amount_usd;
    investor_summary.total_investment_usd -= &withdrawn_investment_usd;
    investor_summary.total_protocol_fees_usd += &protocol_fees_usd;

    books.settle(settlement_price, delta, &withdrawn_fees);
    let fund = &mut books.fund;
    fund.total_investment_usd -= &withdrawn_investment_usd;
    fund.total_withdrew_amount_usd += &amount_usd;
    fund.total_protocol_fees += &protocol_fees;
    fund.total_protocol_fees_usd += &protocol_fees_usd;
    let summary = &mut books.summary;
    summary.total_investment_usd -= &withdrawn_investment_usd;
    summary.total_assets_usd -= &amount_usd;
    summary.total_protocol_fees_usd += &protocol_fees_usd;
    books.manager.total_investment_usd -= &withdrawn_investment_usd;
    books.manager.total_assets_usd -= &amount_usd;

    pools.commit(state);
    update_investor_day_data(state, block, &investor, &lasted_share);
    state.set_investor(investor.id(), investor);
    state.set_investor_summary(investor_summary);
    books.save(state, block);

    log!(
        INFO,
        "[handle_withdraw]: {} withdrew {amount} from fund {fund_address}, {withdrawn_fees} USD of fees, {protocol_fees} protocol fees",
        action.owner
    );
    Ok(())
}

/// Moves `value` shares from `from` to `to`. Mints and burns are handled by
/// `Deposit` and `Withdraw` and are ignored here.
#[allow(clippy::too_many_arguments)]
pub fn handle_transfer<R: ChainReader, M: Memory>(
    state: &mut State<M>,
    config: &IndexerConfig,
    chain: &R,
    block: &BlockInfo,
    fund_address: Address,
    from: Address,
    to: Address,
    value: U256,
) -> Result<(), IndexerError> {
    if from == Address::ZERO || to == Address::ZERO {
        return Ok(());
    }

    let _guard = FundGuard::new(fund_address)?;
    let mut books = FundBooks::load(state, fund_address)?;

    let price = get_token_price_usd(config, chain, &books.fund_token);
    let pools = refresh_pools(state, config, chain, &books, &price)?;
    let delta = &pools.refresh.delta_fees_usd;
    let decimals = books.fund.decimals;
    let settlement_price = &books.fund.lasted_settlement_price
        + settlement_price_increment(delta, books.fund.total_supply, decimals);

    let mut sender = get_or_create_investor(state, block, fund_address, from);
    let sender_lasted_share = convert_token_to_decimal(sender.share, decimals);
    let withdrawn_fees = settle_investor_fees(&mut sender, &settlement_price, decimals, value);
    sender.share = sender.share.saturating_sub(value);
    update_investor_day_data(state, block, &sender, &sender_lasted_share);
    state.set_investor(sender.id(), sender);

    // loaded after the sender is stored so a self transfer sees its own settlement
    let mut receiver = get_or_create_investor(state, block, fund_address, to);
    let receiver_lasted_share = convert_token_to_decimal(receiver.share, decimals);
    settle_investor_fees(&mut receiver, &settlement_price, decimals, U256::ZERO);
    receiver.share = receiver.share.saturating_add(value);
    update_investor_day_data(state, block, &receiver, &receiver_lasted_share);
    state.set_investor(receiver.id(), receiver);

    books.settle(settlement_price, delta, &withdrawn_fees);
    pools.commit(state);
    books.save(state, block);

    log!(
        INFO,
        "[handle_transfer]: {value} shares of fund {fund_address} from {from} to {to}"
    );
    Ok(())
}
