//! Fund lifecycle and the fee settlement engine.
//!
//! A refresh walks every pool and position of a fund, books the USD fees accrued
//! since each position's checkpoint, and turns their sum into an increment of the
//! fund's settlement price (cumulative fees per share). Investors later claim
//! `(price now - price at their last settlement) x shares`.

use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use ethnum::U256;
use ic_canister_log::log;
use ic_stable_structures::Memory;

use crate::{
    chain::{CallError, ChainReader, or_zero},
    config::IndexerConfig,
    events::BlockInfo,
    guard::FundGuard,
    historical::update_fund_day_data,
    indexer::IndexerError,
    libraries::{
        constants::{DEFAULT_TOKEN_DECIMALS, ZERO_BD},
        decimal_math::{convert_token_to_decimal, safe_div},
        safe_cast::u256_to_big_decimal,
    },
    logs::{DEBUG, INFO},
    pool::types::Pool,
    position::{
        ValuationError, cal_delta_fees_of_position, cal_position_valuation,
        types::{PoolValuationParams, Position},
    },
    price::get_token_price_usd,
    state::{
        State,
        keys::{FundId, PoolId, PositionId},
    },
    token::{
        fetch_token_balance_of, fetch_token_decimals, fetch_token_name, fetch_token_symbol,
        get_or_create_token, types::Token,
    },
};
use types::{FeeTotals, Fund, Manager};

pub mod types;


/// A position whose liquidity changed in the block being processed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionSlot {
    pub pool_index: u32,
    pub position_index: u32,
}

/// Outcome of one pass over a fund's pools.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PoolsRefresh {
    /// USD fees accrued since the stored checkpoints.
    pub delta_fees_usd: BigDecimal,
    /// Positions whose fee growth could not be reconciled. They keep their
    /// checkpoint and valuation from the previous pass.
    pub failed_positions: Vec<(PositionId, ValuationError)>,
}

/// Pools and positions revalued by a pass, held back until the pass has been
/// booked on the fund. A pass that fails halfway leaves every checkpoint in place.
#[must_use]
#[derive(Debug, Default)]
pub struct PoolsUpdate {
    pub refresh: PoolsRefresh,
    pools: Vec<(PoolId, Pool)>,
    positions: Vec<(PositionId, Position)>,
}

impl PoolsUpdate {
    pub fn commit<M: Memory>(self, state: &mut State<M>) -> PoolsRefresh {
        for (id, position) in self.positions {
            state.set_position(id, position);
        }
        for (id, pool) in self.pools {
            state.set_pool(id, pool);
        }
        self.refresh
    }
}

/// Registers a fund announced by the factory, with its manager and the summary.
pub fn create_fund<R: ChainReader, M: Memory>(
    state: &mut State<M>,
    config: &IndexerConfig,
    chain: &R,
    address: Address,
    manager: Address,
) {
    if state.get_fund(&FundId(address)).is_some() {
        log!(DEBUG, "[create_fund]: fund {address} already registered");
        return;
    }

    let fund_token = chain.token(address).unwrap_or_else(|err| {
        log!(DEBUG, "[create_fund]: {err:?}, fund token defaults to WETH");
        config.weth_address
    });
    let (token, created) = get_or_create_token(state, chain, fund_token);
    if created {
        state.set_token(token);
    }

    let hundred = BigDecimal::from(100);
    let fund = Fund {
        address,
        manager,
        fund_token,
        symbol: fetch_token_symbol(chain, address),
        name: fetch_token_name(chain, address),
        decimals: fetch_token_decimals(chain, address)
            .map(u32::from)
            .unwrap_or(DEFAULT_TOKEN_DECIMALS),
        lock_period: or_zero(chain.lock_period(address), "create_fund"),
        base_line: u256_to_big_decimal(or_zero(chain.base_line(address), "create_fund")) / &hundred,
        manager_fee: u256_to_big_decimal(or_zero(chain.manager_fee(address), "create_fund"))
            / &hundred,
        deadline: or_zero(chain.deposit_deadline(address), "create_fund"),
        ..Default::default()
    };
    state.set_fund(fund);

    let mut manager_record = state.get_manager(&manager).unwrap_or_else(|| Manager {
        address: manager,
        ..Default::default()
    });
    manager_record.length += 1;
    state.set_manager(manager_record);

    let mut summary = state.get_fund_summary().unwrap_or_default();
    summary.length += 1;
    summary.funds.push(address);
    state.set_fund_summary(summary);

    log!(INFO, "[create_fund]: fund {address} of manager {manager} registered");
}

/// Refreshes the fund's assets from its contract and returns the fund token price.
///
/// The fund-token balance is only re-read when an investment action triggered the
/// refresh.
pub fn sync_fund_status_data<R: ChainReader>(
    config: &IndexerConfig,
    chain: &R,
    fund: &mut Fund,
    fund_token: &Token,
    fund_token_price_usd: Option<BigDecimal>,
    refresh_balance: bool,
) -> BigDecimal {
    if refresh_balance {
        fund.balance = convert_token_to_decimal(
            fetch_token_balance_of(chain, fund.fund_token, fund.address),
            fund_token.decimals,
        );
    }
    fund.total_assets = convert_token_to_decimal(
        or_zero(chain.total_assets(fund.address), "sync_fund_status_data"),
        fund_token.decimals,
    );

    let price =
        fund_token_price_usd.unwrap_or_else(|| get_token_price_usd(config, chain, fund_token));
    fund.total_assets_usd = &price * &fund.total_assets;
    price
}

/// Pool-wide valuation inputs, or `None` when the pool state cannot be read.
fn pool_valuation_params<R: ChainReader>(
    config: &IndexerConfig,
    chain: &R,
    pool: &Pool,
    token0: &Token,
    token1: &Token,
    fund_token: &Token,
    fund_token_price_usd: &BigDecimal,
) -> Option<PoolValuationParams> {
    let read = || -> Result<_, CallError> {
        Ok((
            chain.slot0(pool.address)?,
            chain.fee_growth_global_0_x128(pool.address)?,
            chain.fee_growth_global_1_x128(pool.address)?,
        ))
    };
    let (slot0, fee_growth_global_0_x128, fee_growth_global_1_x128) = match read() {
        Ok(values) => values,
        Err(err) => {
            log!(DEBUG, "[update_fund_pools]: {err:?}, positions of pool {} skipped", pool.address);
            return None;
        }
    };

    let price_of = |token: &Token| {
        if token.address == fund_token.address {
            fund_token_price_usd.clone()
        } else {
            get_token_price_usd(config, chain, token)
        }
    };

    Some(PoolValuationParams {
        sqrt_price_x96: slot0.sqrt_price_x96,
        tick_current: slot0.tick,
        fee_growth_global_0_x128,
        fee_growth_global_1_x128,
        fund_token_price_usd: fund_token_price_usd.clone(),
        token0_price_usd: price_of(token0),
        token1_price_usd: price_of(token1),
        decimals0: token0.decimals,
        decimals1: token1.decimals,
    })
}

/// Settles fee growth of every position of `fund` and revalues them.
///
/// Without `changed` this is a time-driven refresh: empty positions are skipped.
/// With `changed`, only that position is rewritten from its on-chain liquidity;
/// another position whose liquidity moved belongs to a later event of the same block
/// and only gets its fee checkpoint advanced.
///
/// Nothing is stored until the caller commits the returned update.
pub fn update_fund_pools<R: ChainReader, M: Memory>(
    state: &State<M>,
    config: &IndexerConfig,
    chain: &R,
    fund: &Fund,
    fund_token: &Token,
    fund_token_price_usd: &BigDecimal,
    changed: Option<PositionSlot>,
) -> Result<PoolsUpdate, IndexerError> {
    let mut update = PoolsUpdate::default();

    for pool_index in 0..fund.pools_length {
        let pool_id = PoolId {
            fund: fund.address,
            index: pool_index,
        };
        let mut pool = state.pool(&pool_id)?;
        let token0 = state.token(&pool.token0)?;
        let token1 = state.token(&pool.token1)?;

        if let Some(params) = pool_valuation_params(
            config,
            chain,
            &pool,
            &token0,
            &token1,
            fund_token,
            fund_token_price_usd,
        ) {
            let ctx = PoolContext {
                fund,
                fund_token,
                fund_token_price_usd,
                pool: &pool,
                params: &params,
            };
            for position_index in 0..pool.positions_length {
                let slot = PositionSlot {
                    pool_index,
                    position_index,
                };
                refresh_position(state, chain, &ctx, slot, changed, &mut update)?;
            }
        }

        pool.asset_amount = convert_token_to_decimal(
            or_zero(chain.assets_of_pool(fund.address, pool_index), "update_fund_pools"),
            fund_token.decimals,
        );
        pool.asset_amount_usd = &pool.asset_amount * fund_token_price_usd;
        pool.asset_share = safe_div(&pool.asset_amount, &fund.total_assets);
        update.pools.push((pool_id, pool));
    }

    Ok(update)
}

struct PoolContext<'a> {
    fund: &'a Fund,
    fund_token: &'a Token,
    fund_token_price_usd: &'a BigDecimal,
    pool: &'a Pool,
    params: &'a PoolValuationParams,
}

fn refresh_position<R: ChainReader, M: Memory>(
    state: &State<M>,
    chain: &R,
    ctx: &PoolContext<'_>,
    slot: PositionSlot,
    changed: Option<PositionSlot>,
    update: &mut PoolsUpdate,
) -> Result<(), IndexerError> {
    let id = PositionId {
        fund: ctx.fund.address,
        pool_index: slot.pool_index,
        position_index: slot.position_index,
    };
    let mut position = state.position(&id)?;
    let is_changed = changed == Some(slot);
    if position.is_empty && !is_changed {
        return Ok(());
    }

    let snapshot = match chain.positions(ctx.pool.address, position.position_key) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            log!(DEBUG, "[update_fund_pools]: {err:?}, position {id} skipped");
            return Ok(());
        }
    };

    let delta = match cal_delta_fees_of_position(
        chain,
        ctx.pool.address,
        ctx.params,
        &position,
        &snapshot,
    ) {
        Ok(delta) => delta,
        Err(err) => {
            log!(DEBUG, "[update_fund_pools]: fee growth of position {id} unavailable: {err:?}");
            update.refresh.failed_positions.push((id, err));
            return Ok(());
        }
    };
    update.refresh.delta_fees_usd += &delta.fees_usd;
    position.fee_growth_inside_0_last_x128 = delta.fee_growth_inside_0_x128;
    position.fee_growth_inside_1_last_x128 = delta.fee_growth_inside_1_x128;

    if snapshot.liquidity != position.liquidity && changed.is_some() && !is_changed {
        update.positions.push((id, position));
        return Ok(());
    }

    position.liquidity = snapshot.liquidity;
    position.is_empty = snapshot.liquidity == 0;
    position.asset_amount = convert_token_to_decimal(
        or_zero(
            chain.assets_of_position(ctx.fund.address, slot.pool_index, slot.position_index),
            "update_fund_pools",
        ),
        ctx.fund_token.decimals,
    );
    position.asset_amount_usd = &position.asset_amount * ctx.fund_token_price_usd;
    position.asset_share = safe_div(&position.asset_amount, &ctx.fund.total_assets);

    let valuation = match cal_position_valuation(ctx.params, &position, &snapshot) {
        Ok(valuation) => valuation,
        Err(err) => {
            log!(DEBUG, "[update_fund_pools]: valuation of position {id} failed: {err:?}");
            update.refresh.failed_positions.push((id, err));
            update.positions.push((id, position));
            return Ok(());
        }
    };

    // the fund reports the position value; split it by the fee share of the pool position
    let proportion_of_fees = safe_div(
        &valuation.fees_usd,
        &(&valuation.amount_usd + &valuation.fees_usd),
    );
    position.fees = &position.asset_amount * &proportion_of_fees;
    position.fees_usd = &position.asset_amount_usd * &proportion_of_fees;
    position.fees0 = valuation.fees0;
    position.fees1 = valuation.fees1;
    position.amount = &position.asset_amount - &position.fees;
    position.amount_usd = &position.asset_amount_usd - &position.fees_usd;
    position.amount0 = valuation.amount0;
    position.amount1 = valuation.amount1;
    update.positions.push((id, position));
    Ok(())
}

/// Settlement price increment for `delta_fees_usd` spread over `shares` raw shares.
pub fn settlement_price_increment(delta_fees_usd: &BigDecimal, shares: U256, decimals: u32) -> BigDecimal {
    safe_div(delta_fees_usd, &convert_token_to_decimal(shares, decimals))
}

/// Refreshes a fund and books the accrued fees on the fund, its manager and the
/// summary.
pub fn update_fees<R: ChainReader, M: Memory>(
    state: &mut State<M>,
    config: &IndexerConfig,
    chain: &R,
    block: &BlockInfo,
    fund_address: Address,
    changed: Option<PositionSlot>,
) -> Result<PoolsRefresh, IndexerError> {
    let _guard = FundGuard::new(fund_address)?;

    let mut fund = state.fund(&FundId(fund_address))?;
    let fund_token = state.token(&fund.fund_token)?;
    let mut manager = state.manager(&fund.manager)?;
    let mut summary = state.fund_summary()?;

    let fund_token_price_usd =
        sync_fund_status_data(config, chain, &mut fund, &fund_token, None, changed.is_some());
    let refresh = update_fund_pools(
        state,
        config,
        chain,
        &fund,
        &fund_token,
        &fund_token_price_usd,
        changed,
    )?
    .commit(state);

    let delta = &refresh.delta_fees_usd;
    fund.lasted_settlement_price +=
        settlement_price_increment(delta, fund.total_supply, fund.decimals);
    fund.settle_fees(delta, &ZERO_BD);
    manager.settle_fees(delta, &ZERO_BD);
    summary.settle_fees(delta, &ZERO_BD);

    update_fund_day_data(state, block, &fund);
    state.set_fund(fund);
    state.set_manager(manager);
    state.set_fund_summary(summary);

    log!(
        INFO,
        "[update_fees]: fund {fund_address} accrued {delta} USD, {} positions unreconciled",
        refresh.failed_positions.len()
    );
    Ok(refresh)
}
