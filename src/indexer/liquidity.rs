use alloy_primitives::Address;
use ethnum::U256;
use ic_canister_log::log;
use ic_stable_structures::Memory;

use crate::{
    chain::{ChainReader, or_zero},
    config::IndexerConfig,
    events::BlockInfo,
    fund::{PositionSlot, update_fees},
    indexer::IndexerError,
    libraries::decimal_math::{convert_token_to_decimal, safe_div},
    logs::INFO,
    pool::types::Pool,
    position::{position_key, types::Position},
    price::get_token_price_usd,
    state::{
        State,
        keys::{FundId, PoolId, PositionId},
    },
    token::get_or_create_token,
};

/// Registers a new fund position (and its pool on first use), then settles fees
/// with that position flagged as changed.
#[allow(clippy::too_many_arguments)]
pub fn handle_init<R: ChainReader, M: Memory>(
    state: &mut State<M>,
    config: &IndexerConfig,
    chain: &R,
    block: &BlockInfo,
    fund_address: Address,
    slot: PositionSlot,
    amount: U256,
) -> Result<(), IndexerError> {
    let mut fund = state.fund(&FundId(fund_address))?;
    let fund_token = state.token(&fund.fund_token)?;

    // slots are appended in order: the next position of a known pool, or the
    // first position of the next pool
    let pool_id = PoolId {
        fund: fund_address,
        index: slot.pool_index,
    };
    let stored_pool = state.get_pool(&pool_id);
    let expected_position = stored_pool.as_ref().map_or(0, |pool| pool.positions_length);
    if (stored_pool.is_none() && slot.pool_index != fund.pools_length)
        || slot.position_index != expected_position
    {
        return Err(IndexerError::UnexpectedSlot {
            fund: fund_address,
            pool_index: slot.pool_index,
            position_index: slot.position_index,
        });
    }

    let price = get_token_price_usd(config, chain, &fund_token);
    let pool_address = chain.pools(fund_address, slot.pool_index)?;
    let range = chain.fund_positions(fund_address, slot.pool_index, slot.position_index)?;

    let mut pool = match stored_pool {
        Some(pool) => pool,
        None => {
            let pool = Pool {
                fund: fund_address,
                address: pool_address,
                token0: chain.token0(pool_address)?,
                token1: chain.token1(pool_address)?,
                fee: chain.fee(pool_address)?,
                ..Default::default()
            };
            for token in [pool.token0, pool.token1] {
                let (token, created) = get_or_create_token(state, chain, token);
                if created {
                    state.set_token(token);
                }
            }
            fund.pools_length += 1;
            pool
        }
    };
    pool.positions_length += 1;
    pool.asset_amount = convert_token_to_decimal(
        or_zero(chain.assets_of_pool(fund_address, slot.pool_index), "handle_init"),
        fund_token.decimals,
    );
    pool.asset_share = safe_div(&pool.asset_amount, &fund.total_assets);
    pool.asset_amount_usd = &price * &pool.asset_amount;

    let key = position_key(fund_address, range.tick_lower, range.tick_upper);
    let snapshot = chain.positions(pool_address, key)?;
    let position = Position {
        fund: fund_address,
        pool_index: slot.pool_index,
        position_index: slot.position_index,
        tick_lower: range.tick_lower,
        tick_upper: range.tick_upper,
        position_key: key,
        liquidity: snapshot.liquidity,
        // may be zero; the first refresh then seeds it
        fee_growth_inside_0_last_x128: snapshot.fee_growth_inside_0_last_x128,
        fee_growth_inside_1_last_x128: snapshot.fee_growth_inside_1_last_x128,
        is_empty: amount == U256::ZERO,
        ..Default::default()
    };

    let position_id = PositionId {
        fund: fund_address,
        pool_index: slot.pool_index,
        position_index: slot.position_index,
    };
    state.set_pool(pool_id, pool);
    state.set_position(position_id, position);
    state.set_fund(fund);

    log!(
        INFO,
        "[handle_init]: position {position_id} in pool {pool_address} [{}, {}]",
        range.tick_lower,
        range.tick_upper
    );

    update_fees(state, config, chain, block, fund_address, Some(slot))?;
    Ok(())
}

/// Liquidity moved from `sub_index` to `add_index` within one pool: both ends are
/// settled, the source first.
#[allow(clippy::too_many_arguments)]
pub fn handle_move<R: ChainReader, M: Memory>(
    state: &mut State<M>,
    config: &IndexerConfig,
    chain: &R,
    block: &BlockInfo,
    fund_address: Address,
    pool_index: u32,
    sub_index: u32,
    add_index: u32,
) -> Result<(), IndexerError> {
    for position_index in [sub_index, add_index] {
        update_fees(
            state,
            config,
            chain,
            block,
            fund_address,
            Some(PositionSlot {
                pool_index,
                position_index,
            }),
        )?;
    }
    Ok(())
}
