use ic_canister_log::log;
use ic_stable_structures::Memory;

use crate::{
    chain::ChainReader,
    config::IndexerConfig,
    events::BlockInfo,
    fund::{types::Bundle, update_fees},
    historical::day_of,
    indexer::IndexerError,
    libraries::constants::{END_OF_DAY_WINDOW_START, SECONDS_PER_DAY, ZERO_BD},
    logs::{DEBUG, INFO},
    price::eth_price_in_usd,
    state::{State, keys::FundId},
};

fn in_end_of_day_window(timestamp: u64) -> bool {
    timestamp % SECONDS_PER_DAY > END_OF_DAY_WINDOW_START
}

/// Whether the periodic refresh runs at `block`.
///
/// Roughly every five minutes of blocks, hourly for blocks before
/// `start_process_block`, and once inside the last five minutes of every UTC day.
/// Blocks without gas used never trigger it.
pub fn should_process_block(
    config: &IndexerConfig,
    bundle: Option<&Bundle>,
    block: &BlockInfo,
) -> bool {
    if block.gas_used == 0 {
        return false;
    }

    if in_end_of_day_window(block.timestamp) {
        let already_ran = bundle.is_some_and(|bundle| {
            in_end_of_day_window(bundle.timestamp)
                && day_of(bundle.timestamp) == day_of(block.timestamp)
        });
        return !already_ran;
    }

    let blocks_per_minute = config.block_amount_per_minute.max(1);
    if block.number < config.start_process_block && block.number % (60 * blocks_per_minute) != 0
    {
        return false;
    }
    block.number % (5 * blocks_per_minute) == 0
}

/// Refreshes every fund if `block` is due, then records the ETH price and the
/// summed fund assets. Returns whether the refresh ran.
pub fn handle_block<R: ChainReader, M: Memory>(
    state: &mut State<M>,
    config: &IndexerConfig,
    chain: &R,
    block: &BlockInfo,
) -> Result<bool, IndexerError> {
    if !should_process_block(config, state.get_bundle().as_ref(), block) {
        return Ok(false);
    }
    let Some(summary) = state.get_fund_summary() else {
        log!(DEBUG, "[handle_block]: no fund registered yet at block {}", block.number);
        return Ok(false);
    };

    // a fund that cannot be refreshed keeps its previous books and is left out of
    // the total; the others still run
    let mut total_assets_usd = ZERO_BD.clone();
    for fund in &summary.funds {
        let refreshed = update_fees(state, config, chain, block, *fund, None)
            .and_then(|_| state.fund(&FundId(*fund)));
        match refreshed {
            Ok(fund) => total_assets_usd += fund.total_assets_usd,
            Err(err) => log!(
                INFO,
                "[handle_block]: fund {fund} not refreshed at block {}: {err:?}",
                block.number
            ),
        }
    }

    // each refresh above booked its fees on the stored summary
    let mut summary = state.fund_summary()?;
    summary.total_assets_usd = total_assets_usd;
    state.set_fund_summary(summary);

    let eth_price_usd = eth_price_in_usd(config, chain);
    log!(
        INFO,
        "[handle_block]: refreshed funds at block {}, ETH at {eth_price_usd} USD",
        block.number
    );
    state.set_bundle(Bundle {
        eth_price_usd,
        timestamp: block.timestamp,
    });
    Ok(true)
}
