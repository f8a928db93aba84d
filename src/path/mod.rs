use alloy_primitives::Address;
use ic_canister_log::log;
use ic_stable_structures::Memory;

use crate::{
    chain::PoolRegistry,
    indexer::IndexerError,
    libraries::path_key::decode_path,
    logs::INFO,
    state::{
        State,
        keys::{PathId, PathPoolId},
    },
};
use types::{Path, PathPool};

pub mod types;

#[cfg(test)]
mod tests;

/// Stores the route `fund` swaps along into `dist_token`, one record per hop.
pub fn set_path<R: PoolRegistry, M: Memory>(
    state: &mut State<M>,
    chain: &R,
    fund: Address,
    dist_token: Address,
    path: &[u8],
) -> Result<Path, IndexerError> {
    let hops = decode_path(path).map_err(|reason| IndexerError::InvalidPath {
        fund,
        dist_token,
        reason,
    })?;

    let id = PathId { fund, dist_token };
    for (hop, key) in hops.iter().enumerate() {
        let (_, _, zero_for_one) = key.pool_tokens_and_direction();
        let address = chain
            .get_pool(key.token_in, key.token_out, key.fee)
            .unwrap_or(Address::ZERO);
        state.set_path_pool(
            PathPoolId {
                path: id,
                hop: hop as u32,
            },
            PathPool {
                token_in: key.token_in,
                fee: key.fee,
                token_out: key.token_out,
                zero_for_one,
                address,
            },
        );
    }

    let record = Path {
        fund,
        dist_token,
        path: path.to_vec(),
        path_pools_length: hops.len() as u32,
    };
    state.set_path(id, record.clone());

    log!(INFO, "[set_path]: fund {fund} routes to {dist_token} over {} hops", hops.len());
    Ok(record)
}
