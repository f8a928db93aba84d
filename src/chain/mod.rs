//! Read-only view of the chain the indexer observes.
//!
//! Every call is a point-in-time read against the block being processed and can
//! revert. Callers decide which default stands in for a reverted value.

use alloy_primitives::{Address, B256};
use ethnum::U256;
use ic_canister_log::log;

use crate::logs::DEBUG;

pub mod types;

pub use types::{FundPositionInfo, PoolPositionSnapshot, Slot0, TickOutside};

/// A reverted or otherwise failed contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallError {
    pub contract: Address,
    pub method: &'static str,
}

impl CallError {
    pub fn new(contract: Address, method: &'static str) -> Self {
        Self { contract, method }
    }
}

pub type CallResult<T> = Result<T, CallError>;

/// The value of an amount read, or zero when the call reverted.
pub fn or_zero(result: CallResult<U256>, op: &str) -> U256 {
    result.unwrap_or_else(|err| {
        log!(DEBUG, "[{op}]: {err:?}, using zero");
        U256::ZERO
    })
}

/// Concentrated-liquidity pool contract.
pub trait PoolReader {
    fn slot0(&self, pool: Address) -> CallResult<Slot0>;
    fn fee_growth_global_0_x128(&self, pool: Address) -> CallResult<U256>;
    fn fee_growth_global_1_x128(&self, pool: Address) -> CallResult<U256>;
    fn ticks(&self, pool: Address, tick: i32) -> CallResult<TickOutside>;
    fn positions(&self, pool: Address, key: B256) -> CallResult<PoolPositionSnapshot>;
    fn token0(&self, pool: Address) -> CallResult<Address>;
    fn token1(&self, pool: Address) -> CallResult<Address>;
    fn fee(&self, pool: Address) -> CallResult<u32>;
}

/// Pool factory lookup. `None` stands for the zero address.
pub trait PoolRegistry {
    fn get_pool(&self, token_a: Address, token_b: Address, fee: u32) -> Option<Address>;
}

/// ERC20 token contract, including the legacy `bytes32` metadata variants.
pub trait Erc20Reader {
    fn symbol(&self, token: Address) -> CallResult<String>;
    fn symbol_bytes(&self, token: Address) -> CallResult<B256>;
    fn name(&self, token: Address) -> CallResult<String>;
    fn name_bytes(&self, token: Address) -> CallResult<B256>;
    fn decimals(&self, token: Address) -> CallResult<u8>;
    fn total_supply(&self, token: Address) -> CallResult<U256>;
    fn balance_of(&self, token: Address, owner: Address) -> CallResult<U256>;
}

/// Managed fund contract.
///
/// `fund_total_supply` and `fund_positions` carry a prefix so they do not clash with
/// the ERC20 and pool methods of the same name on a single chain reader.
pub trait FundReader {
    fn token(&self, fund: Address) -> CallResult<Address>;
    fn total_assets(&self, fund: Address) -> CallResult<U256>;
    fn fund_total_supply(&self, fund: Address) -> CallResult<U256>;
    fn total_investment(&self, fund: Address) -> CallResult<U256>;
    fn investment_of(&self, fund: Address, investor: Address) -> CallResult<U256>;
    fn assets_of_position(
        &self,
        fund: Address,
        pool_index: u32,
        position_index: u32,
    ) -> CallResult<U256>;
    fn assets_of_pool(&self, fund: Address, pool_index: u32) -> CallResult<U256>;
    fn pools(&self, fund: Address, pool_index: u32) -> CallResult<Address>;
    fn fund_positions(
        &self,
        fund: Address,
        pool_index: u32,
        position_index: u32,
    ) -> CallResult<FundPositionInfo>;
    fn lock_period(&self, fund: Address) -> CallResult<U256>;
    fn base_line(&self, fund: Address) -> CallResult<U256>;
    fn manager_fee(&self, fund: Address) -> CallResult<U256>;
    fn deposit_deadline(&self, fund: Address) -> CallResult<U256>;
}

/// Everything the indexer reads from the chain.
pub trait ChainReader: PoolReader + PoolRegistry + Erc20Reader + FundReader {}

impl<T: PoolReader + PoolRegistry + Erc20Reader + FundReader> ChainReader for T {}
