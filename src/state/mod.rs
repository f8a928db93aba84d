// [Indexer State]
//  └── Stable Memory (one virtual memory per record kind)
//      ├── TOKENS:              BTreeMap<"0x<token>", Token>
//      ├── FUNDS:               BTreeMap<"0x<fund>", Fund>
//      ├── MANAGERS:            BTreeMap<"0x<manager>", Manager>
//      ├── SUMMARY / BUNDLE:    BTreeMap<"1", FundSummary | Bundle>
//      ├── POOLS:               BTreeMap<"0x<fund>-<pool>", Pool>
//      ├── POSITIONS:           BTreeMap<"0x<fund>-<pool>-<position>", Position>
//      ├── INVESTORS:           BTreeMap<"0x<fund>-0x<owner>", Investor>
//      ├── INVESTOR_SUMMARIES:  BTreeMap<"0x<owner>", InvestorSummary>
//      ├── FUND_DAY_DATA:       BTreeMap<"0x<fund>-<day>", FundDayData>
//      ├── INVESTOR_DAY_DATA:   BTreeMap<"0x<fund>-0x<owner>-<day>", InvestorDayData>
//      └── PATHS / PATH_POOLS:  BTreeMap<"0x<fund>-0x<token>[-<hop>]", Path | PathPool>

use crate::{
    fund::types::{Bundle, Fund, FundSummary, Manager},
    historical::types::{FundDayData, InvestorDayData},
    indexer::IndexerError,
    investor::types::{Investor, InvestorSummary},
    path::types::{Path, PathPool},
    pool::types::Pool,
    position::types::Position,
    token::types::Token,
};

use alloy_primitives::Address;
use ic_stable_structures::{memory_manager::VirtualMemory, BTreeMap, DefaultMemoryImpl, Memory};
use keys::{
    address_key, FundDayId, FundId, InvestorDayId, InvestorId, PathId, PathPoolId, PoolId,
    PositionId, SINGLETON_KEY,
};
use memory_manager::*;

pub mod keys;
pub mod memory_manager;
pub mod storable_impl;

type Records<V, M> = BTreeMap<String, V, VirtualMemory<M>>;

/// The record store of the indexer, passed explicitly to every operation.
pub struct State<M: Memory = DefaultMemoryImpl> {
    tokens: Records<Token, M>,
    funds: Records<Fund, M>,
    managers: Records<Manager, M>,
    summary: Records<FundSummary, M>,
    bundle: Records<Bundle, M>,
    pools: Records<Pool, M>,
    positions: Records<Position, M>,
    investors: Records<Investor, M>,
    investor_summaries: Records<InvestorSummary, M>,
    fund_day_data: Records<FundDayData, M>,
    investor_day_data: Records<InvestorDayData, M>,
    paths: Records<Path, M>,
    path_pools: Records<PathPool, M>,
}

impl<M: Memory> State<M> {
    pub fn init(memory: M) -> Self {
        let memories = RecordMemories::init(memory);
        Self {
            tokens: BTreeMap::init(memories.get(TOKENS_MEMORY_ID)),
            funds: BTreeMap::init(memories.get(FUNDS_MEMORY_ID)),
            managers: BTreeMap::init(memories.get(MANAGERS_MEMORY_ID)),
            summary: BTreeMap::init(memories.get(SUMMARY_MEMORY_ID)),
            bundle: BTreeMap::init(memories.get(BUNDLE_MEMORY_ID)),
            pools: BTreeMap::init(memories.get(POOLS_MEMORY_ID)),
            positions: BTreeMap::init(memories.get(POSITIONS_MEMORY_ID)),
            investors: BTreeMap::init(memories.get(INVESTORS_MEMORY_ID)),
            investor_summaries: BTreeMap::init(memories.get(INVESTOR_SUMMARIES_MEMORY_ID)),
            fund_day_data: BTreeMap::init(memories.get(FUND_DAY_DATA_MEMORY_ID)),
            investor_day_data: BTreeMap::init(memories.get(INVESTOR_DAY_DATA_MEMORY_ID)),
            paths: BTreeMap::init(memories.get(PATHS_MEMORY_ID)),
            path_pools: BTreeMap::init(memories.get(PATH_POOLS_MEMORY_ID)),
        }
    }

    pub fn get_token(&self, token: &Address) -> Option<Token> {
        self.tokens.get(&address_key(token))
    }

    pub fn token(&self, token: &Address) -> Result<Token, IndexerError> {
        self.get_token(token)
            .ok_or_else(|| IndexerError::missing("Token", address_key(token)))
    }

    pub fn set_token(&mut self, token: Token) {
        self.tokens.insert(address_key(&token.address), token);
    }

    pub fn get_fund(&self, id: &FundId) -> Option<Fund> {
        self.funds.get(&id.to_string())
    }

    pub fn fund(&self, id: &FundId) -> Result<Fund, IndexerError> {
        self.get_fund(id)
            .ok_or_else(|| IndexerError::missing("Fund", id.to_string()))
    }

    pub fn set_fund(&mut self, fund: Fund) {
        self.funds.insert(FundId(fund.address).to_string(), fund);
    }

    pub fn get_manager(&self, manager: &Address) -> Option<Manager> {
        self.managers.get(&address_key(manager))
    }

    pub fn manager(&self, manager: &Address) -> Result<Manager, IndexerError> {
        self.get_manager(manager)
            .ok_or_else(|| IndexerError::missing("Manager", address_key(manager)))
    }

    pub fn set_manager(&mut self, manager: Manager) {
        self.managers.insert(address_key(&manager.address), manager);
    }

    pub fn get_fund_summary(&self) -> Option<FundSummary> {
        self.summary.get(&SINGLETON_KEY.to_string())
    }

    pub fn fund_summary(&self) -> Result<FundSummary, IndexerError> {
        self.get_fund_summary()
            .ok_or_else(|| IndexerError::missing("FundSummary", SINGLETON_KEY.to_string()))
    }

    pub fn set_fund_summary(&mut self, summary: FundSummary) {
        self.summary.insert(SINGLETON_KEY.to_string(), summary);
    }

    pub fn get_bundle(&self) -> Option<Bundle> {
        self.bundle.get(&SINGLETON_KEY.to_string())
    }

    pub fn set_bundle(&mut self, bundle: Bundle) {
        self.bundle.insert(SINGLETON_KEY.to_string(), bundle);
    }

    pub fn get_pool(&self, id: &PoolId) -> Option<Pool> {
        self.pools.get(&id.to_string())
    }

    pub fn pool(&self, id: &PoolId) -> Result<Pool, IndexerError> {
        self.get_pool(id)
            .ok_or_else(|| IndexerError::missing("Pool", id.to_string()))
    }

    pub fn set_pool(&mut self, id: PoolId, pool: Pool) {
        self.pools.insert(id.to_string(), pool);
    }

    pub fn get_position(&self, id: &PositionId) -> Option<Position> {
        self.positions.get(&id.to_string())
    }

    pub fn position(&self, id: &PositionId) -> Result<Position, IndexerError> {
        self.get_position(id)
            .ok_or_else(|| IndexerError::missing("Position", id.to_string()))
    }

    pub fn set_position(&mut self, id: PositionId, position: Position) {
        self.positions.insert(id.to_string(), position);
    }

    pub fn get_investor(&self, id: &InvestorId) -> Option<Investor> {
        self.investors.get(&id.to_string())
    }

    pub fn investor(&self, id: &InvestorId) -> Result<Investor, IndexerError> {
        self.get_investor(id)
            .ok_or_else(|| IndexerError::missing("Investor", id.to_string()))
    }

    pub fn set_investor(&mut self, id: InvestorId, investor: Investor) {
        self.investors.insert(id.to_string(), investor);
    }

    pub fn get_investor_summary(&self, owner: &Address) -> Option<InvestorSummary> {
        self.investor_summaries.get(&address_key(owner))
    }

    pub fn investor_summary(&self, owner: &Address) -> Result<InvestorSummary, IndexerError> {
        self.get_investor_summary(owner)
            .ok_or_else(|| IndexerError::missing("InvestorSummary", address_key(owner)))
    }

    pub fn set_investor_summary(&mut self, summary: InvestorSummary) {
        self.investor_summaries
            .insert(address_key(&summary.owner), summary);
    }

    pub fn get_fund_day_data(&self, id: &FundDayId) -> Option<FundDayData> {
        self.fund_day_data.get(&id.to_string())
    }

    pub fn set_fund_day_data(&mut self, id: FundDayId, day_data: FundDayData) {
        self.fund_day_data.insert(id.to_string(), day_data);
    }

    pub fn get_investor_day_data(&self, id: &InvestorDayId) -> Option<InvestorDayData> {
        self.investor_day_data.get(&id.to_string())
    }

    pub fn set_investor_day_data(&mut self, id: InvestorDayId, day_data: InvestorDayData) {
        self.investor_day_data.insert(id.to_string(), day_data);
    }

    pub fn get_path(&self, id: &PathId) -> Option<Path> {
        self.paths.get(&id.to_string())
    }

    pub fn set_path(&mut self, id: PathId, path: Path) {
        self.paths.insert(id.to_string(), path);
    }

    pub fn get_path_pool(&self, id: &PathPoolId) -> Option<PathPool> {
        self.path_pools.get(&id.to_string())
    }

    pub fn set_path_pool(&mut self, id: PathPoolId, path_pool: PathPool) {
        self.path_pools.insert(id.to_string(), path_pool);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    #[test]
    fn records_survive_a_round_trip_through_stable_memory() {
        let mut state = State::init(DefaultMemoryImpl::default());
        let fund = Fund {
            address: Address::repeat_byte(0x42),
            total_fees: BigDecimal::from_str("12.5").unwrap(),
            pools_length: 3,
            ..Default::default()
        };
        state.set_fund(fund.clone());

        assert_eq!(state.get_fund(&FundId(fund.address)), Some(fund));
        assert_eq!(state.get_fund(&FundId(Address::repeat_byte(0x43))), None);
    }

    #[test]
    fn missing_records_name_their_kind_and_key() {
        let state = State::init(DefaultMemoryImpl::default());
        let id = PoolId {
            fund: Address::repeat_byte(0x01),
            index: 7,
        };
        assert_eq!(
            state.pool(&id),
            Err(IndexerError::MissingRecord {
                kind: "Pool",
                id: id.to_string(),
            })
        );
    }

    #[test]
    fn record_kinds_do_not_share_memory() {
        let mut state = State::init(DefaultMemoryImpl::default());
        state.set_fund_summary(FundSummary {
            length: 1,
            ..Default::default()
        });
        state.set_bundle(Bundle {
            timestamp: 99,
            ..Default::default()
        });

        assert_eq!(state.fund_summary().unwrap().length, 1);
        assert_eq!(state.get_bundle().unwrap().timestamp, 99);
    }
}
